use std::path::{Path, PathBuf};

use crate::cli::commands::{AddArgs, Cli, Commands, EditArgs, InitArgs, ListArgs, LoginArgs};
use crate::cli::output::{
    ClearJson, ListJson, counts_to_json, format_counts, format_task_line, task_to_json,
};
use crate::io::config_io;
use crate::io::token;
use crate::model::{Config, Filter, TodoList};
use crate::remote::{IssueClient, IssuePatch};

type CliResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CliResult {
    let dir = config_io::config_dir(cli.config_dir.as_deref().map(Path::new))?;
    let json = cli.json;

    let Some(command) = cli.command else {
        // No subcommand is handled in main.rs (TUI)
        return Ok(());
    };

    match command {
        Commands::Init(args) => cmd_init(args, &dir),
        Commands::Login(args) => cmd_login(args, &dir),
        Commands::List(args) => cmd_list(args, &dir, json),
        Commands::Add(args) => cmd_add(args, &dir, json),
        Commands::Done(args) => cmd_set_state(args.number, true, &dir, json),
        Commands::Reopen(args) => cmd_set_state(args.number, false, &dir, json),
        Commands::Edit(args) => cmd_edit(args, &dir, json),
        Commands::Clear => cmd_clear(&dir, json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open_client(dir: &Path) -> Result<(Config, IssueClient), Box<dyn std::error::Error>> {
    let config = config_io::read_config(dir)?;
    crate::logging::init(dir);
    let token = token::obtain_token(dir)?;
    let client = IssueClient::new(&config, token)?;
    Ok((config, client))
}

// ---------------------------------------------------------------------------
// Setup commands
// ---------------------------------------------------------------------------

fn cmd_init(args: InitArgs, dir: &Path) -> CliResult {
    let path: PathBuf = config_io::config_path(dir);
    if path.exists() && !args.force {
        return Err(format!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        )
        .into());
    }
    let mut config = Config::new(args.owner, args.repo);
    if let Some(api_url) = args.api_url {
        config.api.base_url = api_url;
    }
    let written = config_io::write_config(dir, &config)?;
    println!("wrote {}", written.display());
    println!("tracking issues of {}", config.repo.slug());
    Ok(())
}

fn cmd_login(args: LoginArgs, dir: &Path) -> CliResult {
    let token = match args.token {
        Some(token) => token,
        None => token::prompt_token()?,
    };
    token::store_token(dir, &token)?;
    println!("token stored in {}", token::token_path(dir).display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Task commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, dir: &Path, json: bool) -> CliResult {
    let (config, client) = open_client(dir)?;
    let mut list = TodoList::new();
    list.replace_all(client.list()?);

    let filter = Filter::from_segment(&args.filter);
    let visible = list.filtered(filter);

    if json {
        let out = ListJson {
            repo: config.repo.slug(),
            filter,
            counts: counts_to_json(&list.counts()),
            tasks: visible.iter().map(|t| task_to_json(t)).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for task in &visible {
            println!("{}", format_task_line(task));
        }
        if !visible.is_empty() {
            println!();
        }
        println!("{}", format_counts(&list.counts()));
    }
    Ok(())
}

fn cmd_add(args: AddArgs, dir: &Path, json: bool) -> CliResult {
    let title = args.title.trim();
    if title.is_empty() {
        return Err("title is empty".into());
    }
    let (_, client) = open_client(dir)?;
    let task = client.create(title, args.body.trim())?;
    if json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(&task))?);
    } else {
        println!("{}", format_task_line(&task));
    }
    Ok(())
}

fn cmd_set_state(number: u64, completed: bool, dir: &Path, json: bool) -> CliResult {
    let (_, client) = open_client(dir)?;
    let task = client.update(number, &IssuePatch::state(completed))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(&task))?);
    } else {
        println!("{}", format_task_line(&task));
    }
    Ok(())
}

fn cmd_edit(args: EditArgs, dir: &Path, json: bool) -> CliResult {
    // A blank title never overwrites; with nothing to change the command
    // is a no-op and no request is made
    let title = args
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    let body = args.body.map(|b| b.trim().to_string());
    if title.is_none() && body.is_none() {
        println!("nothing to change");
        return Ok(());
    }
    let patch = IssuePatch {
        title,
        body,
        state: None,
    };
    let (_, client) = open_client(dir)?;
    let task = client.update(args.number, &patch)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(&task))?);
    } else {
        println!("{}", format_task_line(&task));
    }
    Ok(())
}

fn cmd_clear(dir: &Path, json: bool) -> CliResult {
    let (_, client) = open_client(dir)?;
    let mut list = TodoList::new();
    list.replace_all(client.list()?);

    let batch = list.clear_completed();
    let mut cleared = Vec::new();
    for (_, task) in &batch.removed {
        client.update(task.number, &IssuePatch::state(true))?;
        cleared.push(task.number);
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&ClearJson { cleared })?
        );
    } else {
        println!(
            "cleared {} completed {}",
            cleared.len(),
            crate::model::pluralize(cleared.len(), "task")
        );
    }
    Ok(())
}
