use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pl", about = concat!("[\u{2713}] punchlist v", env!("CARGO_PKG_VERSION"), " - your to-dos live in your issue tracker"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different config directory
    #[arg(long = "config-dir", global = true)]
    pub config_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the config for the repository whose issues back the list
    Init(InitArgs),
    /// Store the API token
    Login(LoginArgs),
    /// List tasks
    List(ListArgs),
    /// Create a task (opens an issue)
    Add(AddArgs),
    /// Mark a task done (closes the issue)
    Done(NumberArg),
    /// Reactivate a task (reopens the issue)
    Reopen(NumberArg),
    /// Change a task's title and/or body
    Edit(EditArgs),
    /// Clear completed tasks (closes their issues)
    Clear,
}

#[derive(Args)]
pub struct InitArgs {
    /// Repository owner (user or org)
    #[arg(long)]
    pub owner: String,
    /// Repository name
    #[arg(long)]
    pub repo: String,
    /// API base URL (defaults to the public GitHub API)
    #[arg(long)]
    pub api_url: Option<String>,
    /// Overwrite an existing config
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct LoginArgs {
    /// The token; prompted for when omitted
    pub token: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Show all, active, or completed tasks
    #[arg(long, default_value = "all")]
    pub filter: String,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Task body
    #[arg(short, long, default_value = "")]
    pub body: String,
}

#[derive(Args)]
pub struct NumberArg {
    /// Issue number
    pub number: u64,
}

#[derive(Args)]
pub struct EditArgs {
    /// Issue number
    pub number: u64,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New body
    #[arg(long)]
    pub body: Option<String>,
}
