use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::io::config_io::write_atomic;

/// Environment override for the API token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no token provided")]
    Empty,
    #[error("could not prompt for a token: {0}")]
    Prompt(std::io::Error),
}

pub fn token_path(dir: &Path) -> PathBuf {
    dir.join("token")
}

/// Token from the token file, if one is stored.
pub fn stored_token(dir: &Path) -> Result<Option<String>, TokenError> {
    let path = token_path(dir);
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(&path).map_err(|e| TokenError::Read {
        path: path.clone(),
        source: e,
    })?;
    let token = text.trim().to_string();
    Ok(if token.is_empty() { None } else { Some(token) })
}

pub fn store_token(dir: &Path, token: &str) -> Result<(), TokenError> {
    fs::create_dir_all(dir).map_err(|e| TokenError::Write {
        path: dir.to_path_buf(),
        source: e,
    })?;
    let path = token_path(dir);
    write_atomic(dir, &path, &format!("{}\n", token.trim())).map_err(|e| TokenError::Write {
        path,
        source: e,
    })
}

/// Environment first, then the token file.
pub fn resolve_token(dir: &Path) -> Result<Option<String>, TokenError> {
    if let Ok(token) = env::var(TOKEN_ENV)
        && !token.trim().is_empty()
    {
        return Ok(Some(token.trim().to_string()));
    }
    stored_token(dir)
}

/// Ask for a token on stdin.
pub fn prompt_token() -> Result<String, TokenError> {
    eprint!("GitHub API token: ");
    io::stderr().flush().map_err(TokenError::Prompt)?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .map_err(TokenError::Prompt)?;
    let token = line.trim().to_string();
    if token.is_empty() {
        return Err(TokenError::Empty);
    }
    Ok(token)
}

/// Use the stored token, or ask once on stdin and keep the answer for
/// next time.
pub fn obtain_token(dir: &Path) -> Result<String, TokenError> {
    if let Some(token) = resolve_token(dir)? {
        return Ok(token);
    }
    let token = prompt_token()?;
    store_token(dir, &token)?;
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_store_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        store_token(dir.path(), "ghp_abc123").unwrap();
        assert_eq!(stored_token(dir.path()).unwrap().as_deref(), Some("ghp_abc123"));
    }

    #[test]
    fn test_missing_token_is_none() {
        let dir = TempDir::new().unwrap();
        assert_eq!(stored_token(dir.path()).unwrap(), None);
    }

    #[test]
    fn test_stored_token_is_trimmed() {
        let dir = TempDir::new().unwrap();
        store_token(dir.path(), "  ghp_abc123  ").unwrap();
        assert_eq!(stored_token(dir.path()).unwrap().as_deref(), Some("ghp_abc123"));
    }

    #[test]
    fn test_blank_token_file_is_none() {
        let dir = TempDir::new().unwrap();
        fs::write(token_path(dir.path()), "\n").unwrap();
        assert_eq!(stored_token(dir.path()).unwrap(), None);
    }
}
