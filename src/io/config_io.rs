use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::Config;

/// Environment override for the config directory (the `--config-dir` flag
/// wins over this).
pub const CONFIG_DIR_ENV: &str = "PUNCHLIST_CONFIG_DIR";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no config directory could be determined for this platform")]
    NoConfigDir,
    #[error("no config at {0} (run `pl init --owner <owner> --repo <repo>` first)")]
    Missing(PathBuf),
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
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Resolve the config directory: explicit flag, then environment, then
/// the platform config dir.
pub fn config_dir(override_dir: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    if let Ok(dir) = env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    dirs::config_dir()
        .map(|d| d.join("punchlist"))
        .ok_or(ConfigError::NoConfigDir)
}

pub fn config_path(dir: &Path) -> PathBuf {
    dir.join("config.toml")
}

pub fn read_config(dir: &Path) -> Result<Config, ConfigError> {
    let path = config_path(dir);
    if !path.exists() {
        return Err(ConfigError::Missing(path));
    }
    let text = fs::read_to_string(&path).map_err(|e| ConfigError::Read {
        path: path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Write the config, creating the directory if needed. The write goes
/// through a temp file in the same directory so a crash never leaves a
/// half-written config behind.
pub fn write_config(dir: &Path, config: &Config) -> Result<PathBuf, ConfigError> {
    fs::create_dir_all(dir).map_err(|e| ConfigError::Write {
        path: dir.to_path_buf(),
        source: e,
    })?;
    let path = config_path(dir);
    let text = toml::to_string_pretty(config)?;
    write_atomic(dir, &path, &text).map_err(|e| ConfigError::Write {
        path: path.clone(),
        source: e,
    })?;
    Ok(path)
}

pub(crate) fn write_atomic(dir: &Path, path: &Path, text: &str) -> Result<(), std::io::Error> {
    use std::io::Write;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(text.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let config = Config::new("wildcatz", "TodoMVC");
        let path = write_config(dir.path(), &config).unwrap();
        assert!(path.exists());
        let loaded = read_config(dir.path()).unwrap();
        assert_eq!(loaded.repo.slug(), "wildcatz/TodoMVC");
        assert_eq!(loaded.api.base_url, config.api.base_url);
    }

    #[test]
    fn test_missing_config_is_a_distinct_error() {
        let dir = TempDir::new().unwrap();
        match read_config(dir.path()) {
            Err(ConfigError::Missing(path)) => {
                assert!(path.ends_with("config.toml"));
            }
            other => panic!("expected Missing, got {:?}", other.map(|c| c.repo.slug())),
        }
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        fs::write(config_path(dir.path()), "not = [valid").unwrap();
        assert!(matches!(
            read_config(dir.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_explicit_override_wins() {
        let dir = config_dir(Some(Path::new("/tmp/somewhere"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/somewhere"));
    }
}
