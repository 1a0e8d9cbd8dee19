//! Init command implementation

use crate::config::{Config, PathsConfig};
use crate::error::{Error, Result};
use std::path::PathBuf;

/// Write a default config file under the given base directory
/// (defaults to ~/.newsdesk)
pub async fn cmd_init(base_dir: Option<PathBuf>, force: bool) -> Result<Config> {
    let base = base_dir.unwrap_or_else(Config::default_base_dir);

    let mut config = Config::default();
    config.paths = PathsConfig {
        config_file: base.join("config.toml"),
        base_dir: base,
    };

    if config.paths.config_file.exists() && !force {
        return Err(Error::AlreadyInitialized(
            config.paths.config_file.display().to_string(),
        ));
    }

    config.save()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_writes_config() {
        let dir = TempDir::new().unwrap();
        let config = cmd_init(Some(dir.path().to_path_buf()), false).await.unwrap();

        assert!(config.paths.config_file.exists());
        let loaded = Config::load(&config.paths.config_file).unwrap();
        assert_eq!(loaded.collection_name, "news_articles");
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        cmd_init(Some(dir.path().to_path_buf()), false).await.unwrap();

        let err = cmd_init(Some(dir.path().to_path_buf()), false)
            .await
            .expect_err("second init should fail");
        assert!(matches!(err, Error::AlreadyInitialized(_)));

        // --force overwrites
        cmd_init(Some(dir.path().to_path_buf()), true).await.unwrap();
    }
}
