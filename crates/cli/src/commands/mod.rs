pub mod resolve;
pub mod serve;
pub mod validate;

use anyhow::{Context, Result};
use press_kit_client::{ContentSource, Fixture, InMemorySource, WordPressClient};
use press_kit_core::{Config, load_config};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "press-kit.toml";

/// Explicit path, else `./press-kit.toml` if present, else defaults plus env
pub fn load(path: Option<PathBuf>) -> Result<Config> {
    let path = path.or_else(|| {
        let default = PathBuf::from(DEFAULT_CONFIG_FILE);
        default.exists().then_some(default)
    });
    load_config(path.as_deref()).context("Failed to load configuration")
}

/// Fixture file when given, otherwise the live CMS
pub fn content_source(config: &Config, fixtures: Option<&Path>) -> Result<Arc<dyn ContentSource>> {
    match fixtures {
        Some(path) => {
            let fixture = Fixture::from_file(path)
                .with_context(|| format!("Failed to load fixtures from {}", path.display()))?;
            Ok(Arc::new(InMemorySource::new(fixture)))
        }
        None => {
            let client = WordPressClient::new(&config.wordpress)
                .context("Failed to create WordPress client")?;
            Ok(Arc::new(client))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use press_kit_client::PostQuery;
    use std::fs;

    #[test]
    fn test_load_explicit_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "[server]\nport = 4000\n").unwrap();

        let config = load(Some(path)).unwrap();
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_load_missing_config_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load(Some(dir.path().join("nope.toml"))).unwrap_err();
        assert!(format!("{:#}", err).contains("not found"));
    }

    #[tokio::test]
    async fn test_fixture_source() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("fixture.json");
        fs::write(
            &path,
            r#"{"posts": [{"id": 1, "slug": "hello", "title": {"rendered": "Hello"}}]}"#,
        )
        .unwrap();

        let source = content_source(&Config::default(), Some(&path)).unwrap();
        assert_eq!(source.posts(&PostQuery::default()).await.len(), 1);
        assert!(source.post_by_slug("hello").await.is_some());
    }

    #[test]
    fn test_bad_fixture_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("fixture.json");
        fs::write(&path, "{ not json").unwrap();

        let err = content_source(&Config::default(), Some(&path)).err().unwrap();
        assert!(err.to_string().contains("Failed to load fixtures"));
    }
}
