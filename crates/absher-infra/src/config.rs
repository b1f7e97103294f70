//! Portal configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.absher/` by default)
//! and deserializes it into [`PortalConfig`]. Falls back to defaults when
//! the file is missing or malformed.

use std::path::{Path, PathBuf};

use absher_types::config::PortalConfig;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "ABSHER_DATA_DIR";

/// Resolve the data directory.
///
/// Priority:
/// 1. `ABSHER_DATA_DIR` environment variable
/// 2. `~/.absher`
/// 3. `.absher` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".absher");
    }

    PathBuf::from(".absher")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`PortalConfig::default()`].
/// - Unreadable or unparsable file: a warning and the default.
pub async fn load_portal_config(data_dir: &Path) -> PortalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return PortalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return PortalConfig::default();
        }
    };

    match toml::from_str::<PortalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            PortalConfig::default()
        }
    }
}

/// Dataset location: absolute paths as-is, relative ones under `data_dir`.
pub fn resolve_dataset_path(config: &PortalConfig, data_dir: &Path) -> PathBuf {
    let path = Path::new(&config.dataset_path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        data_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_portal_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_portal_config(tmp.path()).await;
        assert_eq!(config.dataset_path, "synthetic_users_1000.json");
        assert!(!config.verification.demo_mode);
        assert_eq!(config.server.port, 8080);
    }

    #[tokio::test]
    async fn load_portal_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
dataset_path = "users.json"

[llm]
timeout_secs = 15
max_new_tokens = 256

[verification]
demo_mode = true
"#,
        )
        .await
        .unwrap();

        let config = load_portal_config(tmp.path()).await;
        assert_eq!(config.dataset_path, "users.json");
        assert_eq!(config.llm.timeout_secs, 15);
        assert_eq!(config.llm.max_new_tokens, 256);
        // Unspecified fields keep their defaults.
        assert_eq!(config.llm.top_k, 50);
        assert_eq!(config.llm.api_key_env, "HF_API_TOKEN");
        assert!(config.verification.demo_mode);
    }

    #[tokio::test]
    async fn load_portal_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_portal_config(tmp.path()).await;
        assert_eq!(config.dataset_path, "synthetic_users_1000.json");
    }

    #[test]
    fn resolve_dataset_path_relative_and_absolute() {
        let data_dir = Path::new("/var/lib/absher");
        let mut config = PortalConfig::default();
        assert_eq!(
            resolve_dataset_path(&config, data_dir),
            PathBuf::from("/var/lib/absher/synthetic_users_1000.json")
        );

        config.dataset_path = "/data/users.json".to_string();
        assert_eq!(
            resolve_dataset_path(&config, data_dir),
            PathBuf::from("/data/users.json")
        );
    }
}
