use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.toml";

/// Process-wide configuration, read once at startup and never mutated.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// NetBox base URL, e.g. `https://netbox.example.com`.
    pub url: String,
    /// NetBox API token.
    pub token: String,
    /// Tag that marks devices and VMs this tool should manage.
    pub tag: String,
    /// Status values considered alive, e.g. `["active"]`.
    pub statuses: Vec<String>,
}

impl Settings {
    /// Load settings from `settings.toml` next to the executable.
    pub fn load() -> Result<Self> {
        Self::load_from(&default_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
        Ok(settings)
    }
}

fn default_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Could not determine executable path")?;
    let dir = exe
        .parent()
        .context("Executable path has no parent directory")?;
    Ok(dir.join(SETTINGS_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_complete_settings() {
        let settings: Settings = toml::from_str(
            r#"
            url = "https://netbox.example.com"
            token = "0123456789abcdef"
            tag = "gen_ssh_config"
            statuses = ["active", "staged"]
            "#,
        )
        .unwrap();

        assert_eq!(settings.url, "https://netbox.example.com");
        assert_eq!(settings.token, "0123456789abcdef");
        assert_eq!(settings.tag, "gen_ssh_config");
        assert_eq!(settings.statuses, vec!["active", "staged"]);
    }

    #[test]
    fn missing_key_is_an_error() {
        let result = toml::from_str::<Settings>(
            r#"
            url = "https://netbox.example.com"
            token = "0123456789abcdef"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn statuses_keep_their_order() {
        let settings: Settings = toml::from_str(
            r#"
            url = "https://netbox.example.com"
            token = "t"
            tag = "t"
            statuses = ["staged", "active"]
            "#,
        )
        .unwrap();
        assert_eq!(settings.statuses, vec!["staged", "active"]);
    }
}
