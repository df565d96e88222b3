use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::selection::MultiKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiKeySetting {
    Auto,
    Meta,
    Ctrl,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    pub top: i32,
    pub left: i32,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self { top: 10, left: -100 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub server_url: String,
    pub basket_url: String,
    /// `{type}` and `{id}` are filled from the annotation element id.
    pub remove_url: String,
    pub delete_url: String,
    pub debounce_ms: u64,
    pub multi_key: MultiKeySetting,
    pub offline: bool,
    pub tooltip: TooltipConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:4080".to_string(),
            basket_url: "/webclient/basket/update/".to_string(),
            remove_url: "/webclient/action/remove/{type}/{id}/".to_string(),
            delete_url: "/webclient/action/delete/{type}/{id}/".to_string(),
            debounce_ms: 10,
            multi_key: MultiKeySetting::Auto,
            offline: true,
            tooltip: TooltipConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Read a JSON config file; without a path the defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;
        log::info!("config: loaded {}", path.display());
        Ok(config)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn multi_key(&self) -> MultiKey {
        match self.multi_key {
            MultiKeySetting::Auto => MultiKey::for_current_platform(),
            MultiKeySetting::Meta => MultiKey::Meta,
            MultiKeySetting::Ctrl => MultiKey::Ctrl,
        }
    }

    /// Fill a remove/delete URL template for an `ID-TYPE` element id.
    pub fn item_url(template: &str, element_id: &str) -> Option<String> {
        let (id, kind) = element_id.split_once('-')?;
        Some(template.replace("{type}", kind).replace("{id}", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"debounce_ms": 25, "multi_key": "meta"}"#).unwrap();
        assert_eq!(config.debounce(), Duration::from_millis(25));
        assert_eq!(config.multi_key(), MultiKey::Meta);
        assert_eq!(config.basket_url, "/webclient/basket/update/");
        assert_eq!(config.tooltip.left, -100);
        assert!(config.offline);
    }

    #[test]
    fn missing_path_uses_defaults() {
        let config = ClientConfig::load(None).unwrap();
        assert_eq!(config.debounce_ms, 10);
    }

    #[test]
    fn unreadable_file_is_an_error() {
        assert!(ClientConfig::load(Some(Path::new("/nonexistent/omero.json"))).is_err());
    }

    #[test]
    fn item_url_fills_template() {
        assert_eq!(
            ClientConfig::item_url("/webclient/action/remove/{type}/{id}/", "461-comment"),
            Some("/webclient/action/remove/comment/461/".to_string())
        );
        assert_eq!(ClientConfig::item_url("/x/{id}/", "461"), None);
    }
}
