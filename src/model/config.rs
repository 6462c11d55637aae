use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from desk.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeskConfig {
    pub desk: DeskInfo,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeskInfo {
    pub name: String,
    /// Departments offered by the ticket form, in display order
    #[serde(default)]
    pub departments: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex overrides for theme slots, e.g. `red = "#FF0000"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config: DeskConfig = toml::from_str("[desk]\nname = \"Soporte\"\n").unwrap();
        assert_eq!(config.desk.name, "Soporte");
        assert!(config.desk.departments.is_empty());
        assert!(config.ui.show_key_hints);
        assert!(config.ui.colors.is_empty());
    }

    #[test]
    fn full_config() {
        let text = r##"
[desk]
name = "Soporte TI"
departments = ["Ventas", "Finanzas"]

[ui]
show_key_hints = false

[ui.colors]
red = "#FF0000"
"##;
        let config: DeskConfig = toml::from_str(text).unwrap();
        assert_eq!(config.desk.departments, vec!["Ventas", "Finanzas"]);
        assert!(!config.ui.show_key_hints);
        assert_eq!(config.ui.colors.get("red").map(String::as_str), Some("#FF0000"));
    }
}
