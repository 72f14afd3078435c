use serde::{Deserialize, Serialize};

/// Model used when the settings document doesn't name one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// The complete settings record. Field order here is the stable key order
/// of the bootstrapped file; wire names match the original document so a
/// hand-edited file keeps working.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(rename = "apiKey", default)]
    pub api_key: String,

    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
        }
    }
}

// Manual Debug so the api key never lands in a log line.
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .field("model", &self.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_builtin_record() {
        let s = Settings::default();
        assert_eq!(s.api_key, "");
        assert_eq!(s.model, "gpt-4o-mini");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let s: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(s, Settings::default());

        let s: Settings = serde_json::from_str(r#"{"apiKey":"sk-1"}"#).unwrap();
        assert_eq!(s.api_key, "sk-1");
        assert_eq!(s.model, "gpt-4o-mini");
    }

    #[test]
    fn serializes_api_key_first() {
        let json = serde_json::to_string_pretty(&Settings::default()).unwrap();
        let api_pos = json.find("\"apiKey\"").unwrap();
        let model_pos = json.find("\"model\"").unwrap();
        assert!(api_pos < model_pos);
    }

    #[test]
    fn debug_output_redacts_the_key() {
        let s = Settings {
            api_key: "sk-secret".into(),
            model: "gpt-4o".into(),
        };
        let dbg = format!("{s:?}");
        assert!(!dbg.contains("sk-secret"));
    }
}
