use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from mention.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MentionConfig {
    #[serde(default)]
    pub complete: CompleteConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteConfig {
    /// Character that starts a mention token
    #[serde(default = "default_trigger")]
    pub trigger: char,
    /// Cap on ranked results for a non-empty query
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Cap on the unranked browse list shown for a bare trigger
    #[serde(default = "default_browse_limit")]
    pub browse_limit: usize,
    /// Minimum similarity in [0, 1] a candidate needs to be listed
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f64,
}

impl Default for CompleteConfig {
    fn default() -> Self {
        CompleteConfig {
            trigger: default_trigger(),
            max_results: default_max_results(),
            browse_limit: default_browse_limit(),
            min_similarity: default_min_similarity(),
        }
    }
}

fn default_trigger() -> char {
    '@'
}

fn default_max_results() -> usize {
    10
}

fn default_browse_limit() -> usize {
    20
}

fn default_min_similarity() -> f64 {
    0.5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Rows visible in the dropdown before it scrolls
    #[serde(default = "default_max_visible")]
    pub max_visible: usize,
    /// Theme overrides, e.g. `highlight = "#FB4196"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            max_visible: default_max_visible(),
            colors: HashMap::new(),
        }
    }
}

fn default_max_visible() -> usize {
    8
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_gives_defaults() {
        let config: MentionConfig = toml::from_str("").unwrap();
        assert_eq!(config, MentionConfig::default());
        assert_eq!(config.complete.trigger, '@');
        assert_eq!(config.complete.max_results, 10);
        assert_eq!(config.complete.browse_limit, 20);
        assert_eq!(config.ui.max_visible, 8);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: MentionConfig = toml::from_str(
            "[complete]\nmin_similarity = 0.25\n\n[ui.colors]\nhighlight = \"#00FF00\"\n",
        )
        .unwrap();
        assert_eq!(config.complete.min_similarity, 0.25);
        assert_eq!(config.complete.max_results, 10);
        assert_eq!(config.ui.colors.get("highlight").map(String::as_str), Some("#00FF00"));
    }
}
