//! Render Configuration

use serde::{Deserialize, Serialize};

use crate::normalize::NormalizationMode;

/// Options for a [`RenderContext`](crate::RenderContext)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Deep-normalize every child list (hand-written render functions)
    pub always_normalize: bool,

    /// Mode used by `create_element` when the call site gives none
    pub default_mode: NormalizationMode,

    /// Log a warning when a render yields more than one root
    pub warn_on_multiple_roots: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            always_normalize: false,
            default_mode: NormalizationMode::Skip,
            warn_on_multiple_roots: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"default_mode": "deep"}"#).unwrap();
        assert_eq!(config.default_mode, NormalizationMode::Deep);
        assert!(!config.always_normalize);
        assert!(config.warn_on_multiple_roots);
    }
}
