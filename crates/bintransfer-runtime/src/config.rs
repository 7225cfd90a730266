//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Environment variable selecting the deployment mode.
pub const ENV_VAR: &str = "BINTRANSFER_ENV";

/// Encode/decode engine configuration.
///
/// Nothing here changes the bytes produced or accepted; it only toggles
/// extra integrity checks and resource bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Peek and verify the header of every nested container against the
    /// IDs its param may hold before decoding it.
    pub structural_validation: bool,

    /// Maximum container nesting accepted while encoding or decoding.
    pub max_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            structural_validation: true,
            max_depth: 128,
        }
    }
}

impl EngineConfig {
    /// Production settings: structural validation off.
    pub fn production() -> Self {
        Self {
            structural_validation: false,
            ..Self::default()
        }
    }

    /// `production()` when `BINTRANSFER_ENV=production`, defaults otherwise.
    pub fn from_env() -> Self {
        Self::for_environment(std::env::var(ENV_VAR).ok().as_deref())
    }

    /// Settings for a named environment.
    pub fn for_environment(env: Option<&str>) -> Self {
        match env {
            Some("production") => Self::production(),
            _ => Self::default(),
        }
    }
}
