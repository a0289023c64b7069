// ── Full running-configuration domain type ──

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The whole running configuration, tracked as text against a local file.
///
/// `config` and `diff` are computed: `config` is the switch's canonical
/// rendering, `diff` a unified diff from it to the local file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullConfig {
    pub filename: PathBuf,
    #[serde(default)]
    pub config: String,
    #[serde(default)]
    pub diff: String,
}

impl FullConfig {
    pub fn new(filename: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
            config: String::new(),
            diff: String::new(),
        }
    }
}
