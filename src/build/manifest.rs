use serde::Deserialize;

use crate::analyzer::AnalyzerConfig;
use crate::types::EnvVersions;

/// Manifest versions this builder understands.
pub const MANIFEST_VERSION: u32 = 1;

fn default_source_suffix() -> String {
    ".rst".to_string()
}

/// `manifest.json` in the build input directory.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InputManifest {
    pub version: u32,
    /// Document files relative to the input directory. Order defines doc ids.
    pub documents: Vec<String>,
    #[serde(default = "default_source_suffix")]
    pub source_suffix: String,
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    /// Extra env versions recorded alongside the builder's own.
    #[serde(default)]
    pub env_versions: EnvVersions,
}

impl InputManifest {
    pub fn check_version(&self) -> Result<(), String> {
        if self.version == MANIFEST_VERSION {
            Ok(())
        } else {
            Err(format!(
                "unsupported manifest version {} (expected {})",
                self.version, MANIFEST_VERSION
            ))
        }
    }
}
