//! Configuration for the transpose CLI.
//!
//! Loads config from:
//! 1. Global: ~/.config/transpose/config.toml
//! 2. Per-project: .transpose/config.toml (overrides global)
//! 3. An explicit `--config` file (overrides both)
//!
//! Command-line flags override every file.
//!
//! Example config.toml:
//! ```toml
//! [codegen]
//! mode = "managed"
//! error_policy = "collect"
//! ```

use anyhow::Context;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use transpose_codegen::{ErrorPolicy, Mode, Options};

/// Generation mode as spelled in config files and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ModeArg {
    /// Plain target bindings.
    Native,
    /// Bindings wrapped in tagged records.
    Managed,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        Mode::from_managed_runtime(mode == ModeArg::Managed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PolicyArg {
    /// Stop at the first item that cannot be translated.
    FailFast,
    /// Translate what can be translated and report the rest.
    Collect,
}

impl From<PolicyArg> for ErrorPolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::FailFast => ErrorPolicy::FailFast,
            PolicyArg::Collect => ErrorPolicy::Collect,
        }
    }
}

/// `[codegen]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CodegenConfig {
    /// Generation mode. Default: native.
    pub mode: Option<ModeArg>,
    /// What to do with items that cannot be translated. Default: fail_fast.
    pub error_policy: Option<PolicyArg>,
}

impl CodegenConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            mode: other.mode.or(self.mode),
            error_policy: other.error_policy.or(self.error_policy),
        }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TransposeConfig {
    pub codegen: CodegenConfig,
}

impl TransposeConfig {
    /// Load global config, then the project config under `root`.
    pub fn load(root: &Path) -> Self {
        Self::load_from(Self::global_config_path().as_deref(), root)
    }

    /// Load with an explicit global config path (`None` skips it).
    pub fn load_from(global: Option<&Path>, root: &Path) -> Self {
        let mut config = Self::default();

        if let Some(global) = global.and_then(Self::load_file) {
            config = config.merge(global);
        }

        let project_path = root.join(".transpose").join("config.toml");
        if let Some(project) = Self::load_file(&project_path) {
            config = config.merge(project);
        }

        config
    }

    /// Load a file named on the command line. Unlike the implicit layers, it
    /// must exist and parse.
    pub fn load_explicit(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("transpose").join("config.toml"))
    }

    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring invalid config");
                None
            }
        }
    }

    /// Values set in `other` take precedence.
    pub fn merge(self, other: Self) -> Self {
        Self {
            codegen: self.codegen.merge(other.codegen),
        }
    }

    /// Translation options, with command-line overrides applied.
    pub fn options(&self, mode: Option<ModeArg>, keep_going: bool) -> Options {
        let mode = mode.or(self.codegen.mode).map(Mode::from).unwrap_or_default();
        let error_policy = if keep_going {
            ErrorPolicy::Collect
        } else {
            self.codegen
                .error_policy
                .map(ErrorPolicy::from)
                .unwrap_or_default()
        };
        Options { mode, error_policy }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut file = std::fs::File::create(path).unwrap();
        writeln!(file, "{content}").unwrap();
    }

    #[test]
    fn test_defaults() {
        let dir = TempDir::new().unwrap();
        let config = TransposeConfig::load_from(None, dir.path());
        assert_eq!(config, TransposeConfig::default());
        assert_eq!(config.options(None, false), Options::default());
    }

    #[test]
    fn test_project_overrides_global() {
        let dir = TempDir::new().unwrap();
        let global = dir.path().join("global").join("config.toml");
        write_config(
            &global,
            r#"
[codegen]
mode = "managed"
error_policy = "collect"
"#,
        );
        write_config(
            &dir.path().join(".transpose").join("config.toml"),
            r#"
[codegen]
mode = "native"
"#,
        );

        let config = TransposeConfig::load_from(Some(&global), dir.path());
        assert_eq!(config.codegen.mode, Some(ModeArg::Native));
        // Not set by the project, so the global value survives.
        assert_eq!(config.codegen.error_policy, Some(PolicyArg::Collect));
    }

    #[test]
    fn test_invalid_project_config_is_ignored() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir.path().join(".transpose").join("config.toml"),
            "[codegen]\nmode = \"interpreted\"",
        );
        let config = TransposeConfig::load_from(None, dir.path());
        assert_eq!(config.codegen.mode, None);
    }

    #[test]
    fn test_explicit_config_must_parse() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        write_config(&path, "codegen = 3");
        assert!(TransposeConfig::load_explicit(&path).is_err());
        assert!(TransposeConfig::load_explicit(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let config = TransposeConfig {
            codegen: CodegenConfig {
                mode: Some(ModeArg::Managed),
                error_policy: Some(PolicyArg::FailFast),
            },
        };
        let options = config.options(Some(ModeArg::Native), true);
        assert_eq!(options.mode, Mode::Native);
        assert_eq!(options.error_policy, ErrorPolicy::Collect);

        let options = config.options(None, false);
        assert_eq!(options.mode, Mode::Managed);
        assert_eq!(options.error_policy, ErrorPolicy::FailFast);
    }

    #[test]
    fn test_schema_names_sections() {
        let schema = serde_json::to_string(&schemars::schema_for!(TransposeConfig)).unwrap();
        assert!(schema.contains("codegen"));
        assert!(schema.contains("error_policy"));
    }
}
