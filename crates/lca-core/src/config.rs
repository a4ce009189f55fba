use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "lca.toml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "LCA_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcaConfig {
    #[serde(default)]
    pub dag: DagConfig,
}

/// How DAG ancestor sets are collected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AncestorStrategy {
    /// Walk every distinct root-to-node path.
    #[default]
    PathEnumeration,
    /// Visit each node once per root, memoising whether it reaches the node.
    Reachability,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DagConfig {
    #[serde(default)]
    pub strategy: AncestorStrategy,
    /// Reject cyclic graphs before traversal.
    #[serde(default = "default_true")]
    pub check_acyclic: bool,
}

impl Default for DagConfig {
    fn default() -> Self {
        Self {
            strategy: AncestorStrategy::default(),
            check_acyclic: default_true(),
        }
    }
}

/// Load config from `path`, or defaults if the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<LcaConfig> {
    if !path.exists() {
        return Ok(LcaConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<LcaConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Pick the config file: `flag`, then `$LCA_CONFIG`, then `./lca.toml`.
#[must_use]
pub fn resolve_config_path(flag: Option<&Path>) -> PathBuf {
    resolve_config_path_inner(flag, env::var(CONFIG_ENV_VAR).ok())
}

fn resolve_config_path_inner(flag: Option<&Path>, env_path: Option<String>) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    match env_path {
        Some(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from(CONFIG_FILE_NAME),
    }
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempfile::tempdir().expect("temp dir must be created");
        let cfg = load_config(&dir.path().join(CONFIG_FILE_NAME)).expect("load should succeed");
        assert_eq!(cfg.dag.strategy, AncestorStrategy::PathEnumeration);
        assert!(cfg.dag.check_acyclic);
    }

    #[test]
    fn parses_strategy_and_check() {
        let dir = tempfile::tempdir().expect("temp dir must be created");
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"
[dag]
strategy = "reachability"
check_acyclic = false
"#,
        )
        .expect("write config");

        let cfg = load_config(&path).expect("load should succeed");
        assert_eq!(cfg.dag.strategy, AncestorStrategy::Reachability);
        assert!(!cfg.dag.check_acyclic);
    }

    #[test]
    fn partial_section_keeps_defaults() {
        let cfg: LcaConfig = toml::from_str("[dag]\nstrategy = \"path-enumeration\"\n").expect("parse");
        assert!(cfg.dag.check_acyclic);

        let empty: LcaConfig = toml::from_str("").expect("parse");
        assert_eq!(empty, LcaConfig::default());
    }

    #[test]
    fn parse_error_names_the_file() {
        let dir = tempfile::tempdir().expect("temp dir must be created");
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[dag]\nstrategy = \"bogus\"\n").expect("write config");

        let err = load_config(&path).expect_err("bogus strategy must fail");
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn flag_overrides_env() {
        let path = resolve_config_path_inner(Some(Path::new("a.toml")), Some("b.toml".into()));
        assert_eq!(path, PathBuf::from("a.toml"));
    }

    #[test]
    fn env_overrides_default() {
        assert_eq!(
            resolve_config_path_inner(None, Some("b.toml".into())),
            PathBuf::from("b.toml")
        );
        assert_eq!(
            resolve_config_path_inner(None, Some("  ".into())),
            PathBuf::from(CONFIG_FILE_NAME)
        );
        assert_eq!(
            resolve_config_path_inner(None, None),
            PathBuf::from(CONFIG_FILE_NAME)
        );
    }
}
