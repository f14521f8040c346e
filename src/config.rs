//! Configuration discovery and effective settings resolution.
//!
//! vulnscan reads `vulnscan.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config. Defaults:
//! - `output`: `human`
//! - `filename`: `snippet.js` (label applied to inline-code findings)
//! - `rules`: empty (custom `[[rules]]` entries append to the built-ins)
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::catalog::{Catalog, CatalogError, CustomRule};
use crate::scan::DEFAULT_FILENAME;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `vulnscan.toml|yaml`.
pub struct VulnscanConfig {
    pub output: Option<String>,
    pub filename: Option<String>,
    #[serde(default)]
    pub rules: Vec<CustomRule>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub output: String,
    pub filename: String,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `vulnscan.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("vulnscan.toml").exists()
            || cur.join("vulnscan.yaml").exists()
            || cur.join("vulnscan.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `VulnscanConfig` from `vulnscan.toml` or `vulnscan.yaml|yml` if present.
pub fn load_config(root: &Path) -> Option<VulnscanConfig> {
    let toml_path = root.join("vulnscan.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: VulnscanConfig = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["vulnscan.yaml", "vulnscan.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: VulnscanConfig = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

/// Resolve effective settings from CLI flags, config file, and defaults.
pub fn resolve_effective(
    repo_root: Option<&str>,
    output: Option<&str>,
    filename: Option<&str>,
) -> Effective {
    let start = repo_root
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    let root = detect_repo_root(&start);
    let cfg = load_config(&root).unwrap_or_default();
    Effective {
        repo_root: root,
        output: output
            .map(str::to_string)
            .or(cfg.output)
            .unwrap_or_else(|| "human".to_string()),
        filename: filename
            .map(str::to_string)
            .or(cfg.filename)
            .unwrap_or_else(|| DEFAULT_FILENAME.to_string()),
    }
}

/// Build the catalog the configured repository should scan with: built-ins
/// plus any `[[rules]]` entries from the config file.
pub fn effective_catalog(root: &Path) -> Result<Catalog, CatalogError> {
    match load_config(root) {
        Some(cfg) if !cfg.rules.is_empty() => Catalog::with_custom(&cfg.rules),
        _ => Ok(Catalog::builtin()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_repo_root_stops_at_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("vulnscan.toml"), "output = \"json\"\n").unwrap();
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(detect_repo_root(&nested), dir.path());
    }

    #[test]
    fn test_load_config_toml_with_custom_rules() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("vulnscan.toml"),
            r#"
output = "json"
filename = "inline.js"

[[rules]]
id = "todo-marker"
pattern = "TODO|FIXME"
severity = "low"
message = "Leftover task marker."
"#,
        )
        .unwrap();
        let cfg = load_config(dir.path()).unwrap();
        assert_eq!(cfg.output.as_deref(), Some("json"));
        assert_eq!(cfg.filename.as_deref(), Some("inline.js"));
        assert_eq!(cfg.rules.len(), 1);
        assert_eq!(cfg.rules[0].id, "todo-marker");

        let cat = effective_catalog(dir.path()).unwrap();
        assert_eq!(cat.iter().last().unwrap().id.as_str(), "todo-marker");
    }

    #[test]
    fn test_load_config_yaml_variant() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("vulnscan.yaml"), "output: json\n").unwrap();
        let cfg = load_config(dir.path()).unwrap();
        assert_eq!(cfg.output.as_deref(), Some("json"));
    }

    #[test]
    fn test_resolve_effective_precedence() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("vulnscan.toml"), "output = \"json\"\n").unwrap();
        let root = dir.path().to_string_lossy().to_string();
        // config file wins over defaults
        let eff = resolve_effective(Some(&root), None, None);
        assert_eq!(eff.output, "json");
        assert_eq!(eff.filename, DEFAULT_FILENAME);
        // CLI wins over config file
        let eff = resolve_effective(Some(&root), Some("human"), Some("x.js"));
        assert_eq!(eff.output, "human");
        assert_eq!(eff.filename, "x.js");
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(dir.path()).is_none());
        let cat = effective_catalog(dir.path()).unwrap();
        assert_eq!(cat.len(), 5);
    }
}
