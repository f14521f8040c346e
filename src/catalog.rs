//! Rule catalog: the fixed, ordered set of vulnerability signatures.
//!
//! Built-in rules are declared as data and compiled once at startup. The
//! catalog is immutable after construction and safe to share read-only
//! across threads. Custom rules from `vulnscan.toml` are appended after the
//! built-ins; a bad pattern or duplicate id is a startup error, never a
//! scan-time one.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Severity level of a rule and the findings it produces.
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Stable rule identifier. Built-in rules form a closed set; rules loaded
/// from configuration carry their id as `Custom`.
pub enum RuleId {
    Eval,
    Exec,
    SqlConcat,
    JwtHardcode,
    InsecureHttp,
    Custom(String),
}

impl RuleId {
    pub fn as_str(&self) -> &str {
        match self {
            RuleId::Eval => "eval",
            RuleId::Exec => "exec",
            RuleId::SqlConcat => "sql-concat",
            RuleId::JwtHardcode => "jwt-hardcode",
            RuleId::InsecureHttp => "insecure-http",
            RuleId::Custom(id) => id,
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Serialize for RuleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One signature: compiled pattern plus the severity and message copied into
/// every finding it triggers.
pub struct Rule {
    pub id: RuleId,
    pub pattern: Regex,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
/// A `[[rules]]` entry from `vulnscan.toml|yaml`.
pub struct CustomRule {
    pub id: String,
    pub pattern: String,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
/// Catalog construction failures. These are authoring bugs surfaced at
/// startup; a constructed catalog cannot fail afterwards.
pub enum CatalogError {
    #[error("rule '{id}' has an invalid pattern: {source}")]
    InvalidPattern {
        id: String,
        source: regex::Error,
    },
    #[error("duplicate rule id '{0}'")]
    DuplicateId(String),
}

struct BuiltinRule {
    id: RuleId,
    pattern: &'static str,
    severity: Severity,
    message: &'static str,
}

/// Built-in signatures in catalog order. Order is observable: it breaks ties
/// between rules matching at the same offset and fixes finding order.
const BUILTIN: &[BuiltinRule] = &[
    BuiltinRule {
        id: RuleId::Eval,
        pattern: r"eval\s*\(",
        severity: Severity::High,
        message: "Use of eval can lead to RCE.",
    },
    BuiltinRule {
        id: RuleId::Exec,
        pattern: r"child_process|execSync\s*\(|exec\s*\(|spawn\s*\(",
        severity: Severity::High,
        message: "Command execution used.",
    },
    BuiltinRule {
        id: RuleId::SqlConcat,
        pattern: r"(select|insert|update|delete)[^;]*\+",
        severity: Severity::Medium,
        message: "Possible SQL string concatenation.",
    },
    BuiltinRule {
        id: RuleId::JwtHardcode,
        pattern: r#"(jwt|secret|api[_-]?key)\s*[:=]\s*['"][^'"]{12,}['"]"#,
        severity: Severity::Medium,
        message: "Hardcoded secret-like value.",
    },
    BuiltinRule {
        id: RuleId::InsecureHttp,
        pattern: r"http://",
        severity: Severity::Low,
        message: "Insecure HTTP URL detected.",
    },
];

/// Ordered, read-only rule table. Constructed once; never mutated.
pub struct Catalog {
    rules: Vec<Rule>,
}

impl Catalog {
    /// Build the catalog from the built-in table only.
    pub fn builtin() -> Self {
        let rules = BUILTIN
            .iter()
            .map(|b| Rule {
                id: b.id.clone(),
                pattern: compile(b.pattern).expect("built-in pattern must compile"),
                severity: b.severity,
                message: b.message.to_string(),
            })
            .collect();
        Catalog { rules }
    }

    /// Build the catalog with `extra` rules appended after the built-ins,
    /// in the order given. Ids must stay unique across the whole table.
    pub fn with_custom(extra: &[CustomRule]) -> Result<Self, CatalogError> {
        let mut cat = Self::builtin();
        for c in extra {
            if cat.rules.iter().any(|r| r.id.as_str() == c.id) {
                return Err(CatalogError::DuplicateId(c.id.clone()));
            }
            let pattern = compile(&c.pattern).map_err(|e| CatalogError::InvalidPattern {
                id: c.id.clone(),
                source: e,
            })?;
            cat.rules.push(Rule {
                id: RuleId::Custom(c.id.clone()),
                pattern,
                severity: c.severity,
                message: c.message.clone(),
            });
        }
        Ok(cat)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// All rule patterns match case-insensitively; none anchor to line
/// boundaries, so matches may sit inside larger tokens.
fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_unique_and_ordered() {
        let cat = Catalog::builtin();
        let ids: Vec<&str> = cat.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["eval", "exec", "sql-concat", "jwt-hardcode", "insecure-http"]
        );
        let mut dedup = ids.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), ids.len());
    }

    #[test]
    fn test_patterns_match_case_insensitively() {
        let cat = Catalog::builtin();
        let eval = cat.iter().find(|r| r.id == RuleId::Eval).unwrap();
        assert!(eval.pattern.is_match("EVAL(x)"));
        assert!(eval.pattern.is_match("eval (x)"));
        assert!(!eval.pattern.is_match("evaluate x"));
    }

    #[test]
    fn test_exec_pattern_examples() {
        let cat = Catalog::builtin();
        let exec = cat.iter().find(|r| r.id == RuleId::Exec).unwrap();
        assert!(exec.pattern.is_match("require('child_process')"));
        assert!(exec.pattern.is_match("exec(cmd)"));
        assert!(exec.pattern.is_match("spawn('ls')"));
        assert!(!exec.pattern.is_match("execFile(cmd)"));
    }

    // Pins the sql-concat heuristic by example: a SQL keyword, then a '+'
    // before the next statement terminator.
    #[test]
    fn test_sql_concat_pattern_examples() {
        let cat = Catalog::builtin();
        let sql = cat.iter().find(|r| r.id == RuleId::SqlConcat).unwrap();
        assert!(sql
            .pattern
            .is_match(r#""SELECT * FROM users WHERE name = '" + name"#));
        assert!(!sql.pattern.is_match("select * from users;"));
        // terminator before the '+' blocks the match
        assert!(!sql.pattern.is_match("select x; y + z"));
    }

    #[test]
    fn test_jwt_hardcode_requires_long_literal() {
        let cat = Catalog::builtin();
        let jwt = cat.iter().find(|r| r.id == RuleId::JwtHardcode).unwrap();
        assert!(jwt.pattern.is_match("api_key: 'abcdefghijkl'"));
        assert!(jwt.pattern.is_match(r#"SECRET = "0123456789abcdef""#));
        assert!(!jwt.pattern.is_match("api_key: 'short'"));
        assert!(!jwt.pattern.is_match("username = 'abcdefghijkl'"));
    }

    #[test]
    fn test_with_custom_appends_after_builtins() {
        let extra = vec![CustomRule {
            id: "todo-marker".into(),
            pattern: r"TODO|FIXME".into(),
            severity: Severity::Low,
            message: "Leftover task marker.".into(),
        }];
        let cat = Catalog::with_custom(&extra).unwrap();
        assert_eq!(cat.len(), BUILTIN.len() + 1);
        assert_eq!(cat.iter().last().unwrap().id.as_str(), "todo-marker");
    }

    #[test]
    fn test_with_custom_rejects_duplicate_id() {
        let extra = vec![CustomRule {
            id: "eval".into(),
            pattern: r"x".into(),
            severity: Severity::Low,
            message: "dup".into(),
        }];
        assert!(matches!(
            Catalog::with_custom(&extra),
            Err(CatalogError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_with_custom_rejects_bad_pattern() {
        let extra = vec![CustomRule {
            id: "broken".into(),
            pattern: r"(".into(),
            severity: Severity::Low,
            message: "broken".into(),
        }];
        assert!(matches!(
            Catalog::with_custom(&extra),
            Err(CatalogError::InvalidPattern { .. })
        ));
    }
}
