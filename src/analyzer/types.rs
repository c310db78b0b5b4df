//! Type definitions for the heuristic SQL analyzer.
//!
//! - [`Severity`] - how a finding is reported (suggestion, warning, error)
//! - [`RuleCategory`] - rule grouping (syntax, style, performance, security)
//! - [`Finding`] - one message produced by one rule
//! - [`ValidationResult`] - the report handed back to callers

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Findings produced by a single rule (rarely more than two)
pub type Findings = SmallVec<[Finding; 2]>;

/// Severity level of a finding.
///
/// Ordered from lowest to highest. Only errors affect validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    /// Advisory hint
    Suggestion,
    /// Non-blocking style or safety concern
    Warning,
    /// Blocking structural problem
    Error
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Suggestion => write!(f, "HINT"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR")
        }
    }
}

/// Category of a rule for grouping and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RuleCategory {
    /// Character-level structure (quotes, parentheses)
    Syntax,
    /// Conventions and statement shape
    Style,
    /// Potentially expensive constructs
    Performance,
    /// Dangerous or injectable statements
    Security
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax => write!(f, "Syntax"),
            Self::Style => write!(f, "Style"),
            Self::Performance => write!(f, "Performance"),
            Self::Security => write!(f, "Security")
        }
    }
}

/// Metadata about a rule for identification and configuration.
#[derive(Debug, Clone)]
pub struct RuleInfo {
    /// Unique rule identifier (e.g., "SYN001")
    pub id:       &'static str,
    /// Human-readable rule name
    pub name:     &'static str,
    /// Rule category
    pub category: RuleCategory
}

/// A single message emitted by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub rule_id:  &'static str,
    pub severity: Severity,
    pub message:  &'static str
}

impl Finding {
    pub fn error(rule_id: &'static str, message: &'static str) -> Self {
        Self {
            rule_id,
            severity: Severity::Error,
            message
        }
    }

    pub fn warning(rule_id: &'static str, message: &'static str) -> Self {
        Self {
            rule_id,
            severity: Severity::Warning,
            message
        }
    }

    pub fn suggestion(rule_id: &'static str, message: &'static str) -> Self {
        Self {
            rule_id,
            severity: Severity::Suggestion,
            message
        }
    }
}

/// Statement kind, decided by the leading keyword only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QueryType {
    Select,
    Insert,
    Update,
    Delete,
    Create,
    Drop,
    Alter,
    Unknown
}

impl QueryType {
    /// Classify by case-insensitive prefix of the trimmed text
    pub fn classify(sql: &str) -> Self {
        let upper = sql.trim().to_uppercase();
        [
            ("SELECT", Self::Select),
            ("INSERT", Self::Insert),
            ("UPDATE", Self::Update),
            ("DELETE", Self::Delete),
            ("CREATE", Self::Create),
            ("DROP", Self::Drop),
            ("ALTER", Self::Alter)
        ]
        .into_iter()
        .find(|(prefix, _)| upper.starts_with(prefix))
        .map_or(Self::Unknown, |(_, kind)| kind)
    }
}

impl std::fmt::Display for QueryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Select => write!(f, "SELECT"),
            Self::Insert => write!(f, "INSERT"),
            Self::Update => write!(f, "UPDATE"),
            Self::Delete => write!(f, "DELETE"),
            Self::Create => write!(f, "CREATE"),
            Self::Drop => write!(f, "DROP"),
            Self::Alter => write!(f, "ALTER"),
            Self::Unknown => write!(f, "UNKNOWN")
        }
    }
}

/// Ordinal complexity estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Complexity {
    Low,
    Medium,
    High
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH")
        }
    }
}

/// Validation report for one SQL snippet.
///
/// `is_valid` is true iff `errors` is empty; warnings and suggestions never
/// affect validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid:             bool,
    pub errors:               Vec<String>,
    pub warnings:             Vec<String>,
    pub suggestions:          Vec<String>,
    pub query_type:           QueryType,
    pub estimated_complexity: Complexity
}

impl ValidationResult {
    /// Report for empty or whitespace-only input
    pub fn empty_input() -> Self {
        Self {
            is_valid:             false,
            errors:               vec!["SQL query cannot be empty".to_string()],
            warnings:             Vec::new(),
            suggestions:          Vec::new(),
            query_type:           QueryType::Unknown,
            estimated_complexity: Complexity::Low
        }
    }

    pub(crate) fn from_findings(
        findings: impl IntoIterator<Item = Finding>,
        query_type: QueryType,
        estimated_complexity: Complexity
    ) -> Self {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut suggestions = Vec::new();
        for finding in findings {
            let target = match finding.severity {
                Severity::Error => &mut errors,
                Severity::Warning => &mut warnings,
                Severity::Suggestion => &mut suggestions
            };
            target.push(finding.message.to_string());
        }
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            suggestions,
            query_type,
            estimated_complexity
        }
    }

    /// Highest severity present in the report
    pub fn worst_severity(&self) -> Option<Severity> {
        if !self.errors.is_empty() {
            Some(Severity::Error)
        } else if !self.warnings.is_empty() {
            Some(Severity::Warning)
        } else if !self.suggestions.is_empty() {
            Some(Severity::Suggestion)
        } else {
            None
        }
    }
}
