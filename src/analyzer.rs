//! Heuristic SQL analyzer.
//!
//! This is deliberately not a parser: every check is a predicate over the raw
//! text (or its uppercased copy) that yields zero or more [`Finding`]s. Rules
//! run in a fixed order and their findings are partitioned by severity into a
//! [`ValidationResult`], so the order of messages inside each list follows
//! the rule order.
//!
//! # Rules
//!
//! | ID | Category | Reports |
//! |----|----------|---------|
//! | SYN001 | Syntax | unmatched `(` / `)` (error) |
//! | SYN002 | Syntax | odd number of `'` or `"` (error) |
//! | STYLE001 | Style | missing trailing `;` |
//! | STYLE002 | Style | `SELECT` without `FROM`/`DUAL` |
//! | STYLE003 | Style | `SELECT *` |
//! | SEC001 | Security | `UPDATE`/`DELETE` without `WHERE` |
//! | SEC002 | Security | `' OR ` / `' AND ` injection shape |
//! | PERF001 | Performance | `LIKE` literal without wildcard |
//! | PERF002 | Performance | `ORDER BY` without `LIMIT`/`TOP` |
//! | PERF003 | Performance | index hint for `WHERE` columns |
//! | PERF004 | Performance | function call after `WHERE` |
//! | PERF005 | Performance | `SELECT` without `LIMIT`/`TOP` |
//! | PERF006 | Performance | `IN (SELECT` instead of `EXISTS` |
//!
//! # Example
//!
//! ```
//! use sql_snippet_vault::analyzer::{Complexity, QueryType, validate};
//!
//! let result = validate("SELECT * FROM users");
//!
//! assert!(result.is_valid);
//! assert_eq!(result.query_type, QueryType::Select);
//! assert_eq!(result.estimated_complexity, Complexity::Low);
//! assert!(result.warnings.contains(&"Using SELECT * can impact performance".to_string()));
//! ```

mod complexity;
mod format;
mod insights;
mod performance;
mod security;
mod style;
mod syntax;
mod types;

use std::{
    collections::HashSet,
    hash::{DefaultHasher, Hash, Hasher},
    sync::LazyLock
};

pub use complexity::{ComplexityScore, estimate_complexity};
pub use format::format_sql;
pub use insights::{QueryInsights, get_query_insights};
use rayon::prelude::*;
pub use types::{
    Complexity, Finding, Findings, QueryType, RuleCategory, RuleInfo, Severity, ValidationResult
};

use crate::{
    cache::{cache_result, get_cached},
    config::RulesConfig
};

/// Analyzer with every rule enabled
static DEFAULT_ANALYZER: LazyLock<SqlAnalyzer> = LazyLock::new(SqlAnalyzer::new);

/// Trimmed SQL text with its uppercased copy, shared by all rules
#[derive(Debug, Clone)]
pub struct SqlText<'a> {
    pub raw:   &'a str,
    pub upper: String
}

impl<'a> SqlText<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            upper: raw.to_uppercase()
        }
    }

    /// Case-insensitive substring test (`needle` must be uppercase)
    pub fn contains(&self, needle: &str) -> bool {
        self.upper.contains(needle)
    }

    /// Whether a LIMIT or TOP appears anywhere
    pub fn is_bounded(&self) -> bool {
        self.contains("LIMIT") || self.contains("TOP")
    }
}

/// Trait for implementing analyzer rules.
///
/// Rules are stateless predicates over the text. They must be `Send + Sync`
/// so that batches can be analyzed in parallel.
///
/// # Example
///
/// ```
/// use smallvec::smallvec;
/// use sql_snippet_vault::analyzer::{
///     Finding, Findings, Rule, RuleCategory, RuleInfo, SqlText
/// };
///
/// struct TruncateDetected;
///
/// impl Rule for TruncateDetected {
///     fn info(&self) -> RuleInfo {
///         RuleInfo {
///             id:       "CUSTOM001",
///             name:     "TRUNCATE detected",
///             category: RuleCategory::Security
///         }
///     }
///
///     fn check(&self, sql: &SqlText<'_>) -> Findings {
///         if sql.contains("TRUNCATE") {
///             smallvec![Finding::warning("CUSTOM001", "TRUNCATE removes every row")]
///         } else {
///             Findings::new()
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns metadata about this rule.
    fn info(&self) -> RuleInfo;

    /// Examines the text and returns findings, empty if the rule passes.
    fn check(&self, sql: &SqlText<'_>) -> Findings;
}

/// Ordered rule list applied to SQL snippets.
pub struct SqlAnalyzer {
    rules:   Vec<Box<dyn Rule>>,
    profile: u64
}

impl Default for SqlAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlAnalyzer {
    /// Create an analyzer with all built-in rules
    pub fn new() -> Self {
        Self::with_config(RulesConfig::default())
    }

    /// Create an analyzer without the rules disabled in `config`
    pub fn with_config(config: RulesConfig) -> Self {
        let all_rules: Vec<Box<dyn Rule>> = vec![
            Box::new(syntax::BalancedParentheses),
            Box::new(syntax::BalancedQuotes),
            Box::new(style::MissingSemicolon),
            Box::new(style::SelectWithoutFrom),
            Box::new(style::SelectStar),
            Box::new(security::MissingWhereInMutation),
            Box::new(security::InjectionPattern),
            Box::new(performance::LikeWithoutWildcard),
            Box::new(performance::OrderByWithoutLimit),
            Box::new(performance::WhereColumnIndex),
            Box::new(performance::FunctionInWhere),
            Box::new(performance::SelectWithoutLimit),
            Box::new(performance::InWithSubquery),
        ];
        let disabled: HashSet<String> = config
            .disabled
            .iter()
            .map(|id| id.to_ascii_uppercase())
            .collect();
        let rules: Vec<Box<dyn Rule>> = all_rules
            .into_iter()
            .filter(|r| !disabled.contains(r.info().id))
            .collect();
        let mut hasher = DefaultHasher::new();
        for rule in &rules {
            rule.info().id.hash(&mut hasher);
        }
        Self {
            rules,
            profile: hasher.finish()
        }
    }

    /// Metadata of the enabled rules, in execution order
    pub fn rules(&self) -> Vec<RuleInfo> {
        self.rules.iter().map(|r| r.info()).collect()
    }

    /// Raw findings for already trimmed, non-empty text
    pub fn check(&self, sql: &SqlText<'_>) -> Vec<Finding> {
        self.rules.iter().flat_map(|rule| rule.check(sql)).collect()
    }

    /// Validate one snippet.
    ///
    /// Empty or whitespace-only input yields the single error
    /// `"SQL query cannot be empty"` and skips every rule.
    pub fn validate(&self, sql: &str) -> ValidationResult {
        let trimmed = sql.trim();
        if trimmed.is_empty() {
            return ValidationResult::empty_input();
        }
        let text = SqlText::new(trimmed);
        ValidationResult::from_findings(
            self.check(&text),
            QueryType::classify(trimmed),
            estimate_complexity(trimmed)
        )
    }

    /// Validate many snippets in parallel, results in input order.
    ///
    /// Results are memoized per rule set, so repeated batches over the same
    /// collection only analyze new or changed snippets.
    pub fn validate_batch<S: AsRef<str> + Sync>(&self, snippets: &[S]) -> Vec<ValidationResult> {
        snippets
            .par_iter()
            .map(|sql| {
                let sql = sql.as_ref();
                if let Some(cached) = get_cached(self.profile, sql) {
                    return cached;
                }
                let result = self.validate(sql);
                cache_result(self.profile, sql, result.clone());
                result
            })
            .collect()
    }
}

/// Validate with every built-in rule enabled
pub fn validate(sql: &str) -> ValidationResult {
    DEFAULT_ANALYZER.validate(sql)
}
