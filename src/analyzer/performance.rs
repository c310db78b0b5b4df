use std::sync::LazyLock;

use regex::Regex;
use smallvec::smallvec;

use super::{Finding, Findings, Rule, RuleCategory, RuleInfo, SqlText};

/// LIKE followed by a quoted literal with no `%` or `_`
static LIKE_LITERAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)LIKE\s+['"][^%_]*['"]"#).expect("valid regex"));

/// Identifier immediately followed by `(` somewhere after WHERE, same line
static FUNCTION_AFTER_WHERE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"WHERE.*\w+\s*\(").expect("valid regex"));

/// LIKE used as equality
pub struct LikeWithoutWildcard;

impl Rule for LikeWithoutWildcard {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "PERF001",
            name:     "LIKE without wildcard",
            category: RuleCategory::Performance
        }
    }

    fn check(&self, sql: &SqlText<'_>) -> Findings {
        if LIKE_LITERAL_REGEX.is_match(sql.raw) {
            return smallvec![Finding::warning(
                self.info().id,
                "LIKE clause without wildcards (% or _) - consider using = instead"
            )];
        }
        Findings::new()
    }
}

/// ORDER BY sorts the full result when nothing bounds it
pub struct OrderByWithoutLimit;

impl Rule for OrderByWithoutLimit {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "PERF002",
            name:     "ORDER BY without LIMIT",
            category: RuleCategory::Performance
        }
    }

    fn check(&self, sql: &SqlText<'_>) -> Findings {
        if !sql.contains("ORDER BY") || sql.is_bounded() {
            return Findings::new();
        }
        let info = self.info();
        smallvec![
            Finding::warning(info.id, "ORDER BY without LIMIT sorts the entire result set"),
            Finding::suggestion(
                info.id,
                "Consider adding LIMIT clause when using ORDER BY for better performance"
            )
        ]
    }
}

/// Any WHERE clause: remind to index the filtered columns
pub struct WhereColumnIndex;

impl Rule for WhereColumnIndex {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "PERF003",
            name:     "Index WHERE columns",
            category: RuleCategory::Performance
        }
    }

    fn check(&self, sql: &SqlText<'_>) -> Findings {
        if sql.contains("WHERE") {
            return smallvec![Finding::suggestion(
                self.info().id,
                "Ensure columns in WHERE clause are indexed for better performance"
            )];
        }
        Findings::new()
    }
}

/// Function call after WHERE defeats index usage
pub struct FunctionInWhere;

impl Rule for FunctionInWhere {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "PERF004",
            name:     "Function in WHERE",
            category: RuleCategory::Performance
        }
    }

    fn check(&self, sql: &SqlText<'_>) -> Findings {
        if FUNCTION_AFTER_WHERE_REGEX.is_match(&sql.upper) {
            return smallvec![Finding::suggestion(
                self.info().id,
                "Avoid using functions in WHERE clause - consider computed columns or different approach"
            )];
        }
        Findings::new()
    }
}

/// SELECT with no LIMIT/TOP anywhere
pub struct SelectWithoutLimit;

impl Rule for SelectWithoutLimit {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "PERF005",
            name:     "SELECT without LIMIT",
            category: RuleCategory::Performance
        }
    }

    fn check(&self, sql: &SqlText<'_>) -> Findings {
        if sql.contains("SELECT") && !sql.is_bounded() {
            return smallvec![Finding::suggestion(
                self.info().id,
                "Consider adding LIMIT clause to prevent large result sets"
            )];
        }
        Findings::new()
    }
}

/// `IN (SELECT ...)` where EXISTS usually plans better
pub struct InWithSubquery;

impl Rule for InWithSubquery {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "PERF006",
            name:     "IN with subquery",
            category: RuleCategory::Performance
        }
    }

    fn check(&self, sql: &SqlText<'_>) -> Findings {
        if sql.contains("IN (SELECT") {
            return smallvec![Finding::suggestion(
                self.info().id,
                "Consider using EXISTS instead of IN with subqueries for better performance"
            )];
        }
        Findings::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_with_wildcard_is_quiet() {
        let text = SqlText::new("SELECT id FROM t WHERE name LIKE 'ab%'");
        assert!(LikeWithoutWildcard.check(&text).is_empty());
    }

    #[test]
    fn test_like_is_case_insensitive() {
        let text = SqlText::new("select id from t where name like 'abc'");
        assert_eq!(LikeWithoutWildcard.check(&text).len(), 1);
    }

    #[test]
    fn test_function_must_be_on_where_line() {
        let text = SqlText::new("SELECT id FROM t WHERE\nLOWER(name) = 'x'");
        assert!(FunctionInWhere.check(&text).is_empty());
    }

    #[test]
    fn test_top_bounds_order_by() {
        let text = SqlText::new("SELECT TOP 5 id FROM t ORDER BY id");
        assert!(OrderByWithoutLimit.check(&text).is_empty());
    }
}
