use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static TABLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"FROM\s+\w+|JOIN\s+\w+").expect("valid regex"));

static CONDITION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"WHERE|AND|OR").expect("valid regex"));

static AGGREGATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)COUNT|SUM|AVG|MIN|MAX|GROUP BY").expect("valid regex"));

static SELECT_FROM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)SELECT.*FROM").expect("valid regex"));

static SELECT_LIST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)SELECT\s+(.*?)(?:\bFROM\b|$)").expect("valid regex"));

/// Rough shape counts of a SQL snippet.
///
/// Every count is a substring heuristic: `conditionCount` also counts the
/// `OR` in `ORDER`, `hasSubquery` is true for any parenthesis in a
/// SELECT ... FROM statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryInsights {
    pub table_count:     usize,
    pub column_count:    usize,
    pub join_count:      usize,
    pub condition_count: usize,
    pub has_aggregation: bool,
    pub has_subquery:    bool
}

/// Derive [`QueryInsights`] from raw SQL text
pub fn get_query_insights(sql: &str) -> QueryInsights {
    let upper = sql.to_uppercase();
    QueryInsights {
        table_count:     TABLE_REGEX.find_iter(&upper).count(),
        column_count:    column_count(sql),
        join_count:      upper.matches("JOIN").count(),
        condition_count: CONDITION_REGEX.find_iter(&upper).count(),
        has_aggregation: AGGREGATION_REGEX.is_match(sql),
        has_subquery:    sql.contains('(') && SELECT_FROM_REGEX.is_match(sql)
    }
}

/// Comma-separated items between the first SELECT and the next FROM
fn column_count(sql: &str) -> usize {
    SELECT_LIST_REGEX
        .captures(sql)
        .and_then(|caps| caps.get(1))
        .map(|list| list.as_str().trim())
        .filter(|list| !list.is_empty())
        .map_or(0, |list| list.split(',').count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_count_without_from() {
        assert_eq!(get_query_insights("SELECT 1, 2").column_count, 2);
    }

    #[test]
    fn test_column_count_without_select() {
        assert_eq!(get_query_insights("DELETE FROM t").column_count, 0);
    }

    #[test]
    fn test_order_counts_as_condition() {
        let insights = get_query_insights("SELECT a FROM t ORDER BY a");
        assert_eq!(insights.condition_count, 1);
    }
}
