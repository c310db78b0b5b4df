use pretty_assertions::assert_eq;
use sql_snippet_vault::analyzer::{QueryInsights, format_sql, get_query_insights};

#[test]
fn test_format_splits_clauses() {
    let formatted = format_sql("select id,   name\n from users where active = 1 order by name limit 5");
    assert_eq!(
        formatted,
        "SELECT id,\n   name \nFROM users \nWHERE active = 1 \nORDER BY name \nLIMIT 5"
    );
}

#[test]
fn test_format_uppercases_clause_keywords() {
    assert_eq!(
        format_sql("select a from t group by a having count(*) > 1"),
        "SELECT a \nFROM t \nGROUP BY a \nHAVING count(*) > 1"
    );
}

#[test]
fn test_format_trims_and_collapses_whitespace() {
    assert_eq!(format_sql("  \n\tSELECT   1  \n"), "SELECT 1");
}

#[test]
fn test_format_left_join() {
    assert_eq!(
        format_sql("SELECT a FROM t LEFT JOIN u ON t.id = u.id"),
        "SELECT a \nFROM t LEFT \nJOIN u ON t.id = u.id"
    );
}

#[test]
fn test_insights_simple_select() {
    let insights = get_query_insights("SELECT id, name, email FROM users WHERE active = 1");
    assert_eq!(
        insights,
        QueryInsights {
            table_count:     1,
            column_count:    3,
            join_count:      0,
            condition_count: 1,
            has_aggregation: false,
            has_subquery:    false
        }
    );
}

#[test]
fn test_insights_join_and_aggregation() {
    let insights =
        get_query_insights("SELECT u.id, COUNT(p.id) FROM users u JOIN posts p ON p.uid = u.id GROUP BY u.id");
    assert_eq!(insights.table_count, 2);
    assert_eq!(insights.column_count, 2);
    assert_eq!(insights.join_count, 1);
    assert!(insights.has_aggregation);
    assert!(insights.has_subquery);
}

#[test]
fn test_insights_lowercase_keywords() {
    let insights = get_query_insights("select a from t join u on t.id = u.id");
    assert_eq!(insights.table_count, 2);
    assert_eq!(insights.join_count, 1);
    assert_eq!(insights.column_count, 1);
}

#[test]
fn test_insights_without_select() {
    let insights = get_query_insights("UPDATE t SET a = 1 WHERE b = 2 AND c = 3");
    assert_eq!(insights.column_count, 0);
    assert_eq!(insights.table_count, 0);
    assert_eq!(insights.condition_count, 2);
    assert!(!insights.has_subquery);
}
