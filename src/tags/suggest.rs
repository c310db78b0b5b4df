use indexmap::IndexSet;

/// Keyword groups mapped to the tag they suggest, checked in order
const SUGGESTION_RULES: &[(&[&str], &str)] = &[
    (&["INSERT", "UPDATE", "DELETE"], "crud"),
    (&["CREATE", "ALTER", "DROP"], "schema"),
    (&["INDEX", "EXPLAIN"], "performance"),
    (&["BACKUP", "RESTORE"], "backup"),
    (&["GRANT", "REVOKE"], "security"),
    (&["JOIN"], "complex"),
    (&["UNION", "INTERSECT"], "advanced"),
    (&["PROCEDURE", "FUNCTION"], "stored-procedure"),
    (&["TRIGGER"], "trigger")
];

/// Suggest tag names for a SQL snippet from the keywords it contains.
///
/// Matching is a case-insensitive substring test. Results keep first-seen
/// order without duplicates.
///
/// ```
/// use sql_snippet_vault::tags::suggest_tags;
///
/// let tags = suggest_tags("SELECT COUNT(*) FROM a JOIN b ON a.id = b.a_id");
/// assert_eq!(tags, vec!["analytics", "complex"]);
/// ```
pub fn suggest_tags(sql: &str) -> Vec<&'static str> {
    let upper = sql.to_uppercase();
    let mut suggestions = IndexSet::new();
    if upper.contains("SELECT") && upper.contains("COUNT") {
        suggestions.insert("analytics");
    }
    for (keywords, tag) in SUGGESTION_RULES {
        if keywords.iter().any(|k| upper.contains(k)) {
            suggestions.insert(*tag);
        }
    }
    suggestions.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_suggestions_for_plain_select() {
        assert!(suggest_tags("SELECT id FROM users").is_empty());
    }

    #[test]
    fn test_ddl_suggests_schema() {
        assert_eq!(suggest_tags("create table t (id int)"), vec!["schema"]);
    }

    #[test]
    fn test_update_with_create_in_text() {
        let tags = suggest_tags("UPDATE jobs SET created = 1");
        assert_eq!(tags, vec!["crud", "schema"]);
    }
}
