use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Clause rewrites, applied in order: (pattern, replacement)
static CLAUSE_REWRITES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?i)\bSELECT\b", "SELECT"),
        (r"(?i)\bFROM\b", "\nFROM"),
        (r"(?i)\bWHERE\b", "\nWHERE"),
        (r"(?i)\bJOIN\b", "\nJOIN"),
        (r"(?i)\bINNER JOIN\b", "\nINNER JOIN"),
        (r"(?i)\bLEFT JOIN\b", "\nLEFT JOIN"),
        (r"(?i)\bRIGHT JOIN\b", "\nRIGHT JOIN"),
        (r"(?i)\bGROUP BY\b", "\nGROUP BY"),
        (r"(?i)\bHAVING\b", "\nHAVING"),
        (r"(?i)\bORDER BY\b", "\nORDER BY"),
        (r"(?i)\bLIMIT\b", "\nLIMIT")
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).expect("valid regex"), replacement))
    .collect()
});

/// Cosmetic re-indentation of a SQL snippet.
///
/// Collapses whitespace, breaks the line after every comma and before the
/// major clause keywords. This is a textual rewrite: keywords inside string
/// literals or identifiers are moved too. Since `JOIN` is broken first, the
/// qualified `INNER`/`LEFT`/`RIGHT JOIN` forms end up as `INNER \nJOIN`.
///
/// ```
/// use sql_snippet_vault::analyzer::format_sql;
///
/// let formatted = format_sql("select id, name from users where id = 1 limit 5");
/// assert_eq!(formatted, "SELECT id,\n  name \nFROM users \nWHERE id = 1 \nLIMIT 5");
/// ```
pub fn format_sql(sql: &str) -> String {
    let collapsed = WHITESPACE_REGEX.replace_all(sql, " ");
    let mut formatted = collapsed.replace(',', ",\n  ");
    for (pattern, replacement) in CLAUSE_REWRITES.iter() {
        formatted = pattern.replace_all(&formatted, *replacement).into_owned();
    }
    formatted.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_inside_identifier_is_left_alone() {
        assert_eq!(format_sql("SELECT date_from FROM t"), "SELECT date_from \nFROM t");
    }

    #[test]
    fn test_qualified_join_keeps_qualifier_on_previous_line() {
        assert_eq!(
            format_sql("SELECT a FROM t INNER JOIN u ON t.id = u.id"),
            "SELECT a \nFROM t INNER \nJOIN u ON t.id = u.id"
        );
    }
}
