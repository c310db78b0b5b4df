use smallvec::smallvec;

use super::{Finding, Findings, Rule, RuleCategory, RuleInfo, SqlText};

/// UPDATE or DELETE anywhere in the text without any WHERE
pub struct MissingWhereInMutation;

impl Rule for MissingWhereInMutation {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "SEC001",
            name:     "UPDATE/DELETE without WHERE",
            category: RuleCategory::Security
        }
    }

    fn check(&self, sql: &SqlText<'_>) -> Findings {
        let mutates = sql.contains("UPDATE") || sql.contains("DELETE");
        if !mutates || sql.contains("WHERE") {
            return Findings::new();
        }
        let info = self.info();
        smallvec![
            Finding::warning(info.id, "UPDATE/DELETE without WHERE clause affects all rows"),
            Finding::suggestion(info.id, "Add a WHERE clause to limit the affected rows")
        ]
    }
}

/// Classic tautology injection shapes: a quote followed by ` OR ` / ` AND `.
///
/// Case-sensitive on the original text, so `' or ` does not trigger.
pub struct InjectionPattern;

impl Rule for InjectionPattern {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "SEC002",
            name:     "Possible SQL injection",
            category: RuleCategory::Security
        }
    }

    fn check(&self, sql: &SqlText<'_>) -> Findings {
        let raw = sql.raw;
        if raw.contains('\'') && (raw.contains("' OR ") || raw.contains("' AND ")) {
            let info = self.info();
            return smallvec![
                Finding::warning(info.id, "Potential SQL injection pattern detected"),
                Finding::suggestion(
                    info.id,
                    "Use parameterized queries to prevent SQL injection"
                )
            ];
        }
        Findings::new()
    }
}
