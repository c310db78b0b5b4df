use smallvec::smallvec;

use super::{Finding, Findings, Rule, RuleCategory, RuleInfo, SqlText};

/// Statement does not end with a semicolon
pub struct MissingSemicolon;

impl Rule for MissingSemicolon {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "STYLE001",
            name:     "Missing trailing semicolon",
            category: RuleCategory::Style
        }
    }

    fn check(&self, sql: &SqlText<'_>) -> Findings {
        if sql.raw.trim_end().ends_with(';') {
            return Findings::new();
        }
        smallvec![Finding::warning(
            self.info().id,
            "Query should end with a semicolon (;)"
        )]
    }
}

/// SELECT without FROM, unless selecting from DUAL
pub struct SelectWithoutFrom;

impl Rule for SelectWithoutFrom {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "STYLE002",
            name:     "SELECT without FROM",
            category: RuleCategory::Style
        }
    }

    fn check(&self, sql: &SqlText<'_>) -> Findings {
        if sql.contains("SELECT") && !sql.contains("FROM") && !sql.contains("DUAL") {
            return smallvec![Finding::warning(
                self.info().id,
                "SELECT statement without FROM clause - consider adding FROM clause or using SELECT 1"
            )];
        }
        Findings::new()
    }
}

/// SELECT * instead of an explicit column list
pub struct SelectStar;

impl Rule for SelectStar {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "STYLE003",
            name:     "SELECT * usage",
            category: RuleCategory::Style
        }
    }

    fn check(&self, sql: &SqlText<'_>) -> Findings {
        if !sql.contains("SELECT *") {
            return Findings::new();
        }
        let info = self.info();
        smallvec![
            Finding::warning(info.id, "Using SELECT * can impact performance"),
            Finding::suggestion(info.id, "Consider specifying only the columns you need")
        ]
    }
}
