use smallvec::smallvec;

use super::{Finding, Findings, Rule, RuleCategory, RuleInfo, SqlText};

/// Parentheses must never close before they open and must all be closed
pub struct BalancedParentheses;

impl Rule for BalancedParentheses {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "SYN001",
            name:     "Unbalanced parentheses",
            category: RuleCategory::Syntax
        }
    }

    fn check(&self, sql: &SqlText<'_>) -> Findings {
        let info = self.info();
        let mut depth: i64 = 0;
        for c in sql.raw.chars() {
            match c {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => continue
            }
            if depth < 0 {
                return smallvec![Finding::error(info.id, "Unmatched closing parenthesis")];
            }
        }
        if depth > 0 {
            return smallvec![Finding::error(info.id, "Unmatched opening parenthesis")];
        }
        Findings::new()
    }
}

/// Odd number of quote characters.
///
/// Plain character count: escaped quotes and quotes inside comments are
/// counted like any other.
pub struct BalancedQuotes;

impl Rule for BalancedQuotes {
    fn info(&self) -> RuleInfo {
        RuleInfo {
            id:       "SYN002",
            name:     "Unbalanced quotes",
            category: RuleCategory::Syntax
        }
    }

    fn check(&self, sql: &SqlText<'_>) -> Findings {
        let info = self.info();
        let mut findings = Findings::new();
        if sql.raw.matches('\'').count() % 2 != 0 {
            findings.push(Finding::error(info.id, "Unmatched single quote"));
        }
        if sql.raw.matches('"').count() % 2 != 0 {
            findings.push(Finding::error(info.id, "Unmatched double quote"));
        }
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closing_before_opening() {
        let text = SqlText::new(")(");
        let findings = BalancedParentheses.check(&text);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "Unmatched closing parenthesis");
    }

    #[test]
    fn test_escaped_quote_is_still_counted() {
        let text = SqlText::new("SELECT 'it''s'");
        assert_eq!(BalancedQuotes.check(&text).len(), 1);
    }
}
