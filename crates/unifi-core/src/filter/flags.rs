// ── Convenience-flag translation ──
//
// `--wired`, `--wireless`, `--blocked`, `--ap` and `--filter` collapse into
// one predicate so every listing goes through the same engine.

use super::Predicate;
use super::ast::Expr;
use super::error::FilterError;
use super::parser;

/// Filtering switches as given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFlags {
    pub wired: bool,
    pub wireless: bool,
    pub blocked: bool,
    /// Access point MAC the client is associated with.
    pub ap: Option<String>,
    /// Free-form WHERE clause.
    pub filter: Option<String>,
}

impl ClientFlags {
    /// Reject combinations that can never match anything.
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.wired && self.wireless {
            return Err(FilterError::ConflictingFlags);
        }
        Ok(())
    }

    /// Predicate fragments in application order.
    ///
    /// The free-form filter is checked on its own before it is wrapped, so
    /// its text can never reach outside its parentheses.
    pub fn fragments(&self) -> Result<Vec<String>, FilterError> {
        Ok(self.compile()?.into_iter().map(|(text, _)| text).collect())
    }

    /// The combined WHERE clause; empty when no flag is active.
    pub fn where_clause(&self) -> Result<String, FilterError> {
        Ok(self.fragments()?.join(" AND "))
    }

    /// Compile every active flag into one predicate, `None` when no flag is
    /// active. Syntax error columns in the free-form filter count from the
    /// start of that filter.
    pub fn predicate(&self) -> Result<Option<Predicate>, FilterError> {
        let (texts, exprs): (Vec<String>, Vec<Expr>) = self.compile()?.into_iter().unzip();
        Ok(exprs
            .into_iter()
            .reduce(|left, right| Expr::And(Box::new(left), Box::new(right)))
            .map(|expr| Predicate::from_parts(expr, texts.join(" AND "))))
    }

    fn compile(&self) -> Result<Vec<(String, Expr)>, FilterError> {
        self.validate()?;

        let mut flags = Vec::new();
        if self.wired {
            flags.push("is_wired = 1".to_owned());
        } else if self.wireless {
            flags.push("is_wired = 0".to_owned());
        }
        if self.blocked {
            flags.push("blocked = 1".to_owned());
        }
        if let Some(ap) = self.ap.as_deref().filter(|ap| !ap.is_empty()) {
            flags.push(format!("ap_mac = {}", quote_literal(ap)));
        }

        let mut parts = Vec::with_capacity(flags.len() + 1);
        for text in flags {
            let expr = parser::parse(&text)?;
            parts.push((text, expr));
        }
        if let Some(filter) = self.filter.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
            let expr = parser::parse(filter)?;
            parts.push((format!("({filter})"), expr));
        }
        Ok(parts)
    }
}

/// Single-quote `value` as a predicate string literal.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn no_flags_yield_empty_clause() {
        assert_eq!(ClientFlags::default().where_clause().unwrap(), "");
    }

    #[test]
    fn single_flags() {
        let wired = ClientFlags {
            wired: true,
            ..ClientFlags::default()
        };
        assert_eq!(wired.where_clause().unwrap(), "is_wired = 1");

        let wireless = ClientFlags {
            wireless: true,
            ..ClientFlags::default()
        };
        assert_eq!(wireless.where_clause().unwrap(), "is_wired = 0");

        let blocked = ClientFlags {
            blocked: true,
            ..ClientFlags::default()
        };
        assert_eq!(blocked.where_clause().unwrap(), "blocked = 1");
    }

    #[test]
    fn fragments_join_in_fixed_order() {
        let flags = ClientFlags {
            wireless: true,
            blocked: true,
            ap: Some("aa:bb:cc:dd:ee:ff".into()),
            filter: Some("signal > -60 OR essid = 'Guest'".into()),
            ..ClientFlags::default()
        };
        assert_eq!(
            flags.where_clause().unwrap(),
            "is_wired = 0 AND blocked = 1 AND ap_mac = 'aa:bb:cc:dd:ee:ff' \
             AND (signal > -60 OR essid = 'Guest')"
        );
    }

    #[test]
    fn wired_and_wireless_conflict() {
        let flags = ClientFlags {
            wired: true,
            wireless: true,
            filter: Some("signal > -60".into()),
            ..ClientFlags::default()
        };
        assert_eq!(flags.validate(), Err(FilterError::ConflictingFlags));
        assert_eq!(flags.where_clause(), Err(FilterError::ConflictingFlags));
        assert_eq!(flags.predicate(), Err(FilterError::ConflictingFlags));
    }

    #[test]
    fn ap_value_is_escaped() {
        let flags = ClientFlags {
            ap: Some("it's".into()),
            ..ClientFlags::default()
        };
        assert_eq!(flags.where_clause().unwrap(), "ap_mac = 'it''s'");
    }

    #[test]
    fn blank_values_contribute_nothing() {
        let flags = ClientFlags {
            ap: Some(String::new()),
            filter: Some("   ".into()),
            ..ClientFlags::default()
        };
        assert_eq!(flags.where_clause().unwrap(), "");
        assert_eq!(flags.predicate().unwrap(), None);
    }

    #[test]
    fn predicate_joins_flags_with_and() {
        let flags = ClientFlags {
            wireless: true,
            filter: Some("signal > -60 OR essid = 'Guest'".into()),
            ..ClientFlags::default()
        };
        let predicate = flags.predicate().unwrap().unwrap();
        assert_eq!(
            predicate.as_str(),
            "is_wired = 0 AND (signal > -60 OR essid = 'Guest')"
        );
        assert_eq!(
            predicate.to_string(),
            "(is_wired = 0 AND (signal > -60 OR essid = 'Guest'))"
        );
    }

    #[test]
    fn filter_text_cannot_close_its_group() {
        let flags = ClientFlags {
            wireless: true,
            filter: Some("1 = 2) OR (1 = 1".into()),
            ..ClientFlags::default()
        };
        for result in [flags.where_clause().map(drop), flags.predicate().map(drop)] {
            match result {
                Err(FilterError::Syntax {
                    message, column, ..
                }) => {
                    assert_eq!(message, "unmatched ')'");
                    assert_eq!(column, 6);
                }
                other => panic!("expected syntax error, got {other:?}"),
            }
        }
    }

    #[test]
    fn filter_errors_are_reported_against_the_filter_text() {
        let flags = ClientFlags {
            blocked: true,
            filter: Some("colour = 'red'".into()),
            ..ClientFlags::default()
        };
        assert!(matches!(
            flags.predicate(),
            Err(FilterError::UnknownField { ref name, .. }) if name == "colour"
        ));
    }
}
