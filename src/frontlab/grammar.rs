//! The grammars the engine knows how to analyze
//!
//! The caller always picks the grammar; nothing in the engine inspects the source
//! to guess which language it is looking at.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::FrontlabError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Grammar {
    /// Bounded `for` statement, validated with a trace.
    Statement,
    /// Assignments and arithmetic expressions, lowered to quadruples.
    Expression,
    /// Record type declaration, validated with synthetic token insertion.
    Record,
}

impl Grammar {
    pub const ALL: [Grammar; 3] = [Grammar::Statement, Grammar::Expression, Grammar::Record];

    pub fn name(&self) -> &'static str {
        match self {
            Grammar::Statement => "statement",
            Grammar::Expression => "expression",
            Grammar::Record => "record",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Grammar::Statement => {
                "for <id> := <operand> to <operand> do <id> = <operand> (+|- <operand>)* ;"
            }
            Grammar::Expression => "<id> = <expr> | <expr>, lowered to three-address quadruples",
            Grammar::Record => "type <id> = record (<id> (, <id>)* : <type> ;)* end ;",
        }
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Grammar {
    type Err = FrontlabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "statement" | "for" => Ok(Grammar::Statement),
            "expression" | "expr" | "quads" => Ok(Grammar::Expression),
            "record" | "type" => Ok(Grammar::Record),
            other => Err(FrontlabError::UnknownGrammar(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_aliases() {
        assert_eq!("statement".parse::<Grammar>().unwrap(), Grammar::Statement);
        assert_eq!("for".parse::<Grammar>().unwrap(), Grammar::Statement);
        assert_eq!("expr".parse::<Grammar>().unwrap(), Grammar::Expression);
        assert_eq!("record".parse::<Grammar>().unwrap(), Grammar::Record);
    }

    #[test]
    fn test_unknown_grammar() {
        let err = "pascal".parse::<Grammar>().unwrap_err();
        assert_eq!(err, FrontlabError::UnknownGrammar("pascal".to_string()));
    }

    #[test]
    fn test_name_round_trips_through_from_str() {
        for grammar in Grammar::ALL {
            assert_eq!(grammar.name().parse::<Grammar>().unwrap(), grammar);
        }
    }
}
