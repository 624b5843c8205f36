use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// One three-address instruction: `result := arg1 op arg2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quad {
    pub op: String,
    pub arg1: String,
    pub arg2: Option<String>,
    pub result: String,
}

impl Quad {
    pub fn binary(
        op: impl Into<String>,
        arg1: impl Into<String>,
        arg2: impl Into<String>,
        result: impl Into<String>,
    ) -> Self {
        Self {
            op: op.into(),
            arg1: arg1.into(),
            arg2: Some(arg2.into()),
            result: result.into(),
        }
    }

    pub fn unary(op: impl Into<String>, arg1: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            op: op.into(),
            arg1: arg1.into(),
            arg2: None,
            result: result.into(),
        }
    }

    /// `target = value`
    pub fn assign(value: impl Into<String>, target: impl Into<String>) -> Self {
        Self::unary("=", value, target)
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.op,
            self.arg1,
            self.arg2.as_deref().unwrap_or("_"),
            self.result
        )
    }
}

/// Hands out temporaries `<prefix>1`, `<prefix>2`, ... for one emission pass.
///
/// The counter only moves forward. A candidate that spells a reserved name (an
/// identifier of the program being translated) is skipped.
#[derive(Debug, Clone)]
pub struct TempAllocator {
    prefix: String,
    counter: usize,
    reserved: HashSet<String>,
}

impl TempAllocator {
    pub fn new(prefix: impl Into<String>, reserved: HashSet<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
            reserved,
        }
    }

    pub fn fresh(&mut self) -> String {
        loop {
            self.counter += 1;
            let name = format!("{}{}", self.prefix, self.counter);
            if !self.reserved.contains(&name) {
                return name;
            }
        }
    }

    /// Number of counter values used so far, skipped ones included.
    pub fn counter(&self) -> usize {
        self.counter
    }
}
