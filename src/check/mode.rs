use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// How the size of the intersection is compared with the required count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComparisonMode {
    Exactly,
    Minimum,
    Maximum,
}

impl ComparisonMode {
    pub const ALLOWED: [&'static str; 3] = ["exactly", "minimum", "maximum"];

    /// Returns the violated constraint, or `None` if `matched` satisfies the mode.
    pub fn evaluate(self, matched: usize, count: usize) -> Option<Violation> {
        match self {
            Self::Exactly if matched != count => Some(Violation::Exactly),
            Self::Minimum if matched < count => Some(Violation::AtLeast),
            Self::Maximum if matched > count => Some(Violation::AtMost),
            _ => None,
        }
    }
}

impl FromStr for ComparisonMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "exactly" => Ok(Self::Exactly),
            "minimum" => Ok(Self::Minimum),
            "maximum" => Ok(Self::Maximum),
            _ => Err(format!(
                "Unknown mode input [{value}]. Must be one of: {}",
                Self::ALLOWED.join(", ")
            )),
        }
    }
}

impl Display for ComparisonMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mode = match self {
            Self::Exactly => "exactly",
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
        };
        f.write_str(mode)
    }
}

/// A failed comparison, rendered as the `errorString` of the failure message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Violation {
    Exactly,
    AtLeast,
    AtMost,
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Exactly => "exactly",
            Self::AtLeast => "at least",
            Self::AtMost => "at most",
        };
        f.write_str(text)
    }
}
