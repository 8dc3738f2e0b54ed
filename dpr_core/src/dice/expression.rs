//! Die expression parsing ("2d6+3", "1d20-1", "d8")

use crate::error::{DprError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single parsed `NdS±M` expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DieExpression {
    /// Number of dice to roll
    pub count: u32,
    /// Number of sides per die
    pub size: u32,
    /// Flat modifier attached to the expression
    pub modifier: i32,
}

impl DieExpression {
    /// Create a new die expression
    pub fn new(count: u32, size: u32, modifier: i32) -> Self {
        DieExpression {
            count,
            size,
            modifier,
        }
    }
}

impl FromStr for DieExpression {
    type Err = DprError;

    fn from_str(s: &str) -> Result<Self> {
        parse_die_expression(s)
    }
}

impl fmt::Display for DieExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifier > 0 {
            write!(f, "{}d{}+{}", self.count, self.size, self.modifier)
        } else if self.modifier < 0 {
            write!(f, "{}d{}{}", self.count, self.size, self.modifier)
        } else {
            write!(f, "{}d{}", self.count, self.size)
        }
    }
}

/// Parse a die expression such as `"2d6"`, `"2D6 + 3"` or `"1d8-1"`
///
/// Matching is case-insensitive and ignores all whitespace. A missing count
/// (`"d8"`) means one die. Zero counts and sizes are accepted here; they are
/// pruned when expressions are folded into a pool.
pub fn parse_die_expression(text: &str) -> Result<DieExpression> {
    let normalized: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    let d_pos = normalized
        .find('d')
        .ok_or_else(|| DprError::parse(text, "missing 'd' separator"))?;

    let count_str = &normalized[..d_pos];
    let count: u32 = if count_str.is_empty() {
        1
    } else {
        count_str
            .parse()
            .map_err(|_| DprError::parse(text, format!("invalid dice count '{}'", count_str)))?
    };

    let rest = &normalized[d_pos + 1..];
    let (size_str, modifier) = if let Some(plus_pos) = rest.find('+') {
        let mod_str = &rest[plus_pos + 1..];
        let modifier: i32 = mod_str
            .parse()
            .map_err(|_| DprError::parse(text, format!("invalid modifier '{}'", mod_str)))?;
        (&rest[..plus_pos], modifier)
    } else if let Some(minus_pos) = rest.find('-') {
        // Keep the sign so "-3" parses as -3
        let mod_str = &rest[minus_pos..];
        let modifier: i32 = mod_str
            .parse()
            .map_err(|_| DprError::parse(text, format!("invalid modifier '{}'", mod_str)))?;
        (&rest[..minus_pos], modifier)
    } else {
        (rest, 0)
    };

    if size_str.is_empty() {
        return Err(DprError::parse(text, "missing die size"));
    }
    let size: u32 = size_str
        .parse()
        .map_err(|_| DprError::parse(text, format!("invalid die size '{}'", size_str)))?;

    Ok(DieExpression {
        count,
        size,
        modifier,
    })
}
