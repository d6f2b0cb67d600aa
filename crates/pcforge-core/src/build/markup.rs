//! Markup rules turning component cost into a sale price.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PcForgeError, Result};

/// Kind of markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupKind {
    /// Percentage of the component cost.
    Percentage,
    /// Fixed amount in the smallest currency unit.
    Fixed,
}

impl MarkupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkupKind::Percentage => "percentage",
            MarkupKind::Fixed => "fixed",
        }
    }
}

/// A markup rule.
///
/// Negative values are accepted; whether a resulting negative price is
/// acceptable is decided by the caller before persisting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MarkupRepr", into = "MarkupRepr")]
pub enum Markup {
    /// `sale = cost + cost * value / 100`
    Percentage(f64),
    /// `sale = cost + value`
    Fixed(f64),
}

/// Serialized form of a markup: `{"kind": "percentage", "value": 15}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarkupRepr {
    pub kind: MarkupKind,
    pub value: f64,
}

impl Markup {
    pub fn percentage(value: f64) -> Result<Self> {
        Self::from_parts(MarkupKind::Percentage, value)
    }

    pub fn fixed(value: f64) -> Result<Self> {
        Self::from_parts(MarkupKind::Fixed, value)
    }

    /// No markup at all.
    pub fn none() -> Self {
        Markup::Fixed(0.0)
    }

    /// Build a markup, rejecting NaN and infinities.
    pub fn from_parts(kind: MarkupKind, value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(PcForgeError::InvalidMarkup(value));
        }
        Ok(match kind {
            MarkupKind::Percentage => Markup::Percentage(value),
            MarkupKind::Fixed => Markup::Fixed(value),
        })
    }

    pub fn kind(&self) -> MarkupKind {
        match self {
            Markup::Percentage(_) => MarkupKind::Percentage,
            Markup::Fixed(_) => MarkupKind::Fixed,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Markup::Percentage(v) | Markup::Fixed(v) => *v,
        }
    }

    /// Amount this markup adds on top of `total_cost`.
    pub fn delta(&self, total_cost: u64) -> f64 {
        let cost = total_cost as f64;
        match self {
            Markup::Percentage(v) => cost * v / 100.0,
            Markup::Fixed(v) => *v,
        }
    }

    /// Sale price for `total_cost`, unrounded.
    pub fn apply(&self, total_cost: u64) -> f64 {
        total_cost as f64 + self.delta(total_cost)
    }
}

impl Default for Markup {
    /// 15 percent, the usual store markup.
    fn default() -> Self {
        Markup::Percentage(15.0)
    }
}

impl TryFrom<MarkupRepr> for Markup {
    type Error = PcForgeError;

    fn try_from(repr: MarkupRepr) -> Result<Self> {
        Markup::from_parts(repr.kind, repr.value)
    }
}

impl From<Markup> for MarkupRepr {
    fn from(markup: Markup) -> Self {
        MarkupRepr {
            kind: markup.kind(),
            value: markup.value(),
        }
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Markup::Percentage(v) => write!(f, "{}%", v),
            Markup::Fixed(v) if *v < 0.0 => write!(f, "{}", v),
            Markup::Fixed(v) => write!(f, "+{}", v),
        }
    }
}
