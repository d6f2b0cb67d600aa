//! Build pricing.
//!
//! All functions here are pure: they read their arguments and nothing else.
//! Callers that persist or display figures should go through
//! [`evaluate_build`] so that cost, price, profit and compatibility always
//! come from the same selection and markup.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::build::{check_compatibility, BuildSelection, IncompatibilityIssue, Markup};
use crate::error::{PcForgeError, Result};
use crate::money::round_half_up;

/// Every derived figure of a build, computed together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildEvaluation {
    /// Sum of component prices.
    pub total_cost: u64,
    /// Sale price, rounded half-up to a whole currency unit.
    pub final_price: i64,
    /// `final_price - total_cost`.
    pub profit: i64,
    /// Triggered compatibility rules, in rule order.
    pub issues: Vec<IncompatibilityIssue>,
    /// True when `issues` is empty.
    pub is_compatible: bool,
}

/// Sum of the prices of the selected components. Empty slots add nothing.
pub fn compute_total_cost(selection: &BuildSelection) -> Result<u64> {
    selection
        .components()
        .try_fold(0u64, |sum, c| sum.checked_add(c.price))
        .ok_or_else(|| PcForgeError::AmountOutOfRange("component cost total".to_string()))
}

/// Sale price for a cost under a markup, unrounded.
pub fn compute_final_price(total_cost: u64, markup: &Markup) -> f64 {
    markup.apply(total_cost)
}

/// Profit for a cost and sale price. Negative when the markup is.
pub fn compute_profit(total_cost: u64, final_price: f64) -> f64 {
    final_price - total_cost as f64
}

/// Price and check a selection in one step.
///
/// Profit is taken from the rounded sale price, so
/// `profit == final_price - total_cost` holds exactly. Fails with
/// [`PcForgeError::AmountOutOfRange`] when a figure does not fit its integer
/// type, e.g. under an absurd markup.
pub fn evaluate_build(selection: &BuildSelection, markup: &Markup) -> Result<BuildEvaluation> {
    let total_cost = compute_total_cost(selection)?;
    let unrounded = compute_final_price(total_cost, markup);
    let final_price = round_half_up(unrounded).ok_or_else(|| {
        PcForgeError::AmountOutOfRange(format!("sale price {} under markup {}", unrounded, markup))
    })?;
    let profit = i64::try_from(total_cost)
        .ok()
        .and_then(|cost| final_price.checked_sub(cost))
        .ok_or_else(|| {
            PcForgeError::AmountOutOfRange(format!(
                "profit of sale price {} over cost {}",
                final_price, total_cost
            ))
        })?;
    let issues = check_compatibility(selection);
    let is_compatible = issues.is_empty();

    debug!(
        components = selection.len(),
        total_cost,
        final_price,
        profit,
        issues = issues.len(),
        "evaluated build"
    );

    Ok(BuildEvaluation {
        total_cost,
        final_price,
        profit,
        issues,
        is_compatible,
    })
}

/// Value-style handle over the pricing functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildPricer;

impl BuildPricer {
    pub fn new() -> Self {
        Self
    }

    pub fn total_cost(&self, selection: &BuildSelection) -> Result<u64> {
        compute_total_cost(selection)
    }

    pub fn final_price(&self, total_cost: u64, markup: &Markup) -> f64 {
        compute_final_price(total_cost, markup)
    }

    pub fn profit(&self, total_cost: u64, final_price: f64) -> f64 {
        compute_profit(total_cost, final_price)
    }

    pub fn check(&self, selection: &BuildSelection) -> Vec<IncompatibilityIssue> {
        check_compatibility(selection)
    }

    pub fn evaluate(&self, selection: &BuildSelection, markup: &Markup) -> Result<BuildEvaluation> {
        evaluate_build(selection, markup)
    }
}
