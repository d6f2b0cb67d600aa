//! Error types for build pricing, catalogs and sales.

use thiserror::Error;

use crate::build::BuildStatus;
use crate::catalog::Category;

/// Errors that can occur in pcforge domain operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PcForgeError {
    /// A category key outside the eight fixed slots.
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    /// A component was placed in a slot of another category.
    #[error("Component {component} is a {actual} and cannot fill the {slot} slot")]
    CategoryMismatch {
        component: String,
        slot: Category,
        actual: Category,
    },

    /// The same category slot appeared twice in a selection.
    #[error("Duplicate {0} slot in selection")]
    DuplicateSlot(Category),

    /// Component not found in the catalog.
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    /// Two catalog entries share an id.
    #[error("Duplicate component id in catalog: {0}")]
    DuplicateComponent(String),

    /// Markup value that is not a finite number.
    #[error("Invalid markup value: {0}")]
    InvalidMarkup(f64),

    /// A derived amount does not fit the stored integer range.
    #[error("Amount out of range: {0}")]
    AmountOutOfRange(String),

    /// Build is missing required categories.
    #[error("Build incomplete: missing {}", format_categories(.missing))]
    IncompleteBuild { missing: Vec<Category> },

    /// Status change not allowed by the build lifecycle.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: BuildStatus, to: BuildStatus },

    /// Build cannot be sold in its current state.
    #[error("Build {build} cannot be sold while {status}")]
    BuildNotSellable { build: String, status: BuildStatus },

    /// Currency code not recognised.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<serde_json::Error> for PcForgeError {
    fn from(e: serde_json::Error) -> Self {
        PcForgeError::SerializationError(e.to_string())
    }
}

impl From<toml::de::Error> for PcForgeError {
    fn from(e: toml::de::Error) -> Self {
        PcForgeError::SerializationError(e.to_string())
    }
}

fn format_categories(categories: &[Category]) -> String {
    categories
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, PcForgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_build_message() {
        let err = PcForgeError::IncompleteBuild {
            missing: vec![Category::Gpu, Category::Case],
        };
        assert_eq!(err.to_string(), "Build incomplete: missing gpu, case");
    }

    #[test]
    fn test_transition_message() {
        let err = PcForgeError::InvalidStatusTransition {
            from: BuildStatus::Archived,
            to: BuildStatus::Published,
        };
        assert_eq!(
            err.to_string(),
            "Invalid status transition from archived to published"
        );
    }
}
