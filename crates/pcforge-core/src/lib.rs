//! Pricing and compatibility evaluation for custom PC builds.
//!
//! This crate provides the domain types of a PC build shop:
//!
//! - **Catalog**: Components in eight categories, with the attributes the
//!   compatibility rules read
//! - **Build**: Slot selections, markup, compatibility checks and the pricer
//! - **Sales**: Customers and orders exported from published builds
//!
//! # Example
//!
//! ```rust,ignore
//! use pcforge_core::prelude::*;
//!
//! let catalog = Catalog::from_toml_str(&std::fs::read_to_string("catalog.toml")?)?;
//! let ids: Vec<ComponentId> = ["1", "10", "8", "4", "19", "14", "22", "16"]
//!     .into_iter()
//!     .map(ComponentId::from)
//!     .collect();
//! let selection = BuildSelection::from_catalog(&catalog, &ids)?;
//!
//! let evaluation = evaluate_build(&selection, &Markup::percentage(15.0)?)?;
//! println!("cost {} price {} profit {}",
//!     evaluation.total_cost, evaluation.final_price, evaluation.profit);
//! for issue in &evaluation.issues {
//!     println!("{}", issue);
//! }
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod build;
pub mod catalog;
pub mod sales;

pub use error::{PcForgeError, Result};
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{PcForgeError, Result};
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, CatalogProvider, Category, Component, ComponentSpec};

    // Build
    pub use crate::build::{
        check_compatibility, evaluate_build, BuildDraft, BuildEvaluation, BuildPricer,
        BuildSelection, BuildStatus, IncompatibilityIssue, Markup, MarkupKind, PcBuild,
    };

    // Sales
    pub use crate::sales::{Customer, OrderLine, OrderStatus, SalePolicy, SalesOrder};
}
