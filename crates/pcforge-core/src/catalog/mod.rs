//! Component catalog module.
//!
//! Contains the fixed category set, components with their compatibility
//! attributes, and the read-only catalog provider.

mod category;
mod component;
mod provider;

pub use category::Category;
pub use component::{Component, ComponentSpec};
pub use provider::{Catalog, CatalogProvider};
