//! Build persistence and workflows for pcforge.
//!
//! Stores evaluated builds and returns them exactly as they were saved.
//! [`BuildService`] adds the caller-side rules the pricer leaves open:
//! negative sale prices, publishing incompatible builds and who may buy.
//!
//! # Example
//!
//! ```rust,ignore
//! use pcforge_store::{BuildService, JsonFileRepository};
//!
//! let repo = JsonFileRepository::open("pcforge-builds.json")?;
//! let mut service = BuildService::new(repo);
//!
//! let build = service.create(draft)?;
//! service.publish(&build.id)?;
//! ```

mod error;
mod repository;
mod service;

pub use error::{StoreError, StoreResult};
pub use repository::{BuildRepository, JsonFileRepository, MemoryRepository};
pub use service::{BuildPolicy, BuildService};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        BuildPolicy, BuildRepository, BuildService, JsonFileRepository, MemoryRepository,
        StoreError, StoreResult,
    };
}
