//! PC build module.
//!
//! Contains component selections, markup rules, compatibility checks, the
//! pricer and the persisted build entity.

mod compatibility;
mod draft;
mod markup;
mod pricer;
mod record;
mod selection;

pub use compatibility::{check_compatibility, IncompatibilityIssue, SYSTEM_POWER_BASELINE_W};
pub use draft::BuildDraft;
pub use markup::{Markup, MarkupKind, MarkupRepr};
pub use pricer::{
    compute_final_price, compute_profit, compute_total_cost, evaluate_build, BuildEvaluation,
    BuildPricer,
};
pub use record::{BuildStatus, PcBuild};
pub use selection::{BuildSelection, SlotEntry};
