//! The persisted build entity and its lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

use crate::build::{check_compatibility, evaluate_build, BuildEvaluation, BuildSelection, Markup};
use crate::error::{PcForgeError, Result};
use crate::ids::BuildId;

/// Lifecycle status of a build.
///
/// `draft -> published -> archived`, or `draft -> archived` directly.
/// Nothing leaves `archived`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BuildStatus {
    /// Being put together, not offered for sale.
    #[default]
    Draft,
    /// Offered for sale.
    Published,
    /// Withdrawn, kept for records.
    Archived,
}

impl BuildStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildStatus::Draft => "draft",
            BuildStatus::Published => "published",
            BuildStatus::Archived => "archived",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BuildStatus::Draft => "Draft",
            BuildStatus::Published => "Published",
            BuildStatus::Archived => "Archived",
        }
    }

    pub fn can_publish(&self) -> bool {
        matches!(self, BuildStatus::Draft)
    }

    pub fn can_archive(&self) -> bool {
        matches!(self, BuildStatus::Draft | BuildStatus::Published)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BuildStatus::Archived)
    }
}

impl FromStr for BuildStatus {
    type Err = PcForgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(BuildStatus::Draft),
            "published" => Ok(BuildStatus::Published),
            "archived" => Ok(BuildStatus::Archived),
            _ => Err(PcForgeError::ValidationError(format!(
                "unknown build status: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, priced build configuration.
///
/// `total_price`, `final_price`, `profit` and `is_compatible` are only ever
/// written together from one [`BuildEvaluation`] of the current selection
/// and markup. Deserializing returns the stored figures as they were saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcBuild {
    pub id: BuildId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "components")]
    selection: BuildSelection,
    markup: Markup,
    total_price: u64,
    final_price: i64,
    profit: i64,
    is_compatible: bool,
    status: BuildStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PcBuild {
    /// Create a draft build priced from `selection` and `markup`.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        selection: BuildSelection,
        markup: Markup,
    ) -> Result<Self> {
        let now = Utc::now();
        let evaluation = evaluate_build(&selection, &markup)?;
        Ok(Self {
            id: BuildId::generate(),
            name: name.into(),
            description: description.into(),
            selection,
            markup,
            total_price: evaluation.total_cost,
            final_price: evaluation.final_price,
            profit: evaluation.profit,
            is_compatible: evaluation.is_compatible,
            status: BuildStatus::Draft,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace the id, e.g. with one assigned by a store.
    pub fn with_id(mut self, id: BuildId) -> Self {
        self.id = id;
        self
    }

    pub fn selection(&self) -> &BuildSelection {
        &self.selection
    }

    pub fn markup(&self) -> Markup {
        self.markup
    }

    pub fn total_price(&self) -> u64 {
        self.total_price
    }

    pub fn final_price(&self) -> i64 {
        self.final_price
    }

    pub fn profit(&self) -> i64 {
        self.profit
    }

    pub fn is_compatible(&self) -> bool {
        self.is_compatible
    }

    pub fn status(&self) -> BuildStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// The stored figures as an evaluation, without repricing.
    ///
    /// Issues are not persisted, so they are derived again from the stored
    /// selection; `is_compatible` is the stored flag.
    pub fn stored_evaluation(&self) -> BuildEvaluation {
        BuildEvaluation {
            total_cost: self.total_price,
            final_price: self.final_price,
            profit: self.profit,
            issues: check_compatibility(&self.selection),
            is_compatible: self.is_compatible,
        }
    }

    /// Change the markup and reprice. On error the build is left unchanged.
    pub fn set_markup(&mut self, markup: Markup) -> Result<BuildEvaluation> {
        let evaluation = evaluate_build(&self.selection, &markup)?;
        self.markup = markup;
        Ok(self.apply(evaluation))
    }

    /// Swap the component selection and reprice. On error the build is left
    /// unchanged.
    pub fn set_selection(&mut self, selection: BuildSelection) -> Result<BuildEvaluation> {
        let evaluation = evaluate_build(&selection, &self.markup)?;
        self.selection = selection;
        Ok(self.apply(evaluation))
    }

    fn apply(&mut self, evaluation: BuildEvaluation) -> BuildEvaluation {
        self.total_price = evaluation.total_cost;
        self.final_price = evaluation.final_price;
        self.profit = evaluation.profit;
        self.is_compatible = evaluation.is_compatible;
        self.touch();
        evaluation
    }

    /// Offer the build for sale.
    ///
    /// Requires a draft with every category filled. Compatibility is not
    /// checked here; see `BuildService` for the policy switch.
    pub fn publish(&mut self) -> Result<()> {
        if !self.status.can_publish() {
            return Err(PcForgeError::InvalidStatusTransition {
                from: self.status,
                to: BuildStatus::Published,
            });
        }
        self.selection.ensure_complete()?;
        self.set_status(BuildStatus::Published);
        Ok(())
    }

    /// Withdraw the build.
    pub fn archive(&mut self) -> Result<()> {
        if !self.status.can_archive() {
            return Err(PcForgeError::InvalidStatusTransition {
                from: self.status,
                to: BuildStatus::Archived,
            });
        }
        self.set_status(BuildStatus::Archived);
        Ok(())
    }

    fn set_status(&mut self, status: BuildStatus) {
        info!(build = %self.id, from = %self.status, to = %status, "build status changed");
        self.status = status;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Admin list filter: case-insensitive substring of name or description,
    /// optionally restricted to one status.
    pub fn matches(&self, query: &str, status: Option<BuildStatus>) -> bool {
        let query = query.to_lowercase();
        let matches_text = self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query);
        let matches_status = status.map_or(true, |s| s == self.status);
        matches_text && matches_status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, Component, ComponentSpec};

    fn priced(name: &str, selection: BuildSelection, markup: Markup) -> PcBuild {
        PcBuild::new(name, "", selection, markup).unwrap()
    }

    fn complete_selection() -> BuildSelection {
        vec![
            Component::new(
                "1",
                "Intel Core i5-13600K",
                25000,
                ComponentSpec::cpu("LGA1700"),
            ),
            Component::new(
                "10",
                "ASUS Z790-P",
                18000,
                ComponentSpec::motherboard("LGA1700", "DDR5"),
            ),
            Component::new(
                "8",
                "G.Skill 32GB DDR5-5600",
                15000,
                ComponentSpec::ram("DDR5"),
            ),
            Component::new("4", "RTX 4070", 55000, ComponentSpec::gpu(200)),
            Component::new(
                "19",
                "Samsung 980 Pro 1TB NVMe",
                8000,
                ComponentSpec::storage(),
            ),
            Component::new("13", "Corsair RM750x", 12000, ComponentSpec::psu(750)),
            Component::new(
                "22",
                "Noctua NH-D15",
                7000,
                ComponentSpec::cooler(["LGA1700", "AM5"]),
            ),
            Component::new("16", "Fractal Design Define 7", 15000, ComponentSpec::Case),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_new_build_is_priced_draft() {
        let build = priced("Gaming", complete_selection(), Markup::Percentage(15.0));
        assert_eq!(build.status(), BuildStatus::Draft);
        assert_eq!(build.total_price(), 155000);
        assert_eq!(build.final_price(), 178250);
        assert_eq!(build.profit(), 23250);
        assert!(build.is_compatible());
    }

    #[test]
    fn test_set_markup_reprices_everything() {
        let mut build = priced("b", complete_selection(), Markup::Percentage(15.0));
        let eval = build.set_markup(Markup::Fixed(10000.0)).unwrap();
        assert_eq!(eval.final_price, 165000);
        assert_eq!(build.final_price(), 165000);
        assert_eq!(build.profit(), 10000);
        assert_eq!(build.markup(), Markup::Fixed(10000.0));
    }

    #[test]
    fn test_set_selection_updates_compatibility() {
        let mut build = priced("b", complete_selection(), Markup::none());
        let mut selection = build.selection().clone();
        selection.select(Component::new("14", "Tiny PSU", 3000, ComponentSpec::psu(300)));
        let eval = build.set_selection(selection).unwrap();

        assert!(!eval.is_compatible);
        assert!(!build.is_compatible());
        assert_eq!(build.total_price(), 146000);
        assert_eq!(build.final_price(), 146000);
    }

    #[test]
    fn test_lifecycle() {
        let mut build = priced("b", complete_selection(), Markup::default());
        build.publish().unwrap();
        assert_eq!(build.status(), BuildStatus::Published);
        assert!(build.publish().is_err());

        build.archive().unwrap();
        assert_eq!(build.status(), BuildStatus::Archived);
        assert_eq!(
            build.archive().unwrap_err(),
            PcForgeError::InvalidStatusTransition {
                from: BuildStatus::Archived,
                to: BuildStatus::Archived,
            }
        );
        assert!(build.publish().is_err());
    }

    #[test]
    fn test_draft_can_be_archived() {
        let mut build = priced("b", BuildSelection::new(), Markup::default());
        build.archive().unwrap();
        assert!(build.status().is_terminal());
    }

    #[test]
    fn test_publish_requires_complete_selection() {
        let mut selection = complete_selection();
        selection.remove(Category::Gpu);
        let mut build = priced("b", selection, Markup::default());
        assert_eq!(
            build.publish().unwrap_err(),
            PcForgeError::IncompleteBuild {
                missing: vec![Category::Gpu]
            }
        );
        assert_eq!(build.status(), BuildStatus::Draft);
    }

    #[test]
    fn test_publish_allows_incompatible() {
        let mut selection = complete_selection();
        selection.select(Component::new(
            "11",
            "MSI B650M Pro",
            12000,
            ComponentSpec::motherboard("AM5", "DDR5"),
        ));
        let mut build = priced("b", selection, Markup::default());
        assert!(!build.is_compatible());
        build.publish().unwrap();
    }

    #[test]
    fn test_matches() {
        let build = PcBuild::new(
            "Gaming Build 2024",
            "Great for modern games",
            BuildSelection::new(),
            Markup::default(),
        )
        .unwrap();
        assert!(build.matches("gaming", None));
        assert!(build.matches("MODERN", Some(BuildStatus::Draft)));
        assert!(!build.matches("gaming", Some(BuildStatus::Published)));
        assert!(!build.matches("office", None));
        assert!(build.matches("", None));
    }

    #[test]
    fn test_serde_keeps_stored_figures() {
        let mut build = priced("b", complete_selection(), Markup::Percentage(15.0));
        build.description = "d".to_string();
        let json = serde_json::to_value(&build).unwrap();
        assert_eq!(json["final_price"], 178250);
        assert_eq!(json["status"], "draft");
        assert_eq!(json["components"][0]["type"], "cpu");

        let back: PcBuild = serde_json::from_value(json).unwrap();
        assert_eq!(back, build);
    }

    #[test]
    fn test_failed_reprice_leaves_build_unchanged() {
        let mut build = priced("b", complete_selection(), Markup::Percentage(15.0));
        let before = build.clone();
        assert!(matches!(
            build.set_markup(Markup::Fixed(-1e19)),
            Err(PcForgeError::AmountOutOfRange(_))
        ));
        assert_eq!(build, before);
    }

    #[test]
    fn test_stored_evaluation_does_not_reprice() {
        let build = priced("b", complete_selection(), Markup::Percentage(15.0));
        let mut json = serde_json::to_value(&build).unwrap();
        // A record saved with figures that no longer match its markup.
        json["final_price"] = serde_json::json!(170000);
        json["profit"] = serde_json::json!(15000);
        let stored: PcBuild = serde_json::from_value(json).unwrap();

        let eval = stored.stored_evaluation();
        assert_eq!(eval.total_cost, 155000);
        assert_eq!(eval.final_price, 170000);
        assert_eq!(eval.profit, 15000);
        assert!(eval.issues.is_empty());
        assert!(eval.is_compatible);
    }
}
