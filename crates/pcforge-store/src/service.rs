//! Build workflows on top of a repository.
//!
//! Every change to a build's selection or markup goes through
//! [`PcBuild::set_selection`] or [`PcBuild::set_markup`], which re-evaluate
//! the whole build, before the record is written back.

use pcforge_core::build::{
    BuildDraft, BuildEvaluation, BuildSelection, BuildStatus, Markup, PcBuild,
};
use pcforge_core::money::Currency;
use pcforge_core::sales::{Customer, SalePolicy, SalesOrder};
use pcforge_core::BuildId;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{BuildRepository, StoreError, StoreResult};

/// Caller-side rules the pricer itself does not enforce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildPolicy {
    /// Refuse to persist a build whose sale price is below zero.
    pub reject_negative_price: bool,
    /// Allow publishing builds with compatibility issues.
    pub allow_publish_incompatible: bool,
    /// Only published builds can be sold.
    pub require_published_for_sale: bool,
}

impl Default for BuildPolicy {
    fn default() -> Self {
        Self {
            reject_negative_price: true,
            allow_publish_incompatible: true,
            require_published_for_sale: true,
        }
    }
}

/// Build workflows: create, edit, transition, search and sell.
#[derive(Debug)]
pub struct BuildService<R: BuildRepository> {
    repo: R,
    policy: BuildPolicy,
    currency: Currency,
}

impl<R: BuildRepository> BuildService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            policy: BuildPolicy::default(),
            currency: Currency::default(),
        }
    }

    pub fn with_policy(mut self, policy: BuildPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn policy(&self) -> &BuildPolicy {
        &self.policy
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn into_repository(self) -> R {
        self.repo
    }

    /// Evaluate a draft and store it as a new draft build.
    ///
    /// The selection may be incomplete; completeness is checked on publish.
    pub fn create(&mut self, draft: BuildDraft) -> StoreResult<PcBuild> {
        draft.validate_name()?;
        let build = draft.into_build()?;
        self.check_price(&build)?;
        let build = self.repo.insert(build)?;
        info!(
            build = %build.id,
            total = build.total_price(),
            price = build.final_price(),
            compatible = build.is_compatible(),
            "created build"
        );
        Ok(build)
    }

    /// Create a build from a finished draft and publish it.
    ///
    /// An incomplete draft is rejected before anything is stored. If the
    /// publish policy refuses the build, it stays behind as a draft.
    pub fn create_published(&mut self, draft: BuildDraft) -> StoreResult<PcBuild> {
        draft.validate()?;
        let build = self.create(draft)?;
        self.publish(&build.id)
    }

    pub fn get(&self, id: &BuildId) -> StoreResult<PcBuild> {
        self.repo.get(id)
    }

    pub fn list(&self) -> StoreResult<Vec<PcBuild>> {
        self.repo.list()
    }

    /// Builds whose name or description contains `query`, optionally with
    /// one status.
    pub fn search(&self, query: &str, status: Option<BuildStatus>) -> StoreResult<Vec<PcBuild>> {
        Ok(self
            .repo
            .list()?
            .into_iter()
            .filter(|build| build.matches(query, status))
            .collect())
    }

    /// Change the markup and re-price.
    pub fn reprice(
        &mut self,
        id: &BuildId,
        markup: Markup,
    ) -> StoreResult<(PcBuild, BuildEvaluation)> {
        self.edit(id, |build| build.set_markup(markup))
    }

    /// Replace the component selection and re-price.
    pub fn replace_selection(
        &mut self,
        id: &BuildId,
        selection: BuildSelection,
    ) -> StoreResult<(PcBuild, BuildEvaluation)> {
        self.edit(id, |build| build.set_selection(selection))
    }

    fn edit<F>(&mut self, id: &BuildId, apply: F) -> StoreResult<(PcBuild, BuildEvaluation)>
    where
        F: FnOnce(&mut PcBuild) -> pcforge_core::Result<BuildEvaluation>,
    {
        let mut build = self.repo.get(id)?;
        if build.status().is_terminal() {
            return Err(StoreError::PolicyViolation(format!(
                "build {} is {} and can no longer be edited",
                id,
                build.status()
            )));
        }
        let evaluation = apply(&mut build)?;
        self.check_price(&build)?;
        self.repo.update(build.clone())?;
        info!(
            build = %build.id,
            total = evaluation.total_cost,
            price = evaluation.final_price,
            compatible = evaluation.is_compatible,
            "repriced build"
        );
        Ok((build, evaluation))
    }

    /// Publish a draft.
    pub fn publish(&mut self, id: &BuildId) -> StoreResult<PcBuild> {
        let mut build = self.repo.get(id)?;
        if !build.is_compatible() {
            if !self.policy.allow_publish_incompatible {
                return Err(StoreError::PolicyViolation(format!(
                    "build {} has compatibility issues and cannot be published",
                    id
                )));
            }
            warn!(build = %id, "publishing build with compatibility issues");
        }
        build.publish()?;
        self.repo.update(build.clone())?;
        Ok(build)
    }

    /// Archive a draft or published build.
    pub fn archive(&mut self, id: &BuildId) -> StoreResult<PcBuild> {
        let mut build = self.repo.get(id)?;
        build.archive()?;
        self.repo.update(build.clone())?;
        Ok(build)
    }

    pub fn delete(&mut self, id: &BuildId) -> StoreResult<bool> {
        let removed = self.repo.delete(id)?;
        if removed {
            info!(build = %id, "deleted build");
        }
        Ok(removed)
    }

    /// Create a sales order for a stored build.
    pub fn sell(&self, id: &BuildId, customer: Customer) -> StoreResult<SalesOrder> {
        let build = self.repo.get(id)?;
        let policy = SalePolicy {
            require_published: self.policy.require_published_for_sale,
        };
        Ok(SalesOrder::from_build(&build, customer, self.currency, policy)?)
    }

    fn check_price(&self, build: &PcBuild) -> StoreResult<()> {
        if self.policy.reject_negative_price && build.final_price() < 0 {
            return Err(StoreError::PolicyViolation(format!(
                "sale price {} is negative",
                build.final_price()
            )));
        }
        Ok(())
    }
}
