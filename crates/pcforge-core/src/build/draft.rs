//! Input for creating a build.

use serde::{Deserialize, Serialize};

use crate::build::{BuildSelection, Markup, PcBuild};
use crate::error::{PcForgeError, Result};

/// What an operator fills in before a build exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "components")]
    pub selection: BuildSelection,
    #[serde(default)]
    pub markup: Markup,
}

impl BuildDraft {
    pub fn new(name: impl Into<String>, selection: BuildSelection, markup: Markup) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            selection,
            markup,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check the name only. Enough for saving an unfinished draft.
    pub fn validate_name(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PcForgeError::ValidationError(
                "build name is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Check everything a finished build needs: a name and all eight slots.
    ///
    /// Used before creating a build that is published straight away.
    pub fn validate(&self) -> Result<()> {
        self.validate_name()?;
        self.selection.ensure_complete()
    }

    /// Turn into a priced draft build without checking completeness.
    pub fn into_build(self) -> Result<PcBuild> {
        PcBuild::new(
            self.name.trim(),
            self.description,
            self.selection,
            self.markup,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, Component, ComponentSpec};

    #[test]
    fn test_blank_name_rejected() {
        let draft = BuildDraft::new("   ", BuildSelection::new(), Markup::default());
        assert!(matches!(
            draft.validate_name(),
            Err(PcForgeError::ValidationError(_))
        ));
    }

    #[test]
    fn test_incomplete_selection_rejected() {
        let selection: BuildSelection =
            vec![Component::new("16", "Case", 15000, ComponentSpec::Case)]
                .into_iter()
                .collect();
        let draft = BuildDraft::new("Office", selection, Markup::default());
        draft.validate_name().unwrap();

        match draft.validate() {
            Err(PcForgeError::IncompleteBuild { missing }) => {
                assert_eq!(missing.len(), 7);
                assert!(!missing.contains(&Category::Case));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_into_build_trims_name() {
        let draft = BuildDraft::new("  Office  ", BuildSelection::new(), Markup::none())
            .with_description("for work");
        let build = draft.into_build().unwrap();
        assert_eq!(build.name, "Office");
        assert_eq!(build.description, "for work");
        assert_eq!(build.total_price(), 0);
    }

    #[test]
    fn test_into_build_rejects_unrepresentable_price() {
        let selection: BuildSelection =
            vec![Component::new("16", "Case", 15000, ComponentSpec::Case)]
                .into_iter()
                .collect();
        let draft = BuildDraft::new("Office", selection, Markup::Percentage(1e20));
        assert!(matches!(
            draft.into_build(),
            Err(PcForgeError::AmountOutOfRange(_))
        ));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let draft: BuildDraft = serde_json::from_str(r#"{"name": "Budget"}"#).unwrap();
        assert_eq!(draft.markup, Markup::Percentage(15.0));
        assert!(draft.selection.is_empty());
    }
}
