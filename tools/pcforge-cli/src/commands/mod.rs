//! CLI command implementations.

pub mod build;
pub mod catalog;
pub mod config;
pub mod evaluate;

use anyhow::Result;
use clap::{Args, Subcommand};
use pcforge_core::build::Markup;
use pcforge_core::ComponentId;

/// Markup flags shared by the pricing commands.
#[derive(Args, Debug, Default)]
pub struct MarkupArgs {
    /// Markup as a percentage of the component cost.
    #[arg(long, allow_negative_numbers = true, conflicts_with = "markup_fixed")]
    pub markup_percent: Option<f64>,

    /// Markup as a fixed amount added to the cost.
    #[arg(long, allow_negative_numbers = true)]
    pub markup_fixed: Option<f64>,
}

impl MarkupArgs {
    /// The markup given on the command line, if any.
    pub fn markup(&self) -> Result<Option<Markup>> {
        let markup = match (self.markup_percent, self.markup_fixed) {
            (Some(value), _) => Some(Markup::percentage(value)?),
            (None, Some(value)) => Some(Markup::fixed(value)?),
            (None, None) => None,
        };
        Ok(markup)
    }

    /// The markup given on the command line, or `default`.
    pub fn markup_or(&self, default: Markup) -> Result<Markup> {
        Ok(self.markup()?.unwrap_or(default))
    }
}

/// Component ids as given on the command line.
pub fn component_ids(ids: &[String]) -> Vec<ComponentId> {
    ids.iter().map(|id| ComponentId::new(id.trim())).collect()
}

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List components, grouped by category.
    List {
        /// Only this category (cpu, motherboard, ram, gpu, storage, psu, cooler, case).
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show one component.
    Show {
        /// Component id.
        id: String,
    },
}

/// Arguments for the evaluate command.
#[derive(Args)]
pub struct EvaluateArgs {
    /// Catalog ids of the selected components, one per category.
    #[arg(short, long, required = true, num_args = 1.., value_delimiter = ',')]
    pub select: Vec<String>,

    #[command(flatten)]
    pub markup: MarkupArgs,
}

/// Arguments for the build command.
#[derive(Args)]
pub struct BuildArgs {
    #[command(subcommand)]
    pub command: BuildCommand,
}

#[derive(Subcommand)]
pub enum BuildCommand {
    /// Price a selection and save it as a draft build.
    Create {
        /// Build name.
        #[arg(short, long)]
        name: String,

        /// Free-text description.
        #[arg(short, long, default_value = "")]
        description: String,

        /// Catalog ids of the selected components.
        #[arg(short, long, num_args = 1.., value_delimiter = ',')]
        select: Vec<String>,

        #[command(flatten)]
        markup: MarkupArgs,

        /// Publish right away. Requires every category to be selected.
        #[arg(long)]
        publish: bool,
    },
    /// List stored builds.
    List {
        /// Only builds whose name or description contains this text.
        #[arg(short, long, default_value = "")]
        search: String,

        /// Only builds with this status (draft, published, archived).
        #[arg(long)]
        status: Option<String>,
    },
    /// Show a build with its components and compatibility.
    Show {
        /// Build id.
        id: String,
    },
    /// Replace the components of a build.
    Update {
        /// Build id.
        id: String,

        /// Catalog ids of the new selection.
        #[arg(short, long, num_args = 1.., value_delimiter = ',')]
        select: Vec<String>,
    },
    /// Change the markup of a build.
    Reprice {
        /// Build id.
        id: String,

        #[command(flatten)]
        markup: MarkupArgs,
    },
    /// Publish a draft build.
    Publish {
        /// Build id.
        id: String,
    },
    /// Archive a build.
    Archive {
        /// Build id.
        id: String,
    },
    /// Delete a build.
    Delete {
        /// Build id.
        id: String,
    },
    /// Sell a published build to a customer.
    Sell {
        /// Build id.
        id: String,

        /// Customer name.
        #[arg(long)]
        customer_name: String,

        /// Customer phone.
        #[arg(long)]
        phone: String,

        /// Delivery city.
        #[arg(long)]
        city: Option<String>,

        /// Customer email.
        #[arg(long)]
        email: Option<String>,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
