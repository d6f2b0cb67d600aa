//! Catalog browsing commands.

use anyhow::{anyhow, Result};
use pcforge_core::catalog::{Catalog, CatalogProvider, Category, Component, ComponentSpec};
use pcforge_core::ComponentId;

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;
use crate::output::format_price;

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    match args.command {
        CatalogCommand::List { category } => list_components(&catalog, category.as_deref(), ctx),
        CatalogCommand::Show { id } => show_component(&catalog, &id, ctx),
    }
}

fn list_components(catalog: &Catalog, category: Option<&str>, ctx: &Context) -> Result<()> {
    let categories = match category {
        Some(name) => vec![name.parse::<Category>()?],
        None => Category::ALL.to_vec(),
    };

    if ctx.output.is_json() {
        let components: Vec<&Component> = categories
            .iter()
            .flat_map(|&c| catalog.components(c))
            .collect();
        ctx.output.json(&components);
        return Ok(());
    }

    let currency = ctx.config.pricing.currency;
    let widths = [4, 36, 10, 28];
    for category in categories {
        ctx.output.header(category.display_name());
        let components = catalog.components(category);
        if components.is_empty() {
            ctx.output.info("No components in this category.");
            continue;
        }
        for component in components {
            let price = format_price(component.price as i64, currency);
            ctx.output.table_row(
                &[
                    component.id.as_str(),
                    &component.name,
                    &price,
                    &attributes(&component.spec),
                ],
                &widths,
            );
        }
    }

    Ok(())
}

fn show_component(catalog: &Catalog, id: &str, ctx: &Context) -> Result<()> {
    let component = catalog
        .find(&ComponentId::new(id))
        .ok_or_else(|| anyhow!("Component not found: {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(component);
        return Ok(());
    }

    ctx.output.header(&component.name);
    ctx.output.kv("id", component.id.as_str());
    ctx.output.kv("category", component.category().display_name());
    ctx.output.kv(
        "price",
        &format_price(component.price as i64, ctx.config.pricing.currency),
    );
    let attrs = attributes(&component.spec);
    if !attrs.is_empty() {
        ctx.output.kv("attributes", &attrs);
    }

    Ok(())
}

/// Compatibility attributes in one short line.
fn attributes(spec: &ComponentSpec) -> String {
    match spec {
        ComponentSpec::Cpu { socket } => socket.clone(),
        ComponentSpec::Motherboard { socket, ram_type } => format!("{} {}", socket, ram_type),
        ComponentSpec::Ram {
            memory_type,
            capacity_gb,
        } => match capacity_gb {
            Some(gb) => format!("{} {} GB", memory_type, gb),
            None => memory_type.clone(),
        },
        ComponentSpec::Gpu { power } => format!("{} W draw", power),
        ComponentSpec::Psu { power } => format!("{} W", power),
        ComponentSpec::Storage { kind, capacity_gb } => {
            let mut parts = Vec::new();
            if let Some(kind) = kind {
                parts.push(kind.clone());
            }
            if let Some(gb) = capacity_gb {
                parts.push(format!("{} GB", gb));
            }
            parts.join(" ")
        }
        ComponentSpec::Cooler {
            kind,
            supported_sockets,
        } => {
            let sockets: Vec<&str> = supported_sockets.iter().map(String::as_str).collect();
            match kind {
                Some(kind) => format!("{} ({})", kind, sockets.join(", ")),
                None => sockets.join(", "),
            }
        }
        ComponentSpec::Case => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes() {
        assert_eq!(
            attributes(&ComponentSpec::motherboard("AM5", "DDR5")),
            "AM5 DDR5"
        );
        assert_eq!(
            attributes(&ComponentSpec::cooler(["LGA1700", "AM5"])),
            "AM5, LGA1700"
        );
        assert_eq!(attributes(&ComponentSpec::gpu(200)), "200 W draw");
        assert_eq!(attributes(&ComponentSpec::Case), "");
    }
}
