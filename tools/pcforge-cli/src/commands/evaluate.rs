//! Ad-hoc build evaluation.

use anyhow::Result;
use pcforge_core::build::{evaluate_build, BuildEvaluation, BuildSelection, Markup};
use pcforge_core::catalog::Category;
use pcforge_core::money::Currency;
use serde::Serialize;

use super::{component_ids, EvaluateArgs};
use crate::context::Context;
use crate::output::{format_price, format_profit, Output};

#[derive(Serialize)]
struct EvaluationReport<'a> {
    components: &'a BuildSelection,
    missing: Vec<Category>,
    markup: Markup,
    #[serde(flatten)]
    evaluation: &'a BuildEvaluation,
}

/// Run the evaluate command.
pub fn run(args: EvaluateArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let selection = BuildSelection::from_catalog(&catalog, &component_ids(&args.select))?;
    let markup = args.markup.markup_or(ctx.config.pricing.default_markup)?;

    let evaluation = evaluate_build(&selection, &markup)?;

    if ctx.output.is_json() {
        ctx.output.json(&EvaluationReport {
            components: &selection,
            missing: selection.missing(),
            markup,
            evaluation: &evaluation,
        });
        return Ok(());
    }

    ctx.output.header("Build evaluation");
    print_selection(&ctx.output, &selection, ctx.config.pricing.currency);
    print_figures(&ctx.output, &evaluation, &markup, ctx.config.pricing.currency);

    let missing = selection.missing();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|c| c.as_str()).collect();
        ctx.output
            .warn(&format!("Incomplete build, missing: {}", names.join(", ")));
    }

    Ok(())
}

/// One row per category slot, empty slots included.
pub fn print_selection(output: &Output, selection: &BuildSelection, currency: Currency) {
    let widths = [12, 4, 36, 10];
    output.table_row(&["CATEGORY", "ID", "NAME", "PRICE"], &widths);
    for category in Category::ALL {
        match selection.get(category) {
            Some(component) => {
                let price = format_price(component.price as i64, currency);
                output.table_row(
                    &[
                        category.display_name(),
                        component.id.as_str(),
                        &component.name,
                        &price,
                    ],
                    &widths,
                );
            }
            None => output.table_row(
                &[category.display_name(), "-", "(not selected)", ""],
                &widths,
            ),
        }
    }
}

/// Cost, markup, price and profit, then the compatibility verdict.
pub fn print_figures(
    output: &Output,
    evaluation: &BuildEvaluation,
    markup: &Markup,
    currency: Currency,
) {
    output.header("Pricing");
    output.kv("Component cost", &format_price(evaluation.total_cost as i64, currency));
    output.kv("Markup", &markup.to_string());
    output.kv("Sale price", &format_price(evaluation.final_price, currency));
    output.kv("Profit", &format_profit(evaluation.profit, currency));

    output.header("Compatibility");
    output.issues(&evaluation.issues);
}
