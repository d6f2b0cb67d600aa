//! Stored build commands.

use anyhow::{bail, Result};
use pcforge_core::build::{BuildDraft, BuildSelection, BuildStatus, PcBuild};
use pcforge_core::sales::{Customer, SalesOrder};
use pcforge_core::BuildId;

use super::evaluate::{print_figures, print_selection};
use super::{component_ids, BuildArgs, BuildCommand, MarkupArgs};
use crate::context::Context;
use crate::output::{format_price, status_badge};

/// Run the build command.
pub fn run(args: BuildArgs, ctx: &Context) -> Result<()> {
    match args.command {
        BuildCommand::Create {
            name,
            description,
            select,
            markup,
            publish,
        } => create_build(name, description, &select, &markup, publish, ctx),
        BuildCommand::List { search, status } => list_builds(&search, status.as_deref(), ctx),
        BuildCommand::Show { id } => show_build(&BuildId::new(id), ctx),
        BuildCommand::Update { id, select } => update_selection(&BuildId::new(id), &select, ctx),
        BuildCommand::Reprice { id, markup } => reprice_build(&BuildId::new(id), &markup, ctx),
        BuildCommand::Publish { id } => publish_build(&BuildId::new(id), ctx),
        BuildCommand::Archive { id } => archive_build(&BuildId::new(id), ctx),
        BuildCommand::Delete { id } => delete_build(&BuildId::new(id), ctx),
        BuildCommand::Sell {
            id,
            customer_name,
            phone,
            city,
            email,
        } => {
            let mut customer = Customer::new(customer_name, phone);
            customer.city = city;
            customer.email = email;
            sell_build(&BuildId::new(id), customer, ctx)
        }
    }
}

fn create_build(
    name: String,
    description: String,
    select: &[String],
    markup: &MarkupArgs,
    publish: bool,
    ctx: &Context,
) -> Result<()> {
    let selection = if select.is_empty() {
        BuildSelection::new()
    } else {
        BuildSelection::from_catalog(&ctx.catalog()?, &component_ids(select))?
    };
    let markup = markup.markup_or(ctx.config.pricing.default_markup)?;
    let draft = BuildDraft::new(name, selection, markup).with_description(description);

    let mut service = ctx.service()?;
    let build = if publish {
        service.create_published(draft)?
    } else {
        service.create(draft)?
    };

    if ctx.output.is_json() {
        ctx.output.json(&build);
        return Ok(());
    }

    ctx.output.success(&format!(
        "Created {} build {} ({})",
        build.status(),
        build.id,
        build.name
    ));
    print_summary(&build, ctx);
    Ok(())
}

fn list_builds(search: &str, status: Option<&str>, ctx: &Context) -> Result<()> {
    let status = status.map(str::parse::<BuildStatus>).transpose()?;
    let builds = ctx.service()?.search(search, status)?;

    if ctx.output.is_json() {
        ctx.output.json(&builds);
        return Ok(());
    }

    if builds.is_empty() {
        ctx.output.info("No builds found.");
        return Ok(());
    }

    let currency = ctx.config.pricing.currency;
    let widths = [4, 28, 10, 10, 10, 12];
    ctx.output.header("Builds");
    ctx.output.table_row(
        &["ID", "NAME", "STATUS", "PRICE", "PROFIT", "COMPATIBLE"],
        &widths,
    );
    for build in &builds {
        let price = format_price(build.final_price(), currency);
        let profit = format_price(build.profit(), currency);
        ctx.output.table_row(
            &[
                build.id.as_str(),
                &build.name,
                build.status().display_name(),
                &price,
                &profit,
                if build.is_compatible() { "yes" } else { "no" },
            ],
            &widths,
        );
    }

    Ok(())
}

fn show_build(id: &BuildId, ctx: &Context) -> Result<()> {
    let build = ctx.service()?.get(id)?;

    if ctx.output.is_json() {
        ctx.output.json(&build);
        return Ok(());
    }

    ctx.output.header(&build.name);
    ctx.output.kv("id", build.id.as_str());
    if !build.description.is_empty() {
        ctx.output.kv("description", &build.description);
    }
    ctx.output.kv("status", &status_badge(build.status()));
    ctx.output.kv(
        "created",
        &build.created_at().format("%Y-%m-%d %H:%M").to_string(),
    );
    ctx.output.kv(
        "updated",
        &build.updated_at().format("%Y-%m-%d %H:%M").to_string(),
    );

    ctx.output.header("Components");
    print_selection(&ctx.output, build.selection(), ctx.config.pricing.currency);
    print_figures(
        &ctx.output,
        &build.stored_evaluation(),
        &build.markup(),
        ctx.config.pricing.currency,
    );
    Ok(())
}

fn update_selection(id: &BuildId, select: &[String], ctx: &Context) -> Result<()> {
    if select.is_empty() {
        bail!("No components given. Use --select with catalog ids.");
    }
    let selection = BuildSelection::from_catalog(&ctx.catalog()?, &component_ids(select))?;
    let (build, evaluation) = ctx.service()?.replace_selection(id, selection)?;

    if ctx.output.is_json() {
        ctx.output.json(&build);
        return Ok(());
    }

    ctx.output.success(&format!("Updated components of build {}", build.id));
    print_summary(&build, ctx);
    if !evaluation.is_compatible {
        ctx.output.issues(&evaluation.issues);
    }
    Ok(())
}

fn reprice_build(id: &BuildId, markup: &MarkupArgs, ctx: &Context) -> Result<()> {
    let Some(markup) = markup.markup()? else {
        bail!("No markup given. Use --markup-percent or --markup-fixed.");
    };
    let (build, _) = ctx.service()?.reprice(id, markup)?;

    if ctx.output.is_json() {
        ctx.output.json(&build);
        return Ok(());
    }

    ctx.output
        .success(&format!("Repriced build {} with markup {}", build.id, markup));
    print_summary(&build, ctx);
    Ok(())
}

fn publish_build(id: &BuildId, ctx: &Context) -> Result<()> {
    let build = ctx.service()?.publish(id)?;

    if ctx.output.is_json() {
        ctx.output.json(&build);
        return Ok(());
    }

    if !build.is_compatible() {
        ctx.output
            .warn("This build has compatibility issues. Run `pcforge build show` for details.");
    }
    ctx.output.success(&format!("Published build {}", build.id));
    Ok(())
}

fn archive_build(id: &BuildId, ctx: &Context) -> Result<()> {
    let build = ctx.service()?.archive(id)?;

    if ctx.output.is_json() {
        ctx.output.json(&build);
        return Ok(());
    }

    ctx.output.success(&format!("Archived build {}", build.id));
    Ok(())
}

fn delete_build(id: &BuildId, ctx: &Context) -> Result<()> {
    if !ctx.service()?.delete(id)? {
        bail!("Build not found: {}", id);
    }

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "deleted": id.as_str() }));
        return Ok(());
    }

    ctx.output.success(&format!("Deleted build {}", id));
    Ok(())
}

fn sell_build(id: &BuildId, customer: Customer, ctx: &Context) -> Result<()> {
    let order = ctx.service()?.sell(id, customer)?;

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }

    print_order(&order, ctx);
    Ok(())
}

fn print_summary(build: &PcBuild, ctx: &Context) {
    let currency = ctx.config.pricing.currency;
    ctx.output.kv("components", &format!("{}/8", build.selection().len()));
    ctx.output.kv("cost", &format_price(build.total_price() as i64, currency));
    ctx.output.kv("price", &format_price(build.final_price(), currency));
    ctx.output.kv("profit", &format_price(build.profit(), currency));
    ctx.output.kv(
        "compatible",
        if build.is_compatible() { "yes" } else { "no" },
    );
    ctx.output.debug(&format!("markup {}", build.markup()));
}

fn print_order(order: &SalesOrder, ctx: &Context) {
    ctx.output.success(&format!(
        "Sold build {} as order {}",
        order.build_id, order.order_number
    ));
    ctx.output.kv("customer", &order.customer.name);
    ctx.output.kv("phone", &order.customer.phone);
    if let Some(ref city) = order.customer.city {
        ctx.output.kv("city", city);
    }
    if let Some(ref email) = order.customer.email {
        ctx.output.kv("email", email);
    }
    ctx.output.kv("status", order.status.display_name());
    ctx.output.header("Items");
    for line in &order.lines {
        ctx.output.list_item(&format!(
            "{}: {} ({})",
            line.category.display_name(),
            line.name,
            line.unit_price
        ));
    }
    ctx.output.kv("total", &order.total.display());
}
