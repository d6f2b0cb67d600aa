//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    // Pricing section
    ctx.output.info("[pricing]");
    ctx.output.kv("currency", ctx.config.pricing.currency.code());
    ctx.output
        .kv("default_markup", &ctx.config.pricing.default_markup.to_string());

    // Catalog section
    ctx.output.info("[catalog]");
    match ctx.config.catalog.path {
        Some(ref path) => ctx
            .output
            .kv("path", &ctx.resolve_path(path).display().to_string()),
        None => ctx.output.kv("path", "(not set)"),
    }

    // Store section
    ctx.output.info("[store]");
    ctx.output.kv(
        "path",
        &ctx.resolve_path(&ctx.config.store.path).display().to_string(),
    );

    // Policy section
    let policy = &ctx.config.policy;
    ctx.output.info("[policy]");
    ctx.output
        .kv("reject_negative_price", &policy.reject_negative_price.to_string());
    ctx.output.kv(
        "allow_publish_incompatible",
        &policy.allow_publish_incompatible.to_string(),
    );
    ctx.output.kv(
        "require_published_for_sale",
        &policy.require_published_for_sale.to_string(),
    );

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("pcforge.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output
        .success(&format!("Created {}", config_path.display()));
    ctx.output
        .info("Point [catalog] path at your component catalog before creating builds.");
    Ok(())
}
