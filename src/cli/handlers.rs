use super::commands::{RenderArgs, ShowArgs};
use super::output::OutputFormatter;
use crate::config::RecipeboxConfig;
use crate::format::ContainerFormat;
use crate::recipe::Recipe;
use crate::render::Renderable;
use anyhow::{Context, Result};
use std::fs;
use tracing::{debug, error, info};

pub fn handle_render(args: &RenderArgs) -> i32 {
    match run_render(args) {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

fn run_render(args: &RenderArgs) -> Result<()> {
    let default_config = RecipeboxConfig::default();
    let config = RecipeboxConfig {
        format: args.format.clone().unwrap_or(default_config.format),
        skip_failed: args.skip_failed || default_config.skip_failed,
        ..default_config
    };
    config.validate().context("Invalid configuration")?;
    debug!("{}", config);

    let recipe = Recipe::load(&args.recipe)
        .with_context(|| format!("Failed to load recipe {}", args.recipe.display()))?;
    let instructions = recipe.build().context("Failed to assemble recipe")?;

    let mut rendered = if config.skip_failed {
        instructions.render_lenient(&config.format)
    } else {
        instructions
            .render(&config.format)
            .context("Failed to render recipe")?
    };
    if !rendered.is_empty() {
        rendered.push('\n');
    }

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), format = %config.format, "Recipe written");
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

pub fn handle_show(args: &ShowArgs) -> i32 {
    match run_show(args) {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

fn run_show(args: &ShowArgs) -> Result<()> {
    let recipe = Recipe::load(&args.recipe)
        .with_context(|| format!("Failed to load recipe {}", args.recipe.display()))?;
    let output = OutputFormatter::new(args.output_format).format_recipe(&recipe)?;
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

pub fn handle_formats() -> i32 {
    for format in ContainerFormat::all_variants() {
        println!("{}", format.name().to_lowercase());
    }
    0
}
