use super::output::OutputFormat;
use crate::format::ContainerFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Render HPC container recipes from composable building blocks
#[derive(Parser, Debug)]
#[command(
    name = "recipebox",
    about = "Render HPC container recipes from composable building blocks",
    version,
    long_about = "recipebox reads a YAML recipe of stages and building blocks and renders \
                  it as a Dockerfile or a Singularity definition file."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Render a recipe file",
        long_about = "Renders every stage of a recipe file in the chosen container format.\n\n\
                      Examples:\n  \
                      recipebox render recipe.yaml\n  \
                      recipebox render recipe.yaml --format singularity\n  \
                      recipebox render recipe.yaml -o Dockerfile"
    )]
    Render(RenderArgs),

    #[command(
        about = "Print a recipe with all defaults applied",
        long_about = "Parses a recipe file and prints it back with every block option filled in.\n\n\
                      Examples:\n  \
                      recipebox show recipe.yaml\n  \
                      recipebox show recipe.yaml --output-format json"
    )]
    Show(ShowArgs),

    #[command(about = "List supported output formats")]
    Formats,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    #[arg(value_name = "RECIPE", help = "Path to the YAML recipe file")]
    pub recipe: PathBuf,

    #[arg(long, value_enum, default_value = "yaml", help = "Serialization format")]
    pub output_format: OutputFormat,
}

#[derive(Parser, Debug, Clone)]
pub struct RenderArgs {
    #[arg(value_name = "RECIPE", help = "Path to the YAML recipe file")]
    pub recipe: PathBuf,

    #[arg(
        short = 'f',
        long,
        value_parser = parse_format,
        help = "Output format (docker|singularity); defaults to RECIPEBOX_FORMAT or docker"
    )]
    pub format: Option<ContainerFormat>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Skip blocks with invalid configuration instead of failing")]
    pub skip_failed: bool,
}

fn parse_format(s: &str) -> Result<ContainerFormat, String> {
    ContainerFormat::from_name(s).ok_or_else(|| {
        format!(
            "Unsupported format '{}'. Valid options: docker, singularity",
            s
        )
    })
}
