pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, RenderArgs, ShowArgs};
pub use handlers::{handle_formats, handle_render, handle_show};
pub use output::{OutputFormat, OutputFormatter};
