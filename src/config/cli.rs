use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the weft binary.
#[derive(Debug, Parser)]
#[command(name = "weft", version, about = "Serve and render weft component pages")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "WEFT_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Serve the demo page and the global stylesheet over HTTP.
    Serve(Box<ServeArgs>),
    /// Render the demo page once and write the HTML out.
    Render(RenderArgs),
    /// Print the global stylesheet of the demo components.
    Stylesheet(StylesheetArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    #[command(flatten)]
    pub page: PageOverrides,

    /// Override the listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the listener port.
    #[arg(long = "server-port", value_name = "PORT")]
    pub server_port: Option<u16>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Override the path the global stylesheet is served from.
    #[arg(long = "stylesheet-path", value_name = "PATH")]
    pub stylesheet_path: Option<String>,

    /// Toggle the global stylesheet; when off, pages carry inline `<style>` elements.
    #[arg(
        long = "stylesheet",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub stylesheet_enabled: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct PageOverrides {
    /// Override how many cards the demo page renders.
    #[arg(long = "page-cards", value_name = "COUNT")]
    pub cards: Option<u32>,

    /// Override the demo page title.
    #[arg(long = "page-title", value_name = "TITLE")]
    pub title: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub page: PageOverrides,

    /// Write the HTML to this file instead of stdout.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct StylesheetArgs {
    /// Write the stylesheet to this file instead of stdout.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}
