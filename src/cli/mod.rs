//! CLI entry point for dynamic-agent.

pub mod tools;

use clap::{Parser, Subcommand};

/// Inspect and exercise session tool configurations.
#[derive(Parser, Debug)]
#[command(name = "dynamic-agent", version, about = "Config-driven voice agent tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile the configured tools and print their schemas
    Tools(ToolsArgs),
    /// Invoke one configured tool once and print its result
    Call(CallArgs),
}

/// Arguments for `dynamic-agent tools`.
#[derive(Parser, Debug)]
pub struct ToolsArgs {
    /// Session metadata as inline JSON, or `@path` to read it from a file
    #[arg(short, long)]
    pub metadata: String,
}

/// Arguments for `dynamic-agent call`.
#[derive(Parser, Debug)]
pub struct CallArgs {
    /// Session metadata as inline JSON, or `@path` to read it from a file
    #[arg(short, long)]
    pub metadata: String,

    /// Name of the tool to invoke
    #[arg(short, long)]
    pub tool: String,

    /// Tool arguments as a JSON object
    #[arg(short, long, default_value = "{}")]
    pub args: String,
}
