use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "kvini",
    about = "Inspect, edit, and compare INI configuration files",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Strip surrounding quote characters from parsed values
    #[arg(long, global = true)]
    pub trim_quotes: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ValueType {
    String,
    Int,
    Float,
    Bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the value of a key
    Get(GetArgs),
    /// Set a key and rewrite the file
    Set(SetArgs),
    /// Remove a key and rewrite the file
    Unset(UnsetArgs),
    /// List section names
    Sections(FileArgs),
    /// Print the file in normalized form
    Fmt(FileArgs),
    /// Show differences between two files
    Diff(DiffArgs),
}

#[derive(Args)]
pub struct GetArgs {
    pub file: PathBuf,
    pub key: String,
    /// Section to read from (default section when omitted)
    #[arg(short, long, default_value = "")]
    pub section: String,
    #[arg(long = "as", default_value = "string")]
    pub value_type: ValueType,
}

#[derive(Args)]
pub struct SetArgs {
    pub file: PathBuf,
    pub key: String,
    pub value: String,
    #[arg(short, long, default_value = "")]
    pub section: String,
}

#[derive(Args)]
pub struct UnsetArgs {
    pub file: PathBuf,
    pub key: String,
    #[arg(short, long, default_value = "")]
    pub section: String,
}

#[derive(Args)]
pub struct FileArgs {
    pub file: PathBuf,
}

#[derive(Args)]
pub struct DiffArgs {
    pub a: PathBuf,
    pub b: PathBuf,
}
