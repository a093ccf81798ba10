use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "metatld",
    about = "MetaTLD — Merkle membership proofs for authorized TLDs",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file (defaults to ./metatld.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the root and tree artifacts
    #[arg(long, global = true)]
    pub artifacts: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the tree from the TLD list and publish its artifacts
    Build(BuildArgs),
    /// Show the published root
    Root(RootArgs),
    /// Emit an inclusion proof for a TLD
    Prove(ProveArgs),
    /// Verify a proof payload
    Verify(VerifyArgs),
    /// Check whether a TLD is in the authorized set
    Check(CheckArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// TLD list: a JSON array of strings or one TLD per line
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

#[derive(Args)]
pub struct RootArgs {}

#[derive(Args)]
pub struct ProveArgs {
    pub tld: String,
    /// Write the payload to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct VerifyArgs {
    /// Proof payload file
    #[arg(short, long)]
    pub proof: PathBuf,
    /// Trusted root (hex); overrides the root inside the payload
    #[arg(long, conflicts_with = "published")]
    pub root: Option<String>,
    /// Use the locally published root as the trusted root
    #[arg(long)]
    pub published: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    pub tld: String,
}
