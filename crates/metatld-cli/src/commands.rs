use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use colored::Colorize;
use metatld_crypto::{MerkleError, MerkleTree, ProofPayload, ProofVerifier};
use metatld_store::{ArtifactStore, FsArtifactStore};
use metatld_types::{Digest, Tld};
use serde::Serialize;
use tracing::info;

use crate::cli::*;
use crate::config::CliConfig;
use crate::input::read_tld_list;

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.artifacts {
        config.store.dir = dir;
    }
    let format = cli.format;

    match cli.command {
        Command::Build(args) => {
            let report = cmd_build(&config, args)?;
            emit(format, &report, |r| {
                println!("{} Built tree over {} TLDs", "✓".green().bold(), r.leaf_count.to_string().bold());
                println!("  Height: {}", r.height);
                println!("  Root: {}", r.root.to_string().yellow());
            })?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Root(_) => {
            let root = cmd_root(&config)?;
            emit(format, &root, |r| println!("{}", r.root))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Prove(args) => {
            let output = args.output.clone();
            let payload = cmd_prove(&config, args)?;
            match output {
                Some(path) => {
                    let report = write_proof(&payload, &path)?;
                    emit(format, &report, |r| {
                        println!("{} Proof for {} written to {}", "✓".green().bold(), r.tld.yellow(), r.path.display());
                    })?;
                }
                None => println!("{}", payload.to_json_pretty()?),
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify(args) => {
            let report = cmd_verify(&config, args)?;
            emit(format, &report, |r| {
                if r.valid {
                    println!("{} {} is in the set committed to by {}", "✓".green().bold(), r.tld.yellow(), r.root.short_hex());
                } else {
                    println!("{} Proof for {} does not match root {}", "✗".red().bold(), r.tld.yellow(), r.root.short_hex());
                }
            })?;
            Ok(exit_code(report.valid))
        }
        Command::Check(args) => {
            let report = cmd_check(&config, args)?;
            emit(format, &report, |r| {
                if r.member {
                    println!("{} {} is authorized", "✓".green().bold(), r.tld.yellow());
                } else {
                    println!("{} {} is not authorized", "✗".red().bold(), r.tld.yellow());
                }
            })?;
            Ok(exit_code(report.member))
        }
    }
}

fn exit_code(ok: bool) -> ExitCode {
    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn emit<T: Serialize>(format: OutputFormat, value: &T, text: impl FnOnce(&T)) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => text(value),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

fn open_store(config: &CliConfig) -> FsArtifactStore {
    FsArtifactStore::new(config.store.clone())
}

fn load_tree(config: &CliConfig) -> anyhow::Result<MerkleTree> {
    let store = open_store(config);
    match store.load_verified_tree()? {
        Some(tree) => Ok(tree),
        None => bail!(
            "no tree artifact at {}; run `metatld build` first",
            store.tree_path().display()
        ),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildReport {
    pub leaf_count: usize,
    pub height: usize,
    pub root: Digest,
}

pub fn cmd_build(config: &CliConfig, args: BuildArgs) -> anyhow::Result<BuildReport> {
    let input = args.input.unwrap_or_else(|| config.input.clone());
    let tlds = read_tld_list(&input)?;
    let tree = MerkleTree::build(&tlds)
        .with_context(|| format!("building tree from {}", input.display()))?;
    let published = open_store(config).publish(&tree)?;
    info!(input = %input.display(), root = %published.root, "tree built");
    Ok(BuildReport {
        leaf_count: tree.leaf_count(),
        height: tree.height(),
        root: published.root,
    })
}

#[derive(Debug, Serialize)]
pub struct RootReport {
    pub root: Digest,
}

pub fn cmd_root(config: &CliConfig) -> anyhow::Result<RootReport> {
    let store = open_store(config);
    match store.load_root()? {
        Some(artifact) => Ok(RootReport { root: artifact.root }),
        None => bail!("no published root at {}", store.root_path().display()),
    }
}

pub fn cmd_prove(config: &CliConfig, args: ProveArgs) -> anyhow::Result<ProofPayload> {
    let tree = load_tree(config)?;
    let tld = Tld::parse(&args.tld)?;
    let proof = tree.prove(&tld)?;
    Ok(proof.to_payload(&tld, &tree.root()))
}

#[derive(Debug, Serialize)]
pub struct ProofWrittenReport {
    pub tld: String,
    pub path: PathBuf,
    pub root: String,
}

pub fn write_proof(payload: &ProofPayload, path: &Path) -> anyhow::Result<ProofWrittenReport> {
    let json = payload.to_json_pretty()?;
    std::fs::write(path, format!("{json}\n"))
        .with_context(|| format!("writing proof to {}", path.display()))?;
    info!(tld = %payload.tld, path = %path.display(), "proof written");
    Ok(ProofWrittenReport {
        tld: payload.tld.clone(),
        path: path.to_path_buf(),
        root: payload.root.clone(),
    })
}

#[derive(Debug, Serialize)]
pub struct VerifyReport {
    pub tld: String,
    pub root: Digest,
    pub valid: bool,
}

pub fn cmd_verify(config: &CliConfig, args: VerifyArgs) -> anyhow::Result<VerifyReport> {
    let text = std::fs::read_to_string(&args.proof)
        .with_context(|| format!("reading proof {}", args.proof.display()))?;
    let payload = ProofPayload::from_json(&text)?;

    let root = if let Some(hex) = &args.root {
        Digest::from_hex(hex).context("invalid --root")?
    } else if args.published {
        cmd_root(config)?.root
    } else {
        payload.decode_root()?
    };

    let valid = ProofVerifier::verify_payload_against(&payload, &root)?;
    Ok(VerifyReport {
        tld: payload.decode_tld()?.to_string(),
        root,
        valid,
    })
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub tld: String,
    pub member: bool,
    pub root: Digest,
}

pub fn cmd_check(config: &CliConfig, args: CheckArgs) -> anyhow::Result<CheckReport> {
    let tree = load_tree(config)?;
    let tld = Tld::parse(&args.tld)?;
    let root = tree.root();
    let member = match tree.prove(&tld) {
        Ok(proof) => ProofVerifier::verify(&tld, &proof, &root),
        Err(MerkleError::LeafNotFound { .. }) => false,
        Err(e) => return Err(e.into()),
    };
    Ok(CheckReport {
        tld: tld.to_string(),
        member,
        root,
    })
}
