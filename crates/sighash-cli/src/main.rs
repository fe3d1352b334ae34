use anyhow::{bail, Result};
use clap::Parser;
use sighash::{analyze, AnalysisNote, AnalyzeOptions, HashAlgorithm, NormalizeOptions, VisibleOrProtected};
use sighash_frontend_json::load_model;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sighash",
    version,
    about = "Structural fingerprints of exported Java source models"
)]
struct Cli {
    /// Directories of exported model documents to fingerprint
    #[arg(required = true, value_name = "ROOT")]
    roots: Vec<PathBuf>,

    /// Include normalized method bodies and their transitive call closure
    #[arg(short = 'd', long)]
    deep: bool,

    /// Directories of class-path model documents (resolvable, not hashed)
    #[arg(long = "class-path", visible_alias = "cp", value_name = "DIR")]
    class_path: Vec<PathBuf>,

    /// Digest algorithm
    #[arg(long, default_value_t = HashAlgorithm::Sha512)]
    algorithm: HashAlgorithm,

    /// Ceiling on nested closure expansions per body
    #[arg(long, default_value_t = 128)]
    max_closure_depth: usize,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    for root in cli.roots.iter().chain(&cli.class_path) {
        if !root.is_dir() {
            bail!("not a directory: {}", root.display());
        }
    }

    let model = load_model(&cli.roots, &cli.class_path)?;
    let analysis = analyze(
        &model,
        &VisibleOrProtected,
        AnalyzeOptions {
            normalize: NormalizeOptions {
                max_closure_depth: cli.max_closure_depth,
            },
        },
    );
    for note in &analysis.notes {
        match note {
            AnalysisNote::Frontend(diagnostic) => {
                tracing::warn!(
                    target: "sighash.cli",
                    message = %diagnostic.message,
                    path = diagnostic.path.as_deref().unwrap_or("<unknown>"),
                    "front-end diagnostic"
                );
            }
            AnalysisNote::DrilldownFailed {
                type_name,
                member_name,
                error,
            } => {
                tracing::warn!(
                    target: "sighash.cli",
                    type_name = %type_name,
                    member = %member_name,
                    error = %error,
                    "member hashed without body"
                );
            }
        }
    }

    let digest = analysis.tree.hash(cli.algorithm, cli.deep);
    println!("{digest}");
    Ok(())
}
