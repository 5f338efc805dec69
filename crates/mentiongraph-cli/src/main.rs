use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use mentiongraph_core::io::read_graph;
use mentiongraph_core::{
    JournalSource, Pipeline, PipelineConfig, TrailingSeparatorRepair, repair_file, summarize,
};

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "mentiongraph",
    about = "Build a drug mention graph from PubMed articles and clinical trials",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format (for scripts).
    /// Also enabled by setting MENTIONGRAPH_JSON=1.
    #[arg(long, global = true)]
    json: bool,

    /// Config file (defaults to MENTIONGRAPH_CONFIG or ~/.config/mentiongraph/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging. RUST_LOG takes precedence when set.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the whole pipeline and write the graph.
    Run {
        /// Directory holding the input files.
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Where to write the graph.
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, value_enum)]
        journal_source: Option<JournalSourceArg>,
        /// Match drugs in parallel.
        #[arg(long)]
        parallel: bool,
    },

    /// Remove a trailing separator before the closing line of a JSON export, in place.
    Repair { file: PathBuf },

    /// Summarize a graph file: mentions per drug and the top journal.
    Summary { graph: PathBuf },

    /// Config management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config file path.
    Path,
    /// Show the effective config.
    Show,
    /// Write the default config to the config path.
    Init {
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum JournalSourceArg {
    /// Journal of the article at the same row (reference output).
    ArticleRow,
    /// Journal of the matching record.
    OwnRecord,
}

impl From<JournalSourceArg> for JournalSource {
    fn from(arg: JournalSourceArg) -> Self {
        match arg {
            JournalSourceArg::ArticleRow => JournalSource::ArticleRow,
            JournalSourceArg::OwnRecord => JournalSource::OwnRecord,
        }
    }
}

// ─── Main ────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let start = Instant::now();
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let json_output = cli.json || std::env::var("MENTIONGRAPH_JSON").as_deref() == Ok("1");
    let config_path = cli.config.clone().unwrap_or_else(PipelineConfig::config_path);

    let mut config = PipelineConfig::load_from(&config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;
    if let Ok(dir) = std::env::var("MENTIONGRAPH_DATA_DIR") {
        config.set_data_dir(dir.into());
    }
    debug!(
        "config loaded from {} in {:.1}ms",
        config_path.display(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    match cli.command {
        Commands::Run {
            data_dir,
            output,
            journal_source,
            parallel,
        } => {
            if let Some(dir) = data_dir {
                config.set_data_dir(dir);
            }
            if let Some(path) = output {
                config.output.graph_path = path;
            }
            if let Some(source) = journal_source {
                config.matching.journal_source = source.into();
            }
            config.matching.parallel |= parallel;

            let graph_path = config.graph_path();
            let result = Pipeline::new(config).run_and_write()?;
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": { "graph": graph_path, "stats": result.stats },
                    "meta": { "duration_ms": dur }
                }))?;
            } else {
                let stats = &result.stats;
                println!(
                    "{} drugs ({} with mentions), {} mentions from {} articles and {} trials",
                    stats.drugs, stats.drugs_with_mentions, stats.mentions, stats.articles, stats.trials
                );
                println!("Graph written to {}", graph_path.display());
            }
        }

        Commands::Repair { file } => {
            let changed = repair_file(&file, &TrailingSeparatorRepair::new())
                .with_context(|| format!("Failed to repair {}", file.display()))?;
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": { "file": file, "changed": changed },
                    "meta": { "duration_ms": dur }
                }))?;
            } else if changed {
                println!("Repaired {}", file.display());
            } else {
                println!("{} needs no repair", file.display());
            }
        }

        Commands::Summary { graph } => {
            let loaded = read_graph(&graph)
                .with_context(|| format!("Failed to read graph {}", graph.display()))?;
            let summary = summarize(&loaded);
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": summary,
                    "meta": { "duration_ms": dur }
                }))?;
            } else {
                for drug in &summary.drugs {
                    println!(
                        "{name:<20}  {count:>4}  {journals}",
                        name = drug.drug,
                        count = drug.mentions,
                        journals = drug.journals.join("; ")
                    );
                }
                println!("Total mentions: {}", summary.total_mentions);
                if summary.top_journals.is_empty() {
                    println!("No journal mentions any drug.");
                } else {
                    println!(
                        "Top journal(s), {} distinct drugs: {}",
                        summary.top_journal_drug_count,
                        summary.top_journals.join(", ")
                    );
                }
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::Path => {
                if json_output {
                    print_json(&serde_json::json!({"status":"ok","data":{"path":config_path}}))?;
                } else {
                    println!("{}", config_path.display());
                }
            }
            ConfigAction::Show => {
                if json_output {
                    print_json(&serde_json::json!({"status":"ok","data":config}))?;
                } else {
                    print!("{}", config.to_toml_string()?);
                }
            }
            ConfigAction::Init { force } => {
                if config_path.exists() && !force {
                    anyhow::bail!(
                        "{} already exists, pass --force to overwrite",
                        config_path.display()
                    );
                }
                PipelineConfig::default().save_to(&config_path)?;
                if json_output {
                    print_json(&serde_json::json!({"status":"ok","data":{"path":config_path}}))?;
                } else {
                    println!("Wrote default config to {}", config_path.display());
                }
            }
        },
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json(val: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(val)?);
    Ok(())
}
