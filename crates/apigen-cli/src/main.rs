mod fetch;
mod output;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use log::{info, warn};

use apigen_axios_client::{AxiosClientGenerator, Generation};
use apigen_core::config::{self, ApigenConfig, CONFIG_FILE_NAME};
use apigen_core::ir::{IrSchema, IrSpec};
use apigen_core::parse::{self, spec::Document};
use apigen_core::transform::{self, UsedTypes, usage::expand_transitive};

#[derive(Parser)]
#[command(
    name = "apigen",
    about = "Generate a TypeScript axios client from an OpenAPI or Swagger document",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the client into the output directory
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        /// Output directory for the generated files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Skip running prettier over the output
        #[arg(long)]
        no_format: bool,
    },

    /// Summarize what would be generated from a document
    Inspect {
        #[command(flatten)]
        source: SourceArgs,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new apigen configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Where the document comes from.
#[derive(Args, Default)]
struct SourceArgs {
    /// Base URL of the API serving the document
    #[arg(short = 'u', long)]
    api_url: Option<String>,

    /// Path of the document relative to the API URL
    #[arg(short, long)]
    swagger_path: Option<String>,

    /// Local document (YAML or JSON) to read instead of fetching
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Config file to load instead of `.apigen.yaml`
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            source,
            output_dir,
            no_format,
        } => {
            let mut cfg = resolve_config(&source, |k| std::env::var(k).ok())?;
            if let Some(dir) = output_dir {
                cfg.output_dir = dir;
            }
            if no_format {
                cfg.format = false;
            }
            cmd_generate(&cfg).await
        }

        Commands::Inspect { source, format } => {
            let cfg = resolve_config(&source, |k| std::env::var(k).ok())?;
            cmd_inspect(&cfg, format).await
        }

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "apigen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Layer defaults, the config file, the environment and the flags, in
/// that order.
fn resolve_config<F>(source: &SourceArgs, lookup: F) -> Result<ApigenConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = match source.config {
        Some(ref path) => config::load_config(path)?
            .with_context(|| format!("config file {} not found", path.display()))?,
        None => config::load_config(Path::new(CONFIG_FILE_NAME))?.unwrap_or_default(),
    };
    cfg.apply_env(lookup);

    if let Some(ref url) = source.api_url {
        cfg.api_url = url.clone();
    }
    if let Some(ref path) = source.swagger_path {
        cfg.swagger_path = path.clone();
    }
    if let Some(ref input) = source.input {
        cfg.input = Some(input.clone());
    }
    Ok(cfg)
}

/// Read the local input or fetch the remote document, then parse it.
async fn load_document(cfg: &ApigenConfig) -> Result<Document> {
    match cfg.input {
        Some(ref path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
            let doc = match ext {
                "yaml" | "yml" => parse::from_yaml(&content)?,
                _ => parse::from_json(&content)?,
            };
            Ok(doc)
        }
        None => {
            let url = cfg.document_url();
            eprintln!("Fetching {url}");
            let body = fetch::fetch_document(&url).await?;
            let doc = parse::from_any(&body)
                .with_context(|| format!("failed to parse document from {url}"))?;
            Ok(doc)
        }
    }
}

async fn load_ir(cfg: &ApigenConfig) -> Result<IrSpec> {
    let doc = load_document(cfg).await?;
    info!(
        "loaded {} document with {} definitions",
        doc.version(),
        doc.definitions().len()
    );
    Ok(transform::transform(&doc, &cfg.source()))
}

/// Render the client. `generate` writes the files; `inspect` reports the same
/// import decisions.
fn render(ir: &IrSpec, cfg: &ApigenConfig) -> Result<Generation> {
    let generation = AxiosClientGenerator
        .run(ir, &cfg.client)
        .context("failed to render the client")?;
    Ok(generation)
}

async fn cmd_generate(cfg: &ApigenConfig) -> Result<()> {
    let ir = load_ir(cfg).await?;

    eprintln!("Generating client → {}", cfg.output_dir.display());
    let generation = render(&ir, cfg)?;

    output::write_files(&cfg.output_dir, &generation.files)?;

    if cfg.format {
        output::try_run_prettier(&cfg.output_dir, &generation.files);
    }

    if !generation.skipped_types.is_empty() {
        warn!(
            "{} referenced types have no definition: {}",
            generation.skipped_types.len(),
            generation.skipped_types.join(", ")
        );
    }

    eprintln!(
        "Generated {} files in {} ({} types imported, {} operations)",
        generation.files.len(),
        cfg.output_dir.display(),
        generation.imported_types.len(),
        ir.operations.len()
    );
    Ok(())
}

async fn cmd_inspect(cfg: &ApigenConfig, format: InspectFormat) -> Result<()> {
    let ir = load_ir(cfg).await?;
    let generation = render(&ir, cfg)?;
    let summary = build_inspect_summary(&ir, &generation, &cfg.namespace);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(
    ir: &IrSpec,
    generation: &Generation,
    namespace: &str,
) -> serde_json::Value {
    let schemas: Vec<serde_json::Value> = ir
        .schemas
        .iter()
        .map(|s| {
            serde_json::json!({
                "name": s.name().pascal_case,
                "kind": match s {
                    IrSchema::Interface(_) => "interface",
                    IrSchema::Open(_) => "open",
                },
            })
        })
        .collect();

    let operations: Vec<serde_json::Value> = ir
        .operations
        .iter()
        .map(|op| {
            serde_json::json!({
                "name": op.name,
                "method": op.method.as_str(),
                "path": op.path,
                "parameters": op.parameters.iter().map(|p| &p.name).collect::<Vec<_>>(),
                "body": op.request_body.as_ref().map(|b| &b.param_name),
            })
        })
        .collect();

    let imported: UsedTypes = generation.imported_types.iter().cloned().collect();
    let closure = expand_transitive(&imported, &ir.definitions);
    let reachable: Vec<&str> = closure.iter().collect();

    serde_json::json!({
        "namespace": namespace,
        "source": ir.source,
        "info": {
            "title": ir.info.title,
            "version": ir.info.version,
        },
        "schemas": schemas,
        "operations": operations,
        "used_types": generation.imported_types,
        "skipped_types": generation.skipped_types,
        "reachable_types": reachable,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
