mod registry;

use std::collections::HashMap;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::info;

use registry::ProviderRegistry;
use rowforge_core::{ColumnSpec, Describe, Error as CoreError, Provider, ProviderFormats, parse_form};
use rowforge_dict::{DictError, Dictionary};
use rowforge_generate::{GenerationError, Generator};
use rowforge_provider::{PostgresProvider, ProviderConfig};

#[derive(Debug, Error)]
enum CliError {
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("dictionary error: {0}")]
    Dict(#[from] DictError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("unable to read spec file {path}: {reason}")]
    SpecFile { path: String, reason: String },
}

#[derive(Parser, Debug)]
#[command(name = "rowforge", version, about = "Synthetic SQL row generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a JSON dictionary interchange file into a binary artifact.
    BuildDict(BuildDictArgs),
    /// Generate INSERT statements for a table from column specifications.
    Generate(GenerateArgs),
    /// Print live column metadata for a table using a configured provider.
    Describe(DescribeArgs),
}

#[derive(Args, Debug)]
struct BuildDictArgs {
    /// JSON interchange document with category sample lists.
    #[arg(long)]
    source: PathBuf,
    /// Destination path for the binary artifact.
    #[arg(long)]
    artifact: PathBuf,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Binary dictionary artifact produced by build-dict.
    #[arg(long)]
    artifact: PathBuf,
    /// Target table name.
    #[arg(long)]
    table: String,
    /// TOML file mapping column keys to column specifications.
    #[arg(long, conflicts_with = "field")]
    spec: Option<PathBuf>,
    /// Request-form field in `key=value` form (repeatable), e.g.
    /// `name-c1=city`, `regex-c1=@city`, `include-c1=on`.
    #[arg(long, value_name = "KEY=VALUE")]
    field: Vec<String>,
    /// Provider config supplying the dialect's date layouts. Defaults to
    /// ISO-style layouts when omitted; no database connection is made.
    #[arg(long, conflicts_with = "describe_config")]
    formats_config: Option<PathBuf>,
    /// Provider config used to seed column specifications from the table's
    /// live metadata instead of --spec/--field. Connects to the database.
    #[arg(long, conflicts_with_all = ["spec", "field"])]
    describe_config: Option<PathBuf>,
    /// Generation tag for a described column, `column=@tag` (repeatable;
    /// only meaningful with --describe-config). Untagged columns echo
    /// their name.
    #[arg(long, value_name = "COLUMN=TAG", requires = "describe_config")]
    tag: Vec<String>,
    /// Number of rows to generate.
    #[arg(long, default_value_t = 1)]
    rows: u64,
    /// Base seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct DescribeArgs {
    /// Provider config file(s); each becomes a registry entry.
    #[arg(long, value_name = "CONFIG", required = true)]
    config: Vec<PathBuf>,
    /// Provider name to use; defaults to the sole registered provider.
    #[arg(long)]
    source: Option<String>,
    /// Table to describe.
    #[arg(long)]
    table: String,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::BuildDict(args) => run_build_dict(args),
        Command::Generate(args) => run_generate(args).await,
        Command::Describe(args) => run_describe(args).await,
    }
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run_build_dict(args: BuildDictArgs) -> Result<(), CliError> {
    rowforge_dict::build(&args.source, &args.artifact)?;
    info!(
        source = %args.source.display(),
        artifact = %args.artifact.display(),
        "dictionary artifact written"
    );
    Ok(())
}

async fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let (specs, formats) = if let Some(path) = &args.describe_config {
        let provider = PostgresProvider::new(path).await?;
        let columns = provider.describe(&args.table).await?;
        let formats = ProviderFormats {
            date_format: provider.date_format().to_string(),
            date_time_format: provider.date_time_format().to_string(),
        };
        (specs_from_describe(&columns, &parse_tags(&args.tag)?), formats)
    } else {
        let formats = match &args.formats_config {
            Some(path) => ProviderConfig::read(path)?.formats,
            None => ProviderFormats::default(),
        };
        (load_specs(&args)?, formats)
    };
    if specs.is_empty() {
        return Err(CliError::InvalidArgs(
            "no column specifications supplied; use --spec, --field or --describe-config"
                .to_string(),
        ));
    }

    let dictionary = Dictionary::load(&args.artifact)?;

    let generator = match args.seed {
        Some(seed) => Generator::with_seed(dictionary, formats, seed),
        None => Generator::new(dictionary, formats),
    };

    for _ in 0..args.rows {
        println!("{}", generator.query(&args.table, &specs)?);
    }
    info!(table = %args.table, rows = args.rows, "generation finished");
    Ok(())
}

fn load_specs(args: &GenerateArgs) -> Result<HashMap<String, ColumnSpec>, CliError> {
    if let Some(path) = &args.spec {
        let contents = std::fs::read_to_string(path).map_err(|err| CliError::SpecFile {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        return toml::from_str(&contents).map_err(|err| CliError::SpecFile {
            path: path.display().to_string(),
            reason: err.to_string(),
        });
    }

    let mut form = HashMap::new();
    for field in &args.field {
        let (key, value) = field.split_once('=').ok_or_else(|| {
            CliError::InvalidArgs(format!("field '{field}' is not in key=value form"))
        })?;
        form.insert(key.to_string(), value.to_string());
    }
    Ok(parse_form(&form)?)
}

fn parse_tags(pairs: &[String]) -> Result<HashMap<String, String>, CliError> {
    let mut tags = HashMap::new();
    for pair in pairs {
        let (column, tag) = pair.split_once('=').ok_or_else(|| {
            CliError::InvalidArgs(format!("tag '{pair}' is not in column=tag form"))
        })?;
        tags.insert(column.to_string(), tag.to_string());
    }
    Ok(tags)
}

/// Seed column specifications from live table metadata, one per described
/// column in ordinal order, applying any caller-supplied tags.
fn specs_from_describe(
    columns: &[Describe],
    tags: &HashMap<String, String>,
) -> HashMap<String, ColumnSpec> {
    columns
        .iter()
        .enumerate()
        .map(|(position, column)| {
            let mut spec = ColumnSpec::from_describe(column, position as i32);
            spec.tag = tags.get(&column.column_name).cloned();
            (column.column_name.clone(), spec)
        })
        .collect()
}

async fn run_describe(args: DescribeArgs) -> Result<(), CliError> {
    let registry = ProviderRegistry::from_configs(&args.config).await;
    if registry.is_empty() {
        return Err(CliError::InvalidArgs(
            "no provider could be constructed from the given configs".to_string(),
        ));
    }

    let provider = match &args.source {
        Some(name) => registry.get(name).ok_or_else(|| {
            CliError::InvalidArgs(format!(
                "data source not found: {name} (available: {})",
                registry.names().join(", ")
            ))
        })?,
        None => registry.sole().ok_or_else(|| {
            CliError::InvalidArgs(format!(
                "multiple providers registered, pick one with --source (available: {})",
                registry.names().join(", ")
            ))
        })?,
    };

    let columns = provider.describe(&args.table).await?;
    println!("-- {} ({} columns)", args.table, columns.len());
    for column in columns {
        println!(
            "{}\t{}\tlength={}\tprecision={}\tnullable={}",
            column.column_name,
            column.column_type,
            column.column_length,
            column.column_precision,
            column.nullable
        );
    }
    Ok(())
}
