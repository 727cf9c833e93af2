use agegraph::{
    agtype::{decode, RawValue},
    config,
    graph_output::{extract_json_rows, ExtractOptions},
    query_wrapper::{infer_return_columns, wrap_cypher_query},
};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;

/// agegraph - decode Apache AGE query results into graph data
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// YAML configuration file (AGEGRAPH_* environment variables otherwise)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print compact JSON
    #[arg(long, global = true)]
    compact: bool,

    /// Do not synthesize placeholder nodes for missing edge endpoints
    #[arg(long, global = true)]
    no_placeholders: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract nodes, edges and paths from a JSON array of result rows
    Extract {
        /// Input file (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Decode a single agtype value (JSON or agtype text)
    Decode {
        /// Input file (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Print the inferred RETURN column names of a Cypher query
    Columns { query: String },
    /// Print the SQL that wraps a Cypher query in AGE's cypher() call
    Wrap {
        query: String,

        /// Graph name (overrides configuration)
        #[arg(long)]
        graph: Option<String>,
    },
}

fn main() {
    // Initialize logger - defaults to INFO level, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut app_config = match &cli.config {
        Some(path) => config::AppConfig::from_yaml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => config::AppConfig::from_env().context("reading AGEGRAPH_* environment")?,
    };

    let graph_override = match &cli.command {
        Command::Wrap { graph, .. } => graph.clone(),
        _ => None,
    };
    app_config
        .apply_cli(config::CliConfig {
            graph_name: graph_override,
            compact: cli.compact,
            no_placeholders: cli.no_placeholders,
        })
        .context("invalid command line options")?;

    match cli.command {
        Command::Extract { input } => {
            let text = read_input(input.as_ref())?;
            let rows: Value = serde_json::from_str(&text).context("input is not valid JSON")?;
            let Value::Array(rows) = rows else {
                bail!("expected a JSON array of row objects");
            };
            log::info!("Extracting graph elements from {} rows", rows.len());
            let result = extract_json_rows(&rows, ExtractOptions::from(&app_config));
            print_json(&result, app_config.pretty_output)
        }
        Command::Decode { input } => {
            let text = read_input(input.as_ref())?;
            // Anything that is not JSON is treated as agtype text
            let raw = serde_json::from_str::<Value>(&text)
                .unwrap_or_else(|_| Value::String(text.trim().to_string()));
            print_json(&decode(RawValue::Json(raw)), app_config.pretty_output)
        }
        Command::Columns { query } => {
            if query.trim().is_empty() {
                bail!("query text is empty");
            }
            for column in infer_return_columns(&query) {
                println!("{}", column);
            }
            Ok(())
        }
        Command::Wrap { query, .. } => {
            let wrapped = wrap_cypher_query(&app_config.graph_name, &query)?;
            log::info!("Declared columns: {}", wrapped.columns.join(", "));
            println!("{}", wrapped.sql);
            Ok(())
        }
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading stdin")?;
            Ok(buffer)
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", rendered);
    Ok(())
}
