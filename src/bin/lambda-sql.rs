//! lambda-sql: render query documents to SQL
//!
//! # Usage
//!
//! ```bash
//! # Render a document
//! lambda-sql render orders.toml
//!
//! # Fail on anything without an SQL rule
//! lambda-sql render orders.json --strict --require-filter
//!
//! # Show how a document is interpreted
//! lambda-sql explain orders.toml
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use lambda_sql::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lambda-sql")]
#[command(version)]
#[command(about = "Render typed query documents to a single SQL SELECT", long_about = None)]
#[command(after_help = "EXAMPLES:
    lambda-sql render orders.toml
    lambda-sql render orders.json --strict
    lambda-sql explain orders.toml --legacy-spacing")]
struct Cli {
    /// Configuration file (defaults to <config dir>/lambda-sql/config.toml)
    #[arg(long, global = true, env = "LAMBDA_SQL_CONFIG")]
    config: Option<PathBuf>,

    /// Fail on expressions or operators with no SQL rendering
    #[arg(long, global = true)]
    strict: bool,

    /// Refuse to render a statement without a WHERE clause
    #[arg(long, global = true)]
    require_filter: bool,

    /// Join clauses exactly as older releases did, empty ones included
    #[arg(long, global = true)]
    legacy_spacing: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a query document to SQL
    Render {
        /// TOML or JSON query document
        file: PathBuf,
    },
    /// Show the entity, clauses and SQL of a query document
    Explain {
        /// TOML or JSON query document
        file: PathBuf,
    },
    /// Show the operator token table
    Operators,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Render { file } => render_document(file, &cli),
        Commands::Explain { file } => explain_document(file, &cli),
        Commands::Operators => {
            show_operators();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "lambda_sql=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// File configuration, with command-line flags switched on over it.
fn render_options(cli: &Cli) -> anyhow::Result<RenderOptions> {
    let config = Config::discover(cli.config.as_deref()).context("loading configuration")?;
    let base = config.render;
    Ok(base
        .with_strict(base.strict || cli.strict)
        .with_require_filter(base.require_filter || cli.require_filter)
        .with_legacy_spacing(base.legacy_spacing || cli.legacy_spacing))
}

fn load_document(file: &Path) -> anyhow::Result<QueryDocument> {
    QueryDocument::load(file).with_context(|| format!("reading {}", file.display()))
}

fn render_document(file: &Path, cli: &Cli) -> anyhow::Result<()> {
    let options = render_options(cli)?;
    let doc = load_document(file)?;

    if cli.verbose {
        eprintln!("{} {}", "Input:".dimmed(), file.display().to_string().yellow());
        eprintln!("{} {:?}", "Options:".dimmed(), options);
    }

    let sql = doc.builder().render(&options)?;
    println!("{}", sql);
    Ok(())
}

fn explain_document(file: &Path, cli: &Cli) -> anyhow::Result<()> {
    let options = render_options(cli)?;
    let doc = load_document(file)?;
    let builder = doc.builder();
    let meta = builder.metadata();

    println!("{}", "Query Explanation".cyan().bold());
    println!();
    println!("{} {}", "Document:".dimmed(), file.display().to_string().yellow());
    println!();

    println!("{}", "Entity:".green().bold());
    println!("  {} {}", "Table:".dimmed(), meta.table().white());
    println!("  {} {}", "Fields:".dimmed(), meta.queryable_fields().join(", ").white());
    if let Some(primary) = meta.primary_field() {
        println!("  {} {}", "Primary:".dimmed(), primary.cyan());
    }

    let spec = builder.spec();
    println!();
    println!("{}", "Clauses:".green().bold());
    println!("  {} {}", "Projection:".dimmed(), builder.projection_fields().join(", ").white());
    let lists = [
        ("Group by:", &spec.group_by),
        ("Order by:", &spec.order_by),
        ("Sum:", &spec.sum),
        ("Count:", &spec.count),
    ];
    for (label, fields) in lists {
        if !fields.is_empty() {
            println!("  {} {}", label.dimmed(), fields.join(", ").white());
        }
    }
    println!("  {} {}", "Offset:".dimmed(), spec.offset.to_string().cyan());
    println!("  {} {}", "Limit:".dimmed(), spec.limit.to_string().cyan());

    if let Some(predicate) = builder.predicate() {
        println!();
        println!(
            "{} {} node(s)",
            "Predicate:".green().bold(),
            predicate.node_count().to_string().cyan()
        );
        match try_compile(predicate) {
            Ok(sql) => println!("  {}", sql.white()),
            Err(e) => println!("  {} {} {}", compile(predicate).white(), "⚠".yellow(), e.to_string().yellow()),
        }
    }

    println!();
    println!("{}", "Generated SQL:".green().bold());
    match builder.render(&options) {
        Ok(sql) => println!("  {}", sql.white()),
        Err(e) => eprintln!("  {} {}", "Render Error:".red().bold(), e),
    }
    Ok(())
}

fn show_operators() {
    println!("{}", "Operator Reference".cyan().bold());
    println!();
    println!("{:22} {}", "Operator".white().bold(), "SQL Token".white().bold());
    println!("{}", "─".repeat(40).dimmed());

    for op in BinaryOp::ALL {
        let token = match op.sql_token() {
            Some(token) => format!("'{}'", token).cyan(),
            None => "(no rendering)".dimmed(),
        };
        println!("{:22} {}", format!("{:?}", op).yellow(), token);
    }
}
