//! Command-line front end for the theory catalog.
//!
//! Loads the catalog named by `--catalog`, `ETL_CATALOG_PATH`, or the default
//! `ETL_EN_Complete.json`, runs one query, and prints the result as pretty
//! JSON on stdout. Logging goes to stderr and is controlled by `RUST_LOG`.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use etl_catalog::{
    Criteria, TheoryCatalog, TheoryId, category_statistics, create_pathway, export_csv,
    export_theories,
    generate_ai_prompt, parse_context_pairs, parse_id_list, practical_insights, recommend,
    resolve_catalog_path, sorted_by_count, split_list, theorist_statistics, theory_network,
};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "etl-catalog", about = "Query the Educational Theory Library")]
struct Cli {
    /// Catalog document to load; falls back to a non-empty `ETL_CATALOG_PATH`.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Theory counts per category, most common first.
    Stats,
    /// Theory counts per theorist, most prolific first.
    Theorists {
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
    /// Case-insensitive search over names, concepts, and applications.
    Search { keyword: String },
    /// Theories in one category (exact match).
    Category { name: String },
    /// Print one theory record.
    Show { id: i64 },
    /// Resolve a theory's related theories.
    Related { id: i64 },
    /// Recommend theories for a teaching context.
    Recommend {
        #[arg(long)]
        grade_level: Option<String>,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        objective: Option<String>,
        #[arg(long)]
        max_results: Option<usize>,
    },
    /// Fill a theory's AI prompt template.
    Prompt {
        id: i64,
        /// Placeholder values as key=value; repeatable.
        #[arg(long = "set", value_name = "KEY=VALUE")]
        context: Vec<String>,
        /// Print the lesson-planning text block instead of JSON.
        #[arg(long)]
        lesson_plan: bool,
    },
    /// Build a learning pathway from a comma-separated id list.
    Pathway { ids: String },
    /// Declared relationships between theories.
    Network,
    /// Veteran-teacher insights pooled across the catalog.
    Insights,
    /// Write selected fields of every theory to a JSON file.
    Export {
        /// Comma-separated field names.
        #[arg(long)]
        fields: String,
        #[arg(long)]
        output: PathBuf,
    },
    /// Write a flat CSV table of every theory.
    ExportCsv {
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let path = resolve_catalog_path(cli.catalog.as_deref());
    let catalog = TheoryCatalog::load(&path)
        .with_context(|| format!("Please ensure {} is available", path.display()))?;

    match cli.command {
        Command::Stats => {
            let stats = category_statistics(&catalog);
            let rows: Vec<_> = sorted_by_count(&stats)
                .into_iter()
                .map(|(category, count)| json!({"category": category, "count": count}))
                .collect();
            print_json(&rows)
        }
        Command::Theorists { top } => {
            let stats = theorist_statistics(&catalog);
            let rows: Vec<_> = sorted_by_count(&stats)
                .into_iter()
                .take(top)
                .map(|(theorist, count)| json!({"theorist": theorist, "count": count}))
                .collect();
            print_json(&rows)
        }
        Command::Search { keyword } => print_json(&catalog.search_by_keyword(&keyword)),
        Command::Category { name } => print_json(&catalog.filter_by_category(&name)),
        Command::Show { id } => match catalog.find_by_id(TheoryId(id)) {
            Some(theory) => print_json(theory),
            None => bail!("Theory not found: {id}"),
        },
        Command::Related { id } => {
            if catalog.find_by_id(TheoryId(id)).is_none() {
                bail!("Theory not found: {id}");
            }
            print_json(&catalog.related_theories(TheoryId(id)))
        }
        Command::Recommend {
            grade_level,
            subject,
            objective,
            max_results,
        } => {
            let criteria = Criteria {
                grade_level,
                subject,
                learning_objective: objective,
                max_results,
            };
            print_json(&recommend(&catalog, &criteria))
        }
        Command::Prompt {
            id,
            context,
            lesson_plan,
        } => {
            let context = parse_context_pairs(&context)?;
            let Some(generated) = generate_ai_prompt(&catalog, TheoryId(id), &context) else {
                bail!("Theory not found: {id}");
            };
            if lesson_plan {
                print!("{}", generated.render_lesson_plan());
                Ok(())
            } else {
                print_json(&generated)
            }
        }
        Command::Pathway { ids } => {
            let ids = parse_id_list(&ids)?;
            print_json(&create_pathway(&catalog, &ids))
        }
        Command::Network => print_json(&theory_network(&catalog)),
        Command::Insights => print_json(&practical_insights(&catalog)),
        Command::Export { fields, output } => {
            let fields = split_list(&fields);
            if fields.is_empty() {
                bail!("--fields must name at least one field");
            }
            let report = export_theories(&catalog, &fields, &output)?;
            println!(
                "Exported {} theories to {}",
                report.count,
                report.path.display()
            );
            Ok(())
        }
        Command::ExportCsv { output } => {
            let report = export_csv(&catalog, &output)?;
            println!(
                "Exported {} theories to {}",
                report.count,
                report.path.display()
            );
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
