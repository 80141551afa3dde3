//! Collabnet CLI — runs the tenure / network pipeline over a data directory
//!
//! Reads `projects-active.json`, `projects-inactive.json` and `people.json`
//! from `--data` and writes results to stdout or a file.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use collabnet::model::{DetailLevel, OverlapEdge, TenureTable};
use collabnet::{CollaborationNetwork, JsonRecordStore, Pipeline, PipelineConfig, RecordStore};
use comfy_table::{ContentArrangement, Table};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "collabnet", version, about = "Tenure inference and collaboration networks")]
struct Cli {
    /// Directory holding the roster and people JSON files
    #[arg(long, default_value = "data", global = true, env = "COLLABNET_DATA")]
    data: PathBuf,

    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the reference date (YYYY-MM-DD)
    #[arg(long, global = true)]
    reference_date: Option<NaiveDate>,

    /// Keep only roster members `<id>@<domain>`
    #[arg(long, global = true)]
    member_domain: Option<String>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Clone, clap::ValueEnum)]
enum Detail {
    Counts,
    Full,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the collaboration network and write the adjacency document
    Network {
        /// Output file (stdout if omitted)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Edge detail level; `full` writes per-edge project lists
        #[arg(long)]
        detail: Option<Detail>,

        /// Shorthand for `--detail full`
        #[arg(long, conflicts_with = "detail")]
        projects: bool,
    },
    /// Infer tenure windows
    Tenure,
    /// Pairwise tenure overlap
    Overlap {
        /// Restrict to these people (comma separated)
        #[arg(long, value_delimiter = ',')]
        people: Vec<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(date) = cli.reference_date {
        config = config.with_reference_date(date);
    }
    if cli.member_domain.is_some() {
        config.member_domain = cli.member_domain.clone();
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(&cli)?;
    if let Commands::Network { detail, projects, .. } = &cli.command {
        if let Some(level) = requested_detail(detail.as_ref(), *projects) {
            config = config.with_detail_level(level);
        }
    }

    let store = JsonRecordStore::new(&cli.data).with_member_domain(config.member_domain.clone());
    let pipeline = Pipeline::new(config);
    let records = store
        .project_records()
        .with_context(|| format!("reading rosters from {}", store.dir().display()))?;

    match &cli.command {
        Commands::Network { out, .. } => {
            let network = pipeline.network(&records);
            let json = network_json(&network)?;
            match out {
                Some(path) => std::fs::write(path, json)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{}", json),
            }
        }
        Commands::Tenure => {
            let statuses = store.person_statuses().context("reading people")?;
            let table = pipeline.tenure(&records, &statuses)?;
            print_tenure(&table, &cli.format)?;
        }
        Commands::Overlap { people } => {
            let statuses = store.person_statuses().context("reading people")?;
            let table = pipeline.tenure(&records, &statuses)?;
            let subset = if people.is_empty() { None } else { Some(people.as_slice()) };
            let edges = pipeline.overlaps(&table, subset)?;
            print_overlaps(&edges, &cli.format)?;
        }
    }

    Ok(())
}

/// `--projects` and `--detail full` both select per-edge project lists
fn requested_detail(detail: Option<&Detail>, projects: bool) -> Option<DetailLevel> {
    match (detail, projects) {
        (_, true) | (Some(Detail::Full), _) => Some(DetailLevel::Full),
        (Some(Detail::Counts), false) => Some(DetailLevel::Counts),
        (None, false) => None,
    }
}

fn network_json(network: &CollaborationNetwork) -> Result<String> {
    Ok(match network.detail_level() {
        DetailLevel::Full => serde_json::to_string(&network.serialize_detailed())?,
        DetailLevel::Counts => network.serialize().to_json()?,
    })
}

fn print_tenure(table: &TenureTable, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(table)?);
        }
        OutputFormat::Csv => {
            println!("person_id,start,end,duration_days,group,project_count,active,source");
            for row in table.iter() {
                println!(
                    "{},{},{},{:.2},{},{},{},{:?}",
                    row.person_id,
                    row.first_start,
                    row.inferred_end,
                    row.inferred_duration_days,
                    row.group_label.as_deref().unwrap_or(""),
                    row.project_count,
                    row.is_currently_active,
                    row.source
                );
            }
        }
        OutputFormat::Table => {
            let mut out = Table::new();
            out.set_content_arrangement(ContentArrangement::Dynamic);
            out.set_header(vec!["person", "start", "end", "days", "group", "projects", "active", "source"]);
            for row in table.iter() {
                out.add_row(vec![
                    row.person_id.clone(),
                    row.first_start.to_string(),
                    row.inferred_end.to_string(),
                    format!("{:.1}", row.inferred_duration_days),
                    row.group_label.clone().unwrap_or_default(),
                    row.project_count.to_string(),
                    row.is_currently_active.to_string(),
                    format!("{:?}", row.source),
                ]);
            }
            println!("{}", out);
            let s = &table.summary;
            println!(
                "{} people ({} active, {} observed, {} imputed, {} clamped), reference {}",
                table.len(),
                s.active_rows,
                s.known_rows,
                s.imputed_rows,
                s.clamped_rows,
                table.reference_date
            );
        }
    }
    Ok(())
}

fn print_overlaps(edges: &[OverlapEdge], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(edges)?);
        }
        OutputFormat::Csv => {
            println!("person_a,person_b,overlap_days");
            for e in edges {
                println!("{},{},{}", e.person_a, e.person_b, e.overlap_days);
            }
        }
        OutputFormat::Table => {
            let mut out = Table::new();
            out.set_content_arrangement(ContentArrangement::Dynamic);
            out.set_header(vec!["person_a", "person_b", "overlap_days"]);
            for e in edges {
                out.add_row(vec![e.person_a.clone(), e.person_b.clone(), format!("{:.1}", e.overlap_days)]);
            }
            println!("{}", out);
            println!("{} pair(s)", edges.len());
        }
    }
    Ok(())
}
