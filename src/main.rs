// DealBook - main.rs
//
// CLI entry point. Handles:
// 1. Argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Config loading from the platform config directory
// 4. Dispatch to the core pipeline
//
// Structured output (JSON, CSV) goes to stdout; all logging goes to
// stderr so the output can be piped.

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

use dealbook::core::model::Property;
use dealbook::core::query::{QueryOptions, SortDirection, SortField, StageFilter};
use dealbook::core::{dedupe, export, import, parser, query, stats, validate};
use dealbook::platform;
use dealbook::util;
use dealbook::util::error::{DealBookError, ExportError, Result};

/// DealBook - real-estate deal pipeline.
///
/// Parse pasted deal text into structured records, then validate, merge,
/// query, aggregate and export them.
#[derive(Parser, Debug)]
#[command(name = "dealbook", version, about)]
struct Cli {
    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse pasted deal text (stdin when FILE is omitted) into JSON records.
    Parse {
        /// Text file of deal blocks separated by blank lines.
        file: Option<PathBuf>,
    },

    /// Validate, deduplicate and merge a JSON batch of records.
    Import {
        /// JSON array of records.
        file: PathBuf,

        /// Write the merged collection here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Filter and sort a record collection.
    Query {
        /// JSON array of records.
        file: PathBuf,

        /// Stage bucket: "all" or a stage name ("New", "Sold", ...).
        #[arg(long, value_parser = parse_stage_filter)]
        stage: Option<StageFilter>,

        /// Exact county to match.
        #[arg(long)]
        county: Option<String>,

        /// Property type: SFH, MFH, Lot or Unknown.
        #[arg(long = "type", value_parser = parse_property_type)]
        kind: Option<dealbook::core::model::PropertyType>,

        /// Case-insensitive substring search.
        #[arg(long, default_value = "")]
        search: String,

        /// Sort field (address, city, county, type, beds, baths, asking,
        /// arv, stage, dateAdded).
        #[arg(long, value_parser = parse_sort_field)]
        sort: Option<SortField>,

        /// Sort direction: asc or desc.
        #[arg(long, value_parser = parse_sort_direction)]
        direction: Option<SortDirection>,
    },

    /// Stage counts, county/type histograms and spread summary.
    Stats {
        /// JSON array of records.
        file: PathBuf,
    },

    /// Export a record collection to CSV.
    Export {
        /// JSON array of records.
        file: PathBuf,

        /// Write the CSV here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_stage_filter(s: &str) -> std::result::Result<StageFilter, String> {
    StageFilter::from_key(s).ok_or_else(|| {
        format!("unknown stage '{s}' (expected all, New, Ready to Blast, On Hold, Too High, Sold)")
    })
}

fn parse_property_type(
    s: &str,
) -> std::result::Result<dealbook::core::model::PropertyType, String> {
    use dealbook::core::model::PropertyType;
    if s.trim().eq_ignore_ascii_case("unknown") {
        return Ok(PropertyType::Unknown);
    }
    PropertyType::from_label(s)
        .ok_or_else(|| format!("unknown property type '{s}' (expected SFH, MFH, Lot, Unknown)"))
}

fn parse_sort_field(s: &str) -> std::result::Result<SortField, String> {
    SortField::from_key(s).ok_or_else(|| {
        format!(
            "unknown sort field '{s}' (expected address, city, county, type, beds, baths, \
             asking, arv, stage, dateAdded)"
        )
    })
}

fn parse_sort_direction(s: &str) -> std::result::Result<SortDirection, String> {
    SortDirection::from_key(s).ok_or_else(|| format!("unknown direction '{s}' (asc or desc)"))
}

fn main() {
    let cli = Cli::parse();

    // Config is loaded before logging init so the configured level can
    // apply; config-load tracing therefore lands nowhere, and real
    // problems are surfaced through the returned warnings instead.
    let paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&paths.config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());

    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "DealBook starting"
    );

    if let Err(e) = run(cli.command, &config) {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(command: Command, config: &platform::config::AppConfig) -> Result<()> {
    match command {
        Command::Parse { file } => cmd_parse(file.as_deref()),
        Command::Import { file, output } => cmd_import(&file, output.as_deref()),
        Command::Query {
            file,
            stage,
            county,
            kind,
            search,
            sort,
            direction,
        } => {
            let options = QueryOptions {
                current_filter: stage.unwrap_or_default(),
                county_filter: county,
                type_filter: kind,
                search_term: search,
                sort_field: sort.unwrap_or(config.default_sort_field),
                sort_direction: direction.unwrap_or(config.default_sort_direction),
            };
            cmd_query(&file, &options)
        }
        Command::Stats { file } => cmd_stats(&file),
        Command::Export { file, output } => cmd_export(&file, output.as_deref()),
    }
}

// =============================================================================
// Subcommands
// =============================================================================

/// Parse pasted text into records: one block per deal, blocks with no
/// recognisable address are skipped (the parser itself never fails).
fn cmd_parse(file: Option<&Path>) -> Result<()> {
    let text = read_text(file)?;
    let now = chrono::Utc::now();

    let mut records: Vec<Property> = Vec::new();
    let mut skipped = 0usize;

    for block in parser::split_blocks(&text) {
        let deal = parser::parse_block(&block);
        if deal.address.is_empty() {
            skipped += 1;
            tracing::warn!(
                preview = block.lines().next().unwrap_or(""),
                "Skipping block with no recognisable address"
            );
            continue;
        }

        if let Some(existing) = dedupe::find_duplicate(&records, &deal.address, &deal.city) {
            tracing::warn!(
                address = %deal.address,
                existing = %existing.address,
                "Possible duplicate of an earlier block"
            );
        }

        let property = Property::from_parsed(deal, now);
        for violation in validate::validate(&property) {
            tracing::warn!(address = %property.address, "{}", violation);
        }
        records.push(property);
    }

    tracing::info!(parsed = records.len(), skipped, "Parse complete");
    print_json(&records)
}

fn cmd_import(file: &Path, output: Option<&Path>) -> Result<()> {
    let value = read_json(file)?;
    let report = import::import_batch(&value).map_err(DealBookError::Import)?;

    tracing::info!(
        kept = report.properties.len(),
        duplicates_removed = report.duplicates_removed,
        "Import complete"
    );
    eprintln!(
        "Imported {} record(s), {} duplicate(s) removed",
        report.properties.len(),
        report.duplicates_removed
    );

    match output {
        Some(path) => write_json(path, &report.properties),
        None => print_json(&report.properties),
    }
}

fn cmd_query(file: &Path, options: &QueryOptions) -> Result<()> {
    let collection = load_collection(file)?;
    let filtered = query::get_filtered(&collection, options);
    tracing::info!(
        total = collection.len(),
        matched = filtered.len(),
        "Query complete"
    );
    print_json(&filtered)
}

fn cmd_stats(file: &Path) -> Result<()> {
    let collection = load_collection(file)?;

    let counts = stats::compute_stats(&collection);
    println!("Stages:");
    println!("  New:            {}", counts.new);
    println!("  Ready to Blast: {}", counts.ready_to_blast);
    println!("  On Hold:        {}", counts.on_hold);
    println!("  Too High:       {}", counts.too_high);
    println!("  Sold:           {}", counts.sold);
    println!("  Total:          {}", counts.total);

    let counties = stats::compute_county_counts(&collection);
    if !counties.is_empty() {
        println!("\nCounties:");
        for (county, n) in &counties {
            println!("  {county}: {n}");
        }
    }

    let types = stats::compute_type_counts(&collection);
    if !types.is_empty() {
        println!("\nTypes:");
        for (kind, n) in &types {
            println!("  {kind}: {n}");
        }
    }

    let spreads: Vec<i64> = collection
        .iter()
        .filter_map(|p| stats::compute_spread(p.arv, p.asking, p.rehab))
        .collect();
    if !spreads.is_empty() {
        let sum: i64 = spreads.iter().sum();
        println!("\nSpread ({} priced deal(s)):", spreads.len());
        println!("  Average: ${}", sum / spreads.len() as i64);
    }

    Ok(())
}

fn cmd_export(file: &Path, output: Option<&Path>) -> Result<()> {
    let collection = load_collection(file)?;
    let csv = export::export_csv(&collection, chrono::Utc::now());
    tracing::info!(rows = collection.len(), "Export complete");

    match output {
        Some(path) => {
            std::fs::write(path, csv).map_err(|source| ExportError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(())
        }
        None => {
            println!("{csv}");
            Ok(())
        }
    }
}

// =============================================================================
// I/O helpers
// =============================================================================

fn read_text(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path).map_err(|source| DealBookError::Io {
            path: path.to_path_buf(),
            operation: "read",
            source,
        }),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| DealBookError::Io {
                    path: PathBuf::from("<stdin>"),
                    operation: "read",
                    source,
                })?;
            Ok(buf)
        }
    }
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    let content = std::fs::read_to_string(path).map_err(|source| DealBookError::Io {
        path: path.to_path_buf(),
        operation: "read",
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| DealBookError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a collection through the import merger so the same shape checks
/// guard every read path.
fn load_collection(path: &Path) -> Result<Vec<Property>> {
    let value = read_json(path)?;
    let report = import::import_batch(&value).map_err(DealBookError::Import)?;
    if report.duplicates_removed > 0 {
        tracing::warn!(
            duplicates_removed = report.duplicates_removed,
            "Collection contained duplicate ids"
        );
    }
    Ok(report.properties)
}

fn print_json(records: &[Property]) -> Result<()> {
    let json = serde_json::to_string_pretty(records).map_err(|source| DealBookError::Json {
        path: PathBuf::from("<stdout>"),
        source,
    })?;
    println!("{json}");
    Ok(())
}

fn write_json(path: &Path, records: &[Property]) -> Result<()> {
    let json = serde_json::to_string_pretty(records).map_err(|source| DealBookError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(|source| DealBookError::Io {
        path: path.to_path_buf(),
        operation: "write",
        source,
    })
}
