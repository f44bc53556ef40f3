use clap::{Args, Parser, Subcommand};
use icnsx::catalog;
use icnsx::decoder::{ArchiveDecoder, DecodeOptions};
use icnsx::extract::{self, ExtractOptions, DEFAULT_OUTPUT_DIR};
use icnsx::finder;
use serde::Serialize;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "icnsx", about = "List and extract icons from Apple .icns archives")]
struct Cli {
    /// Log progress and per-record detail to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Treat any malformed record as a failure of the whole archive
    #[arg(long, global = true)]
    strict: bool,
    #[command(subcommand)]
    command: Commands,
}

/// Where to look for `.icns` files.
#[derive(Args)]
struct Source {
    /// Folder to search recursively
    folder: Option<PathBuf>,
    /// Search /Applications and ~/Applications for this app instead
    #[arg(short, long)]
    application: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print archives that contain PNG icons at or above the minimum size
    List {
        #[command(flatten)]
        source: Source,
        /// Smallest size to be listed
        #[arg(short = 's', long, default_value = "128")]
        minsize: u32,
        #[arg(long)]
        json: bool,
    },
    /// Write PNG icons at or above the minimum size to a folder
    Extract {
        #[command(flatten)]
        source: Source,
        /// Destination folder, created if missing
        #[arg(short = 'd', long, default_value = DEFAULT_OUTPUT_DIR)]
        outputdir: PathBuf,
        /// Smallest size to be extracted
        #[arg(short = 's', long, default_value = "128")]
        minsize: u32,
    },
    /// Show the header and records of one archive
    Info {
        input: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Show the known icon types
    Types {
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let decode = DecodeOptions { strict: cli.strict };

    match cli.command {

        // ── List ─────────────────────────────────────────────────────────────
        Commands::List { source, minsize, json } => {
            let paths = resolve_source(&source)?;
            let opts = ExtractOptions { min_size: minsize, decode, ..Default::default() };
            let entries = extract::list_icons(&paths, &opts);
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for entry in &entries {
                    println!("{}", entry.path.display());
                }
            }
        }

        // ── Extract ──────────────────────────────────────────────────────────
        Commands::Extract { source, outputdir, minsize } => {
            let paths = resolve_source(&source)?;
            if paths.is_empty() {
                println!("No icons found");
                return Ok(());
            }
            let opts = ExtractOptions { output_dir: outputdir, min_size: minsize, decode };
            let report = extract::extract_icons(&paths, &opts)?;
            for path in &report.written {
                println!("  wrote  {}", path.display());
            }
            println!(
                "Extracted {} icon(s) from {} file(s), {} skipped",
                report.written.len(), report.files_scanned, report.files_skipped
            );
        }

        // ── Info ─────────────────────────────────────────────────────────────
        Commands::Info { input, json } => {
            let decoded = ArchiveDecoder::with_options(decode).decode_file(&input)?;
            let rows: Vec<RecordRow> = decoded.archive.records.iter().enumerate()
                .map(|(i, r)| RecordRow {
                    index:       i + 1,
                    tag:         r.type_tag.to_string(),
                    length:      r.length,
                    size:        r.pixel_size(),
                    kind:        r.payload_kind().name(),
                    head:        hex::encode(&r.payload[..r.payload.len().min(8)]),
                    description: r.info().map(|t| t.description).unwrap_or(""),
                })
                .collect();

            if json {
                let doc = InfoDoc {
                    path:          &input,
                    declared_size: decoded.archive.header.declared_size,
                    records:       &rows,
                    error:         decoded.error.as_ref().map(|e| e.to_string()),
                };
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                println!("── icns archive ─────────────────────────────────────────");
                println!("  Path           {}", input.display());
                println!("  Declared size  {} B", decoded.archive.header.declared_size);
                println!("  Records        {}", rows.len());
                println!("{:>4}  {:<6} {:>10} {:>6}  {:<9} {:<17} Description",
                         "#", "Tag", "Length", "Size", "Kind", "Head");
                for row in &rows {
                    let size = row.size.map(|s| s.to_string()).unwrap_or_else(|| "—".into());
                    println!("{:>4}  {:<6} {:>10} {:>6}  {:<9} {:<17} {}",
                        row.index, row.tag, row.length, size, row.kind, row.head, row.description);
                }
                if let Some(e) = &decoded.error {
                    println!("  Scan stopped   {e}");
                }
            }
        }

        // ── Types ────────────────────────────────────────────────────────────
        Commands::Types { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(catalog::all())?);
            } else {
                println!("{:<6} {:>11} {:>6}  Description", "Tag", "Pixels", "macOS");
                for t in catalog::all() {
                    println!("{:<6} {:>11} {:>6}  {}",
                        t.tag, format!("{}x{}", t.width, t.height), t.min_os_version, t.description);
                }
            }
        }
    }

    Ok(())
}

// ── helpers ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct RecordRow {
    index:       usize,
    tag:         String,
    length:      u32,
    size:        Option<u32>,
    kind:        &'static str,
    head:        String,
    description: &'static str,
}

#[derive(Serialize)]
struct InfoDoc<'a> {
    path:          &'a PathBuf,
    declared_size: u32,
    records:       &'a [RecordRow],
    error:         Option<String>,
}

fn resolve_source(source: &Source) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let paths = match (&source.application, &source.folder) {
        (Some(app), _)       => finder::find_in_app(app)?,
        (None, Some(folder)) => finder::find_in_folder(folder)?,
        (None, None)         => return Err("missing folder name or --application".into()),
    };
    if paths.is_empty() {
        tracing::info!("No icons found");
    }
    Ok(paths)
}
