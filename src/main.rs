//! # Etiqueta CLI
//!
//! Command-line interface for barcode generation and verification.
//!
//! ## Usage
//!
//! ```bash
//! # Generate a Code 128 barcode
//! etiqueta generate PART12345 -o part.png --width 300 --height 100
//!
//! # Decode it back
//! etiqueta decode part.png
//!
//! # Validate data against a symbology without rendering
//! etiqueta validate 123456789012 --symbology ean13
//!
//! # Image dimensions
//! etiqueta info part.png
//!
//! # Generate one barcode per line of a list file, grid-placed
//! etiqueta batch parts.txt -d out/ --columns 3
//!
//! # Check a barcode image against the current part name
//! etiqueta check part.png PART12345
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use etiqueta::batch::{self, BatchProcessor, SheetSink};
use etiqueta::config::{AppConfig, BarcodeConfig};
use etiqueta::layout::GridLayoutParams;
use etiqueta::sync::{self, SyncStatus};
use etiqueta::{BarcodeType, EtiquetaError, decode, render, symbology};

/// Etiqueta - barcode engine for part-marking drawings
#[derive(Parser, Debug)]
#[command(name = "etiqueta")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file with default settings
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a barcode image
    Generate {
        /// Payload data to encode
        data: String,

        /// Output image path (.png or .bmp)
        #[arg(short, long, default_value = "barcode.png")]
        output: PathBuf,

        /// Symbology (code128, code39, qr, datamatrix, ean13)
        #[arg(short, long)]
        symbology: Option<BarcodeType>,

        /// Image width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Image height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Quiet-zone margin in pixels
        #[arg(long)]
        margin: Option<u32>,

        /// Escape non-printable payload bytes before encoding
        #[arg(long)]
        escape: bool,
    },

    /// Decode a barcode image
    Decode {
        /// Image file to read
        image: PathBuf,

        /// Unescape the decoded text before printing
        #[arg(long)]
        unescape: bool,
    },

    /// Check whether data is valid for a symbology
    Validate {
        /// Payload data to check
        data: String,

        /// Symbology (code128, code39, qr, datamatrix, ean13)
        #[arg(short, long, default_value = "code128")]
        symbology: BarcodeType,
    },

    /// Show image dimensions
    Info {
        /// Image file to inspect
        image: PathBuf,
    },

    /// Generate barcodes for every line of a list file
    Batch {
        /// Text file with one payload per line
        list: PathBuf,

        /// Output directory for generated images
        #[arg(short = 'd', long, default_value = "barcodes")]
        out_dir: PathBuf,

        /// Symbology for every item
        #[arg(short, long)]
        symbology: Option<BarcodeType>,

        /// Image width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Image height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Grid columns for placement
        #[arg(long, default_value = "3")]
        columns: i32,

        /// Grid spacing between cells
        #[arg(long, default_value = "10.0")]
        spacing: f64,

        /// Place the generated images on a simulated sheet and report positions
        #[arg(long)]
        place: bool,
    },

    /// Check a barcode image against the current part name
    Check {
        /// Barcode image to decode
        image: PathBuf,

        /// Part name the barcode should carry
        part_name: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .compact()
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), EtiquetaError> {
    let cli = Cli::parse();

    let defaults = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Generate {
            data,
            output,
            symbology,
            width,
            height,
            margin,
            escape,
        } => {
            let config = barcode_config(&defaults, symbology, width, height, margin);
            let payload = if escape {
                etiqueta::escape::encode_special_chars(data.as_bytes())
            } else {
                data
            };
            render::generate(&payload, &config, &output)?;
            println!(
                "Generated {} barcode ({}x{}) at {}",
                config.symbology,
                config.width,
                config.height,
                output.display()
            );
        }

        Commands::Decode { image, unescape } => {
            let text = decode::decode(&image)?;
            if unescape {
                let bytes = etiqueta::escape::decode_special_chars(&text);
                println!("{}", String::from_utf8_lossy(&bytes));
            } else {
                println!("{}", text);
            }
        }

        Commands::Validate { data, symbology } => {
            if symbology::validate_data(&data, symbology) {
                println!("valid for {}", symbology);
            } else {
                println!("NOT valid for {}", symbology);
                std::process::exit(2);
            }
        }

        Commands::Info { image } => {
            let (width, height) = decode::image_size(&image)?;
            println!("{}: {}x{}", image.display(), width, height);
        }

        Commands::Batch {
            list,
            out_dir,
            symbology,
            width,
            height,
            columns,
            spacing,
            place,
        } => {
            run_batch(
                &defaults, &list, &out_dir, symbology, width, height, columns, spacing, place,
            )?;
        }

        Commands::Check { image, part_name } => {
            let result = sync::check_sync_from_image(&part_name, &image);
            println!("{}", result.message);
            if result.status != SyncStatus::InSync {
                if !result.barcode_data.is_empty() {
                    println!("barcode: {}", result.barcode_data);
                    println!("part:    {}", result.part_name);
                }
                std::process::exit(2);
            }
        }
    }

    Ok(())
}

/// Merge CLI overrides over the configured defaults.
fn barcode_config(
    defaults: &AppConfig,
    symbology: Option<BarcodeType>,
    width: Option<u32>,
    height: Option<u32>,
    margin: Option<u32>,
) -> BarcodeConfig {
    let mut config = defaults.barcode_config();
    if let Some(s) = symbology {
        config.symbology = s;
    }
    if let Some(w) = width {
        config.width = w;
    }
    if let Some(h) = height {
        config.height = h;
    }
    if let Some(m) = margin {
        config.margin = m;
    }
    config
}

#[allow(clippy::too_many_arguments)]
fn run_batch(
    defaults: &AppConfig,
    list: &Path,
    out_dir: &Path,
    symbology: Option<BarcodeType>,
    width: Option<u32>,
    height: Option<u32>,
    columns: i32,
    spacing: f64,
    place: bool,
) -> Result<(), EtiquetaError> {
    let config = barcode_config(defaults, symbology, width, height, None);

    let text = fs::read_to_string(list)
        .map_err(|e| EtiquetaError::FileNotFound(format!("{}: {}", list.display(), e)))?;
    fs::create_dir_all(out_dir)
        .map_err(|e| EtiquetaError::Generation(format!("{}: {}", out_dir.display(), e)))?;

    let mut processor = BatchProcessor::new();
    processor.add_items(text.lines().map(str::trim).filter(|l| !l.is_empty()));

    let mut generated: Vec<PathBuf> = Vec::new();
    let mut index = 0usize;
    let mut progress = |current: usize, total: usize| {
        println!("[{}/{}]", current, total);
    };
    let results = processor.process(
        |payload| {
            index += 1;
            let path = out_dir.join(format!("barcode_{:03}.png", index));
            render::generate(payload, &config, &path)?;
            generated.push(path);
            Ok(())
        },
        Some(&mut progress),
    );

    let summary = batch::summarize(&results);
    print!("{}", summary);

    if place {
        let params = GridLayoutParams {
            start_x: 10.0,
            start_y: 190.0,
            width: 50.0,
            height: 20.0,
            columns,
            spacing,
        };
        let mut sink = SheetSink::default();
        let insert_summary = batch::batch_insert_grid(&mut sink, &generated, &params);
        for placement in &sink.placements {
            println!(
                "placed {} at ({:.1}, {:.1})",
                placement.path.display(),
                placement.x,
                placement.y
            );
        }
        print!("{}", insert_summary);
        if let Some(err) = insert_summary.as_error() {
            return Err(err);
        }
    }

    match summary.as_error() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
