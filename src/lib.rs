//! coco2yolo: COCO JSON to YOLO label files.
//!
//! Reads an object detection annotation document in COCO's JSON schema and
//! writes one plain-text label file per image in the normalized
//! `<class> <x_center> <y_center> <width> <height>` format used by
//! single-stage detector training pipelines.
//!
//! # Modules
//!
//! - [`coco`]: COCO document types and loader
//! - [`convert`]: the conversion pipeline and its report
//! - [`geom`]: typed pixel / normalized bounding boxes
//! - [`classes`]: class-name lists from `data.yaml` or `classes.txt`
//! - [`error`]: Error types for coco2yolo operations

pub mod classes;
pub mod coco;
pub mod convert;
pub mod error;
pub mod geom;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use error::ConvertError;

/// The coco2yolo CLI application.
#[derive(Parser)]
#[command(name = "coco2yolo")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Write one YOLO label file per annotated image.
    Convert(ConvertArgs),
    /// Show which COCO category maps to which class index.
    Map(MapArgs),
}

/// Where the ordered class names come from.
#[derive(clap::Args)]
struct ClassArgs {
    /// Class name, in index order. Repeat for each class.
    #[arg(long = "class", value_name = "NAME")]
    class: Vec<String>,

    /// Comma-separated class names, in index order.
    #[arg(long, value_name = "A,B,...")]
    classes: Option<String>,

    /// YOLO data.yaml or classes.txt listing the class names.
    #[arg(long, value_name = "FILE", conflicts_with_all = ["class", "classes"])]
    classes_file: Option<PathBuf>,
}

impl ClassArgs {
    fn resolve(&self) -> Result<Vec<String>, ConvertError> {
        let names = match &self.classes_file {
            Some(path) => classes::read_class_names(path)?,
            None => {
                let mut names = self.class.clone();
                if let Some(raw) = &self.classes {
                    names.extend(classes::split_class_list(raw)?);
                }
                names
            }
        };

        if names.is_empty() {
            return Err(ConvertError::EmptyClassList);
        }
        Ok(names)
    }
}

/// Arguments for the convert subcommand.
#[derive(clap::Args)]
struct ConvertArgs {
    /// COCO annotation JSON file.
    input: PathBuf,

    /// Directory for the label files (created if missing).
    #[arg(short, long)]
    output_dir: PathBuf,

    #[command(flatten)]
    classes: ClassArgs,

    /// Print normalized values with this many decimal places
    /// (default: shortest exact form).
    #[arg(long, value_name = "DIGITS")]
    precision: Option<u16>,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    report: String,
}

/// Arguments for the map subcommand.
#[derive(clap::Args)]
struct MapArgs {
    /// COCO annotation JSON file.
    input: PathBuf,

    #[command(flatten)]
    classes: ClassArgs,
}

/// Run the coco2yolo CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), ConvertError> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match cli.command {
        Some(Commands::Convert(args)) => run_convert(args),
        Some(Commands::Map(args)) => run_map(args),
        None => {
            println!("coco2yolo {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Convert COCO JSON annotations into YOLO label files.");
            println!();
            println!("Run 'coco2yolo --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the convert subcommand.
fn run_convert(args: ConvertArgs) -> Result<(), ConvertError> {
    if !matches!(args.report.as_str(), "text" | "json") {
        return Err(ConvertError::UnsupportedFormat(format!(
            "'{}' (supported: text, json)",
            args.report
        )));
    }

    let class_names = args.classes.resolve()?;

    // The library expects the directory to exist; the CLI owns creating it.
    std::fs::create_dir_all(&args.output_dir).map_err(ConvertError::Io)?;

    let config = convert::ConvertConfig {
        input: args.input,
        output_dir: args.output_dir,
        class_names,
        precision: args
            .precision
            .map_or(convert::LabelPrecision::Shortest, convert::LabelPrecision::Fixed),
    };
    let report = convert::convert(&config)?;

    match args.report.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&report).map_err(ConvertError::ReportJson)?;
            println!("{}", json);
        }
        _ => {
            println!(
                "Converted {} -> {}",
                config.input.display(),
                config.output_dir.display()
            );
            print!("{}", report);
        }
    }

    let failed = report.failed_images();
    if failed > 0 {
        Err(ConvertError::WriteFailed { failed })
    } else {
        Ok(())
    }
}

/// Execute the map subcommand.
fn run_map(args: MapArgs) -> Result<(), ConvertError> {
    let class_names = args.classes.resolve()?;
    let document = coco::read_coco_json(&args.input)?;

    let mut report = convert::ConversionReport::new();
    let class_map = convert::ClassIndexMap::build(&document.categories, &class_names, &mut report);

    println!("Class list: {:?}", class_names);
    println!("Category ID -> class index:");
    if document.categories.is_empty() {
        println!("  (no categories in document)");
    }
    for category in &document.categories {
        match class_map.get(category.id) {
            Some(index) => println!("  {} ('{}') -> {}", category.id, category.name, index),
            None => println!("  {} ('{}') -> ignored", category.id, category.name),
        }
    }

    Ok(())
}
