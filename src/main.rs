use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use env_logger::{Builder, Env};
use log::info;

use defectscan::dataset::{self, Dataset};
use defectscan::output::{self, DetectionReport};
use defectscan::{DetectionMode, DetectionParams, detect_defects};

#[derive(Parser)]
#[command(name = "defectscan")]
#[command(about = "Highlight candidate surface defects in images of metal sheets")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive viewer
    #[cfg(feature = "gui")]
    Gui {
        /// Dataset root: one subdirectory per defect category
        #[arg(long, value_name = "DIR", default_value = "dataset")]
        dataset: PathBuf,
    },

    /// List defect categories and their image counts
    Categories {
        /// Dataset root: one subdirectory per defect category
        #[arg(long, value_name = "DIR", default_value = "dataset")]
        dataset: PathBuf,
    },

    /// Run detection on a single image
    Detect {
        /// Path to input image file
        #[arg(value_name = "IMAGE")]
        image_path: PathBuf,

        #[command(flatten)]
        detect: DetectArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Run detection on every image of a dataset
    Scan {
        /// Dataset root: one subdirectory per defect category
        #[arg(long, value_name = "DIR", default_value = "dataset")]
        dataset: PathBuf,

        /// Only scan this category
        #[arg(long, value_name = "NAME")]
        category: Option<String>,

        #[command(flatten)]
        detect: DetectArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct DetectArgs {
    /// Detection mode: canny, adaptive, otsu or morph
    #[arg(long, default_value = "canny")]
    mode: String,

    /// Canny low gradient threshold
    #[arg(long, default_value_t = DetectionParams::default().canny_low)]
    canny_low: f32,

    /// Canny high gradient threshold
    #[arg(long, default_value_t = DetectionParams::default().canny_high)]
    canny_high: f32,

    /// Adaptive threshold window size (even values are bumped to the next odd)
    #[arg(long, default_value_t = DetectionParams::default().block_size)]
    block_size: u32,

    /// Adaptive threshold offset subtracted from the local mean
    #[arg(long, default_value_t = DetectionParams::default().c_value)]
    c_value: f32,
}

impl DetectArgs {
    fn to_mode(&self) -> anyhow::Result<DetectionMode> {
        let params = DetectionParams {
            canny_low: self.canny_low,
            canny_high: self.canny_high,
            block_size: self.block_size,
            c_value: self.c_value,
        };
        Ok(DetectionMode::from_tag(&self.mode, &params)?)
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Save original, annotated and mask images to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Print a JSON report instead of the text summary
    #[arg(long)]
    json: bool,
}

fn init_logging(verbose: bool) {
    // Without -v, honor RUST_LOG when it is set
    let use_env = !verbose && std::env::var_os("RUST_LOG").is_some();

    let mut logger = if use_env {
        Builder::from_env(Env::default())
    } else {
        let mut b = Builder::new();
        b.filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        });
        b
    };

    logger
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        #[cfg(feature = "gui")]
        Command::Gui { dataset } => {
            defectscan::gui::run(dataset).map_err(|e| anyhow::anyhow!("GUI failed: {}", e))?;
        }
        Command::Categories { dataset } => list_categories(&Dataset::new(dataset))?,
        Command::Detect {
            image_path,
            detect,
            output,
        } => run_detect(&image_path, &detect, &output)?,
        Command::Scan {
            dataset,
            category,
            detect,
            output,
        } => run_scan(&Dataset::new(dataset), category.as_deref(), &detect, &output)?,
    }

    Ok(())
}

fn list_categories(dataset: &Dataset) -> anyhow::Result<()> {
    let categories = dataset.categories()?;
    if categories.is_empty() {
        println!("No categories found in {}", dataset.root().display());
        return Ok(());
    }
    for category in categories {
        let count = dataset.images(&category)?.len();
        println!("{category}: {count} images");
    }
    Ok(())
}

fn run_detect(image_path: &Path, detect: &DetectArgs, output: &OutputArgs) -> anyhow::Result<()> {
    let mode = detect.to_mode()?;
    if let Some(dir) = &output.out {
        output::prepare_output_dir(dir)?;
    }

    info!("Loading image: {}", image_path.display());
    let original = dataset::load_rgb(image_path)?;
    info!("Image loaded: {}x{}", original.width(), original.height());

    let detection = detect_defects(&original, &mode);

    if let Some(dir) = &output.out {
        let stem = file_stem(image_path);
        output::save_views(dir, &stem, &original, &detection)?;
        info!("Saved views to {}", dir.display());
    }

    let report = DetectionReport::new(image_path.display().to_string(), mode, &detection);
    if output.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn run_scan(
    dataset: &Dataset,
    category: Option<&str>,
    detect: &DetectArgs,
    output: &OutputArgs,
) -> anyhow::Result<()> {
    let mode = detect.to_mode()?;
    if let Some(dir) = &output.out {
        output::prepare_output_dir(dir)?;
    }

    let categories = match category {
        Some(name) => vec![name.to_string()],
        None => dataset.categories()?,
    };

    let mut reports = Vec::new();
    for category in &categories {
        let images = dataset.images(category)?;
        info!("Scanning {} ({} images)", category, images.len());

        for image in &images {
            let original = dataset
                .load_image(category, image)
                .with_context(|| format!("Failed to scan {category}/{image}"))?;
            let detection = detect_defects(&original, &mode);

            if let Some(dir) = &output.out {
                let stem = format!("{}_{}", category, file_stem(Path::new(image)));
                output::save_views(dir, &stem, &original, &detection)?;
            }

            reports.push(DetectionReport::new(format!("{category}/{image}"), mode, &detection));
        }
    }

    if output.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_summary(report);
        }
        println!("\nScanned {} images", reports.len());
    }
    Ok(())
}

fn print_summary(report: &DetectionReport) {
    println!(
        "{} [{}x{}]: {} regions found, {} drawn",
        report.image, report.width, report.height, report.region_count, report.drawn_count
    );
    for region in report.regions.iter().filter(|r| r.is_drawn()) {
        let bbox = region.bounding_box();
        println!(
            "  ({}, {}) {}x{} - area: {:.1}",
            bbox.x, bbox.y, bbox.width, bbox.height, region.area
        );
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}
