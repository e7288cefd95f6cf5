//! CLI application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use placard_core::{
    run_fill, slide_for, FillConfig, FillReport, RetryPolicy, SlideDeck, StickerField, WriteStatus,
};
use placard_data::open_source;
use placard_pptx::StickerDeck;

/// Output format for fill reports
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for CI/tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "placard")]
#[command(author, version, about = "Fill PowerPoint LOTO stickers from Excel", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill sticker shapes in a deck from a workbook
    Fill(FillOptions),

    /// Report which sticker shapes a deck carries or lacks
    Inspect {
        /// Presentation to inspect
        deck: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write a starter configuration file
    Init {
        /// Destination path
        #[arg(short, long, default_value = "placard.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Options for the fill command
#[derive(Args, Debug, Clone, Default)]
pub struct FillOptions {
    /// Workbook holding the sticker index (.xlsx, .xlsm, or .csv)
    pub workbook: Option<PathBuf>,

    /// Presentation whose sticker shapes get filled
    pub deck: Option<PathBuf>,

    /// Worksheet name (default: first sheet in the workbook)
    #[arg(short, long)]
    pub sheet: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the filled deck here instead of in place
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Re-place and re-size each filled shape from the grid
    #[arg(long)]
    pub apply_geometry: bool,

    /// Set each filled shape's font size from the field table
    #[arg(long)]
    pub apply_font_sizes: bool,

    /// Output format for the report (text or json)
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Run everything except saving the deck
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with an error code if the run was not clean
    #[arg(long)]
    pub strict: bool,
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fill(options) => {
            fill_command(&options)?;
        }
        Commands::Inspect { deck, config } => {
            inspect_command(&deck, config.as_deref())?;
        }
        Commands::Init { output, force } => {
            init_command(&output, force)?;
        }
    }

    Ok(())
}

/// Execute the fill command
pub fn fill_command(options: &FillOptions) -> Result<FillReport> {
    let text_mode = matches!(options.format, OutputFormat::Text);

    let mut config = load_config(options.config.as_deref())?;

    // Command-line values win over the config file
    if let Some(workbook) = &options.workbook {
        config.workbook = Some(workbook.clone());
    }
    if let Some(deck) = &options.deck {
        config.deck = Some(deck.clone());
    }
    if let Some(sheet) = &options.sheet {
        config.sheet.name = sheet.clone();
    }
    config.apply.geometry |= options.apply_geometry;
    config.apply.font_sizes |= options.apply_font_sizes;

    config.validate().context("Invalid configuration")?;

    let workbook_path = config
        .workbook
        .clone()
        .ok_or_else(|| anyhow::anyhow!("No workbook given (pass it as an argument or set it in the config)"))?;
    let deck_path = config
        .deck
        .clone()
        .ok_or_else(|| anyhow::anyhow!("No deck given (pass it as an argument or set it in the config)"))?;

    if text_mode {
        println!("placard v{}", placard_core::VERSION);
        println!(
            "Filling: {} -> {}",
            workbook_path.display(),
            deck_path.display()
        );
    }

    let sheet = (!config.sheet.name.is_empty()).then_some(config.sheet.name.as_str());
    let mut source = open_source(&workbook_path, sheet)
        .with_context(|| format!("Failed to open workbook: {}", workbook_path.display()))?;

    let mut deck = StickerDeck::open(&deck_path)
        .with_context(|| format!("Failed to open deck: {}", deck_path.display()))?;

    let report = run_fill(&config, &mut source, &mut deck, RetryPolicy::default())?;

    match options.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize report to JSON")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            print_report(&report);
        }
    }

    if options.dry_run {
        if text_mode {
            println!("Dry run: deck not saved");
        }
    } else {
        match &options.output {
            Some(target) => {
                deck.save_as(target)
                    .with_context(|| format!("Failed to save deck: {}", target.display()))?;
                if text_mode {
                    println!("Saved: {}", target.display());
                }
            }
            None => {
                deck.save()
                    .with_context(|| format!("Failed to save deck: {}", deck_path.display()))?;
                if text_mode {
                    println!("Saved: {}", deck_path.display());
                }
            }
        }
    }

    if options.strict && !report.is_clean() {
        std::process::exit(1);
    }

    Ok(report)
}

/// Print the text form of a fill report
fn print_report(report: &FillReport) {
    for missing in &report.missing_slides {
        eprintln!(
            "Warning: sticker {} maps to slide {}, which the deck does not have",
            missing.sticker, missing.slide
        );
    }
    for outcome in &report.outcomes {
        match &outcome.status {
            WriteStatus::Written { text } => {
                println!("  {}: {}", outcome.shape, text);
            }
            WriteStatus::SkippedVerticalText => {
                println!("  {}: skipped (vertical text)", outcome.shape);
            }
            status => {
                eprintln!("Warning: {}: {}", outcome.shape, status);
            }
        }
        if let Some(err) = &outcome.layout_error {
            eprintln!("Warning: {}: {}", outcome.shape, err);
        }
    }

    println!();
    println!("Fill complete!");
    println!("  {}", report);
}

/// Execute the inspect command
pub fn inspect_command(deck_path: &Path, config_path: Option<&Path>) -> Result<()> {
    println!("placard v{}", placard_core::VERSION);
    println!("Inspecting: {}", deck_path.display());

    let config = load_config(config_path)?;
    config.validate().context("Invalid configuration")?;

    let deck = StickerDeck::open(deck_path)
        .with_context(|| format!("Failed to open deck: {}", deck_path.display()))?;

    let slides_needed = slide_for(config.grid.total_stickers, config.grid.stickers_per_slide);
    println!(
        "  Slides: {} in deck, {} needed for {} stickers",
        deck.slide_count(),
        slides_needed,
        config.grid.total_stickers
    );

    let mut missing = 0u32;
    let mut vertical = 0u32;

    for sticker in 1..=config.grid.total_stickers {
        let slide = slide_for(sticker, config.grid.stickers_per_slide);
        if slide > deck.slide_count() {
            println!("  Sticker {}: slide {} missing", sticker, slide);
            missing += StickerField::all().len() as u32;
            continue;
        }
        for field in StickerField::all() {
            let name = field.shape_name(sticker);
            match deck.slide(slide).and_then(|s| s.shape(&name)) {
                Some(info) if info.vertical => vertical += 1,
                Some(_) => {}
                None => {
                    println!("  Missing: {} (slide {})", name, slide);
                    missing += 1;
                }
            }
        }
    }

    println!();
    if missing == 0 {
        println!("✓ All sticker shapes present");
    } else {
        println!("{} sticker shapes missing", missing);
    }
    if vertical > 0 {
        println!("{} shapes hold vertical text and will keep it", vertical);
    }

    Ok(())
}

/// Execute the init command
pub fn init_command(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            output.display()
        );
    }

    fs::write(output, starter_config_toml())
        .with_context(|| format!("Failed to write config: {}", output.display()))?;

    println!("Created: {}", output.display());
    Ok(())
}

/// Load configuration from a file or use defaults
fn load_config(config_path: Option<&Path>) -> Result<FillConfig> {
    match config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            FillConfig::from_toml_str(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()))
        }
        None => {
            // Try to find placard.toml in common locations
            let candidates = ["placard.toml", ".placard.toml"];
            for candidate in candidates {
                if Path::new(candidate).exists() {
                    let content = fs::read_to_string(candidate)?;
                    if let Ok(config) = FillConfig::from_toml_str(&content) {
                        return Ok(config);
                    }
                }
            }
            Ok(FillConfig::default())
        }
    }
}

/// Starter configuration with every default spelled out
fn starter_config_toml() -> String {
    r#"# placard configuration
# Paths may be absolute or relative to where placard runs.

# Workbook holding the sticker index (.xlsx, .xlsm, or .csv)
# workbook = "loto-index.xlsm"

# Presentation whose sticker shapes get filled
# deck = "sticker-sheets.pptx"

[sheet]
# Worksheet name; empty selects the first sheet
name = ""
# Worksheet row holding sticker 1 (rows above are headers)
first_data_row = 3

[grid]
stickers_per_slide = 6
total_stickers = 120
# Sticker origins on each slide, in points
column_lefts = [2.0, 507.0]
row_tops = [63.0, 245.0, 420.0]

[fields.point]
# Worksheet columns for isolation points 1-4 (1-based)
columns = [9, 10, 11, 12]
width = 450.43
height = 34.02
font_size = 20.0

[fields.amount]
column = 13
width = 32.03
height = 41.1
font_size = 22.0

[fields.cabinet]
column = 14
width = 134.12
height = 21.83
font_size = 10.0

[apply]
# Re-place and re-size each filled shape from the grid
geometry = false
# Set each filled shape's font size
font_sizes = false
"#
    .to_string()
}
