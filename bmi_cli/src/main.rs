use bmi_core::*;
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

const GAUGE_WIDTH: usize = 40;

#[derive(Parser)]
#[command(name = "bmi")]
#[command(about = "BMI calculator and history tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the record store if it does not exist yet
    Init {
        /// Also write the current settings to the config file if it is missing
        #[arg(long)]
        write_config: bool,
    },

    /// Calculate BMI from measurements and save the record
    Calc {
        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        email: String,

        /// Male, Female or Other (any label is accepted)
        #[arg(long, default_value = "")]
        gender: String,

        /// Weight in kg
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        weight: String,

        /// Height in cm
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        height: String,

        /// Dry run - show the result without saving it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show all saved records for an email
    History {
        #[arg(long)]
        email: String,
    },

    /// Show the BMI trend for an email
    Trend {
        #[arg(long)]
        email: String,
    },

    /// Export the records for an email to CSV
    Export {
        #[arg(long)]
        email: String,

        /// Output CSV file
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() {
    // Initialize logging
    bmi_core::logging::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::debug!("Command failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| config.data.data_dir.clone());

    match cli.command {
        Commands::Init { write_config } => cmd_init(&config, &data_dir, write_config),
        Commands::Calc {
            name,
            email,
            gender,
            weight,
            height,
            dry_run,
        } => {
            let raw = RawFields {
                name,
                email,
                gender,
                weight,
                height,
            };
            cmd_calc(&config, &data_dir, &raw, dry_run)
        }
        Commands::History { email } => cmd_history(&config, &data_dir, email.trim()),
        Commands::Trend { email } => cmd_trend(&config, &data_dir, email.trim()),
        Commands::Export { email, out } => cmd_export(&config, &data_dir, email.trim(), &out),
    }
}

fn cmd_init(config: &Config, data_dir: &Path, write_config: bool) -> Result<()> {
    let store = config.open_store(data_dir)?;
    println!("✓ Record store ready: {}", store.path().display());

    if write_config {
        let config_path = Config::default_config_path();
        if config_path.exists() {
            println!("  Config already present: {}", config_path.display());
        } else {
            let mut written = config.clone();
            written.data.data_dir = data_dir.to_path_buf();
            written.save()?;
            println!("✓ Config written: {}", config_path.display());
        }
    }
    Ok(())
}

fn cmd_calc(config: &Config, data_dir: &Path, raw: &RawFields, dry_run: bool) -> Result<()> {
    let draft = validate_and_compute(raw)?;
    if !GENDER_OPTIONS.contains(&draft.gender()) {
        tracing::info!("Gender {:?} is not one of {:?}", draft.gender(), GENDER_OPTIONS);
    }

    if dry_run {
        display_result(
            draft.user_name(),
            draft.email(),
            draft.gender(),
            draft.weight(),
            draft.height(),
            draft.bmi(),
            draft.category(),
        );
        display_gauge(draft.bmi(), draft.category());
        println!("\n[Dry run - not saving record]");
        return Ok(());
    }

    let mut store = config.open_store(data_dir)?;
    let record = save(&mut store, &draft)?;

    display_result(
        &record.user_name,
        &record.email,
        &record.gender,
        record.weight,
        record.height,
        record.bmi,
        record.category,
    );
    display_gauge(record.bmi, record.category);
    println!("\n✓ Record {} saved!", record.id);
    Ok(())
}

fn cmd_history(config: &Config, data_dir: &Path, email: &str) -> Result<()> {
    let store = config.open_store(data_dir)?;
    let history = history_for(&store, email)?;

    if history.is_empty() {
        println!("No data found for email: {}", email);
        return Ok(());
    }

    println!("Records for {}", email);
    println!();
    println!(
        "{:<20} {:>12} {:>12} {:>8}  {}",
        "Date", "Weight (kg)", "Height (cm)", "BMI", "Category"
    );
    for entry in &history {
        println!(
            "{:<20} {:>12} {:>12} {:>8.2}  {}",
            format_timestamp(&entry.timestamp),
            entry.weight,
            entry.height,
            entry.bmi,
            entry.category
        );
    }
    Ok(())
}

fn cmd_trend(config: &Config, data_dir: &Path, email: &str) -> Result<()> {
    let store = config.open_store(data_dir)?;
    let trend = trend_for(&store, email)?;

    if trend.is_empty() {
        println!("No BMI records found for this email.");
        return Ok(());
    }

    println!("BMI Trends for {}", email);
    println!();
    for point in &trend {
        let needle = gauge::needle_position(point.bmi) / gauge::AXIS_MAX;
        let filled = (needle * GAUGE_WIDTH as f64).round() as usize;
        println!(
            "{:<20} {:>6.2} {}",
            format_timestamp(&point.timestamp),
            point.bmi,
            "●".repeat(filled.max(1))
        );
    }
    Ok(())
}

fn cmd_export(config: &Config, data_dir: &Path, email: &str, out: &Path) -> Result<()> {
    let store = config.open_store(data_dir)?;
    let count = export_history_csv(&store, email, out)?;

    println!("✓ Exported {} records to CSV", count);
    println!("  CSV: {}", out.display());
    Ok(())
}

fn display_result(
    name: &str,
    email: &str,
    gender: &str,
    weight: f64,
    height: f64,
    bmi: f64,
    category: BmiCategory,
) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  BMI CALCULATED");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Name: {}", name);
    println!("  Email: {}", email);
    println!("  Gender: {}", gender);
    println!("  Weight: {} kg", weight);
    println!("  Height: {} cm", height);
    println!("  BMI: {}", bmi);
    println!("  Category: {}", category);
}

fn display_gauge(bmi: f64, category: BmiCategory) {
    let reading = Gauge::for_reading(BmiReading { bmi, category });
    let position = ((reading.fraction() * GAUGE_WIDTH as f64).round() as usize).min(GAUGE_WIDTH);

    let mut scale = String::with_capacity(GAUGE_WIDTH + 1);
    for i in 0..=GAUGE_WIDTH {
        let at = i as f64 * gauge::AXIS_MAX / GAUGE_WIDTH as f64;
        let symbol = match bmi_core::bmi::categorize(at) {
            BmiCategory::Underweight => '░',
            BmiCategory::NormalWeight => '▒',
            BmiCategory::Overweight => '▓',
            BmiCategory::Obese => '█',
        };
        scale.push(if i == position { '▼' } else { symbol });
    }

    println!();
    println!("  BMI Gauge  0 {} {}", scale, gauge::AXIS_MAX);
    println!(
        "  {:+.2} vs {} ({})",
        reading.delta,
        gauge::REFERENCE_BMI,
        reading.band.category
    );
}

fn format_timestamp(timestamp: &chrono::DateTime<chrono::Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
