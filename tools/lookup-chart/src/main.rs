use argh::FromArgs;
use lookup_chart::api::presets;
use lookup_chart::prelude::*;
use lookup_chart::render::summary_table::{format_means_table, format_run_table};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Renders grouped bar charts of lookup-time benchmark results
#[derive(FromArgs, Debug)]
pub struct Args {
    /// JSON configuration file; takes precedence over --preset
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// built-in configuration: hash-sizes, hash-sizes-ms or k-values (default: hash-sizes)
    #[argh(option, short = 'p', default = "String::from(presets::PRESET_NAMES[0])")]
    preset: String,

    /// directory holding the per-drive result folders (default: .)
    #[argh(option, short = 'i', default = "PathBuf::from(\".\")")]
    input: PathBuf,

    /// K-value CSV file for the k-values preset; may be repeated
    #[argh(option)]
    csv: Vec<PathBuf>,

    /// directory the charts are written to (default: . or the configured one)
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,

    /// image format: png or svg
    #[argh(option, short = 'f')]
    format: Option<ImageFormat>,

    /// skip sources without any samples instead of drawing all-zero charts
    #[argh(switch, short = 's')]
    skip_empty: bool,

    /// log level (trace, debug, info, warn, error) (default: info)
    #[argh(option, default = "String::from(\"info\")")]
    log_level: String,
}

fn build_config(args: &Args) -> Result<ChartConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => ChartConfig::from_json_file(path)?,
        None => presets::by_name(
            &args.preset,
            &args.input,
            &args.csv,
            args.output.as_deref().unwrap_or(Path::new(".")),
        )?,
    };

    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    if args.skip_empty {
        config.empty_source_policy = EmptySourcePolicy::Skip;
    }

    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = argh::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = build_config(&args)?;

    println!("📊 Rendering lookup time charts:");
    println!("Sources: {}", config.sources.len());
    println!("Output directory: {}", config.output_dir.display());
    println!("Format: {}", config.format.extension());
    println!();

    let report = run(&config)?;

    for source in &report.sources {
        let title = format!("{} ({})", source.source, source.drive);
        println!("{}", format_means_table(&source.chart, Some(&title)));
        println!();
    }

    println!("{}", format_run_table(&report, Some("Run Summary")));
    println!(
        "✅ {} chart(s) written, {} source(s) skipped",
        report.rendered(),
        report.skipped()
    );

    if report.failed() > 0 {
        return Err(format!("{} chart(s) failed to render", report.failed()).into());
    }

    Ok(())
}
