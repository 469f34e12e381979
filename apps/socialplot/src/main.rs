//! socialplot - render engagement charts from CSV files
//!
//! Usage:
//!   socialplot render [--config plots.toml] [--out-dir charts]
//!   socialplot boxplot --input socialMedia.csv --output boxplot.svg
//!   socialplot barplot --input socialMediaAvg.csv --output barplot.svg
//!   socialplot lineplot --input socialMediaTime.csv --output lineplot.svg
//!   socialplot summarize --input socialMedia.csv

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use socialplot_core::{
    render_all, render_chart, summarize_file, BarplotSource, BoxplotSource, ChartKind,
    ChartOverrides, LineplotSource, PlotConfig,
};
use socialplot_stats::DEFAULT_DATE_FORMAT;

#[derive(Parser)]
#[command(name = "socialplot")]
#[command(about = "Boxplots, grouped bar plots and line plots of social media engagement")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every chart listed in a config file
    Render {
        /// Config file (defaults to ./socialplot.toml, then the user config directory)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Directory for rendered charts, overriding the config
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Likes per platform as a boxplot
    Boxplot {
        #[command(flatten)]
        io: ChartIo,
        #[arg(long, default_value = "Platform")]
        category: String,
        #[arg(long, default_value = "Likes")]
        value: String,
    },
    /// Average likes per platform and post type as grouped bars
    Barplot {
        #[command(flatten)]
        io: ChartIo,
        #[arg(long, default_value = "Platform")]
        group: String,
        #[arg(long, default_value = "PostType")]
        category: String,
        #[arg(long, default_value = "AvgLikes")]
        value: String,
        /// Input holds per-post rows; average them per (group, category)
        #[arg(long)]
        average: bool,
    },
    /// Average likes over time as a line plot
    Lineplot {
        #[command(flatten)]
        io: ChartIo,
        #[arg(long, default_value = "Date")]
        date: String,
        #[arg(long, default_value = "AvgLikes")]
        value: String,
        #[arg(long, default_value = DEFAULT_DATE_FORMAT)]
        date_format: String,
    },
    /// Print per-group five-number summaries as JSON
    Summarize {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = "Platform")]
        group: String,
        #[arg(long, default_value = "Likes")]
        value: String,
    },
}

/// Input, output and chart overrides shared by single-chart commands
#[derive(Args)]
struct ChartIo {
    /// CSV or TSV source file
    #[arg(long)]
    input: PathBuf,
    /// SVG file to write
    #[arg(long)]
    output: PathBuf,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
}

impl ChartIo {
    fn overrides(&self) -> ChartOverrides {
        ChartOverrides {
            width: self.width,
            height: self.height,
            title: self.title.clone(),
            ..ChartOverrides::default()
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("socialplot=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render { config, out_dir } => {
            let path = config
                .or_else(PlotConfig::discover)
                .ok_or("no config file given and none found")?;
            let mut plot_config = PlotConfig::load(&path)?;
            if out_dir.is_some() {
                plot_config.out_dir = out_dir;
            }
            for written in render_all(&plot_config)? {
                println!("{}", written.display());
            }
        }
        Commands::Boxplot {
            io,
            category,
            value,
        } => {
            let mut source = BoxplotSource::new(&io.input);
            source.category = category;
            source.value = value;
            source.output = Some(io.output.clone());
            source.chart = io.overrides();
            let config = PlotConfig {
                boxplot: Some(source),
                ..PlotConfig::default()
            };
            render_single(&config, ChartKind::Boxplot)?;
        }
        Commands::Barplot {
            io,
            group,
            category,
            value,
            average,
        } => {
            let mut source = BarplotSource::new(&io.input);
            source.group = group;
            source.category = category;
            source.value = value;
            source.average = average;
            source.output = Some(io.output.clone());
            source.chart = io.overrides();
            let config = PlotConfig {
                barplot: Some(source),
                ..PlotConfig::default()
            };
            render_single(&config, ChartKind::Barplot)?;
        }
        Commands::Lineplot {
            io,
            date,
            value,
            date_format,
        } => {
            let mut source = LineplotSource::new(&io.input);
            source.date = date;
            source.value = value;
            source.date_format = date_format;
            source.output = Some(io.output.clone());
            source.chart = io.overrides();
            let config = PlotConfig {
                lineplot: Some(source),
                ..PlotConfig::default()
            };
            render_single(&config, ChartKind::Lineplot)?;
        }
        Commands::Summarize {
            input,
            group,
            value,
        } => {
            let summaries = summarize_file(&input, &group, &value)?;
            let groups: Vec<_> = summaries.values().collect();
            println!("{}", serde_json::to_string_pretty(&groups)?);
        }
    }

    Ok(())
}

fn render_single(config: &PlotConfig, kind: ChartKind) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;
    if let Some(path) = render_chart(config, kind)? {
        info!(chart = kind.name(), path = %path.display(), "Done");
        println!("{}", path.display());
    }
    Ok(())
}
