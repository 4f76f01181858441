use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use radiochem::data::filter::{FrequencyWindow, LineFilter};
use radiochem::data::model::TableSummary;
use radiochem::data::species::series_counts;
use radiochem::data::synthetic::{antenna_temperature, EmissionParams, SyntheticLibrary};
use radiochem::export::{export_source, pretty_table, ExportFormat};
use radiochem::source::reference_rrls;
use radiochem::{Config, LineStatus, SourceCatalogue, TableKind};

/// Classify the spectral lines of planetary nebula catalogues.
#[derive(Parser, Debug)]
#[command(name = "radiochem", version, about)]
struct Cli {
    /// JSON configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding `<source>.my-lines.list` catalogues.
    #[arg(long, global = true)]
    catalogue_dir: Option<PathBuf>,

    /// Directory exported tables are written to.
    #[arg(long, global = true)]
    results_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split source catalogues into recombination lines, molecules and
    /// unidentified features.
    Classify {
        #[arg(required = true)]
        sources: Vec<String>,

        /// Keep only lines with this status (repeatable).
        #[arg(long)]
        status: Vec<LineStatus>,

        /// Keep only lines in this band (repeatable).
        #[arg(long)]
        band: Vec<String>,

        #[arg(long)]
        min_mhz: Option<f64>,

        #[arg(long)]
        max_mhz: Option<f64>,

        /// Print the full tables, not just the band summaries.
        #[arg(long)]
        table: bool,

        /// Write the unfiltered tables to the results directory.
        #[arg(long)]
        export: bool,

        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
    },

    /// Classify the reference `rrls` catalogue by element and series.
    Rrls,

    /// List synthetic lines with their antenna temperatures.
    Synthetic {
        #[arg(required = true)]
        molecules: Vec<String>,

        /// Directory holding `<molecule>/<molecule>.dat` files.
        #[arg(long)]
        synthetic_dir: Option<PathBuf>,

        /// Line width in km/s.
        #[arg(long, default_value_t = 1.0)]
        width: f64,

        #[arg(long)]
        dilution: Option<f64>,

        #[arg(long)]
        tau: Option<f64>,

        /// Upper-level column density in m^-2.
        #[arg(long, default_value_t = 1.0)]
        column_density: f64,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(dir) = cli.catalogue_dir {
        config.catalogue_dir = dir;
    }
    if let Some(dir) = cli.results_dir {
        config.results_dir = dir;
    }

    match cli.command {
        Command::Classify {
            sources,
            status,
            band,
            min_mhz,
            max_mhz,
            table,
            export,
            format,
        } => {
            let filter = build_filter(status, band, min_mhz, max_mhz);
            classify(&config, &sources, &filter, table, export.then_some(format))
        }
        Command::Rrls => {
            let rrls = reference_rrls(&config)?;
            println!("{}", pretty_table(&rrls)?);
            for ((class, series), count) in series_counts(&rrls) {
                println!("{:>8}: {count}", format!("{class}{series}"));
            }
            Ok(())
        }
        Command::Synthetic {
            molecules,
            synthetic_dir,
            width,
            dilution,
            tau,
            column_density,
        } => {
            let dir = synthetic_dir.unwrap_or_else(|| config.synthetic_dir.clone());
            let params = EmissionParams {
                width_km_s: width,
                dilution,
                tau,
                column_density,
            };
            synthetic(&dir, &molecules, &params)
        }
    }
}

fn build_filter(
    status: Vec<LineStatus>,
    band: Vec<String>,
    min_mhz: Option<f64>,
    max_mhz: Option<f64>,
) -> LineFilter {
    let window = match (min_mhz, max_mhz) {
        (None, None) => None,
        (lo, hi) => Some(FrequencyWindow::new(
            lo.unwrap_or(f64::NEG_INFINITY),
            hi.unwrap_or(f64::INFINITY),
        )),
    };
    LineFilter {
        statuses: (!status.is_empty()).then(|| status.into_iter().collect()),
        bands: (!band.is_empty()).then(|| band.into_iter().collect()),
        window,
    }
}

fn classify(
    config: &Config,
    sources: &[String],
    filter: &LineFilter,
    show_tables: bool,
    export: Option<ExportFormat>,
) -> Result<()> {
    let mut failed = Vec::new();

    for name in sources {
        let Some(source) = SourceCatalogue::open(config, name) else {
            failed.push(name.as_str());
            continue;
        };

        println!("== {name} ({} catalogue lines)", source.catalogue.len());
        for kind in TableKind::ALL {
            let rows = source.filtered(kind, filter);
            println!("{kind}: {}", TableSummary::from_records(&rows));
            if show_tables && !rows.is_empty() {
                println!("{}", pretty_table(&rows)?);
            }
        }

        if let Some(format) = export {
            for path in export_source(&source, &config.results_dir, format)? {
                println!("wrote {}", path.display());
            }
        }
    }

    if !failed.is_empty() {
        bail!("could not load: {}", failed.join(", "));
    }
    Ok(())
}

fn synthetic(dir: &Path, molecules: &[String], params: &EmissionParams) -> Result<()> {
    let library = SyntheticLibrary::load(dir, molecules)?;
    for (molecule, lines) in library.iter() {
        println!("== {molecule} ({} lines)", lines.len());
        for line in lines {
            println!(
                "{:>14.4} MHz  A = {:>10.3e} s^-1  T_A = {:>10.3e} K",
                line.frequency_mhz,
                line.einstein_a,
                antenna_temperature(line, params)
            );
        }
    }
    Ok(())
}
