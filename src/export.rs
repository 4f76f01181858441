use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use log::info;
use parquet::arrow::ArrowWriter;

use crate::data::model::LineRecord;
use crate::source::{SourceCatalogue, TableKind};

// ---------------------------------------------------------------------------
// Export format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Parquet,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Parquet => "parquet",
        }
    }

    /// Format implied by a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "parquet" | "pq" => Ok(ExportFormat::Parquet),
            other => bail!("Unsupported file extension: .{other}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Write a line table to `path`. Dispatch by extension.
///
/// * `.csv`     – header row, one line per record
/// * `.json`    – `[{ "species": ..., "frequency_MHz": ..., "band": ... }, ...]`
/// * `.parquet` – one record batch, schema from [`line_schema`]
pub fn export_table(records: &[LineRecord], path: &Path) -> Result<()> {
    match ExportFormat::from_path(path)? {
        ExportFormat::Csv => write_csv(records, path),
        ExportFormat::Json => write_json(records, path),
        ExportFormat::Parquet => write_parquet(records, path),
    }
}

/// Write the three tables of a source as `<dir>/<source>_<table>.<ext>`.
pub fn export_source(
    source: &SourceCatalogue,
    dir: &Path,
    format: ExportFormat,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating results directory {}", dir.display()))?;

    let mut written = Vec::with_capacity(TableKind::ALL.len());
    for kind in TableKind::ALL {
        let path = dir.join(format!("{}_{}.{}", source.name, kind.name(), format.extension()));
        export_table(source.table(kind), &path)
            .with_context(|| format!("exporting {} table of {}", kind, source.name))?;
        info!("wrote {} line(s) to {}", source.table(kind).len(), path.display());
        written.push(path);
    }
    Ok(written)
}

/// Render a line table as a text grid.
pub fn pretty_table(records: &[LineRecord]) -> Result<String> {
    let batch = to_record_batch(records)?;
    let table = pretty_format_batches(&[batch]).context("formatting line table")?;
    Ok(table.to_string())
}

// ---------------------------------------------------------------------------
// CSV / JSON writers
// ---------------------------------------------------------------------------

fn write_csv(records: &[LineRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    for (row, record) in records.iter().enumerate() {
        writer
            .serialize(record)
            .with_context(|| format!("CSV row {row}"))?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_json(records: &[LineRecord], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path).context("creating JSON file")?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), records)
        .context("writing JSON")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Arrow / Parquet
// ---------------------------------------------------------------------------

/// Arrow schema of an exported line table.
pub fn line_schema() -> Schema {
    Schema::new(vec![
        Field::new("status", DataType::Utf8, true),
        Field::new("species", DataType::Utf8, false),
        Field::new("frequency_MHz", DataType::Float64, false),
        Field::new("upper_level", DataType::Utf8, false),
        Field::new("lower_level", DataType::Utf8, false),
        Field::new("origin", DataType::Utf8, false),
        Field::new("band", DataType::Utf8, true),
        Field::new("telescope", DataType::Utf8, true),
    ])
}

/// Columnar copy of a line table.
pub fn to_record_batch(records: &[LineRecord]) -> Result<RecordBatch> {
    let status: Vec<Option<String>> = records
        .iter()
        .map(|r| r.status.map(|s| s.code().to_string()))
        .collect();

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(status)),
        Arc::new(StringArray::from_iter_values(records.iter().map(|r| &r.species))),
        Arc::new(Float64Array::from_iter_values(records.iter().map(|r| r.frequency_mhz))),
        Arc::new(StringArray::from_iter_values(records.iter().map(|r| &r.upper_level))),
        Arc::new(StringArray::from_iter_values(records.iter().map(|r| &r.lower_level))),
        Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.origin.as_str()))),
        Arc::new(StringArray::from(
            records.iter().map(|r| r.band.as_deref()).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            records.iter().map(|r| r.telescope.as_deref()).collect::<Vec<_>>(),
        )),
    ];

    RecordBatch::try_new(Arc::new(line_schema()), columns).context("building record batch")
}

fn write_parquet(records: &[LineRecord], path: &Path) -> Result<()> {
    let batch = to_record_batch(records)?;
    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}
