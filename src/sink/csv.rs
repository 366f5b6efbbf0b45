//! CSV file sink with an explicit per-value quote policy.
//!
//! Quoting is decided per cell variant, not by a generic "quote everything
//! non-numeric" rule: that rule would also quote booleans, and downstream
//! consumers expect them as bare tokens.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::error::SinkError;
use super::types::{CsvValue, Dataset, DatasetBatch};

/// Writes finished datasets as CSV files into an output directory.
pub struct CsvSink {
    output_dir: PathBuf,
}

impl CsvSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write one `<Name>.csv` per non-empty dataset, creating the output
    /// directory if absent. Empty datasets produce no file.
    ///
    /// Returns the paths written, in dataset order.
    pub fn write_batch(&self, batch: &DatasetBatch) -> Result<Vec<PathBuf>, SinkError> {
        std::fs::create_dir_all(&self.output_dir)?;

        let mut written = Vec::new();
        for dataset in batch.datasets() {
            if dataset.is_empty() {
                tracing::debug!("Dataset {} is empty, no file written", dataset.kind().name());
                continue;
            }

            let path = self
                .output_dir
                .join(format!("{}.csv", dataset.kind().name()));
            write_dataset(dataset, &path)?;
            tracing::info!("Saved {} ({} rows)", path.display(), dataset.len());
            written.push(path);
        }

        Ok(written)
    }
}

fn write_dataset(dataset: &Dataset, path: &Path) -> Result<(), SinkError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    // Header cells are textual and therefore quoted.
    let header: Vec<String> = dataset
        .kind()
        .columns()
        .iter()
        .map(|column| quote(column))
        .collect();
    writeln!(writer, "{}", header.join(","))?;

    for row in dataset.rows() {
        let cells: Vec<String> = row.iter().map(render_cell).collect();
        writeln!(writer, "{}", cells.join(","))?;
    }

    writer.flush()?;
    Ok(())
}

/// Render one cell: text quoted, numbers as parsed, booleans as bare
/// `true`/`false` tokens, null as an empty cell.
fn render_cell(value: &CsvValue) -> String {
    match value {
        CsvValue::Null => String::new(),
        CsvValue::Bool(flag) => flag.to_string(),
        CsvValue::Number(number) => number.to_string(),
        CsvValue::Text(text) => quote(text),
    }
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::types::TableKind;

    fn number(raw: &str) -> CsvValue {
        CsvValue::Number(raw.parse().unwrap())
    }

    #[test]
    fn test_boolean_renders_as_bare_token() {
        assert_eq!(render_cell(&CsvValue::Bool(true)), "true");
        assert_eq!(render_cell(&CsvValue::Bool(false)), "false");
    }

    #[test]
    fn test_text_is_quoted_and_numbers_are_not() {
        assert_eq!(render_cell(&CsvValue::text("abc123")), "\"abc123\"");
        assert_eq!(render_cell(&number("42")), "42");
        assert_eq!(render_cell(&number("12.5")), "12.5");
    }

    #[test]
    fn test_null_renders_empty() {
        assert_eq!(render_cell(&CsvValue::Null), "");
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        assert_eq!(
            render_cell(&CsvValue::text("a \"quoted\" brand")),
            "\"a \"\"quoted\"\" brand\""
        );
    }

    #[test]
    fn test_write_batch_skips_empty_datasets() {
        let dir = std::env::temp_dir().join(format!(
            "offer-pricing-etl-test-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);

        let mut batch = DatasetBatch::new();
        batch.dataset_mut(TableKind::DynamicPriceRange).push(vec![
            CsvValue::text("ApplyDynamicPriceRange"),
            CsvValue::text("offer-1"),
            number("10"),
            number("12"),
            number("20"),
            number("2"),
            CsvValue::text("05/09/2021"),
        ]);

        let sink = CsvSink::new(&dir);
        let written = sink.write_batch(&batch).unwrap();

        assert_eq!(written.len(), 1);
        assert!(written[0].ends_with("DynamicPriceRange.csv"));
        assert!(!dir.join("CuratedOfferOptions.csv").exists());
        assert!(!dir.join("DynamicPriceOption.csv").exists());

        let content = std::fs::read_to_string(&written[0]).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "\"Provider\",\"OfferId\",\"MinGlobal\",\"MinRecommended\",\"MaxRecommended\",\"DifferenceMinRecommendMinTheory\",\"EnqueuedTimeSP\""
        );
        assert_eq!(
            lines.next().unwrap(),
            "\"ApplyDynamicPriceRange\",\"offer-1\",10,12,20,2,\"05/09/2021\""
        );
        assert!(lines.next().is_none());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
