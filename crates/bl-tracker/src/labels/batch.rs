use super::LabelCorrector;
use serde::Serialize;
use std::io::{Read, Write};

/// Header names accepted for the label column, compared case-insensitively.
const LABEL_COLUMNS: &[&str] = &["label", "libelle"];

#[derive(Debug)]
pub enum LabelBatchError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingLabelColumn,
}

impl std::fmt::Display for LabelBatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelBatchError::Io(err) => write!(f, "failed to read or write labels: {}", err),
            LabelBatchError::Csv(err) => write!(f, "invalid label CSV data: {}", err),
            LabelBatchError::MissingLabelColumn => {
                write!(f, "label CSV must have a 'label' or 'libelle' column")
            }
        }
    }
}

impl std::error::Error for LabelBatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LabelBatchError::Io(err) => Some(err),
            LabelBatchError::Csv(err) => Some(err),
            LabelBatchError::MissingLabelColumn => None,
        }
    }
}

impl From<std::io::Error> for LabelBatchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for LabelBatchError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub rows: usize,
    pub changed: usize,
}

#[derive(Debug, Serialize)]
struct CorrectionRow<'a> {
    original: &'a str,
    corrected: &'a str,
}

/// Corrects every label of a delivery-note export and writes
/// `original,corrected` rows in input order.
pub fn correct_csv<R: Read, W: Write>(
    corrector: &LabelCorrector,
    reader: R,
    writer: W,
) -> Result<BatchSummary, LabelBatchError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let column = label_column(csv_reader.headers()?)?;

    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut summary = BatchSummary::default();

    for record in csv_reader.records() {
        let record = record?;
        let original = record.get(column).unwrap_or_default();
        let corrected = corrector.correct(original);

        summary.rows += 1;
        if corrected != original {
            summary.changed += 1;
        }

        csv_writer.serialize(CorrectionRow {
            original,
            corrected: &corrected,
        })?;
    }

    csv_writer.flush()?;
    tracing::debug!(rows = summary.rows, changed = summary.changed, "label batch corrected");
    Ok(summary)
}

fn label_column(headers: &csv::StringRecord) -> Result<usize, LabelBatchError> {
    headers
        .iter()
        .position(|header| {
            let header = header.trim_start_matches('\u{feff}');
            LABEL_COLUMNS
                .iter()
                .any(|name| header.eq_ignore_ascii_case(name))
        })
        .ok_or(LabelBatchError::MissingLabelColumn)
}
