use bl_tracker::error::AppError;
use bl_tracker::labels::{correct_csv, CorrectedLabel, LabelCorrector};
use clap::Args;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct CorrectArgs {
    /// Raw product labels to correct
    #[arg(required = true)]
    pub(crate) labels: Vec<String>,
    /// Print the brand, description and quantity blocks for each label
    #[arg(long)]
    pub(crate) explain: bool,
    /// Print each analyzed label as one JSON object per line
    #[arg(long, conflicts_with = "explain")]
    pub(crate) json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LabelFormat {
    Plain,
    Explain,
    Json,
}

impl CorrectArgs {
    pub(crate) fn format(&self) -> LabelFormat {
        if self.json {
            LabelFormat::Json
        } else if self.explain {
            LabelFormat::Explain
        } else {
            LabelFormat::Plain
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct CorrectCsvArgs {
    /// CSV export with a `label` or `libelle` column
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Destination for `original,corrected` rows (defaults to stdout)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run_correct(args: CorrectArgs) -> Result<(), AppError> {
    let corrector = LabelCorrector::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let format = args.format();

    for raw in &args.labels {
        let label = corrector.analyze(raw);
        render_label(&mut out, &label, format)?;
    }

    Ok(())
}

pub(crate) fn run_correct_csv(args: CorrectCsvArgs) -> Result<(), AppError> {
    let corrector = LabelCorrector::new();
    let reader = BufReader::new(File::open(&args.input)?);

    let summary = match args.output {
        Some(path) => correct_csv(&corrector, reader, BufWriter::new(File::create(path)?))?,
        None => correct_csv(&corrector, reader, io::stdout().lock())?,
    };

    eprintln!(
        "Corrected {} labels ({} changed)",
        summary.rows, summary.changed
    );
    Ok(())
}

pub(crate) fn render_label<W: Write>(
    out: &mut W,
    label: &CorrectedLabel,
    format: LabelFormat,
) -> io::Result<()> {
    match format {
        LabelFormat::Plain => return writeln!(out, "{}", label.corrected),
        LabelFormat::Json => {
            serde_json::to_writer(&mut *out, label)?;
            return writeln!(out);
        }
        LabelFormat::Explain => writeln!(out, "{}", label.corrected)?,
    }

    writeln!(out, "  original:    {}", label.original)?;
    writeln!(out, "  brand:       {}", label.brand.as_deref().unwrap_or("-"))?;
    writeln!(
        out,
        "  description: {}",
        label.description.as_deref().unwrap_or("-")
    )?;
    if label.quantity.is_empty() {
        writeln!(out, "  quantity:    -")?;
    } else {
        for token in &label.quantity {
            writeln!(out, "  quantity:    {} ({})", token.text, token.category.label())?;
        }
    }

    Ok(())
}
