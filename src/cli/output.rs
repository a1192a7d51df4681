// Output formatting for CLI

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use tagprobe::{AudioFile, AudioFormat, MetadataRecord};

use super::config::OutputFormat;

/// One output row: a file, its parsed record and any recovered problems
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: String,
    pub format: AudioFormat,
    #[serde(flatten)]
    pub record: MetadataRecord,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
}

impl FileReport {
    /// Probe a file; fatal errors are returned for the caller to report
    pub fn probe(file: &AudioFile) -> tagprobe::Result<Self> {
        let report = file.probe()?;
        Ok(FileReport {
            path: file.path.display().to_string(),
            format: report.format,
            record: report.record,
            issues: report.issues.iter().map(ToString::to_string).collect(),
        })
    }
}

/// Format and output data
pub struct OutputFormatter {
    format: OutputFormat,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Output one file report
    pub fn output_report(&self, report: &FileReport, writer: &mut impl Write) -> Result<()> {
        let value = serde_json::to_value(report)?;
        match self.format {
            OutputFormat::Pretty => writeln!(writer, "{}", serde_json::to_string_pretty(&value)?)?,
            OutputFormat::Json => writeln!(writer, "{}", serde_json::to_string(&value)?)?,
            OutputFormat::KeyValue => self.output_key_value(&value, writer)?,
            OutputFormat::Table => self.output_table(&value, writer)?,
        }
        Ok(())
    }

    /// Output as key-value pairs
    fn output_key_value(&self, value: &serde_json::Value, writer: &mut impl Write) -> Result<()> {
        if let Some(obj) = value.as_object() {
            for (key, value) in obj {
                writeln!(writer, "{}: {}", key, format_value(value))?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }

    /// Output as table
    fn output_table(&self, value: &serde_json::Value, writer: &mut impl Write) -> Result<()> {
        if let Some(obj) = value.as_object() {
            let max_key_len = obj.keys().map(|k| k.len()).max().unwrap_or(0);

            writeln!(writer, "{}", "=".repeat(max_key_len + 30))?;
            for (key, value) in obj {
                writeln!(
                    writer,
                    "{:<width$}{}",
                    format!("{}:", key),
                    format_value(value),
                    width = max_key_len + 2
                )?;
            }
            writeln!(writer, "{}", "=".repeat(max_key_len + 30))?;
        }
        Ok(())
    }

    /// Print error message
    pub fn print_error(&self, message: &str) {
        eprintln!("✗ {}", message);
    }

    /// Print info message
    pub fn print_info(&self, message: &str) {
        if !self.quiet {
            println!("  {}", message);
        }
    }
}

/// Format a JSON value for display
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "(null)".to_string(),
        serde_json::Value::Array(arr) => arr
            .iter()
            .map(format_value)
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}
