// CLI command implementations
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use glob::glob;
use tagprobe::AudioFile;
use tracing::info;

use super::config::{Commands, Config};
use super::output::{FileReport, OutputFormatter};

/// Dispatch the parsed subcommand
pub fn run(config: &Config) -> Result<()> {
    let formatter = OutputFormatter::new(config.format, config.quiet);
    match &config.command {
        Commands::Read { files, output } => command_read(files, output.as_deref(), &formatter),
        Commands::Batch { directory, pattern } => command_batch(directory, pattern, &formatter),
        Commands::Detect { files } => command_detect(files, &formatter),
    }
}

/// Read metadata from files
fn command_read(files: &[String], output: Option<&str>, formatter: &OutputFormatter) -> Result<()> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("cannot create {path}"))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(std::io::stdout().lock()),
    };

    let paths: Vec<PathBuf> = files.iter().map(PathBuf::from).collect();
    let failed = read_all(&paths, formatter, &mut writer)?;
    writer.flush()?;

    if failed == paths.len() {
        bail!("no file could be read");
    }
    Ok(())
}

/// Batch read every matching file in a directory
fn command_batch(directory: &str, pattern: &str, formatter: &OutputFormatter) -> Result<()> {
    let glob_pattern = Path::new(directory).join(pattern);
    let glob_pattern = glob_pattern
        .to_str()
        .context("directory path is not valid UTF-8")?;

    let mut paths = Vec::new();
    for entry in glob(glob_pattern).with_context(|| format!("invalid glob pattern: {glob_pattern}"))? {
        match entry {
            Ok(path) if path.is_file() => paths.push(path),
            Ok(_) => {}
            Err(e) => formatter.print_error(&e.to_string()),
        }
    }
    info!(count = paths.len(), pattern = glob_pattern, "batch matched files");

    if paths.is_empty() {
        formatter.print_info(&format!("No files match {glob_pattern}"));
        return Ok(());
    }

    let mut writer = std::io::stdout().lock();
    read_all(&paths, formatter, &mut writer)?;
    Ok(())
}

/// Detect the parser each path selects
fn command_detect(files: &[String], formatter: &OutputFormatter) -> Result<()> {
    for path in files {
        let file = AudioFile::new(path);
        formatter.print_info(&format!("{}: {}", path, file.format));
    }
    Ok(())
}

/// Output every readable file, returning how many could not be read
fn read_all(paths: &[PathBuf], formatter: &OutputFormatter, writer: &mut impl Write) -> Result<usize> {
    let mut failed = 0;
    for path in paths {
        match FileReport::probe(&AudioFile::new(path)) {
            Ok(report) => formatter.output_report(&report, writer)?,
            Err(e) => {
                formatter.print_error(&format!("{}: {}", path.display(), e));
                failed += 1;
            }
        }
    }
    Ok(failed)
}
