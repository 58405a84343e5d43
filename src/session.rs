use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::PlotStyle;
use crate::data::angle::extract_angle;
use crate::data::error::ConvertError;
use crate::data::loader::load_file;
use crate::data::model::RotatedFrame;
use crate::data::rotate::rotate;
use crate::export::{artifact_path, csv::export_csv, png::export_png};

// ---------------------------------------------------------------------------
// Commands – what a front end can ask for
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Replace the selection.
    SelectFiles(Vec<PathBuf>),
    /// Write `<name>.csv` for every selected file into the directory.
    ExportCsv(PathBuf),
    /// Write `<name>.png` for every selected file into the directory.
    ExportPng(PathBuf),
}

impl Command {
    /// Status text while the command runs.
    pub fn busy_label(&self) -> &'static str {
        match self {
            Command::SelectFiles(_) => "Loading data",
            Command::ExportCsv(_) => "Creating CSVs",
            Command::ExportPng(_) => "Creating PNGs",
        }
    }
}

// ---------------------------------------------------------------------------
// BatchReport
// ---------------------------------------------------------------------------

/// Outcome of one export over the whole selection.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, anyhow::Error)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// One line for the status bar.
    pub fn summary(&self) -> String {
        let mut s = format!("{} written", self.written.len());
        if let Some((path, err)) = self.failed.first() {
            s.push_str(&format!(
                ", {} failed ({}: {:#})",
                self.failed.len(),
                file_name(path),
                err
            ));
        }
        s
    }
}

// ---------------------------------------------------------------------------
// ConversionSession – owns the file selection
// ---------------------------------------------------------------------------

/// The set of files the user picked, and the operations on them.
/// Files are converted one after another; one file failing does not stop
/// the others.
#[derive(Debug, Default)]
pub struct ConversionSession {
    files: Vec<PathBuf>,
}

impl ConversionSession {
    /// Replace the selection wholesale.
    pub fn select_files(&mut self, files: Vec<PathBuf>) {
        log::info!("Selected {} file(s)", files.len());
        self.files = files;
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn export_csv(&self, out_dir: &Path) -> BatchReport {
        self.run_batch("CSV", |src| convert_to_csv(src, out_dir))
    }

    pub fn export_png(&self, out_dir: &Path, style: &PlotStyle) -> BatchReport {
        self.run_batch("PNG", |src| convert_to_png(src, out_dir, style))
    }

    /// Dispatch a [`Command`]. Exports return their report.
    pub fn execute(&mut self, command: Command, style: &PlotStyle) -> Option<BatchReport> {
        match command {
            Command::SelectFiles(files) => {
                self.select_files(files);
                None
            }
            Command::ExportCsv(dir) => Some(self.export_csv(&dir)),
            Command::ExportPng(dir) => Some(self.export_png(&dir, style)),
        }
    }

    fn run_batch<F>(&self, what: &str, mut convert: F) -> BatchReport
    where
        F: FnMut(&Path) -> Result<PathBuf>,
    {
        let mut report = BatchReport::default();
        for src in &self.files {
            match convert(src) {
                Ok(dest) => {
                    log::info!("Wrote {}", dest.display());
                    report.written.push(dest);
                }
                Err(e) => {
                    let kind = e.downcast_ref::<ConvertError>().map(ConvertError::kind);
                    log::error!("{what} export failed [{kind:?}]: {e:#}");
                    report.failed.push((src.clone(), e));
                }
            }
        }
        log::info!(
            "{what} export: {} written, {} failed",
            report.written.len(),
            report.failed.len()
        );
        report
    }
}

// ---------------------------------------------------------------------------
// Single-file conversions
// ---------------------------------------------------------------------------

/// Last path component, used for titles and artifact names.
pub fn file_name(source: &Path) -> String {
    source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.to_string_lossy().into_owned())
}

/// Parse `source` and write it unchanged as `<out_dir>/<name>.csv`.
pub fn convert_to_csv(source: &Path, out_dir: &Path) -> Result<PathBuf> {
    let table = load_file(source).with_context(|| format!("reading {}", source.display()))?;
    let dest = artifact_path(out_dir, source, "csv");
    export_csv(&table, &dest).with_context(|| format!("writing {}", dest.display()))?;
    Ok(dest)
}

/// Parse, rotate and plot `source` as `<out_dir>/<name>.png`.
pub fn convert_to_png(source: &Path, out_dir: &Path, style: &PlotStyle) -> Result<PathBuf> {
    let frame = load_frame(source)?;
    let dest = artifact_path(out_dir, source, "png");
    export_png(&frame, &file_name(source), &dest, style)
        .with_context(|| format!("writing {}", dest.display()))?;
    Ok(dest)
}

/// Parse `source` and rotate it by the angle in its file name.
pub fn load_frame(source: &Path) -> Result<RotatedFrame> {
    let name = file_name(source);
    let angle = extract_angle(&name)?;
    log::debug!("{name}: angle {angle}°");

    let table = load_file(source).with_context(|| format!("reading {}", source.display()))?;
    let frame = rotate(&table, angle).with_context(|| format!("rotating {name}"))?;
    Ok(frame)
}
