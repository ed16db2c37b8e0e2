//! Result tables.
//!
//! Three whitespace-separated tables are written next to each other:
//!
//! - `<base>_match.dat`: correct selections per strategy, valid and existing
//!   counts, one row per inlier threshold
//! - `<base>_error.dat`: mean selection error per strategy, same layout
//! - `<base>_time.dat`: one row of phase totals in seconds
//!
//! where `<base>` is `<stem>_<detector>_<descriptor>_<distance>_NN<kkkk>`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;

use super::classifier::INLIER_THRESHOLDS;
use super::statistics::EvaluationSummary;

/// Components of the output file names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputNames {
    /// Output path prefix, usually the dataset path without extension.
    pub stem: PathBuf,
    /// Detector tag.
    pub detector: String,
    /// Descriptor tag.
    pub descriptor: String,
    /// Distance tag.
    pub distance: String,
    /// Neighbourhood size.
    pub neighborhood: usize,
}

impl OutputNames {
    /// Shared prefix of all three tables.
    pub fn base(&self) -> PathBuf {
        let stem = self
            .stem
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = format!(
            "{}_{}_{}_{}_NN{:04}",
            stem, self.detector, self.descriptor, self.distance, self.neighborhood
        );
        self.stem.with_file_name(name)
    }

    /// Path of the match table.
    pub fn match_path(&self) -> PathBuf {
        self.suffixed("match.dat")
    }

    /// Path of the error table.
    pub fn error_path(&self) -> PathBuf {
        self.suffixed("error.dat")
    }

    /// Path of the time table.
    pub fn time_path(&self) -> PathBuf {
        self.suffixed("time.dat")
    }

    fn suffixed(&self, suffix: &str) -> PathBuf {
        let base = self.base();
        let mut name = base
            .file_name()
            .map(|s| s.to_os_string())
            .unwrap_or_default();
        name.push("_");
        name.push(suffix);
        base.with_file_name(name)
    }
}

fn threshold_list() -> String {
    INLIER_THRESHOLDS
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Write the match table.
pub fn write_match_table<W: Write>(out: &mut W, summary: &EvaluationSummary) -> Result<()> {
    writeln!(out, "# Number of matches according to various strategies")?;
    writeln!(
        out,
        "# The valid matches are the one with at least n correspondences in the inlier set"
    )?;
    writeln!(out, "# where n = {{{}}}, one for each line", threshold_list())?;
    writeln!(out, "# optimal \t correspondence \t residual \t valid \t existing")?;
    for row in &summary.rows {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            row.matches.optimal, row.matches.by_inliers, row.matches.by_residual, row.valid, row.exist
        )?;
    }
    Ok(())
}

/// Write the error table. Undefined means are written as `undefined`.
pub fn write_error_table<W: Write>(out: &mut W, summary: &EvaluationSummary) -> Result<()> {
    writeln!(out, "# Mean error according to various strategies")?;
    writeln!(
        out,
        "# The valid matches are the one with at least n correspondences in the inlier set"
    )?;
    writeln!(out, "# where n = {{{}}}, one for each line", threshold_list())?;
    writeln!(out, "# optimal \t correspondence \t residual \t valid \t existing")?;
    for row in &summary.rows {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            row.mean_errors.optimal,
            row.mean_errors.by_inliers,
            row.mean_errors.by_residual,
            row.valid,
            row.exist
        )?;
    }
    Ok(())
}

/// Write the time table.
pub fn write_time_table<W: Write>(out: &mut W, summary: &EvaluationSummary) -> Result<()> {
    let t = &summary.timings;
    writeln!(out, "# Total time spent for the various steps")?;
    writeln!(out, "# detection \t description \t RANSAC \t Vocabulary")?;
    writeln!(
        out,
        "{}\t{}\t{}\t{}",
        t.detection_secs, t.description_secs, t.verification_secs, t.candidate_generation_secs
    )?;
    Ok(())
}

fn write_file(path: &Path, write: impl FnOnce(&mut BufWriter<File>) -> Result<()>) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write(&mut out)?;
    out.flush()?;
    Ok(())
}

/// Write all three tables and return their paths.
pub fn write_tables(names: &OutputNames, summary: &EvaluationSummary) -> Result<[PathBuf; 3]> {
    let paths = [names.match_path(), names.error_path(), names.time_path()];

    write_file(&paths[0], |out| write_match_table(out, summary))?;
    write_file(&paths[1], |out| write_error_table(out, summary))?;
    write_file(&paths[2], |out| write_time_table(out, summary))?;

    for path in &paths {
        log::info!("Wrote {}", path.display());
    }
    Ok(paths)
}

/// Write the summary as pretty-printed JSON.
pub fn write_json_summary(path: &Path, summary: &EvaluationSummary) -> Result<()> {
    write_file(path, |out| {
        serde_json::to_writer_pretty(&mut *out, summary)?;
        writeln!(out)?;
        Ok(())
    })?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
