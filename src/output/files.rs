//! Run artifact files: raw collected data, per-term partial reports, and the
//! final synthesis report.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, Utc};
use tracing::info;

use crate::constants::output as output_constants;
use crate::types::{
    RawDataset, RawMetadata, Result, RunId, RunStats, TermPages, TermResult, WebloomError,
};

const RULE_WIDE: &str =
    "================================================================================";
const RULE_NARROW: &str = "==================================================";

/// Resolves artifact paths for one run
pub struct OutputFiles {
    dir: PathBuf,
    run_id: RunId,
}

impl OutputFiles {
    pub fn new(dir: impl Into<PathBuf>, run_id: RunId) -> Self {
        Self {
            dir: dir.into(),
            run_id,
        }
    }

    /// Create the output directory if it does not exist yet.
    ///
    /// Must run before any write; a configured directory is not assumed to
    /// be present.
    pub fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| WebloomError::DataFile {
            path: self.dir.clone(),
            message: format!("cannot create output directory: {e}"),
        })
    }

    pub fn raw_data_path(&self) -> PathBuf {
        self.dir.join(self.run_id.raw_data_file())
    }

    pub fn partial_report_path(&self) -> PathBuf {
        self.dir.join(self.run_id.partial_report_file())
    }

    pub fn final_report_path(&self) -> PathBuf {
        self.dir.join(self.run_id.final_report_file())
    }

    /// Serialize the collected dataset as pretty JSON
    pub fn write_raw(&self, dataset: &RawDataset) -> Result<PathBuf> {
        let path = self.raw_data_path();
        let json = serde_json::to_string_pretty(dataset)?;
        std::fs::write(&path, json).map_err(|e| WebloomError::DataFile {
            path: path.clone(),
            message: format!("cannot write: {e}"),
        })?;
        info!(path = %path.display(), "Raw data written");
        Ok(path)
    }
}

/// Build the dataset wrapper for freshly collected pages
pub fn build_dataset(terms: Vec<TermPages>, source_file: &str) -> RawDataset {
    let url_count = terms.iter().map(|t| t.pages.len()).sum();
    RawDataset {
        metadata: RawMetadata {
            collected_at: Utc::now(),
            term_count: terms.len(),
            url_count,
            source_file: source_file.to_string(),
            version: output_constants::RAW_DATA_VERSION.to_string(),
        },
        data: terms,
    }
}

/// Read a previously written raw-data file.
///
/// Malformed or missing files surface as a data-file error naming the path;
/// the resummarize path reports that and aborts without writing anything.
pub fn read_raw(path: &Path) -> Result<RawDataset> {
    let content = std::fs::read_to_string(path).map_err(|e| WebloomError::DataFile {
        path: path.to_path_buf(),
        message: format!("cannot read: {e}"),
    })?;
    let dataset: RawDataset =
        serde_json::from_str(&content).map_err(|e| WebloomError::DataFile {
            path: path.to_path_buf(),
            message: format!("invalid raw data: {e}"),
        })?;
    Ok(dataset)
}

/// Incremental writer for the partial-results file.
///
/// Each term section is flushed as soon as it is written, so partial progress
/// survives a mid-run failure.
#[derive(Debug)]
pub struct PartialReportWriter {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl PartialReportWriter {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| WebloomError::DataFile {
            path: path.to_path_buf(),
            message: format!("cannot create: {e}"),
        })?;
        let mut writer = BufWriter::new(file);
        write_header(&mut writer, "PER-TERM RESEARCH RESULTS")?;
        writer.flush()?;
        Ok(Self {
            writer,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append_term(&mut self, result: &TermResult) -> Result<()> {
        writeln!(self.writer, "TERM: {}", result.term)?;
        writeln!(self.writer, "{RULE_NARROW}\n")?;
        writeln!(self.writer, "SUMMARY:\n{}\n", result.summary)?;
        writeln!(self.writer, "ANALYSIS:\n{}\n", result.analysis)?;
        writeln!(self.writer, "ORGANIZATION:\n{}\n", result.organization)?;
        writeln!(self.writer, "{RULE_WIDE}\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Write the final report: header, synthesis text, metadata footer
pub fn write_final_report(path: &Path, synthesis: &str, stats: &RunStats) -> Result<()> {
    let file = File::create(path).map_err(|e| WebloomError::DataFile {
        path: path.to_path_buf(),
        message: format!("cannot create: {e}"),
    })?;
    let mut writer = BufWriter::new(file);

    write_header(&mut writer, "FINAL RESEARCH REPORT")?;
    writeln!(writer, "{synthesis}")?;
    writeln!(writer, "\n{RULE_WIDE}")?;
    writeln!(writer, "RUN METADATA")?;
    writeln!(writer, "  Terms processed: {}", stats.term_count)?;
    writeln!(writer, "  Agents used: 4 (summarizer, analyst, organizer, synthesizer)")?;
    writeln!(writer, "  Material volume: {} characters", stats.char_volume)?;
    writeln!(writer, "  Source file: {}", stats.source_file)?;
    writeln!(writer, "  Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(
        writer,
        "  Version: {}",
        output_constants::RAW_DATA_VERSION
    )?;
    writer.flush()?;

    info!(path = %path.display(), "Final report written");
    Ok(())
}

fn write_header(writer: &mut impl Write, title: &str) -> Result<()> {
    writeln!(writer, "{title}")?;
    writeln!(writer, "Date: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(writer, "{RULE_WIDE}\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FetchStatus, PageRecord};
    use chrono::Utc;
    use tempfile::tempdir;

    fn sample_dataset() -> RawDataset {
        let page = PageRecord {
            url: "http://a.example".to_string(),
            title: "A".to_string(),
            description: String::new(),
            cleaned_text: "body text".to_string(),
            status: FetchStatus::Success,
            fetched_at: Utc::now(),
        };
        let failed = PageRecord::failed("http://b.example", "timeout after 15s");
        build_dataset(
            vec![TermPages {
                term: "alpha".to_string(),
                pages: vec![page, failed],
            }],
            "data_alpha.json",
        )
    }

    #[test]
    fn test_raw_data_round_trip() {
        let dir = tempdir().unwrap();
        let files = OutputFiles::new(dir.path(), RunId::from_topic("Alpha Topic"));

        let dataset = sample_dataset();
        let path = files.write_raw(&dataset).unwrap();
        let loaded = read_raw(&path).unwrap();

        assert_eq!(loaded.data.len(), 1);
        assert_eq!(loaded.data[0].term, "alpha");
        let urls: Vec<_> = loaded.data[0].pages.iter().map(|p| p.url.clone()).collect();
        assert_eq!(urls, vec!["http://a.example", "http://b.example"]);
        assert!(loaded.data[0].pages[0].status.is_success());
        assert!(!loaded.data[0].pages[1].status.is_success());
    }

    #[test]
    fn test_ensure_dir_creates_missing_output_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("reports").join("runs");
        let files = OutputFiles::new(&nested, RunId::from_topic("Alpha Topic"));

        files.ensure_dir().unwrap();
        let path = files.write_raw(&sample_dataset()).unwrap();

        assert!(nested.is_dir());
        assert!(path.exists());
    }

    #[test]
    fn test_write_raw_without_dir_names_the_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent");
        let files = OutputFiles::new(&missing, RunId::from_topic("Alpha Topic"));

        let err = files.write_raw(&sample_dataset()).unwrap_err();
        assert!(matches!(err, WebloomError::DataFile { .. }));
        assert!(err.to_string().contains("absent"));
    }

    #[test]
    fn test_partial_writer_without_dir_names_the_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent").join("partial.txt");

        let err = PartialReportWriter::create(&path).unwrap_err();
        assert!(matches!(err, WebloomError::DataFile { .. }));
        assert!(err.to_string().contains("partial.txt"));
    }

    #[test]
    fn test_read_raw_reports_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = read_raw(&path).unwrap_err();
        assert!(matches!(err, WebloomError::DataFile { .. }));
    }

    #[test]
    fn test_read_raw_reports_missing_file() {
        let err = read_raw(Path::new("/nonexistent/data.json")).unwrap_err();
        assert!(matches!(err, WebloomError::DataFile { .. }));
    }

    #[test]
    fn test_partial_report_flushes_each_term() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.txt");
        let mut writer = PartialReportWriter::create(&path).unwrap();

        writer
            .append_term(&TermResult {
                term: "alpha".to_string(),
                summary: "S".to_string(),
                analysis: "A".to_string(),
                organization: "O".to_string(),
            })
            .unwrap();

        // Readable before the writer is dropped
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("PER-TERM RESEARCH RESULTS"));
        assert!(content.contains("TERM: alpha"));
        assert!(content.contains("SUMMARY:\nS"));
    }

    #[test]
    fn test_final_report_has_footer() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("final.txt");
        let stats = RunStats {
            term_count: 2,
            char_volume: 4242,
            source_file: "data_x.json".to_string(),
        };

        write_final_report(&path, "The synthesis body.", &stats).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("FINAL RESEARCH REPORT"));
        assert!(content.contains("The synthesis body."));
        assert!(content.contains("Terms processed: 2"));
        assert!(content.contains("4242 characters"));
        assert!(content.contains("data_x.json"));
    }
}
