//! File artifacts produced by a run.

pub mod files;

pub use files::{
    OutputFiles, PartialReportWriter, build_dataset, read_raw, write_final_report,
};
