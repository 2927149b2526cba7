//! pcrchart - Bar charts from PCR result spreadsheets
//!
//! This crate reads a results spreadsheet (one header row plus one row per sample),
//! turns every row into a grouped bar chart comparing two sets of four metrics,
//! and writes the charts either as PNG files in a directory or as a single ZIP bundle.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use pcrchart::ReportBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Default settings: first sheet, PCR column names, values clamped at 2.0
//!     let report = ReportBuilder::new().build()?;
//!
//!     // Render every row into charts.zip
//!     let archive = report.bundle(File::open("results.xlsx")?)?;
//!     std::fs::write("charts.zip", archive)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Step by Step
//!
//! ```rust,no_run
//! use std::fs::File;
//! use std::path::Path;
//! use pcrchart::{
//!     has_required_columns, read_table, write_charts, ChartRendererBuilder, ClampPolicy,
//!     SheetSelector, TableExtractor,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let table = read_table(File::open("results.xlsx")?, &SheetSelector::First)?;
//!
//!     let required = ["ID", "A1", "A2", "A3", "A4", "B1", "B2", "B3", "B4"];
//!     if !has_required_columns(&table, &required) {
//!         eprintln!("The spreadsheet does not contain the required columns.");
//!         return Ok(());
//!     }
//!
//!     let records = TableExtractor::new().extract(&table)?;
//!     let renderer = ChartRendererBuilder::new()
//!         .with_clamp_policy(ClampPolicy::Unclamped)
//!         .build()?;
//!     write_charts(&records, &renderer, Path::new("charts"))?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Logging
//!
//! Progress is reported through `tracing`. The library never installs a subscriber.

mod api;
mod builder;
mod error;
mod extractor;
mod layout;
mod output;
mod parser;
mod renderer;
mod security;
mod types;

// 公開API
pub use api::{BarFill, ClampPolicy, Hatch, SheetSelector, DEFAULT_CEILING};
pub use builder::{ChartRendererBuilder, Report, ReportBuilder};
pub use error::{ChartError, TABLE_ERROR_MESSAGE};
pub use extractor::{
    has_required_columns, TableExtractor, DEFAULT_REQUIRED_COLUMNS, EMPTY_NAME_PLACEHOLDER,
};
pub use layout::{BarSpec, ChartLayout};
pub use output::{bundle, write_charts, DEFAULT_OUTPUT_DIR};
pub use parser::read_table;
pub use renderer::{ChartRenderer, PixelRect, RenderedChart};
pub use security::clean_filename;
pub use types::{CellValue, ChartRecord, Metric, Table};
