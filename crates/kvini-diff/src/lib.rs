//! Structural diff of two INI stores.
//!
//! Compares two populated [`Ini`](kvini_store::Ini) stores section by
//! section and key by key, producing one record per discrepancy. Records own
//! copies of every name and value, so they outlive the stores they came from.
//!
//! # Key Types
//!
//! - [`IniDiff`] -- the unordered set of discrepancies
//! - [`Discrepancy`] / [`DiscrepancyKind`] -- one difference and its label
//!
//! Record order is unspecified. Compare results as sets.

pub mod ini_diff;

pub use ini_diff::{diff, diff_files, Discrepancy, DiscrepancyKind, IniDiff};
