//! Sectioned key/value configuration store for INI text.
//!
//! An [`Ini`] owns a mapping of section name to key/value pairs. It is filled
//! by a single line-oriented parse (from bytes, a reader, or a file) and/or by
//! explicit `set` calls, and can be serialized back to text with
//! [`Ini::write`].
//!
//! # Key Types
//!
//! - [`Ini`] -- the store: parse, typed get/set, delete, write
//! - [`IniOptions`] -- separators and parsing switches carried per store
//! - [`IniError`] -- I/O and format failures
//!
//! # Dialect
//!
//! ```text
//! key1=value1
//!
//! [sectionA]
//! key2 = "value2"
//! ; comment, only when skip_comments is enabled
//! # comment, always
//! ```
//!
//! The empty section name [`DEFAULT_SECTION`] holds pairs that appear before
//! any header, or every pair when section parsing is disabled.

pub mod error;
pub mod ini;
pub mod options;
mod parser;
mod typed;
mod writer;

pub use error::{IniError, IniResult};
pub use ini::{Ini, KvMap, SectionMap};
pub use options::{
    IniOptions, DEFAULT_KV_SEPARATOR, DEFAULT_LINE_SEPARATOR, DEFAULT_SECTION,
};
