//! Serialization of an [`Ini`] back to text.
//!
//! The default section is written first without a header, then every other
//! section under a `[name]` header. Separators come from the store's options
//! and are never escaped, so keys or values containing them do not survive a
//! round trip.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::IniResult;
use crate::ini::{Ini, KvMap};
use crate::options::DEFAULT_SECTION;

impl Ini {
    /// Serialize every section to `writer` through a buffer.
    ///
    /// The text is exactly what [`Display`](fmt::Display) renders.
    pub fn write<W: Write>(&self, writer: W) -> IniResult<()> {
        let mut buf = BufWriter::new(writer);
        write!(buf, "{self}")?;
        buf.flush()?;

        debug!(sections = self.len(), "wrote INI data");
        Ok(())
    }

    /// Create or truncate the file at `path` and [`write`](Self::write) to it.
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> IniResult<()> {
        let file = File::create(path.as_ref())?;
        self.write(file)
    }

    /// Default section first (header `None`), then the named sections.
    fn ordered_sections(&self) -> impl Iterator<Item = (Option<&str>, &KvMap)> {
        let default = self.section(DEFAULT_SECTION).map(|kv| (None::<&str>, kv));
        let named = self
            .sections()
            .iter()
            .filter(|(name, _)| name.as_str() != DEFAULT_SECTION)
            .map(|(name, kv)| (Some(name.as_str()), kv));
        default.into_iter().chain(named)
    }
}

impl fmt::Display for Ini {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line_sep = self.options().line_separator.as_str();
        let kv_sep = self.options().kv_separator.as_str();

        for (name, kv) in self.ordered_sections() {
            if let Some(name) = name {
                write!(f, "[{name}]{line_sep}")?;
            }
            for (key, value) in kv {
                write!(f, "{key}{kv_sep}{value}{line_sep}")?;
            }
        }
        Ok(())
    }
}
