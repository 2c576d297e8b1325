//! Line-oriented parsing state machine.
//!
//! Each candidate line is trimmed and classified, in order, as blank,
//! comment, section header, or key/value pair. Anything else aborts the
//! parse with a format error.

use std::borrow::Cow;

use tracing::{debug, warn};

use crate::error::{IniError, IniResult};
use crate::ini::{KvMap, SectionMap};
use crate::options::{IniOptions, DEFAULT_SECTION};

/// Characters stripped from value ends when `trim_quotes` is on.
const QUOTE_CHARS: &[char] = &['\'', '"'];

/// Classification of one trimmed line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Comment,
    Header(&'a str),
    Pair(&'a str, &'a str),
}

/// Decode raw input, replacing invalid UTF-8 sequences with U+FFFD.
pub(crate) fn decode(data: &[u8]) -> Cow<'_, str> {
    let text = String::from_utf8_lossy(data);
    if let Cow::Owned(_) = text {
        warn!(bytes = data.len(), "INI input is not valid UTF-8; decoded lossily");
    }
    text
}

/// Parse `text` into `sections` using the separators and switches in `options`.
///
/// The default section is replaced by an empty map before the first line,
/// and a header line likewise starts its section from an empty map.
pub(crate) fn parse_into(
    text: &str,
    options: &IniOptions,
    sections: &mut SectionMap,
) -> IniResult<()> {
    let mut current = DEFAULT_SECTION.to_string();
    sections.insert(current.clone(), KvMap::new());

    let mut lines = 0usize;
    for raw in text.split(options.line_separator.as_str()) {
        lines += 1;
        match classify(raw.trim(), options)? {
            Line::Blank | Line::Comment => {}
            Line::Header(name) => {
                sections.insert(name.to_string(), KvMap::new());
                current = name.to_string();
            }
            Line::Pair(key, value) => {
                sections
                    .entry(current.clone())
                    .or_default()
                    .insert(key.to_string(), value.to_string());
            }
        }
    }

    debug!(lines, sections = sections.len(), "parsed INI data");
    Ok(())
}

fn classify<'a>(line: &'a str, options: &IniOptions) -> IniResult<Line<'a>> {
    if line.is_empty() {
        return Ok(Line::Blank);
    }
    // `#` lines are comments regardless of `skip_comments`.
    if (options.skip_comments && line.starts_with(';')) || line.starts_with('#') {
        return Ok(Line::Comment);
    }
    if options.parse_section && line.len() >= 2 && line.starts_with('[') && line.ends_with(']') {
        return Ok(Line::Header(&line[1..line.len() - 1]));
    }

    let sep = options.kv_separator.as_str();
    let Some(pos) = line.find(sep) else {
        return Err(IniError::Format {
            line: line.to_string(),
        });
    };

    let key = line[..pos].trim();
    let mut value = line[pos + sep.len()..].trim();
    if options.trim_quotes {
        value = value.trim_matches(QUOTE_CHARS);
    }
    Ok(Line::Pair(key, value))
}
