//! The [`Ini`] store: section map ownership, parsing entry points, and
//! string-valued get/set/delete.

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::IniResult;
use crate::options::{IniOptions, DEFAULT_KV_SEPARATOR, DEFAULT_LINE_SEPARATOR, DEFAULT_SECTION};
use crate::parser;

/// Key/value pairs of one section.
pub type KvMap = BTreeMap<String, String>;

/// Section name to that section's pairs.
pub type SectionMap = BTreeMap<String, KvMap>;

/// In-memory INI store.
///
/// Sections are created on first `set` into them, by a header line during a
/// parse, or (for the default section) afresh at the start of every parse.
/// Once created a section persists, even when emptied by deletions, until
/// [`Ini::reset`].
///
/// The store is not synchronized. Shared `&Ini` readers are fine; mutation
/// requires `&mut Ini` as usual.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ini {
    sections: SectionMap,
    options: IniOptions,
}

impl Ini {
    /// Create an empty store with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given options.
    pub fn with_options(options: IniOptions) -> Self {
        Self {
            sections: SectionMap::new(),
            options,
        }
    }

    /// Current options.
    pub fn options(&self) -> &IniOptions {
        &self.options
    }

    /// Whether `;` lines are skipped when parsing.
    pub fn set_skip_comments(&mut self, skip_comments: bool) {
        self.options.skip_comments = skip_comments;
    }

    /// Whether `[name]` lines open a section when parsing.
    pub fn set_parse_section(&mut self, parse_section: bool) {
        self.options.parse_section = parse_section;
    }

    /// Whether quote characters are stripped from parsed values.
    pub fn set_trim_quotes(&mut self, trim_quotes: bool) {
        self.options.trim_quotes = trim_quotes;
    }

    // -----------------------------------------------------------------------
    // Parsing
    // -----------------------------------------------------------------------

    /// Parse `data` split by `line_sep`, splitting pairs at the first `kv_sep`.
    ///
    /// Both separators are kept in the options and used by later writes.
    /// On a [`Format`](crate::IniError::Format) error parsing stops at the
    /// offending line; everything stored before it remains.
    pub fn parse(&mut self, data: &[u8], line_sep: &str, kv_sep: &str) -> IniResult<()> {
        self.options.line_separator = line_sep.to_string();
        self.options.kv_separator = kv_sep.to_string();
        let text = parser::decode(data);
        parser::parse_into(&text, &self.options, &mut self.sections)
    }

    /// Parse text with the separators currently configured.
    pub fn parse_str(&mut self, text: &str) -> IniResult<()> {
        parser::parse_into(text, &self.options, &mut self.sections)
    }

    /// Read `reader` to the end, then [`parse`](Self::parse) the contents.
    pub fn parse_from<R: Read>(&mut self, mut reader: R, line_sep: &str, kv_sep: &str) -> IniResult<()> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.parse(&data, line_sep, kv_sep)
    }

    /// Read the whole file at `path` and parse it with default separators.
    ///
    /// Section headers and `;` comments are switched on for this store and
    /// stay on afterwards.
    pub fn parse_file<P: AsRef<Path>>(&mut self, path: P) -> IniResult<()> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        debug!(path = %path.display(), bytes = data.len(), "read INI file");
        self.options.parse_section = true;
        self.options.skip_comments = true;
        self.parse(&data, DEFAULT_LINE_SEPARATOR, DEFAULT_KV_SEPARATOR)
    }

    /// Drop every section. Options are kept.
    pub fn reset(&mut self) {
        self.sections.clear();
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Value of `key` in the default section.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.section_get(DEFAULT_SECTION, key)
    }

    /// Value of `key` in `section`.
    pub fn section_get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|kv| kv.get(key))
            .map(String::as_str)
    }

    /// All pairs of `section`, if the section exists.
    pub fn section(&self, section: &str) -> Option<&KvMap> {
        self.sections.get(section)
    }

    /// A copy of every section and its pairs.
    pub fn get_all(&self) -> SectionMap {
        self.sections.clone()
    }

    /// Borrowed view of every section, for read-only traversal.
    pub fn sections(&self) -> &SectionMap {
        &self.sections
    }

    /// Whether `section` exists (possibly empty).
    pub fn contains_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    /// Names of all sections, including the default section when present.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if there are no sections at all.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Store `value` under `key` in the default section.
    pub fn set(&mut self, key: &str, value: &str) {
        self.section_set(DEFAULT_SECTION, key, value);
    }

    /// Store `value` under `key` in `section`, creating the section if needed.
    pub fn section_set(&mut self, section: &str, key: &str, value: &str) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    /// Remove `key` from `section`. Returns `true` if the key existed.
    ///
    /// The section itself is kept even if this empties it.
    pub fn delete(&mut self, section: &str, key: &str) -> bool {
        self.sections
            .get_mut(section)
            .map(|kv| kv.remove(key).is_some())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IniError;
    use std::io::{self, Write};

    fn sectioned() -> Ini {
        let mut ini = Ini::new();
        ini.set_parse_section(true);
        ini
    }

    fn kv(pairs: &[(&str, &str)]) -> KvMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Parsing
    // -----------------------------------------------------------------------

    #[test]
    fn parse_default_and_named_section() {
        let mut ini = sectioned();
        ini.parse(b"a=1\nb=2\n[s]\nc=3", "\n", "=").unwrap();

        assert_eq!(ini.len(), 2);
        assert_eq!(ini.section(""), Some(&kv(&[("a", "1"), ("b", "2")])));
        assert_eq!(ini.section("s"), Some(&kv(&[("c", "3")])));
    }

    #[test]
    fn headers_are_pairs_when_section_parsing_disabled() {
        let mut ini = Ini::new();
        ini.parse(b"a=1\n[s]\n", "\n", "=").unwrap_err();

        let mut ini = Ini::new();
        ini.parse(b"a=1\n[s]=x\nc=3", "\n", "=").unwrap();
        assert_eq!(ini.len(), 1);
        assert_eq!(ini.get("[s]"), Some("x"));
        assert_eq!(ini.get("c"), Some("3"));
    }

    #[test]
    fn empty_input_creates_default_section() {
        let mut ini = Ini::new();
        assert!(ini.is_empty());
        ini.parse(b"", "\n", "=").unwrap();
        assert_eq!(ini.len(), 1);
        assert!(ini.contains_section(""));
        assert!(ini.section("").unwrap().is_empty());
    }

    #[test]
    fn whitespace_around_keys_and_values_is_trimmed() {
        let mut ini = Ini::new();
        ini.parse(b"  key  =  some value \n\t\n   \n", "\n", "=").unwrap();
        assert_eq!(ini.get("key"), Some("some value"));
    }

    #[test]
    fn splits_at_first_separator_only() {
        let mut ini = Ini::new();
        ini.parse(b"expr = 1+1=2", "\n", "=").unwrap();
        assert_eq!(ini.get("expr"), Some("1+1=2"));
    }

    #[test]
    fn duplicate_keys_last_write_wins() {
        let mut ini = Ini::new();
        ini.parse(b"a=1\na=2", "\n", "=").unwrap();
        assert_eq!(ini.get("a"), Some("2"));
    }

    #[test]
    fn hash_lines_always_skipped() {
        let mut ini = Ini::new();
        ini.parse(b"#comment\na=1", "\n", "=").unwrap();
        assert_eq!(ini.section(""), Some(&kv(&[("a", "1")])));

        let mut ini = Ini::new();
        ini.set_skip_comments(true);
        ini.parse(b"  # indented comment\na=1", "\n", "=").unwrap();
        assert_eq!(ini.section(""), Some(&kv(&[("a", "1")])));
    }

    #[test]
    fn semicolon_lines_skipped_only_when_enabled() {
        let mut ini = Ini::new();
        ini.set_skip_comments(true);
        ini.parse(b";comment\na=1", "\n", "=").unwrap();
        assert_eq!(ini.get("a"), Some("1"));

        let mut ini = Ini::new();
        let err = ini.parse(b";comment\na=1", "\n", "=").unwrap_err();
        assert_eq!(err.line(), Some(";comment"));
    }

    #[test]
    fn malformed_line_is_format_error() {
        let mut ini = Ini::new();
        let err = ini
            .parse(b"a=1\nmalformed-no-separator\nb=2", "\n", "=")
            .unwrap_err();
        match &err {
            IniError::Format { line } => assert_eq!(line, "malformed-no-separator"),
            other => panic!("expected Format, got {:?}", other),
        }
        // Pairs before the bad line survive, pairs after it are never read.
        assert_eq!(ini.get("a"), Some("1"));
        assert_eq!(ini.get("b"), None);
    }

    #[test]
    fn partial_state_keeps_earlier_sections() {
        let mut ini = sectioned();
        ini.parse(b"[one]\nx=1\n[two]\nbroken", "\n", "=").unwrap_err();
        assert_eq!(ini.section_get("one", "x"), Some("1"));
        assert!(ini.contains_section("two"));
        assert!(ini.section("two").unwrap().is_empty());
    }

    #[test]
    fn duplicate_header_replaces_section() {
        let mut ini = sectioned();
        ini.parse(b"[s]\na=1\nb=2\n[t]\nz=0\n[s]\nc=3", "\n", "=").unwrap();
        assert_eq!(ini.section("s"), Some(&kv(&[("c", "3")])));
        assert_eq!(ini.section("t"), Some(&kv(&[("z", "0")])));
    }

    #[test]
    fn empty_header_names_default_section() {
        let mut ini = sectioned();
        ini.parse(b"a=1\n[]\nb=2", "\n", "=").unwrap();
        // `[]` reopens the default section with a fresh map.
        assert_eq!(ini.section(""), Some(&kv(&[("b", "2")])));
    }

    #[test]
    fn header_name_is_not_trimmed() {
        let mut ini = sectioned();
        ini.parse(b"[ spaced ]\nk=v", "\n", "=").unwrap();
        assert_eq!(ini.section_get(" spaced ", "k"), Some("v"));
    }

    #[test]
    fn custom_separators_are_recorded() {
        let mut ini = Ini::new();
        ini.parse(b"a:1;b : 2;;", ";", ":").unwrap();
        assert_eq!(ini.get("a"), Some("1"));
        assert_eq!(ini.get("b"), Some("2"));
        assert_eq!(ini.options().line_separator, ";");
        assert_eq!(ini.options().kv_separator, ":");
    }

    #[test]
    fn multi_char_separators() {
        let mut ini = Ini::new();
        ini.parse(b"a => 1\r\nb => 2\r\n", "\r\n", "=>").unwrap();
        assert_eq!(ini.get("a"), Some("1"));
        assert_eq!(ini.get("b"), Some("2"));
    }

    #[test]
    fn trim_quotes_strips_any_quote_run() {
        let mut ini = Ini::new();
        ini.set_trim_quotes(true);
        ini.parse(
            b"a=\"double\"\nb='single'\nc=\"mixed'\nd='\"nested\"'\ne=in\"side",
            "\n",
            "=",
        )
        .unwrap();
        assert_eq!(ini.get("a"), Some("double"));
        assert_eq!(ini.get("b"), Some("single"));
        assert_eq!(ini.get("c"), Some("mixed"));
        assert_eq!(ini.get("d"), Some("nested"));
        assert_eq!(ini.get("e"), Some("in\"side"));
    }

    #[test]
    fn quotes_kept_by_default() {
        let mut ini = Ini::new();
        ini.parse(b"a=\"quoted\"", "\n", "=").unwrap();
        assert_eq!(ini.get("a"), Some("\"quoted\""));
    }

    #[test]
    fn parse_replaces_default_section() {
        let mut ini = Ini::new();
        ini.set("manual", "yes");
        ini.section_set("kept", "k", "v");
        ini.parse(b"a=1", "\n", "=").unwrap();
        assert_eq!(ini.get("manual"), None);
        assert_eq!(ini.get("a"), Some("1"));
        assert_eq!(ini.section_get("kept", "k"), Some("v"));

        ini.parse(b"b=2", "\n", "=").unwrap();
        assert_eq!(ini.section(""), Some(&kv(&[("b", "2")])));
        assert_eq!(ini.section_get("kept", "k"), Some("v"));
    }

    #[test]
    fn parse_str_uses_configured_separators() {
        let mut ini = Ini::with_options(IniOptions::default().with_separators(",", ":"));
        ini.parse_str("a:1,b:2").unwrap();
        assert_eq!(ini.get("b"), Some("2"));
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let mut ini = Ini::new();
        ini.parse(b"k=\xff\xfe", "\n", "=").unwrap();
        assert_eq!(ini.get("k"), Some("\u{fffd}\u{fffd}"));
    }

    #[test]
    fn parse_from_reader() {
        let mut ini = sectioned();
        let data: &[u8] = b"a=1\n[s]\nb=2\n";
        ini.parse_from(data, "\n", "=").unwrap();
        assert_eq!(ini.section_get("s", "b"), Some("2"));
    }

    #[test]
    fn parse_from_failing_reader_is_io_error() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
            }
        }

        let mut ini = Ini::new();
        let err = ini.parse_from(Broken, "\n", "=").unwrap_err();
        match err {
            IniError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("expected Io, got {:?}", other),
        }
        assert!(ini.is_empty());
    }

    #[test]
    fn parse_file_forces_sections_and_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "top=1\n; note\n# note\n[srv]\nport = 8080").unwrap();

        let mut ini = Ini::new();
        ini.parse_file(file.path()).unwrap();

        assert!(ini.options().parse_section);
        assert!(ini.options().skip_comments);
        assert_eq!(ini.get("top"), Some("1"));
        assert_eq!(ini.section_get("srv", "port"), Some("8080"));
    }

    #[test]
    fn parse_file_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut ini = Ini::new();
        let err = ini.parse_file(dir.path().join("absent.ini")).unwrap_err();
        match err {
            IniError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("expected Io, got {:?}", other),
        }
        // The flags only flip once the file has been read.
        assert!(!ini.options().parse_section);
    }

    // -----------------------------------------------------------------------
    // Lookup and mutation
    // -----------------------------------------------------------------------

    #[test]
    fn set_get_and_overwrite() {
        let mut ini = Ini::new();
        assert_eq!(ini.get("k"), None);
        ini.set("k", "v1");
        ini.set("k", "v2");
        ini.section_set("s", "k", "other");
        assert_eq!(ini.get("k"), Some("v2"));
        assert_eq!(ini.section_get("s", "k"), Some("other"));
        assert_eq!(ini.section_get("missing", "k"), None);
    }

    #[test]
    fn delete_keeps_section() {
        let mut ini = Ini::new();
        ini.section_set("s", "k", "v");
        assert!(ini.delete("s", "k"));
        assert!(!ini.delete("s", "k"));
        assert!(!ini.delete("nope", "k"));
        assert!(ini.contains_section("s"));
        assert!(ini.section("s").unwrap().is_empty());
    }

    #[test]
    fn get_all_is_a_copy() {
        let mut ini = Ini::new();
        ini.set("a", "1");
        let mut all = ini.get_all();
        all.get_mut("").unwrap().insert("b".into(), "2".into());
        assert_eq!(ini.get("b"), None);
    }

    #[test]
    fn section_names_lists_everything() {
        let mut ini = sectioned();
        ini.parse(b"[b]\n[a]\n", "\n", "=").unwrap();
        let names: Vec<&str> = ini.section_names().collect();
        assert_eq!(names.len(), 3);
        assert!(names.contains(&""));
        assert!(names.contains(&"a"));
        assert!(names.contains(&"b"));
    }

    #[test]
    fn reset_drops_sections_keeps_options() {
        let mut ini = sectioned();
        ini.set_trim_quotes(true);
        ini.parse(b"a=1|[s]|b=2", "|", "=").unwrap();
        assert_eq!(ini.len(), 2);

        ini.reset();
        assert!(ini.is_empty());
        assert!(ini.options().parse_section);
        assert!(ini.options().trim_quotes);
        assert_eq!(ini.options().line_separator, "|");
    }
}
