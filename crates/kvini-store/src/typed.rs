//! Typed accessors layered over the string values of an [`Ini`].
//!
//! Getters return `None` when the key is absent *or* its value does not
//! convert; a conversion failure is never an error. Setters always succeed
//! and store a canonical string form.

use crate::ini::Ini;
use crate::options::DEFAULT_SECTION;

/// Tokens read as `true` (case-sensitive).
const TRUE_TOKENS: &[&str] = &[
    "1", "t", "T", "true", "TRUE", "True", "on", "ON", "On", "yes", "YES", "Yes",
];

/// Tokens read as `false` (case-sensitive).
const FALSE_TOKENS: &[&str] = &[
    "0", "f", "F", "false", "FALSE", "False", "off", "OFF", "Off", "no", "NO", "No",
];

/// Digits after the decimal point when storing floats.
const FLOAT_PRECISION: usize = 8;

fn parse_bool(s: &str) -> Option<bool> {
    if TRUE_TOKENS.contains(&s) {
        Some(true)
    } else if FALSE_TOKENS.contains(&s) {
        Some(false)
    } else {
        None
    }
}

impl Ini {
    /// Integer value of `key` in the default section.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.section_get_int(DEFAULT_SECTION, key)
    }

    /// Float value of `key` in the default section.
    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.section_get_float(DEFAULT_SECTION, key)
    }

    /// Boolean value of `key` in the default section.
    ///
    /// Accepts `1 t T true TRUE True on ON On yes YES Yes` and
    /// `0 f F false FALSE False off OFF Off no NO No`; anything else is `None`.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.section_get_bool(DEFAULT_SECTION, key)
    }

    /// Integer value of `key` in `section`.
    pub fn section_get_int(&self, section: &str, key: &str) -> Option<i64> {
        self.section_get(section, key)?.parse().ok()
    }

    /// Float value of `key` in `section`.
    pub fn section_get_float(&self, section: &str, key: &str) -> Option<f64> {
        self.section_get(section, key)?.parse().ok()
    }

    /// Boolean value of `key` in `section`. See [`Ini::get_bool`].
    pub fn section_get_bool(&self, section: &str, key: &str) -> Option<bool> {
        parse_bool(self.section_get(section, key)?)
    }

    /// Store `value` under `key` in the default section, in decimal.
    pub fn set_int(&mut self, key: &str, value: i64) {
        self.section_set_int(DEFAULT_SECTION, key, value);
    }

    /// Store `value` under `key` in the default section. See [`Ini::section_set_float`].
    pub fn set_float(&mut self, key: &str, value: f64) {
        self.section_set_float(DEFAULT_SECTION, key, value);
    }

    /// Store `value` under `key` in the default section as `"true"` or `"false"`.
    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.section_set_bool(DEFAULT_SECTION, key, value);
    }

    /// Store `value` in decimal.
    pub fn section_set_int(&mut self, section: &str, key: &str, value: i64) {
        self.section_set(section, key, &value.to_string());
    }

    /// Store `value` in fixed-point notation with eight fractional digits.
    pub fn section_set_float(&mut self, section: &str, key: &str, value: f64) {
        self.section_set(section, key, &format!("{:.*}", FLOAT_PRECISION, value));
    }

    /// Store `value` as `"true"` or `"false"`.
    pub fn section_set_bool(&mut self, section: &str, key: &str, value: bool) {
        self.section_set(section, key, if value { "true" } else { "false" });
    }
}
