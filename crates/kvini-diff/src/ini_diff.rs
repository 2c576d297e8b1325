//! Section/key diff between two INI stores.
//!
//! Two passes run over the stores. The A-to-B pass reports sections and keys
//! missing from B plus every value mismatch; the B-to-A pass reports only
//! what is missing from A, so a mismatch is recorded exactly once.

use std::fmt;
use std::path::Path;

use kvini_store::{Ini, IniResult, SectionMap};
use serde::Serialize;
use tracing::debug;

/// Label of a [`Discrepancy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyKind {
    SectionOnlyInA,
    KeyOnlyInA,
    ValuesDiffer,
    SectionOnlyInB,
    KeyOnlyInB,
}

impl fmt::Display for DiscrepancyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::SectionOnlyInA => "section only in A",
            Self::KeyOnlyInA => "key only in A",
            Self::ValuesDiffer => "values differ",
            Self::SectionOnlyInB => "section only in B",
            Self::KeyOnlyInB => "key only in B",
        };
        f.write_str(s)
    }
}

/// A single difference between store A and store B.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Discrepancy {
    /// The whole section exists only in A.
    SectionOnlyInA { section: String },
    /// The key exists in the section in A but not in B's section.
    KeyOnlyInA {
        section: String,
        key: String,
        value: String,
    },
    /// The key exists on both sides with different values.
    ValuesDiffer {
        section: String,
        key: String,
        a_value: String,
        b_value: String,
    },
    /// The whole section exists only in B.
    SectionOnlyInB { section: String },
    /// The key exists in the section in B but not in A's section.
    KeyOnlyInB {
        section: String,
        key: String,
        value: String,
    },
}

impl Discrepancy {
    pub fn kind(&self) -> DiscrepancyKind {
        match self {
            Self::SectionOnlyInA { .. } => DiscrepancyKind::SectionOnlyInA,
            Self::KeyOnlyInA { .. } => DiscrepancyKind::KeyOnlyInA,
            Self::ValuesDiffer { .. } => DiscrepancyKind::ValuesDiffer,
            Self::SectionOnlyInB { .. } => DiscrepancyKind::SectionOnlyInB,
            Self::KeyOnlyInB { .. } => DiscrepancyKind::KeyOnlyInB,
        }
    }

    pub fn section(&self) -> &str {
        match self {
            Self::SectionOnlyInA { section }
            | Self::SectionOnlyInB { section }
            | Self::KeyOnlyInA { section, .. }
            | Self::KeyOnlyInB { section, .. }
            | Self::ValuesDiffer { section, .. } => section,
        }
    }

    /// The key, for key-level discrepancies.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::KeyOnlyInA { key, .. }
            | Self::KeyOnlyInB { key, .. }
            | Self::ValuesDiffer { key, .. } => Some(key),
            Self::SectionOnlyInA { .. } | Self::SectionOnlyInB { .. } => None,
        }
    }

    /// A's value, when A holds the key.
    pub fn a_value(&self) -> Option<&str> {
        match self {
            Self::KeyOnlyInA { value, .. } => Some(value),
            Self::ValuesDiffer { a_value, .. } => Some(a_value),
            _ => None,
        }
    }

    /// B's value, when B holds the key.
    pub fn b_value(&self) -> Option<&str> {
        match self {
            Self::KeyOnlyInB { value, .. } => Some(value),
            Self::ValuesDiffer { b_value, .. } => Some(b_value),
            _ => None,
        }
    }

    /// The same fact with the A and B sides exchanged.
    pub fn mirrored(&self) -> Self {
        match self.clone() {
            Self::SectionOnlyInA { section } => Self::SectionOnlyInB { section },
            Self::SectionOnlyInB { section } => Self::SectionOnlyInA { section },
            Self::KeyOnlyInA {
                section,
                key,
                value,
            } => Self::KeyOnlyInB {
                section,
                key,
                value,
            },
            Self::KeyOnlyInB {
                section,
                key,
                value,
            } => Self::KeyOnlyInA {
                section,
                key,
                value,
            },
            Self::ValuesDiffer {
                section,
                key,
                a_value,
                b_value,
            } => Self::ValuesDiffer {
                section,
                key,
                a_value: b_value,
                b_value: a_value,
            },
        }
    }
}

/// The result of comparing two stores. Order is unspecified.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IniDiff {
    /// Every discrepancy found.
    pub discrepancies: Vec<Discrepancy>,
}

impl IniDiff {
    /// Create an empty diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the stores are equivalent.
    pub fn is_empty(&self) -> bool {
        self.discrepancies.is_empty()
    }

    /// Number of discrepancies.
    pub fn len(&self) -> usize {
        self.discrepancies.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Discrepancy> {
        self.discrepancies.iter()
    }

    /// Number of discrepancies of `kind`.
    pub fn count(&self, kind: DiscrepancyKind) -> usize {
        self.discrepancies
            .iter()
            .filter(|d| d.kind() == kind)
            .count()
    }

    /// Every record with sides exchanged.
    pub fn mirrored(&self) -> Self {
        Self {
            discrepancies: self.discrepancies.iter().map(Discrepancy::mirrored).collect(),
        }
    }
}

impl IntoIterator for IniDiff {
    type Item = Discrepancy;
    type IntoIter = std::vec::IntoIter<Discrepancy>;

    fn into_iter(self) -> Self::IntoIter {
        self.discrepancies.into_iter()
    }
}

/// Which store a pass walks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    A,
    B,
}

/// Compare store `a` against store `b`.
///
/// Neither store is modified. Keys with equal values on both sides produce
/// no record.
pub fn diff(a: &Ini, b: &Ini) -> IniDiff {
    let mut discrepancies = Vec::new();
    walk(a.sections(), b.sections(), Side::A, &mut discrepancies);
    walk(b.sections(), a.sections(), Side::B, &mut discrepancies);

    let result = IniDiff { discrepancies };
    debug!(
        total = result.len(),
        values_differ = result.count(DiscrepancyKind::ValuesDiffer),
        "INI diff computed"
    );
    result
}

/// Parse both files with [`Ini::parse_file`] and compare them.
pub fn diff_files<P: AsRef<Path>, Q: AsRef<Path>>(a: P, b: Q) -> IniResult<IniDiff> {
    let mut ini_a = Ini::new();
    ini_a.parse_file(a)?;
    let mut ini_b = Ini::new();
    ini_b.parse_file(b)?;
    Ok(diff(&ini_a, &ini_b))
}

/// One direction of the comparison. Value mismatches are only recorded
/// when walking A.
fn walk(from: &SectionMap, to: &SectionMap, side: Side, out: &mut Vec<Discrepancy>) {
    for (section, pairs) in from {
        let Some(other) = to.get(section) else {
            out.push(match side {
                Side::A => Discrepancy::SectionOnlyInA {
                    section: section.clone(),
                },
                Side::B => Discrepancy::SectionOnlyInB {
                    section: section.clone(),
                },
            });
            continue;
        };

        for (key, value) in pairs {
            match (other.get(key), side) {
                (None, Side::A) => out.push(Discrepancy::KeyOnlyInA {
                    section: section.clone(),
                    key: key.clone(),
                    value: value.clone(),
                }),
                (None, Side::B) => out.push(Discrepancy::KeyOnlyInB {
                    section: section.clone(),
                    key: key.clone(),
                    value: value.clone(),
                }),
                (Some(other_value), Side::A) if other_value != value => {
                    out.push(Discrepancy::ValuesDiffer {
                        section: section.clone(),
                        key: key.clone(),
                        a_value: value.clone(),
                        b_value: other_value.clone(),
                    })
                }
                (Some(_), _) => {}
            }
        }
    }
}
