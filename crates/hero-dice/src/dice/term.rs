//! Term units and the groups they render as.

use serde::{Deserialize, Serialize};

use super::{Sign, TermKind};

/// One atomic unit of a formula: a single die, half die, d6-1 or flat number.
///
/// Units created by the same builder call share a `group` id. Groups never
/// merge, even when two adjacent calls add the same kind with the same sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// The unit's category.
    pub kind: TermKind,
    /// Added or subtracted.
    pub sign: Sign,
    /// Id of the builder call that created this unit.
    pub group: usize,
    /// The raw face, once rolled. Flat units always carry their magnitude.
    pub face: Option<u32>,
}

impl Term {
    /// A flat number. Its magnitude is known before rolling.
    pub fn flat(sign: Sign, group: usize, magnitude: u32) -> Self {
        Self {
            kind: TermKind::Flat,
            sign,
            group,
            face: Some(magnitude),
        }
    }

    /// An unrolled die unit of the given kind.
    pub fn unrolled(kind: TermKind, sign: Sign, group: usize) -> Self {
        Self {
            kind,
            sign,
            group,
            face: None,
        }
    }

    /// The resolved value, or `None` if the unit has not been rolled.
    pub fn value(&self) -> Option<u32> {
        self.face.map(|face| self.kind.resolve(face))
    }

    /// The resolved value with the sign applied.
    pub fn signed_value(&self) -> Option<i32> {
        self.value().map(|v| self.sign.apply(v))
    }
}

/// A maximal run of units that share a group id and a kind.
///
/// This is the unit of formula rendering: one chunk of text per group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermGroup<'a> {
    /// The kind shared by every unit in the run.
    pub kind: TermKind,
    /// The sign shared by every unit in the run.
    pub sign: Sign,
    /// The units themselves.
    pub terms: &'a [Term],
}

impl<'a> TermGroup<'a> {
    /// Split a unit sequence into its rendering groups, in order.
    pub fn split(terms: &'a [Term]) -> Vec<TermGroup<'a>> {
        terms
            .chunk_by(|a, b| a.group == b.group && a.kind == b.kind)
            .map(|run| TermGroup {
                kind: run[0].kind,
                sign: run[0].sign,
                terms: run,
            })
            .collect()
    }

    /// Number of units in the group.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if the group holds no units.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl std::fmt::Display for TermGroup<'_> {
    /// Render the group without its sign.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = self.terms.len();
        match self.kind {
            TermKind::Flat => {
                let magnitude = self
                    .terms
                    .iter()
                    .filter_map(|t| t.face)
                    .fold(0u32, u32::saturating_add);
                write!(f, "{magnitude}")
            }
            TermKind::Die => write!(f, "{n}d6"),
            TermKind::HalfDie if n == 1 => write!(f, "½d6"),
            TermKind::HalfDie => write!(f, "{n}(½d6)"),
            TermKind::DieMinusOne if n == 1 => write!(f, "1d6-1"),
            TermKind::DieMinusOne => write!(f, "{n}(d6-1)"),
        }
    }
}
