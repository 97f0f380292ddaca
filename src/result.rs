//! Search results.
//!
//! A [`FinderResult`] maps every searched target to exactly one
//! [`MatchEntry`]:
//!
//! ```text
//! Widget ─▶ Matched(["render", "resize"])
//! Gadget ─▶ NotMatched([/^re/])      searched, nothing found
//! Sprite ─▶ NotMatched([])           nothing to search for
//! ```
//!
//! The criteria stored in `NotMatched` are the caller's originals, unchanged,
//! so "no criteria given" (empty) stays distinguishable from "searched but
//! found nothing".

use crate::{Criterion, Target};
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Outcome for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEntry {
    /// Sorted, deduplicated, never empty.
    Matched(Vec<String>),
    NotMatched(Vec<Criterion>),
}

impl MatchEntry {
    pub fn is_matched(&self) -> bool {
        matches!(self, MatchEntry::Matched(_))
    }

    pub fn names(&self) -> Option<&[String]> {
        match self {
            MatchEntry::Matched(names) => Some(names),
            MatchEntry::NotMatched(_) => None,
        }
    }
}

/// Per-target outcomes of one search. Immutable once returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinderResult {
    entries: BTreeMap<Target, MatchEntry>,
}

impl FinderResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_matched(&mut self, target: Target, mut names: Vec<String>) {
        names.sort();
        names.dedup();
        self.entries.insert(target, MatchEntry::Matched(names));
    }

    pub(crate) fn record_not_matched(&mut self, target: Target, criteria: Vec<Criterion>) {
        self.entries.insert(target, MatchEntry::NotMatched(criteria));
    }

    pub fn get(&self, target: &Target) -> Option<&MatchEntry> {
        self.entries.get(target)
    }

    /// Matched names for `target`, if it matched.
    pub fn names_for(&self, target: &Target) -> Option<&[String]> {
        self.get(target).and_then(MatchEntry::names)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Target, MatchEntry> {
        self.entries.iter()
    }

    pub fn matched(&self) -> impl Iterator<Item = (&Target, &[String])> {
        self.entries.iter().filter_map(|(t, e)| e.names().map(|names| (t, names)))
    }

    pub fn not_matched(&self) -> impl Iterator<Item = (&Target, &[Criterion])> {
        self.entries.iter().filter_map(|(t, e)| match e {
            MatchEntry::NotMatched(criteria) => Some((t, criteria.as_slice())),
            MatchEntry::Matched(_) => None,
        })
    }

    pub fn matched_targets(&self) -> Vec<&Target> {
        self.matched().map(|(t, _)| t).collect()
    }

    pub fn not_matched_targets(&self) -> Vec<&Target> {
        self.not_matched().map(|(t, _)| t).collect()
    }

    pub fn has_matches(&self) -> bool {
        self.entries.values().any(MatchEntry::is_matched)
    }

    /// No targets recorded at all (not even as not-matched).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Union of two results.
    ///
    /// A target matched on either side stays matched with the union of its
    /// names. A target not matched on both sides keeps the criteria of both,
    /// left first, without repeats.
    pub fn merge(mut self, other: FinderResult) -> FinderResult {
        for (target, theirs) in other.entries {
            let merged = match (self.entries.remove(&target), theirs) {
                (None, theirs) => theirs,
                (Some(MatchEntry::Matched(mut ours)), MatchEntry::Matched(theirs)) => {
                    ours.extend(theirs);
                    ours.sort();
                    ours.dedup();
                    MatchEntry::Matched(ours)
                }
                (Some(MatchEntry::Matched(ours)), MatchEntry::NotMatched(_)) => MatchEntry::Matched(ours),
                (Some(MatchEntry::NotMatched(_)), MatchEntry::Matched(theirs)) => MatchEntry::Matched(theirs),
                (Some(MatchEntry::NotMatched(mut ours)), MatchEntry::NotMatched(theirs)) => {
                    for criterion in theirs {
                        if !ours.contains(&criterion) {
                            ours.push(criterion);
                        }
                    }
                    MatchEntry::NotMatched(ours)
                }
            };
            self.entries.insert(target, merged);
        }
        self
    }
}

impl<'a> IntoIterator for &'a FinderResult {
    type Item = (&'a Target, &'a MatchEntry);
    type IntoIter = btree_map::Iter<'a, Target, MatchEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
