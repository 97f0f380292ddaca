//! Run metrics.
//!
//! A small set of structs used to observe what a search did:
//!
//! - `MethodFinder::find` for normal operation.
//! - `MethodFinder::find_verbose` when the caller wants to see which probes
//!   ran against each target, how many candidate names were scanned and how
//!   many were dropped by ancestor suppression.
//!
//! The counters are plain integers gathered on the way; they never change
//! the result.

use crate::reflection::Probe;
use crate::result::FinderResult;
use crate::Target;
use std::time::Duration;

/// Finder output bundled with timing information.
#[derive(Debug, Clone)]
pub struct FindRun {
    pub result: FinderResult,
    pub metrics: RunMetrics,
}

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for the search, validation included.
    pub total: Duration,
    /// Time spent compiling criteria and planning probes.
    pub setup: Duration,
    /// One entry per searched target, in input order.
    pub targets: Vec<TargetMetrics>,
}

impl RunMetrics {
    /// Candidate names scanned across all targets.
    pub fn candidates_scanned(&self) -> usize {
        self.targets.iter().map(|t| t.candidates).sum()
    }
}

/// What happened for a single target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetMetrics {
    pub target: Target,
    /// `false` when a type name did not resolve.
    pub resolved: bool,
    /// Probes run against the target, in order.
    pub probes: Vec<Probe>,
    /// Candidate names returned by all probes, before matching.
    pub candidates: usize,
    /// Names removed by ancestor suppression.
    pub suppressed: usize,
    /// Names finally recorded for the target.
    pub matched: usize,
}

impl TargetMetrics {
    pub(crate) fn new(target: Target) -> Self {
        TargetMetrics { target, resolved: false, probes: Vec::new(), candidates: 0, suppressed: 0, matched: 0 }
    }
}
