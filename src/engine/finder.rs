//! Search orchestration.
//!
//! `MethodFinder` ties the pieces together for a single search:
//!
//! ```text
//! (0) validate flags          -> fail fast, before any reflective work
//! (1) empty targets           -> empty result
//! (2) no usable criteria      -> every target NotMatched([])
//! (3) plan probes + compile   -> ProbePlan, Vec<NameMatcher>
//! (4) per target:
//!       resolve receiver      (type name -> handle; unresolved -> no candidates)
//!       probe, match, union
//!       suppress_inherited    (only with suppress_ancestor_methods)
//! (5) record Matched / NotMatched(original criteria)
//! ```
//!
//! The output is deterministic given the same inputs and reflection data:
//! probes run in plan order and names are kept in a sorted set.

use super::ancestors::suppress_inherited;
use super::matcher::{NameMatcher, compile_all, effective_criteria};
use super::metrics::{FindRun, RunMetrics, TargetMetrics};
use super::options::MethodOptions;
use super::scope::ProbePlan;
use crate::error::FinderError;
use crate::reflection::{Receiver, Reflection};
use crate::result::FinderResult;
use crate::spec::Specification;
use crate::{Criterion, Target};
use std::collections::BTreeSet;
use std::time::Instant;

/// Runs member searches against a [`Reflection`] implementation.
///
/// Usage: create with `MethodFinder::new(&registry)` then call `find(&spec)`.
/// A finder holds no state besides the reflection reference, so one finder
/// can serve any number of searches.
pub struct MethodFinder<'r, R: ?Sized> {
    reflection: &'r R,
}

impl<R: ?Sized> Clone for MethodFinder<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: ?Sized> Copy for MethodFinder<'_, R> {}

impl<'r, R: Reflection + ?Sized> MethodFinder<'r, R> {
    pub fn new(reflection: &'r R) -> Self {
        MethodFinder { reflection }
    }

    /// Resolve `spec` into per-target member names.
    pub fn find(&self, spec: &Specification) -> Result<FinderResult, FinderError> {
        self.find_verbose(spec).map(|run| run.result)
    }

    /// Like [`find`](Self::find), also returning run metrics.
    pub fn find_verbose(&self, spec: &Specification) -> Result<FindRun, FinderError> {
        let started = Instant::now();
        spec.options().validate()?;

        let targets = spec.targets();
        if targets.is_empty() {
            return Ok(finish(FinderResult::new(), RunMetrics::default(), started));
        }

        if effective_criteria(spec.methods()).is_empty() {
            log::debug!("[find] no member criteria given for {} target(s)", targets.len());
            let mut result = FinderResult::new();
            for target in targets {
                result.record_not_matched(target, Vec::new());
            }
            return Ok(finish(result, RunMetrics::default(), started));
        }

        self.run(&targets, spec.methods(), spec.options(), started)
    }

    /// Positional form: search `targets` for `criteria` under `options`.
    ///
    /// `None` criteria means "every member".
    pub fn find_all_by(
        &self,
        targets: &[Target],
        criteria: Option<&[Criterion]>,
        options: MethodOptions,
    ) -> Result<FinderResult, FinderError> {
        let started = Instant::now();
        options.validate()?;

        let all = [Criterion::All];
        let criteria = criteria.unwrap_or(&all);
        self.run(targets, criteria, options, started).map(|run| run.result)
    }

    fn run(
        &self,
        targets: &[Target],
        criteria: &[Criterion],
        options: MethodOptions,
        started: Instant,
    ) -> Result<FindRun, FinderError> {
        let matchers = compile_all(criteria)?;
        let plan = ProbePlan::new(options);
        let mut metrics = RunMetrics { setup: started.elapsed(), ..RunMetrics::default() };

        log::debug!(
            "[find] options={} type probes={:?} object probes={:?} criteria={}",
            options,
            plan.for_types,
            plan.for_objects,
            matchers.len()
        );

        let mut result = FinderResult::new();
        for target in targets {
            let mut stats = TargetMetrics::new(target.clone());
            let found = self.collect(target, &matchers, &plan, options, &mut stats);
            stats.matched = found.len();

            log::trace!(
                "[find] target={} candidates={} suppressed={} matched={}",
                target,
                stats.candidates,
                stats.suppressed,
                stats.matched
            );

            if found.is_empty() {
                result.record_not_matched(target.clone(), criteria.to_vec());
            } else {
                result.record_matched(target.clone(), found.into_iter().collect());
            }
            metrics.targets.push(stats);
        }

        Ok(finish(result, metrics, started))
    }

    /// Matched names for one target, suppression applied.
    fn collect(
        &self,
        target: &Target,
        matchers: &[NameMatcher],
        plan: &ProbePlan,
        options: MethodOptions,
        stats: &mut TargetMetrics,
    ) -> BTreeSet<String> {
        let mut found = BTreeSet::new();

        let Some(receiver) = self.receiver(target) else {
            log::debug!("[find] {target} does not resolve to a known type");
            return found;
        };
        stats.resolved = true;

        let probes = plan.for_target(target.is_type());
        stats.probes = probes.to_vec();

        for &probe in probes {
            let candidates = self.reflection.list_members(receiver, probe);
            stats.candidates += candidates.len();
            found.extend(candidates.into_iter().filter(|name| matchers.iter().any(|m| m.is_match(name))));
        }

        if options.contains(MethodOptions::SUPPRESS_ANCESTOR_METHODS) && !found.is_empty() {
            // Objects are filtered relative to their runtime class, with the
            // probes a type target would use.
            let anchor = match receiver {
                Receiver::Type(ty) => Some((ty, probes)),
                Receiver::Object(object) => self.reflection.class_of(object).map(|ty| (ty, plan.for_types.as_slice())),
            };
            if let Some((ty, probes)) = anchor {
                stats.suppressed = suppress_inherited(self.reflection, ty, probes, &mut found);
            }
        }

        found
    }

    fn receiver(&self, target: &Target) -> Option<Receiver> {
        match target {
            Target::Type(handle) => Some(Receiver::Type(*handle)),
            Target::TypeName(name) => self.reflection.resolve_type(name).map(Receiver::Type),
            Target::Object(handle) => Some(Receiver::Object(*handle)),
        }
    }
}

fn finish(result: FinderResult, mut metrics: RunMetrics, started: Instant) -> FindRun {
    metrics.total = started.elapsed();
    FindRun { result, metrics }
}
