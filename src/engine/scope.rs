//! Scope resolution: flags to probes.
//!
//! A flag set is turned into the ordered list of reflective probes to run
//! against a target. The mapping depends on whether the target is a type:
//!
//! ```text
//!              │ type target                 │ object target
//! ─────────────┼─────────────────────────────┼──────────────────────
//! instance     │ InstanceMembers(v) per v    │ Members(v) per v
//! class        │ Members(v) per v            │ (nothing)
//! singleton    │ SingletonMembers            │ SingletonMembers
//! ```
//!
//! Visibility defaults to `public`, scope defaults to `instance`. The output
//! is visibility-major, scope-minor, without duplicates, so probe lists (and
//! everything built from them) are reproducible.

use super::options::MethodOptions;
use crate::reflection::{Probe, Visibility};

/// Probe lists for both kinds of target, computed once per search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProbePlan {
    pub(crate) for_types: Vec<Probe>,
    pub(crate) for_objects: Vec<Probe>,
}

impl ProbePlan {
    pub(crate) fn new(options: MethodOptions) -> Self {
        ProbePlan { for_types: resolve_probes(options, true), for_objects: resolve_probes(options, false) }
    }

    pub(crate) fn for_target(&self, target_is_type: bool) -> &[Probe] {
        if target_is_type { &self.for_types } else { &self.for_objects }
    }
}

/// Ordered, deduplicated probes for `options` against a type or an object.
pub(crate) fn resolve_probes(options: MethodOptions, target_is_type: bool) -> Vec<Probe> {
    let mut visibilities: Vec<Visibility> =
        Visibility::ALL.into_iter().filter(|v| options.contains(v.flag())).collect();
    if visibilities.is_empty() {
        visibilities.push(Visibility::Public);
    }

    let mut scope = options & MethodOptions::SCOPE;
    if scope.is_empty() {
        scope = MethodOptions::INSTANCE;
    }

    let mut probes = Vec::new();
    let mut push = |probe: Probe| {
        if !probes.contains(&probe) {
            probes.push(probe);
        }
    };

    for visibility in visibilities {
        if scope.contains(MethodOptions::INSTANCE) {
            push(if target_is_type { Probe::InstanceMembers(visibility) } else { Probe::Members(visibility) });
        }
        // Class-side members are read through the type's own member listing.
        if scope.contains(MethodOptions::CLASS) && target_is_type {
            push(Probe::Members(visibility));
        }
        if scope.contains(MethodOptions::SINGLETON) {
            push(Probe::SingletonMembers);
        }
    }

    probes
}

#[cfg(test)]
mod tests {
    use super::*;
    use Visibility::*;

    #[test]
    fn empty_options_mean_public_instance() {
        assert_eq!(resolve_probes(MethodOptions::empty(), true), vec![Probe::InstanceMembers(Public)]);
        assert_eq!(
            resolve_probes(MethodOptions::empty(), true),
            resolve_probes(MethodOptions::PUBLIC | MethodOptions::INSTANCE, true)
        );
    }

    #[test]
    fn objects_use_bare_member_probes() {
        assert_eq!(resolve_probes(MethodOptions::empty(), false), vec![Probe::Members(Public)]);
        assert_eq!(
            resolve_probes(MethodOptions::PRIVATE | MethodOptions::INSTANCE, false),
            vec![Probe::Members(Private)]
        );
    }

    #[test]
    fn class_scope_is_type_only() {
        assert_eq!(resolve_probes(MethodOptions::CLASS, true), vec![Probe::Members(Public)]);
        assert!(resolve_probes(MethodOptions::CLASS, false).is_empty());
    }

    #[test]
    fn cross_product_is_visibility_major() {
        let options = MethodOptions::PRIVATE | MethodOptions::PUBLIC | MethodOptions::CLASS | MethodOptions::INSTANCE;
        assert_eq!(
            resolve_probes(options, true),
            vec![
                Probe::InstanceMembers(Public),
                Probe::Members(Public),
                Probe::InstanceMembers(Private),
                Probe::Members(Private),
            ]
        );
    }

    #[test]
    fn singleton_ignores_visibility_and_deduplicates() {
        assert_eq!(resolve_probes(MethodOptions::SINGLETON, true), vec![Probe::SingletonMembers]);
        assert_eq!(resolve_probes(MethodOptions::SINGLETON, false), vec![Probe::SingletonMembers]);

        // Not reachable through validated options, but the resolver must still
        // stay duplicate-free.
        let options = MethodOptions::SINGLETON | MethodOptions::PUBLIC | MethodOptions::PRIVATE;
        assert_eq!(resolve_probes(options, true), vec![Probe::SingletonMembers]);
    }

    #[test]
    fn singleton_with_instance_on_object() {
        let options = MethodOptions::SINGLETON | MethodOptions::INSTANCE;
        assert_eq!(resolve_probes(options, false), vec![Probe::Members(Public), Probe::SingletonMembers]);
    }

    #[test]
    fn suppression_flag_does_not_change_probes() {
        let plan = ProbePlan::new(MethodOptions::SUPPRESS_ANCESTOR_METHODS);
        assert_eq!(plan.for_target(true), &[Probe::InstanceMembers(Public)]);
        assert_eq!(plan.for_target(false), &[Probe::Members(Public)]);
    }
}
