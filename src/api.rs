use crate::engine::{FindRun, MethodFinder, MethodOptions};
use crate::error::FinderError;
use crate::reflection::Reflection;
use crate::result::FinderResult;
use crate::spec::Specification;
use crate::{Criterion, Target};

/// Flag names accepted by [`is_recognized_option`].
///
/// `singleton` is not in this list even though option sets accept it;
/// callers that pre-screen flag names with this check rely on the narrower
/// set.
const RECOGNIZED_OPTIONS: &[&str] =
    &["public", "private", "protected", "instance", "class", "suppress_ancestor_methods"];

/// Resolve `spec` against `reflection`.
///
/// # Example
/// ```
/// use memberscope::{MatchEntry, Specification, TypeDef, TypeRegistry, Visibility, find};
///
/// let mut registry = TypeRegistry::new();
/// let runner = registry.define(TypeDef::class("Runner").instance(Visibility::Public, ["run", "run_fast"])).unwrap();
///
/// let spec = Specification::new().with_type(runner).with_method("run");
/// let result = find(&registry, &spec).unwrap();
/// assert_eq!(result.get(&runner.into()), Some(&MatchEntry::Matched(vec!["run".to_string()])));
/// ```
pub fn find<R: Reflection + ?Sized>(reflection: &R, spec: &Specification) -> Result<FinderResult, FinderError> {
    MethodFinder::new(reflection).find(spec)
}

/// Positional form of [`find`]. `None` criteria means every member.
pub fn find_all_by<R: Reflection + ?Sized>(
    reflection: &R,
    targets: &[Target],
    criteria: Option<&[Criterion]>,
    options: MethodOptions,
) -> Result<FinderResult, FinderError> {
    MethodFinder::new(reflection).find_all_by(targets, criteria, options)
}

/// [`find`] plus timings and per-target counters.
///
/// The default [`find`] path builds the same counters and drops them; use
/// this one for debugging which probes ran and what they returned.
pub fn find_verbose<R: Reflection + ?Sized>(reflection: &R, spec: &Specification) -> Result<FindRun, FinderError> {
    MethodFinder::new(reflection).find_verbose(spec)
}

/// Whether `name` is one of the scope/visibility option names.
pub fn is_recognized_option(name: &str) -> bool {
    RECOGNIZED_OPTIONS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MethodOption;
    use crate::registry::{TypeDef, TypeRegistry};
    use crate::reflection::Visibility;

    #[test]
    fn recognized_options_exclude_singleton() {
        for option in MethodOption::ALL {
            let expected = option != MethodOption::Singleton;
            assert_eq!(is_recognized_option(option.name()), expected, "{}", option.name());
        }
        assert!(!is_recognized_option("static"));
        assert!(!is_recognized_option(""));
    }

    #[test]
    fn free_functions_share_one_engine() {
        let mut registry = TypeRegistry::new();
        let widget = registry.define(TypeDef::class("Widget").instance(Visibility::Public, ["render"])).unwrap();
        let spec = Specification::new().with_type(widget).with_method(Criterion::All);

        let direct = find(&registry, &spec).unwrap();
        let verbose = find_verbose(&registry, &spec).unwrap();
        let positional = find_all_by(&registry, &[widget.into()], None, MethodOptions::empty()).unwrap();

        assert_eq!(direct, verbose.result);
        assert_eq!(direct, positional);
        assert_eq!(verbose.metrics.targets.len(), 1);
        assert!(verbose.metrics.total >= verbose.metrics.setup);
    }

    #[test]
    fn works_through_a_trait_object() {
        let mut registry = TypeRegistry::new();
        registry.define(TypeDef::class("Widget").instance(Visibility::Public, ["render"])).unwrap();
        let dynamic: &dyn Reflection = &registry;

        let spec = Specification::new().with_type("Widget").with_method("render");
        let result = find(dynamic, &spec).unwrap();
        assert_eq!(result.names_for(&Target::from("Widget")), Some(&["render".to_string()][..]));
    }
}
