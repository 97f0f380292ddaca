//! Ancestor suppression.
//!
//! With `suppress_ancestor_methods`, a type only keeps the members it declares
//! (or overrides) itself: any name that an ancestor or mixed-in module also
//! produces under the same probes is removed.
//!
//! ```text
//! Base:    foo bar
//! Derived: foo baz        (overrides foo, inherits bar)
//!
//! Derived, public instance  -> {bar, baz, foo}
//!   suppress (Base)         -> {baz}
//! ```
//!
//! Note that an override is suppressed too, since the ancestor produces the
//! same name.

use crate::reflection::{Probe, Receiver, Reflection, TypeHandle};
use std::collections::BTreeSet;

/// Remove from `names` everything an ancestor of `ty` produces under
/// `probes`. Returns how many names were removed.
pub(crate) fn suppress_inherited<R: Reflection + ?Sized>(
    reflection: &R,
    ty: TypeHandle,
    probes: &[Probe],
    names: &mut BTreeSet<String>,
) -> usize {
    let ancestors: Vec<TypeHandle> = reflection.ancestors_of(ty).into_iter().filter(|a| *a != ty).collect();
    if ancestors.is_empty() {
        log::trace!("[suppress] {ty} has no ancestors, nothing to remove");
        return 0;
    }

    let before = names.len();
    for ancestor in ancestors {
        for &probe in probes {
            for inherited in reflection.list_members(Receiver::Type(ancestor), probe) {
                names.remove(&inherited);
            }
            if names.is_empty() {
                return before;
            }
        }
    }

    before - names.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::Visibility;
    use crate::registry::{TypeDef, TypeRegistry};

    fn names(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn removes_inherited_and_overridden_names() {
        let mut registry = TypeRegistry::new();
        let base = registry.define(TypeDef::class("Base").instance(Visibility::Public, ["foo", "bar"])).unwrap();
        let derived = registry
            .define(TypeDef::class("Derived").inherits(base).instance(Visibility::Public, ["foo", "baz"]))
            .unwrap();

        let probes = [Probe::InstanceMembers(Visibility::Public)];
        let mut found = names(&["bar", "baz", "foo"]);
        let removed = suppress_inherited(&registry, derived, &probes, &mut found);

        assert_eq!(removed, 2);
        assert_eq!(found, names(&["baz"]));
    }

    #[test]
    fn mixed_in_modules_count_as_ancestors() {
        let mut registry = TypeRegistry::new();
        let printable = registry.define(TypeDef::module("Printable").instance(Visibility::Public, ["print"])).unwrap();
        let doc = registry
            .define(TypeDef::class("Document").includes(printable).instance(Visibility::Public, ["save"]))
            .unwrap();

        let probes = [Probe::InstanceMembers(Visibility::Public)];
        let mut found = names(&["print", "save"]);
        suppress_inherited(&registry, doc, &probes, &mut found);

        assert_eq!(found, names(&["save"]));
    }

    #[test]
    fn root_types_are_left_alone() {
        let mut registry = TypeRegistry::new();
        let root = registry.define(TypeDef::class("Root").instance(Visibility::Public, ["only"])).unwrap();

        let mut found = names(&["only"]);
        let removed = suppress_inherited(&registry, root, &[Probe::InstanceMembers(Visibility::Public)], &mut found);

        assert_eq!(removed, 0);
        assert_eq!(found, names(&["only"]));
    }

    #[test]
    fn only_the_given_probes_are_consulted() {
        let mut registry = TypeRegistry::new();
        let base = registry.define(TypeDef::class("Base").instance(Visibility::Private, ["helper"])).unwrap();
        let derived = registry.define(TypeDef::class("Derived").inherits(base)).unwrap();

        // `helper` is private in Base, so a public probe does not see it there.
        let mut found = names(&["helper"]);
        suppress_inherited(&registry, derived, &[Probe::InstanceMembers(Visibility::Public)], &mut found);
        assert_eq!(found, names(&["helper"]));

        suppress_inherited(&registry, derived, &[Probe::InstanceMembers(Visibility::Private)], &mut found);
        assert!(found.is_empty());
    }
}
