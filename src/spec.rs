//! Search specifications.
//!
//! A [`Specification`] says what to search (targets), what to look for
//! (criteria) and where to look (option flags). It can be built two ways:
//!
//! - **Typed**: `Specification::new().with_type(..).with_method(..)`. Only the
//!   flag conflict check is left for search time.
//! - **Keyed**: `Specification::builder().set("types", ..).set("options", ..)`,
//!   the flat key/value form. `build()` rejects unknown keys, values of the
//!   wrong kind and unknown option names, reporting all of them at once.
//!
//! Recognized keys:
//!
//! ```text
//! type  types  object  objects     -> targets
//! method  methods                  -> criteria
//! options                          -> option names / flags
//! class instance public private protected suppress_ancestor_methods
//!                                  -> accepted, must be booleans, no effect
//! ```
//!
//! Only the nested `options` value decides the flag set. The top-level
//! boolean keys are allowed for compatibility with callers that pass them,
//! but they neither change the probes nor take part in the `singleton`
//! conflict check.
//!
//! Targets are classified by what they are, not by the key they came in
//! under: a type handle passed as an object is still searched as a type.

use crate::engine::MethodOptions;
use crate::error::FinderError;
use crate::reflection::{ObjectHandle, TypeHandle};
use crate::{Criterion, Target};
use regex::Regex;
use std::str::FromStr;

/// Targets, criteria and flags for one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Specification {
    types: Vec<Target>,
    objects: Vec<Target>,
    methods: Vec<Criterion>,
    options: MethodOptions,
}

impl Specification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> SpecificationBuilder {
        SpecificationBuilder::default()
    }

    pub fn with_type(mut self, target: impl Into<Target>) -> Self {
        self.types.push(target.into());
        self
    }

    pub fn with_types<I, T>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Target>,
    {
        self.types.extend(targets.into_iter().map(Into::into));
        self
    }

    pub fn with_object(mut self, target: impl Into<Target>) -> Self {
        self.objects.push(target.into());
        self
    }

    pub fn with_objects<I, T>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Target>,
    {
        self.objects.extend(targets.into_iter().map(Into::into));
        self
    }

    pub fn with_method(mut self, criterion: impl Into<Criterion>) -> Self {
        self.methods.push(criterion.into());
        self
    }

    pub fn with_methods<I, C>(mut self, criteria: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Criterion>,
    {
        self.methods.extend(criteria.into_iter().map(Into::into));
        self
    }

    pub fn with_options(mut self, options: MethodOptions) -> Self {
        self.options |= options;
        self
    }

    /// Types followed by objects, in the order given.
    pub fn targets(&self) -> Vec<Target> {
        self.types.iter().chain(&self.objects).cloned().collect()
    }

    /// Criteria exactly as given (blanks included).
    pub fn methods(&self) -> &[Criterion] {
        &self.methods
    }

    pub fn options(&self) -> MethodOptions {
        self.options
    }
}

/// Keys accepted by [`SpecificationBuilder::set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecKey {
    Type,
    Types,
    Object,
    Objects,
    Method,
    Methods,
    Options,
    Class,
    Instance,
    Public,
    Private,
    Protected,
    SuppressAncestorMethods,
}

impl SpecKey {
    pub const ALL: [SpecKey; 13] = [
        SpecKey::Type,
        SpecKey::Types,
        SpecKey::Object,
        SpecKey::Objects,
        SpecKey::Method,
        SpecKey::Methods,
        SpecKey::Options,
        SpecKey::Class,
        SpecKey::Instance,
        SpecKey::Public,
        SpecKey::Private,
        SpecKey::Protected,
        SpecKey::SuppressAncestorMethods,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SpecKey::Type => "type",
            SpecKey::Types => "types",
            SpecKey::Object => "object",
            SpecKey::Objects => "objects",
            SpecKey::Method => "method",
            SpecKey::Methods => "methods",
            SpecKey::Options => "options",
            SpecKey::Class => "class",
            SpecKey::Instance => "instance",
            SpecKey::Public => "public",
            SpecKey::Private => "private",
            SpecKey::Protected => "protected",
            SpecKey::SuppressAncestorMethods => "suppress_ancestor_methods",
        }
    }

    /// Top-level boolean keys. They are validated but never read.
    fn is_flag(self) -> bool {
        matches!(
            self,
            SpecKey::Class
                | SpecKey::Instance
                | SpecKey::Public
                | SpecKey::Private
                | SpecKey::Protected
                | SpecKey::SuppressAncestorMethods
        )
    }
}

impl FromStr for SpecKey {
    type Err = FinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpecKey::ALL.into_iter().find(|k| k.name() == s).ok_or_else(|| FinderError::unrecognized(vec![s.to_string()]))
    }
}

/// A value in the keyed form. `Text` is read according to the key: type
/// names for target keys, literal names for method keys, flag names for
/// `options`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecValue {
    Text(Vec<String>),
    Targets(Vec<Target>),
    Criteria(Vec<Criterion>),
    Flags(MethodOptions),
    Flag(bool),
}

impl From<&str> for SpecValue {
    fn from(text: &str) -> Self {
        SpecValue::Text(vec![text.to_string()])
    }
}

impl From<Vec<&str>> for SpecValue {
    fn from(text: Vec<&str>) -> Self {
        SpecValue::Text(text.into_iter().map(str::to_string).collect())
    }
}

impl From<Target> for SpecValue {
    fn from(target: Target) -> Self {
        SpecValue::Targets(vec![target])
    }
}

impl From<Vec<Target>> for SpecValue {
    fn from(targets: Vec<Target>) -> Self {
        SpecValue::Targets(targets)
    }
}

impl From<TypeHandle> for SpecValue {
    fn from(handle: TypeHandle) -> Self {
        SpecValue::Targets(vec![Target::Type(handle)])
    }
}

impl From<ObjectHandle> for SpecValue {
    fn from(handle: ObjectHandle) -> Self {
        SpecValue::Targets(vec![Target::Object(handle)])
    }
}

impl From<Criterion> for SpecValue {
    fn from(criterion: Criterion) -> Self {
        SpecValue::Criteria(vec![criterion])
    }
}

impl From<Vec<Criterion>> for SpecValue {
    fn from(criteria: Vec<Criterion>) -> Self {
        SpecValue::Criteria(criteria)
    }
}

impl From<Regex> for SpecValue {
    fn from(pattern: Regex) -> Self {
        SpecValue::Criteria(vec![Criterion::Pattern(pattern)])
    }
}

impl From<MethodOptions> for SpecValue {
    fn from(options: MethodOptions) -> Self {
        SpecValue::Flags(options)
    }
}

impl From<bool> for SpecValue {
    fn from(flag: bool) -> Self {
        SpecValue::Flag(flag)
    }
}

/// Keyed construction of a [`Specification`].
///
/// Problems are collected as keys are set and reported together by
/// [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct SpecificationBuilder {
    spec: Specification,
    option_names: Vec<String>,
    offending: Vec<String>,
}

impl SpecificationBuilder {
    pub fn set(mut self, key: &str, value: impl Into<SpecValue>) -> Self {
        let Ok(key) = key.parse::<SpecKey>() else {
            self.offending.push(key.to_string());
            return self;
        };

        match (key, value.into()) {
            (SpecKey::Type | SpecKey::Types, SpecValue::Text(names)) => {
                self.spec.types.extend(names.into_iter().map(Target::TypeName));
            }
            (SpecKey::Type | SpecKey::Types, SpecValue::Targets(targets)) => self.spec.types.extend(targets),
            (SpecKey::Object | SpecKey::Objects, SpecValue::Text(names)) => {
                self.spec.objects.extend(names.into_iter().map(Target::TypeName));
            }
            (SpecKey::Object | SpecKey::Objects, SpecValue::Targets(targets)) => self.spec.objects.extend(targets),
            (SpecKey::Method | SpecKey::Methods, SpecValue::Text(names)) => {
                self.spec.methods.extend(names.into_iter().map(Criterion::Name));
            }
            (SpecKey::Method | SpecKey::Methods, SpecValue::Criteria(criteria)) => self.spec.methods.extend(criteria),
            (SpecKey::Options, SpecValue::Text(names)) => self.option_names.extend(names),
            (SpecKey::Options, SpecValue::Flags(flags)) => self.spec.options |= flags,
            (key, SpecValue::Flag(_)) if key.is_flag() => {}
            (key, _) => self.offending.push(key.name().to_string()),
        }
        self
    }

    /// Validate everything that was set and produce the specification.
    pub fn build(self) -> Result<Specification, FinderError> {
        let SpecificationBuilder { mut spec, option_names, mut offending } = self;

        match MethodOptions::parse(&option_names) {
            Ok(parsed) => spec.options |= parsed,
            Err(err) => offending.extend(err.offending().iter().cloned()),
        }

        if !offending.is_empty() {
            return Err(FinderError::unrecognized(offending));
        }

        spec.options.validate()?;
        Ok(spec)
    }
}
