//! Member-resolution query engine.
//!
//! Given a set of targets (types, type names or live objects), a set of
//! member-name criteria (exact names, regex patterns or "everything") and a
//! flag set describing visibility and scope, `memberscope` resolves exactly
//! which members of each target satisfy the criteria.
//!
//! ```text
//! Specification ──▶ validate ──▶ ProbePlan ──▶ per target:
//!                                               list_members(probe) ─▶ NameMatcher ─▶ ∪
//!                                               (suppress_inherited)
//!                                             ──▶ FinderResult
//! ```
//!
//! The host environment supplies type structure through the [`Reflection`]
//! trait; [`TypeRegistry`] is a ready-made in-memory implementation.
//!
//! # Example
//! ```
//! use memberscope::{Criterion, MethodOptions, Specification, TypeDef, TypeRegistry, Visibility, find};
//!
//! let mut registry = TypeRegistry::new();
//! let widget = registry
//!     .define(TypeDef::class("Widget").instance(Visibility::Public, ["render", "resize", "paint"]))
//!     .unwrap();
//!
//! let spec = Specification::new()
//!     .with_type(widget)
//!     .with_method(Criterion::pattern("^re").unwrap())
//!     .with_options(MethodOptions::PUBLIC | MethodOptions::INSTANCE);
//!
//! let result = find(&registry, &spec).unwrap();
//! assert_eq!(result.names_for(&widget.into()), Some(&["render".to_string(), "resize".to_string()][..]));
//! ```

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod reflection;
mod registry;
mod result;
mod spec;

use regex::Regex;
use std::fmt;

pub use api::{find, find_all_by, find_verbose, is_recognized_option};
pub use engine::{FindRun, MethodFinder, MethodOption, MethodOptions, RunMetrics, TargetMetrics};
pub use error::FinderError;
pub use reflection::{ObjectHandle, Probe, Receiver, Reflection, TypeHandle, Visibility};
pub use registry::{TypeDef, TypeKind, TypeRegistry};
pub use result::{FinderResult, MatchEntry};
pub use spec::{SpecKey, SpecValue, Specification, SpecificationBuilder};

// --- Targets ----------------------------------------------------------------

/// Something whose members are searched.
///
/// A `TypeName` is resolved through [`Reflection::resolve_type`] at search
/// time; a name that does not resolve simply yields no candidates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    Type(TypeHandle),
    TypeName(String),
    Object(ObjectHandle),
}

impl Target {
    /// Whether the target denotes a type (by handle or by name) rather than a
    /// live object.
    pub fn is_type(&self) -> bool {
        !matches!(self, Target::Object(_))
    }
}

impl From<TypeHandle> for Target {
    fn from(handle: TypeHandle) -> Self {
        Target::Type(handle)
    }
}

impl From<ObjectHandle> for Target {
    fn from(handle: ObjectHandle) -> Self {
        Target::Object(handle)
    }
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Target::TypeName(name.to_string())
    }
}

impl From<String> for Target {
    fn from(name: String) -> Self {
        Target::TypeName(name)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Type(handle) => write!(f, "{handle}"),
            Target::TypeName(name) => write!(f, "{name:?}"),
            Target::Object(handle) => write!(f, "{handle}"),
        }
    }
}

// --- Criteria ---------------------------------------------------------------

/// A single member-name rule.
///
/// `Name` matches one member exactly, `Pattern` is searched (unanchored) in
/// each member name, and `All` matches every non-empty name.
#[derive(Debug, Clone)]
pub enum Criterion {
    Name(String),
    Pattern(Regex),
    All,
}

impl Criterion {
    /// Compile `pattern` into a [`Criterion::Pattern`].
    pub fn pattern(pattern: &str) -> Result<Self, FinderError> {
        Ok(Criterion::Pattern(Regex::new(pattern)?))
    }

    /// Blank literal names can never usefully match and are dropped before
    /// compilation.
    pub fn is_blank(&self) -> bool {
        matches!(self, Criterion::Name(name) if name.trim().is_empty())
    }
}

impl PartialEq for Criterion {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Criterion::Name(a), Criterion::Name(b)) => a == b,
            (Criterion::Pattern(a), Criterion::Pattern(b)) => a.as_str() == b.as_str(),
            (Criterion::All, Criterion::All) => true,
            _ => false,
        }
    }
}

impl Eq for Criterion {}

impl From<&str> for Criterion {
    fn from(name: &str) -> Self {
        Criterion::Name(name.to_string())
    }
}

impl From<String> for Criterion {
    fn from(name: String) -> Self {
        Criterion::Name(name)
    }
}

impl From<Regex> for Criterion {
    fn from(pattern: Regex) -> Self {
        Criterion::Pattern(pattern)
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::Name(name) => write!(f, "{name}"),
            Criterion::Pattern(re) => write!(f, "/{}/", re.as_str()),
            Criterion::All => write!(f, "<all>"),
        }
    }
}
