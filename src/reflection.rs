//! Reflection capability consumed by the engine.
//!
//! The engine never inspects types itself. Everything it knows about a
//! target comes through four questions asked of a [`Reflection`]
//! implementation:
//!
//! ```text
//! resolve_type("Widget")            -> Option<TypeHandle>
//! list_members(receiver, probe)     -> ["render", "resize", ...]
//! ancestors_of(Widget)              -> [Paintable, Base]   (never Widget itself)
//! class_of(w)                       -> Option<TypeHandle>
//! ```
//!
//! Implementations must be read-only: answering a query may not change what
//! later queries return. That is what makes concurrent `find` calls over a
//! shared reference safe.

use crate::engine::MethodOptions;
use std::fmt;

/// Opaque handle to a type known to a [`Reflection`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeHandle(u32);

impl TypeHandle {
    pub const fn new(index: u32) -> Self {
        TypeHandle(index)
    }

    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type#{}", self.0)
    }
}

/// Opaque handle to a live object known to a [`Reflection`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(u32);

impl ObjectHandle {
    pub const fn new(index: u32) -> Self {
        ObjectHandle(index)
    }

    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object#{}", self.0)
    }
}

/// Member visibility, in the canonical probe order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub const ALL: [Visibility; 3] = [Visibility::Public, Visibility::Protected, Visibility::Private];

    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }

    pub(crate) fn flag(self) -> MethodOptions {
        match self {
            Visibility::Public => MethodOptions::PUBLIC,
            Visibility::Protected => MethodOptions::PROTECTED,
            Visibility::Private => MethodOptions::PRIVATE,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// One reflective query.
///
/// - `InstanceMembers(v)`: members instances of a type respond to at
///   visibility `v`. Objects do not support this probe.
/// - `Members(v)`: the receiver's own callable surface at visibility `v`.
///   For a type that is its class-side surface; for an object, everything it
///   responds to.
/// - `SingletonMembers`: members defined on the receiver alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Probe {
    InstanceMembers(Visibility),
    Members(Visibility),
    SingletonMembers,
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Probe::InstanceMembers(v) => write!(f, "{} instance members", v.as_str()),
            Probe::Members(v) => write!(f, "{} members", v.as_str()),
            Probe::SingletonMembers => write!(f, "singleton members"),
        }
    }
}

/// The thing a probe is asked of: a resolved type or an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Receiver {
    Type(TypeHandle),
    Object(ObjectHandle),
}

/// Type/object introspection supplied by the host.
pub trait Reflection {
    /// Look a type up by name. `None` means the name does not resolve.
    fn resolve_type(&self, name: &str) -> Option<TypeHandle>;

    /// Member names `receiver` exposes under `probe`. Unsupported probes and
    /// unknown receivers yield an empty list.
    fn list_members(&self, receiver: Receiver, probe: Probe) -> Vec<String>;

    /// Proper ancestors plus mixed-in modules of `ty`, excluding `ty`.
    fn ancestors_of(&self, ty: TypeHandle) -> Vec<TypeHandle>;

    /// Runtime class of `object`.
    fn class_of(&self, object: ObjectHandle) -> Option<TypeHandle>;
}

impl<R: Reflection + ?Sized> Reflection for &R {
    fn resolve_type(&self, name: &str) -> Option<TypeHandle> {
        (**self).resolve_type(name)
    }

    fn list_members(&self, receiver: Receiver, probe: Probe) -> Vec<String> {
        (**self).list_members(receiver, probe)
    }

    fn ancestors_of(&self, ty: TypeHandle) -> Vec<TypeHandle> {
        (**self).ancestors_of(ty)
    }

    fn class_of(&self, object: ObjectHandle) -> Option<TypeHandle> {
        (**self).class_of(object)
    }
}
