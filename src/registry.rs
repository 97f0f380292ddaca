//! In-memory type registry.
//!
//! `TypeRegistry` is a [`Reflection`] implementation the host fills in
//! explicitly: types (classes and modules) with their superclass, mixed-in
//! modules and per-visibility members, plus objects with a runtime class and
//! members of their own.
//!
//! ## Lookup order
//!
//! Instance members are looked up along the ancestor chain, most specific
//! first:
//!
//! ```text
//! Widget ─includes─▶ [Paintable, Sizable]  ─superclass─▶ Base ─includes─▶ [Named]
//!
//! ancestors(Widget) = Widget, Sizable, Paintable, Base, Named
//! ```
//!
//! Later includes come first. The first type along the chain that defines a
//! name decides its visibility, so a derived type that makes an inherited
//! member private hides it from the public listing.
//!
//! Class-side members only follow the superclass chain; modules do not pass
//! their class-side members on through inclusion.
//!
//! ## Probes
//!
//! ```text
//!                       │ type                        │ object
//! ──────────────────────┼─────────────────────────────┼─────────────────────────────
//! InstanceMembers(v)    │ instance members at v       │ (empty)
//! Members(v)            │ class-side members at v     │ own + class instance members at v
//! SingletonMembers      │ public/protected class-side │ own public/protected members
//! ```

use crate::error::FinderError;
use crate::reflection::{ObjectHandle, Probe, Receiver, Reflection, TypeHandle, Visibility};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Module,
}

/// Member names grouped by visibility, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct MemberTable {
    by_visibility: [Vec<String>; 3],
}

impl MemberTable {
    fn add<I, S>(&mut self, visibility: Visibility, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let slot = &mut self.by_visibility[visibility.index()];
        for name in names {
            let name = name.into();
            if !slot.contains(&name) {
                slot.push(name);
            }
        }
    }

    fn get(&self, visibility: Visibility) -> &[String] {
        &self.by_visibility[visibility.index()]
    }

    /// Every declared name with its visibility, public first.
    fn entries(&self) -> impl Iterator<Item = (Visibility, &String)> {
        Visibility::ALL.into_iter().flat_map(move |v| self.get(v).iter().map(move |name| (v, name)))
    }
}

/// Declaration of a type, handed to [`TypeRegistry::define`].
#[derive(Debug, Clone)]
pub struct TypeDef {
    name: String,
    kind: TypeKind,
    superclass: Option<TypeHandle>,
    includes: Vec<TypeHandle>,
    instance: MemberTable,
    class_side: MemberTable,
}

impl TypeDef {
    pub fn class(name: impl Into<String>) -> Self {
        TypeDef::new(name, TypeKind::Class)
    }

    pub fn module(name: impl Into<String>) -> Self {
        TypeDef::new(name, TypeKind::Module)
    }

    fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        TypeDef {
            name: name.into(),
            kind,
            superclass: None,
            includes: Vec::new(),
            instance: MemberTable::default(),
            class_side: MemberTable::default(),
        }
    }

    /// Set the superclass. Ignored for modules.
    pub fn inherits(mut self, superclass: TypeHandle) -> Self {
        self.superclass = Some(superclass);
        self
    }

    /// Mix in a module. Later inclusions take precedence.
    pub fn includes(mut self, module: TypeHandle) -> Self {
        if !self.includes.contains(&module) {
            self.includes.push(module);
        }
        self
    }

    /// Declare instance members.
    pub fn instance<I, S>(mut self, visibility: Visibility, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.instance.add(visibility, names);
        self
    }

    /// Declare class-side (static) members.
    pub fn class_side<I, S>(mut self, visibility: Visibility, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.class_side.add(visibility, names);
        self
    }
}

#[derive(Debug, Clone)]
struct ObjectEntry {
    class: TypeHandle,
    own: MemberTable,
}

/// Explicitly populated [`Reflection`] backend.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: Vec<TypeDef>,
    by_name: HashMap<String, TypeHandle>,
    objects: Vec<ObjectEntry>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type. Names are unique and every referenced handle must
    /// already be registered.
    pub fn define(&mut self, def: TypeDef) -> Result<TypeHandle, FinderError> {
        if self.by_name.contains_key(&def.name) {
            return Err(FinderError::DuplicateType(def.name));
        }
        for handle in def.superclass.iter().chain(&def.includes) {
            self.entry(*handle)?;
        }

        let handle = TypeHandle::new(next_index(self.types.len(), "types")?);
        log::trace!("[registry] {} {:?} -> {}", def.name, def.kind, handle);
        self.by_name.insert(def.name.clone(), handle);
        self.types.push(def);
        Ok(handle)
    }

    /// Create a live object of class `class`.
    pub fn instantiate(&mut self, class: TypeHandle) -> Result<ObjectHandle, FinderError> {
        self.entry(class)?;
        let handle = ObjectHandle::new(next_index(self.objects.len(), "objects")?);
        self.objects.push(ObjectEntry { class, own: MemberTable::default() });
        Ok(handle)
    }

    /// Declare members on `object` alone.
    pub fn define_singleton<I, S>(
        &mut self,
        object: ObjectHandle,
        visibility: Visibility,
        names: I,
    ) -> Result<(), FinderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self
            .objects
            .get_mut(object.index() as usize)
            .ok_or_else(|| FinderError::UnknownHandle(object.to_string()))?;
        entry.own.add(visibility, names);
        Ok(())
    }

    pub fn type_name(&self, ty: TypeHandle) -> Option<&str> {
        self.types.get(ty.index() as usize).map(|def| def.name.as_str())
    }

    pub fn kind(&self, ty: TypeHandle) -> Option<TypeKind> {
        self.types.get(ty.index() as usize).map(|def| def.kind)
    }

    fn entry(&self, ty: TypeHandle) -> Result<&TypeDef, FinderError> {
        self.types.get(ty.index() as usize).ok_or_else(|| FinderError::UnknownHandle(ty.to_string()))
    }

    /// `ty` followed by its ancestors, most specific first, without repeats.
    fn lineage(&self, ty: TypeHandle) -> Vec<TypeHandle> {
        let mut out = Vec::new();
        self.walk(ty, &mut out);
        out
    }

    fn walk(&self, ty: TypeHandle, out: &mut Vec<TypeHandle>) {
        if out.contains(&ty) {
            return;
        }
        let Ok(def) = self.entry(ty) else {
            return;
        };
        out.push(ty);
        for &module in def.includes.iter().rev() {
            self.walk(module, out);
        }
        if def.kind == TypeKind::Class {
            if let Some(superclass) = def.superclass {
                self.walk(superclass, out);
            }
        }
    }

    /// `ty` and its superclasses (no modules).
    fn superclass_chain(&self, ty: TypeHandle) -> Vec<TypeHandle> {
        let mut out = Vec::new();
        let mut next = Some(ty);
        while let Some(current) = next {
            let Ok(def) = self.entry(current) else {
                break;
            };
            if out.contains(&current) {
                break;
            }
            out.push(current);
            next = if def.kind == TypeKind::Class { def.superclass } else { None };
        }
        out
    }

    /// Names visible at `visibility` across `tables`, earliest table first.
    /// The first table declaring a name decides its visibility.
    fn visible<'a>(tables: impl Iterator<Item = &'a MemberTable>, wanted: &[Visibility]) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut out = Vec::new();
        for table in tables {
            for (visibility, name) in table.entries() {
                if seen.insert(name.as_str()) && wanted.contains(&visibility) {
                    out.push(name.clone());
                }
            }
        }
        out
    }

    fn type_members(&self, ty: TypeHandle, probe: Probe) -> Vec<String> {
        match probe {
            Probe::InstanceMembers(v) => {
                let lineage = self.lineage(ty);
                Self::visible(lineage.iter().filter_map(|t| self.entry(*t).ok()).map(|d| &d.instance), &[v])
            }
            Probe::Members(v) => {
                let chain = self.superclass_chain(ty);
                Self::visible(chain.iter().filter_map(|t| self.entry(*t).ok()).map(|d| &d.class_side), &[v])
            }
            Probe::SingletonMembers => {
                let chain = self.superclass_chain(ty);
                Self::visible(
                    chain.iter().filter_map(|t| self.entry(*t).ok()).map(|d| &d.class_side),
                    &[Visibility::Public, Visibility::Protected],
                )
            }
        }
    }

    fn object_members(&self, object: ObjectHandle, probe: Probe) -> Vec<String> {
        let Some(entry) = self.objects.get(object.index() as usize) else {
            return Vec::new();
        };
        match probe {
            Probe::InstanceMembers(_) => Vec::new(),
            Probe::Members(v) => {
                let lineage = self.lineage(entry.class);
                let class_tables = lineage.iter().filter_map(|t| self.entry(*t).ok()).map(|d| &d.instance);
                Self::visible(std::iter::once(&entry.own).chain(class_tables), &[v])
            }
            Probe::SingletonMembers => {
                Self::visible(std::iter::once(&entry.own), &[Visibility::Public, Visibility::Protected])
            }
        }
    }
}

/// Handle index for the next entry of a table holding `len` entries.
fn next_index(len: usize, table: &'static str) -> Result<u32, FinderError> {
    u32::try_from(len).map_err(|_| FinderError::RegistryFull(table))
}

impl Reflection for TypeRegistry {
    fn resolve_type(&self, name: &str) -> Option<TypeHandle> {
        self.by_name.get(name).copied()
    }

    fn list_members(&self, receiver: Receiver, probe: Probe) -> Vec<String> {
        match receiver {
            Receiver::Type(ty) => self.type_members(ty, probe),
            Receiver::Object(object) => self.object_members(object, probe),
        }
    }

    fn ancestors_of(&self, ty: TypeHandle) -> Vec<TypeHandle> {
        self.lineage(ty).into_iter().filter(|t| *t != ty).collect()
    }

    fn class_of(&self, object: ObjectHandle) -> Option<TypeHandle> {
        self.objects.get(object.index() as usize).map(|entry| entry.class)
    }
}
