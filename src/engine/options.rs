//! Option flags.
//!
//! Callers describe *where* to look with a small closed set of flags:
//!
//! - **Visibility**: `public`, `protected`, `private` (default: `public`).
//! - **Scope**: `instance`, `class`, `singleton` (default: `instance`).
//! - **Filtering**: `suppress_ancestor_methods`.
//!
//! `MethodOption` is the tagged form of a single flag (with its canonical
//! name), `MethodOptions` the set form used everywhere else.
//!
//! ## Invariants
//!
//! - `singleton` cannot be combined with `class` or any visibility flag.
//! - Name parsing never stops at the first unknown name; every offending name
//!   is reported.

use crate::error::FinderError;
use std::fmt;
use std::str::FromStr;

bitflags::bitflags! {
    /// Visibility/scope/filter flags for a search.
    ///
    /// The empty set means "public instance members".
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MethodOptions: u8 {
        const PUBLIC                    = 1 << 0;
        const PROTECTED                 = 1 << 1;
        const PRIVATE                   = 1 << 2;
        const INSTANCE                  = 1 << 3;
        const CLASS                     = 1 << 4;
        const SINGLETON                 = 1 << 5;
        const SUPPRESS_ANCESTOR_METHODS = 1 << 6;
    }
}

impl MethodOptions {
    pub const VISIBILITY: MethodOptions =
        MethodOptions::PUBLIC.union(MethodOptions::PROTECTED).union(MethodOptions::PRIVATE);
    pub const SCOPE: MethodOptions =
        MethodOptions::INSTANCE.union(MethodOptions::CLASS).union(MethodOptions::SINGLETON);

    /// Parse flag names, collecting every unrecognized one.
    pub fn parse<I, S>(names: I) -> Result<Self, FinderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = MethodOptions::empty();
        let mut offending = Vec::new();

        for name in names {
            match name.as_ref().parse::<MethodOption>() {
                Ok(option) => options |= MethodOptions::from(option),
                Err(_) => offending.push(name.as_ref().to_string()),
            }
        }

        if offending.is_empty() { Ok(options) } else { Err(FinderError::unrecognized(offending)) }
    }

    /// Reject `singleton` combined with `class` or a visibility flag.
    pub fn validate(self) -> Result<(), FinderError> {
        if !self.contains(MethodOptions::SINGLETON) {
            return Ok(());
        }

        let conflicting = self & (MethodOptions::CLASS | MethodOptions::VISIBILITY);
        if conflicting.is_empty() {
            return Ok(());
        }

        let mut offending = vec![MethodOption::Singleton.name().to_string()];
        offending.extend(MethodOption::from_flags(conflicting).map(|o| o.name().to_string()));
        Err(FinderError::singleton_conflict(offending))
    }

    /// Flags as tagged options, in canonical order.
    pub fn options(self) -> impl Iterator<Item = MethodOption> {
        MethodOption::from_flags(self)
    }
}

impl Default for MethodOptions {
    fn default() -> Self {
        MethodOptions::empty()
    }
}

impl FromStr for MethodOptions {
    type Err = FinderError;

    /// Parse a comma and/or whitespace separated list such as
    /// `"public, instance suppress_ancestor_methods"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MethodOptions::parse(regex!(r"[\s,]+").split(s.trim()).filter(|part| !part.is_empty()))
    }
}

impl fmt::Display for MethodOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.options().map(MethodOption::name).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

/// A single recognized flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodOption {
    Public,
    Protected,
    Private,
    Instance,
    Class,
    Singleton,
    SuppressAncestorMethods,
}

impl MethodOption {
    pub const ALL: [MethodOption; 7] = [
        MethodOption::Public,
        MethodOption::Protected,
        MethodOption::Private,
        MethodOption::Instance,
        MethodOption::Class,
        MethodOption::Singleton,
        MethodOption::SuppressAncestorMethods,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MethodOption::Public => "public",
            MethodOption::Protected => "protected",
            MethodOption::Private => "private",
            MethodOption::Instance => "instance",
            MethodOption::Class => "class",
            MethodOption::Singleton => "singleton",
            MethodOption::SuppressAncestorMethods => "suppress_ancestor_methods",
        }
    }

    pub fn flag(self) -> MethodOptions {
        match self {
            MethodOption::Public => MethodOptions::PUBLIC,
            MethodOption::Protected => MethodOptions::PROTECTED,
            MethodOption::Private => MethodOptions::PRIVATE,
            MethodOption::Instance => MethodOptions::INSTANCE,
            MethodOption::Class => MethodOptions::CLASS,
            MethodOption::Singleton => MethodOptions::SINGLETON,
            MethodOption::SuppressAncestorMethods => MethodOptions::SUPPRESS_ANCESTOR_METHODS,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        MethodOption::ALL.into_iter().find(|o| o.name() == name)
    }

    fn from_flags(flags: MethodOptions) -> impl Iterator<Item = MethodOption> {
        MethodOption::ALL.into_iter().filter(move |o| flags.contains(o.flag()))
    }
}

impl FromStr for MethodOption {
    type Err = FinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MethodOption::from_name(s).ok_or_else(|| FinderError::unrecognized(vec![s.to_string()]))
    }
}

impl From<MethodOption> for MethodOptions {
    fn from(option: MethodOption) -> Self {
        option.flag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reports_every_unrecognized_name() {
        let err = MethodOptions::parse(["public", "bogus", "instance", "staticky"]).unwrap_err();
        assert_eq!(err.offending(), &["bogus".to_string(), "staticky".to_string()]);
    }

    #[test]
    fn single_options_parse_and_convert() {
        assert_eq!("suppress_ancestor_methods".parse::<MethodOption>(), Ok(MethodOption::SuppressAncestorMethods));
        assert_eq!("static".parse::<MethodOption>().unwrap_err().offending(), &["static".to_string()]);
        assert_eq!(MethodOptions::from(MethodOption::Protected), MethodOptions::PROTECTED);
    }

    #[test]
    fn parse_accepts_singleton() {
        let options = MethodOptions::parse(["singleton"]).unwrap();
        assert_eq!(options, MethodOptions::SINGLETON);
    }

    #[test]
    fn from_str_splits_on_commas_and_whitespace() {
        let options: MethodOptions = " private,protected  class ".parse().unwrap();
        assert_eq!(options, MethodOptions::PRIVATE | MethodOptions::PROTECTED | MethodOptions::CLASS);
        assert_eq!("".parse::<MethodOptions>().unwrap(), MethodOptions::empty());
    }

    #[test]
    fn singleton_conflicts_list_all_flags() {
        let err = (MethodOptions::SINGLETON | MethodOptions::CLASS | MethodOptions::PRIVATE).validate().unwrap_err();
        assert_eq!(err.offending(), &["singleton".to_string(), "private".to_string(), "class".to_string()]);
    }

    #[test]
    fn singleton_is_compatible_with_instance_and_suppression() {
        let options = MethodOptions::SINGLETON | MethodOptions::INSTANCE | MethodOptions::SUPPRESS_ANCESTOR_METHODS;
        assert!(options.validate().is_ok());
        assert!(MethodOptions::default().validate().is_ok());
    }

    #[test]
    fn display_uses_canonical_names() {
        let options = MethodOptions::SUPPRESS_ANCESTOR_METHODS | MethodOptions::PUBLIC;
        assert_eq!(options.to_string(), "{public, suppress_ancestor_methods}");
    }
}
