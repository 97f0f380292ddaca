//! Criterion compilation.
//!
//! ```text
//! Name("run")      -> ^run$         (escaped, full-string)
//! Pattern(/^re/)   -> ^re           (used as-is, unanchored search)
//! All              -> ^.+$          (any non-empty name, shared static)
//! Name("  ")       -> dropped
//! ```

use crate::Criterion;
use crate::error::FinderError;
use regex::Regex;

static MATCH_ALL: Criterion = Criterion::All;

/// Compiled predicate over member names.
#[derive(Debug, Clone)]
pub(crate) enum NameMatcher {
    Compiled(Regex),
    Shared(&'static Regex),
}

impl NameMatcher {
    pub(crate) fn compile(criterion: &Criterion) -> Result<Self, FinderError> {
        let matcher = match criterion {
            Criterion::Name(name) => NameMatcher::Compiled(Regex::new(&format!("^{}$", regex::escape(name)))?),
            Criterion::Pattern(re) => NameMatcher::Compiled(re.clone()),
            Criterion::All => NameMatcher::Shared(regex!(r"^.+$")),
        };
        Ok(matcher)
    }

    pub(crate) fn is_match(&self, name: &str) -> bool {
        match self {
            NameMatcher::Compiled(re) => re.is_match(name),
            NameMatcher::Shared(re) => re.is_match(name),
        }
    }
}

/// Criteria that take part in matching: blanks removed, and the whole list
/// collapsed to `All` when the sentinel is present.
pub(crate) fn effective_criteria(criteria: &[Criterion]) -> Vec<&Criterion> {
    if criteria.iter().any(|c| matches!(c, Criterion::All)) {
        return vec![&MATCH_ALL];
    }
    criteria.iter().filter(|c| !c.is_blank()).collect()
}

pub(crate) fn compile_all(criteria: &[Criterion]) -> Result<Vec<NameMatcher>, FinderError> {
    effective_criteria(criteria).into_iter().map(NameMatcher::compile).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(criterion: Criterion, name: &str) -> bool {
        NameMatcher::compile(&criterion).unwrap().is_match(name)
    }

    #[test]
    fn literal_names_match_whole_names_only() {
        let cases = [("run", true), ("run_fast", false), ("prerun", false), ("Run", false)];
        for (name, expected) in cases {
            assert_eq!(matches(Criterion::from("run"), name), expected, "run vs {name}");
        }
    }

    #[test]
    fn literal_names_escape_pattern_characters() {
        assert!(matches(Criterion::from("[]="), "[]="));
        assert!(matches(Criterion::from("empty?"), "empty?"));
        assert!(!matches(Criterion::from("empty?"), "empt"));
        assert!(!matches(Criterion::from("a.b"), "axb"));
    }

    #[test]
    fn patterns_are_unanchored() {
        let pattern = Criterion::pattern("_action").unwrap();
        assert!(matches(pattern.clone(), "save_action"));
        assert!(matches(pattern.clone(), "save_action_now"));
        assert!(!matches(pattern, "save"));
    }

    #[test]
    fn all_matches_any_non_empty_name() {
        assert!(matches(Criterion::All, "x"));
        assert!(matches(Criterion::All, "to_s"));
        assert!(!matches(Criterion::All, ""));
    }

    #[test]
    fn blanks_are_dropped_and_all_collapses() {
        let criteria = vec![Criterion::from(""), Criterion::from("  "), Criterion::from("run")];
        assert_eq!(effective_criteria(&criteria), vec![&Criterion::from("run")]);
        assert_eq!(compile_all(&criteria[..2]).unwrap().len(), 0);

        let criteria = vec![Criterion::from("run"), Criterion::All, Criterion::pattern("^x").unwrap()];
        assert_eq!(effective_criteria(&criteria), vec![&Criterion::All]);
    }
}
