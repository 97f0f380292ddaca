/// Lazily compiled, process-wide regex for a literal pattern.
///
/// Only use this with literals known to compile; the pattern is checked the
/// first time the static is touched.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a `Vec<Criterion>` from names, regexes or `Criterion` values.
///
/// ```
/// use memberscope::{criteria, Criterion};
///
/// let list = criteria!["render", Criterion::All];
/// assert_eq!(list.len(), 2);
/// ```
#[macro_export]
macro_rules! criteria {
    ($($c:expr),* $(,)?) => {
        vec![ $($crate::Criterion::from($c)),* ]
    };
}

/// Build a `Vec<Target>` from handles or type names.
#[macro_export]
macro_rules! targets {
    ($($t:expr),* $(,)?) => {
        vec![ $($crate::Target::from($t)),* ]
    };
}
