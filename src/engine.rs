//! Resolution engine.
//!
//! This module is the entry point for member resolution. It is split into
//! focused submodules under `src/engine/` while keeping public paths stable
//! (for example `crate::engine::MethodFinder` and `crate::engine::MethodOptions`).
//!
//! ## How the parts work together
//!
//! ```text
//! MethodOptions ──┐
//!   (options.rs)  │ validate()           reject unknown / conflicting flags
//!                 └──────┬────────
//!                        │
//!                ProbePlan::new (scope.rs)
//!                  - one probe list for types
//!                  - one probe list for objects
//!                        │
//! criteria ── compile_all (matcher.rs)
//!                        │
//!                        v
//!            MethodFinder::run (finder.rs)
//!              for target in targets:
//!                for probe: list_members ─▶ NameMatcher ─▶ ∪ names
//!                suppress_inherited (ancestors.rs)   [optional]
//!                        │
//!                        v
//!                  FinderResult (+ RunMetrics, metrics.rs)
//! ```
//!
//! ## Responsibilities by module
//!
//! - `options.rs`: the closed flag set (`MethodOption`, `MethodOptions`),
//!   parsing from names and conflict validation.
//! - `scope.rs`: maps a flag set to an ordered, deduplicated probe list.
//! - `matcher.rs`: compiles criteria into anchored or pattern predicates.
//! - `ancestors.rs`: removes names an ancestor also produces.
//! - `finder.rs`: orchestration and result assembly.
//! - `metrics.rs`: timing and per-target counters for verbose runs.
//!
//! ## Debugging
//!
//! The engine logs through the `log` facade: probe plans at `debug`, and
//! per-target candidate and suppression counts at `trace`.

#[path = "engine/ancestors.rs"]
mod ancestors;
#[path = "engine/finder.rs"]
mod finder;
#[path = "engine/matcher.rs"]
mod matcher;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/options.rs"]
mod options;
#[path = "engine/scope.rs"]
mod scope;


pub use finder::MethodFinder;
pub use metrics::{FindRun, RunMetrics, TargetMetrics};
pub use options::{MethodOption, MethodOptions};
