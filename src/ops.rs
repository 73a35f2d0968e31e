//! Operators: pure transforms from Observable(s) to a new Observable.
//!
//! Each operator lives in its own module and wires a wrapping observer in
//! front of its source(s) at subscribe time.

pub(crate) mod barrier;

mod concat;
mod filter;
mod flat_map;
mod map;
pub mod merge;
mod observe_on;
mod reduce;
mod subscribe_on;
