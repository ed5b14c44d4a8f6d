//! Stack growth for deeply nested duel expressions.
//!
//! Both the parser and the evaluator recurse once per nesting level of the
//! query: `((((x))))` is four parser frames deep, and pulling one item out of
//! a stream of nested combinators calls `next()` once per node on the path
//! to the leaf. Queries are typed by people, but generated ones (and
//! `-->` chains folded by label reconstruction) can get deep.
//!
//! # Platform Support
//!
//! - **Native targets**: grows the stack on demand with `stacker`.
//! - **WASM targets**: passthrough.

/// Remaining stack below which we grow (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// Wrap every recursive entry point that follows the shape of the query
/// tree: `parse_expr`, `Stream::next`, label construction.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
