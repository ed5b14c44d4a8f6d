//! An in-memory inspection target for duel queries.
//!
//! [`Heap`] models a stopped C program: typed objects in memory cells,
//! struct layouts with member functions, globals, convenience variables
//! and a call stack of lexical blocks. It implements [`duel_eval::Host`],
//! so queries run against it exactly as they would against a live
//! debugger. [`demo::demo`] builds the sample program the `duel` binary
//! and the integration tests use.

mod heap;
mod host_impl;
mod object;
mod ops;
mod render;
mod types;

pub mod demo;

pub use heap::{BlockInfo, FrameInfo, Heap};
pub use object::{Data, Function, Obj};
pub use types::{IntKind, MethodBody, StructDef, Type};
