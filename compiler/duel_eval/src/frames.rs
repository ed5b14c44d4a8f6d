//! Stack frames as query values.
//!
//! A frame name in a query (`main`, `frame(2)`) produces a [`Frame`];
//! fields of a frame are its arguments, locals and constants, so
//! `main.argc` and `frame(1) => i` work like struct access.

use std::fmt;

use crate::errors::{index_out_of_range, undefined_field, EvalResult};
use crate::host::Host;

/// A stack frame of the inspected program.
pub struct Frame<H: Host> {
    handle: H::Frame,
}

impl<H: Host> Frame<H> {
    pub fn new(handle: H::Frame) -> Self {
        Frame { handle }
    }

    pub fn handle(&self) -> &H::Frame {
        &self.handle
    }

    /// Argument, local or constant `name`, searched from the innermost
    /// block outward, stopping at the block that starts the function.
    pub fn lookup(&self, host: &H, name: &str) -> EvalResult<H::Object> {
        let mut block = host.frame_block(&self.handle);
        while let Some(current) = block {
            if !host.block_is_global(&current) {
                let found = host
                    .block_symbols(&current)
                    .iter()
                    .any(|symbol| symbol.kind.is_frame_visible() && symbol.name == name);
                if found {
                    return host.read_symbol(&self.handle, &current, name);
                }
            }
            if host.block_starts_function(&current) {
                break;
            }
            block = host.superblock(&current);
        }
        Err(undefined_field(name))
    }

    /// Full function name, templates included.
    pub fn function(&self, host: &H) -> Option<String> {
        host.frame_function(&self.handle)
    }

    pub fn level(&self, host: &H) -> usize {
        host.frame_level(&self.handle)
    }

    /// `<Frame N: name>`
    pub fn describe(&self, host: &H) -> String {
        let name = self
            .function(host)
            .map(|f| filter_templates(&f))
            .unwrap_or_default();
        format!("<Frame {}: {}>", self.level(host), name)
    }

    /// Frames compare equal when their functions have the same name.
    pub fn same_function(&self, host: &H, other: &Frame<H>) -> bool {
        let mine = self.function(host).and_then(|f| function_name(&f));
        let theirs = other.function(host).and_then(|f| function_name(&f));
        mine == theirs
    }
}

impl<H: Host> Clone for Frame<H> {
    fn clone(&self) -> Self {
        Frame {
            handle: self.handle.clone(),
        }
    }
}

impl<H: Host> fmt::Debug for Frame<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Frame").field(&self.handle).finish()
    }
}

/// Operator names whose angle brackets are not template delimiters, longest
/// first.
const ANGLE_OPERATORS: [&str; 6] = [
    "operator->",
    "operator<<",
    "operator>>",
    "operator<=",
    "operator<",
    "operator>",
];

/// Remove template argument lists: `std::vector<int>::push_back` becomes
/// `std::vector::push_back`. Angle brackets of `operator<` and friends
/// are kept.
pub fn filter_templates(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut level = 0usize;
    let mut rest = name;
    while let Some(c) = rest.chars().next() {
        if let Some(op) = ANGLE_OPERATORS.iter().find(|op| rest.starts_with(**op)) {
            if level == 0 {
                out.push_str(op);
            }
            rest = &rest[op.len()..];
            continue;
        }
        match c {
            '<' => level += 1,
            '>' => level = level.saturating_sub(1),
            _ if level == 0 => out.push(c),
            _ => {}
        }
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// Last word of the template-stripped name: `ns::Foo<T>::bar` gives `bar`.
pub fn function_name(name: &str) -> Option<String> {
    filter_templates(name)
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| !word.is_empty())
        .next_back()
        .map(str::to_string)
}

/// Innermost frame whose function is called `name`.
pub fn find_frame<H: Host>(host: &H, name: &str) -> Option<Frame<H>> {
    let mut frame = host.newest_frame();
    while let Some(current) = frame {
        let matches = host
            .frame_function(&current)
            .and_then(|f| function_name(&f))
            .is_some_and(|f| f == name);
        if matches {
            return Some(Frame::new(current));
        }
        frame = host.older_frame(&current);
    }
    None
}

/// Number of frames on the call stack.
pub fn count_frames<H: Host>(host: &H) -> usize {
    std::iter::successors(host.newest_frame(), |f| host.older_frame(f)).count()
}

/// The `index`-th frame, 0 being the innermost.
pub fn get_frame<H: Host>(host: &H, index: i64) -> EvalResult<Frame<H>> {
    let position = usize::try_from(index).map_err(|_| index_out_of_range("frame", index))?;
    std::iter::successors(host.newest_frame(), |f| host.older_frame(f))
        .nth(position)
        .map(Frame::new)
        .ok_or_else(|| index_out_of_range("frame", index))
}

#[cfg(test)]
mod tests;
