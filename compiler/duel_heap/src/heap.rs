//! The heap: memory cells, globals, struct layouts and a call stack.

use std::cell::Cell;
use std::rc::Rc;

use duel_eval::errors::host_error;
use duel_eval::{BlockSymbol, EvalResult, SymbolKind};
use rustc_hash::FxHashMap;

use crate::object::{Data, Function, Obj};
use crate::types::{StructDef, Type};

/// Base of the fake address space; cell `n` lives at `BASE + (n-1) * 16`.
const ADDRESS_BASE: usize = 0x4000;
const CELL_STRIDE: usize = 16;

/// A lexical block of a function.
#[derive(Clone, Debug, Default)]
pub struct BlockInfo {
    pub symbols: Vec<(BlockSymbol, Obj)>,
    pub superblock: Option<usize>,
    pub global: bool,
    pub function_start: bool,
}

impl BlockInfo {
    /// The outermost block of a function body.
    pub fn function_body() -> Self {
        BlockInfo {
            function_start: true,
            ..BlockInfo::default()
        }
    }

    /// Block nested in `parent`.
    pub fn nested_in(parent: usize) -> Self {
        BlockInfo {
            superblock: Some(parent),
            ..BlockInfo::default()
        }
    }

    #[must_use]
    pub fn symbol(mut self, name: &str, kind: SymbolKind, value: Obj) -> Self {
        self.symbols.push((BlockSymbol::new(name, kind), value));
        self
    }
}

/// A stack frame: function name and innermost block at its pc.
#[derive(Clone, Debug)]
pub struct FrameInfo {
    pub function: String,
    pub block: Option<usize>,
}

/// An inspected program held in memory.
#[derive(Default)]
pub struct Heap {
    cells: Vec<Obj>,
    structs: FxHashMap<String, Rc<StructDef>>,
    globals: Vec<(String, Obj)>,
    /// Innermost first.
    frames: Vec<FrameInfo>,
    blocks: Vec<BlockInfo>,
    convenience: FxHashMap<String, Obj>,
    internal_calls: bool,
    literals: Cell<usize>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    // Building

    pub fn define_struct(&mut self, def: StructDef) {
        self.structs.insert(def.tag.clone(), Rc::new(def));
    }

    pub fn struct_def(&self, tag: &str) -> Option<&Rc<StructDef>> {
        self.structs.get(tag)
    }

    /// Store `value` in a new cell; returns its address.
    pub fn alloc(&mut self, value: Obj) -> usize {
        self.cells.push(value);
        self.cells.len()
    }

    /// A struct value of type `tag` with the given field values.
    pub fn make_struct(&self, tag: &str, fields: Vec<Obj>) -> Obj {
        Obj::new(Type::structure(tag), Data::Fields(Rc::from(fields)))
    }

    /// Allocate a struct and return a pointer to it.
    pub fn alloc_struct(&mut self, tag: &str, fields: Vec<Obj>) -> Obj {
        let value = self.make_struct(tag, fields);
        let addr = self.alloc(value);
        Obj::new(Type::pointer_to(Type::structure(tag)), Data::Addr(addr))
    }

    /// Allocate contiguous elements and return the array.
    pub fn alloc_array(&mut self, element: Type, values: Vec<Obj>) -> Obj {
        let len = values.len();
        let first = self.cells.len() + 1;
        self.cells.extend(values);
        Obj::new(Type::array_of(element, len), Data::Elements(first))
    }

    pub fn global(&mut self, name: &str, value: Obj) {
        self.globals.push((name.to_string(), value));
    }

    /// Define a global function.
    pub fn function<F>(&mut self, name: &str, arity: usize, body: F)
    where
        F: Fn(&Heap, &[Obj]) -> EvalResult<Obj> + 'static,
    {
        let function = Function {
            name: name.to_string(),
            arity,
            body: Rc::new(body),
        };
        let value = Obj::new(
            Type::Function(Rc::from(name)),
            Data::Func(Rc::new(function)),
        );
        self.globals.push((name.to_string(), value));
    }

    /// Set a `$` convenience variable.
    pub fn set_convenience(&mut self, name: &str, value: Obj) {
        self.convenience.insert(name.to_string(), value);
    }

    /// Make debugger-internal functions directly callable.
    pub fn set_internal_calls(&mut self, enabled: bool) {
        self.internal_calls = enabled;
    }

    pub fn internal_calls(&self) -> bool {
        self.internal_calls
    }

    pub fn add_block(&mut self, block: BlockInfo) -> usize {
        self.blocks.push(block);
        self.blocks.len() - 1
    }

    /// Push a new innermost frame.
    pub fn enter_frame(&mut self, function: &str, block: Option<usize>) {
        self.frames.insert(
            0,
            FrameInfo {
                function: function.to_string(),
                block,
            },
        );
    }

    // Access

    /// Number of literals converted so far.
    pub fn literal_count(&self) -> usize {
        self.literals.get()
    }

    pub(crate) fn count_literal(&self) {
        self.literals.set(self.literals.get() + 1);
    }

    /// Contents of cell `addr`.
    pub fn read(&self, addr: usize) -> EvalResult<Obj> {
        addr.checked_sub(1)
            .and_then(|index| self.cells.get(index))
            .cloned()
            .ok_or_else(|| {
                host_error(format!(
                    "Cannot access memory at address {:#x}",
                    Self::address(addr)
                ))
            })
    }

    /// Numeric address shown for cell `addr`.
    pub fn address(addr: usize) -> usize {
        match addr {
            0 => 0,
            n => ADDRESS_BASE + (n - 1) * CELL_STRIDE,
        }
    }

    pub(crate) fn global_value(&self, name: &str) -> Option<&Obj> {
        self.globals
            .iter()
            .find(|(global, _)| global == name)
            .map(|(_, value)| value)
    }

    pub(crate) fn convenience(&self, name: &str) -> Option<&Obj> {
        self.convenience.get(name)
    }

    pub(crate) fn frame(&self, index: usize) -> Option<&FrameInfo> {
        self.frames.get(index)
    }

    pub(crate) fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub(crate) fn block(&self, index: usize) -> Option<&BlockInfo> {
        self.blocks.get(index)
    }
}
