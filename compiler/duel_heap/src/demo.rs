//! A small inspected program, stopped inside a list walk.
//!
//! ```c
//! struct node  { int val; struct node *next; };
//! struct tree  { int key; struct tree *left, *right; };
//! struct point { int x, y; int area(); int dot(point); };
//!
//! struct node *head;           // 10 -> 20 -> 30 -> 40
//! struct tree *root;           // 5 (3 (1, 4), 8 (-, 9))
//! int arr[6] = {3, 1, 4, 1, 5, 9};
//! struct point origin = {0, 0}, corner = {3, 4};
//! struct point pts[3] = {{1, 2}, {3, 4}, {5, 6}};
//! char *greeting = "hello";
//! char initial = 'h';
//! int count = 4;
//! double ratio = 0.5;
//! int add(int a, int b);
//! int square(int x);
//!
//! int main(int argc) { struct node *list = head; visit(head->next, 1); }
//! void visit<node>(struct node *n, int depth) { { int i = 3; /* here */ } }
//! ```
//!
//! A file-static `calls = 7` lives in the global block. `$answer` is a
//! convenience variable; `$_strlen` and `$_streq` are internal functions.

use duel_eval::{EvalResult, Host, SymbolKind};
use duel_ir::BinaryOp;

use crate::heap::{BlockInfo, Heap};
use crate::object::{Data, Obj};
use crate::types::{IntKind, StructDef, Type};

fn int(n: i64) -> Obj {
    Obj::int(IntKind::Int, n)
}

fn point_area(heap: &Heap, this: &Obj, _args: &[Obj]) -> EvalResult<Obj> {
    heap.binary(BinaryOp::Mul, &heap.field(this, "x")?, &heap.field(this, "y")?)
}

fn point_dot(heap: &Heap, this: &Obj, args: &[Obj]) -> EvalResult<Obj> {
    let [other] = args else {
        return Err(duel_eval::errors::host_error("dot takes one point"));
    };
    let xx = heap.binary(BinaryOp::Mul, &heap.field(this, "x")?, &heap.field(other, "x")?)?;
    let yy = heap.binary(BinaryOp::Mul, &heap.field(this, "y")?, &heap.field(other, "y")?)?;
    heap.binary(BinaryOp::Add, &xx, &yy)
}

fn define_types(heap: &mut Heap) {
    let node = Type::structure("node");
    heap.define_struct(
        StructDef::new("node")
            .field("val", Type::int())
            .field("next", Type::pointer_to(node)),
    );
    let tree = Type::structure("tree");
    heap.define_struct(
        StructDef::new("tree")
            .field("key", Type::int())
            .field("left", Type::pointer_to(tree.clone()))
            .field("right", Type::pointer_to(tree)),
    );
    heap.define_struct(
        StructDef::new("point")
            .field("x", Type::int())
            .field("y", Type::int())
            .method("area", point_area)
            .method("dot", point_dot),
    );
}

fn build_list(heap: &mut Heap, values: &[i64]) -> Obj {
    let mut next = Obj::null(Type::structure("node"));
    for &val in values.iter().rev() {
        next = heap.alloc_struct("node", vec![int(val), next]);
    }
    next
}

fn build_tree(heap: &mut Heap) -> Obj {
    let none = || Obj::null(Type::structure("tree"));
    let leaf = |heap: &mut Heap, key| heap.alloc_struct("tree", vec![int(key), none(), none()]);
    let one = leaf(heap, 1);
    let four = leaf(heap, 4);
    let nine = leaf(heap, 9);
    let three = heap.alloc_struct("tree", vec![int(3), one, four]);
    let eight = heap.alloc_struct("tree", vec![int(8), none(), nine]);
    heap.alloc_struct("tree", vec![int(5), three, eight])
}

/// The demo program described in the module docs.
pub fn demo() -> Heap {
    let mut heap = Heap::new();
    define_types(&mut heap);

    let head = build_list(&mut heap, &[10, 20, 30, 40]);
    let second = heap.field(&head, "next").unwrap_or_else(|_| head.clone());
    let root = build_tree(&mut heap);
    let arr = heap.alloc_array(Type::int(), [3, 1, 4, 1, 5, 9].map(int).to_vec());
    let origin = heap.make_struct("point", vec![int(0), int(0)]);
    let corner = heap.make_struct("point", vec![int(3), int(4)]);
    let pts = [(1, 2), (3, 4), (5, 6)]
        .map(|(x, y)| heap.make_struct("point", vec![int(x), int(y)]))
        .to_vec();
    let pts = heap.alloc_array(Type::structure("point"), pts);

    heap.global("head", head.clone());
    heap.global("root", root);
    heap.global("arr", arr);
    heap.global("origin", origin);
    heap.global("corner", corner);
    heap.global("pts", pts);
    heap.global("greeting", Obj::string("hello"));
    heap.global("initial", Obj::int(IntKind::Char, i64::from(b'h')));
    heap.global("count", int(4));
    heap.global("ratio", Obj::double(0.5));
    heap.function("add", 2, |heap, args| heap.binary(BinaryOp::Add, &args[0], &args[1]));
    heap.function("square", 1, |heap, args| {
        heap.binary(BinaryOp::Mul, &args[0], &args[0])
    });

    heap.set_convenience("$answer", int(42));
    for name in ["$_strlen", "$_streq"] {
        heap.set_convenience(name, Obj::new(Type::Internal, Data::Internal(name.into())));
    }

    let statics = heap.add_block(BlockInfo {
        global: true,
        ..BlockInfo::default()
    }
    .symbol("calls", SymbolKind::Variable, int(7)));

    let main = heap.add_block(
        BlockInfo {
            superblock: Some(statics),
            ..BlockInfo::function_body()
        }
        .symbol("argc", SymbolKind::Argument, int(1))
        .symbol("list", SymbolKind::Variable, head),
    );
    heap.enter_frame("main", Some(main));

    let visit = heap.add_block(
        BlockInfo {
            superblock: Some(statics),
            ..BlockInfo::function_body()
        }
        .symbol("n", SymbolKind::Argument, second)
        .symbol("depth", SymbolKind::Argument, int(1))
        .symbol("add", SymbolKind::Function, Obj::null(Type::Void)),
    );
    let inner = heap.add_block(BlockInfo::nested_in(visit).symbol("i", SymbolKind::Variable, int(3)));
    heap.enter_frame("visit<node>", Some(inner));

    heap
}
