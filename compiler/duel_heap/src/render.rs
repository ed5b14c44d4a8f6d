//! Display text of heap objects, in the debugger's print format.

use std::fmt::Write;

use crate::heap::Heap;
use crate::object::{Data, Obj};
use crate::types::{IntKind, Type};

pub(crate) fn render(heap: &Heap, value: &Obj) -> String {
    let mut out = String::new();
    write_value(heap, value, false, &mut out);
    out
}

/// Pointers inside aggregates print without their type prefix.
fn write_value(heap: &Heap, value: &Obj, nested: bool, out: &mut String) {
    match (&value.ty, &value.data) {
        (Type::Int(kind), Data::Int(n)) => write_int(*kind, *n, out),
        (_, Data::Double(x)) => {
            let _ = write!(out, "{x}");
        }
        (_, Data::Addr(0)) => out.push_str("0x0"),
        (ty, Data::Addr(addr)) => {
            if !nested {
                let _ = write!(out, "({ty}) ");
            }
            let _ = write!(out, "{:#x}", Heap::address(*addr));
        }
        (ty, Data::Fields(fields)) => {
            let def = match ty {
                Type::Struct(tag) => heap.struct_def(tag),
                _ => None,
            };
            out.push('{');
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                if let Some((name, _)) = def.and_then(|def| def.fields.get(i)) {
                    let _ = write!(out, "{name} = ");
                }
                write_value(heap, field, true, out);
            }
            out.push('}');
        }
        (Type::Array(_, len), Data::Elements(first)) => {
            out.push('{');
            for i in 0..*len {
                if i > 0 {
                    out.push_str(", ");
                }
                match heap.read(first + i) {
                    Ok(element) => write_value(heap, &element, true, out),
                    Err(err) => {
                        let _ = write!(out, "<error: {err}>");
                    }
                }
            }
            out.push('}');
        }
        (_, Data::Str(text)) => {
            let _ = write!(out, "{text:?}");
        }
        (_, Data::Func(function)) => {
            let _ = write!(out, "<function {}>", function.name);
        }
        (_, Data::Internal(name)) => {
            let _ = write!(
                out,
                "<internal function {}>",
                name.strip_prefix('$').unwrap_or(name)
            );
        }
        (_, Data::Ref(target)) => write_value(heap, target, nested, out),
        (ty, data) => {
            let _ = write!(out, "<{ty}: {data:?}>");
        }
    }
}

#[expect(
    clippy::cast_sign_loss,
    reason = "unsigned kinds are stored as their i64 bit pattern"
)]
fn write_int(kind: IntKind, n: i64, out: &mut String) {
    let _ = match kind {
        IntKind::Bool => write!(out, "{}", n != 0),
        IntKind::Char => write!(out, "{n} {}", char_literal(n)),
        IntKind::ULong => write!(out, "{}", n as u64),
        _ => write!(out, "{n}"),
    };
}

/// `'a'`, `'\n'`, `'\000'`
fn char_literal(n: i64) -> String {
    let c = u8::try_from(n.rem_euclid(256)).map_or('?', char::from);
    match c {
        '\n' => "'\\n'".to_string(),
        '\t' => "'\\t'".to_string(),
        '\'' => "'\\''".to_string(),
        '\\' => "'\\\\'".to_string(),
        c if c.is_ascii_graphic() || c == ' ' => format!("'{c}'"),
        c => format!("'\\{:03o}'", u32::from(c)),
    }
}
