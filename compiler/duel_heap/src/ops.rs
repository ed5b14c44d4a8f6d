//! C operators on heap objects.
//!
//! Direct dispatch on the operand data. Integer arithmetic wraps to the
//! promoted type the way C does; division by zero is an error.

use duel_eval::errors::{host_error, index_out_of_range, type_mismatch};
use duel_eval::EvalResult;
use duel_ir::{BinaryOp, PostfixOp, UnaryOp};

use crate::heap::Heap;
use crate::object::{Data, Obj};
use crate::types::{IntKind, Type};

/// Truth values of comparisons and logical operators.
fn truth(b: bool) -> Obj {
    Obj::int(IntKind::Int, i64::from(b))
}

fn division_by_zero() -> duel_eval::EvalError {
    host_error("Division by zero")
}

/// Follow references down to the referenced object.
pub(crate) fn strip_reference(value: &Obj) -> &Obj {
    match &value.data {
        Data::Ref(target) => strip_reference(target),
        _ => value,
    }
}

/// Arrays used as operands decay to a pointer to their first element.
fn decay(value: &Obj) -> Obj {
    match (&value.ty, &value.data) {
        (Type::Array(element, _), Data::Elements(first)) => {
            Obj::new(Type::Pointer(element.clone()), Data::Addr(*first))
        }
        _ => value.clone(),
    }
}

pub(crate) fn is_truthy(value: &Obj) -> EvalResult<bool> {
    let value = strip_reference(value);
    match value.data {
        Data::Int(n) => Ok(n != 0),
        Data::Double(x) => Ok(x != 0.0),
        Data::Addr(addr) => Ok(addr != 0),
        _ => Err(type_mismatch("scalar", &value.ty.to_string())),
    }
}

pub(crate) fn binary(op: BinaryOp, left: &Obj, right: &Obj) -> EvalResult<Obj> {
    let left = decay(strip_reference(left));
    let right = decay(strip_reference(right));

    if matches!(op, BinaryOp::And | BinaryOp::Or) {
        let (l, r) = (is_truthy(&left)?, is_truthy(&right)?);
        return Ok(truth(if op == BinaryOp::And { l && r } else { l || r }));
    }

    match (&left.ty, &left.data, &right.ty, &right.data) {
        (Type::Int(ka), Data::Int(a), Type::Int(kb), Data::Int(b)) => {
            int_binary(op, ka.promote(*kb), *a, *b)
        }
        (_, Data::Double(_) | Data::Int(_), _, Data::Double(_) | Data::Int(_)) => {
            float_binary(op, as_f64(&left), as_f64(&right))
        }
        (Type::Pointer(_), Data::Addr(a), Type::Int(_), Data::Int(n)) => {
            pointer_int_binary(op, &left.ty, *a, *n)
        }
        (Type::Int(_), Data::Int(n), Type::Pointer(_), Data::Addr(a)) if op == BinaryOp::Add => {
            pointer_int_binary(op, &right.ty, *a, *n)
        }
        (Type::Pointer(_), Data::Addr(a), Type::Pointer(_), Data::Addr(b)) => {
            pointer_binary(op, *a, *b)
        }
        _ => Err(type_mismatch(
            "arithmetic operands",
            &format!("{} {} {}", left.ty, op.as_symbol(), right.ty),
        )),
    }
}

#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation,
    reason = "unsigned kinds are stored as their i64 bit pattern"
)]
fn int_binary(op: BinaryOp, kind: IntKind, a: i64, b: i64) -> EvalResult<Obj> {
    let unsigned = !kind.is_signed();
    let result = match op {
        BinaryOp::Add => a.wrapping_add(b),
        BinaryOp::Sub => a.wrapping_sub(b),
        BinaryOp::Mul => a.wrapping_mul(b),
        BinaryOp::Div | BinaryOp::Mod if b == 0 => return Err(division_by_zero()),
        BinaryOp::Div if unsigned => ((a as u64) / (b as u64)) as i64,
        BinaryOp::Div => a.wrapping_div(b),
        BinaryOp::Mod if unsigned => ((a as u64) % (b as u64)) as i64,
        BinaryOp::Mod => a.wrapping_rem(b),
        BinaryOp::BitAnd => a & b,
        BinaryOp::BitOr => a | b,
        BinaryOp::BitXor => a ^ b,
        BinaryOp::Shl => a.wrapping_shl(b as u32),
        BinaryOp::Shr if unsigned => ((a as u64).wrapping_shr(b as u32)) as i64,
        BinaryOp::Shr => a.wrapping_shr(b as u32),
        cmp if cmp.is_comparison() => {
            let ordering = if unsigned {
                (a as u64).cmp(&(b as u64))
            } else {
                a.cmp(&b)
            };
            return Ok(truth(compare(cmp, ordering)));
        }
        _ => return Err(type_mismatch("integer operator", op.as_symbol())),
    };
    Ok(Obj::int(kind, result))
}

fn float_binary(op: BinaryOp, a: f64, b: f64) -> EvalResult<Obj> {
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        cmp if cmp.is_comparison() => {
            return match a.partial_cmp(&b) {
                Some(ordering) => Ok(truth(compare(cmp, ordering))),
                None => Ok(truth(cmp == BinaryOp::NotEq)),
            };
        }
        _ => return Err(host_error("Integer only operation")),
    };
    Ok(Obj::double(result))
}

#[expect(
    clippy::cast_precision_loss,
    reason = "C converts integers to double the same way"
)]
fn as_f64(value: &Obj) -> f64 {
    match value.data {
        Data::Double(x) => x,
        Data::Int(n) => n as f64,
        _ => 0.0,
    }
}

fn pointer_int_binary(op: BinaryOp, ty: &Type, addr: usize, n: i64) -> EvalResult<Obj> {
    match op {
        BinaryOp::Add | BinaryOp::Sub => {
            let delta = if op == BinaryOp::Add { n } else { n.wrapping_neg() };
            let moved = addr
                .checked_add_signed(isize::try_from(delta).map_err(|_| pointer_overflow())?)
                .ok_or_else(pointer_overflow)?;
            Ok(Obj::new(ty.clone(), Data::Addr(moved)))
        }
        cmp if cmp.is_comparison() => {
            let addr = i64::try_from(addr).map_err(|_| pointer_overflow())?;
            Ok(truth(compare(cmp, addr.cmp(&n))))
        }
        _ => Err(type_mismatch("pointer operator", op.as_symbol())),
    }
}

fn pointer_binary(op: BinaryOp, a: usize, b: usize) -> EvalResult<Obj> {
    match op {
        BinaryOp::Sub => {
            let a = i64::try_from(a).map_err(|_| pointer_overflow())?;
            let b = i64::try_from(b).map_err(|_| pointer_overflow())?;
            Ok(Obj::int(IntKind::Long, a - b))
        }
        cmp if cmp.is_comparison() => Ok(truth(compare(cmp, a.cmp(&b)))),
        _ => Err(type_mismatch("pointer operator", op.as_symbol())),
    }
}

fn pointer_overflow() -> duel_eval::EvalError {
    host_error("pointer arithmetic out of range")
}

fn compare(op: BinaryOp, ordering: std::cmp::Ordering) -> bool {
    use std::cmp::Ordering::{Equal, Greater, Less};
    match op {
        BinaryOp::Eq => ordering == Equal,
        BinaryOp::NotEq => ordering != Equal,
        BinaryOp::Lt => ordering == Less,
        BinaryOp::LtEq => ordering != Greater,
        BinaryOp::Gt => ordering == Greater,
        BinaryOp::GtEq => ordering != Less,
        _ => false,
    }
}

pub(crate) fn unary(heap: &Heap, op: UnaryOp, value: &Obj) -> EvalResult<Obj> {
    let value = strip_reference(value);
    match (op, &value.ty, &value.data) {
        (UnaryOp::Plus, Type::Int(kind), Data::Int(n)) => Ok(Obj::int(kind.promote(*kind), *n)),
        (UnaryOp::Neg, Type::Int(kind), Data::Int(n)) => {
            Ok(Obj::int(kind.promote(*kind), n.wrapping_neg()))
        }
        (UnaryOp::BitNot, Type::Int(kind), Data::Int(n)) => Ok(Obj::int(kind.promote(*kind), !n)),
        (UnaryOp::Plus, _, Data::Double(x)) => Ok(Obj::double(*x)),
        (UnaryOp::Neg, _, Data::Double(x)) => Ok(Obj::double(-x)),
        (UnaryOp::Not, ..) => Ok(truth(!is_truthy(value)?)),
        (UnaryOp::Deref, ..) => dereference(heap, value),
        (UnaryOp::AddrOf, ..) => Err(host_error(
            "Attempt to take address of value not located in memory.",
        )),
        (UnaryOp::PreInc | UnaryOp::PreDec, ..) => Err(read_only()),
        _ => Err(type_mismatch(
            "arithmetic operand",
            &format!("{}{}", op.as_symbol(), value.ty),
        )),
    }
}

pub(crate) fn postfix(op: PostfixOp, _value: &Obj) -> EvalResult<Obj> {
    match op {
        PostfixOp::PostInc | PostfixOp::PostDec => Err(read_only()),
    }
}

/// Queries never write to the inspected program.
fn read_only() -> duel_eval::EvalError {
    host_error("Cannot modify the inspected program")
}

pub(crate) fn dereference(heap: &Heap, value: &Obj) -> EvalResult<Obj> {
    let value = strip_reference(value);
    match &value.data {
        Data::Addr(addr) => heap.read(*addr),
        Data::Elements(first) => heap.read(*first),
        _ => Err(type_mismatch("pointer", &value.ty.to_string())),
    }
}

pub(crate) fn index(heap: &Heap, base: &Obj, index: &Obj) -> EvalResult<Obj> {
    let base = strip_reference(base);
    let i = match &strip_reference(index).data {
        Data::Int(i) => *i,
        _ => return Err(type_mismatch("integer index", &index.ty.to_string())),
    };
    match (&base.ty, &base.data) {
        (Type::Array(_, len), Data::Elements(first)) => {
            let offset = usize::try_from(i)
                .ok()
                .filter(|offset| offset < len)
                .ok_or_else(|| index_out_of_range("array", i))?;
            heap.read(first + offset)
        }
        (_, Data::Str(text)) => {
            let offset = usize::try_from(i).map_err(|_| index_out_of_range("string", i))?;
            match text.as_bytes().get(offset) {
                Some(byte) => Ok(Obj::int(IntKind::Char, i64::from(*byte))),
                None if offset == text.len() => Ok(Obj::int(IntKind::Char, 0)),
                None => Err(index_out_of_range("string", i)),
            }
        }
        (Type::Pointer(_), Data::Addr(addr)) => {
            let moved = isize::try_from(i)
                .ok()
                .and_then(|delta| addr.checked_add_signed(delta))
                .ok_or_else(pointer_overflow)?;
            heap.read(moved)
        }
        _ => Err(type_mismatch("array or pointer", &base.ty.to_string())),
    }
}
