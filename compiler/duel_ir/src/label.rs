//! Label construction.
//!
//! Every node has a static name (`Expr::name`) reconstructed from its
//! children's names, and every result it yields carries a label built from
//! the *item* labels of its children with the same template. Both go
//! through the helpers below, so a label printed for a result parses back
//! into the node that produced it.

use std::fmt;

use duel_stack::ensure_sufficient_stack;

use crate::ast::{Expr, ExprKind, ListExpr};
use crate::ops::{
    eager_prefix, lazy_prefix, BinaryOp, FilterOp, PostfixOp, StructOp, TernaryForm, UnaryOp,
    UntilOp,
};

pub fn unary(op: UnaryOp, operand: &str) -> String {
    let sym = op.as_symbol();
    // `-` applied to `-x` must not print as the decrement token `--x`.
    let glue = match (sym.chars().next_back(), operand.chars().next()) {
        (Some(a), Some(b)) if a == b && matches!(a, '+' | '-' | '&') => " ",
        _ => "",
    };
    format!("{sym}{glue}{operand}")
}

pub fn postfix(op: PostfixOp, operand: &str) -> String {
    format!("{operand}{}", op.as_symbol())
}

pub fn binary(op: BinaryOp, left: &str, right: &str) -> String {
    match op {
        BinaryOp::Index => format!("{left}[{right}]"),
        _ => format!("{left} {} {right}", op.as_symbol()),
    }
}

pub fn filter(op: FilterOp, left: &str, right: &str) -> String {
    format!("{left} {} {right}", op.as_symbol())
}

pub fn structure(op: StructOp, left: &str, right: &str) -> String {
    format!("{left}{}{right}", op.as_symbol())
}

pub fn walk(left: &str, right: &str) -> String {
    format!("{left}-->{right}")
}

pub fn take_nth(seq: &str, index: &str) -> String {
    format!("{seq}[[{index}]]")
}

pub fn until(op: UntilOp, left: &str, right: &str) -> String {
    match op {
        UntilOp::At => format!("{left}@{right}"),
        UntilOp::AtAt => format!("{left} @@ {right}"),
    }
}

pub fn urange(bound: &str, to: bool) -> String {
    if to {
        format!("..{bound}")
    } else {
        format!("{bound}..")
    }
}

pub fn birange(from: &str, to: &str) -> String {
    format!("{from}..{to}")
}

pub fn parens(inner: &str) -> String {
    format!("({inner})")
}

pub fn curlies(inner: &str) -> String {
    format!("{{{inner}}}")
}

pub fn ternary(form: TernaryForm, cond: &str, then: &str, otherwise: Option<&str>) -> String {
    match (form, otherwise) {
        (TernaryForm::Conditional, Some(e)) => format!("{cond} ? {then} : {e}"),
        // A `?` without `:` never comes out of the parser; render it as `if`.
        (TernaryForm::Conditional | TernaryForm::If, None) => format!("if ({cond}) {then}"),
        (TernaryForm::If, Some(e)) => format!("if ({cond}) {then} else {e}"),
    }
}

pub fn alias(name: &str, value: &str) -> String {
    format!("{name} := {value}")
}

pub fn enumerate(seq: &str, index_name: &str) -> String {
    format!("{seq}#{index_name}")
}

pub fn foreach(left: &str, right: &str) -> String {
    format!("{left} => {right}")
}

pub fn call(callee: &str, args: &str) -> String {
    format!("{callee}({args})")
}

/// Label for one position of a `-->` walk.
///
/// `path` holds the label of the starting item followed by the label of
/// each step taken. Runs of the same step collapse into a take-nth of a
/// walk, so `a`, `next`, `next`, `next`, `val` becomes
/// `a-->next[[3]]->val`.
pub fn walk_path(path: &[String]) -> String {
    use std::fmt::Write;

    let Some((first, rest)) = path.split_first() else {
        return String::new();
    };
    let Some((second, rest)) = rest.split_first() else {
        return first.clone();
    };

    let mut out = first.clone();
    let mut prev = second;
    let mut count = 1usize;
    for step in rest.iter().map(Some).chain(std::iter::once(None)) {
        if step == Some(prev) {
            count += 1;
            continue;
        }
        if count == 1 {
            out.push_str("->");
            out.push_str(prev);
        } else {
            let _ = write!(out, "-->{prev}[[{count}]]");
        }
        if let Some(step) = step {
            prev = step;
            count = 1;
        }
    }
    out
}

fn join(items: &[Expr], sep: &str) -> String {
    items.iter().map(Expr::name).collect::<Vec<_>>().join(sep)
}

impl ListExpr {
    pub fn name(&self) -> String {
        join(&self.items, ",")
    }
}

impl Expr {
    /// Static label of this node, rebuilt from its children.
    pub fn name(&self) -> String {
        ensure_sufficient_stack(|| self.name_inner())
    }

    fn name_inner(&self) -> String {
        match &self.kind {
            ExprKind::Literal(lit) => lit.text.clone(),
            ExprKind::Ident(ident) => ident.name.clone(),
            ExprKind::Underscore(n) => "_".repeat(*n),
            ExprKind::Unary { op, operand } => unary(*op, &operand.name()),
            ExprKind::Postfix { op, operand } => postfix(*op, &operand.name()),
            ExprKind::Parens(inner) => parens(&inner.name()),
            ExprKind::Curlies(inner) => curlies(&inner.name()),
            ExprKind::Binary { op, left, right } => binary(*op, &left.name(), &right.name()),
            ExprKind::Filter { op, left, right } => filter(*op, &left.name(), &right.name()),
            ExprKind::Struct { op, left, right } => structure(*op, &left.name(), &right.name()),
            ExprKind::StructWalk { left, right } => walk(&left.name(), &right.name()),
            ExprKind::TakeNth { seq, index } => take_nth(&seq.name(), &index.name()),
            ExprKind::Until { op, left, right } => until(*op, &left.name(), &right.name()),
            ExprKind::URange { bound, to } => urange(&bound.name(), *to),
            ExprKind::BiRange { from, to } => birange(&from.name(), &to.name()),
            ExprKind::EagerGrouping {
                fold,
                spelling,
                operand,
            } => format!("{}{}", eager_prefix(*fold, *spelling), operand.name()),
            ExprKind::LazyGrouping {
                fold,
                spelling,
                operand,
            } => format!("{}{}", lazy_prefix(*fold, *spelling), operand.name()),
            ExprKind::Ternary {
                form,
                cond,
                then,
                otherwise,
            } => ternary(
                *form,
                &cond.name(),
                &then.name(),
                otherwise.as_ref().map(|e| e.name()).as_deref(),
            ),
            ExprKind::Alias { name, value } => alias(&name.name(), &value.name()),
            ExprKind::Enumerate { seq, index_name } => enumerate(&seq.name(), &index_name.name()),
            ExprKind::List(list) => list.name(),
            ExprKind::Statement(items) => join(items, "; "),
            ExprKind::Foreach { left, right } => foreach(&left.name(), &right.name()),
            ExprKind::Call { callee, args } => call(&callee.name(), &args.name()),
        }
    }

    /// True if this node's labels need no extra parentheses when embedded.
    pub fn no_parens(&self) -> bool {
        match &self.kind {
            ExprKind::Literal(_)
            | ExprKind::Ident(_)
            | ExprKind::Parens(_)
            | ExprKind::URange { .. }
            | ExprKind::BiRange { .. }
            | ExprKind::Alias { .. } => true,
            ExprKind::List(list) => list
                .items
                .get(list.active())
                .is_some_and(Expr::no_parens),
            _ => false,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests;
