use pretty_assertions::assert_eq;

use super::*;
use crate::literal::Literal;

fn path(steps: &[&str]) -> Vec<String> {
    steps.iter().map(ToString::to_string).collect()
}

#[test]
fn walk_path_single_element_is_the_start() {
    assert_eq!(walk_path(&path(&["head"])), "head");
}

#[test]
fn walk_path_distinct_steps_use_arrows() {
    assert_eq!(walk_path(&path(&["a", "left", "right"])), "a->left->right");
}

#[test]
fn walk_path_repeats_collapse() {
    assert_eq!(
        walk_path(&path(&["a", "next", "next", "next", "val"])),
        "a-->next[[3]]->val"
    );
    assert_eq!(walk_path(&path(&["a", "next", "next"])), "a-->next[[2]]");
}

#[test]
fn walk_path_empty() {
    assert_eq!(walk_path(&[]), "");
}

#[test]
fn unary_keeps_tokens_apart() {
    assert_eq!(unary(UnaryOp::Neg, "-x"), "- -x");
    assert_eq!(unary(UnaryOp::Neg, "x"), "-x");
    assert_eq!(unary(UnaryOp::AddrOf, "&x"), "& &x");
    assert_eq!(unary(UnaryOp::Deref, "*p"), "**p");
}

#[test]
fn binary_templates() {
    assert_eq!(binary(BinaryOp::Add, "a", "b"), "a + b");
    assert_eq!(binary(BinaryOp::Index, "x", "3"), "x[3]");
}

#[test]
fn static_names() {
    let expr = Expr::binary(
        BinaryOp::Mul,
        Expr::parens(Expr::binary(
            BinaryOp::Add,
            Expr::ident("a"),
            Expr::literal(Literal::int(1)),
        )),
        Expr::ident("b"),
    );
    assert_eq!(expr.name(), "(a + 1) * b");
    assert_eq!(expr.to_string(), "(a + 1) * b");
}

#[test]
fn list_no_parens_follows_active_item() {
    let list = ListExpr::new(vec![
        Expr::ident("a"),
        Expr::binary(BinaryOp::Add, Expr::ident("b"), Expr::ident("c")),
    ]);
    let expr = Expr::synthetic(ExprKind::List(list));
    assert!(expr.no_parens());
    if let ExprKind::List(list) = &expr.kind {
        list.set_active(1);
    }
    assert!(!expr.no_parens());
    assert_eq!(expr.name(), "a,b + c");
}

#[test]
fn ternary_forms() {
    assert_eq!(
        ternary(TernaryForm::Conditional, "c", "a", Some("b")),
        "c ? a : b"
    );
    assert_eq!(ternary(TernaryForm::If, "c", "a", None), "if (c) a");
    assert_eq!(
        ternary(TernaryForm::If, "c", "a", Some("b")),
        "if (c) a else b"
    );
}
