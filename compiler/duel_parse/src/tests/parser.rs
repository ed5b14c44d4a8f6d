//! Core parser tests: precedence, node shapes and errors.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use duel_ir::{
    BinaryOp, EagerFold, Expr, ExprKind, FilterOp, FoldSpelling, LazyFold, Literal, StructOp,
    TernaryForm, UntilOp,
};
use pretty_assertions::assert_eq;

use crate::{parse, ParseErrorKind};

fn ident(name: &str) -> Expr {
    Expr::ident(name)
}

fn int(n: u64) -> Expr {
    Expr::literal(Literal::int(n))
}

fn node(kind: ExprKind) -> Expr {
    Expr::synthetic(kind)
}

fn b(expr: Expr) -> Box<Expr> {
    Box::new(expr)
}

#[test]
fn test_parse_binary_precedence() {
    let expr = parse("1 + 2 * 3").unwrap();
    assert_eq!(
        expr,
        Expr::binary(
            BinaryOp::Add,
            int(1),
            Expr::binary(BinaryOp::Mul, int(2), int(3))
        )
    );
}

#[test]
fn test_parse_c_operator_ladder() {
    let expr = parse("a || b && c | d ^ e & f == g < h << i").unwrap();
    let ExprKind::Binary { op, right, .. } = &expr.kind else {
        panic!("expected binary, got {expr:?}");
    };
    assert_eq!(*op, BinaryOp::Or);
    assert!(matches!(
        right.kind,
        ExprKind::Binary {
            op: BinaryOp::And,
            ..
        }
    ));
}

#[test]
fn test_parse_filter_over_index_range() {
    let expr = parse("x[..10] >? 5").unwrap();
    let index = Expr::binary(
        BinaryOp::Index,
        ident("x"),
        node(ExprKind::URange {
            bound: b(int(10)),
            to: true,
        }),
    );
    assert_eq!(
        expr,
        node(ExprKind::Filter {
            op: FilterOp::Gt,
            left: b(index),
            right: b(int(5)),
        })
    );
}

#[test]
fn test_parse_open_and_closed_ranges() {
    assert_eq!(
        parse("3..").unwrap(),
        node(ExprKind::URange {
            bound: b(int(3)),
            to: false,
        })
    );
    assert_eq!(
        parse("1..-1").unwrap(),
        node(ExprKind::BiRange {
            from: b(int(1)),
            to: b(node(ExprKind::Unary {
                op: duel_ir::UnaryOp::Neg,
                operand: b(int(1)),
            })),
        })
    );
}

#[test]
fn test_parse_walk_then_arrow() {
    let expr = parse("head-->next->val").unwrap();
    let walk = node(ExprKind::StructWalk {
        left: b(ident("head")),
        right: b(ident("next")),
    });
    assert_eq!(
        expr,
        node(ExprKind::Struct {
            op: StructOp::Arrow,
            left: b(walk),
            right: b(ident("val")),
        })
    );
}

#[test]
fn test_parse_take_nth_versus_nested_index() {
    assert_eq!(
        parse("a[[1]]").unwrap(),
        node(ExprKind::TakeNth {
            seq: b(ident("a")),
            index: b(int(1)),
        })
    );
    assert_eq!(
        parse("a[b[1]]").unwrap(),
        Expr::binary(
            BinaryOp::Index,
            ident("a"),
            Expr::binary(BinaryOp::Index, ident("b"), int(1))
        )
    );
    assert_eq!(
        parse("x[[y[0]]]").unwrap(),
        node(ExprKind::TakeNth {
            seq: b(ident("x")),
            index: b(Expr::binary(BinaryOp::Index, ident("y"), int(0))),
        })
    );
}

#[test]
fn test_parse_take_nth_binds_like_postfix() {
    let pair = |x, y| Expr::parens(Expr::list(vec![int(x), int(y)]));
    assert_eq!(
        parse("(1,2) + (10,20)[[1]]").unwrap(),
        Expr::binary(
            BinaryOp::Add,
            pair(1, 2),
            node(ExprKind::TakeNth {
                seq: b(pair(10, 20)),
                index: b(int(1)),
            })
        )
    );
    assert_eq!(
        parse("((1,2) + (10,20))[[1]]").unwrap(),
        node(ExprKind::TakeNth {
            seq: b(Expr::parens(Expr::binary(
                BinaryOp::Add,
                pair(1, 2),
                pair(10, 20)
            ))),
            index: b(int(1)),
        })
    );
}

#[test]
fn test_parse_walk_path_label_shape() {
    // Labels produced by `-->` must parse back.
    let expr = parse("a-->next[[3]]->val").unwrap();
    assert_eq!(expr.name(), "a-->next[[3]]->val");
    assert!(matches!(
        expr.kind,
        ExprKind::Struct {
            op: StructOp::Arrow,
            ..
        }
    ));
}

#[test]
fn test_parse_grouping_keyword_or_ident() {
    assert_eq!(
        parse("sum x").unwrap(),
        node(ExprKind::EagerGrouping {
            fold: EagerFold::Sum,
            spelling: FoldSpelling::Keyword,
            operand: b(ident("x")),
        })
    );
    assert_eq!(
        parse("sum + 1").unwrap(),
        Expr::binary(BinaryOp::Add, ident("sum"), int(1))
    );
    assert_eq!(
        parse("&&/x").unwrap(),
        node(ExprKind::LazyGrouping {
            fold: LazyFold::All,
            spelling: FoldSpelling::Symbol,
            operand: b(ident("x")),
        })
    );
}

#[test]
fn test_parse_grouping_is_loose() {
    let expr = parse("#/x => y").unwrap();
    assert!(matches!(
        &expr.kind,
        ExprKind::EagerGrouping { operand, .. } if matches!(operand.kind, ExprKind::Foreach { .. })
    ));
}

#[test]
fn test_parse_alias_right_associative() {
    assert_eq!(
        parse("a := b := 3").unwrap(),
        node(ExprKind::Alias {
            name: b(ident("a")),
            value: b(node(ExprKind::Alias {
                name: b(ident("b")),
                value: b(int(3)),
            })),
        })
    );
}

#[test]
fn test_parse_enumerate_inside_foreach() {
    let expr = parse("x#i => i").unwrap();
    assert_eq!(
        expr,
        node(ExprKind::Foreach {
            left: b(node(ExprKind::Enumerate {
                seq: b(ident("x")),
                index_name: b(ident("i")),
            })),
            right: b(ident("i")),
        })
    );
}

#[test]
fn test_parse_until_forms() {
    assert_eq!(
        parse("s@0").unwrap(),
        node(ExprKind::Until {
            op: UntilOp::At,
            left: b(ident("s")),
            right: b(int(0)),
        })
    );
    let loose = parse("a + 1 @@ b > 2").unwrap();
    assert!(matches!(
        loose.kind,
        ExprKind::Until {
            op: UntilOp::AtAt,
            ..
        }
    ));
}

#[test]
fn test_parse_ternaries() {
    assert_eq!(
        parse("c ? a : b").unwrap(),
        node(ExprKind::Ternary {
            form: TernaryForm::Conditional,
            cond: b(ident("c")),
            then: b(ident("a")),
            otherwise: Some(b(ident("b"))),
        })
    );
    assert_eq!(
        parse("if (c) a").unwrap(),
        node(ExprKind::Ternary {
            form: TernaryForm::If,
            cond: b(ident("c")),
            then: b(ident("a")),
            otherwise: None,
        })
    );
}

#[test]
fn test_parse_calls() {
    let empty = parse("f()").unwrap();
    let ExprKind::Call { args, .. } = &empty.kind else {
        panic!("expected call");
    };
    assert!(args.items.is_empty());

    let two = parse("f(1, x)").unwrap();
    let ExprKind::Call { callee, args } = &two.kind else {
        panic!("expected call");
    };
    assert_eq!(**callee, ident("f"));
    assert_eq!(args.items, vec![int(1), ident("x")]);
    assert_eq!(two.name(), "f(1,x)");
}

#[test]
fn test_parse_method_call_on_member() {
    let expr = parse("s.size()").unwrap();
    assert!(matches!(
        &expr.kind,
        ExprKind::Call { callee, .. } if matches!(callee.kind, ExprKind::Struct { op: StructOp::Dot, .. })
    ));
}

#[test]
fn test_parse_statement_and_list() {
    let expr = parse("a; b, c").unwrap();
    let ExprKind::Statement(items) = &expr.kind else {
        panic!("expected statement");
    };
    assert_eq!(items.len(), 2);
    assert!(matches!(items[1].kind, ExprKind::List(_)));
    assert_eq!(parse("x;").unwrap(), ident("x"));
}

#[test]
fn test_parse_literals_keep_spelling() {
    let expr = parse("0x1F").unwrap();
    let ExprKind::Literal(lit) = &expr.kind else {
        panic!("expected literal");
    };
    assert_eq!(lit.text, "0x1F");
    assert_eq!(lit.value, duel_ir::LiteralValue::Int(31));
    assert_eq!(parse("'a'").unwrap().name(), "'a'");
    assert_eq!(parse(r#""s\n""#).unwrap().name(), r#""s\n""#);
}

#[test]
fn test_parse_underscores_and_dollar() {
    assert_eq!(parse("__").unwrap(), node(ExprKind::Underscore(2)));
    assert_eq!(parse("$1").unwrap(), ident("$1"));
}

#[test]
fn test_parse_spans() {
    let expr = parse("ab + cd").unwrap();
    assert_eq!(expr.span, duel_ir::Span::new(0, 7));
    let ExprKind::Binary { right, .. } = &expr.kind else {
        panic!("expected binary");
    };
    assert_eq!(right.span, duel_ir::Span::new(5, 7));
}

#[test]
fn test_parse_errors() {
    assert_eq!(parse("").unwrap_err().kind, ParseErrorKind::UnexpectedEof);
    assert_eq!(parse("a b").unwrap_err().kind, ParseErrorKind::TrailingInput);

    let unclosed = parse("(a").unwrap_err();
    assert_eq!(unclosed.kind, ParseErrorKind::UnexpectedEof);
    assert_eq!(unclosed.expected.as_deref(), Some("`)`"));

    assert_eq!(parse("a ` b").unwrap_err().kind, ParseErrorKind::LexError);
    assert_eq!(parse("09").unwrap_err().kind, ParseErrorKind::InvalidLiteral);
    assert_eq!(
        parse("a[[1] ]").unwrap_err().expected.as_deref(),
        Some("`]]`")
    );
    assert_eq!(parse("a +").unwrap_err().kind, ParseErrorKind::UnexpectedEof);
}

#[test]
fn test_parse_error_render() {
    let err = parse("a + )").unwrap_err();
    assert_eq!(err.render("a + )"), "a + )\n    ^\nerror: expected expression, found `)`");
}
