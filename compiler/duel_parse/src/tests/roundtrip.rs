//! Labels are valid queries: `parse(e.name())` rebuilds `e`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::parse;

fn assert_round_trip(source: &str) {
    let expr = parse(source).unwrap();
    let name = expr.name();
    assert_eq!(name, source, "label differs from canonical source");
    assert_eq!(parse(&name).unwrap(), expr);
}

#[test]
fn test_canonical_forms_round_trip() {
    for source in [
        "a + b * c",
        "(a + b) * c",
        "x[..10] >? 5",
        "x[1,2]",
        "head-->next->val",
        "a-->next[[3]]->val",
        "x[[..3]]",
        "s@0",
        "a @@ b",
        "i := 1..5",
        "x#i => x * i",
        "#/x",
        "+/x[..3]",
        "&&/x >? 0",
        "||/(a,b)",
        "sum x",
        "count (a,b)",
        "c ? a : b",
        "if (c) a",
        "if (c) a else b",
        "f(1,2)",
        "f()",
        "s.size()",
        "p->(a,b)",
        "{x}",
        "a; b; c",
        "- -x",
        "*p",
        "&x",
        "x++",
        "--x",
        "$1",
        "__",
        "frame(1).x",
        "'a'",
        "0x10",
        "3..",
    ] {
        assert_round_trip(source);
    }
}

fn atom() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec!["a", "b", "c", "d"]).prop_map(str::to_owned),
        (0u32..100).prop_map(|n| n.to_string()),
    ]
}

fn member() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["next", "left", "val"]).prop_map(str::to_owned)
}

/// Queries in canonical spelling. Composite children are parenthesized so
/// every generated string parses.
fn query() -> impl Strategy<Value = String> {
    atom().prop_recursive(4, 48, 3, |inner| {
        let two = (inner.clone(), inner.clone());
        let composite = prop_oneof![
            two.clone().prop_map(|(a, b)| format!("{a} + {b}")),
            two.clone().prop_map(|(a, b)| format!("{a} * {b}")),
            two.clone().prop_map(|(a, b)| format!("{a} < {b}")),
            two.clone().prop_map(|(a, b)| format!("{a}[{b}]")),
            two.clone().prop_map(|(a, b)| format!("{a}[[{b}]]")),
            two.clone().prop_map(|(a, b)| format!("{a} >? {b}")),
            two.clone().prop_map(|(a, b)| format!("{a} ==? {b}")),
            two.clone().prop_map(|(a, b)| format!("{a} @@ {b}")),
            two.clone().prop_map(|(a, b)| format!("{a}@{b}")),
            two.clone().prop_map(|(a, b)| format!("{a}..{b}")),
            two.clone().prop_map(|(a, b)| format!("{a} := {b}")),
            two.clone().prop_map(|(a, b)| format!("{a} => {b}")),
            two.clone().prop_map(|(a, b)| format!("{a},{b}")),
            two.clone().prop_map(|(a, b)| format!("{a}; {b}")),
            two.clone().prop_map(|(a, b)| format!("{a}({b})")),
            (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(c, a, b)| format!("{c} ? {a} : {b}")),
            (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(c, a, b)| format!("if ({c}) {a} else {b}")),
            (inner.clone(), member()).prop_map(|(a, m)| format!("{a}->{m}")),
            (inner.clone(), member()).prop_map(|(a, m)| format!("{a}-->{m}")),
            (inner.clone(), member()).prop_map(|(a, m)| format!("{a}#{m}")),
            inner.clone().prop_map(|a| format!("..{a}")),
            inner.clone().prop_map(|a| format!("{a}..")),
            inner.clone().prop_map(|a| format!("-{a}")),
            inner.clone().prop_map(|a| format!("*{a}")),
            inner.clone().prop_map(|a| format!("{{{a}}}")),
            inner.clone().prop_map(|a| format!("#/{a}")),
            inner.clone().prop_map(|a| format!("+/{a}")),
            inner.clone().prop_map(|a| format!("||/{a}")),
            inner.clone().prop_map(|a| format!("sum {a}")),
            inner.prop_map(|a| format!("{a}()")),
        ];
        composite.prop_map(|s| format!("({s})"))
    })
}

proptest! {
    #[test]
    fn labels_round_trip(source in query()) {
        let expr = parse(&source).unwrap();
        prop_assert_eq!(expr.name(), source.clone());
        prop_assert_eq!(parse(&expr.name()).unwrap(), expr);
    }
}
