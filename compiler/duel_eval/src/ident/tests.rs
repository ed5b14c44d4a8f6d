#![allow(clippy::unwrap_used, clippy::expect_used)]

use duel_ir::{Builtin, IdentKind};
use pretty_assertions::assert_eq;

use crate::errors::EvalErrorKind;
use crate::host::SymbolKind;
use crate::session::{Query, Session};
use crate::test_host::{symbol, Mock, MockBlock, MockFrame, MockHost};

fn host() -> MockHost {
    let mut host = MockHost::new();
    host.globals = vec![
        ("x", Mock::Int(100)),
        (
            "s",
            Mock::rec("Rec", vec![("x", Mock::Int(1)), ("y", Mock::Int(2))]),
        ),
        (
            "p",
            Mock::rec("Point", vec![("x", Mock::Int(3)), ("y", Mock::Int(4))]),
        ),
    ];
    host.method_types = vec!["Point"];
    host.frames = vec![
        MockFrame {
            function: "work".to_string(),
            blocks: vec![MockBlock {
                symbols: vec![symbol("n", SymbolKind::Argument, Mock::Int(9))],
                starts_function: true,
                ..MockBlock::default()
            }],
        },
        MockFrame {
            function: "main".to_string(),
            blocks: vec![MockBlock {
                symbols: vec![symbol("argc", SymbolKind::Argument, Mock::Int(1))],
                starts_function: true,
                ..MockBlock::default()
            }],
        },
    ];
    host
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(l, v)| ((*l).to_string(), (*v).to_string()))
        .collect()
}

/// Resolution kind remembered by the root identifier of `text`.
fn kind_after_eval(session: &Session<MockHost>, text: &str) -> Option<IdentKind> {
    let query = Query::parse(text).unwrap();
    for item in session.evaluate(&query) {
        item.unwrap();
    }
    query.expr.as_ident().and_then(|ident| ident.resolved())
}

#[test]
fn test_scope_field_shadows_global() {
    let session = Session::new(host());
    assert_eq!(session.collect("s.x").unwrap(), pairs(&[("s.x", "1")]));
    assert_eq!(session.collect("x").unwrap(), pairs(&[("x", "100")]));
}

#[test]
fn test_unknown_field_falls_through_to_globals() {
    let session = Session::new(host());
    assert_eq!(session.collect("s.p").unwrap()[0].0, "s.p");
}

#[test]
fn test_method_of_scope_value() {
    let session = Session::new(host());
    assert_eq!(
        session.collect("p.norm").unwrap(),
        pairs(&[("p.norm", "<MethodCaller for Point::norm>")])
    );
    assert_eq!(session.collect("p.norm()").unwrap(), pairs(&[("p.norm()", "7")]));
}

#[test]
fn test_binding_resolution() {
    let session = Session::new(host());
    assert_eq!(
        session.collect("y := 2, y + 1").unwrap(),
        pairs(&[("y", "2"), ("y + 1", "3")])
    );
}

#[test]
fn test_binding_shadows_global() {
    let session = Session::new(host());
    assert_eq!(
        session.collect("x := 5; x").unwrap(),
        pairs(&[("x", "5")])
    );
}

#[test]
fn test_symbol_is_remembered() {
    let session = Session::new(host());
    assert_eq!(kind_after_eval(&session, "x"), Some(IdentKind::Symbol));
}

#[test]
fn test_frame_by_function_name() {
    let session = Session::new(host());
    assert_eq!(
        session.collect("main").unwrap(),
        pairs(&[("main", "<Frame 1: main>")])
    );
    assert_eq!(session.collect("main.argc").unwrap(), pairs(&[("main.argc", "1")]));
    assert_eq!(kind_after_eval(&session, "work"), Some(IdentKind::Frame));
}

#[test]
fn test_builtins() {
    let session = Session::new(host());
    assert_eq!(session.collect("frames_no").unwrap(), pairs(&[("frames_no", "2")]));
    assert_eq!(session.collect("frame(0).n").unwrap(), pairs(&[("frame(0).n", "9")]));
    assert_eq!(session.collect("sizeof(s)").unwrap(), pairs(&[("sizeof(s)", "16")]));
    assert_eq!(
        kind_after_eval(&session, "sizeof"),
        Some(IdentKind::Builtin(Builtin::SizeOf))
    );
}

#[test]
fn test_frame_index_out_of_range() {
    let session = Session::new(host());
    let err = session.collect("frame(5)").unwrap_err().to_string();
    assert_eq!(err, "frame index 5 out of range");
}

#[test]
fn test_raw_fallback() {
    let session = Session::new(host());
    assert_eq!(session.collect("$conv").unwrap(), pairs(&[("$conv", "77")]));
    assert_eq!(kind_after_eval(&session, "$conv"), Some(IdentKind::RawFallback));
}

#[test]
fn test_undefined_name() {
    let session = Session::new(host());
    let query = Query::parse("1 + nothing").unwrap();
    let err = session.evaluate(&query).next().unwrap().unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::Undefined {
            name: "nothing".to_string()
        }
    );
    assert_eq!(err.span.map(|s| s.to_range()), Some(4..11));
}

#[test]
fn test_cached_scope_field_is_reread() {
    let session = Session::new(host());
    assert_eq!(
        session.collect("(s, p) => x").unwrap(),
        pairs(&[("x", "1"), ("x", "3")])
    );
}
