#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;
use crate::errors::EvalErrorKind;
use crate::host::SymbolKind;
use crate::test_host::{symbol, Mock, MockBlock, MockFrame, MockHost};

fn stack() -> MockHost {
    let mut host = MockHost::new();
    host.frames = vec![
        MockFrame {
            function: "ns::Foo<int>::bar".to_string(),
            blocks: vec![
                MockBlock {
                    symbols: vec![symbol("i", SymbolKind::Variable, Mock::Int(3))],
                    ..MockBlock::default()
                },
                MockBlock {
                    symbols: vec![
                        symbol("x", SymbolKind::Argument, Mock::Int(1)),
                        symbol("i", SymbolKind::Variable, Mock::Int(99)),
                    ],
                    starts_function: true,
                    ..MockBlock::default()
                },
                MockBlock {
                    symbols: vec![symbol("hidden", SymbolKind::Variable, Mock::Int(5))],
                    ..MockBlock::default()
                },
            ],
        },
        MockFrame {
            function: "main".to_string(),
            blocks: vec![
                MockBlock {
                    symbols: vec![
                        symbol("argc", SymbolKind::Argument, Mock::Int(2)),
                        symbol("helper", SymbolKind::Function, Mock::Func("helper")),
                        symbol("MAX", SymbolKind::Constant, Mock::Int(64)),
                    ],
                    ..MockBlock::default()
                },
                MockBlock {
                    symbols: vec![symbol("global_only", SymbolKind::Variable, Mock::Int(8))],
                    global: true,
                    ..MockBlock::default()
                },
            ],
        },
    ];
    host
}

#[test]
fn test_filter_templates() {
    assert_eq!(filter_templates("std::vector<int>::push_back"), "std::vector::push_back");
    assert_eq!(filter_templates("f<a<b>, c>"), "f");
    assert_eq!(filter_templates("plain"), "plain");
    assert_eq!(filter_templates("X<int>::operator<"), "X::operator<");
    assert_eq!(filter_templates("operator<<"), "operator<<");
    assert_eq!(filter_templates("S<T>::operator>="), "S::operator>=");
    assert_eq!(filter_templates("P<Q>::operator->"), "P::operator->");
}

#[test]
fn test_function_name_is_last_word() {
    assert_eq!(function_name("ns::Foo<int>::bar").as_deref(), Some("bar"));
    assert_eq!(function_name("main").as_deref(), Some("main"));
    assert_eq!(function_name("<>"), None);
}

#[test]
fn test_lookup_searches_outward() {
    let host = stack();
    let frame = find_frame(&host, "bar").unwrap();
    assert_eq!(frame.lookup(&host, "i").unwrap(), Mock::Int(3));
    assert_eq!(frame.lookup(&host, "x").unwrap(), Mock::Int(1));
}

#[test]
fn test_lookup_stops_at_function_block() {
    let host = stack();
    let frame = find_frame(&host, "bar").unwrap();
    let err = frame.lookup(&host, "hidden").unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedField {
            field: "hidden".to_string()
        }
    );
}

#[test]
fn test_lookup_skips_functions_and_global_blocks() {
    let host = stack();
    let main = find_frame(&host, "main").unwrap();
    assert_eq!(main.lookup(&host, "argc").unwrap(), Mock::Int(2));
    assert_eq!(main.lookup(&host, "MAX").unwrap(), Mock::Int(64));
    assert!(main.lookup(&host, "helper").is_err());
    assert!(main.lookup(&host, "global_only").is_err());
}

#[test]
fn test_find_frame_by_stripped_name() {
    let host = stack();
    assert_eq!(find_frame(&host, "bar").map(|f| f.level(&host)), Some(0));
    assert_eq!(find_frame(&host, "main").map(|f| f.level(&host)), Some(1));
    assert!(find_frame(&host, "Foo").is_none());
}

#[test]
fn test_count_and_get_frames() {
    let host = stack();
    assert_eq!(count_frames(&host), 2);
    assert_eq!(get_frame(&host, 1).unwrap().level(&host), 1);

    let err = get_frame(&host, 2).unwrap_err();
    assert_eq!(err.message, "frame index 2 out of range");
    assert!(get_frame(&host, -1).is_err());
    assert_eq!(count_frames(&MockHost::new()), 0);
}

#[test]
fn test_describe_strips_templates() {
    let host = stack();
    assert_eq!(
        get_frame(&host, 0).unwrap().describe(&host),
        "<Frame 0: ns::Foo::bar>"
    );
    assert_eq!(get_frame(&host, 1).unwrap().describe(&host), "<Frame 1: main>");
}

#[test]
fn test_same_function_compares_names() {
    let host = stack();
    let bar = get_frame(&host, 0).unwrap();
    let main = get_frame(&host, 1).unwrap();
    assert!(bar.same_function(&host, &find_frame(&host, "bar").unwrap()));
    assert!(!bar.same_function(&host, &main));
}
