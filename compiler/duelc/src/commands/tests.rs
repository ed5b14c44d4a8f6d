#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;

fn repl(input: &str) -> String {
    let mut out = Vec::new();
    run_repl(&ReplOptions::default(), &mut input.as_bytes(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn eval(queries: &[&str]) -> (bool, String, String) {
    let queries: Vec<String> = queries.iter().map(|q| (*q).to_string()).collect();
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let ok = eval_queries(&queries, &mut out, &mut err);
    (
        ok,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn test_eval_prints_label_and_value() {
    let (ok, out, err) = eval(&["head-->next->val", "frames_no"]);
    assert!(ok);
    assert_eq!(
        out,
        "head->val = 10\nhead->next->val = 20\nhead-->next[[2]]->val = 30\n\
         head-->next[[3]]->val = 40\nframes_no = 2\n"
    );
    assert_eq!(err, "");
}

#[test]
fn test_eval_reports_parse_errors_with_caret() {
    let (ok, out, err) = eval(&["1 +"]);
    assert!(!ok);
    assert_eq!(out, "");
    assert!(err.starts_with("1 +\n"));
    assert!(err.contains("error: "));
}

#[test]
fn test_eval_reports_evaluation_errors_with_caret() {
    let (ok, _, err) = eval(&["1 + nothing"]);
    assert!(!ok);
    assert_eq!(err, "1 + nothing\n    ^^^^^^^\nerror: undefined: nothing\n");
}

#[test]
fn test_eval_continues_after_failure() {
    let (ok, out, _) = eval(&["nothing", "2 * 3"]);
    assert!(!ok);
    assert_eq!(out, "2 * 3 = 6\n");
}

#[test]
fn test_repl_tracks_queries() {
    let out = repl("add arr[..2]\nadd nothing\nadd corner.area()\ndel 2\nshow\nquit\n");
    assert_eq!(
        out,
        "(duel) added expression 1\n\
         (duel) added expression 2\n\
         (duel) added expression 3\n\
         (duel) (duel) 1: arr[..2]\n    arr[0] = 3\n    arr[1] = 1\n\
         3: corner.area()\n    corner.area() = 12\n\
         (duel) "
    );
}

#[test]
fn test_repl_show_reports_errors_and_truncation() {
    let mut out = Vec::new();
    let options = ReplOptions {
        max_results: Some(2),
        ..ReplOptions::default()
    };
    run_repl(
        &options,
        &mut "add head-->next\nadd 1/0\nshow\n".as_bytes(),
        &mut out,
    )
    .unwrap();
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("1: head-->next\n    head = (node *) 0x4030\n"));
    assert!(out.contains("    ...\n"));
    assert!(out.contains("2: 1/0\n    error: Division by zero\n"));
}

#[test]
fn test_repl_evaluates_other_lines() {
    let out = repl("x := 3; x * x\n\n");
    assert_eq!(out, "(duel) x * x = 9\n(duel) (duel) \n");
}

#[test]
fn test_repl_del_errors() {
    let out = repl("del 4\ndel two\n");
    assert_eq!(
        out,
        "(duel) error: no duel expression number 4\n\
         (duel) error: 'two' is not an expression number\n\
         (duel) \n"
    );
}

#[test]
fn test_repl_show_empty() {
    assert_eq!(repl("show\nexit\n"), "(duel) no tracked expressions\n(duel) ");
}
