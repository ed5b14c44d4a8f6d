//! End-to-end queries against the demo program in `duel_heap`.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use duel_eval::{EvalErrorKind, MethodRegistry, Query, RegistryScope, Session, SessionError};
use duel_heap::demo::demo;
use duel_heap::{Heap, IntKind, Obj};
use pretty_assertions::assert_eq;

fn session() -> Session<Heap> {
    Session::new(demo())
}

fn run(text: &str) -> Vec<(String, String)> {
    session()
        .collect(text)
        .unwrap_or_else(|err| panic!("{text}: {err}"))
}

fn values(text: &str) -> Vec<String> {
    run(text).into_iter().map(|(_, value)| value).collect()
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(l, v)| ((*l).to_string(), (*v).to_string()))
        .collect()
}

fn eval_error(text: &str) -> duel_eval::EvalError {
    match session().collect(text) {
        Err(SessionError::Eval(err)) => err,
        other => panic!("{text}: expected an evaluation error, got {other:?}"),
    }
}

// Linked structures

#[test]
fn walk_list_to_null() {
    assert_eq!(
        run("head-->next->val"),
        pairs(&[
            ("head->val", "10"),
            ("head->next->val", "20"),
            ("head-->next[[2]]->val", "30"),
            ("head-->next[[3]]->val", "40"),
        ])
    );
}

#[test]
fn walk_tree_preorder() {
    assert_eq!(
        run("root-->(left,right)->key"),
        pairs(&[
            ("root->key", "5"),
            ("root->left->key", "3"),
            ("root-->left[[2]]->key", "1"),
            ("root->left->right->key", "4"),
            ("root->right->key", "8"),
            ("root-->right[[2]]->key", "9"),
        ])
    );
}

#[test]
fn walk_labels_evaluate_to_the_same_values() {
    let session = session();
    for (label, value) in session.collect("root-->(left,right)->key").unwrap() {
        assert_eq!(session.collect(&label).unwrap(), vec![(label, value)]);
    }
}

#[test]
fn take_nth_of_walk() {
    assert_eq!(
        run("head-->next[[2]]->val"),
        pairs(&[("head-->next[[2]]->val", "30")])
    );
    assert_eq!(values("#/head-->next"), vec!["4"]);
}

#[test]
fn take_nth_applies_to_its_operand_only() {
    assert_eq!(
        run("(1,2) + (10,20)[[1]]"),
        pairs(&[("1 + (10,20)[[1]]", "21"), ("2 + (10,20)[[1]]", "22")])
    );
    assert_eq!(
        run("((1,2) + (10,20))[[1]]"),
        pairs(&[("((1,2) + (10,20))[[1]]", "21")])
    );
}

#[test]
fn until_on_walk() {
    assert_eq!(values("#/head-->next@(val == 30)"), vec!["2"]);
    assert_eq!(values("head-->next->val @@ _ == 30"), vec!["10", "20"]);
}

#[test]
fn alias_binds_a_reference() {
    assert_eq!(
        run("x := head; x-->next->val"),
        pairs(&[
            ("x->val", "10"),
            ("x->next->val", "20"),
            ("x-->next[[2]]->val", "30"),
            ("x-->next[[3]]->val", "40"),
        ])
    );
}

#[test]
fn enumerate_binds_position() {
    assert_eq!(
        run("head-->next->val#i => _ + i * 100"),
        pairs(&[
            ("10 + i * 100", "10"),
            ("20 + i * 100", "120"),
            ("30 + i * 100", "230"),
            ("40 + i * 100", "340"),
        ])
    );
}

// Arrays and operators

#[test]
fn array_slices_and_filters() {
    assert_eq!(
        run("arr[..6] >? 3"),
        pairs(&[("arr[2] >? 3", "4"), ("arr[4] >? 3", "5"), ("arr[5] >? 3", "9")])
    );
    assert_eq!(run("+/arr[..6]"), pairs(&[("+/arr[..6]", "23")]));
    assert_eq!(run("#/arr[..6] ==? 1"), pairs(&[("#/arr[..6] ==? 1", "2")]));
}

#[test]
fn struct_array_fields() {
    assert_eq!(
        run("pts[..3].(x,y)"),
        pairs(&[
            ("pts[0].x", "1"),
            ("pts[0].y", "2"),
            ("pts[1].x", "3"),
            ("pts[1].y", "4"),
            ("pts[2].x", "5"),
            ("pts[2].y", "6"),
        ])
    );
}

#[test]
fn rendering() {
    assert_eq!(run("head"), pairs(&[("head", "(node *) 0x4030")]));
    assert_eq!(run("*head"), pairs(&[("*head", "{val = 10, next = 0x4020}")]));
    assert_eq!(values("greeting"), vec!["\"hello\""]);
    assert_eq!(values("greeting[0]"), vec!["104 'h'"]);
    assert_eq!(values("initial + 1"), vec!["105"]);
    assert_eq!(values("ratio * 4"), vec!["2"]);
    assert_eq!(values("sizeof(arr)"), vec!["24"]);
}

#[test]
fn ternary_and_if() {
    assert_eq!(
        run("arr[..3] > 2 ? 1 : 0"),
        pairs(&[
            ("arr[0] > 2 ? 1 : 0", "1"),
            ("arr[1] > 2 ? 1 : 0", "0"),
            ("arr[2] > 2 ? 1 : 0", "1"),
        ])
    );
    assert_eq!(
        run("if (count > 3) greeting"),
        pairs(&[("if (count > 3) greeting", "\"hello\"")])
    );
    assert_eq!(run("if (count > 4) greeting"), pairs(&[]));
}

// Names

#[test]
fn symbols_of_the_selected_frame() {
    assert_eq!(run("n->val"), pairs(&[("n->val", "20")]));
    assert_eq!(values("i + depth"), vec!["4"]);
    assert_eq!(values("calls"), vec!["7"]);
}

#[test]
fn frames() {
    assert_eq!(run("frames_no"), pairs(&[("frames_no", "2")]));
    assert_eq!(run("main.argc"), pairs(&[("main.argc", "1")]));
    assert_eq!(run("visit.i"), pairs(&[("visit.i", "3")]));
    assert_eq!(run("frame(1).argc"), pairs(&[("frame(1).argc", "1")]));
    assert_eq!(values("visit"), vec!["<Frame 0: visit>"]);
    assert_eq!(values("frame(0) == visit"), vec!["1"]);
    assert_eq!(
        values("frame(..frames_no)"),
        vec!["<Frame 0: visit>", "<Frame 1: main>"]
    );
}

#[test]
fn frame_errors() {
    assert_eq!(
        eval_error("frame(2)").kind,
        EvalErrorKind::IndexOutOfRange {
            what: "frame".to_string(),
            index: 2
        }
    );
    assert_eq!(
        eval_error("main.zzz").kind,
        EvalErrorKind::Undefined {
            name: "zzz".to_string()
        }
    );
}

#[test]
fn frame_misses_fall_through_to_outer_names() {
    // Statics live in the global block, which frames do not search, and
    // `i` is not a local of `main`; both resolve from the selected frame.
    assert_eq!(run("visit.calls"), pairs(&[("visit.calls", "7")]));
    assert_eq!(run("main.i"), pairs(&[("main.i", "3")]));
}

#[test]
fn unknown_name() {
    let err = eval_error("argc + 1");
    assert_eq!(
        err.kind,
        EvalErrorKind::Undefined {
            name: "argc".to_string()
        }
    );
    assert_eq!(err.to_string(), "undefined: argc");
}

#[test]
fn function_calls() {
    assert_eq!(run("add(1, 2)"), pairs(&[("add(1,2)", "3")]));
    assert_eq!(values("square(1..3)"), vec!["1", "4", "9"]);
    assert_eq!(
        eval_error("add(1)").message,
        "Too few arguments in function call."
    );
}

#[test]
fn convenience_variables_and_internal_functions() {
    assert_eq!(values("$answer + 1"), vec!["43"]);
    assert_eq!(
        run("$_strlen(greeting)"),
        pairs(&[("$_strlen(greeting)", "5")])
    );
}

#[test]
fn internal_functions_called_directly() {
    let mut heap = demo();
    heap.set_internal_calls(true);
    let session = Session::new(heap);
    assert_eq!(
        session.collect("$_streq(greeting, greeting)").unwrap(),
        pairs(&[("$_streq(greeting,greeting)", "1")])
    );
}

// Methods

#[test]
fn member_functions() {
    assert_eq!(run("corner.area()"), pairs(&[("corner.area()", "12")]));
    assert_eq!(values("pts[..3].area()"), vec!["2", "12", "30"]);
    assert_eq!(values("corner.dot(pts[1])"), vec!["25"]);
    assert_eq!(values("corner.area"), vec!["<MethodCaller for point::area>"]);
}

#[test]
fn registry_methods() {
    let registry = MethodRegistry::new(RegistryScope::Program).with(
        "point",
        "perimeter",
        |heap: &Heap, this: &Obj, _args: &[Obj]| {
            use duel_eval::Host;
            let x = heap.to_i64(&heap.field(this, "x")?)?;
            let y = heap.to_i64(&heap.field(this, "y")?)?;
            Ok(Obj::int(IntKind::Int, 2 * (x + y)))
        },
    );
    let session = Session::builder(demo()).resolver(registry).build();
    assert_eq!(
        session.collect("corner.perimeter()").unwrap(),
        pairs(&[("corner.perimeter()", "14")])
    );
    // The struct's own methods still resolve.
    assert_eq!(
        session.collect("corner.area()").unwrap(),
        pairs(&[("corner.area()", "12")])
    );
}

// Errors

#[test]
fn host_errors_end_the_query() {
    let session = session();
    let err = match session.collect("head-->next->(val / (val - 30))") {
        Err(SessionError::Eval(err)) => err,
        other => panic!("expected an error, got {other:?}"),
    };
    assert_eq!(err.message, "Division by zero");
    assert!(err.span.is_some());
    assert_eq!(session.scope_depth(), 0);
}

#[test]
fn null_dereference() {
    let err = eval_error("*head->next->next->next->next");
    assert_eq!(err.message, "Cannot access memory at address 0x0");
}

// Take-nth against the literal counter

#[test]
fn take_nth_reuses_the_sequence_for_growing_indices() {
    let session = session();
    let query = Query::parse("(10,20,30,40)[[1,3]]").unwrap();
    let results: Vec<String> = session
        .evaluate(&query)
        .map(|item| item.unwrap().1.text(session.host()))
        .collect();
    assert_eq!(results, vec!["20", "40"]);
    assert_eq!(session.host().literal_count(), 6);
}

#[test]
fn take_nth_restarts_for_a_smaller_index() {
    let session = session();
    let query = Query::parse("(10,20,30,40)[[3,1]]").unwrap();
    let results: Vec<String> = session
        .evaluate(&query)
        .map(|item| item.unwrap().1.text(session.host()))
        .collect();
    assert_eq!(results, vec!["40", "20"]);
    assert_eq!(session.host().literal_count(), 8);
}

// Tracked queries

#[test]
fn tracked_queries() {
    let mut session = Session::builder(demo()).max_results(Some(3)).build();
    assert_eq!(session.add("head-->next->val").unwrap(), 1);
    assert_eq!(session.add("frames_no").unwrap(), 2);
    assert_eq!(session.add("nothing").unwrap(), 3);
    session.remove(2).unwrap();

    let rendered = session.render_tracked();
    assert_eq!(rendered.len(), 2);
    assert_eq!(rendered[0].number, 1);
    assert_eq!(rendered[0].results.len(), 3);
    assert!(rendered[0].truncated);
    assert_eq!(rendered[1].number, 3);
    assert_eq!(rendered[1].error.as_deref(), Some("undefined: nothing"));
    assert!(matches!(
        session.remove(2),
        Err(SessionError::NoSuchExpression(2))
    ));
}

#[test]
fn bindings_persist_when_configured() {
    let keeping = Session::builder(demo()).fresh_bindings(false).build();
    keeping.collect("v := 5").unwrap();
    assert_eq!(
        keeping.collect("v * 2").unwrap(),
        pairs(&[("v * 2", "10")])
    );

    let fresh = session();
    fresh.collect("v := 5").unwrap();
    assert!(fresh.collect("v * 2").is_err());
}
