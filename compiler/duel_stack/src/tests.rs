use super::*;

enum Nested {
    Leaf(i64),
    Paren(Box<Nested>),
}

fn nest(depth: usize) -> Nested {
    let mut node = Nested::Leaf(7);
    for _ in 0..depth {
        node = Nested::Paren(Box::new(node));
    }
    node
}

fn unwrap_parens(node: &Nested) -> (usize, i64) {
    ensure_sufficient_stack(|| match node {
        Nested::Leaf(v) => (0, *v),
        Nested::Paren(inner) => {
            let (depth, v) = unwrap_parens(inner);
            (depth + 1, v)
        }
    })
}

fn drop_iteratively(mut node: Nested) {
    while let Nested::Paren(inner) = node {
        node = *inner;
    }
}

#[test]
fn shallow_nesting() {
    let tree = nest(3);
    assert_eq!(unwrap_parens(&tree), (3, 7));
    drop_iteratively(tree);
}

#[test]
fn deep_nesting_grows_the_stack() {
    // 100k levels would overflow a default 8MB main-thread stack.
    let tree = nest(100_000);
    assert_eq!(unwrap_parens(&tree), (100_000, 7));
    drop_iteratively(tree);
}

#[test]
fn passes_results_through() {
    let result: Result<&str, String> = ensure_sufficient_stack(|| Ok("x"));
    assert_eq!(result, Ok("x"));
}
