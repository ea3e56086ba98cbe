use std::{fs, thread};

use bigdecimal::ToPrimitive;
use tally::{
    Context, Value, build, evaluate,
    error::ParseError,
    interpreter::{evaluator::context::Record, value::operations::Operations},
};
use walkdir::WalkDir;

#[test]
fn case_files_work() {
    let mut count = 0;

    for entry in
        WalkDir::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/cases")).into_iter()
                                                                       .filter_map(Result::ok)
                                                                       .filter(|e| e.path().extension().is_some_and(|ext| ext == "txt"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (line_no, (expression, expected)) in extract_cases(&content) {
            count += 1;
            let value = evaluate(expression, &Context::new());

            if expected == "Undefined" {
                assert!(value.is_undefined(),
                        "{path:?}:{line_no}: `{expression}` gave {value}, expected Undefined");
            } else {
                assert_eq!(value.to_string(),
                           expected,
                           "{path:?}:{line_no}: `{expression}` gave the wrong result");
            }
        }
    }

    assert!(count > 0, "No cases found in tests/cases");
}

/// Reads `expression => expected` lines, skipping blanks and `#` comments.
fn extract_cases(content: &str) -> Vec<(usize, (&str, &str))> {
    content.lines()
           .enumerate()
           .map(|(i, line)| (i + 1, line.trim()))
           .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
           .map(|(i, line)| {
               let (expression, expected) =
                   line.rsplit_once(" => ").unwrap_or_else(|| panic!("line {i} has no ' => '"));
               (i, (expression.trim(), expected.trim()))
           })
           .collect()
}

fn eval(src: &str) -> Value {
    evaluate(src, &Context::new())
}

fn assert_value(src: &str, expected: impl Into<Value>) {
    assert_eq!(eval(src), expected.into(), "`{src}`");
}

fn assert_undefined(src: &str, reason_part: &str) {
    let value = eval(src);
    let reason = value.reason().unwrap_or_else(|| panic!("`{src}` gave {value}, expected Undefined"));
    assert!(reason.contains(reason_part), "`{src}`: reason '{reason}' lacks '{reason_part}'");
}

fn as_f64(value: &Value) -> f64 {
    value.numeric_view()
         .and_then(|n| n.to_f64())
         .unwrap_or_else(|| panic!("{value} is not a number"))
}

#[test]
fn precedence_scenarios() {
    assert_value("10 + 5 * 4 ^ 3 * 2 + 6 * 7", 692);
    assert_value("-10 + 2 * 7 / 2 + 5 ^ 4 - 8", 614);
    assert_value("3 - 4 * (-2) - 5", 6);
}

#[test]
fn eval_of_a_string_expression() {
    assert_value("eval(\"7+22\")*2", 58);
}

#[test]
fn square_root_is_close() {
    let root = as_f64(&eval("sqrt(2)"));
    assert!((root - 1.414_213_562).abs() < 1e-6, "sqrt(2) gave {root}");
}

#[test]
fn factorial_of_negative_is_undefined() {
    assert_undefined("factorial(-10)", "non-negative integer");
}

#[test]
fn trunc_precision_is_bounded() {
    assert_eq!(eval("trunc(4096 1.5)"), eval("1.5"));
    assert_undefined("trunc(5000 1.5)", "no larger than 4096, got 5000");
    assert_undefined("trunc(4294967295 1)", "no larger than 4096");
}

#[test]
fn failure_inside_an_argument_reaches_the_result() {
    assert_undefined("trunc(5 ln(-123456))", "negative");
    assert_undefined("trunc(5, ln(-123456))", "negative");
    assert_undefined("1 + trunc(5 ln(-123456)) * 2", "negative");
}

#[test]
fn leading_sign_normalization() {
    assert_eq!(eval("-4"), eval("(-1) * 4"));
    assert_eq!(eval("+4"), eval("4"));
    assert_eq!(eval("-2 ^ 2"), Value::from(-4));
    assert_eq!(eval("(-2) ^ 2"), Value::from(4));
}

#[test]
fn operator_after_operator_is_undefined() {
    assert_undefined("2 * -3", "syntax error");
    assert_value("2 * (-3)", -6);
}

#[test]
fn strings_display_quoted_and_compare_raw() {
    let value = eval("\"a\" + \"b\"");
    assert_eq!(value.to_string(), "\"ab\"");
    assert_eq!(value.raw_string(), "ab");

    assert_value("\"ab\" == \"a\" + \"b\"", true);
    assert_value("\"B\" < \"a\"", true);
}

#[test]
fn evaluation_is_deterministic() {
    let tree = build("10 + 5 * 4 ^ 3 * 2 + 6 * 7 == 692").unwrap();
    let context = Context::new();

    let first = tree.eval(&context);
    for _ in 0..10 {
        assert_eq!(tree.eval(&context), first);
    }
    assert_eq!(first, Value::from(true));
}

#[test]
fn trees_evaluate_concurrently() {
    let tree = build(":n: * 2 + 1").unwrap();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8).map(|n| {
                                        let tree = &tree;
                                        scope.spawn(move || {
                                                 tree.eval(&Context::new().with_variable("n", n))
                                             })
                                    })
                                    .collect();

        for (n, handle) in (0..8).zip(handles) {
            assert_eq!(handle.join().unwrap(), Value::from(n * 2 + 1));
        }
    });
}

fn counting_context() -> Context {
    Context::new().with_function("count", |args: &[Value]| Value::from(args.len() as i64))
                  .with_function("pair", |_: &[Value]| Value::from(vec![Value::from(1), Value::from(2)]))
}

#[test]
fn argument_splitting() {
    let context = counting_context();

    assert_eq!(evaluate("count()", &context), Value::from(0));
    assert_eq!(evaluate("count(1 2 3)", &context), Value::from(3));
    assert_eq!(evaluate("count(1, 2, 3)", &context), Value::from(3));
    assert_eq!(evaluate("count(1 -2)", &context), Value::from(1));
    assert_eq!(evaluate("count(1 (-2))", &context), Value::from(2));
    assert_eq!(evaluate("count(sqrt(4) 1 + 2)", &context), Value::from(2));
    assert_eq!(evaluate("count(\"a b\" \"c\")", &context), Value::from(2));
}

#[test]
fn multi_values_spread_into_arguments() {
    let context = counting_context();

    assert_eq!(evaluate("count(pair())", &context), Value::from(2));
    assert_eq!(evaluate("count(pair() pair() 5)", &context), Value::from(5));
    assert_eq!(evaluate("max(pair())", &context), Value::from(2));
    assert_eq!(evaluate("pair()", &context).to_string(), "[1, 2]");
}

#[test]
fn undefined_argument_skips_the_call() {
    let context = counting_context();

    let value = evaluate("count(1 :missing: 3)", &context);
    assert_eq!(value.reason(), Some("unknown variable 'missing'"));
}

#[test]
fn builtins_win_over_host_functions() {
    let context = Context::new().with_function("abs", |_: &[Value]| Value::from(0));
    assert_eq!(evaluate("abs(-3)", &context), Value::from(3));
}

#[test]
fn unknown_function_is_named() {
    assert_undefined("nosuch(1)", "unknown function 'nosuch'");
}

#[test]
fn variables_resolve_from_context() {
    let context = Context::new().with_variable("price", 40)
                                .with_variable("name", "widget")
                                .with_variable("on_sale", true);

    assert_eq!(evaluate(":price: * 3 - 20", &context), Value::from(100));
    assert_eq!(evaluate(":name: + \"s\"", &context), Value::from("widgets"));
    assert_eq!(evaluate(":on_sale: == true()", &context), Value::from(true));
    assert_eq!(evaluate(":Price:", &context).reason(), Some("unknown variable 'Price'"));
}

#[test]
fn eval_does_not_see_the_calling_context() {
    let context = Context::new().with_variable("x", 1);

    assert_eq!(evaluate(":x: + 1", &context), Value::from(2));
    assert!(evaluate("eval(\":x: + 1\")", &context).is_undefined());
}

fn shop() -> Context {
    let cart = Record::new().with_property("items", 3)
                            .with_property("owner", "ada")
                            .with_method("total", 1, |args: &[Value]| &args[0] * &Value::from(3))
                            .with_method("empty", 0, |_: &[Value]| false);
    Context::new().with_object("cart", cart)
}

#[test]
fn object_members() {
    let context = shop();

    assert_eq!(evaluate(":cart.items: + 1", &context), Value::from(4));
    assert_eq!(evaluate("cart.total(10) - 5", &context), Value::from(25));
    assert_eq!(evaluate("cart.total(:cart.items:)", &context), Value::from(9));
    assert_eq!(evaluate("cart.empty()", &context), Value::from(false));
    assert_eq!(evaluate(":cart.owner:", &context).raw_string(), "ada");
}

#[test]
fn object_member_failures() {
    let context = shop();

    let missing = evaluate(":cart.weight:", &context);
    assert_eq!(missing.reason(), Some("object 'cart' has no property 'weight'"));

    let method = evaluate("cart.refund(1)", &context);
    assert_eq!(method.reason(), Some("object 'cart' has no method 'refund'"));

    let arity = evaluate("cart.total(1 2)", &context);
    assert_eq!(arity.reason(), Some("method 'cart.total' expects 1 argument(s), got 2"));

    let object = evaluate(":till.items:", &context);
    assert_eq!(object.reason(), Some("unknown object 'till'"));

    let deep = evaluate(":cart.items.count:", &context);
    assert!(deep.reason().is_some_and(|r| r.starts_with("syntax error")), "got {deep}");
}

#[test]
fn parse_errors_fold_into_undefined() {
    assert_undefined("(1 + 2", "unbalanced parentheses");
    assert_undefined("\"open", "unterminated string literal");
    assert_undefined(":x", "unterminated variable reference");
    assert_undefined("1.2.3", "more than one decimal point");
    assert_undefined("", "empty expression");
}

#[test]
fn nesting_is_limited() {
    let shallow = format!("{}1{}", "(".repeat(100), ")".repeat(100));
    assert_value(&shallow, 1);

    let deep = format!("{}1{}", "(".repeat(200), ")".repeat(200));
    assert_eq!(build(&deep), Err(ParseError::NestingTooDeep { limit: 128 }));
    assert_undefined(&deep, "deeper than 128");
}

#[test]
fn tree_measures_and_display() {
    let tree = build("1 + max(2 (3 * 4)) - :x:").unwrap();

    assert_eq!(tree.trunk_len(), 5);
    assert_eq!(tree.to_string(), "1 + max(2 (3 * 4)) - :x:");
    assert!(tree.full_len() > tree.trunk_len());
}

#[test]
fn unsupported_operations_name_the_operands() {
    assert_undefined("true() / 2", "Divide is not defined for True and 2");
    assert_undefined("\"ab\" - 1", "Sub is not defined for \"ab\" and 1");
}

#[test]
fn undefined_absorbs_everything_after_it() {
    let first = eval("1 / 0");
    let reason = first.reason().unwrap().to_string();

    for src in ["1 / 0 + 5", "(1 / 0) * 0", "(1 / 0) == (1 / 0)", "max(1 / 0 2)", "\"x\" + (1 / 0)"] {
        assert_eq!(eval(src).reason(), Some(reason.as_str()), "`{src}`");
    }
}
