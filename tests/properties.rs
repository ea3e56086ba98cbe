//! Property-based tests for evaluation and the value algebra.

use proptest::prelude::*;
use tally::{
    Context, Value,
    ast::Operator,
    build, evaluate,
    interpreter::evaluator::core::calculate,
};

const OPERATORS: [Operator; 14] = [Operator::Add,
                                   Operator::Sub,
                                   Operator::Mul,
                                   Operator::Div,
                                   Operator::Mod,
                                   Operator::Pow,
                                   Operator::Less,
                                   Operator::LessEqual,
                                   Operator::Greater,
                                   Operator::GreaterEqual,
                                   Operator::Equal,
                                   Operator::NotEqual,
                                   Operator::LeftShift,
                                   Operator::RightShift];

fn operator_strategy() -> impl Strategy<Value = Operator> {
    prop::sample::select(OPERATORS.to_vec())
}

/// Numbers, strings and booleans; everything an expression can produce
/// besides `Undefined`.
fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![any::<i32>().prop_map(Value::from),
                "[a-z0-9 ]{0,8}".prop_map(Value::from),
                any::<bool>().prop_map(Value::from)]
}

/// A flat integer expression over `+ - *` and its expected result under
/// standard precedence.
fn integer_expression() -> impl Strategy<Value = (String, i64)> {
    (0i64..100, prop::collection::vec((prop::sample::select(vec!['+', '-', '*']), 0i64..100), 0..6))
        .prop_map(|(first, rest)| {
            let mut text = first.to_string();
            let mut sum = 0i64;
            let mut product = first;
            let mut sign = 1i64;

            for (op, n) in rest {
                text.push_str(&format!(" {op} {n}"));
                match op {
                    '*' => product *= n,
                    _ => {
                        sum += sign * product;
                        sign = if op == '-' { -1 } else { 1 };
                        product = n;
                    },
                }
            }
            (text, sum + sign * product)
        })
}

proptest! {
    #[test]
    fn undefined_receiver_is_returned_unchanged(op in operator_strategy(), rhs in value_strategy()) {
        let undefined = Value::undefined("division by zero: 1 / 0");

        prop_assert_eq!(calculate(&undefined, op, &rhs), undefined);
    }

    #[test]
    fn undefined_operand_keeps_its_reason(lhs in value_strategy(), op in operator_strategy()) {
        let undefined = Value::undefined("division by zero: 1 / 0");
        let result = calculate(&lhs, op, &undefined);

        prop_assert!(result.is_undefined());
        prop_assert!(result.reason().is_some_and(|r| r.contains("division by zero")),
                     "reason lost: {}", result);
    }

    #[test]
    fn precedence_matches_integer_arithmetic((text, expected) in integer_expression()) {
        prop_assert_eq!(evaluate(&text, &Context::new()), Value::from(expected), "`{}`", text);
    }

    #[test]
    fn evaluation_is_deterministic(a in -1000i32..1000, b in 1i32..1000, c in 0i32..5) {
        let text = format!("{a} / {b} + {b} ^ {c} % 7 - ({a} << {c})");
        let tree = build(&text).unwrap();
        let context = Context::new();

        prop_assert_eq!(tree.eval(&context), tree.eval(&context));
        prop_assert_eq!(tree.eval(&context), evaluate(&text, &context));
    }

    #[test]
    fn comparisons_agree_with_integers(a in any::<i32>(), b in any::<i32>()) {
        let context = Context::new();
        let compare = |op: &str| evaluate(&format!("({a}) {op} ({b})"), &context);

        prop_assert_eq!(compare("<"), Value::from(a < b));
        prop_assert_eq!(compare("<="), Value::from(a <= b));
        prop_assert_eq!(compare(">"), Value::from(a > b));
        prop_assert_eq!(compare(">="), Value::from(a >= b));
        prop_assert_eq!(compare("=="), Value::from(a == b));
        prop_assert_eq!(compare("!="), Value::from(a != b));
    }

    #[test]
    fn left_shift_doubles(a in 0i64..1_000_000, k in 0u32..30) {
        let shifted = evaluate(&format!("{a} << {k}"), &Context::new());
        prop_assert_eq!(shifted, Value::from(a << k));
    }

    #[test]
    fn repetition_multiplies_length(text in "[a-z]{0,6}", n in 0usize..20) {
        let repeated = evaluate(&format!("len(\"{text}\" * {n})"), &Context::new());
        prop_assert_eq!(repeated, Value::from(i64::try_from(text.len() * n).unwrap()));
    }
}
