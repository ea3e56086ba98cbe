use std::str::FromStr;

use bigdecimal::BigDecimal;
use tally::interpreter::value::{core::Value, operations::Operations};

fn number(text: &str) -> Value {
    Value::from(BigDecimal::from_str(text).unwrap())
}

#[test]
fn number_arithmetic_is_exact() {
    assert_eq!(&number("0.1") + &number("0.2"), number("0.3"));
    assert_eq!(&Value::from(7) - &Value::from(10), Value::from(-3));
    assert_eq!(&number("1.5") * &Value::from(4), Value::from(6));
    assert_eq!(&Value::from(1) / &Value::from(8), number("0.125"));
    assert_eq!(&Value::from(17) % &Value::from(5), Value::from(2));
    assert_eq!(Value::from(2).power_of(&Value::from(-2)), number("0.25"));
}

#[test]
fn number_display_is_normalized() {
    assert_eq!(number("616.000").to_string(), "616");
    assert_eq!(number("-0.50").to_string(), "-0.5");
    assert_eq!(Value::from(1000).to_string(), "1000");
}

#[test]
fn numbers_read_the_right_operand_numerically() {
    assert_eq!(Value::from(1).add(&Value::from("2")), Value::from(3));
    assert_eq!(Value::from(1).add(&Value::from(" 2.5 ")), number("3.5"));
    assert!(Value::from(1).add(&Value::from(true)).is_undefined());
    assert!(Value::from(1).add(&Value::from("two")).is_undefined());
}

#[test]
fn division_failures() {
    let quotient = &Value::from(1) / &Value::from(0);
    assert_eq!(quotient.reason(), Some("division by zero: 1 / 0"));

    let remainder = &Value::from(5) % &Value::from(0);
    assert_eq!(remainder.reason(), Some("modulo by zero: 5 % 0"));
}

#[test]
fn shifts_scale_by_powers_of_two() {
    assert_eq!(&Value::from(3) << &Value::from(3), Value::from(24));
    assert_eq!(&Value::from(25) >> &Value::from(2), Value::from(6));
    assert_eq!(&number("1.5") << &Value::from(1), Value::from(3));
    assert_eq!(&number("0.75") << &Value::from(1), Value::from(1));

    assert!((&Value::from(1) << &number("0.5")).is_undefined());
    assert!((&Value::from(1) << &Value::from(5000)).is_undefined());
}

#[test]
fn right_shift_is_exact_beyond_division_precision() {
    // 10^150 + 3
    let wide = number(&format!("1{}3", "0".repeat(149)));

    assert_eq!(&wide >> &Value::from(1), number(&format!("5{}1", "0".repeat(148))));
    assert_eq!(&wide >> &Value::from(2), number(&format!("25{}", "0".repeat(147))));
}

#[test]
fn text_operations() {
    assert_eq!(&Value::from("ab") + &Value::from(1), Value::from("ab1"));
    assert_eq!(&Value::from("ab") + &Value::from(true), Value::from("abTrue"));
    assert_eq!(&Value::from("ab") * &Value::from(2), Value::from("abab"));
    assert_eq!(&Value::from("ab") * &Value::from(0), Value::from(""));

    assert!((&Value::from("ab") * &number("1.5")).is_undefined());
    assert!((&Value::from("ab") / &Value::from(2)).is_undefined());
}

#[test]
fn text_shifts_clamp_and_respect_characters() {
    assert_eq!(&Value::from("hello") << &Value::from(1), Value::from("ello"));
    assert_eq!(&Value::from("hello") >> &Value::from(1), Value::from("hell"));
    assert_eq!(&Value::from("hello") >> &Value::from(99), Value::from(""));

    // `é` is two bytes; a cut inside it moves to the character boundary.
    assert_eq!(&Value::from("éa") << &Value::from(1), Value::from("a"));
    assert_eq!(&Value::from("aé") >> &Value::from(1), Value::from("a"));
}

#[test]
fn text_compares_raw_content() {
    assert_eq!(Value::from("abc").less_than(&Value::from("abd")), Value::from(true));
    assert_eq!(Value::from("abc").equal_to(&Value::from("abc")), Value::from(true));
    assert_eq!(Value::from("abc").not_equal_to(&Value::from("abc")), Value::from(false));
    assert_eq!(Value::from("b").greater_than_or_equal(&Value::from("b")), Value::from(true));
    assert_eq!(Value::from("True").equal_to(&Value::from(true)), Value::from(true));
}

#[test]
fn booleans_combine_logically() {
    let t = Value::from(true);
    let f = Value::from(false);

    assert_eq!(&t + &f, t);
    assert_eq!(&t * &f, f);
    assert_eq!(&t * &Value::from(1), t);
    assert_eq!(f.equal_to(&Value::from(0)), t);
    assert_eq!(t.not_equal_to(&f), t);

    assert!((&t - &f).is_undefined());
    assert!(t.less_than(&f).is_undefined());
}

#[test]
fn undefined_absorbs_every_operation() {
    let u = Value::undefined("unknown variable 'x'");

    for result in [&u + &Value::from(1),
                   &u * &Value::from("a"),
                   &u << &Value::from(1),
                   u.power_of(&Value::from(2)),
                   u.less_than_or_equal(&Value::from(true)),
                   u.not_equal_to(&u),
                   u.as_number(),
                   u.as_string()]
    {
        assert_eq!(result, u);
    }

    assert_eq!(u.to_string(), "Undefined(unknown variable 'x')");
    assert_eq!(u.numeric_view(), None);
    assert_eq!(u.string_view(), None);
    assert_eq!(u.bool_view(), None);
}

#[test]
fn undefined_operand_embeds_the_reason() {
    let u = Value::undefined("unknown variable 'x'");
    let result = &Value::from(2) + &u;

    assert_eq!(result.reason(), Some("Add is not defined for 2 and Undefined(unknown variable 'x')"));
}

#[test]
fn casts() {
    assert_eq!(Value::from(12).as_string(), Value::from("12"));
    assert_eq!(Value::from("12.50").as_number(), number("12.5"));
    assert_eq!(Value::from("3 * 4").as_number(), Value::from(12));
    assert_eq!(Value::from(0).as_bool(), Value::from(false));
    assert_eq!(Value::from("false").as_bool(), Value::from(false));
    assert_eq!(Value::from("no").as_bool(), Value::from(true));
    assert_eq!(Value::from(true).as_string().raw_string(), "True");

    let failed = Value::from(true).as_number();
    assert_eq!(failed.reason(), Some("cannot convert True to a number"));
}

#[test]
fn multi_values() {
    let pair = Value::from(vec![Value::from(1), Value::from("a")]);

    assert_eq!(pair.to_string(), "[1, \"a\"]");
    assert_eq!(pair.equal_to(&Value::from(vec![Value::from(1), Value::from("a")])),
               Value::from(true));
    assert_eq!(pair.equal_to(&Value::from(vec![Value::from(1)])), Value::from(false));
    assert!(pair.equal_to(&Value::from(1)).is_undefined());
    assert!((&pair + &Value::from(1)).is_undefined());
}
