use tally::{
    ast::{Entry, Operator},
    build,
    error::ParseError,
    interpreter::lexer::{Part, PartKind, next_part},
};

fn part(text: &str) -> Part<'_> {
    next_part(text).unwrap_or_else(|e| panic!("`{text}` failed: {e}"))
}

fn assert_part(text: &str, kind: PartKind, expected: &str, consumed: usize) {
    let part = part(text);
    assert_eq!((part.kind, part.text, part.consumed), (kind, expected, consumed), "`{text}`");
}

fn assert_rejected(text: &str, message: &str) {
    match next_part(text) {
        Err(ParseError::SyntaxError { message: m, .. }) => {
            assert!(m.contains(message), "`{text}`: '{m}' lacks '{message}'")
        },
        other => panic!("`{text}` gave {other:?}, expected a syntax error"),
    }
}

#[test]
fn numbers() {
    assert_part("42 + 1", PartKind::Number, "42", 2);
    assert_part("  3.14*2", PartKind::Number, "3.14", 6);

    assert_rejected("1.2.3", "more than one decimal point");
    assert_rejected("5.", "ends with a decimal point");
    assert_rejected("2(3)", "after number");
    assert_rejected("12abc", "after number");
    assert_rejected("7)", "after number");
}

#[test]
fn strings_honour_escaped_quotes() {
    assert_part(r#""ab" + 1"#, PartKind::StringLiteral, "ab", 4);
    assert_part(r#""a\"b" rest"#, PartKind::StringLiteral, r#"a\"b"#, 6);
    assert_part(r#""a\\" + 1"#, PartKind::StringLiteral, r"a\\", 5);
    assert_part(r#""""#, PartKind::StringLiteral, "", 2);

    assert_rejected(r#""open"#, "unterminated string literal");
    assert_rejected(r#""a\""#, "unterminated string literal");
}

#[test]
fn variables() {
    assert_part(":price: * 2", PartKind::Variable, "price", 7);
    assert_part(":cart.items:", PartKind::Variable, "cart.items", 12);

    assert_rejected(":price", "unterminated variable reference");
    assert_rejected("::", "empty variable name");
    assert_rejected(":a b:", "whitespace");
}

#[test]
fn groups_and_calls_keep_their_parentheses() {
    assert_part("(1 + (2)) * 3", PartKind::FunctionCall, "(1 + (2))", 9);
    assert_part("max(1 \")\" 2) + 1", PartKind::FunctionCall, "max(1 \")\" 2)", 12);
    assert_part("cart.total(3)", PartKind::FunctionCall, "cart.total(3)", 13);

    assert_rejected("(1 + 2", "unbalanced parentheses");
    assert_rejected(") + 1", "unbalanced parentheses");
}

#[test]
fn sign_runs_squash_by_parity() {
    assert_part("- 4", PartKind::Operator, "-", 1);
    assert_part("--4", PartKind::Operator, "+", 2);
    assert_part("- - -4", PartKind::Operator, "-", 5);
    assert_part("+-+ 4", PartKind::Operator, "-", 3);
}

#[test]
fn operators_take_the_longest_match() {
    assert_part("<< 2", PartKind::Operator, "<<", 2);
    assert_part("<= 2", PartKind::Operator, "<=", 2);
    assert_part("< 2", PartKind::Operator, "<", 1);
    assert_part("!= 2", PartKind::Operator, "!=", 2);

    assert_rejected("= 2", "unexpected character");
    assert_rejected("! 2", "unexpected character");
}

#[test]
fn separators_and_blank_input() {
    assert_part("", PartKind::Blank, "", 0);
    assert_part(" \t\n, ", PartKind::Blank, "", 5);
}

#[test]
fn bare_names_are_rejected() {
    assert_rejected("pi + 1", "unexpected name 'pi'");
}

#[test]
fn builder_folds_and_escapes() {
    let tree = build("- 4").unwrap();
    assert_eq!(tree.to_string(), "-1 * 4");

    let tree = build("+ 4").unwrap();
    assert_eq!(tree.trunk_len(), 1);

    let tree = build(r#""a\nb""#).unwrap();
    assert!(matches!(&tree.entries()[0], Entry::Literal(v) if v.raw_string() == "a\nb"));

    let tree = build("1 << 2").unwrap();
    assert_eq!(tree.entries()[1], Entry::Operator(Operator::LeftShift));
}

#[test]
fn builder_recognises_members_and_calls() {
    let tree = build(":cart.items: + cart.total(1 2) + sqrt(4) + custom(1)").unwrap();
    let entries = tree.entries();

    assert!(matches!(&entries[0], Entry::ObjectProperty { object, member } if object == "cart" && member == "items"));
    assert!(matches!(&entries[2], Entry::ObjectMethod { arguments, .. } if arguments.len() == 2));
    assert!(matches!(&entries[4], Entry::FunctionCall { builtin: Some(_), .. }));
    assert!(matches!(&entries[6], Entry::FunctionCall { builtin: None, .. }));
}

#[test]
fn full_length_counts_through_nesting() {
    let tree = build("max(1 (2 + 3)) * (4 - 5)").unwrap();

    assert_eq!(tree.trunk_len(), 3);
    // max: 1 + (1 + 3), group: 3, operator: 1
    assert_eq!(tree.full_len(), 9);
}
