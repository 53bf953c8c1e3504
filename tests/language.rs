use std::fs::{self};

use sixcount::{
    error::{DomainError, Error, EvalError, Expected, ParseError},
    evaluate,
    interpreter::{
        evaluator::core::Context,
        value::{core::Number, rational::Rational},
    },
};
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, block) in extract_sixcount_blocks(&content).into_iter().enumerate() {
            for line in block.lines().filter(|line| !line.trim().is_empty()) {
                count += 1;
                let (source, expected) =
                    line.rsplit_once("=>")
                        .unwrap_or_else(|| panic!("Example {} in {path:?} has no '=>': {line}", i + 1));
                let expected: i128 = expected.trim()
                                             .parse()
                                             .unwrap_or_else(|e| panic!("Bad value in {line}: {e}"));
                match evaluate(source) {
                    Ok(value) if value.as_integer() == Some(expected) => {},
                    other => panic!("Example {} in {:?} failed:\n{}\nGot: {:?}",
                                    i + 1,
                                    path,
                                    line,
                                    other),
                }
            }
        }
    }

    assert!(count > 0, "No sixcount examples found in book/src");
}

fn extract_sixcount_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```sixcount") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn assert_value(src: &str, expected: i128) {
    match evaluate(src) {
        Ok(value) => assert_eq!(value.as_integer(), Some(expected), "{src} evaluated to {value}"),
        Err(e) => panic!("{src} failed: {e}"),
    }
}

fn assert_parse_error(src: &str, expected: ParseError) {
    assert_eq!(evaluate(src), Err(Error::Parse(expected)), "for {src:?}");
}

fn assert_domain_error(src: &str, detail: DomainError, position: usize) {
    assert_eq!(evaluate(src),
               Err(Error::Eval(EvalError::Domain { detail, position })),
               "for {src:?}");
}

fn syntax(expected: Expected, position: usize) -> ParseError {
    ParseError::Syntax { expected, position }
}

#[test]
fn single_digits_and_basic_arithmetic() {
    for digit in 1..=6 {
        assert_value(&digit.to_string(), digit);
    }
    assert_value("3-2", 1);
    assert_value("6+5", 11);
    assert_value("6*6", 36);
    assert_value("6/3", 2);
    assert_value("1-6", -5);
}

#[test]
fn characters_outside_the_alphabet() {
    for (src, character, position) in [("0", '0', 0),
                                       ("3 + 7", '7', 4),
                                       ("4/0", '0', 2),
                                       ("9", '9', 0),
                                       ("1.5", '.', 1),
                                       ("x", 'x', 0),
                                       ("2 % 1", '%', 2),
                                       ("(3×2)", '×', 2)]
    {
        assert_parse_error(src, ParseError::InvalidCharacter { character, position });
    }
}

#[test]
fn backticks_wrap_the_whole_message_only() {
    assert_value("`3-2`", 1);
    assert_value("  `3-2`  ", 1);
    assert_value("` 6 * 2 `", 12);
    assert_parse_error("`6", ParseError::InvalidCharacter { character: '`', position: 0 });
    assert_parse_error("6`", ParseError::InvalidCharacter { character: '`', position: 1 });
    assert_parse_error("``6``", ParseError::InvalidCharacter { character: '`', position: 1 });
}

#[test]
fn positions_count_characters_of_the_raw_text() {
    // The backtick at 0 still counts.
    assert_parse_error("`6+`", syntax(Expected::Operand, 4));
    assert_parse_error("× 7", ParseError::InvalidCharacter { character: '×', position: 0 });
}

#[test]
fn empty_expressions() {
    for src in ["", "   ", "\t\n", "``", " `  ` "] {
        assert_parse_error(src, ParseError::Empty);
    }
}

#[test]
fn whitespace_is_ignored() {
    assert_value("  6 \t+\n1 ", 7);
    assert_value("( 3 ) !", 6);
}

#[test]
fn syntax_errors() {
    assert_parse_error("6+", syntax(Expected::Operand, 2));
    assert_parse_error("(6+3", syntax(Expected::ClosingParen, 4));
    assert_parse_error("6 6", syntax(Expected::EndOfInput, 2));
    assert_parse_error("6+3)", syntax(Expected::EndOfInput, 3));
    assert_parse_error("()", syntax(Expected::Operand, 1));
    assert_parse_error("-1", syntax(Expected::Operand, 0));
    assert_parse_error("!3", syntax(Expected::Operand, 0));
    assert_parse_error(")", syntax(Expected::Operand, 0));
    assert_parse_error("2^^3", syntax(Expected::Operand, 2));
    assert_parse_error("(1)(2)", syntax(Expected::EndOfInput, 3));
}

#[test]
fn precedence_and_associativity() {
    assert_value("2+3*4", 14);
    assert_value("(2+3)*4", 20);
    assert_value("2*3^2", 18);
    assert_value("6-3-2", 1);
    assert_value("6/3/2", 1);
    assert_value("2^3^2", 512);
    assert_value("(2^3)^2", 64);
    assert_value("2^3!", 64);
    assert_value("3!^2", 36);
    assert_value("3!!", 720);
    assert_value("6^4 + 5*(3!+2) + 1", 1337);
}

#[test]
fn division_is_exact() {
    assert_eq!(evaluate("3/2"), Ok(Number::from(Rational::new(3, 2).unwrap())));
    assert_value("(3/2)*2", 3);
    assert_value("1/3+1/3+1/3", 1);
    assert_value("(1/2)^(1-3)", 4);
}

#[test]
fn division_by_zero() {
    assert_eq!(evaluate("4/(3-3)"),
               Err(Error::Eval(EvalError::DivisionByZero { position: 1 })));
    assert_eq!(evaluate("1 + 6/(2-2)"),
               Err(Error::Eval(EvalError::DivisionByZero { position: 5 })));
}

#[test]
fn factorial_domain() {
    assert_value("(1-1)!", 1);
    assert_value("(4*5)!", 2_432_902_008_176_640_000);
    assert_domain_error("(3/2)!", DomainError::FactorialOfNonInteger, 5);
    assert_domain_error("(1-2)!", DomainError::FactorialOfNegative, 5);
    assert_domain_error("(5*5)!", DomainError::FactorialTooLarge { max: 20 }, 5);
    assert_domain_error("3!!!", DomainError::FactorialTooLarge { max: 20 }, 3);
    assert_domain_error("(2^(1/2))!", DomainError::FactorialOfNonInteger, 9);
}

#[test]
fn powers() {
    assert_value("2^(1-1)", 1);
    assert_value("(1-1)^(1-1)", 1);
    assert_value("(1-1)^3", 0);
    assert_value("(1-2)^(6*6*6)", 1);
    assert_value("4^(1/2)", 2);
    assert_value("4^(3/2)", 8);
    assert_value("((1-3)^3)^(1/3)", -2);
    assert_value("(4/6)^(1-2)*2", 3);
    assert_domain_error("(1-1)^(1-2)", DomainError::ZeroToNegativePower, 5);
    assert_domain_error("(1-2)^(1/2)", DomainError::NonRealPower, 5);
    assert_domain_error("6^6^6", DomainError::OutOfRange { bound: 1_000_000_000_000 }, 1);
}

#[test]
fn inexact_results() {
    let root = evaluate("2^(1/2)").unwrap();
    assert!(!root.is_exact());
    assert_eq!(root.as_integer(), None);
    assert!((root.as_f64() - std::f64::consts::SQRT_2).abs() < 1e-12);

    // Odd roots of negative bases stay real.
    let cube_root = evaluate("(1-3)^(1/3)").unwrap();
    assert!(!cube_root.is_exact());
    assert!((cube_root.as_f64() + 2f64.cbrt()).abs() < 1e-12);

    // Squaring an inexact root does not make it exact again.
    assert_eq!(evaluate("(2^(1/2))^2").unwrap().as_integer(), None);
}

#[test]
fn overflow_is_an_error() {
    assert_domain_error("(4*5)!*(4*5)!*(4*5)!", DomainError::Overflow, 13);
}

#[test]
fn left_operand_errors_come_first() {
    assert_domain_error("(1-2)! + 4/(3-3)", DomainError::FactorialOfNegative, 5);
    assert_eq!(evaluate("4/(3-3) + (1-2)!"),
               Err(Error::Eval(EvalError::DivisionByZero { position: 1 })));
}

#[test]
fn limits_come_from_the_context() {
    let strict = Context { max_factorial: 5,
                           max_magnitude: 1_000,
                           ..Context::default() };
    assert_eq!(strict.run("5!").unwrap(), Number::from(120));
    assert_eq!(strict.run("6!"),
               Err(Error::Eval(EvalError::Domain { detail:   DomainError::FactorialTooLarge { max: 5 },
                                                   position: 1, })));
    assert_eq!(strict.run("6^4"),
               Err(Error::Eval(EvalError::Domain { detail:   DomainError::OutOfRange { bound: 1_000 },
                                                   position: 1, })));
}

#[test]
fn unique_digit_rule() {
    let unique = Context { unique_digits: true,
                           ..Context::default() };
    assert_eq!(unique.run("6^4 + 5*3 + 4"),
               Err(Error::Parse(ParseError::RepeatedDigit { digit: 4, position: 12 })));
    assert_eq!(unique.run("1+1"),
               Err(Error::Parse(ParseError::RepeatedDigit { digit: 1, position: 2 })));
    assert_eq!(unique.run("6*5-4").unwrap(), Number::from(26));
    assert_value("1+1", 2);
}

#[test]
fn nesting_depth_is_not_limited_by_the_call_stack() {
    let depth = 10_000;
    assert_value(&format!("{}1{}", "(".repeat(depth), ")".repeat(depth)), 1);
    assert_value(&format!("(1-1){}", "!".repeat(depth)), 1);
    assert_value(&vec!["1"; 100_000].join("+"), 100_000);
    assert_value(&vec!["1"; 50_000].join("^"), 1);
    assert_value(&format!("{}6{}", "((6-5)*".repeat(depth), ")".repeat(depth)), 6);

    assert_parse_error(&format!("{}1", "(".repeat(depth)),
                       syntax(Expected::ClosingParen, depth + 1));
    assert_parse_error(&format!("{}1+", "(".repeat(depth)), syntax(Expected::Operand, depth + 2));
    assert_parse_error(&format!("{}1{}", "(".repeat(depth), ")".repeat(depth + 1)),
                       syntax(Expected::EndOfInput, 2 * depth + 1));
    assert_domain_error(&format!("{}(1-2)!{}", "(".repeat(depth), ")".repeat(depth)),
                        DomainError::FactorialOfNegative,
                        depth + 5);
}

#[test]
fn evaluation_is_deterministic() {
    for src in ["6^4 + 5*(3!+2) + 1", "2^(1/2)", "3/2", "4/(3-3)", "7"] {
        assert_eq!(evaluate(src), evaluate(src));
    }
}
