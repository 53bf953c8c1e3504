use std::{sync::Arc, thread};

use sixcount::{
    chat::{self, Command, Incoming},
    config::Settings,
    error::{DomainError, Expected},
    game::{ChannelId, GameHandle, GameRegistry, GameState, HighScore, PlayerId, Rejection, Verdict},
    interpreter::{
        evaluator::core::Context,
        value::{core::Number, rational::Rational},
    },
};

const PREFIXES: [&str; 2] = ["?", "\\"];

fn players() -> (PlayerId, PlayerId, PlayerId) {
    (PlayerId::from("a"), PlayerId::from("b"), PlayerId::from("c"))
}

fn rejected(rejection: Rejection) -> Verdict {
    Verdict::Rejected(rejection)
}

#[test]
fn turn_sequence() {
    let context = Context::default();
    let (a, b, _) = players();
    let mut game = GameState::new();

    assert_eq!(game.submit(&context, &a, "1"), Verdict::Accepted { new_total: 2 });
    assert_eq!(game.submit(&context, &a, "2"), rejected(Rejection::ConsecutiveMove));
    assert_eq!(game.submit(&context, &b, "3-1"), Verdict::Accepted { new_total: 3 });
    assert_eq!(game.submit(&context, &a, "`3`"), Verdict::Accepted { new_total: 4 });
    assert_eq!(game.current_total(), 4);
    assert_eq!(game.last_mover(), Some(&a));
}

#[test]
fn anyone_may_open() {
    let context = Context::default();
    for sender in ["a", "b", "42"] {
        let mut game = GameState::new();
        assert!(game.submit(&context, &PlayerId::from(sender), "(6-5)!").is_accepted());
    }
}

#[test]
fn wrong_value_reports_both_numbers() {
    let context = Context::default();
    let (_, b, c) = players();

    let mut game = GameState::resume(1336, Some(b.clone()));
    assert_eq!(game.submit(&context, &c, "6^4 + 5*(3!+2) + 1"),
               rejected(Rejection::WrongValue { expected: 1336,
                                                got:      1337, }));

    let mut game = GameState::resume(1337, Some(b));
    assert_eq!(game.submit(&context, &c, "6^4 + 5*(3!+2) + 1"),
               Verdict::Accepted { new_total: 1338 });
}

#[test]
fn resume_never_starts_below_one() {
    assert_eq!(GameState::resume(0, None), GameState::new());
}

#[test]
fn inexact_and_fractional_results_are_not_integers() {
    let context = Context::default();
    let (a, _, _) = players();
    let mut game = GameState::new();

    assert_eq!(game.submit(&context, &a, "3/2"),
               rejected(Rejection::NotInteger { value: Number::from(Rational::new(3, 2).unwrap()) }));
    assert!(matches!(game.submit(&context, &a, "2^(1/2)"),
                     Verdict::Rejected(Rejection::NotInteger { value: Number::Inexact(_) })));
    // An inexact value that happens to be whole is still not counted.
    assert!(matches!(game.submit(&context, &a, "(2^(1/2))^2"),
                     Verdict::Rejected(Rejection::NotInteger { .. })));
}

#[test]
fn checks_run_in_order() {
    let context = Context::default();
    let (a, _, _) = players();
    let mut game = GameState::resume(5, Some(a.clone()));

    // Evaluation errors come before the turn rule.
    assert_eq!(game.submit(&context, &a, "7"),
               rejected(Rejection::InvalidCharacter { position:  0,
                                                      character: '7', }));
    assert_eq!(game.submit(&context, &a, "6+"),
               rejected(Rejection::SyntaxError { position: 2,
                                                 expected: Expected::Operand, }));
    assert_eq!(game.submit(&context, &a, "4/(3-3)"),
               rejected(Rejection::DivisionByZero { position: 1 }));
    assert_eq!(game.submit(&context, &a, "(1-2)!"),
               rejected(Rejection::DomainError { position: 5,
                                                 detail:   DomainError::FactorialOfNegative, }));
    // Not an integer comes before the turn rule.
    assert!(matches!(game.submit(&context, &a, "1/2"),
                     Verdict::Rejected(Rejection::NotInteger { .. })));
    // The turn rule comes before the value check.
    assert_eq!(game.submit(&context, &a, "1"), rejected(Rejection::ConsecutiveMove));
    assert_eq!(game.submit(&context, &a, "5"), rejected(Rejection::ConsecutiveMove));
}

#[test]
fn rejections_leave_the_state_alone() {
    let context = Context::default();
    let (a, b, _) = players();
    let mut game = GameState::new();
    assert!(game.submit(&context, &a, "1").is_accepted());
    let before = game.clone();

    for (sender, text) in [(&b, ""),
                           (&b, "0"),
                           (&b, "(6"),
                           (&b, "4/(3-3)"),
                           (&b, "3/2"),
                           (&a, "2"),
                           (&b, "3")]
    {
        assert!(!game.submit(&context, sender, text).is_accepted(), "{text:?} was accepted");
        assert_eq!(game, before);
    }
}

#[test]
fn accepted_moves_advance_by_exactly_one() {
    let context = Context::default();
    let (a, b, _) = players();
    let mut game = GameState::new();

    for turn in 1..=24u64 {
        let sender = if turn % 2 == 0 { &b } else { &a };
        let text = if turn <= 6 {
            turn.to_string()
        } else {
            format!("6*{}+{}", (turn - 1) / 6, (turn - 1) % 6 + 1)
        };
        assert_eq!(game.submit(&context, sender, &text),
                   Verdict::Accepted { new_total: turn + 1 },
                   "turn {turn}: {text}");
        assert_eq!(game.last_mover(), Some(sender));
    }
}

#[test]
fn reset_is_idempotent() {
    let context = Context::default();
    let (a, _, _) = players();
    let mut game = GameState::new();
    assert!(game.submit(&context, &a, "1").is_accepted());

    game.reset();
    let once = game.clone();
    game.reset();
    assert_eq!(game, once);
    assert_eq!(game, GameState::new());
}

#[test]
fn unique_digits_are_enforced_when_enabled() {
    let context = Context { unique_digits: true,
                            ..Context::default() };
    let (a, _, _) = players();
    let mut game = GameState::resume(2, None);

    assert_eq!(game.submit(&context, &a, "1+1"),
               rejected(Rejection::RepeatedDigit { position: 2,
                                                   digit:    1, }));
    assert!(game.submit(&context, &a, "3-1").is_accepted());
}

#[test]
fn high_score_survives_reset() {
    let game = GameHandle::new(Context::default());
    let (a, b, _) = players();
    assert_eq!(game.high_score(), None);

    assert!(game.submit(&a, "1").is_accepted());
    assert!(game.submit(&b, "2").is_accepted());
    assert!(game.submit(&a, "3").is_accepted());
    assert_eq!(game.high_score(),
               Some(HighScore { total:  3,
                                holder: a.clone(), }));

    game.reset();
    assert_eq!(game.state(), GameState::new());
    assert!(game.submit(&b, "1").is_accepted());
    assert_eq!(game.high_score(),
               Some(HighScore { total:  3,
                                holder: a, }));
}

#[test]
fn concurrent_submissions_accept_exactly_one() {
    let game = GameHandle::new(Context::default());

    let verdicts: Vec<Verdict> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8u64).map(|id| {
                                           let game = game.clone();
                                           scope.spawn(move || game.submit(&PlayerId::from(id), "1"))
                                       })
                                       .collect();
        handles.into_iter()
               .map(|handle| handle.join().unwrap())
               .collect()
    });

    assert_eq!(verdicts.iter().filter(|v| v.is_accepted()).count(), 1);
    for verdict in verdicts.iter().filter(|v| !v.is_accepted()) {
        assert_eq!(verdict,
                   &rejected(Rejection::WrongValue { expected: 2,
                                                     got:      1, }));
    }
    assert_eq!(game.state().current_total(), 2);
}

#[test]
fn registry_keeps_channels_apart() {
    let registry = Arc::new(GameRegistry::new(Context::default()));
    let (a, _, _) = players();
    assert!(registry.is_empty());

    assert!(registry.game(ChannelId(1)).submit(&a, "1").is_accepted());
    assert_eq!(registry.game(ChannelId(1)).state().current_total(), 2);
    assert_eq!(registry.game(ChannelId(2)).state().current_total(), 1);
    assert!(registry.game(ChannelId(2)).submit(&a, "1").is_accepted());
    assert_eq!(registry.len(), 2);

    thread::scope(|scope| {
        for channel in 3..7 {
            let registry = Arc::clone(&registry);
            scope.spawn(move || {
                     assert!(registry.game(ChannelId(channel))
                                     .submit(&PlayerId::from(channel), "1")
                                     .is_accepted());
                 });
        }
    });
    assert_eq!(registry.len(), 6);
}

#[test]
fn classify_messages() {
    assert_eq!(chat::classify("?rules", &PREFIXES), Incoming::Command(Command::Rules));
    assert_eq!(chat::classify(" ?help ", &PREFIXES), Incoming::Command(Command::Rules));
    assert_eq!(chat::classify("?highscore", &PREFIXES), Incoming::Command(Command::HighScore));
    assert_eq!(chat::classify("?reset", &PREFIXES), Incoming::Command(Command::Reset));
    assert_eq!(chat::classify("? what", &PREFIXES), Incoming::Ignored);
    assert_eq!(chat::classify("\\ 3-2", &PREFIXES), Incoming::Ignored);
    assert_eq!(chat::classify("   ", &PREFIXES), Incoming::Ignored);
    assert_eq!(chat::classify("3-2", &PREFIXES), Incoming::Submission("3-2"));
    assert_eq!(chat::classify("\\ 3-2", &[] as &[&str]), Incoming::Submission("\\ 3-2"));
}

#[test]
fn respond_to_chat() {
    let game = GameHandle::new(Context::default());
    let (a, b, _) = players();

    assert_eq!(chat::respond(&game, &PREFIXES, &a, "?rules"),
               Some(chat::render_rules(&PREFIXES, false)));
    assert_eq!(chat::respond(&game, &PREFIXES, &a, "\\ not a move"), None);
    assert_eq!(chat::respond(&game, &PREFIXES, &a, "?highscore").as_deref(),
               Some("No high score yet: `0`. Just start counting."));

    assert_eq!(chat::respond(&game, &PREFIXES, &a, "`1`").as_deref(),
               Some("✅ 1. Next up: `2`."));
    assert_eq!(chat::respond(&game, &PREFIXES, &a, "2").as_deref(),
               Some("❌ Nobody may count twice in a row."));
    assert_eq!(chat::respond(&game, &PREFIXES, &b, "7").as_deref(),
               Some("❌ Invalid character '7' at position 0."));
    assert_eq!(chat::respond(&game, &PREFIXES, &b, "?highscore").as_deref(),
               Some("High score: `1`, reached by a."));

    assert!(chat::respond(&game, &PREFIXES, &b, "?reset").is_some());
    assert_eq!(game.state(), GameState::new());
}

#[test]
fn rules_follow_the_configured_game() {
    let strict = GameHandle::new(Context { unique_digits: true,
                                           ..Context::default() });
    let rules = chat::respond(&strict, &["!", "//", "#"], &PlayerId::from("a"), "?help").unwrap();

    assert!(rules.starts_with("Rules\n1. Count upwards together"));
    assert!(rules.contains("Each digit may be used at most once per expression."));
    assert!(rules.contains("Messages starting with !, // or # are not evaluated."));
    assert!(!rules.contains("starting with ?"));

    let relaxed = chat::render_rules(&["?"], false);
    assert!(relaxed.contains("Messages starting with ? are not evaluated."));
    assert!(!relaxed.contains("at most once"));
}

#[test]
fn counting_stops_at_the_largest_total() {
    let context = Context::default();
    let (_, b, c) = players();
    let two_to_the_64 = "(2^(4*(4+4)))*(2^(4*(4+4)))";

    let mut game = GameState::resume(u64::MAX - 1, Some(b.clone()));
    assert_eq!(game.submit(&context, &c, &format!("{two_to_the_64}-2")),
               Verdict::Accepted { new_total: u64::MAX });

    let before = game.clone();
    assert_eq!(game.submit(&context, &b, &format!("{two_to_the_64}-1")),
               rejected(Rejection::CountExhausted { total: u64::MAX }));
    assert_eq!(game, before);
}

#[test]
fn deeply_nested_moves_are_judged_like_any_other() {
    let game = GameHandle::new(Context::default());
    let (a, b, _) = players();
    let depth = 5_000;

    assert!(game.submit(&a, "1").is_accepted());
    let nested = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(game.submit(&b, &nested),
               rejected(Rejection::WrongValue { expected: 2,
                                                got:      1, }));
    let unclosed = format!("{}2", "(".repeat(depth));
    assert_eq!(game.submit(&b, &unclosed),
               rejected(Rejection::SyntaxError { position: depth + 1,
                                                 expected: Expected::ClosingParen, }));
    assert!(game.submit(&b, &format!("{}2{}", "(".repeat(depth), ")".repeat(depth))).is_accepted());
    assert!(game.submit(&a, "3").is_accepted());
}

#[test]
fn settings_from_toml() {
    let toml = r#"
[limits]
max_factorial = 10

[rules]
unique_digits = true

[chat]
reserved_prefixes = ["!"]
"#;
    let settings = Settings::from_toml_str(toml).unwrap();

    assert_eq!(settings.limits.max_factorial, 10);
    assert_eq!(settings.limits.max_magnitude, 1_000_000_000_000);
    assert_eq!(settings.chat.reserved_prefixes, vec!["!".to_string()]);
    assert_eq!(settings.context(),
               Context { max_factorial: 10,
                         max_magnitude: 1_000_000_000_000,
                         unique_digits: true, });
}

#[test]
fn settings_defaults_and_errors() {
    assert_eq!(Settings::from_toml_str("").unwrap(), Settings::default());
    assert_eq!(Settings::default().context(), Context::default());
    assert!(Settings::from_toml_str("[limits]\nmax_factorial = \"many\"").is_err());
    assert!(Settings::from_toml_str("[rules]\nunknown = 1").is_err());
    assert!(Settings::from_file("does/not/exist.toml").is_err());
}
