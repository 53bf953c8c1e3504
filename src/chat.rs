//! The boundary between a chat platform and the game.
//!
//! Decides which messages are moves, answers the handful of `?` commands,
//! and renders verdicts as one-line replies.

use tracing::debug;

use crate::game::{GameHandle, HighScore, PlayerId, Verdict};

/// A recognized `?` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `?rules` or `?help`
    Rules,
    /// `?highscore`
    HighScore,
    /// `?reset`
    Reset,
}

/// What a chat message amounts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Incoming<'a> {
    /// Not for the game: blank, or starting with a reserved prefix.
    Ignored,
    /// A command to answer.
    Command(Command),
    /// A move to evaluate.
    Submission(&'a str),
}

/// Classifies a raw chat message.
///
/// Blank messages (an attachment with no text, for instance) are ignored
/// rather than counted as empty expressions.
///
/// # Example
/// ```
/// use sixcount::chat::{Command, Incoming, classify};
///
/// let prefixes = ["?", "\\"];
/// assert_eq!(classify("?rules", &prefixes), Incoming::Command(Command::Rules));
/// assert_eq!(classify("\\ just talking", &prefixes), Incoming::Ignored);
/// assert_eq!(classify("`3-2`", &prefixes), Incoming::Submission("`3-2`"));
/// ```
#[must_use]
pub fn classify<'a, S: AsRef<str>>(text: &'a str, reserved_prefixes: &[S]) -> Incoming<'a> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Incoming::Ignored;
    }
    match trimmed {
        "?rules" | "?help" => Incoming::Command(Command::Rules),
        "?highscore" => Incoming::Command(Command::HighScore),
        "?reset" => Incoming::Command(Command::Reset),
        _ if reserved_prefixes.iter()
                              .map(AsRef::as_ref)
                              .any(|prefix| !prefix.is_empty() && trimmed.starts_with(prefix)) =>
        {
            Incoming::Ignored
        },
        _ => Incoming::Submission(text),
    }
}

/// Handles one chat message against a game.
///
/// # Returns
/// The reply to post, or `None` if the message should be ignored.
pub fn respond<S: AsRef<str>>(game: &GameHandle,
                              reserved_prefixes: &[S],
                              sender: &PlayerId,
                              text: &str)
                              -> Option<String> {
    match classify(text, reserved_prefixes) {
        Incoming::Ignored => None,
        Incoming::Command(Command::Rules) => {
            Some(render_rules(reserved_prefixes, game.context().unique_digits))
        },
        Incoming::Command(Command::HighScore) => {
            Some(render_high_score(game.high_score().as_ref()))
        },
        Incoming::Command(Command::Reset) => {
            debug!(%sender, "Reset requested");
            game.reset();
            Some("Game reset. Start again at `1`.".to_string())
        },
        Incoming::Submission(expression) => Some(render_verdict(&game.submit(sender, expression))),
    }
}

/// Reply to `?rules` and `?help`, describing the rules actually in force.
///
/// # Example
/// ```
/// use sixcount::chat::render_rules;
///
/// let rules = render_rules(&["?", "\\"], true);
/// assert!(rules.contains("Messages starting with ? or \\ are not evaluated."));
/// assert!(rules.contains("at most once"));
/// assert!(!render_rules::<&str>(&[], false).contains("Messages starting with"));
/// ```
#[must_use]
pub fn render_rules<S: AsRef<str>>(reserved_prefixes: &[S], unique_digits: bool) -> String {
    let mut rules = vec!["Count upwards together, starting at 1.".to_string(),
                         "Count by sending a math expression that equals the next number.".to_string(),
                         "The only operands are the digits 1 to 6.".to_string()];
    if unique_digits {
        rules.push("Each digit may be used at most once per expression.".to_string());
    }
    rules.push("The only operators are + - * / ^ ! and parentheses ( ).".to_string());
    let prefixes: Vec<&str> = reserved_prefixes.iter()
                                               .map(AsRef::as_ref)
                                               .filter(|prefix| !prefix.is_empty())
                                               .collect();
    if let Some((last, rest)) = prefixes.split_last() {
        let listed = if rest.is_empty() {
            (*last).to_string()
        } else {
            format!("{} or {last}", rest.join(", "))
        };
        rules.push(format!("Messages starting with {listed} are not evaluated."));
    }
    rules.push("A message may be wrapped in backticks (`).".to_string());
    rules.push("Nobody may count twice in a row.".to_string());
    rules.push("Type ?rules to see these rules again.".to_string());

    let numbered: Vec<String> = rules.iter()
                                     .enumerate()
                                     .map(|(i, rule)| format!("{}. {rule}", i + 1))
                                     .collect();
    format!("Rules\n{}", numbered.join("\n"))
}

/// One-line reply for a verdict.
///
/// # Example
/// ```
/// use sixcount::{
///     chat::render_verdict,
///     game::{Rejection, Verdict},
/// };
///
/// assert_eq!(render_verdict(&Verdict::Accepted { new_total: 3 }),
///            "✅ 2. Next up: `3`.");
/// assert_eq!(render_verdict(&Verdict::Rejected(Rejection::WrongValue { expected: 3,
///                                                                       got:      4, })),
///            "❌ Expected 3, but the expression is 4.");
/// ```
#[must_use]
pub fn render_verdict(verdict: &Verdict) -> String {
    match verdict {
        Verdict::Accepted { new_total } => {
            format!("✅ {}. Next up: `{new_total}`.", new_total - 1)
        },
        Verdict::Rejected(rejection) => format!("❌ {rejection}"),
    }
}

/// Reply to `?highscore`.
#[must_use]
pub fn render_high_score(high_score: Option<&HighScore>) -> String {
    match high_score {
        Some(HighScore { total, holder }) => format!("High score: `{total}`, reached by {holder}."),
        None => "No high score yet: `0`. Just start counting.".to_string(),
    }
}
