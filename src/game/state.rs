use std::fmt;

use tracing::{debug, info, instrument};

use crate::{
    error::Error,
    game::verdict::{Rejection, Verdict},
    interpreter::{evaluator::core::Context, value::core::Number},
};

/// An opaque participant identifier, compared only for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerId(String);

impl PlayerId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for PlayerId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The state of one counting game.
///
/// `current_total` is the value the next move has to produce. It starts at
/// `1` and only ever grows by exactly one per accepted move, which is also
/// the only time `last_mover` changes. A rejected submission leaves the
/// state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    current_total: u64,
    last_mover:    Option<PlayerId>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// A fresh game: the next move must produce `1`, anyone may start.
    #[must_use]
    pub const fn new() -> Self {
        Self { current_total: 1,
               last_mover:    None, }
    }

    /// Restores a game that was saved elsewhere.
    ///
    /// A `current_total` of `0` is raised to `1`.
    #[must_use]
    pub fn resume(current_total: u64, last_mover: Option<PlayerId>) -> Self {
        Self { current_total: current_total.max(1),
               last_mover }
    }

    #[must_use]
    pub const fn current_total(&self) -> u64 {
        self.current_total
    }

    #[must_use]
    pub const fn last_mover(&self) -> Option<&PlayerId> {
        self.last_mover.as_ref()
    }

    /// Starts over. Resetting twice is the same as resetting once.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Processes one submission.
    ///
    /// The checks run in a fixed order: the expression must evaluate, the
    /// result must be an exact integer, the sender must not have made the
    /// previous accepted move, and the value must equal `current_total`.
    /// The first failing check is the rejection reason. Only when all pass
    /// does the state advance; a total that cannot grow any further is
    /// rejected as exhausted rather than wrapped.
    ///
    /// # Parameters
    /// - `context`: Evaluation limits and rules.
    /// - `sender`: Who sent the message.
    /// - `text`: The raw expression text.
    ///
    /// # Example
    /// ```
    /// use sixcount::{
    ///     game::{GameState, PlayerId, Rejection, Verdict},
    ///     interpreter::evaluator::core::Context,
    /// };
    ///
    /// let context = Context::default();
    /// let mut game = GameState::new();
    /// let (a, b) = (PlayerId::from("a"), PlayerId::from("b"));
    ///
    /// assert_eq!(game.submit(&context, &a, "1"), Verdict::Accepted { new_total: 2 });
    /// assert_eq!(game.submit(&context, &a, "2"),
    ///            Verdict::Rejected(Rejection::ConsecutiveMove));
    /// assert_eq!(game.submit(&context, &b, "2"), Verdict::Accepted { new_total: 3 });
    /// ```
    #[instrument(skip(self, context), fields(expected = self.current_total))]
    pub fn submit(&mut self, context: &Context, sender: &PlayerId, text: &str) -> Verdict {
        match self.check(sender, context.run(text)) {
            Ok(next_total) => {
                self.current_total = next_total;
                self.last_mover = Some(sender.clone());
                info!(new_total = self.current_total, "Move accepted");
                Verdict::Accepted { new_total: self.current_total }
            },
            Err(rejection) => {
                debug!(%rejection, "Move rejected");
                Verdict::Rejected(rejection)
            },
        }
    }

    fn check(&self, sender: &PlayerId, outcome: Result<Number, Error>) -> Result<u64, Rejection> {
        let value = outcome?;
        let got = value.as_integer()
                       .ok_or(Rejection::NotInteger { value })?;
        if self.last_mover.as_ref() == Some(sender) {
            return Err(Rejection::ConsecutiveMove);
        }
        if got != i128::from(self.current_total) {
            return Err(Rejection::WrongValue { expected: self.current_total,
                                               got });
        }
        self.current_total.checked_add(1)
                          .ok_or(Rejection::CountExhausted { total: self.current_total })
    }
}
