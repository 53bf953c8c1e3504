use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tracing::{debug, info, instrument};

use crate::{
    game::{
        state::{GameState, PlayerId},
        verdict::Verdict,
    },
    interpreter::evaluator::core::Context,
};

/// Identifies the chat channel a game is played in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(pub u64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The best total a channel has reached and who reached it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScore {
    /// The highest value accepted as a move.
    pub total:  u64,
    /// The sender of that move.
    pub holder: PlayerId,
}

/// Everything one channel keeps between messages.
///
/// The high score sits beside the game state rather than inside it, so an
/// accepted move still changes nothing but the total and the last mover.
#[derive(Debug, Default)]
struct Channel {
    state:      GameState,
    high_score: Option<HighScore>,
}

/// A shared, lock-guarded handle to one channel's game.
///
/// Cloning the handle shares the game. Each `submit` holds the lock from
/// evaluation to state update, so two senders can never both be accepted
/// against the same total.
#[derive(Debug, Clone)]
pub struct GameHandle {
    channel: Arc<Mutex<Channel>>,
    context: Context,
}

impl GameHandle {
    /// A new game evaluated with `context`.
    #[must_use]
    pub fn new(context: Context) -> Self {
        Self { channel: Arc::new(Mutex::new(Channel::default())),
               context }
    }

    // State is only written after every check has passed, so a panic while
    // the lock is held cannot leave it half-updated.
    fn lock(&self) -> MutexGuard<'_, Channel> {
        self.channel.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Submits a move and updates the high score if it was beaten.
    #[instrument(skip(self))]
    pub fn submit(&self, sender: &PlayerId, text: &str) -> Verdict {
        let mut channel = self.lock();
        let verdict = channel.state.submit(&self.context, sender, text);
        if let Verdict::Accepted { new_total } = verdict {
            let reached = new_total - 1;
            if channel.high_score.as_ref().is_none_or(|best| reached > best.total) {
                info!(reached, holder = %sender, "New high score");
                channel.high_score = Some(HighScore { total:  reached,
                                                      holder: sender.clone(), });
            }
        }
        verdict
    }

    /// Replaces the game with a fresh one. The high score is kept.
    pub fn reset(&self) {
        debug!("Resetting game");
        self.lock().state.reset();
    }

    /// A snapshot of the current game state.
    #[must_use]
    pub fn state(&self) -> GameState {
        self.lock().state.clone()
    }

    #[must_use]
    pub fn high_score(&self) -> Option<HighScore> {
        self.lock().high_score.clone()
    }

    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.context
    }
}

/// All running games, one per channel.
///
/// Games are created on first use. The registry lock is only held long
/// enough to look up or insert a handle; moves lock their own channel, so
/// different channels proceed in parallel.
#[derive(Debug)]
pub struct GameRegistry {
    games:   Mutex<HashMap<ChannelId, GameHandle>>,
    context: Context,
}

impl GameRegistry {
    #[must_use]
    pub fn new(context: Context) -> Self {
        Self { games: Mutex::new(HashMap::new()),
               context }
    }

    /// The game for `channel`, created fresh if none exists yet.
    #[instrument(skip(self))]
    pub fn game(&self, channel: ChannelId) -> GameHandle {
        let mut games = self.games.lock().unwrap_or_else(PoisonError::into_inner);
        games.entry(channel)
             .or_insert_with(|| {
                 debug!("Starting new game");
                 GameHandle::new(self.context)
             })
             .clone()
    }

    /// Number of channels with a game.
    #[must_use]
    pub fn len(&self) -> usize {
        self.games.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
