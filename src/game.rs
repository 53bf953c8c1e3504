/// The turn-state machine.
///
/// Holds the next total to reach and the last successful mover, and turns a
/// `(sender, text)` submission into a verdict.
pub mod state;
/// Verdicts and rejection reasons.
///
/// Every rejection carries enough detail (position, expected construct,
/// expected and actual value) to be rendered without re-evaluating.
pub mod verdict;
/// Per-channel games behind locks.
///
/// Submissions to one channel are serialized; channels are independent.
pub mod registry;

pub use registry::{ChannelId, GameHandle, GameRegistry, HighScore};
pub use state::{GameState, PlayerId};
pub use verdict::{Rejection, Verdict};
