//! Round phases.

use serde::{Deserialize, Serialize};

/// Where the round stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Accepting the bet for the next round.
    Betting,
    /// Bet placed, waiting for the initial deal.
    Dealing,
    /// Waiting for player decisions (and possibly insurance).
    PlayerTurn,
    /// Player hands are finished; the dealer plays next.
    DealerTurn,
    /// Round settled.
    GameOver,
}

impl Phase {
    /// Returns whether no round is in progress.
    #[must_use]
    pub const fn is_between_rounds(self) -> bool {
        matches!(self, Self::Betting | Self::GameOver)
    }
}
