//! Learning mode and speed training.
//!
//! Both grade player decisions against [`basic_strategy`](crate::basic_strategy).
//! Learning mode keeps a log of mistakes. Speed training times each decision
//! and scores it.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::strategy::{PlayerAction, StrategyDecision};

/// Consecutive fast, correct decisions needed to move up a level.
pub const LEVEL_UP_STREAK: u32 = 5;

/// The last graded decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastDecision {
    /// What the player did.
    pub action: PlayerAction,
    /// Whether it matched basic strategy.
    pub was_correct: bool,
    /// What basic strategy recommended.
    pub optimal_action: PlayerAction,
}

/// A decision that did not match basic strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MistakeRecord {
    /// The player's cards, e.g. `"10♠, 6♥"`.
    pub hand_description: String,
    /// The dealer's up card, e.g. `"A♣"`.
    pub dealer_up_card: String,
    /// What basic strategy recommended.
    pub optimal_action: PlayerAction,
    /// What the player did.
    pub player_action: PlayerAction,
    /// When it happened (ms).
    pub timestamp: u64,
}

/// Learning-mode progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearningModeState {
    /// Advice for the current decision point, if any.
    pub current_strategy: Option<StrategyDecision>,
    /// Logged mistakes, oldest first.
    pub mistakes: Vec<MistakeRecord>,
    /// Decisions that matched basic strategy.
    pub correct_decisions: u64,
    /// Decisions graded.
    pub total_decisions: u64,
    /// Current run of correct decisions.
    pub correct_streak: u32,
    /// The most recent graded decision.
    pub last_decision: Option<LastDecision>,
}

impl LearningModeState {
    /// Grades `taken` against `optimal` and logs a mistake on mismatch.
    ///
    /// Returns whether the decision was correct.
    pub fn record(
        &mut self,
        hand: &[Card],
        dealer_up: Card,
        optimal: PlayerAction,
        taken: PlayerAction,
        now: u64,
    ) -> bool {
        let correct = optimal == taken;
        self.total_decisions += 1;
        if correct {
            self.correct_decisions += 1;
            self.correct_streak += 1;
        } else {
            self.correct_streak = 0;
            self.mistakes.push(MistakeRecord {
                hand_description: describe_cards(hand),
                dealer_up_card: format!("{dealer_up}"),
                optimal_action: optimal,
                player_action: taken,
                timestamp: now,
            });
        }
        self.last_decision = Some(LastDecision {
            action: taken,
            was_correct: correct,
            optimal_action: optimal,
        });
        correct
    }

    /// Share of correct decisions, in percent.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "decision counts are far below f64 precision limits"
    )]
    pub fn accuracy(&self) -> f64 {
        if self.total_decisions == 0 {
            return 0.0;
        }
        self.correct_decisions as f64 / self.total_decisions as f64 * 100.0
    }

    /// Clears the mistake log and the counters. The current hint is kept.
    pub fn clear(&mut self) {
        *self = Self {
            current_strategy: self.current_strategy.take(),
            ..Self::default()
        };
    }
}

fn describe_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|card| format!("{card}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Speed-training difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    /// 10 seconds per decision.
    #[default]
    Beginner,
    /// 7 seconds per decision.
    Intermediate,
    /// 5 seconds per decision.
    Advanced,
    /// 3 seconds per decision.
    Expert,
}

impl DifficultyLevel {
    /// Time allowed per decision, in milliseconds.
    #[must_use]
    pub const fn time_limit_ms(self) -> u64 {
        match self {
            Self::Beginner => 10_000,
            Self::Intermediate => 7_000,
            Self::Advanced => 5_000,
            Self::Expert => 3_000,
        }
    }

    /// Score multiplier for a correct decision.
    #[must_use]
    pub const fn multiplier(self) -> u64 {
        match self {
            Self::Beginner => 1,
            Self::Intermediate => 2,
            Self::Advanced => 3,
            Self::Expert => 4,
        }
    }

    /// The next level up, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Beginner => Some(Self::Intermediate),
            Self::Intermediate => Some(Self::Advanced),
            Self::Advanced => Some(Self::Expert),
            Self::Expert => None,
        }
    }
}

/// Targets for a speed-training session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpeedTrainingGoal {
    /// Rounds to play.
    pub hands_target: u32,
    /// Accuracy to reach, in percent.
    pub accuracy_target: f64,
    /// Average decision time to beat, in milliseconds.
    pub speed_target: u64,
}

impl Default for SpeedTrainingGoal {
    fn default() -> Self {
        Self {
            hands_target: 20,
            accuracy_target: 90.0,
            speed_target: 5_000,
        }
    }
}

/// A timed decision: a player action or a timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[expect(missing_docs, reason = "mirrors PlayerAction")]
pub enum DecisionAction {
    Hit,
    Stand,
    Double,
    Split,
    Surrender,
    Timeout,
}

impl From<PlayerAction> for DecisionAction {
    fn from(action: PlayerAction) -> Self {
        match action {
            PlayerAction::Hit => Self::Hit,
            PlayerAction::Stand => Self::Stand,
            PlayerAction::Double => Self::Double,
            PlayerAction::Split => Self::Split,
            PlayerAction::Surrender => Self::Surrender,
        }
    }
}

/// One graded, timed decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedDecision {
    /// What the player did.
    pub action: DecisionAction,
    /// What basic strategy recommended.
    pub optimal_action: PlayerAction,
    /// Whether the decision was correct.
    pub correct: bool,
    /// Time taken, in milliseconds.
    pub time_ms: u64,
    /// When the decision was made (ms).
    pub timestamp: u64,
    /// Points earned.
    pub points: u64,
}

/// A speed-training session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedTrainingSession {
    /// When the session started (ms).
    pub start_time: u64,
    /// When the session ended, once it has.
    pub end_time: Option<u64>,
    /// Difficulty the session started at.
    pub starting_difficulty: DifficultyLevel,
    /// Current difficulty.
    pub difficulty: DifficultyLevel,
    /// Session targets.
    pub goal: SpeedTrainingGoal,
    /// Every graded decision, oldest first.
    pub decisions: Vec<SpeedDecision>,
    /// Rounds settled during the session.
    pub hands_played: u32,
    /// Correct decisions.
    pub correct_decisions: u32,
    /// Graded decisions.
    pub total_decisions: u32,
    /// Mean decision time (ms).
    pub average_decision_time: u64,
    /// Fastest non-timeout decision (ms).
    pub fastest_decision: Option<u64>,
    /// Slowest decision (ms).
    pub slowest_decision: u64,
    /// Accumulated points.
    pub score: u64,
    /// Current run of fast, correct decisions.
    pub fast_streak: u32,
}

impl SpeedTrainingSession {
    /// Starts a session.
    #[must_use]
    pub const fn new(difficulty: DifficultyLevel, goal: SpeedTrainingGoal, now: u64) -> Self {
        Self {
            start_time: now,
            end_time: None,
            starting_difficulty: difficulty,
            difficulty,
            goal,
            decisions: Vec::new(),
            hands_played: 0,
            correct_decisions: 0,
            total_decisions: 0,
            average_decision_time: 0,
            fastest_decision: None,
            slowest_decision: 0,
            score: 0,
            fast_streak: 0,
        }
    }

    /// Share of correct decisions, in percent.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.total_decisions == 0 {
            return 0.0;
        }
        f64::from(self.correct_decisions) / f64::from(self.total_decisions) * 100.0
    }

    /// Returns whether the hands target has been reached.
    #[must_use]
    pub const fn is_target_reached(&self) -> bool {
        self.hands_played >= self.goal.hands_target
    }

    /// Returns whether the accuracy and speed targets were met.
    #[must_use]
    pub fn met_goals(&self) -> bool {
        self.accuracy() >= self.goal.accuracy_target
            && self.total_decisions > 0
            && self.average_decision_time <= self.goal.speed_target
    }

    fn record(
        &mut self,
        action: DecisionAction,
        optimal: PlayerAction,
        elapsed_ms: u64,
        now: u64,
    ) -> SpeedDecision {
        let limit = self.difficulty.time_limit_ms();
        let timed_out = action == DecisionAction::Timeout;
        let time_ms = if timed_out { limit } else { elapsed_ms };
        let correct = !timed_out && action == DecisionAction::from(optimal);

        let points = if correct {
            100 * self.difficulty.multiplier() + limit.saturating_sub(time_ms) / 100
        } else {
            0
        };

        let decision = SpeedDecision {
            action,
            optimal_action: optimal,
            correct,
            time_ms,
            timestamp: now,
            points,
        };

        let previous_total = u64::from(self.total_decisions);
        self.total_decisions += 1;
        self.correct_decisions += u32::from(correct);
        self.score += points;
        self.average_decision_time =
            (self.average_decision_time * previous_total + time_ms) / u64::from(self.total_decisions);
        self.slowest_decision = self.slowest_decision.max(time_ms);
        if !timed_out {
            self.fastest_decision = Some(
                self.fastest_decision
                    .map_or(time_ms, |fastest| fastest.min(time_ms)),
            );
        }

        if correct && time_ms <= limit / 2 {
            self.fast_streak += 1;
            if self.fast_streak >= LEVEL_UP_STREAK {
                if let Some(next) = self.difficulty.next() {
                    self.difficulty = next;
                }
                self.fast_streak = 0;
            }
        } else {
            self.fast_streak = 0;
        }

        self.decisions.push(decision);
        decision
    }
}

/// Speed-training state: the running session, if any, and finished ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpeedTrainingState {
    /// The running session.
    pub current_session: Option<SpeedTrainingSession>,
    /// Finished sessions, oldest first.
    pub session_history: Vec<SpeedTrainingSession>,
    /// When the pending decision was offered (ms).
    pub decision_started_at: Option<u64>,
}

impl SpeedTrainingState {
    /// Returns whether a session is running.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.current_session.is_some()
    }

    /// Starts a new session, discarding any running one.
    pub fn start(&mut self, difficulty: DifficultyLevel, goal: SpeedTrainingGoal, now: u64) {
        self.current_session = Some(SpeedTrainingSession::new(difficulty, goal, now));
        self.decision_started_at = None;
    }

    /// Ends the running session and archives it.
    ///
    /// Returns the difficulty it ended at, if it graded any decision.
    pub fn stop(&mut self, now: u64) -> Option<DifficultyLevel> {
        self.decision_started_at = None;
        let mut session = self.current_session.take()?;
        session.end_time = Some(now);
        let finished = (session.total_decisions > 0).then_some(session.difficulty);
        self.session_history.push(session);
        finished
    }

    /// Starts the decision timer unless one is already running.
    pub const fn start_timer(&mut self, now: u64) {
        if self.current_session.is_some() && self.decision_started_at.is_none() {
            self.decision_started_at = Some(now);
        }
    }

    /// Clears the decision timer.
    pub const fn clear_timer(&mut self) {
        self.decision_started_at = None;
    }

    /// Grades a decision against `optimal` and restarts the timer.
    pub fn record_decision(
        &mut self,
        action: DecisionAction,
        optimal: PlayerAction,
        now: u64,
    ) -> Option<SpeedDecision> {
        let started = self.decision_started_at.take().unwrap_or(now);
        let session = self.current_session.as_mut()?;
        Some(session.record(action, optimal, now.saturating_sub(started), now))
    }

    /// Counts a settled round.
    ///
    /// Returns the final difficulty if this round completed the session.
    pub fn record_round(&mut self, now: u64) -> Option<DifficultyLevel> {
        let session = self.current_session.as_mut()?;
        session.hands_played += 1;
        if session.is_target_reached() {
            return self.stop(now);
        }
        None
    }
}
