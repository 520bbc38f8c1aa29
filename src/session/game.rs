//! The game session aggregate.
//!
//! Owns both players, the shared dice, the turn state, and the log. Every
//! public operation either applies one complete transition and returns a
//! snapshot, or returns a `GameError` and leaves the session untouched.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::GameError;
use super::log::{GameLog, LogEntry, LogKind};
use super::player::Player;
use super::report::{action_report, TurnOutcome};
use crate::dice::{DiceSet, DiceSource};
use crate::policy::{choose_keep, decide, dice_for_next_roll, Decision, PolicyContext};
use crate::rules::{MIN_SCORE_TO_GET_ON_BOARD, WINNING_SCORE};
use crate::turn::{self, BankOutcome, Phase, TurnError, TurnState, TurnStep};

/// Full observable state after an operation, for broadcast to observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub players: [Player; 2],
    pub dice: DiceSet,
    pub turn_score: u32,
    pub current_player_index: usize,
    pub phase: Phase,
    pub step: TurnStep,
    pub winner: Option<usize>,
    /// Faces shown by the most recent roll. Survives the dice reset that
    /// follows a forfeit.
    pub last_roll: Vec<u8>,
    /// Log entries appended by the operation that produced this snapshot,
    /// oldest first.
    pub events: Vec<LogEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    players: [Player; 2],
    dice: DiceSet,
    turn: TurnState,
    log: GameLog,
    winner: Option<usize>,
    last_roll: Vec<u8>,
}

impl Default for GameSession {
    fn default() -> Self {
        GameSession::new()
    }
}

impl GameSession {
    /// Creates a session that has not started yet.
    pub fn new() -> Self {
        let mut log = GameLog::new();
        log.push(LogKind::NewGame, None, "A new crusade for glory awaits.");
        GameSession {
            players: [Player::human(), Player::opponent()],
            dice: DiceSet::fresh(),
            turn: TurnState::not_started(),
            log,
            winner: None,
            last_roll: Vec::new(),
        }
    }

    /// Creates a session with the first turn already under way.
    pub fn new_game() -> Self {
        let mut session = GameSession::new();
        session.start_new_game();
        session
    }

    /// Resets everything and starts the first turn with the human to act.
    pub fn start_new_game(&mut self) -> Snapshot {
        self.players = [Player::human(), Player::opponent()];
        self.dice = DiceSet::fresh();
        self.turn = TurnState::first_turn();
        self.winner = None;
        self.last_roll.clear();
        self.log = GameLog::new();
        self.log.push(LogKind::NewGame, None, "A new crusade for glory awaits.");
        self.announce_turn();
        info!("new game started");
        self.snapshot_since(0)
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn dice(&self) -> &DiceSet {
        &self.dice
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn phase(&self) -> Phase {
        self.turn.phase
    }

    pub fn log(&self) -> &GameLog {
        &self.log
    }

    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.turn.current_player_index]
    }

    /// Captures the current state with the latest log entry.
    pub fn snapshot(&self) -> Snapshot {
        let latest = self.log.last().map_or(0, |e| e.seq - 1);
        self.snapshot_since(latest)
    }

    /// Captures the current state with every log entry after `seq`.
    fn snapshot_since(&self, seq: u64) -> Snapshot {
        Snapshot {
            players: self.players.clone(),
            dice: self.dice.clone(),
            turn_score: self.turn.turn_score,
            current_player_index: self.turn.current_player_index,
            phase: self.turn.phase,
            step: self.turn.step,
            winner: self.winner,
            last_roll: self.last_roll.clone(),
            events: self.log.since(seq).to_vec(),
        }
    }

    /// Rolls the unlocked dice for the human player.
    ///
    /// A roll with nothing to keep forfeits the turn and passes the dice.
    pub fn roll<S: DiceSource + ?Sized>(&mut self, source: &mut S) -> Result<Snapshot, GameError> {
        self.expect_phase(Phase::PlayerTurn)?;
        let mark = self.log_mark();
        self.roll_and_classify(source)?;
        Ok(self.snapshot_since(mark))
    }

    /// Toggles the selection of a die.
    ///
    /// Locked and non-scoring dice are ignored.
    pub fn toggle_select(&mut self, die_id: u8) -> Result<Snapshot, GameError> {
        self.expect_phase(Phase::PlayerTurn)?;
        let mark = self.log_mark();
        let seat = self.turn.current_player_index;
        let die = self.dice.get_mut(die_id).ok_or(GameError::UnknownDie(die_id))?;
        if !die.is_selectable() {
            return Ok(self.snapshot_since(mark));
        }
        die.is_selected = !die.is_selected;
        let (kind, verb) = if die.is_selected {
            (LogKind::Select, "selected")
        } else {
            (LogKind::Deselect, "released")
        };
        let message = format!("Die {} showing {} {}.", die.id, die.value, verb);
        self.log.push(kind, Some(seat), message);
        Ok(self.snapshot_since(mark))
    }

    /// Keeps the selected dice, then banks or rolls the rest.
    ///
    /// An invalid selection is rejected with no change. `Continue` rolls the
    /// remaining dice immediately (all six on hot dice), which may forfeit.
    pub fn resolve_turn<S: DiceSource + ?Sized>(
        &mut self,
        action: Decision,
        source: &mut S,
    ) -> Result<Snapshot, GameError> {
        self.expect_phase(Phase::PlayerTurn)?;
        let mark = self.log_mark();
        self.keep_selected()?;
        match action {
            Decision::Bank => self.bank_turn(),
            Decision::Continue => {
                let name = self.current_player().name.clone();
                self.log.push(
                    LogKind::Continue,
                    Some(self.turn.current_player_index),
                    format!("{} presses on.", name),
                );
                self.roll_and_classify(source)?;
            }
        }
        Ok(self.snapshot_since(mark))
    }

    /// Plays one opponent cycle: roll, keep the best dice, bank or continue.
    pub fn opponent_step<S: DiceSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<Snapshot, GameError> {
        self.expect_phase(Phase::OpponentTurn)?;
        self.autoplay_step(source)
    }

    /// Plays the opponent's whole turn, returning a snapshot per cycle.
    pub fn play_opponent_turn<S: DiceSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<Vec<Snapshot>, GameError> {
        self.expect_phase(Phase::OpponentTurn)?;
        let mut snapshots = Vec::new();
        while self.turn.phase == Phase::OpponentTurn {
            snapshots.push(self.autoplay_step(source)?);
        }
        Ok(snapshots)
    }

    /// Plays one policy-driven cycle for whichever seat holds the dice.
    pub fn autoplay_step<S: DiceSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<Snapshot, GameError> {
        if !self.turn.phase.is_active() {
            return Err(self.inactive_error());
        }
        let seat = self.turn.current_player_index;
        let mark = self.log_mark();

        if self.turn.step == TurnStep::AwaitingRoll && self.roll_and_classify(source)?.is_none() {
            return Ok(self.snapshot_since(mark));
        }

        let keep = choose_keep(&self.dice.unlocked_values()).map_err(TurnError::from)?;
        if !self.dice.select_faces(&keep.used_dice) {
            return Err(TurnError::InvalidSelection {
                selected: keep.used_dice.clone(),
                evaluation: keep,
            }
            .into());
        }
        self.keep_selected()?;

        let player = &self.players[seat];
        let ctx = PolicyContext {
            current_turn_score: self.turn.turn_score,
            dice_remaining: self.dice.unlocked_count(),
            is_on_board: player.is_on_board,
            player_score: player.score,
            winning_score: WINNING_SCORE,
        };
        let decision = decide(&ctx);
        debug!(seat, ?ctx, ?decision, "policy decision");

        let name = player.name.clone();
        match decision {
            Decision::Bank => {
                self.log.push(
                    LogKind::Decide,
                    Some(seat),
                    format!("{} decides to bank its glory.", name),
                );
                self.bank_turn();
            }
            Decision::Continue => {
                let next = dice_for_next_roll(ctx.dice_remaining);
                self.log.push(
                    LogKind::Decide,
                    Some(seat),
                    format!("{} presses the attack with {} dice!", name, next),
                );
            }
        }
        Ok(self.snapshot_since(mark))
    }

    /// Sequence number of the newest log entry.
    fn log_mark(&self) -> u64 {
        self.log.last().map_or(0, |e| e.seq)
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), GameError> {
        match self.turn.phase {
            p if p == expected => Ok(()),
            Phase::PlayerTurn => Err(GameError::NotOpponentTurn),
            Phase::OpponentTurn => Err(GameError::NotYourTurn),
            _ => Err(self.inactive_error()),
        }
    }

    fn inactive_error(&self) -> GameError {
        if self.turn.phase == Phase::Finished {
            GameError::GameOver
        } else {
            GameError::NotStarted
        }
    }

    /// Rolls and logs. Returns `None` if the roll forfeited the turn.
    fn roll_and_classify<S: DiceSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<Option<turn::Roll>, GameError> {
        let seat = self.turn.current_player_index;
        let name = self.current_player().name.clone();
        let roll = turn::roll(&mut self.turn, &mut self.dice, source)?;
        self.last_roll.clone_from(&roll.faces);

        if roll.hot_dice {
            self.log.push(
                LogKind::HotDice,
                Some(seat),
                "Hot Dice! The Emperor provides! Roll all dice again.",
            );
        }
        let faces = join_faces(&roll.faces);

        if roll.is_forfeit() {
            self.log.push(
                LogKind::Roll,
                Some(seat),
                format!("{} rolled: {}... A Farkle! That's HERESY!", name, faces),
            );
            self.forfeit_turn();
            return Ok(None);
        }

        self.log
            .push(LogKind::Roll, Some(seat), format!("{} rolled: {}", name, faces));
        Ok(Some(roll))
    }

    /// Validates and locks the selected dice, logging the gain.
    fn keep_selected(&mut self) -> Result<(), GameError> {
        let seat = self.turn.current_player_index;
        let evaluation = turn::lock_selection(&mut self.turn, &mut self.dice)?;
        let message = format!(
            "{} keeps {} for {} glory. Turn total: {}.",
            self.players[seat].name,
            join_faces(&evaluation.used_dice),
            evaluation.score,
            self.turn.turn_score
        );
        self.log.push(LogKind::Lock, Some(seat), message);
        Ok(())
    }

    fn forfeit_turn(&mut self) {
        let seat = self.turn.current_player_index;
        let lost = turn::forfeit(&mut self.turn);
        let name = self.players[seat].name.clone();
        info!(seat, lost, "heresy");
        self.log.push(
            LogKind::Heresy,
            Some(seat),
            format!("{} has committed HERESY! All glory lost for this turn.", name),
        );
        self.finish_turn(TurnOutcome::Heresy);
    }

    fn bank_turn(&mut self) {
        let seat = self.turn.current_player_index;
        let outcome = turn::bank(&mut self.turn, &mut self.players[seat]);
        let name = self.players[seat].name.clone();

        match outcome {
            BankOutcome::Rejected { turn_score } => {
                info!(seat, turn_score, "tithe rejected");
                self.log.push(
                    LogKind::TitheRejected,
                    Some(seat),
                    format!(
                        "{} failed to meet the minimum glory of {}. Their tithe is rejected.",
                        name, MIN_SCORE_TO_GET_ON_BOARD
                    ),
                );
                self.finish_turn(TurnOutcome::Banked(0));
            }
            BankOutcome::Banked { amount, total } => {
                info!(seat, amount, total, "banked");
                self.log.push(
                    LogKind::Bank,
                    Some(seat),
                    format!("{} secures {} glory! New total: {}.", name, amount, total),
                );
                self.finish_turn(TurnOutcome::Banked(amount));
            }
            BankOutcome::Won { amount, total } => {
                info!(seat, amount, total, "game won");
                self.log.push(
                    LogKind::Bank,
                    Some(seat),
                    format!("{} secures {} glory! New total: {}.", name, amount, total),
                );
                self.winner = Some(seat);
                self.log.push(
                    LogKind::GameOver,
                    Some(seat),
                    format!("{} has achieved ULTIMATE VICTORY!", name),
                );
            }
        }
    }

    /// Reports on the finished turn and passes the dice.
    fn finish_turn(&mut self, outcome: TurnOutcome) {
        let seat = self.turn.current_player_index;
        self.log.push(
            LogKind::Report,
            Some(seat),
            action_report(outcome, self.turn.turn_number),
        );
        turn::end_turn(&mut self.turn, &mut self.dice);
        self.announce_turn();
    }

    fn announce_turn(&mut self) {
        let seat = self.turn.current_player_index;
        let name = self.players[seat].name.clone();
        info!(seat, turn = self.turn.turn_number, "turn start");
        self.log
            .push(LogKind::TurnStart, Some(seat), format!("--- {}'s Turn ---", name));
    }
}

fn join_faces(faces: &[u8]) -> String {
    faces
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
