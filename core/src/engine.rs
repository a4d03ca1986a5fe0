use alloc::vec::Vec;
use core::mem;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Result of a single card selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectOutcome {
    /// Nothing changed: no round running, slot unavailable, or a pair is still resolving.
    Ignored,
    Revealed,
    Matched,
    Mismatched,
    Won,
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Game state machine for one board of paired faces.
///
/// All mutation goes through its methods. Everything the presentation layer
/// has to do in response is queued as an [`Effect`] and collected with
/// [`MatchEngine::drain_effects`]. Time only moves when the host calls
/// [`MatchEngine::advance_to`] or [`MatchEngine::advance_by`].
#[derive(Debug)]
pub struct MatchEngine<F, S> {
    board: Vec<F>,
    layout: Option<BoardLayout>,
    revealed: SmallVec<[CardSlot; 2]>,
    matched: HashSet<CardSlot>,
    score: Score,
    status: GameStatus,
    forced_win: bool,
    cheat_mode: bool,
    high_score: HighScoreBoard<S>,
    timers: TimerCoordinator,
    effects: Vec<Effect<F>>,
}

impl<F, S> MatchEngine<F, S>
where
    F: Clone + PartialEq,
    S: HighScoreStore,
{
    pub fn new(store: S, now: Millis) -> Self {
        Self {
            board: Vec::new(),
            layout: None,
            revealed: SmallVec::new(),
            matched: HashSet::new(),
            score: 0,
            status: GameStatus::default(),
            forced_win: false,
            cheat_mode: false,
            high_score: HighScoreBoard::load(store),
            timers: TimerCoordinator::new(now),
            effects: Vec::new(),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn high_score(&self) -> Score {
        self.high_score.best()
    }

    pub fn store(&self) -> &S {
        self.high_score.store()
    }

    pub fn layout(&self) -> Option<BoardLayout> {
        self.layout
    }

    pub fn card_count(&self) -> usize {
        self.board.len()
    }

    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    pub fn revealed(&self) -> &[CardSlot] {
        &self.revealed
    }

    pub fn is_cheat_mode(&self) -> bool {
        self.cheat_mode
    }

    /// Whether the last win came from the force-win cheat.
    pub fn is_forced_win(&self) -> bool {
        self.forced_win
    }

    pub fn now(&self) -> Millis {
        self.timers.now()
    }

    /// When the host should call [`MatchEngine::advance_to`] next.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    pub fn is_animating(&self) -> bool {
        self.timers.is_animating()
    }

    pub fn selection_state(&self) -> SelectionState {
        match self.revealed.len() {
            0 => SelectionState::Idle,
            1 => SelectionState::OneRevealed,
            _ => SelectionState::Resolving,
        }
    }

    pub fn face_at(&self, slot: CardSlot) -> Option<&F> {
        self.board.get(slot.index())
    }

    pub fn card_state(&self, slot: CardSlot) -> CardState {
        if self.matched.contains(&slot) {
            CardState::Matched
        } else if self.revealed.contains(&slot) {
            CardState::Revealed
        } else {
            CardState::Hidden
        }
    }

    pub fn cards(&self) -> impl Iterator<Item = CardState> + '_ {
        (0..self.board.len()).map(|index| self.card_state(CardSlot(index)))
    }

    pub fn drain_effects(&mut self) -> Vec<Effect<F>> {
        mem::take(&mut self.effects)
    }

    /// Deals a fresh board. Any running animation and pending mismatch
    /// reversal are cancelled first. On error the current round is untouched.
    pub fn start_round<G: BoardGenerator>(
        &mut self,
        config: RoundConfig<F>,
        generator: G,
    ) -> Result<BoardLayout> {
        let layout = config.layout()?;
        let board = generator.generate(config.faces)?;

        if self.timers.cancel_animation() {
            log::debug!("animation cancelled by new round");
            self.emit(Effect::AnimationStopped);
        }
        if self.timers.cancel_mismatch() {
            log::debug!("pending mismatch reversal dropped by new round");
        }

        self.board = board;
        self.layout = Some(layout);
        self.revealed.clear();
        self.matched.clear();
        self.score = 0;
        self.status = GameStatus::InProgress;
        self.forced_win = false;

        self.emit(Effect::RoundStarted {
            card_count: layout.card_count(),
            cards_per_row: layout.cards_per_row(),
        });
        for index in 0..self.board.len() {
            self.emit(Effect::Hide {
                slot: CardSlot(index),
            });
        }
        self.emit(Effect::ScoreChanged { score: 0 });
        self.emit_controls();

        log::debug!(
            "round started: {} cards, {} per row",
            layout.card_count(),
            layout.cards_per_row()
        );
        Ok(layout)
    }

    pub fn select_card(&mut self, slot: CardSlot) -> SelectOutcome {
        if !self.status.is_in_progress() {
            log::trace!("select {} ignored, round not in progress", slot);
            return SelectOutcome::Ignored;
        }
        let Some(face) = self.board.get(slot.index()).cloned() else {
            log::trace!("select {} ignored, out of range", slot);
            return SelectOutcome::Ignored;
        };
        if self.matched.contains(&slot) || self.revealed.contains(&slot) {
            log::trace!("select {} ignored, already face-up", slot);
            return SelectOutcome::Ignored;
        }
        if self.revealed.len() >= 2 {
            log::trace!("select {} ignored, pair still resolving", slot);
            return SelectOutcome::Ignored;
        }

        self.revealed.push(slot);
        self.emit(Effect::Reveal { slot, face });

        if self.revealed.len() == 1 {
            return SelectOutcome::Revealed;
        }
        self.evaluate_pair()
    }

    pub fn advance_by(&mut self, delta: Millis) {
        self.advance_to(self.timers.now().saturating_add(delta));
    }

    /// Runs every timer due at or before `now`, in deadline order.
    pub fn advance_to(&mut self, now: Millis) {
        while let Some(fired) = self.timers.pop_due(now) {
            self.on_timer(fired);
        }
        self.timers.set_now(now);
    }

    /// Finishes the round when every card is matched. Returns whether the board is complete.
    pub fn check_win(&mut self) -> bool {
        let complete = !self.board.is_empty() && self.matched.len() == self.board.len();
        if complete && self.status.is_in_progress() {
            self.finish_round();
        }
        complete
    }

    /// Latches cheat mode on. Returns `false` when it was already enabled.
    pub fn enable_cheat_mode(&mut self) -> bool {
        if self.cheat_mode {
            return false;
        }
        self.cheat_mode = true;
        log::info!("cheat mode enabled");
        self.emit(Effect::CheatModeEnabled);
        self.emit_controls();
        true
    }

    /// Debug controls, only available once cheat mode is enabled.
    pub fn cheats(&mut self) -> Option<Cheats<'_, F, S>> {
        if self.cheat_mode {
            Some(Cheats::new(self))
        } else {
            None
        }
    }

    pub(crate) fn force_win(&mut self) -> bool {
        if !self.status.is_in_progress() {
            return false;
        }
        self.timers.cancel_mismatch();
        self.revealed.clear();

        for index in 0..self.board.len() {
            let slot = CardSlot(index);
            if self.matched.insert(slot) {
                let face = self.board[index].clone();
                self.emit(Effect::Reveal { slot, face });
            }
        }
        self.forced_win = true;
        log::debug!("round won by cheat");
        self.check_win()
    }

    pub(crate) fn boost_score(&mut self) -> bool {
        if !self.status.is_in_progress() {
            return false;
        }
        self.apply_score(SCORE_STEP);
        true
    }

    pub(crate) fn reset_high_score(&mut self) {
        self.high_score.reset();
        self.emit(Effect::HighScoreChanged { high_score: 0 });
    }

    fn evaluate_pair(&mut self) -> SelectOutcome {
        let (first, second) = (self.revealed[0], self.revealed[1]);

        if self.board[first.index()] == self.board[second.index()] {
            self.matched.extend(self.revealed.drain(..));
            self.apply_score(SCORE_STEP);
            log::debug!("match {} {}, score {}", first, second, self.score);
            if self.check_win() {
                SelectOutcome::Won
            } else {
                SelectOutcome::Matched
            }
        } else {
            self.apply_score(-SCORE_STEP);
            self.timers.schedule_mismatch_reversal(WAITING_PERIOD);
            log::debug!("mismatch {} {}, score {}", first, second, self.score);
            SelectOutcome::Mismatched
        }
    }

    fn finish_round(&mut self) {
        self.status = GameStatus::Won;
        self.emit_controls();

        let new_high_score = self.high_score.submit(self.score);
        if new_high_score {
            self.emit(Effect::HighScoreChanged {
                high_score: self.score,
            });
        }
        self.emit(Effect::GameOver {
            final_score: self.score,
            new_high_score,
        });
        log::debug!(
            "round won with {} (new high score: {})",
            self.score,
            new_high_score
        );

        self.timers.start_animation(ANIMATION_PERIOD, ANIMATION_DURATION);
    }

    fn on_timer(&mut self, fired: FiredTask) {
        log::trace!("timer {:?} fired at {}", fired.task, fired.at);
        match fired.task {
            TimerTask::MismatchReversal => {
                for slot in mem::take(&mut self.revealed) {
                    self.emit(Effect::Hide { slot });
                }
            }
            TimerTask::AnimationTick => self.emit(Effect::AnimationTick),
            TimerTask::AnimationStop => {
                self.timers.cancel_animation();
                self.emit(Effect::AnimationStopped);
            }
        }
    }

    fn apply_score(&mut self, delta: Score) {
        self.score = self.score.saturating_add(delta);
        self.emit(Effect::ScoreChanged { score: self.score });
    }

    fn emit_controls(&mut self) {
        if !self.cheat_mode {
            return;
        }
        for control in CheatControl::ALL {
            let enabled = control.is_enabled_for(self.status);
            self.emit(Effect::ControlsEnabled { control, enabled });
        }
    }

    fn emit(&mut self, effect: Effect<F>) {
        self.effects.push(effect);
    }
}
