use crate::*;

/// Capability handle for the debug controls, see [`MatchEngine::cheats`].
///
/// These bypass the normal selection rules on purpose. They only exist behind
/// this handle so the regular input path cannot reach them.
pub struct Cheats<'a, F, S> {
    engine: &'a mut MatchEngine<F, S>,
}

impl<'a, F, S> Cheats<'a, F, S>
where
    F: Clone + PartialEq,
    S: HighScoreStore,
{
    pub(crate) fn new(engine: &'a mut MatchEngine<F, S>) -> Self {
        Self { engine }
    }

    /// Marks every card matched and finishes the round. No-op unless a round is in progress.
    pub fn force_win(&mut self) -> bool {
        self.engine.force_win()
    }

    /// Adds one match worth of score. No-op unless a round is in progress.
    pub fn boost_score(&mut self) -> bool {
        self.engine.boost_score()
    }

    pub fn reset_high_score(&mut self) {
        self.engine.reset_high_score()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    type Engine = MatchEngine<u8, MemoryStore>;

    fn started(high_score: Score) -> Engine {
        let mut engine = Engine::new(MemoryStore::with_high_score(high_score), 0);
        engine
            .start_round(RoundConfig::from_pairs([1, 2, 3]), PresetBoardGenerator)
            .unwrap();
        engine.drain_effects();
        engine
    }

    #[test]
    fn cheats_are_locked_until_enabled() {
        let mut engine = started(0);
        assert!(engine.cheats().is_none());

        assert!(engine.enable_cheat_mode());
        assert!(!engine.enable_cheat_mode());
        assert!(engine.cheats().is_some());
    }

    #[test]
    fn enabling_reports_control_state() {
        let mut engine = started(0);
        engine.enable_cheat_mode();

        assert_eq!(
            engine.drain_effects(),
            vec![
                Effect::CheatModeEnabled,
                Effect::ControlsEnabled {
                    control: CheatControl::ForceWin,
                    enabled: true
                },
                Effect::ControlsEnabled {
                    control: CheatControl::BoostScore,
                    enabled: true
                },
                Effect::ControlsEnabled {
                    control: CheatControl::ResetHighScore,
                    enabled: true
                },
            ]
        );

        // latched, a second unlock emits nothing
        engine.enable_cheat_mode();
        assert!(engine.drain_effects().is_empty());
    }

    #[test]
    fn force_win_matches_everything() {
        let mut engine = started(0);
        engine.select_card(CardSlot(0));
        engine.select_card(CardSlot(1));
        engine.enable_cheat_mode();
        engine.drain_effects();

        assert!(engine.cheats().unwrap().force_win());

        assert_eq!(engine.status(), GameStatus::Won);
        assert_eq!(engine.matched_count(), 6);
        assert!(engine.revealed().is_empty());
        assert!(engine.is_forced_win());
        assert!(engine.is_animating());

        let effects = engine.drain_effects();
        assert!(effects.contains(&Effect::ControlsEnabled {
            control: CheatControl::ForceWin,
            enabled: false
        }));
        assert!(effects.contains(&Effect::GameOver {
            final_score: -100,
            new_high_score: false
        }));
        let reveals = effects
            .iter()
            .filter(|effect| matches!(effect, Effect::Reveal { .. }))
            .count();
        assert_eq!(reveals, 6);

        // the dropped mismatch reversal never fires
        engine.advance_by(WAITING_PERIOD);
        assert!(
            !engine
                .drain_effects()
                .iter()
                .any(|effect| matches!(effect, Effect::Hide { .. }))
        );
    }

    #[test]
    fn restart_after_win_reenables_round_controls() {
        let mut engine = started(0);
        engine.enable_cheat_mode();
        engine.cheats().unwrap().force_win();
        engine.drain_effects();
        assert!(!engine.cheats().unwrap().boost_score());

        engine
            .start_round(RoundConfig::from_pairs([1, 2, 3]), PresetBoardGenerator)
            .unwrap();
        let effects = engine.drain_effects();

        for control in [CheatControl::ForceWin, CheatControl::BoostScore] {
            assert!(
                effects.contains(&Effect::ControlsEnabled {
                    control,
                    enabled: true
                }),
                "{control:?}"
            );
        }
        assert!(!engine.is_forced_win());
        assert!(engine.cheats().unwrap().boost_score());
        assert_eq!(engine.score(), SCORE_STEP);
    }

    #[test]
    fn force_win_needs_a_running_round() {
        let mut engine = Engine::new(MemoryStore::default(), 0);
        engine.enable_cheat_mode();
        assert!(!engine.cheats().unwrap().force_win());
        assert_eq!(engine.status(), GameStatus::NotStarted);
    }

    #[test]
    fn boost_score_leaves_matches_alone() {
        let mut engine = started(0);
        engine.enable_cheat_mode();

        assert!(engine.cheats().unwrap().boost_score());
        assert_eq!(engine.score(), 100);
        assert_eq!(engine.matched_count(), 0);

        engine.cheats().unwrap().force_win();
        assert!(!engine.cheats().unwrap().boost_score());
        assert_eq!(engine.score(), 100);
        assert_eq!(engine.high_score(), 100);
    }

    #[test]
    fn reset_high_score_persists_zero() {
        let mut engine = started(500);
        engine.enable_cheat_mode();
        engine.drain_effects();

        engine.cheats().unwrap().reset_high_score();

        assert_eq!(engine.high_score(), 0);
        assert_eq!(engine.store().value(), Some(0));
        assert_eq!(
            engine.drain_effects(),
            vec![Effect::HighScoreChanged { high_score: 0 }]
        );
    }
}
