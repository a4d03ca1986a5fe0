use crate::cheat::{self, CheatButtons, CheatWarning, ControlState, Modifiers};
use crate::palette::{self, CARD_BACK, Color};
use crate::storage::LocalHighScore;
use crate::utils::*;
use clap::Args;
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use gloo::utils::document;
use pairmatch_core as game;
use wasm_bindgen::JsCast;
use yew::prelude::*;

type Engine = game::MatchEngine<Color, LocalHighScore>;

/// What the board currently shows, rebuilt purely from engine effects.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct BoardView {
    /// Last face seen for each card, kept after it flips back so the
    /// end-of-round animation can show it again.
    faces: Vec<Option<Color>>,
    face_up: Vec<bool>,
    /// Every card is drawn inverted while set.
    flipped: bool,
    score: game::Score,
    high_score: game::Score,
    final_score: Option<game::Score>,
    cheat_mode: bool,
    controls: ControlState,
    /// A new high score still waiting to be announced after the next render.
    announce_high_score: bool,
}

impl BoardView {
    fn new(card_count: usize, high_score: game::Score) -> Self {
        Self {
            faces: vec![None; card_count],
            face_up: vec![false; card_count],
            high_score,
            ..Default::default()
        }
    }

    fn apply(&mut self, effect: game::Effect<Color>) {
        use game::Effect::*;

        match effect {
            RoundStarted { card_count, .. } => {
                self.faces = vec![None; card_count];
                self.face_up = vec![false; card_count];
                self.flipped = false;
                self.final_score = None;
            }
            Reveal { slot, face } => {
                if let Some(known) = self.faces.get_mut(slot.index()) {
                    *known = Some(face);
                    self.face_up[slot.index()] = true;
                }
            }
            Hide { slot } => {
                if let Some(face_up) = self.face_up.get_mut(slot.index()) {
                    *face_up = false;
                }
            }
            ScoreChanged { score } => self.score = score,
            GameOver {
                final_score,
                new_high_score,
            } => {
                self.final_score = Some(final_score);
                self.announce_high_score |= new_high_score;
            }
            HighScoreChanged { high_score } => self.high_score = high_score,
            AnimationTick => self.flipped = !self.flipped,
            AnimationStopped => self.flipped = false,
            CheatModeEnabled => self.cheat_mode = true,
            ControlsEnabled { control, enabled } => self.controls.set(control, enabled),
        }
    }

    fn card_color(&self, index: usize) -> &'static str {
        let face_up = self.face_up.get(index).copied().unwrap_or(false);
        match self.faces.get(index).copied().flatten() {
            Some(face) if face_up != self.flipped => face.css(),
            _ => CARD_BACK,
        }
    }

    fn score_text(&self) -> String {
        match self.final_score {
            Some(final_score) => format!("YOU WON! - Final Score: {} !", final_score),
            None => format!("Current Score: {}", self.score),
        }
    }

    fn high_score_text(&self) -> String {
        format!("High Score: {}", self.high_score)
    }

    fn take_announcement(&mut self) -> bool {
        std::mem::take(&mut self.announce_high_score)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    SelectCard(game::CardSlot),
    StartRound,
    Tick,
    EnableCheatMode,
    Cheat(game::CheatControl),
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    index: usize,
    color: &'static str,
    callback: Callback<game::CardSlot>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        index,
        color,
        callback,
    } = props.clone();

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", index);
        callback.emit(game::CardSlot(index));
    });

    html! {
        <div
            id={format!("card-{}", index)}
            class="col card p-1 m-1"
            style={format!("background-color: {}", color)}
            {onclick}
        />
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Number of color pairs on the board
    #[arg(short, long, default_value_t = palette::DEFAULT_PAIRS)]
    pub pairs: usize,
}

pub(crate) struct GameView {
    engine: Engine,
    config: game::RoundConfig<Color>,
    layout: Result<game::BoardLayout, game::ConfigError>,
    board: BoardView,
    seed: Option<u64>,
    timer: Option<Timeout>,
    _keydown: EventListener,
}

impl GameView {
    fn listen_for_unlock(ctx: &Context<Self>) -> EventListener {
        let link = ctx.link().clone();
        EventListener::new(&document(), "keydown", move |event| {
            let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                return;
            };
            if cheat::is_unlock_combo(Modifiers::from_event(event), &event.code()) {
                link.send_message(Msg::EnableCheatMode);
            }
        })
    }

    fn start_round(&mut self) {
        let seed = self.seed.unwrap_or_else(js_random_seed);
        log::debug!("new round, seed: {}", seed);

        let generator = game::RandomBoardGenerator::new(seed);
        if let Err(err) = self.engine.start_round(self.config.clone(), generator) {
            log::error!("cannot start round: {}", err);
            self.layout = Err(err);
        }
    }

    fn run_cheat(&mut self, control: game::CheatControl) {
        let Some(mut cheats) = self.engine.cheats() else {
            log::warn!("cheat {:?} requested without cheat mode", control);
            return;
        };
        match control {
            game::CheatControl::ForceWin => {
                cheats.force_win();
            }
            game::CheatControl::BoostScore => {
                cheats.boost_score();
            }
            game::CheatControl::ResetHighScore => cheats.reset_high_score(),
        }
    }

    /// Applies queued engine effects to the view, returns whether anything changed.
    fn flush_effects(&mut self) -> bool {
        let effects = self.engine.drain_effects();
        let updated = !effects.is_empty();
        for effect in effects {
            self.board.apply(effect);
        }
        updated
    }

    /// Arms a single browser timeout for the engine's next deadline. Replacing
    /// the previous `Timeout` drops and cancels it.
    fn reschedule(&mut self, ctx: &Context<Self>) {
        self.timer = self.engine.next_deadline().map(|deadline| {
            let delay = deadline.saturating_sub(now_millis());
            let link = ctx.link().clone();
            Timeout::new(delay.try_into().unwrap_or(u32::MAX), move || {
                link.send_message(Msg::Tick)
            })
        });
    }

    fn view_board(&self, ctx: &Context<Self>) -> Html {
        let layout = match &self.layout {
            Ok(layout) => *layout,
            Err(err) => {
                return html! {
                    <div class="row alert alert-danger">{format!("Invalid board: {}", err)}</div>
                };
            }
        };

        let callback = ctx.link().callback(Msg::SelectCard);
        html! {
            <>
                { for layout.row_ranges().map(|row| html! {
                    <div class="row card_row">
                        {
                            for row.map(|index| html! {
                                <CardView
                                    {index}
                                    color={self.board.card_color(index)}
                                    callback={callback.clone()}
                                />
                            })
                        }
                    </div>
                }) }
            </>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let engine = Engine::new(LocalHighScore, now_millis());
        let config = palette::round_config(props.pairs);
        let layout = config.layout();
        if let Err(err) = &layout {
            log::error!("invalid board configuration: {}", err);
        }
        let board = BoardView::new(config.card_count(), engine.high_score());

        Self {
            engine,
            config,
            layout,
            board,
            seed: props.seed,
            timer: None,
            _keydown: GameView::listen_for_unlock(ctx),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        self.engine.advance_to(now_millis());

        match msg {
            SelectCard(slot) => {
                let outcome = self.engine.select_card(slot);
                if outcome.has_update() {
                    log::debug!("select {}: {:?}", slot, outcome);
                } else {
                    log::trace!("select {} ignored", slot);
                }
            }
            StartRound => self.start_round(),
            Tick => log::trace!("tick at {}", self.engine.now()),
            EnableCheatMode => {
                self.engine.enable_cheat_mode();
            }
            Cheat(control) => self.run_cheat(control),
        }

        let updated = self.flush_effects();
        self.reschedule(ctx);
        updated
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        // alert blocks, so the winning board has to be on screen first
        if self.board.take_announcement() {
            gloo::dialogs::alert("New High Score!");
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let cheat_mode = self.board.cheat_mode;
        let start_label = match self.engine.status() {
            game::GameStatus::NotStarted => "Start Game",
            _ => "Restart Game",
        };
        let cb_start = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            StartRound
        });
        let cb_cheat = ctx.link().callback(Cheat);

        html! {
            <div class="pairmatch">
                <div class="row">
                    <div id="score" class="col">{self.board.score_text()}</div>
                    <div id="highscore" class="col">{self.board.high_score_text()}</div>
                </div>
                <div id="buttons-container">
                    if cheat_mode {
                        <CheatWarning/>
                    }
                    <div id="buttons-row" class="row">
                        <div id="buttons-col" class="col">
                            <button id="button-start" type="button" class="btn btn-primary btn-sm mx-2" onclick={cb_start}>
                                {start_label}
                            </button>
                            if cheat_mode {
                                <CheatButtons controls={self.board.controls} callback={cb_cheat}/>
                            }
                        </div>
                    </div>
                    if cheat_mode {
                        <CheatWarning/>
                    }
                </div>
                <div id="board">
                    {self.view_board(ctx)}
                </div>
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game::{CardSlot, Effect};

    fn run_round(faces: &[Color]) -> (game::MatchEngine<Color, game::MemoryStore>, BoardView) {
        let mut engine = game::MatchEngine::new(game::MemoryStore::default(), 0);
        engine
            .start_round(
                game::RoundConfig::new(faces.to_vec()),
                game::PresetBoardGenerator,
            )
            .unwrap();
        let mut board = BoardView::new(faces.len(), engine.high_score());
        for effect in engine.drain_effects() {
            board.apply(effect);
        }
        (engine, board)
    }

    fn sync(engine: &mut game::MatchEngine<Color, game::MemoryStore>, board: &mut BoardView) {
        for effect in engine.drain_effects() {
            board.apply(effect);
        }
    }

    #[test]
    fn board_follows_reveal_and_hide() {
        use Color::*;
        let (mut engine, mut board) = run_round(&[Red, Blue, Red, Blue]);

        assert_eq!(board.card_color(0), CARD_BACK);
        engine.select_card(CardSlot(0));
        engine.select_card(CardSlot(1));
        sync(&mut engine, &mut board);
        assert_eq!(board.card_color(0), "red");
        assert_eq!(board.card_color(1), "blue");
        assert_eq!(board.score_text(), "Current Score: -100");

        engine.advance_by(game::WAITING_PERIOD);
        sync(&mut engine, &mut board);
        assert_eq!(board.card_color(0), CARD_BACK);
        assert_eq!(board.card_color(1), CARD_BACK);
    }

    #[test]
    fn win_shows_final_score_and_animation_flips_cards() {
        use Color::*;
        let (mut engine, mut board) = run_round(&[Green, Green]);

        engine.select_card(CardSlot(0));
        engine.select_card(CardSlot(1));
        sync(&mut engine, &mut board);
        assert_eq!(board.score_text(), "YOU WON! - Final Score: 100 !");
        assert_eq!(board.high_score_text(), "High Score: 100");
        assert_eq!(board.card_color(0), "green");

        engine.advance_by(game::ANIMATION_PERIOD);
        sync(&mut engine, &mut board);
        assert_eq!(board.card_color(0), CARD_BACK);

        engine.advance_by(game::ANIMATION_DURATION);
        sync(&mut engine, &mut board);
        assert_eq!(board.card_color(0), "green");
        assert_eq!(board.card_color(1), "green");
    }

    #[test]
    fn new_high_score_is_announced_once() {
        use Color::*;
        let (mut engine, mut board) = run_round(&[Green, Green]);
        assert!(!board.take_announcement());

        engine.select_card(CardSlot(0));
        engine.select_card(CardSlot(1));
        sync(&mut engine, &mut board);
        assert!(board.take_announcement());
        assert!(!board.take_announcement());

        // same score again is not a new high score
        engine
            .start_round(
                game::RoundConfig::new(vec![Green, Green]),
                game::PresetBoardGenerator,
            )
            .unwrap();
        engine.select_card(CardSlot(0));
        engine.select_card(CardSlot(1));
        sync(&mut engine, &mut board);
        assert_eq!(board.score_text(), "YOU WON! - Final Score: 100 !");
        assert!(!board.take_announcement());
    }

    #[test]
    fn board_matches_engine_card_states() {
        use Color::*;
        let (mut engine, mut board) = run_round(&[Red, Blue, Red, Blue, Green, Green]);

        for index in [0, 2, 1, 4] {
            engine.select_card(CardSlot(index));
            sync(&mut engine, &mut board);
            for (index, state) in engine.cards().enumerate() {
                assert_eq!(board.face_up[index], state.is_face_up(), "card {index}");
            }
        }
    }

    #[test]
    fn restart_clears_previous_round() {
        use Color::*;
        let (mut engine, mut board) = run_round(&[Red, Red, Blue, Blue]);
        engine.select_card(CardSlot(0));
        engine.select_card(CardSlot(1));
        sync(&mut engine, &mut board);

        engine
            .start_round(
                game::RoundConfig::new(vec![Red, Red, Blue, Blue]),
                game::PresetBoardGenerator,
            )
            .unwrap();
        sync(&mut engine, &mut board);

        assert_eq!(board.card_color(0), CARD_BACK);
        assert_eq!(board.score_text(), "Current Score: 0");
    }

    #[test]
    fn cheat_controls_follow_round_state() {
        let mut board = BoardView::new(2, 0);
        board.apply(Effect::CheatModeEnabled);
        board.apply(Effect::ControlsEnabled {
            control: game::CheatControl::ForceWin,
            enabled: true,
        });

        assert!(board.cheat_mode);
        assert!(board.controls.is_enabled(game::CheatControl::ForceWin));
    }
}
