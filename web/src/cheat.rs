use bitflags::bitflags;
use pairmatch_core::CheatControl;
use yew::prelude::*;

/// `KeyboardEvent.code` of the key that unlocks cheat mode together with Ctrl+Shift.
const UNLOCK_CODE: &str = "Digit1";

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub(crate) struct Modifiers: u8 {
        const CTRL  = 1;
        const SHIFT = 1 << 1;
        const ALT   = 1 << 2;
        const META  = 1 << 3;
    }
}

impl Modifiers {
    pub(crate) fn from_event(event: &web_sys::KeyboardEvent) -> Self {
        let mut modifiers = Self::empty();
        modifiers.set(Self::CTRL, event.ctrl_key());
        modifiers.set(Self::SHIFT, event.shift_key());
        modifiers.set(Self::ALT, event.alt_key());
        modifiers.set(Self::META, event.meta_key());
        modifiers
    }
}

pub(crate) fn is_unlock_combo(modifiers: Modifiers, code: &str) -> bool {
    modifiers.contains(Modifiers::CTRL | Modifiers::SHIFT) && code == UNLOCK_CODE
}

/// Which cheat buttons are clickable, driven by `ControlsEnabled` effects.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct ControlState {
    force_win: bool,
    boost_score: bool,
    reset_high_score: bool,
}

impl ControlState {
    pub(crate) fn set(&mut self, control: CheatControl, enabled: bool) {
        *self.slot(control) = enabled;
    }

    pub(crate) fn is_enabled(&self, control: CheatControl) -> bool {
        match control {
            CheatControl::ForceWin => self.force_win,
            CheatControl::BoostScore => self.boost_score,
            CheatControl::ResetHighScore => self.reset_high_score,
        }
    }

    fn slot(&mut self, control: CheatControl) -> &mut bool {
        match control {
            CheatControl::ForceWin => &mut self.force_win,
            CheatControl::BoostScore => &mut self.boost_score,
            CheatControl::ResetHighScore => &mut self.reset_high_score,
        }
    }
}

#[function_component]
pub(crate) fn CheatWarning() -> Html {
    html! {
        <div class="row">
            <div class="cheat-warnings col d-flex text-white justify-content-center align-items-center bg-danger">
                {"CHEAT MODE ENABLED"}
            </div>
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct CheatButtonsProps {
    pub controls: ControlState,
    pub callback: Callback<CheatControl>,
}

#[function_component]
pub(crate) fn CheatButtons(props: &CheatButtonsProps) -> Html {
    let button = |control: CheatControl, id: &'static str, label: &'static str| {
        let callback = props.callback.clone();
        let onclick = Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            log::debug!("cheat: {:?}", control);
            callback.emit(control);
        });
        let disabled = !props.controls.is_enabled(control);
        html! {
            <button {id} type="button" class="btn btn-danger btn-sm mx-2" {disabled} {onclick}>
                {label}
            </button>
        }
    };

    html! {
        <>
            {button(CheatControl::ForceWin, "cheat_win", "Win Game")}
            {button(CheatControl::ResetHighScore, "cheat_reset_high", "Reset High Score")}
            {button(CheatControl::BoostScore, "cheat_boost_score", "Boost Score")}
        </>
    }
}
