use pairmatch_core::RoundConfig;

/// Color shown on the back of every card.
pub(crate) const CARD_BACK: &str = "grey";

pub(crate) const DEFAULT_PAIRS: usize = 6;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Blue,
    Green,
    Orange,
    Purple,
    Yellow,
}

impl Color {
    pub(crate) const PALETTE: [Color; 6] = [
        Self::Red,
        Self::Blue,
        Self::Green,
        Self::Orange,
        Self::Purple,
        Self::Yellow,
    ];

    pub(crate) const fn css(self) -> &'static str {
        use Color::*;
        match self {
            Red => "red",
            Blue => "blue",
            Green => "green",
            Orange => "orange",
            Purple => "purple",
            Yellow => "yellow",
        }
    }
}

/// Deck made of the first `pairs` palette colors, each listed twice.
pub(crate) fn round_config(pairs: usize) -> RoundConfig<Color> {
    if pairs > Color::PALETTE.len() {
        log::warn!(
            "requested {} pairs but the palette only has {}",
            pairs,
            Color::PALETTE.len()
        );
    }
    RoundConfig::from_pairs(Color::PALETTE.into_iter().take(pairs))
}
