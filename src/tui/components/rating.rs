//! Five-star rating control.
//!
//! The control is presentational: it holds no state of its own and only
//! projects a rating onto five units. Interactive controls translate a unit
//! selection into a new rating; read-only controls ignore selection.

use crate::feedback::{MAX_RATING, MIN_RATING};

const UNIT_COUNT: usize = 5;
const FILLED_GLYPH: char = '★';
const EMPTY_GLYPH: char = '☆';

/// Visual state of a single star.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingUnit {
    /// Position is at or below the rating.
    Filled,
    /// Position is above the rating.
    Empty,
}

impl RatingUnit {
    const fn glyph(self) -> char {
        match self {
            Self::Filled => FILLED_GLYPH,
            Self::Empty => EMPTY_GLYPH,
        }
    }
}

/// Glyph spacing variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatingSize {
    /// Adjacent stars, used in list entries.
    Small,
    /// Stars separated by a space.
    #[default]
    Medium,
    /// Bracketed stars, used for the form input.
    Large,
}

/// Whether selecting a unit changes the rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RatingMode {
    /// Selection yields the selected position.
    Interactive,
    /// Selection yields nothing.
    ReadOnly,
}

/// Stateless 1-to-5 rating selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingControl {
    rating: u8,
    mode: RatingMode,
    size: RatingSize,
}

impl RatingControl {
    /// Creates a selectable control showing `rating` (0 = unset).
    #[must_use]
    pub const fn interactive(rating: u8) -> Self {
        Self {
            rating,
            mode: RatingMode::Interactive,
            size: RatingSize::Medium,
        }
    }

    /// Creates a display-only control showing `rating`.
    #[must_use]
    pub const fn read_only(rating: u8) -> Self {
        Self {
            rating,
            mode: RatingMode::ReadOnly,
            size: RatingSize::Medium,
        }
    }

    /// Returns the control with a different glyph spacing.
    #[must_use]
    pub const fn with_size(self, size: RatingSize) -> Self {
        Self { size, ..self }
    }

    /// Units in display order; positions `1..=rating` are filled.
    #[must_use]
    pub fn units(self) -> [RatingUnit; UNIT_COUNT] {
        let filled = usize::from(self.rating);
        std::array::from_fn(|index| {
            if index < filled {
                RatingUnit::Filled
            } else {
                RatingUnit::Empty
            }
        })
    }

    /// Resolves a selection of the 1-indexed `unit`.
    ///
    /// Interactive controls return the unit itself; there is no path back
    /// to an unset rating. Read-only controls and out-of-range units return
    /// `None`.
    #[must_use]
    pub fn select(self, unit: u8) -> Option<u8> {
        let in_range = (MIN_RATING..=MAX_RATING).contains(&unit);
        (self.mode == RatingMode::Interactive && in_range).then_some(unit)
    }

    /// Renders the five units as a single line.
    #[must_use]
    pub fn render(self) -> String {
        let glyphs = self.units().map(RatingUnit::glyph);
        match self.size {
            RatingSize::Small => glyphs.iter().collect(),
            RatingSize::Medium => join_glyphs(glyphs.iter().map(char::to_string), " "),
            RatingSize::Large => join_glyphs(glyphs.iter().map(|glyph| format!("[{glyph}]")), " "),
        }
    }
}

fn join_glyphs(parts: impl Iterator<Item = String>, separator: &str) -> String {
    parts.collect::<Vec<_>>().join(separator)
}
