//! The eight doors (八门).

use std::fmt::{Display, Formatter};

use crate::palace::Palace;

/// A door, named by its conventional English rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Door {
    Rest,
    Life,
    Harm,
    Delusion,
    Scenery,
    Death,
    Fear,
    Open,
}

/// All eight doors in home ring order (休 at palace 1).
pub const ALL_DOORS: [Door; 8] = [
    Door::Rest,
    Door::Life,
    Door::Harm,
    Door::Delusion,
    Door::Scenery,
    Door::Death,
    Door::Fear,
    Door::Open,
];

impl Door {
    /// Short Chinese name (`休`, `生`, …).
    pub const fn chinese(self) -> &'static str {
        match self {
            Self::Rest => "休",
            Self::Life => "生",
            Self::Harm => "伤",
            Self::Delusion => "杜",
            Self::Scenery => "景",
            Self::Death => "死",
            Self::Fear => "惊",
            Self::Open => "开",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Rest => "Rest",
            Self::Life => "Life",
            Self::Harm => "Harm",
            Self::Delusion => "Delusion",
            Self::Scenery => "Scenery",
            Self::Death => "Death",
            Self::Fear => "Fear",
            Self::Open => "Open",
        }
    }

    /// Tone-marked pinyin (景 and 惊 differ only by tone).
    pub const fn pinyin(self) -> &'static str {
        match self {
            Self::Rest => "Xiū",
            Self::Life => "Shēng",
            Self::Harm => "Shāng",
            Self::Delusion => "Dù",
            Self::Scenery => "Jǐng",
            Self::Death => "Sǐ",
            Self::Fear => "Jīng",
            Self::Open => "Kāi",
        }
    }

    /// Palace the door occupies on an unrotated chart.
    pub const fn home_palace(self) -> Palace {
        match self {
            Self::Rest => Palace::Kan,
            Self::Life => Palace::Gen,
            Self::Harm => Palace::Zhen,
            Self::Delusion => Palace::Xun,
            Self::Scenery => Palace::Li,
            Self::Death => Palace::Kun,
            Self::Fear => Palace::Dui,
            Self::Open => Palace::Qian,
        }
    }

    /// Parse from Chinese (with or without `门`), English or pinyin.
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        let short = s.strip_suffix('门').unwrap_or(s);
        ALL_DOORS.iter().copied().find(|d| {
            d.chinese() == short
                || d.name().eq_ignore_ascii_case(s)
                || d.pinyin().eq_ignore_ascii_case(s)
        })
    }
}

impl Display for Door {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.chinese())
    }
}
