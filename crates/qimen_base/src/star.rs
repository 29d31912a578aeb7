//! The nine stars (九星).
//!
//! Eight stars sit on the outer ring in home order 蓬任冲辅英芮柱心; 禽 lives in
//! the center and travels with the star of the center's lodging host.

use std::fmt::{Display, Formatter};

use crate::palace::Palace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Star {
    Peng,
    Ren,
    Chong,
    Fu,
    Ying,
    Rui,
    Zhu,
    Xin,
    Qin,
}

/// All nine stars: the eight ring stars in home order, then 禽.
pub const ALL_STARS: [Star; 9] = [
    Star::Peng,
    Star::Ren,
    Star::Chong,
    Star::Fu,
    Star::Ying,
    Star::Rui,
    Star::Zhu,
    Star::Xin,
    Star::Qin,
];

impl Star {
    /// Short Chinese name (`蓬`, `任`, …).
    pub const fn chinese(self) -> &'static str {
        match self {
            Self::Peng => "蓬",
            Self::Ren => "任",
            Self::Chong => "冲",
            Self::Fu => "辅",
            Self::Ying => "英",
            Self::Rui => "芮",
            Self::Zhu => "柱",
            Self::Xin => "心",
            Self::Qin => "禽",
        }
    }

    /// Pinyin name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Peng => "Peng",
            Self::Ren => "Ren",
            Self::Chong => "Chong",
            Self::Fu => "Fu",
            Self::Ying => "Ying",
            Self::Rui => "Rui",
            Self::Zhu => "Zhu",
            Self::Xin => "Xin",
            Self::Qin => "Qin",
        }
    }

    /// Palace the star occupies on an unrotated chart.
    pub const fn home_palace(self) -> Palace {
        match self {
            Self::Peng => Palace::Kan,
            Self::Ren => Palace::Gen,
            Self::Chong => Palace::Zhen,
            Self::Fu => Palace::Xun,
            Self::Ying => Palace::Li,
            Self::Rui => Palace::Kun,
            Self::Zhu => Palace::Dui,
            Self::Xin => Palace::Qian,
            Self::Qin => Palace::Center,
        }
    }

    /// Parse from the short Chinese name, the `天`-prefixed form, or pinyin.
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        let short = s.strip_prefix('天').unwrap_or(s);
        ALL_STARS
            .iter()
            .copied()
            .find(|st| st.chinese() == short || st.name().eq_ignore_ascii_case(s))
    }
}

impl Display for Star {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.chinese())
    }
}
