//! Heavenly stems, earthly branches and the sexagenary (60) cycle.
//!
//! A GanZhi pairs one of 10 stems with one of 12 branches. Only pairs of
//! matching parity occur, giving 60 combinations indexed 0 (甲子) .. 59 (癸亥).
//! The cycle splits into six Xun (decades), each headed by a 甲 stem.

use std::fmt::{Display, Formatter};

use crate::palace::Palace;

/// The 10 heavenly stems (天干).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

/// All 10 stems in cycle order (index 0 = 甲).
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Jia,
    Stem::Yi,
    Stem::Bing,
    Stem::Ding,
    Stem::Wu,
    Stem::Ji,
    Stem::Geng,
    Stem::Xin,
    Stem::Ren,
    Stem::Gui,
];

const STEM_CHINESE: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

const STEM_PINYIN: [&str; 10] = [
    "Jia", "Yi", "Bing", "Ding", "Wu", "Ji", "Geng", "Xin", "Ren", "Gui",
];

impl Stem {
    /// 0-based index (甲=0 .. 癸=9).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Stem for an index, wrapping modulo 10.
    pub const fn from_index(index: u8) -> Self {
        ALL_STEMS[(index % 10) as usize]
    }

    /// Chinese character.
    pub const fn chinese(self) -> &'static str {
        STEM_CHINESE[self as usize]
    }

    /// Pinyin name.
    pub const fn name(self) -> &'static str {
        STEM_PINYIN[self as usize]
    }

    /// Yang stems sit on even indices.
    pub const fn is_yang(self) -> bool {
        self.index() % 2 == 0
    }

    /// Parse from Chinese character or pinyin (case-insensitive).
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        ALL_STEMS
            .iter()
            .copied()
            .find(|st| st.chinese() == s || st.name().eq_ignore_ascii_case(s))
    }
}

impl Display for Stem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.chinese())
    }
}

/// The 12 earthly branches (地支).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

/// All 12 branches in cycle order (index 0 = 子).
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Zi,
    Branch::Chou,
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
];

const BRANCH_CHINESE: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

const BRANCH_PINYIN: [&str; 12] = [
    "Zi", "Chou", "Yin", "Mao", "Chen", "Si", "Wu", "Wei", "Shen", "You", "Xu", "Hai",
];

impl Branch {
    /// 0-based index (子=0 .. 亥=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Branch for an index, wrapping modulo 12.
    pub const fn from_index(index: u8) -> Self {
        ALL_BRANCHES[(index % 12) as usize]
    }

    /// Chinese character.
    pub const fn chinese(self) -> &'static str {
        BRANCH_CHINESE[self as usize]
    }

    /// Pinyin name.
    pub const fn name(self) -> &'static str {
        BRANCH_PINYIN[self as usize]
    }

    /// Parse from Chinese character or pinyin (case-insensitive).
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        ALL_BRANCHES
            .iter()
            .copied()
            .find(|b| b.chinese() == s || b.name().eq_ignore_ascii_case(s))
    }

    /// Branch `steps` positions further along the cycle.
    pub const fn add(self, steps: u8) -> Self {
        Self::from_index(self.index() + steps % 12)
    }

    /// Forward distance from `from` to `self`, in 0..12.
    pub const fn steps_from(self, from: Branch) -> u8 {
        (self.index() + 12 - from.index()) % 12
    }

    /// Outer palace this branch sits on around the grid.
    ///
    /// 子→1, 丑寅→8, 卯→3, 辰巳→4, 午→9, 未申→2, 酉→7, 戌亥→6.
    pub const fn palace(self) -> Palace {
        match self {
            Self::Zi => Palace::Kan,
            Self::Chou | Self::Yin => Palace::Gen,
            Self::Mao => Palace::Zhen,
            Self::Chen | Self::Si => Palace::Xun,
            Self::Wu => Palace::Li,
            Self::Wei | Self::Shen => Palace::Kun,
            Self::You => Palace::Dui,
            Self::Xu | Self::Hai => Palace::Qian,
        }
    }

    /// Two-hour slot containing a wall-clock hour (子 = 23:00–00:59).
    ///
    /// Slot boundaries sit on odd hours, so an exact boundary reading
    /// (e.g. 01:00:00) falls in the later slot.
    pub const fn from_hour(hour: u32) -> Self {
        Self::from_index((((hour + 1) / 2) % 12) as u8)
    }
}

impl Display for Branch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.chinese())
    }
}

/// A stem/branch pair of matching parity: one of the 60 sexagenary positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GanZhi {
    stem: Stem,
    branch: Branch,
}

impl GanZhi {
    /// Pair a stem and branch. `None` when their parities differ.
    pub const fn new(stem: Stem, branch: Branch) -> Option<Self> {
        if stem.index() % 2 == branch.index() % 2 {
            Some(Self { stem, branch })
        } else {
            None
        }
    }

    /// Position for a cycle index, wrapping modulo 60.
    pub const fn from_index(index: u8) -> Self {
        let i = index % 60;
        Self {
            stem: Stem::from_index(i % 10),
            branch: Branch::from_index(i % 12),
        }
    }

    /// Position for any signed day/year count, wrapping modulo 60.
    pub const fn from_count(count: i64) -> Self {
        Self::from_index(count.rem_euclid(60) as u8)
    }

    /// 0-based cycle index (甲子=0 .. 癸亥=59).
    pub const fn index(self) -> u8 {
        // Chinese remainder: i ≡ s (mod 10), i ≡ b (mod 12).
        let s = self.stem.index() as i16;
        let b = self.branch.index() as i16;
        (6 * s - 5 * b).rem_euclid(60) as u8
    }

    pub const fn stem(self) -> Stem {
        self.stem
    }

    pub const fn branch(self) -> Branch {
        self.branch
    }

    /// Position `steps` further along the cycle.
    pub const fn add(self, steps: u8) -> Self {
        Self::from_index(self.index() + steps % 60)
    }

    /// The decade containing this position.
    pub const fn xun(self) -> Xun {
        Xun::ALL[(self.index() / 10) as usize]
    }

    /// Parse a two-character form such as `甲子` or pinyin `Jia-Zi`.
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        let (stem, branch) = match s.split_once(['-', ' ']) {
            Some((a, b)) => (Stem::from_name(a)?, Branch::from_name(b)?),
            None => {
                let mut chars = s.chars();
                let a = chars.next()?;
                let b = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                (
                    Stem::from_name(a.encode_utf8(&mut [0; 4]))?,
                    Branch::from_name(b.encode_utf8(&mut [0; 4]))?,
                )
            }
        };
        Self::new(stem, branch)
    }
}

impl Display for GanZhi {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

/// One of the six 10-position decades of the sexagenary cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Xun {
    JiaZi,
    JiaXu,
    JiaShen,
    JiaWu,
    JiaChen,
    JiaYin,
}

impl Xun {
    /// All six decades in cycle order.
    pub const ALL: [Xun; 6] = [
        Xun::JiaZi,
        Xun::JiaXu,
        Xun::JiaShen,
        Xun::JiaWu,
        Xun::JiaChen,
        Xun::JiaYin,
    ];

    /// 0-based decade number.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// The 甲 position opening the decade.
    pub const fn head(self) -> GanZhi {
        GanZhi::from_index(self.index() * 10)
    }

    /// The Yi stem under which this decade's 甲 hides (六仪):
    /// 甲子戊, 甲戌己, 甲申庚, 甲午辛, 甲辰壬, 甲寅癸.
    pub const fn leader_stem(self) -> Stem {
        Stem::from_index(self.index() + 4)
    }

    /// The two branches no stem reaches within this decade (空亡).
    pub const fn void_branches(self) -> [Branch; 2] {
        let head = self.head().branch();
        [head.add(10), head.add(11)]
    }

    /// Whether a position belongs to this decade.
    pub const fn contains(self, gz: GanZhi) -> bool {
        gz.index() / 10 == self.index()
    }
}

impl Display for Xun {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.head(), self.leader_stem())
    }
}
