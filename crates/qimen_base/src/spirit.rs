//! The eight spirits (八神).

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spirit {
    ZhiFu,
    TengShe,
    TaiYin,
    LiuHe,
    BaiHu,
    XuanWu,
    JiuDi,
    JiuTian,
}

/// All eight spirits in placement order, starting from 值符.
pub const ALL_SPIRITS: [Spirit; 8] = [
    Spirit::ZhiFu,
    Spirit::TengShe,
    Spirit::TaiYin,
    Spirit::LiuHe,
    Spirit::BaiHu,
    Spirit::XuanWu,
    Spirit::JiuDi,
    Spirit::JiuTian,
];

impl Spirit {
    pub const fn chinese(self) -> &'static str {
        match self {
            Self::ZhiFu => "值符",
            Self::TengShe => "腾蛇",
            Self::TaiYin => "太阴",
            Self::LiuHe => "六合",
            Self::BaiHu => "白虎",
            Self::XuanWu => "玄武",
            Self::JiuDi => "九地",
            Self::JiuTian => "九天",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::ZhiFu => "ZhiFu",
            Self::TengShe => "TengShe",
            Self::TaiYin => "TaiYin",
            Self::LiuHe => "LiuHe",
            Self::BaiHu => "BaiHu",
            Self::XuanWu => "XuanWu",
            Self::JiuDi => "JiuDi",
            Self::JiuTian => "JiuTian",
        }
    }

    /// One-character abbreviation used on compact grids.
    pub const fn abbrev(self) -> &'static str {
        match self {
            Self::ZhiFu => "符",
            Self::TengShe => "蛇",
            Self::TaiYin => "阴",
            Self::LiuHe => "合",
            Self::BaiHu => "虎",
            Self::XuanWu => "玄",
            Self::JiuDi => "地",
            Self::JiuTian => "天",
        }
    }

    /// Parse from Chinese (full or abbreviated) or pinyin.
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        ALL_SPIRITS.iter().copied().find(|sp| {
            sp.chinese() == s || sp.abbrev() == s || sp.name().eq_ignore_ascii_case(s)
        })
    }
}

impl Display for Spirit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.chinese())
    }
}
