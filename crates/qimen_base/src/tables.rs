//! Static domain tables consumed by the chart engine.
//!
//! The engine never hard-codes symbol orders: every placer reads them from a
//! [`QimenTables`] value. [`QimenTables::standard`] returns the traditional
//! tables as read-only static data; alternative tables (e.g. loaded from a
//! file) must pass [`QimenTables::validate`] before use.

use crate::door::Door;
use crate::error::TableError;
use crate::ganzhi::{ALL_BRANCHES, Branch, Stem, Xun};
use crate::palace::Palace;
use crate::period::{ALL_YUAN, Ju, Yuan};
use crate::solar_term::{ALL_SOLAR_TERMS, SolarTerm};
use crate::spirit::Spirit;
use crate::star::Star;

/// Symbol orders and lookup tables for chart construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QimenTables {
    /// The nine Yi stems in earth-plate laying order (三奇六仪).
    pub yi_order: [Stem; 9],
    /// Ju number per term (Gregorian order) and Yuan (upper, middle, lower).
    pub ju_table: [[u8; 3]; 24],
    /// Stars along the ring, starting at palace 1.
    pub star_ring: [Star; 8],
    /// The star living in the center.
    pub center_star: Star,
    /// Doors along the ring, starting at palace 1.
    pub door_ring: [Door; 8],
    /// Spirits in placement order, starting from the duty spirit.
    pub spirit_order: [Spirit; 8],
    /// Horse branch per branch index.
    pub horse: [Branch; 12],
    /// Leader stem per Xun, in cycle order.
    pub xun_leaders: [Stem; 6],
}

/// The traditional tables.
pub static STANDARD_TABLES: QimenTables = QimenTables {
    yi_order: [
        Stem::Wu,
        Stem::Ji,
        Stem::Geng,
        Stem::Xin,
        Stem::Ren,
        Stem::Gui,
        Stem::Ding,
        Stem::Bing,
        Stem::Yi,
    ],
    ju_table: [
        [2, 8, 5], // 小寒
        [3, 9, 6], // 大寒
        [8, 5, 2], // 立春
        [9, 6, 3], // 雨水
        [1, 7, 4], // 惊蛰
        [3, 9, 6], // 春分
        [4, 1, 7], // 清明
        [5, 2, 8], // 谷雨
        [4, 1, 7], // 立夏
        [5, 2, 8], // 小满
        [6, 3, 9], // 芒种
        [9, 3, 6], // 夏至
        [8, 2, 5], // 小暑
        [7, 1, 4], // 大暑
        [2, 5, 8], // 立秋
        [1, 4, 7], // 处暑
        [9, 3, 6], // 白露
        [7, 1, 4], // 秋分
        [6, 9, 3], // 寒露
        [5, 8, 2], // 霜降
        [6, 9, 3], // 立冬
        [5, 8, 2], // 小雪
        [4, 7, 1], // 大雪
        [1, 7, 4], // 冬至
    ],
    star_ring: [
        Star::Peng,
        Star::Ren,
        Star::Chong,
        Star::Fu,
        Star::Ying,
        Star::Rui,
        Star::Zhu,
        Star::Xin,
    ],
    center_star: Star::Qin,
    door_ring: [
        Door::Rest,
        Door::Life,
        Door::Harm,
        Door::Delusion,
        Door::Scenery,
        Door::Death,
        Door::Fear,
        Door::Open,
    ],
    spirit_order: [
        Spirit::ZhiFu,
        Spirit::TengShe,
        Spirit::TaiYin,
        Spirit::LiuHe,
        Spirit::BaiHu,
        Spirit::XuanWu,
        Spirit::JiuDi,
        Spirit::JiuTian,
    ],
    // 申子辰→寅, 寅午戌→申, 亥卯未→巳, 巳酉丑→亥
    horse: [
        Branch::Yin,  // 子
        Branch::Hai,  // 丑
        Branch::Shen, // 寅
        Branch::Si,   // 卯
        Branch::Yin,  // 辰
        Branch::Hai,  // 巳
        Branch::Shen, // 午
        Branch::Si,   // 未
        Branch::Yin,  // 申
        Branch::Hai,  // 酉
        Branch::Shen, // 戌
        Branch::Si,   // 亥
    ],
    xun_leaders: [
        Stem::Wu,
        Stem::Ji,
        Stem::Geng,
        Stem::Xin,
        Stem::Ren,
        Stem::Gui,
    ],
};

fn ensure_distinct<T: PartialEq + std::fmt::Debug>(
    table: &'static str,
    items: &[T],
) -> Result<(), TableError> {
    for (i, a) in items.iter().enumerate() {
        if items[i + 1..].contains(a) {
            return Err(TableError::Malformed(table, format!("{a:?} appears twice")));
        }
    }
    Ok(())
}

impl QimenTables {
    /// The built-in traditional tables.
    pub fn standard() -> &'static QimenTables {
        &STANDARD_TABLES
    }

    /// Check every table for completeness and consistency.
    pub fn validate(&self) -> Result<(), TableError> {
        for (term, row) in ALL_SOLAR_TERMS.iter().zip(&self.ju_table) {
            for (yuan, &value) in ALL_YUAN.iter().zip(row) {
                if Ju::new(value).is_none() {
                    return Err(TableError::JuOutOfRange {
                        term: term.chinese(),
                        yuan: yuan.name(),
                        value,
                    });
                }
            }
        }

        ensure_distinct("yi order", &self.yi_order)?;
        if self.yi_order.contains(&Stem::Jia) {
            return Err(TableError::Malformed(
                "yi order",
                "甲 never appears on the plate".into(),
            ));
        }

        ensure_distinct("star ring", &self.star_ring)?;
        if self.star_ring.contains(&self.center_star) {
            return Err(TableError::Malformed(
                "star ring",
                format!("center star {} also on the ring", self.center_star),
            ));
        }
        ensure_distinct("door ring", &self.door_ring)?;
        ensure_distinct("spirit order", &self.spirit_order)?;

        ensure_distinct("xun leaders", &self.xun_leaders)?;
        for leader in &self.xun_leaders {
            if !self.yi_order.contains(leader) {
                return Err(TableError::Malformed(
                    "xun leaders",
                    format!("leader {leader} is not on the yi order"),
                ));
            }
        }

        // Each triangle (branches four apart) shares one horse, and the four
        // triangles use four distinct horses.
        for b in ALL_BRANCHES {
            let h = self.horse_for(b);
            if self.horse_for(b.add(4)) != h || self.horse_for(b.add(8)) != h {
                return Err(TableError::Malformed(
                    "horse",
                    format!("triangle of {b} has inconsistent horses"),
                ));
            }
        }
        ensure_distinct("horse", &self.horse[..4])?;
        Ok(())
    }

    /// Ju for a term and Yuan.
    pub fn ju(&self, term: SolarTerm, yuan: Yuan) -> Result<Ju, TableError> {
        let value = self.ju_table[term.index() as usize][yuan.index()];
        Ju::new(value).ok_or(TableError::JuOutOfRange {
            term: term.chinese(),
            yuan: yuan.name(),
            value,
        })
    }

    /// Star homed at a palace (the center star for palace 5).
    pub fn home_star(&self, palace: Palace) -> Star {
        match palace.ring_index() {
            Some(i) => self.star_ring[i],
            None => self.center_star,
        }
    }

    /// Door homed at a palace; the center has none.
    pub fn home_door(&self, palace: Palace) -> Option<Door> {
        palace.ring_index().map(|i| self.door_ring[i])
    }

    /// Horse branch for a branch.
    pub fn horse_for(&self, branch: Branch) -> Branch {
        self.horse[branch.index() as usize]
    }

    /// Leader stem of a Xun by table.
    pub fn xun_leader(&self, xun: Xun) -> Stem {
        self.xun_leaders[xun.index() as usize]
    }
}
