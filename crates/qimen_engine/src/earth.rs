//! Earth plate (地盘) placement.
//!
//! The nine Yi stems are laid from the Ju palace along the Luoshu walk,
//! ascending under Yang Dun and descending under Yin Dun. The stem landing on
//! the center is carried as a lodged stem in the host palace.

use std::fmt::{Display, Formatter};

use qimen_base::{Dun, Ju, Palace, PalaceGrid, QimenTables, Stem, luoshu_distance};

use crate::error::EngineError;

/// The stems held by one palace of a stem plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StemCell {
    /// The palace's own stem.
    pub primary: Stem,
    /// The center stem riding in this palace, if this is the host.
    pub lodged: Option<Stem>,
}

impl StemCell {
    pub fn contains(&self, stem: Stem) -> bool {
        self.primary == stem || self.lodged == Some(stem)
    }

    /// Primary stem first, then the lodged stem.
    pub fn stems(&self) -> impl Iterator<Item = Stem> {
        std::iter::once(self.primary).chain(self.lodged)
    }
}

impl Display for StemCell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.lodged {
            Some(lodged) => write!(f, "{}{}", self.primary, lodged),
            None => write!(f, "{}", self.primary),
        }
    }
}

/// Where a stem sits on a stem plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StemLocation {
    /// Outer palace holding the stem.
    pub palace: Palace,
    /// Whether the stem is the lodged center stem of that palace.
    pub lodged: bool,
}

/// Lay the earth plate for a Ju and direction.
pub fn place_earth(
    ju: Ju,
    dun: Dun,
    host: Palace,
    tables: &QimenTables,
) -> Result<PalaceGrid<StemCell>, EngineError> {
    let start = ju.palace();
    let ascending = dun.is_yang();
    let stem_at = |palace| tables.yi_order[luoshu_distance(start, palace, ascending) as usize];
    let center = stem_at(Palace::Center);

    PalaceGrid::from_fn(
        |palace| StemCell {
            primary: stem_at(palace),
            lodged: (palace == host).then_some(center),
        },
        host,
    )
    .ok_or_else(|| EngineError::InvariantViolation(format!("lodging host {host} is the center")))
}

/// Find a stem on a stem plate.
pub fn locate_stem(plate: &PalaceGrid<StemCell>, stem: Stem) -> Option<StemLocation> {
    plate.outer().find_map(|(palace, cell)| {
        if cell.primary == stem {
            Some(StemLocation {
                palace,
                lodged: false,
            })
        } else if cell.lodged == Some(stem) {
            Some(StemLocation {
                palace,
                lodged: true,
            })
        } else {
            None
        }
    })
}
