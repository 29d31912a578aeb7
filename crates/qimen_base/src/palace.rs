//! The nine Luoshu palaces and the grid arena that holds one chart layer.
//!
//! Palaces are numbered 1–9 in Luoshu order. The eight outer palaces form a
//! clockwise ring (1 8 3 4 9 2 7 6) along which every rotating layer moves.
//! The center (5) has no trigram of its own: a layer stores only the eight
//! outer cells and the center resolves through a back-reference to its
//! lodging host.

use std::fmt::{Display, Formatter};

/// One of the nine Luoshu palaces, named after its trigram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Palace {
    Kan,
    Kun,
    Zhen,
    Xun,
    Center,
    Qian,
    Dui,
    Gen,
    Li,
}

/// All nine palaces in Luoshu number order (index 0 = palace 1).
pub const ALL_PALACES: [Palace; 9] = [
    Palace::Kan,
    Palace::Kun,
    Palace::Zhen,
    Palace::Xun,
    Palace::Center,
    Palace::Qian,
    Palace::Dui,
    Palace::Gen,
    Palace::Li,
];

/// The eight outer palaces in clockwise order, starting from Kan (north).
pub const RING: [Palace; 8] = [
    Palace::Kan,
    Palace::Gen,
    Palace::Zhen,
    Palace::Xun,
    Palace::Li,
    Palace::Kun,
    Palace::Dui,
    Palace::Qian,
];

impl Palace {
    /// Luoshu number 1..=9.
    pub const fn number(self) -> u8 {
        self as u8 + 1
    }

    /// Palace for a Luoshu number, `None` outside 1..=9.
    pub const fn from_number(n: u8) -> Option<Self> {
        if n >= 1 && n <= 9 {
            Some(ALL_PALACES[(n - 1) as usize])
        } else {
            None
        }
    }

    /// Trigram character (`中` for the center).
    pub const fn trigram(self) -> &'static str {
        match self {
            Self::Kan => "坎",
            Self::Kun => "坤",
            Self::Zhen => "震",
            Self::Xun => "巽",
            Self::Center => "中",
            Self::Qian => "乾",
            Self::Dui => "兑",
            Self::Gen => "艮",
            Self::Li => "离",
        }
    }

    /// Compass direction of the palace.
    pub const fn direction(self) -> &'static str {
        match self {
            Self::Kan => "N",
            Self::Kun => "SW",
            Self::Zhen => "E",
            Self::Xun => "SE",
            Self::Center => "C",
            Self::Qian => "NW",
            Self::Dui => "W",
            Self::Gen => "NE",
            Self::Li => "S",
        }
    }

    pub const fn is_center(self) -> bool {
        matches!(self, Self::Center)
    }

    /// Position on the clockwise ring, `None` for the center.
    pub const fn ring_index(self) -> Option<usize> {
        match self {
            Self::Kan => Some(0),
            Self::Gen => Some(1),
            Self::Zhen => Some(2),
            Self::Xun => Some(3),
            Self::Li => Some(4),
            Self::Kun => Some(5),
            Self::Dui => Some(6),
            Self::Qian => Some(7),
            Self::Center => None,
        }
    }

    /// Walk `steps` palaces along the Luoshu number sequence 1→2→…→9→1,
    /// forward when `ascending`, backward otherwise. The center is a regular
    /// stop on this walk.
    pub const fn luoshu_step(self, steps: u32, ascending: bool) -> Self {
        let n = (self.number() - 1) as u32;
        let s = steps % 9;
        let idx = if ascending { (n + s) % 9 } else { (n + 9 - s) % 9 };
        ALL_PALACES[idx as usize]
    }
}

/// Steps needed to walk from `from` to `to` along the Luoshu number sequence.
pub const fn luoshu_distance(from: Palace, to: Palace, ascending: bool) -> u32 {
    let a = from.number() as u32;
    let b = to.number() as u32;
    if ascending { (b + 9 - a) % 9 } else { (a + 9 - b) % 9 }
}

impl Display for Palace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.number(), self.trigram())
    }
}

/// Clockwise ring distance from `from` to `to`, in 0..8.
///
/// `None` if either palace is the center.
pub const fn ring_offset(from: Palace, to: Palace) -> Option<usize> {
    match (from.ring_index(), to.ring_index()) {
        (Some(a), Some(b)) => Some((b + 8 - a) % 8),
        _ => None,
    }
}

/// Rotate a ring-ordered layer clockwise: the value at ring position `i`
/// moves to position `i + steps`. Negative steps rotate counter-clockwise.
pub fn rotate_ring<T: Copy>(ring: &[T; 8], steps: i32) -> [T; 8] {
    let mut out = *ring;
    for (i, &value) in ring.iter().enumerate() {
        let j = (i as i32 + steps).rem_euclid(8) as usize;
        out[j] = value;
    }
    out
}

/// How a palace's value is held in a [`PalaceGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot<'a, T> {
    /// An outer palace holding its own value.
    Own(&'a T),
    /// The center, echoing the value of its lodging host.
    Lodged { host: Palace, value: &'a T },
}

impl<'a, T> Slot<'a, T> {
    /// The value, resolving a lodged center through its host.
    pub fn value(&self) -> &'a T {
        match *self {
            Self::Own(v) => v,
            Self::Lodged { value, .. } => value,
        }
    }
}

/// One chart layer laid on the nine palaces.
///
/// Stores the eight outer cells in [`RING`] order plus the ring position of
/// the center's lodging host. Reading the center resolves to the host cell,
/// so consumers never special-case palace 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PalaceGrid<T> {
    ring: [T; 8],
    host: usize,
}

impl<T> PalaceGrid<T> {
    /// Build from ring-ordered cells. `None` if `host` is the center.
    pub fn new(ring: [T; 8], host: Palace) -> Option<Self> {
        let host = host.ring_index()?;
        Some(Self { ring, host })
    }

    /// Build by evaluating `f` on every outer palace.
    pub fn from_fn(f: impl FnMut(Palace) -> T, host: Palace) -> Option<Self> {
        Self::new(RING.map(f), host)
    }

    /// A grid with different cells but the same lodging host.
    pub fn with_ring<U>(&self, ring: [U; 8]) -> PalaceGrid<U> {
        PalaceGrid {
            ring,
            host: self.host,
        }
    }

    /// Value at a palace; the center reads through its host.
    pub fn get(&self, palace: Palace) -> &T {
        let i = palace.ring_index().unwrap_or(self.host);
        &self.ring[i]
    }

    /// How the palace holds its value.
    pub fn slot(&self, palace: Palace) -> Slot<'_, T> {
        match palace.ring_index() {
            Some(i) => Slot::Own(&self.ring[i]),
            None => Slot::Lodged {
                host: self.host(),
                value: &self.ring[self.host],
            },
        }
    }

    /// The outer palace the center lodges in.
    pub fn host(&self) -> Palace {
        RING[self.host]
    }

    /// Ring-ordered outer cells.
    pub fn ring(&self) -> &[T; 8] {
        &self.ring
    }

    /// Outer palaces with their cells, clockwise from Kan.
    pub fn outer(&self) -> impl Iterator<Item = (Palace, &T)> {
        RING.iter().copied().zip(self.ring.iter())
    }

    /// All nine palaces in number order, the center resolved.
    pub fn iter(&self) -> impl Iterator<Item = (Palace, &T)> {
        ALL_PALACES.iter().map(move |&p| (p, self.get(p)))
    }

    /// First outer palace whose cell satisfies `pred`.
    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<Palace> {
        self.outer().find(|(_, v)| pred(v)).map(|(p, _)| p)
    }
}
