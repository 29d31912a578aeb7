//! Side annotations: marks placed on the twelve branches around the grid.
//!
//! Collected per branch in this order: stem clash (六仪击刑), tomb (入墓),
//! day and hour void, month command (月令), horse (马星). Repeated marks on
//! one branch are then merged: a day void and an hour void become a single
//! double void, and any other repeated mark becomes one doubled mark.

use std::fmt::{Display, Formatter};

use qimen_base::{ALL_BRANCHES, Branch, Palace, PalaceGrid, Stem};

use crate::earth::StemCell;

/// Kind of side mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// A Yi stem sitting in the palace that punishes it.
    StemClash(Stem),
    /// A stem sitting in its tomb palace.
    Tomb(Stem),
    DayVoid,
    HourVoid,
    /// Day void and hour void on the same branch.
    DoubleVoid(Branch),
    MonthCommand,
    Horse,
}

impl MarkKind {
    pub fn label(&self) -> String {
        match self {
            Self::StemClash(s) => format!("{s}六击"),
            Self::Tomb(s) => format!("{s}入墓"),
            Self::DayVoid => "日空".into(),
            Self::HourVoid => "时空".into(),
            Self::DoubleVoid(b) => format!("双{b}空"),
            Self::MonthCommand => "月令".into(),
            Self::Horse => "马星".into(),
        }
    }

    const fn is_void(&self) -> bool {
        matches!(self, Self::DayVoid | Self::HourVoid)
    }
}

/// One mark on a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mark {
    pub kind: MarkKind,
    /// The mark was raised more than once on this branch.
    pub doubled: bool,
    /// The mark is cancelled (void on the month branch).
    pub struck: bool,
}

impl Mark {
    const fn new(kind: MarkKind, struck: bool) -> Self {
        Self {
            kind,
            doubled: false,
            struck,
        }
    }
}

impl Display for Mark {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.doubled {
            f.write_str("双")?;
        }
        f.write_str(&self.kind.label())
    }
}

/// Marks for all twelve branches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SideMarks {
    marks: [Vec<Mark>; 12],
}

impl SideMarks {
    pub fn get(&self, branch: Branch) -> &[Mark] {
        &self.marks[branch.index() as usize]
    }

    /// Branches carrying at least one mark, in branch order.
    pub fn iter(&self) -> impl Iterator<Item = (Branch, &[Mark])> {
        ALL_BRANCHES
            .iter()
            .map(move |&b| (b, self.get(b)))
            .filter(|(_, m)| !m.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.marks.iter().all(Vec::is_empty)
    }
}

/// Inputs for side annotation.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationInput<'a> {
    pub earth: &'a PalaceGrid<StemCell>,
    pub heaven: &'a PalaceGrid<StemCell>,
    pub month_branch: Branch,
    pub day_void: [Branch; 2],
    pub hour_void: [Branch; 2],
    pub horse: Branch,
}

/// Stem, palace and marked branch of each clash rule.
const CLASH_RULES: [(Stem, Palace, Branch); 6] = [
    (Stem::Wu, Palace::Zhen, Branch::Mao),
    (Stem::Ji, Palace::Kun, Branch::Wei),
    (Stem::Geng, Palace::Gen, Branch::Yin),
    (Stem::Xin, Palace::Li, Branch::Wu),
    (Stem::Ren, Palace::Xun, Branch::Chen),
    (Stem::Gui, Palace::Xun, Branch::Si),
];

/// Tomb palace, its marked branch and the stems entombed there.
const TOMB_RULES: [(Palace, Branch, &[Stem]); 4] = [
    (Palace::Gen, Branch::Chou, &[Stem::Ding, Stem::Ji, Stem::Geng]),
    (Palace::Xun, Branch::Chen, &[Stem::Xin, Stem::Ren]),
    (Palace::Kun, Branch::Wei, &[Stem::Yi, Stem::Gui]),
    (Palace::Qian, Branch::Xu, &[Stem::Bing, Stem::Wu]),
];

/// Compute the merged side marks for a chart.
pub fn annotate(input: &AnnotationInput<'_>) -> SideMarks {
    let mut raw: [Vec<Mark>; 12] = Default::default();
    let mut push = |branch: Branch, mark: Mark| raw[branch.index() as usize].push(mark);

    // Heaven stems before earth stems of the same palace.
    let palace_stems = |palace: Palace| {
        input
            .heaven
            .get(palace)
            .stems()
            .chain(input.earth.get(palace).stems())
    };

    for (stem, palace, branch) in CLASH_RULES {
        if palace_stems(palace).any(|s| s == stem) {
            push(branch, Mark::new(MarkKind::StemClash(stem), false));
        }
    }

    for (palace, branch, stems) in TOMB_RULES {
        for s in palace_stems(palace).filter(|s| stems.contains(s)) {
            push(branch, Mark::new(MarkKind::Tomb(s), false));
        }
    }

    for b in input.day_void {
        push(b, Mark::new(MarkKind::DayVoid, b == input.month_branch));
    }
    for b in input.hour_void {
        push(b, Mark::new(MarkKind::HourVoid, b == input.month_branch));
    }

    push(input.month_branch, Mark::new(MarkKind::MonthCommand, false));
    push(input.horse, Mark::new(MarkKind::Horse, false));

    SideMarks {
        marks: std::array::from_fn(|i| merge(&raw[i], ALL_BRANCHES[i])),
    }
}

/// Collapse repeated marks on one branch, keeping first-seen order.
fn merge(marks: &[Mark], branch: Branch) -> Vec<Mark> {
    let voids: Vec<&Mark> = marks.iter().filter(|m| m.kind.is_void()).collect();
    let mut out: Vec<Mark> = Vec::with_capacity(marks.len());
    let mut void_done = false;

    for mark in marks {
        if mark.kind.is_void() {
            if void_done {
                continue;
            }
            void_done = true;
            if voids.len() >= 2 {
                out.push(Mark::new(
                    MarkKind::DoubleVoid(branch),
                    voids.iter().any(|m| m.struck),
                ));
            } else {
                out.push(*mark);
            }
        } else if let Some(seen) = out.iter_mut().find(|m| m.kind == mark.kind) {
            seen.doubled = true;
        } else {
            out.push(*mark);
        }
    }
    out
}
