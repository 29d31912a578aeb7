//! Plain-text rendering of charts.
//!
//! Palaces are laid out in the Luoshu square with south on top:
//!
//! ```text
//! 4 9 2
//! 3 5 7
//! 8 1 6
//! ```

use std::fmt::{Display, Formatter};

use qimen_base::{CalendarError, Palace, SolarTerm, terms_of_year};
use qimen_time::CivilDate;
use qimen_engine::{Chart, Mark};

const SQUARE: [[Palace; 3]; 3] = [
    [Palace::Xun, Palace::Li, Palace::Kun],
    [Palace::Zhen, Palace::Center, Palace::Dui],
    [Palace::Gen, Palace::Kan, Palace::Qian],
];

const CELL_WIDTH: usize = 14;

/// Terminal columns taken by a string: CJK characters count double.
fn width(s: &str) -> usize {
    s.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum()
}

fn pad(s: &str, cols: usize) -> String {
    let mut out = s.to_string();
    out.extend(std::iter::repeat_n(' ', cols.saturating_sub(width(s))));
    out
}

fn cell_lines(chart: &Chart, palace: Palace) -> [String; 3] {
    if palace.is_center() {
        return [
            format!(" {palace}"),
            format!(" 寄{}", chart.host()),
            String::new(),
        ];
    }
    let v = chart.palace(palace);
    [
        format!(" {} {}", v.spirit, palace),
        format!(" {:<4}{}", v.star.to_string(), v.heaven),
        format!(" {:<4}{}", v.door.to_string(), v.earth),
    ]
}

fn mark_text(mark: &Mark) -> String {
    if mark.struck {
        format!("~{mark}~")
    } else {
        mark.to_string()
    }
}

/// Header, palace square and side marks.
pub struct ChartText<'a>(pub &'a Chart);

impl Display for ChartText<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let chart = self.0;
        let term = chart.term();
        let duty = chart.duty();
        let aux = chart.auxiliary();

        writeln!(f, "时间  {}", chart.time())?;
        writeln!(f, "四柱  {}", chart.pillars())?;
        writeln!(
            f,
            "节气  {} ({} 起, 第{}日)",
            term.term,
            term.start,
            chart.period().elapsed_days + 1
        )?;
        writeln!(f, "局数  {}{} {}", chart.dun(), chart.ju(), chart.yuan())?;
        writeln!(
            f,
            "旬首  {}   值符 {} 落{}   值使 {}门 落{}",
            chart.xun(),
            duty.star,
            duty.star_target,
            duty.door,
            duty.door_target
        )?;
        writeln!(
            f,
            "空亡  日{}{} 时{}{}   马星 {}   天乙 {}",
            aux.day_void[0],
            aux.day_void[1],
            aux.hour_void[0],
            aux.hour_void[1],
            aux.horse,
            chart.tian_yi()
        )?;

        let rule = format!("+{}", format!("{}+", "-".repeat(CELL_WIDTH)).repeat(3));
        writeln!(f, "{rule}")?;
        for row in SQUARE {
            let cells = row.map(|p| cell_lines(chart, p));
            for line in 0..3 {
                f.write_str("|")?;
                for cell in &cells {
                    write!(f, "{}|", pad(&cell[line], CELL_WIDTH))?;
                }
                writeln!(f)?;
            }
            writeln!(f, "{rule}")?;
        }

        for (branch, marks) in chart.side_marks().iter() {
            let text: Vec<String> = marks.iter().map(mark_text).collect();
            writeln!(f, "{branch}  {}", text.join(" "))?;
        }
        Ok(())
    }
}

/// One line per term of a year.
pub struct YearTerms(pub [(SolarTerm, CivilDate); 24]);

impl YearTerms {
    pub fn new(year: i32) -> Result<Self, CalendarError> {
        terms_of_year(year).map(Self)
    }
}

impl Display for YearTerms {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (term, date) in &self.0 {
            let kind = if term.is_jie() { "节" } else { "气" };
            writeln!(
                f,
                "{}  {}  {:>3}°  {}",
                pad(term.chinese(), 4),
                kind,
                term.solar_longitude_deg(),
                date
            )?;
        }
        Ok(())
    }
}
