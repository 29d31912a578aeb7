//! Golden-value integration tests for full chart computation.
//!
//! Two charts are pinned palace by palace; the remaining tests check
//! structural properties over many timestamps and every chart option.

use qimen_base::{
    ALL_PALACES, Branch, CalendarError, Door, Dun, Palace, QimenTables, SolarTerm, Spirit, Star,
    Stem, Xun, Yuan,
};
use qimen_engine::{
    Chart, ChartConfig, DoorStart, EngineError, LodgingRule, MarkKind, Plate, QimenEngine,
    SpiritDirection, XunAnchor, YuanMethod, compute_chart,
};
use qimen_time::{CivilDate, CivilTime};

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> CivilTime {
    CivilTime::new(y, mo, d, h, mi, 0).unwrap()
}

fn chart_with(time: CivilTime, config: ChartConfig) -> Chart {
    compute_chart(&time, QimenTables::standard(), config).unwrap()
}

fn chart(time: CivilTime) -> Chart {
    chart_with(time, ChartConfig::default())
}

/// Palace number, earth, heaven, stars, door, spirit.
type Row = (u8, &'static str, &'static str, &'static str, &'static str, &'static str);

fn assert_grid(chart: &Chart, rows: &[Row; 8], host: Palace) {
    for &(n, earth, heaven, stars, door, spirit) in rows {
        let view = chart.palace(Palace::from_number(n).unwrap());
        assert_eq!(view.earth.to_string(), earth, "earth @{n}");
        assert_eq!(view.heaven.to_string(), heaven, "heaven @{n}");
        assert_eq!(view.star.to_string(), stars, "stars @{n}");
        assert_eq!(view.door.to_string(), door, "door @{n}");
        assert_eq!(view.spirit.to_string(), spirit, "spirit @{n}");
    }
    let center = chart.palace(Palace::Center);
    let echoed = chart.palace(host);
    assert_eq!(center.source, host);
    assert_eq!(center.earth, echoed.earth);
    assert_eq!(center.heaven, echoed.heaven);
    assert_eq!(center.star, echoed.star);
    assert_eq!(center.door, echoed.door);
    assert_eq!(center.spirit, echoed.spirit);
}

fn hour_anchor() -> ChartConfig {
    ChartConfig {
        xun_anchor: XunAnchor::Hour,
        ..ChartConfig::default()
    }
}

fn labels(c: &Chart, b: Branch) -> Vec<String> {
    c.side_marks().get(b).iter().map(|m| m.to_string()).collect()
}

/// 2024-02-10 12:00, Yang Dun 5, day decade 甲辰.
#[test]
fn yang_five_lichun_2024() {
    let c = chart(at(2024, 2, 10, 12, 0));
    assert_eq!(c.pillars().to_string(), "甲辰 丙寅 甲辰 庚午");
    assert_eq!(c.term().term, SolarTerm::LiChun);
    assert_eq!(c.term().start, CivilDate::new(2024, 2, 4).unwrap());
    assert_eq!(c.period().elapsed_days, 6);
    assert_eq!(c.yuan(), Yuan::Middle);
    assert_eq!(c.dun(), Dun::Yang);
    assert_eq!(c.ju().get(), 5);
    assert_eq!(c.host(), Palace::Kun);

    let duty = c.duty();
    assert_eq!(c.xun(), Xun::JiaChen);
    assert_eq!(duty.leader, Stem::Ren);
    assert_eq!(duty.position, Palace::Li);
    assert!(!duty.leader_lodged);
    assert_eq!(duty.star, Star::Ying);
    assert_eq!(duty.door, Door::Scenery);
    assert_eq!(duty.star_target, Palace::Dui);
    // 辰 to 午 is two hours: 9 → 1 → 2.
    assert_eq!(duty.door_target, Palace::Kun);

    assert_eq!(c.day_void(), [Branch::Yin, Branch::Mao]);
    assert_eq!(c.hour_void(), [Branch::Xu, Branch::Hai]);
    assert_eq!(c.horse(), Branch::Shen);
    assert_eq!(c.day_horse(), Branch::Yin);
    assert_eq!(c.tian_yi(), Star::Chong);

    assert_grid(
        &c,
        &[
            (1, "癸", "庚", "柱", "开", "太阴"),
            (2, "丁戊", "乙", "辅", "景", "九天"),
            (3, "丙", "癸", "蓬", "生", "白虎"),
            (4, "乙", "辛", "任", "伤", "玄武"),
            (6, "己", "丁戊", "芮禽", "惊", "腾蛇"),
            (7, "庚", "壬", "英", "死", "值符"),
            (8, "辛", "己", "心", "休", "六合"),
            (9, "壬", "丙", "冲", "杜", "九地"),
        ],
        Palace::Kun,
    );
}

/// 2025-09-01 15:00, Yin Dun 4, day decade 甲子.
#[test]
fn yin_four_chushu_2025() {
    let c = chart(at(2025, 9, 1, 15, 0));
    assert_eq!(c.pillars().to_string(), "乙巳 甲申 癸酉 庚申");
    assert_eq!(c.term().term, SolarTerm::ChuShu);
    assert_eq!(c.term().start, CivilDate::new(2025, 8, 23).unwrap());
    assert_eq!(c.period().elapsed_days, 9);
    assert_eq!(c.yuan(), Yuan::Middle);
    assert_eq!(c.dun(), Dun::Yin);
    assert_eq!(c.ju().get(), 4);
    assert_eq!(c.host(), Palace::Gen);

    let duty = c.duty();
    assert_eq!(c.xun(), Xun::JiaZi);
    assert_eq!(duty.leader, Stem::Wu);
    assert_eq!(duty.position, Palace::Xun);
    assert!(!duty.leader_lodged);
    assert_eq!(duty.star, Star::Fu);
    assert_eq!(duty.door, Door::Delusion);
    assert_eq!(duty.star_target, Palace::Kun);
    // Eight hours back from 4 land on the center, lodged in 8.
    assert_eq!(duty.door_target, Palace::Gen);

    assert_eq!(c.day_void(), [Branch::Xu, Branch::Hai]);
    assert_eq!(c.hour_void(), [Branch::Zi, Branch::Chou]);
    assert_eq!(c.horse(), Branch::Yin);
    assert_eq!(c.day_horse(), Branch::Hai);
    assert_eq!(c.tian_yi(), Star::Ren);

    assert_grid(
        &c,
        &[
            (1, "辛", "丁", "柱", "伤", "玄武"),
            (2, "庚", "戊", "辅", "开", "值符"),
            (3, "己", "辛", "蓬", "景", "六合"),
            (4, "戊", "癸乙", "任禽", "死", "太阴"),
            (6, "丙", "庚", "芮", "生", "九地"),
            (7, "丁", "壬", "英", "休", "九天"),
            (8, "癸乙", "丙", "心", "杜", "白虎"),
            (9, "壬", "己", "冲", "惊", "腾蛇"),
        ],
        Palace::Gen,
    );
}

/// 2024-02-10 12:00 anchored on the hour decade 甲子: the leader is lodged.
#[test]
fn yang_five_hour_anchor() {
    let c = chart_with(at(2024, 2, 10, 12, 0), hour_anchor());
    let duty = c.duty();
    assert_eq!(c.xun(), Xun::JiaZi);
    assert_eq!(duty.leader, Stem::Wu);
    assert_eq!(duty.position, Palace::Kun);
    assert!(duty.leader_lodged);
    assert_eq!(duty.star, Star::Qin);
    assert_eq!(duty.door, Door::Death);
    assert_eq!(duty.star_target, Palace::Dui);
    assert_eq!(duty.door_target, Palace::Kun);
    assert_eq!(c.tian_yi(), Star::Ying);

    assert_grid(
        &c,
        &[
            (1, "癸", "己", "心", "休", "太阴"),
            (2, "丁戊", "壬", "英", "死", "九天"),
            (3, "丙", "辛", "任", "伤", "白虎"),
            (4, "乙", "丙", "冲", "杜", "玄武"),
            (6, "己", "庚", "柱", "开", "腾蛇"),
            (7, "庚", "丁戊", "芮禽", "惊", "值符"),
            (8, "辛", "癸", "蓬", "生", "六合"),
            (9, "壬", "乙", "辅", "景", "九地"),
        ],
        Palace::Kun,
    );
}

/// 2025-09-01 15:00 anchored on the hour decade 甲寅.
#[test]
fn yin_four_hour_anchor() {
    let c = chart_with(at(2025, 9, 1, 15, 0), hour_anchor());
    let duty = c.duty();
    assert_eq!(c.xun(), Xun::JiaYin);
    assert_eq!(duty.leader, Stem::Gui);
    assert_eq!(duty.position, Palace::Gen);
    assert!(!duty.leader_lodged);
    assert_eq!(duty.star, Star::Ren);
    assert_eq!(duty.door, Door::Life);
    assert_eq!(duty.star_target, Palace::Kun);
    assert_eq!(duty.door_target, Palace::Kun);
    assert_eq!(c.tian_yi(), Star::Rui);

    assert_grid(
        &c,
        &[
            (1, "辛", "壬", "英", "景", "玄武"),
            (2, "庚", "癸乙", "任禽", "生", "值符"),
            (3, "己", "丁", "柱", "惊", "六合"),
            (4, "戊", "丙", "心", "开", "太阴"),
            (6, "丙", "戊", "辅", "杜", "九地"),
            (7, "丁", "己", "冲", "伤", "九天"),
            (8, "癸乙", "庚", "芮", "死", "白虎"),
            (9, "壬", "辛", "蓬", "休", "腾蛇"),
        ],
        Palace::Gen,
    );
}

#[test]
fn side_marks_yin_four() {
    let c = chart(at(2025, 9, 1, 15, 0));
    assert_eq!(labels(&c, Branch::Zi), ["时空"]);
    assert_eq!(labels(&c, Branch::Chou), ["时空"]);
    assert_eq!(labels(&c, Branch::Yin), ["马星"]);
    assert_eq!(labels(&c, Branch::Si), ["癸六击"]);
    assert_eq!(labels(&c, Branch::Shen), ["月令"]);
    assert_eq!(labels(&c, Branch::Xu), ["丙入墓", "日空"]);
    assert_eq!(labels(&c, Branch::Hai), ["日空"]);
    assert_eq!(c.side_marks().iter().count(), 7);
    assert!(c.side_marks().iter().flat_map(|(_, m)| m).all(|m| !m.struck));
}

#[test]
fn side_marks_yin_four_hour_anchor() {
    let c = chart_with(at(2025, 9, 1, 15, 0), hour_anchor());
    assert_eq!(labels(&c, Branch::Yin), ["庚六击", "马星"]);
    assert_eq!(labels(&c, Branch::Wu), ["辛六击"]);
    assert_eq!(labels(&c, Branch::Chou), ["庚入墓", "时空"]);
    assert_eq!(labels(&c, Branch::Wei), ["癸入墓", "乙入墓"]);
    assert_eq!(labels(&c, Branch::Xu), ["戊入墓", "丙入墓", "日空"]);
    assert_eq!(labels(&c, Branch::Hai), ["日空"]);
    assert_eq!(labels(&c, Branch::Zi), ["时空"]);
    assert_eq!(labels(&c, Branch::Shen), ["月令"]);
}

#[test]
fn side_marks_strike_void_on_month_branch() {
    let c = chart(at(2024, 2, 10, 12, 0));
    let yin = c.side_marks().get(Branch::Yin);
    assert_eq!(yin[0].kind, MarkKind::DayVoid);
    assert!(yin[0].struck);
    assert_eq!(yin[1].kind, MarkKind::MonthCommand);
    assert_eq!(labels(&c, Branch::Chou), ["己入墓"]);
    assert_eq!(labels(&c, Branch::Chen), ["辛入墓"]);
    assert_eq!(labels(&c, Branch::Wei), ["乙入墓"]);
    assert_eq!(labels(&c, Branch::Xu), ["戊入墓", "时空"]);
    assert_eq!(c.side_marks().iter().count(), 8);
}

#[test]
fn double_void_names_its_branch() {
    let mut t = CivilDate::new(2024, 1, 1).unwrap();
    let mut found = 0;
    for _ in 0..60 {
        let c = chart(CivilTime::new(t.year, t.month, t.day, 9, 0, 0).unwrap());
        if c.day_void() == c.hour_void() {
            for b in c.day_void() {
                let marks = c.side_marks().get(b);
                let double: Vec<_> = marks
                    .iter()
                    .filter(|m| m.kind == MarkKind::DoubleVoid(b))
                    .collect();
                assert_eq!(double.len(), 1, "{t} {b}");
                assert_eq!(double[0].to_string(), format!("双{b}空"));
                assert!(
                    marks
                        .iter()
                        .all(|m| !matches!(m.kind, MarkKind::DayVoid | MarkKind::HourVoid))
                );
            }
            found += 1;
        }
        t = t.add_days(1);
    }
    assert!(found > 0);
}

#[test]
fn reverse_lookups() {
    let c = chart(at(2024, 2, 10, 12, 0));
    let wu = c.find_stem(Plate::Heaven, Stem::Wu).unwrap();
    assert_eq!(wu.palace, Palace::Qian);
    assert!(wu.lodged);
    let wu = c.find_stem(Plate::Earth, Stem::Wu).unwrap();
    assert_eq!(wu.palace, Palace::Kun);
    assert!(c.find_stem(Plate::Earth, Stem::Jia).is_none());

    assert_eq!(c.find_star(Star::Qin), Some(Palace::Qian));
    assert_eq!(c.find_star(Star::Peng), Some(Palace::Zhen));
    assert_eq!(c.find_door(Door::Open), Some(Palace::Kan));
    assert_eq!(c.find_spirit(Spirit::ZhiFu), Some(Palace::Dui));
}

#[test]
fn home_symbols_are_reported() {
    let c = chart(at(2024, 2, 10, 12, 0));
    let kan = c.palace(Palace::Kan);
    assert_eq!(kan.home_star, Star::Peng);
    assert_eq!(kan.home_door, Some(Door::Rest));
    let center = c.palace(Palace::Center);
    assert_eq!(center.home_star, Star::Qin);
    assert_eq!(center.home_door, None);
}

#[test]
fn deterministic() {
    let t = at(2025, 9, 1, 15, 0);
    assert_eq!(chart(t), chart(t));
}

#[test]
fn every_chart_has_one_converged_qin() {
    let tables = QimenTables::standard();
    let mut t = CivilDate::new(2023, 1, 1).unwrap();
    for i in 0..400 {
        let hour = (i * 7 % 24) as u32;
        let c = chart(CivilTime::new(t.year, t.month, t.day, hour, 30, 0).unwrap());
        let converged: Vec<Palace> = c
            .stars()
            .outer()
            .filter(|(_, cell)| cell.is_converged())
            .map(|(p, _)| p)
            .collect();
        assert_eq!(converged.len(), 1, "{t} {hour}h");
        let host_star = tables.home_star(c.host());
        assert_eq!(c.find_star(Star::Qin), c.find_star(host_star), "{t} {hour}h");
        assert!(c.stars().get(c.duty().star_target).contains(c.duty().star));
        t = t.add_days(1);
    }
}

#[test]
fn voids_never_hold_the_pillar_branch() {
    let mut t = CivilDate::new(2024, 1, 1).unwrap();
    for _ in 0..60 {
        let c = chart(CivilTime::new(t.year, t.month, t.day, 9, 0, 0).unwrap());
        let day = c.pillars().day.branch();
        let hour = c.pillars().hour.branch();
        assert!(!c.day_void().contains(&day));
        assert!(!c.hour_void().contains(&hour));
        assert_ne!(c.day_void()[0], c.day_void()[1]);
        t = t.add_days(1);
    }
}

#[test]
fn term_boundary_selects_later_term() {
    let before = chart(at(2024, 2, 3, 22, 0));
    assert_eq!(before.term().term, SolarTerm::DaHan);
    let on = chart(at(2024, 2, 4, 0, 0));
    assert_eq!(on.term().term, SolarTerm::LiChun);
    assert_eq!(on.period().elapsed_days, 0);
    assert_eq!(on.yuan(), Yuan::Upper);
    assert_eq!(on.ju().get(), 8);
}

#[test]
fn late_zi_keeps_civil_term() {
    // 23:xx takes the next day's pillar but the term of its own date.
    let c = chart(at(2024, 2, 3, 23, 30));
    assert_eq!(c.term().term, SolarTerm::DaHan);
    assert_eq!(c.pillars().hour.branch(), Branch::Zi);
}

#[test]
fn out_of_range_is_a_calendar_error() {
    let err = compute_chart(
        &at(1850, 6, 1, 12, 0),
        QimenTables::standard(),
        ChartConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Calendar(CalendarError::OutOfRange { .. })
    ));
    assert!(
        compute_chart(
            &at(2101, 6, 1, 12, 0),
            QimenTables::standard(),
            ChartConfig::default()
        )
        .is_err()
    );
}

#[test]
fn fu_tou_method_changes_yuan() {
    let config = ChartConfig {
        yuan_method: YuanMethod::FuTou,
        ..ChartConfig::default()
    };
    let c = chart_with(at(2024, 2, 10, 12, 0), config);
    // 甲辰 is its own Fu Tou; 辰 gives the lower Yuan.
    assert_eq!(c.yuan(), Yuan::Lower);
    assert_eq!(c.ju().get(), 2);
    assert_eq!(c.palace(Palace::Kun).earth.primary, Stem::Wu);
}

#[test]
fn door_count_starts_at_the_center_for_a_lodged_leader() {
    let config = ChartConfig {
        lodging: LodgingRule::AlwaysKun,
        ..hour_anchor()
    };
    let c = chart_with(at(2024, 2, 10, 12, 0), config);
    assert!(c.duty().leader_lodged);
    // Six hours from 5: 6 7 8 9 1 2.
    assert_eq!(c.duty().door_target, Palace::Kun);
}

#[test]
fn door_home_start_counts_from_the_duty_door_home() {
    let config = ChartConfig {
        lodging: LodgingRule::AlwaysKun,
        door_start: DoorStart::DoorHome,
        ..hour_anchor()
    };
    let c = chart_with(at(2024, 2, 10, 12, 0), config);
    assert_eq!(c.duty().door, Door::Death);
    // Six hours from 死's home 2: 3 4 5 6 7 8.
    assert_eq!(c.duty().door_target, Palace::Gen);
    let expected = [
        (Palace::Gen, Door::Death),
        (Palace::Zhen, Door::Fear),
        (Palace::Xun, Door::Open),
        (Palace::Li, Door::Rest),
        (Palace::Kun, Door::Life),
        (Palace::Dui, Door::Harm),
        (Palace::Qian, Door::Delusion),
        (Palace::Kan, Door::Scenery),
    ];
    for (palace, door) in expected {
        assert_eq!(*c.doors().get(palace), door, "{palace}");
    }
}

#[test]
fn door_home_start_matches_leader_start_for_a_plain_leader() {
    let t = at(2025, 9, 1, 15, 0);
    let config = ChartConfig {
        door_start: DoorStart::DoorHome,
        ..ChartConfig::default()
    };
    let home = chart_with(t, config);
    let leader = chart(t);
    assert!(!leader.duty().leader_lodged);
    assert_eq!(home.duty(), leader.duty());
    assert_eq!(home.doors(), leader.doors());
}

#[test]
fn hour_branch_start_sends_the_door_to_the_hour_palace() {
    let config = ChartConfig {
        door_start: DoorStart::HourBranch,
        ..hour_anchor()
    };
    let c = chart_with(at(2024, 2, 10, 12, 0), config);
    // 午 sits on palace 9.
    assert_eq!(c.duty().door_target, Branch::Wu.palace());
    let expected = [
        (Palace::Li, Door::Death),
        (Palace::Kun, Door::Fear),
        (Palace::Dui, Door::Open),
        (Palace::Qian, Door::Rest),
        (Palace::Kan, Door::Life),
        (Palace::Gen, Door::Harm),
        (Palace::Zhen, Door::Delusion),
        (Palace::Xun, Door::Scenery),
    ];
    for (palace, door) in expected {
        assert_eq!(*c.doors().get(palace), door, "{palace}");
    }
}

#[test]
fn always_kun_lodging_in_yin_dun() {
    let config = ChartConfig {
        lodging: LodgingRule::AlwaysKun,
        ..ChartConfig::default()
    };
    let c = chart_with(at(2025, 9, 1, 15, 0), config);
    assert_eq!(c.host(), Palace::Kun);
    assert_eq!(c.palace(Palace::Kun).earth.to_string(), "庚乙");
    assert_eq!(c.palace(Palace::Gen).earth.to_string(), "癸");
    // 禽 now rides with 芮, which stands in palace 6.
    assert_eq!(c.find_star(Star::Qin), Some(Palace::Qian));
    assert_eq!(c.palace(Palace::Qian).heaven.to_string(), "庚乙");
    assert_eq!(c.palace(Palace::Center).source, Palace::Kun);
}

#[test]
fn always_ascending_spirits_in_yin_dun() {
    let config = ChartConfig {
        spirit_direction: SpiritDirection::AlwaysAscending,
        ..ChartConfig::default()
    };
    let c = chart_with(at(2025, 9, 1, 15, 0), config);
    let expected = [
        (Palace::Kun, Spirit::ZhiFu),
        (Palace::Dui, Spirit::TengShe),
        (Palace::Qian, Spirit::TaiYin),
        (Palace::Kan, Spirit::LiuHe),
        (Palace::Gen, Spirit::BaiHu),
        (Palace::Zhen, Spirit::XuanWu),
        (Palace::Xun, Spirit::JiuDi),
        (Palace::Li, Spirit::JiuTian),
    ];
    for (palace, spirit) in expected {
        assert_eq!(*c.spirits().get(palace), spirit, "{palace}");
    }
}

#[test]
fn engine_matches_free_function() {
    let engine = QimenEngine::new(QimenTables::standard(), ChartConfig::default()).unwrap();
    let t = at(2024, 2, 10, 12, 0);
    assert_eq!(engine.compute_chart(&t).unwrap(), chart(t));
    assert_eq!(ALL_PALACES.len(), engine.compute_chart(&t).unwrap().palaces().count());
}
