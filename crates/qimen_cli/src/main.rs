mod render;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use qimen_base::{ZiHourRule, active_term, calendar_info};
use qimen_config::{ChartOptions, QimenConfig, load_config, load_tables, zi_hour_from_name};
use qimen_engine::QimenEngine;
use qimen_time::CivilTime;
use tracing_subscriber::EnvFilter;

use render::{ChartText, YearTerms};

#[derive(Parser)]
#[command(name = "qimen", about = "Qi Men Dun Jia chart CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ChartFlags {
    /// JSON config file (tables and chart options)
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON tables file replacing the built-in tables
    #[arg(long)]
    tables: Option<PathBuf>,
    /// Yuan method: elapsed (default) or fu-tou
    #[arg(long)]
    yuan_method: Option<String>,
    /// Xun anchor pillar: day (default) or hour
    #[arg(long)]
    xun_anchor: Option<String>,
    /// Duty door count start: leader (default), door-home or hour-branch
    #[arg(long)]
    door_start: Option<String>,
    /// Center lodging: by-dun (default) or always-kun
    #[arg(long)]
    lodging: Option<String>,
    /// Spirit direction: follow-dun (default) or always-ascending
    #[arg(long)]
    spirit_direction: Option<String>,
    /// Day of 23:00-23:59: next-day (default) or split
    #[arg(long)]
    zi_hour: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Full chart for a local civil time
    Chart {
        /// Local time (YYYY-MM-DDThh:mm[:ss] or yyyymmddhhmmss); now if absent
        #[arg(long)]
        date: Option<String>,
        #[command(flatten)]
        flags: ChartFlags,
    },
    /// Four pillars for a local civil time
    Pillars {
        /// Local time (YYYY-MM-DDThh:mm[:ss] or yyyymmddhhmmss); now if absent
        #[arg(long)]
        date: Option<String>,
        /// Day of 23:00-23:59: next-day (default) or split
        #[arg(long)]
        zi_hour: Option<String>,
    },
    /// Solar term governing a date, or all terms of a year
    Term {
        /// Date (YYYY-MM-DD); today if absent
        #[arg(long, conflicts_with = "year")]
        date: Option<String>,
        /// List the 24 terms of this year
        #[arg(long)]
        year: Option<i32>,
    },
}

fn die(msg: impl std::fmt::Display) -> ! {
    eprintln!("{msg}");
    std::process::exit(1);
}

fn resolve_time(date: Option<&str>) -> CivilTime {
    match date {
        Some(s) => s
            .parse()
            .unwrap_or_else(|e| die(format!("Invalid date '{s}': {e}"))),
        None => CivilTime::from(chrono::Local::now().naive_local()),
    }
}

fn parse_zi_hour(name: Option<&str>) -> ZiHourRule {
    match name {
        None => ZiHourRule::default(),
        Some(n) => zi_hour_from_name(n).unwrap_or_else(|| {
            eprintln!("Invalid zi hour rule: {n}");
            die("Valid: next-day (default), split")
        }),
    }
}

fn load_chart_config(flags: &ChartFlags) -> QimenConfig {
    let mut config = match &flags.config {
        Some(path) => load_config(path).unwrap_or_else(|e| die(e)),
        None => QimenConfig::default(),
    };
    if let Some(path) = &flags.tables {
        config.tables = load_tables(path).unwrap_or_else(|e| die(e));
    }
    let overrides = ChartOptions {
        yuan_method: flags.yuan_method.clone(),
        xun_anchor: flags.xun_anchor.clone(),
        door_start: flags.door_start.clone(),
        lodging: flags.lodging.clone(),
        spirit_direction: flags.spirit_direction.clone(),
        zi_hour: flags.zi_hour.clone(),
    };
    config.chart = overrides.apply(config.chart).unwrap_or_else(|e| die(e));
    config
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chart { date, flags } => {
            let time = resolve_time(date.as_deref());
            let config = load_chart_config(&flags);
            let engine = QimenEngine::new(&config.tables, config.chart)
                .unwrap_or_else(|e| die(format!("Invalid tables: {e}")));
            match engine.compute_chart(&time) {
                Ok(chart) => print!("{}", ChartText(&chart)),
                Err(e) => die(format!("Chart failed: {e}")),
            }
        }

        Commands::Pillars { date, zi_hour } => {
            let time = resolve_time(date.as_deref());
            let info = calendar_info(&time, parse_zi_hour(zi_hour.as_deref()))
                .unwrap_or_else(|e| die(e));
            for pillar in info.pillars.pillars() {
                println!("{}柱  {}", pillar.role.chinese(), pillar.ganzhi);
            }
            println!("节气  {} ({} 起)", info.term.term, info.term.start);
        }

        Commands::Term { date, year } => {
            if let Some(year) = year {
                match YearTerms::new(year) {
                    Ok(terms) => print!("{terms}"),
                    Err(e) => die(e),
                }
                return;
            }
            let day = resolve_time(date.as_deref()).date();
            let info = active_term(&day).unwrap_or_else(|e| die(e));
            println!(
                "{} ({}, {}月)  {} 起, 第{}日",
                info.term,
                info.term.name(),
                info.term.month_branch(),
                info.start,
                info.elapsed_days(&day) + 1
            );
            if let Some(end) = info.end {
                println!("下一节气  {} {}", info.term.next(), end);
            }
        }
    }
}
