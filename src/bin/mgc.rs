extern crate migracal as lib;

use chrono::{Datelike, Local, Month, NaiveDate};
use flexi_logger::{Duplicate, FileSpec, Logger};
use lib::agenda::Agenda;
use lib::calendar::MonthIndex;
use lib::diary::{date_key, parse_date_key, Appointment, Dated, Episode, MidasAssessment};
use lib::midas::MidasAnswers;
use lib::provider::{Error, ErrorKind, MutDiarylike};
use lib::stats;
use lib::ui::{MonthView, SummaryView, WeekView};
use num_traits::FromPrimitive;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "mgc",
    about = "migracal - migraine diary, appointments and MIDAS scores."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,

    #[structopt(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Show the appointments (or episodes) of a month
    Month {
        #[structopt(long)]
        year: Option<i32>,
        #[structopt(long, help = "month number, 1 to 12")]
        month: Option<u32>,
        #[structopt(long, help = "mark episodes instead of appointments")]
        episodes: bool,
    },
    /// Show the appointments of the week containing a date
    Week {
        #[structopt(long, parse(try_from_str = parse_date_key))]
        date: Option<NaiveDate>,
    },
    /// Book an appointment
    Book {
        #[structopt(long, parse(try_from_str = parse_date_key))]
        date: NaiveDate,
        #[structopt(long)]
        doctor: String,
        #[structopt(long)]
        time: String,
        #[structopt(long)]
        diary: Option<String>,
    },
    /// Record a headache episode
    Episode {
        #[structopt(long, parse(try_from_str = parse_date_key))]
        date: NaiveDate,
        #[structopt(long, help = "0 to 10")]
        intensity: u8,
        #[structopt(long, help = "duration in hours")]
        duration: f32,
        #[structopt(long)]
        aura: bool,
        #[structopt(long)]
        medication: Option<String>,
        #[structopt(long)]
        notes: Option<String>,
        #[structopt(long)]
        diary: Option<String>,
    },
    /// Score a MIDAS questionnaire
    Midas {
        #[structopt(long, parse(try_from_str = parse_date_key))]
        date: Option<NaiveDate>,
        #[structopt(long, help = "days of missed work or school")]
        q1: u8,
        #[structopt(long, help = "days with work productivity halved")]
        q2: u8,
        #[structopt(long, help = "days without household work")]
        q3: u8,
        #[structopt(long, help = "days with household productivity halved")]
        q4: u8,
        #[structopt(long, help = "days of missed family, social or leisure activities")]
        q5: u8,
        #[structopt(long)]
        headache_days: u8,
        #[structopt(long, help = "average pain, 0 to 10")]
        pain: u8,
        #[structopt(long, help = "store the assessment in the diary")]
        save: bool,
        #[structopt(long)]
        diary: Option<String>,
    },
    /// Summarize recorded episodes
    Stats {
        #[structopt(long)]
        year: Option<i32>,
        #[structopt(long, help = "month number, 1 to 12")]
        month: Option<u32>,
    },
}

fn month_index(
    year: Option<i32>,
    month: Option<u32>,
    today: NaiveDate,
) -> lib::provider::Result<MonthIndex> {
    let month = match month {
        Some(number) => Month::from_u32(number).ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidMonth,
                &format!("expected 1..=12, got {}", number),
            )
        })?,
        None => MonthIndex::of(&today).month,
    };

    Ok(MonthIndex::new(month, year.unwrap_or_else(|| today.year())))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger =
        Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?.duplicate_to_stderr(Duplicate::Warn);

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    let _logger = logger.start()?;

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;
    let mut agenda = Agenda::from_config(&config)?;
    let today = Local::now().date_naive();

    match args.cmd {
        Command::Month {
            year,
            month,
            episodes,
        } => {
            let index = month_index(year, month, today)?;
            let text = if episodes {
                let matrix = agenda.episode_month(index)?;
                MonthView::new(&matrix)
                    .today(today)
                    .today_symbol(config.display.today_symbol)
                    .item_symbol(config.display.item_symbol)
                    .to_string()
            } else {
                let matrix = agenda.month(index)?;
                MonthView::new(&matrix)
                    .today(today)
                    .today_symbol(config.display.today_symbol)
                    .item_symbol(config.display.item_symbol)
                    .to_string()
            };
            print!("{}", text);
        }
        Command::Week { date } => {
            let days = agenda.week(date.unwrap_or(today))?;
            print!(
                "{}",
                WeekView::new(&days)
                    .today(today)
                    .today_symbol(config.display.today_symbol)
            );
        }
        Command::Book {
            date,
            doctor,
            time,
            diary,
        } => {
            let appointment = Appointment::new(&date_key(&date), &doctor, &time);
            let diary = agenda.diary_mut(diary.as_deref())?;
            diary.book(appointment)?;
            diary.save()?;
            println!("Booked {} at {} with {}", date, time, doctor);
        }
        Command::Episode {
            date,
            intensity,
            duration,
            aura,
            medication,
            notes,
            diary,
        } => {
            let episode = Episode::new(date, intensity, duration)?
                .with_aura(aura)
                .with_medication(medication)
                .with_notes(notes);
            let id = episode.id;
            let diary = agenda.diary_mut(diary.as_deref())?;
            diary.record_episode(episode)?;
            diary.save()?;
            println!("Recorded episode {} on {}", id, date);
        }
        Command::Midas {
            date,
            q1,
            q2,
            q3,
            q4,
            q5,
            headache_days,
            pain,
            save,
            diary,
        } => {
            let answers = MidasAnswers::new([q1, q2, q3, q4, q5], headache_days, pain)?;
            let grade = answers.grade();
            println!(
                "MIDAS score {} - grade {} ({})",
                answers.score(),
                grade,
                grade.description()
            );

            if save {
                let assessment = MidasAssessment::new(date.unwrap_or(today), answers);
                let diary = agenda.diary_mut(diary.as_deref())?;
                diary.record_assessment(assessment)?;
                diary.save()?;
                agenda.refresh();
            }

            for point in lib::midas::trend(agenda.assessments()) {
                println!("  {}  {:>3}  {}", point.date, point.score, point.grade);
            }
        }
        Command::Stats { year, month } => {
            let (title, summary) = match month {
                Some(_) => {
                    let index = month_index(year, month, today)?;
                    (
                        format!("{} {}", index.month.name(), index.year),
                        stats::summarize_month(agenda.episodes(), index),
                    )
                }
                None => {
                    let year = year.unwrap_or_else(|| today.year());
                    let episodes = agenda
                        .episodes()
                        .iter()
                        .filter(|e| e.date().map_or(false, |d| d.year() == year));
                    (year.to_string(), stats::summarize(episodes))
                }
            };
            print!("{}", SummaryView::new(&title, &summary));

            if month.is_none() {
                let year = year.unwrap_or_else(|| today.year());
                let counts = stats::monthly_counts(agenda.episodes(), year);
                for (i, count) in counts.iter().enumerate() {
                    if let Some(m) = Month::from_usize(i + 1) {
                        println!("  {:<10} {}", m.name(), count);
                    }
                }
            }
        }
    }

    Ok(())
}
