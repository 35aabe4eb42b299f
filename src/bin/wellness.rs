//! Wellness CLI - Command-line surface for the analytics engine
//!
//! Commands:
//! - log: Append a session to the record file
//! - dashboard: Compute and print the analytics dashboard
//! - list: Print all records with their ids
//! - delete: Delete records by id, or wipe the set
//! - export: Write the filtered record set as CSV

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use wellness_studio::dashboard::{compute_dashboard, DashboardOutcome, DashboardResult};
use wellness_studio::store::{self, RecordStore};
use wellness_studio::types::{Activity, DashboardQuery, SessionRecord};
use wellness_studio::{EngineError, ENGINE_VERSION};

/// Wellness Studio - analytics for a personal sport & wellbeing journal
#[derive(Parser)]
#[command(name = "wellness")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Log sessions and compute wellness dashboards", long_about = None)]
struct Cli {
    /// Record file path
    #[arg(long, global = true, default_value = "data/wellness.csv")]
    data_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Append a session to the record file
    Log {
        /// Session date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Activity label (Walk, Run, Yoga, Strength, Cycling, Swim, or free text)
        #[arg(long)]
        activity: String,

        /// Session duration in minutes (0-600)
        #[arg(long, default_value = "30")]
        duration: u32,

        /// Perceived intensity (1-5)
        #[arg(long, default_value = "3")]
        intensity: u8,

        /// Wellbeing rating (1-5)
        #[arg(long, default_value = "4")]
        mood: u8,

        /// Sleep the previous night in hours (0-24)
        #[arg(long, default_value = "7.0")]
        sleep: f64,

        /// Optional free-text comment
        #[arg(long, default_value = "")]
        comment: String,
    },

    /// Compute and print the analytics dashboard
    Dashboard {
        /// Current window length in calendar days
        #[arg(long, default_value = "30")]
        window_days: u32,

        /// Use one window spanning the whole recorded history
        #[arg(long, conflicts_with = "window_days")]
        all_history: bool,

        /// End of the current window; defaults to the latest date on record
        #[arg(long)]
        reference_date: Option<NaiveDate>,

        /// Restrict to these activities (repeatable); default all
        #[arg(long = "activity")]
        activities: Vec<String>,

        /// Inclusive mood floor
        #[arg(long, default_value = "1")]
        min_mood: u8,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print all records with their ids
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete records by id, or wipe the whole set
    Delete {
        /// Ids to delete (from `wellness list`)
        ids: Vec<uuid::Uuid>,

        /// Wipe the full record set
        #[arg(long, conflicts_with = "ids")]
        all: bool,
    },

    /// Write the filtered record set as CSV
    Export {
        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Restrict to these activities (repeatable); default all
        #[arg(long = "activity")]
        activities: Vec<String>,

        /// Inclusive mood floor
        #[arg(long, default_value = "1")]
        min_mood: u8,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let report = CliError::from(e);
            eprintln!(
                "{}",
                serde_json::to_string(&report).unwrap_or_else(|_| report.message.clone())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), EngineError> {
    let store = RecordStore::new(&cli.data_file);

    match cli.command {
        Commands::Log {
            date,
            activity,
            duration,
            intensity,
            mood,
            sleep,
            comment,
        } => {
            let record = SessionRecord::new(
                date.unwrap_or_else(|| Local::now().date_naive()),
                Activity::from_label(&activity),
                duration,
                intensity,
                mood,
                sleep,
                comment,
            )?;
            let appended = store.append(record)?;
            println!(
                "Logged {} on {} ({} min), id {}",
                appended.activity.label(),
                appended.date,
                appended.duration_minutes,
                appended.id
            );
            Ok(())
        }

        Commands::Dashboard {
            window_days,
            all_history,
            reference_date,
            activities,
            min_mood,
            json,
        } => {
            let records = store.load()?;

            let window_days = if all_history {
                history_span_days(&records)
            } else {
                window_days
            };

            let query = DashboardQuery {
                window_days,
                reference_date,
                activities: activities.iter().map(|a| Activity::from_label(a)).collect(),
                min_mood,
            };

            match compute_dashboard(&records, &query) {
                DashboardOutcome::NoData => {
                    println!("No data for these filters. Widen the period or log a session.");
                    Ok(())
                }
                DashboardOutcome::Ready(result) => {
                    // Pipes get machine-readable output
                    let json = json || !atty::is(atty::Stream::Stdout);
                    if json {
                        println!("{}", serde_json::to_string_pretty(&result)?);
                    } else {
                        print_dashboard(&result);
                    }
                    Ok(())
                }
            }
        }

        Commands::List { json } => {
            let records = store.load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else if records.is_empty() {
                println!("No records yet. Log one with `wellness log`.");
            } else {
                for record in &records {
                    println!(
                        "{}  {}  {:<10} {:>4} min  intensity {}  mood {}  sleep {:>4}h  {}",
                        record.id,
                        record.date,
                        record.activity.label(),
                        record.duration_minutes,
                        record.intensity,
                        record.mood,
                        record.sleep_hours,
                        record.comment
                    );
                }
            }
            Ok(())
        }

        Commands::Delete { ids, all } => {
            if all {
                store.clear()?;
                println!("Record set wiped.");
            } else {
                let removed = store.delete_many(&ids)?;
                println!("Removed {removed} record(s).");
            }
            Ok(())
        }

        Commands::Export {
            output,
            activities,
            min_mood,
        } => {
            let query = DashboardQuery {
                activities: activities.iter().map(|a| Activity::from_label(a)).collect(),
                min_mood,
                ..Default::default()
            };
            let records: Vec<SessionRecord> = store
                .load()?
                .into_iter()
                .filter(|r| query.matches(r))
                .collect();
            let csv = store::to_csv(&records);

            if output.to_string_lossy() == "-" {
                print!("{csv}");
            } else {
                fs::write(&output, csv)?;
                println!("Exported {} record(s) to {}", records.len(), output.display());
            }
            Ok(())
        }
    }
}

/// Window length covering every recorded date; 1 when the set is empty
fn history_span_days(records: &[SessionRecord]) -> u32 {
    let min = records.iter().map(|r| r.date).min();
    let max = records.iter().map(|r| r.date).max();
    match (min, max) {
        (Some(min), Some(max)) => ((max - min).num_days() + 1).max(1) as u32,
        _ => 1,
    }
}

fn print_dashboard(result: &DashboardResult) {
    println!(
        "Period {} to {} (previous {} to {})",
        result.current_range.start,
        result.current_range.end,
        result.previous_range.start,
        result.previous_range.end
    );
    println!();

    let c = &result.current;
    println!("Sessions:      {}", c.session_count);
    println!(
        "Active time:   {} min{}",
        c.total_minutes,
        delta_suffix(&result.deltas.total_minutes)
    );
    println!(
        "Mood:          {:.2}/5{}",
        c.mean_mood,
        delta_suffix(&result.deltas.mean_mood)
    );
    println!(
        "Sleep:         {:.2} h{}",
        c.mean_sleep_hours,
        delta_suffix(&result.deltas.mean_sleep_hours)
    );
    println!("Streak:        {} day(s)", c.streak_days);
    println!(
        "Score:         {}/100 ({}){}",
        result.current_score.value,
        result.current_score.status.label(),
        delta_suffix(&result.deltas.score)
    );
    println!();

    println!("Strengths:");
    for line in &result.insights.strengths {
        println!("  + {line}");
    }
    println!("Watch-points:");
    for line in &result.insights.attentions {
        println!("  ! {line}");
    }
    println!("Recommendations:");
    for line in &result.insights.recommendations {
        println!("  - {line}");
    }
    println!();
    println!("{}", result.insights.synthesis);

    if !result.activity_breakdown.is_empty() {
        println!();
        println!("Time by activity:");
        for total in &result.activity_breakdown {
            println!("  {:<10} {:>4} min", total.activity, total.minutes);
        }
    }
}

fn delta_suffix(delta: &Option<wellness_studio::MetricDelta>) -> String {
    match delta {
        Some(d) => format!("  ({} vs previous)", d.formatted),
        None => String::new(),
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::EmptyRecord => CliError {
                code: "EMPTY_RECORD".to_string(),
                message: e.to_string(),
                hint: Some("Give the session a duration or a sleep time".to_string()),
            },
            EngineError::OutOfRange { .. } => CliError {
                code: "OUT_OF_RANGE".to_string(),
                message: e.to_string(),
                hint: Some("Check the flag's documented range".to_string()),
            },
            EngineError::JsonError(_) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            EngineError::IoError(_) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check the data file path and permissions".to_string()),
            },
        }
    }
}
