use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

use rehab_planner_lib::commands::{self, program, stack, transfer, DayStep};
use rehab_planner_lib::config::PlannerConfig;
use rehab_planner_lib::document::EXPORT_FILENAME;
use rehab_planner_lib::logging::init_logging;
use rehab_planner_lib::models::Mood;
use rehab_planner_lib::planner::{Planner, TodayView, WeekSummary};
use rehab_planner_lib::selection::SelectionPolicy;

#[derive(Parser)]
#[command(
  name = "rehab-planner",
  version,
  about = "Adaptive rehab planner",
  long_about = "Tracks a multi-week rehab program and adapts each day's stack to mood and pain"
)]
struct Cli {
  /// Database file (overrides REHAB_DB_PATH)
  #[arg(long, global = true)]
  db: Option<PathBuf>,

  /// Selection policy: mood_stack or pain_tier (overrides REHAB_SELECTION_POLICY)
  #[arg(long, global = true)]
  policy: Option<SelectionPolicy>,

  /// Print views as JSON
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
  /// Show the stack for a day (default: today)
  Show {
    #[arg(long)]
    day: Option<usize>,
    /// Show the day after --day (or today), wrapping Sunday to Monday
    #[arg(long, conflicts_with = "prev")]
    next: bool,
    /// Show the day before --day (or today), wrapping Monday to Sunday
    #[arg(long)]
    prev: bool,
  },
  /// Show the current week, or move to another one
  Week {
    #[arg(long, conflicts_with_all = ["prev", "set"])]
    next: bool,
    #[arg(long, conflicts_with = "set")]
    prev: bool,
    #[arg(long)]
    set: Option<u32>,
  },
  /// Set today's mood: good, okay or flare
  Mood { mood: String },
  /// Set pain for a region (ribs, elbow, knee, fatigue) on a 0-4 scale
  Pain {
    region: String,
    #[arg(value_parser = clap::value_parser!(u8).range(0..=4))]
    value: u8,
  },
  /// Toggle an exercise done for a day
  Toggle {
    exercise_id: String,
    #[arg(long)]
    day: Option<usize>,
  },
  /// Mark a whole day complete
  Complete {
    #[arg(long)]
    day: Option<usize>,
  },
  /// Clear a day's completed flag
  Reopen {
    #[arg(long)]
    day: Option<usize>,
    /// Confirm clearing the completion
    #[arg(long)]
    yes: bool,
  },
  /// Replace a day's notes
  Notes {
    text: String,
    #[arg(long)]
    day: Option<usize>,
  },
  /// List or edit a mood's stack
  Stack {
    #[command(subcommand)]
    action: StackCmd,
  },
  /// Append the supplementary exercise on Good and Okay days
  Supplement {
    #[arg(value_enum)]
    state: Switch,
  },
  /// Theme preference: system, light or dark
  Theme { theme: String },
  /// Rename the plan
  PlanName { name: String },
  /// Export the program as pretty JSON
  Export {
    /// Output file
    #[arg(long)]
    out: Option<PathBuf>,
    /// Print to stdout instead of a file
    #[arg(long, conflicts_with = "out")]
    stdout: bool,
  },
  /// Replace the program with an exported file
  Import { path: PathBuf },
  /// List the catalog, or preview hold targets for one exercise
  Catalog {
    #[arg(long)]
    schedule: Option<String>,
    #[arg(long, default_value = "good")]
    mood: String,
    #[arg(long, default_value_t = 10)]
    weeks: u32,
  },
  /// Forget the saved program and start over
  Reset {
    #[arg(long)]
    yes: bool,
  },
}

#[derive(Subcommand)]
enum StackCmd {
  Show { mood: String },
  Add { mood: String, exercise_id: String },
  Remove { mood: String, position: usize },
  Up { mood: String, position: usize },
  Down { mood: String, position: usize },
}

#[derive(Clone, Copy, ValueEnum)]
enum Switch {
  On,
  Off,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();
  let cli = Cli::parse();

  let mut config = match PlannerConfig::from_env() {
    Ok(config) => config,
    Err(e) => {
      eprintln!("{}", e);
      return ExitCode::FAILURE;
    }
  };
  if let Some(db) = cli.db.clone() {
    config.db_path = db;
  }
  if let Some(policy) = cli.policy {
    config.selection_policy = policy;
  }

  init_logging(&config.log_level);

  let mut planner = match rehab_planner_lib::open_planner(&config).await {
    Ok(planner) => planner,
    Err(e) => {
      error!(error = %e, "Failed to open planner");
      eprintln!("Failed to open planner: {}", e);
      return ExitCode::FAILURE;
    }
  };

  match run(&mut planner, cli.command.unwrap_or(Cmd::Show {
    day: None,
    next: false,
    prev: false,
  }), cli.json).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("{}", e);
      ExitCode::FAILURE
    }
  }
}

async fn run(planner: &mut Planner, command: Cmd, json: bool) -> Result<(), String> {
  let show_day = match &command {
    Cmd::Toggle { day, .. }
    | Cmd::Complete { day }
    | Cmd::Reopen { day, .. }
    | Cmd::Notes { day, .. } => *day,
    _ => None,
  };

  match command {
    Cmd::Show { day, next, prev } => {
      let view = if next {
        commands::get_adjacent_day(planner, day, DayStep::Next)?
      } else if prev {
        commands::get_adjacent_day(planner, day, DayStep::Prev)?
      } else {
        commands::get_today(planner, day)?
      };
      print_today(&view, json);
      return Ok(());
    }
    Cmd::Week { next, prev, set } => {
      if next {
        program::next_week(planner).await?;
      } else if prev {
        program::prev_week(planner).await?;
      } else if let Some(week) = set {
        program::set_week(planner, week).await?;
      }
      print_week(&commands::get_week(planner), json);
      return Ok(());
    }
    Cmd::Mood { mood } => {
      program::set_mood(planner, &mood).await?;
    }
    Cmd::Pain { region, value } => {
      program::set_pain(planner, &region, value).await?;
    }
    Cmd::Toggle { exercise_id, day } => {
      program::toggle_exercise(planner, &exercise_id, day).await?;
    }
    Cmd::Complete { day } => {
      program::complete_day(planner, day).await?;
    }
    Cmd::Reopen { day, yes } => {
      program::reopen_day(planner, day, yes).await?;
    }
    Cmd::Notes { text, day } => {
      program::set_notes(planner, &text, day).await?;
    }
    Cmd::Stack { action } => {
      let mood = match action {
        StackCmd::Show { mood } => mood,
        StackCmd::Add { mood, exercise_id } => {
          stack::add_to_stack(planner, &mood, &exercise_id).await?;
          mood
        }
        StackCmd::Remove { mood, position } => {
          stack::remove_from_stack(planner, &mood, position).await?;
          mood
        }
        StackCmd::Up { mood, position } => {
          stack::move_up(planner, &mood, position).await?;
          mood
        }
        StackCmd::Down { mood, position } => {
          stack::move_down(planner, &mood, position).await?;
          mood
        }
      };
      let entries = stack::get_stack(planner, &mood)?;
      if json {
        print_json(&entries);
      } else {
        for entry in entries {
          let label = entry.name.unwrap_or_else(|| "(not in catalog)".to_string());
          println!("{:>2}. {:<22} {}", entry.position, entry.id, label);
        }
      }
      return Ok(());
    }
    Cmd::Supplement { state } => {
      program::set_supplement(planner, matches!(state, Switch::On)).await?;
    }
    Cmd::Theme { theme } => {
      program::set_theme(planner, &theme).await?;
      println!("Theme saved");
      return Ok(());
    }
    Cmd::PlanName { name } => {
      program::set_plan_name(planner, &name).await?;
    }
    Cmd::Export { out, stdout } => {
      if stdout {
        println!("{}", transfer::export_to_string(planner)?);
      } else {
        let path = out.unwrap_or_else(|| PathBuf::from(EXPORT_FILENAME));
        let written = transfer::export_to_file(planner, &path)?;
        println!("Exported {} bytes to {}", written, path.display());
      }
      return Ok(());
    }
    Cmd::Import { path } => {
      transfer::import_from_file(planner, &path).await?;
      println!("Imported {}", path.display());
    }
    Cmd::Catalog {
      schedule,
      mood,
      weeks,
    } => {
      match schedule {
        Some(id) => {
          let mood: Mood = mood.parse()?;
          let rows = commands::get_hold_schedule(planner, &id, mood, weeks)?;
          if json {
            print_json(&rows);
          } else {
            for (week, seconds) in rows {
              println!("Week {:>2}: {}s", week, seconds);
            }
          }
        }
        None => {
          let catalog = commands::get_catalog(planner);
          if json {
            print_json(&catalog);
          } else {
            for ex in catalog {
              let dose = match ex.base_seconds() {
                Some(s) => format!("{}s base", s),
                None => ex.reps_description().unwrap_or_default().to_string(),
              };
              println!("{:<22} {:<32} {:<18} {}", ex.id, ex.name, ex.area, dose);
            }
          }
        }
      }
      return Ok(());
    }
    Cmd::Reset { yes } => {
      if !yes {
        return Err("Reset discards the saved program; pass --yes to confirm".to_string());
      }
      planner.reset().await.map_err(|e| format!("Failed to reset: {}", e))?;
    }
  }

  print_today(&commands::get_today(planner, show_day)?, json);
  Ok(())
}

fn print_json<T: Serialize>(value: &T) {
  match serde_json::to_string_pretty(value) {
    Ok(text) => println!("{}", text),
    Err(e) => eprintln!("Failed to render JSON: {}", e),
  }
}

fn print_today(view: &TodayView, json: bool) {
  if json {
    print_json(view);
    return;
  }

  println!("{} · Week {} · {}", view.plan_name, view.week_number, view.day.title);
  let tier = if view.effective_mood == view.mood {
    view.mood.to_string()
  } else {
    format!("{} (served {})", view.mood, view.effective_mood)
  };
  println!("Mood: {} · Total pain: {}", tier, view.total_pain);
  let regions: Vec<String> = view
    .pain
    .iter()
    .map(|(region, level)| format!("{} {}", region, level))
    .collect();
  println!("Pain: {}", regions.join(" · "));
  if view.policy != SelectionPolicy::default() {
    println!("Policy: {}", view.policy);
  }
  println!("{}", view.rationale);
  println!();
  for ex in &view.exercises {
    let mark = if ex.done { "x" } else { " " };
    println!("[{}] {:<32} {:<18} {}", mark, ex.name, ex.area, ex.target);
  }
  println!();
  println!("{}/{} done", view.done_count, view.exercises.len());
  if view.day.completed {
    println!("Day complete");
  }
  if !view.day.notes.is_empty() {
    println!("Notes: {}", view.day.notes);
  }
}

fn print_week(summary: &WeekSummary, json: bool) {
  if json {
    print_json(summary);
    return;
  }

  println!("Week {} · {}/7 days complete", summary.week_number, summary.completed_days);
  for day in &summary.days {
    let badge = if day.completed { "✓" } else { "•" };
    let notes = if day.notes.is_empty() { "No notes yet" } else { day.notes.as_str() };
    println!("{} {:<30} {} done · {}", badge, day.title, day.exercises_done, notes);
  }
}
