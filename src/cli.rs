//! Command-line surface over the application stores.
//!
//! Each subcommand maps onto one store operation, the same set the
//! app's screens drive: session management, habit CRUD, the completion
//! toggle, and the derived progress views.

use std::path::PathBuf;

use chrono::Weekday;
use clap::{Args, Parser, Subcommand};

use habit_journal::{
    weekday_name, App, AppError, Behavior, DateKey, DomainError, DraftUpdate, Frequency,
    HabitDraft, HabitId, HabitPatch, TimeRange, UserDraft,
};

/// Command line arguments for the habit journal.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's data directory
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register a new account and sign in
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in as a registered user
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Close the current session
    Logout,
    /// Create a habit
    Add(AddArgs),
    /// List the habits due on a date
    List {
        /// good or bad (default: good)
        #[arg(long)]
        behavior: Option<String>,
        /// Date key (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Toggle a habit's completion for a date
    Done {
        id: String,
        /// Date key (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete a habit
    Remove { id: String },
    /// Edit fields of a habit
    Edit(EditArgs),
    /// Show progress percentages for a date
    Progress {
        /// Date key (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show the 7-day progress strip
    Week,
    /// Show or toggle the theme preference
    Theme {
        /// Flip between light and dark
        #[arg(long)]
        toggle: bool,
    },
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub task: String,
    #[arg(long)]
    pub description: String,
    /// daily or weekly
    #[arg(long)]
    pub frequency: String,
    /// good or bad
    #[arg(long)]
    pub behavior: String,
    /// morning, afternoon, evening or night
    #[arg(long = "time")]
    pub time_range: String,
    /// Weekday names for weekly habits (e.g. --days monday,thursday)
    #[arg(long, value_delimiter = ',')]
    pub days: Vec<String>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    pub id: String,
    #[arg(long)]
    pub task: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// daily or weekly
    #[arg(long)]
    pub frequency: Option<String>,
    /// good or bad
    #[arg(long)]
    pub behavior: Option<String>,
    /// morning, afternoon, evening or night
    #[arg(long = "time")]
    pub time_range: Option<String>,
    /// Weekday names (e.g. --days monday,thursday)
    #[arg(long, value_delimiter = ',')]
    pub days: Option<Vec<String>>,
}

/// Dispatch one parsed command against the application state.
pub async fn run(cli: Cli, app: &mut App) -> Result<(), AppError> {
    match cli.command {
        Command::Register {
            username,
            email,
            password,
        } => {
            let mut draft = UserDraft {
                username,
                email,
                password,
            };
            app.sign_up(&mut draft).await?;
            if let Some(user) = app.users().current_user() {
                println!("Registered and signed in as {}", user.username);
            }
        }
        Command::Login { username, password } => {
            app.sign_in(&username, &password).await?;
            println!("Signed in as {username}");
        }
        Command::Logout => {
            app.sign_out().await?;
            println!("Signed out");
        }
        Command::Add(args) => {
            let mut draft = HabitDraft::default();
            draft.apply(DraftUpdate::Task(args.task));
            draft.apply(DraftUpdate::Description(args.description));
            draft.apply(DraftUpdate::Frequency(parse_frequency(&args.frequency)?));
            draft.apply(DraftUpdate::Behavior(parse_behavior(&args.behavior)?));
            draft.apply(DraftUpdate::TimeRange(parse_time_range(&args.time_range)?));
            if !args.days.is_empty() {
                draft.apply(DraftUpdate::WeekDays(parse_days(&args.days)?));
            }
            let id = app.habits_mut()?.add_habit(&mut draft).await?;
            println!("Added habit {id}");
        }
        Command::List { behavior, date } => {
            let behavior = match behavior {
                Some(s) => parse_behavior(&s)?,
                None => Behavior::Good,
            };
            let date = parse_date(date)?;
            let habits = app.habits()?.display_list(behavior, date);
            if habits.is_empty() {
                println!(
                    "No {} habits due on {date}",
                    behavior.display_name().to_lowercase()
                );
            }
            for habit in habits {
                let mark = if habit.is_completed_on(date) { "x" } else { " " };
                println!(
                    "[{mark}] {:<9} {}  ({})",
                    habit.time_range.display_name(),
                    habit.task,
                    habit.id
                );
            }
        }
        Command::Done { id, date } => {
            let id = parse_habit_id(&id)?;
            let date = parse_date(date)?;
            match app.habits_mut()?.toggle_completion(id, date).await? {
                Some(true) => println!("Marked complete for {date}"),
                Some(false) => println!("Unmarked for {date}"),
                None => println!("No habit with id {id}"),
            }
        }
        Command::Remove { id } => {
            let id = parse_habit_id(&id)?;
            if app.habits()?.get(id).is_none() {
                println!("No habit with id {id}");
            } else {
                app.habits_mut()?.delete_habit(id).await?;
                println!("Deleted habit {id}");
            }
        }
        Command::Edit(args) => {
            let id = parse_habit_id(&args.id)?;
            let patch = HabitPatch {
                task: args.task,
                description: args.description,
                frequency: args.frequency.as_deref().map(parse_frequency).transpose()?,
                behavior: args.behavior.as_deref().map(parse_behavior).transpose()?,
                week_day: args.days.as_deref().map(parse_days).transpose()?,
                time_range: args
                    .time_range
                    .as_deref()
                    .map(parse_time_range)
                    .transpose()?,
            };
            app.habits_mut()?.edit_habit(id, patch).await?;
            println!("Updated habit {id}");
        }
        Command::Progress { date } => {
            let date = parse_date(date)?;
            let habits = app.habits()?;
            println!("Progress for {date}");
            println!("  Good: {}%", habits.progress_for(Behavior::Good, date));
            println!("  Bad:  {}%", habits.progress_for(Behavior::Bad, date));
        }
        Command::Week => {
            let habits = app.habits()?;
            for (day, percent) in habits.week_progress(DateKey::today()) {
                println!("{day}  {:<9} {percent:>3}%", weekday_name(day.weekday()));
            }
        }
        Command::Theme { toggle } => {
            if toggle {
                let dark = app.theme_mut().toggle().await?;
                println!("Theme set to {}", if dark { "dark" } else { "light" });
            } else {
                let dark = app.theme().is_dark_mode();
                println!("Theme: {}", if dark { "dark" } else { "light" });
            }
        }
    }
    Ok(())
}

fn invalid(message: String) -> AppError {
    AppError::Domain(DomainError::Validation { message })
}

fn parse_behavior(s: &str) -> Result<Behavior, AppError> {
    match s.trim().to_lowercase().as_str() {
        "good" => Ok(Behavior::Good),
        "bad" => Ok(Behavior::Bad),
        _ => Err(invalid(format!(
            "Invalid behavior '{s}'. Valid options: good, bad"
        ))),
    }
}

fn parse_frequency(s: &str) -> Result<Frequency, AppError> {
    match s.trim().to_lowercase().as_str() {
        "daily" => Ok(Frequency::Daily),
        "weekly" => Ok(Frequency::Weekly),
        _ => Err(invalid(format!(
            "Invalid frequency '{s}'. Valid options: daily, weekly"
        ))),
    }
}

fn parse_time_range(s: &str) -> Result<TimeRange, AppError> {
    match s.trim().to_lowercase().as_str() {
        "morning" => Ok(TimeRange::Morning),
        "afternoon" => Ok(TimeRange::Afternoon),
        "evening" => Ok(TimeRange::Evening),
        "night" => Ok(TimeRange::Night),
        _ => Err(invalid(format!(
            "Invalid time range '{s}'. Valid options: morning, afternoon, evening, night"
        ))),
    }
}

fn parse_days(names: &[String]) -> Result<Vec<Weekday>, AppError> {
    names
        .iter()
        .map(|name| {
            name.trim()
                .parse::<Weekday>()
                .map_err(|_| invalid(format!("Invalid weekday name '{name}'")))
        })
        .collect()
}

fn parse_date(date: Option<String>) -> Result<DateKey, AppError> {
    match date {
        Some(s) => Ok(s.parse::<DateKey>()?),
        None => Ok(DateKey::today()),
    }
}

fn parse_habit_id(s: &str) -> Result<HabitId, AppError> {
    HabitId::parse(s).map_err(|_| invalid(format!("Invalid habit id '{s}'")))
}
