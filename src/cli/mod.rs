pub mod calendar_view;
pub mod mark;
pub mod process;
pub mod reminder_path;

use std::path::{Path, PathBuf};

use anyhow::Result;
use calendar_view::{print_month, print_summary};
use clap::{Parser, Subcommand};
use mark::{parse_day, process_mark_command, DateStyle, MarkCommand};
use process::{restart_reminder, stop_reminder};
use tracing::{level_filters::LevelFilter, warn};

use crate::{
    reminder::{
        notifier::{ConsoleNotifier, DesktopNotifier, Notifier},
        schedule::DAILY_REMINDER,
    },
    storage::key_value::FileKeyValueStore,
    tracker::{aggregator::AttendancePolicy, Tracker},
    utils::{
        clock::{Clock, DefaultClock},
        dir::{create_application_default_path, ensure_dir},
        logging::{enable_logging, CLI_PREFIX},
        percentage::Percentage,
    },
};

#[derive(Parser, Debug)]
#[command(name = "attendance", version, long_about = None)]
#[command(about = "Tracks office attendance over a rolling 12 week period", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Share of eligible days that has to be attended", default_value_t = AttendancePolicy::default().threshold)]
    threshold: Percentage,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Display a month with marked days and the current attendance")]
    Show {
        #[arg(
            long,
            short,
            help = "Any day of the month to show. Examples are \"today\", \"1 month ago\", \"01/09/2024\""
        )]
        month: Option<String>,
        #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
        date_style: DateStyle,
        #[arg(long, help = "Disable colours")]
        plain: bool,
    },
    #[command(about = "Mark a day as office, wfh, leave, holiday or unset")]
    Mark {
        #[command(flatten)]
        command: MarkCommand,
    },
    #[command(about = "Display numbers behind the attendance percentage")]
    Summary {},
    #[command(about = "Manage the daily reminder")]
    Remind {
        #[command(subcommand)]
        action: RemindAction,
    },
}

#[derive(Subcommand, Debug)]
enum RemindAction {
    #[command(about = "Start the reminder in the background, replacing a running one")]
    Start {},
    #[command(about = "Stop the running reminder")]
    Stop {},
    #[command(about = "Send the reminder right now")]
    Once {},
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    let app_dir = args
        .dir
        .clone()
        .map_or_else(create_application_default_path, ensure_dir)?;
    enable_logging(CLI_PREFIX, &app_dir, logging_level, args.log)?;

    let policy = AttendancePolicy {
        threshold: args.threshold,
    };

    match args.commands {
        Commands::Show {
            month,
            date_style,
            plain,
        } => {
            let mut tracker = open_tracker(&app_dir, policy).await?;
            if let Some(month) = month {
                let day = parse_day(&month, DefaultClock.time(), date_style)?;
                tracker.show_month_of(day);
            }
            print_month(&tracker, !plain);
            Ok(())
        }
        Commands::Mark { command } => {
            let mut tracker = open_tracker(&app_dir, policy).await?;
            process_mark_command(command, &mut tracker, DefaultClock.time()).await
        }
        Commands::Summary {} => {
            let tracker = open_tracker(&app_dir, policy).await?;
            print_summary(&tracker);
            Ok(())
        }
        Commands::Remind { action } => match action {
            RemindAction::Start {} => restart_reminder(args.dir.as_deref()),
            RemindAction::Stop {} => stop_reminder(),
            RemindAction::Once {} => {
                ConsoleNotifier.notify(&DAILY_REMINDER).await?;
                if let Err(e) = DesktopNotifier.notify(&DAILY_REMINDER).await {
                    warn!("Desktop notification isn't available {e:?}");
                }
                Ok(())
            }
        },
    }
}

async fn open_tracker(app_dir: &Path, policy: AttendancePolicy) -> Result<Tracker> {
    let storage = FileKeyValueStore::new(app_dir.join("store"))?;
    Ok(Tracker::load(Box::new(storage), Box::new(DefaultClock), policy).await)
}
