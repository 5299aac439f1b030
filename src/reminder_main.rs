// This runs the reminder on windows without creating a console. Disable during development to
// see stdout.
#![windows_subsystem = "windows"]

use std::env::args;

use anyhow::Result;
use attendance_tracker::{
    reminder::{args::ReminderArgs, start_reminder},
    utils::{
        dir::{create_application_default_path, ensure_dir},
        logging::{enable_logging, REMINDER_PREFIX},
        runtime::single_thread_runtime,
    },
};
use clap::Parser;

fn main() -> Result<()> {
    run_service(args().collect::<Vec<_>>())
}

fn run_service(command_args: Vec<String>) -> Result<()> {
    let args = ReminderArgs::parse_from(&command_args);

    if !args.force {
        #[cfg(windows)]
        {
            let mut command_args = command_args;
            println!("Starting detached process");
            use std::os::windows::process::CommandExt;
            // DETACHED_PROCESS
            const DETACHED_PROCESS: u32 = 0x00000008;

            command_args.push("--force".into());
            let process_name = std::env::current_exe()?;
            let mut command = std::process::Command::new(process_name);
            command.args(command_args.into_iter().skip(1));
            command.creation_flags(DETACHED_PROCESS);
            command.stdin(std::process::Stdio::null());
            command.stdout(std::process::Stdio::null());
            command.stderr(std::process::Stdio::null());
            #[allow(clippy::zombie_processes)]
            command.spawn()?;
            println!("Created reminder");
            return Ok(());
        }
        #[cfg(unix)]
        {
            use daemonize::Daemonize;
            use tracing::error;

            let daemonize = Daemonize::new()
                .stdout(daemonize::Stdio::devnull())
                .stderr(daemonize::Stdio::devnull())
                .execute();
            match daemonize {
                daemonize::Outcome::Parent(parent) => {
                    parent
                        .inspect_err(|e| error!("Failed to create reminder on parent side {e:?}"))?;
                    println!("Created reminder");
                    return Ok(());
                }
                daemonize::Outcome::Child(_) => (),
            }
        }
    }

    run(args)
}

fn run(args: ReminderArgs) -> Result<()> {
    let app_dir = args
        .dir
        .map_or_else(create_application_default_path, ensure_dir)?;
    enable_logging(REMINDER_PREFIX, &app_dir, args.log, args.log_console)?;
    single_thread_runtime()?.block_on(start_reminder())?;
    Ok(())
}
