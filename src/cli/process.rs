use std::{path::Path, process::Stdio};

use anyhow::{anyhow, Result};
use sysinfo::{get_current_pid, Signal, System};
use tracing::info;

use super::reminder_path::to_reminder_path;

/// Stops every running process started from the executable at `name`.
pub fn kill_previous_reminders(name: &Path) -> Result<()> {
    let system = System::new_all();
    let current_id = get_current_pid().map_err(|e| anyhow!("Can't get current pid {e}"))?;
    for (pid, process) in system.processes().iter() {
        if *pid == current_id {
            continue;
        }
        if matches!(process.parent(), Some(p) if p == current_id) {
            continue;
        }

        if process
            .exe()
            .filter(|v| v.exists())
            .filter(|v| name == *v)
            .is_some()
        {
            info!("Stopping reminder {pid}");
            // This will forcefully terminate the process on Windows. Anything better will require a
            // lot more work.
            if process.kill_with(Signal::Term).is_none() {
                process.kill();
            }
            process.wait();
        }
    }
    Ok(())
}

/// Stops the reminder, if there is one running.
pub fn stop_reminder() -> Result<()> {
    kill_previous_reminders(&to_reminder_path(std::env::current_exe()?))
}

/// Intended for shutting down previous reminder and starting new one. The reminder is started as
/// a detached process which keeps running after the cli exits.
pub fn restart_reminder(dir: Option<&Path>) -> Result<()> {
    let process_name = to_reminder_path(std::env::current_exe()?);
    kill_previous_reminders(&process_name)?;
    let mut command = std::process::Command::new(process_name);
    command.arg("--force");
    if let Some(dir) = dir {
        command.arg("--dir").arg(dir);
    }

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        // DETACHED_PROCESS
        command.creation_flags(0x00000008);
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }
    command.stdin(Stdio::null());
    command.stdout(Stdio::null());

    #[allow(clippy::zombie_processes)]
    let child = command.spawn()?;
    info!("Spawned reminder {}", child.id());
    Ok(())
}
