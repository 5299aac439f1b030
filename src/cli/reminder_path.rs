use std::path::PathBuf;

/// Path of the reminder executable, which is installed next to the cli.
pub fn to_reminder_path(mut path: PathBuf) -> PathBuf {
    path.set_file_name("attendance-reminder");
    #[cfg(windows)]
    {
        path.set_extension("exe");
    }
    path
}
