use crate::actions::launch::spawn_detached;
use crate::error::Result;
use crate::paths::Subsystem;
use std::process::Command;

/// Command that hands `target` (a path or URI) to the platform's default
/// handler.
pub fn default_opener(target: &str, subsystem: &Subsystem) -> Command {
    if subsystem.is_wsl() {
        let mut cmd = Command::new("cmd.exe");
        cmd.args(["/C", "start", ""]).arg(target);
        return cmd;
    }

    #[cfg(target_os = "windows")]
    let cmd = {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(target);
        cmd
    };

    #[cfg(target_os = "macos")]
    let cmd = {
        let mut cmd = Command::new("open");
        cmd.arg(target);
        cmd
    };

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let cmd = {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(target);
        cmd
    };

    cmd
}

pub fn open_externally(uri: &str) -> Result<()> {
    spawn_detached(default_opener(uri, &Subsystem::Native))?;

    Ok(())
}
