use crate::actions::file_ops::default_opener;
use crate::data::{AppDescriptor, Candidate};
use crate::error::{OpenError, Result};
use crate::paths::Subsystem;
use std::process::{Child, Command, Stdio};

const FILE_PLACEHOLDER: &str = "${file}";

pub fn launch_app(
    file_path: &str,
    candidate: Option<Candidate<'_>>,
    subsystem: &Subsystem,
) -> Result<()> {
    spawn_detached(build_command(file_path, candidate, subsystem))?;
    Ok(())
}

/// Spawns `cmd` with null stdio and hands back the child without waiting.
pub fn spawn_detached(mut cmd: Command) -> Result<Child> {
    // Detach process output from the terminal
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    let program = cmd.get_program().to_string_lossy().into_owned();
    tracing::debug!(program = %program, "spawning");

    cmd.spawn().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            OpenError::LaunchFailed(format!("{} not found in PATH", program))
        } else {
            OpenError::LaunchFailed(format!("{}: {}", program, e))
        }
    })
}

pub fn build_command(
    file_path: &str,
    candidate: Option<Candidate<'_>>,
    subsystem: &Subsystem,
) -> Command {
    match candidate {
        None => default_opener(file_path, subsystem),
        Some(Candidate::Named(name)) => named_command(name, file_path),
        Some(Candidate::App(app)) => app_command(app, file_path, subsystem),
    }
}

fn named_command(name: &str, file_path: &str) -> Command {
    #[cfg(target_os = "macos")]
    let cmd = {
        let mut cmd = Command::new("open");
        cmd.arg("-a").arg(name).arg(file_path);
        cmd
    };

    #[cfg(not(target_os = "macos"))]
    let cmd = {
        let mut cmd = Command::new(name);
        cmd.arg(file_path);
        cmd
    };

    cmd
}

fn app_command(app: &AppDescriptor, file_path: &str, subsystem: &Subsystem) -> Command {
    if let Some(shell_command) = &app.shell_command {
        return shell(&shell_command.replace(FILE_PLACEHOLDER, &quote(file_path)));
    }

    let Some(program) = &app.open_command else {
        return default_opener(file_path, subsystem);
    };

    let mut cmd = Command::new(program);
    let mut placed = false;
    for arg in &app.args {
        if arg.contains(FILE_PLACEHOLDER) {
            placed = true;
            cmd.arg(arg.replace(FILE_PLACEHOLDER, file_path));
        } else {
            cmd.arg(arg);
        }
    }
    if !placed {
        cmd.arg(file_path);
    }
    cmd
}

#[cfg(target_os = "windows")]
fn shell(command_line: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command_line);
    cmd
}

#[cfg(not(target_os = "windows"))]
fn shell(command_line: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command_line);
    cmd
}

#[cfg(target_os = "windows")]
fn quote(path: &str) -> String {
    format!("\"{}\"", path)
}

#[cfg(not(target_os = "windows"))]
fn quote(path: &str) -> String {
    format!("'{}'", path.replace('\'', "'\\''"))
}
