use log::{info, warn};
use std::cell::RefCell;
use std::io;
use std::process::{Child, Command, Stdio};
use thiserror::Error;

/// Failure to start a game
#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("command is empty")]
    EmptyCommand,

    #[error("failed to start {program}: {source}")]
    Io { program: String, source: io::Error },
}

/// Starts games without waiting for them
pub trait ProcessLauncher {
    fn launch(&self, command: &str) -> Result<(), SpawnError>;

    /// Collect games that have exited, without blocking
    fn reap(&self) {}
}

/// Split a command line on whitespace into program and arguments
///
/// No shell is involved, so quotes and metacharacters are passed through verbatim.
pub fn split_command(command: &str) -> Option<(&str, Vec<&str>)> {
    let mut parts = command.split_whitespace();
    let program = parts.next()?;
    Some((program, parts.collect()))
}

/// Spawns games as OS processes and collects them once they exit
#[derive(Debug, Default)]
pub struct SystemLauncher {
    children: RefCell<Vec<Child>>,
}

impl SystemLauncher {
    /// Games started by this launcher that have not been seen exiting yet
    pub fn running(&self) -> usize {
        self.children.borrow().len()
    }
}

impl ProcessLauncher for SystemLauncher {
    fn launch(&self, command: &str) -> Result<(), SpawnError> {
        let (program, args) = split_command(command).ok_or(SpawnError::EmptyCommand)?;
        info!("Running command: {}", command);

        let child = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| SpawnError::Io {
                program: program.to_string(),
                source,
            })?;

        info!("Started {} (pid {})", program, child.id());
        self.children.borrow_mut().push(child);
        Ok(())
    }

    fn reap(&self) {
        self.children.borrow_mut().retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                info!("Game process {} exited: {}", child.id(), status);
                false
            }
            Ok(None) => true,
            Err(e) => {
                warn!("Lost track of game process {}: {}", child.id(), e);
                false
            }
        });
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_single_program() {
        assert_eq!(split_command("pacman.sh"), Some(("pacman.sh", vec![])));
    }

    #[test]
    fn split_program_and_arguments() {
        assert_eq!(
            split_command("  mame   pacman -skip_gameinfo "),
            Some(("mame", vec!["pacman", "-skip_gameinfo"]))
        );
    }

    #[test]
    fn split_keeps_shell_metacharacters() {
        assert_eq!(split_command("echo $HOME;ls"), Some(("echo", vec!["$HOME;ls"])));
    }

    #[test]
    fn blank_command_is_rejected() {
        assert!(split_command("   ").is_none());
        assert!(matches!(SystemLauncher::default().launch(""), Err(SpawnError::EmptyCommand)));
    }

    #[test]
    fn missing_executable_is_reported() {
        let result = SystemLauncher::default().launch("definitely-not-an-installed-arcade-game --flag");
        match result {
            Err(SpawnError::Io { program, .. }) => {
                assert_eq!(program, "definitely-not-an-installed-arcade-game")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn launch_returns_without_waiting() {
        let launcher = SystemLauncher::default();
        let started = std::time::Instant::now();
        launcher.launch("sleep 5").unwrap();
        assert!(started.elapsed() < std::time::Duration::from_secs(2));

        launcher.reap();
        assert_eq!(launcher.running(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn exited_games_are_reaped() {
        let launcher = SystemLauncher::default();
        launcher.launch("true").unwrap();
        assert_eq!(launcher.running(), 1);

        for _ in 0..100 {
            launcher.reap();
            if launcher.running() == 0 {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(20));
        }
        assert_eq!(launcher.running(), 0);
    }
}
