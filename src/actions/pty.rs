//! Pseudo-terminal allocation and child process launch.
//!
//! A command runs as a fresh session leader whose controlling terminal and
//! standard streams are the slave side of a newly allocated pty. The parent
//! keeps only the master, wrapped in a [`PtyChannel`].

use std::ffi::OsString;
use std::io::Read;
use std::mem::MaybeUninit;
use std::os::unix::io::RawFd;
use std::path::PathBuf;
use std::time::Duration;

use portable_pty::{native_pty_system, Child, CommandBuilder, MasterPty, PtyPair, PtySize};

use crate::actions::reader::CaptureSource;
use crate::error::{Error, Result};
use crate::queries::output::{WRAP_COLS, WRAP_ROWS};

/// Default shell used in verbatim mode.
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// How submitted text is turned into a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ShellMode {
    /// Hand the text to `<shell> -c` unchanged.
    ///
    /// This is arbitrary command execution: pipes, redirections, globbing,
    /// variable expansion and command substitution all apply.
    #[default]
    Verbatim,
    /// Split the text into words using shell quoting rules and execute the
    /// first word directly, with no shell in between.
    Literal,
}

/// Settings for launching commands.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub shell: PathBuf,
    pub mode: ShellMode,
    /// Working directory; the current directory when `None`.
    pub cwd: Option<PathBuf>,
    pub rows: u16,
    pub cols: u16,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            shell: PathBuf::from(DEFAULT_SHELL),
            mode: ShellMode::default(),
            cwd: None,
            rows: WRAP_ROWS as u16,
            cols: WRAP_COLS as u16,
        }
    }
}

impl LaunchOptions {
    fn size(&self) -> PtySize {
        PtySize {
            rows: self.rows,
            cols: self.cols,
            pixel_width: 0,
            pixel_height: 0,
        }
    }
}

/// Build the process description for `command`.
pub fn build_command(command: &str, options: &LaunchOptions) -> Result<CommandBuilder> {
    let mut cmd = match options.mode {
        ShellMode::Verbatim => {
            let mut cmd = CommandBuilder::new(&options.shell);
            cmd.arg("-c");
            cmd.arg(command);
            cmd
        }
        ShellMode::Literal => {
            let words =
                shell_words::split(command).map_err(|e| Error::InvalidCommand(e.to_string()))?;
            if words.is_empty() {
                return Err(Error::EmptyCommand);
            }
            CommandBuilder::from_argv(words.into_iter().map(OsString::from).collect())
        }
    };

    let cwd = match &options.cwd {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    cmd.cwd(cwd);
    Ok(cmd)
}

/// The parent's end of a running command: the pty master plus the child.
pub struct PtyChannel {
    master: Box<dyn MasterPty + Send>,
    reader: Box<dyn Read + Send>,
    child: Box<dyn Child + Send + Sync>,
}

impl PtyChannel {
    pub fn process_id(&self) -> Option<u32> {
        self.child.process_id()
    }

    fn master_fd(&self) -> std::io::Result<RawFd> {
        self.master.as_raw_fd().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "pty master has no descriptor")
        })
    }
}

impl CaptureSource for PtyChannel {
    fn wait_readable(&mut self, timeout: Duration) -> std::io::Result<bool> {
        let mut pfd = libc::pollfd {
            fd: self.master_fd()?,
            events: libc::POLLIN,
            revents: 0,
        };
        let millis = timeout.as_millis().min(libc::c_int::MAX as u128) as libc::c_int;
        let ret = unsafe { libc::poll(&mut pfd, 1, millis) };
        if ret < 0 {
            let err = std::io::Error::last_os_error();
            // A signal is not a failure of the descriptor
            if err.kind() == std::io::ErrorKind::Interrupted {
                return Ok(false);
            }
            return Err(err);
        }
        Ok(ret > 0)
    }

    fn read_chunk(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reader.read(buf)
    }

    fn try_exit(&mut self) -> std::io::Result<Option<u32>> {
        Ok(self.child.try_wait()?.map(|status| status.exit_code()))
    }

    fn terminate(&mut self) -> std::io::Result<()> {
        self.child.kill()
    }
}

impl Drop for PtyChannel {
    fn drop(&mut self) {
        log::trace!("closing pty master for pid {:?}", self.child.process_id());
    }
}

/// Allocate a pty and start `command` on it.
///
/// The child is a session leader with the pty slave as its controlling
/// terminal and standard streams. The slave is closed in the parent before
/// this returns, so end of stream is seen once the child side goes away.
pub fn open_channel(command: &str, options: &LaunchOptions) -> Result<PtyChannel> {
    let cmd = build_command(command, options)?;

    let PtyPair { master, slave } = native_pty_system()
        .openpty(options.size())
        .map_err(|e| Error::PtyOpen(e.to_string()))?;

    if let Some(fd) = master.as_raw_fd() {
        if let Err(e) = disable_newline_translation(fd) {
            log::debug!("leaving pty output translation on: {}", e);
        }
    }

    let child = slave
        .spawn_command(cmd)
        .map_err(|e| Error::Spawn(e.to_string()))?;
    drop(slave);

    let reader = master
        .try_clone_reader()
        .map_err(|e| Error::PtyOpen(e.to_string()))?;

    log::info!("launched {:?} as pid {:?}", command, child.process_id());
    Ok(PtyChannel {
        master,
        reader,
        child,
    })
}

/// Clear ONLCR so the child's `\n` reaches us as `\n` rather than `\r\n`.
fn disable_newline_translation(fd: RawFd) -> std::io::Result<()> {
    let mut termios = MaybeUninit::<libc::termios>::uninit();
    if unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) } != 0 {
        return Err(std::io::Error::last_os_error());
    }
    let mut termios = unsafe { termios.assume_init() };
    termios.c_oflag &= !libc::ONLCR;
    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) } != 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = LaunchOptions::default();
        assert_eq!(options.shell, PathBuf::from("/bin/sh"));
        assert_eq!(options.mode, ShellMode::Verbatim);
        assert_eq!((options.rows, options.cols), (17, 150));
    }

    #[test]
    fn test_verbatim_passes_text_to_shell() {
        let cmd = build_command("echo $HOME | wc -c", &LaunchOptions::default()).unwrap();
        let argv: Vec<_> = cmd
            .get_argv()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(argv, vec!["/bin/sh", "-c", "echo $HOME | wc -c"]);
    }

    #[test]
    fn test_literal_splits_words() {
        let options = LaunchOptions {
            mode: ShellMode::Literal,
            ..LaunchOptions::default()
        };
        let cmd = build_command("printf '%s|' 'a b' c", &options).unwrap();
        let argv: Vec<_> = cmd
            .get_argv()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(argv, vec!["printf", "%s|", "a b", "c"]);
    }

    #[test]
    fn test_literal_rejects_unbalanced_quotes() {
        let options = LaunchOptions {
            mode: ShellMode::Literal,
            ..LaunchOptions::default()
        };
        let err = build_command("echo 'oops", &options).unwrap_err();
        assert!(matches!(err, Error::InvalidCommand(_)));
    }

    #[test]
    fn test_literal_rejects_blank() {
        let options = LaunchOptions {
            mode: ShellMode::Literal,
            ..LaunchOptions::default()
        };
        assert!(matches!(
            build_command("   ", &options),
            Err(Error::EmptyCommand)
        ));
    }

    #[test]
    fn test_open_channel_captures_output() {
        let channel = open_channel("printf ready", &LaunchOptions::default()).unwrap();
        assert!(channel.process_id().is_some());
        let cancel = std::sync::atomic::AtomicBool::new(false);
        let mut out = Vec::new();
        let config = crate::actions::reader::ReaderConfig::default();
        crate::actions::reader::run(channel, &config, &cancel, |chunk| out.extend(chunk));
        assert_eq!(String::from_utf8_lossy(&out), "ready");
    }
}
