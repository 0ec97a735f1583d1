use anyhow::{Context, Result};
use arboard::Clipboard;
#[cfg(target_os = "linux")]
use arboard::SetExtLinux;
use std::fs;
use std::io::Read;
use std::path::Path;

pub const DAEMON_FLAG: &str = "__clipboard_daemon";

/// Destination for the yanked document. The workflow only ever writes.
pub trait ClipboardSink {
    fn set_text(&mut self, text: String) -> Result<()>;
}

/// The operating system clipboard.
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: String) -> Result<()> {
        copy_text_to_clipboard(text)
    }
}

/// Byte the daemon writes once it holds a clipboard handle.
pub const DAEMON_ACK: u8 = b'+';

#[cfg(target_os = "linux")]
fn run_daemon_mode() -> Result<()> {
    use std::io::Write;

    let text = std::io::read_to_string(std::io::stdin())?;

    let mut clipboard = Clipboard::new().context("clipboard unavailable")?;
    let mut stdout = std::io::stdout();
    stdout.write_all(&[DAEMON_ACK])?;
    stdout.flush()?;

    // Blocks until another program takes ownership of the selection.
    clipboard.set().wait().text(text)?;
    Ok(())
}

/// Checks if the DAEMON_FLAG is present in args. If so, runs in daemon mode.
/// Returns Ok(true) if daemon mode was run, Ok(false) otherwise.
pub fn check_and_run_daemon_if_requested() -> Result<bool> {
    if std::env::args().any(|a| a == DAEMON_FLAG) {
        #[cfg(target_os = "linux")]
        {
            if let Err(e) = run_daemon_mode() {
                // The parent relays stderr as the failure cause.
                eprintln!("{:#}", e);
                std::process::exit(1);
            }
            return Ok(true);
        }
        #[cfg(not(target_os = "linux"))]
        {
            tracing::warn!("{} flag used on non-Linux system. Ignoring.", DAEMON_FLAG);
            return Ok(true);
        }
    }
    Ok(false)
}

/// Wait for the daemon's ack on `ack`. Without one, the daemon's stderr
/// becomes the error.
pub fn await_daemon_ack(mut ack: impl Read, mut stderr: impl Read) -> Result<()> {
    let mut byte = [0u8; 1];
    let read = ack
        .read(&mut byte)
        .context("lost contact with clipboard daemon")?;
    if read == 1 && byte[0] == DAEMON_ACK {
        return Ok(());
    }

    let mut reason = String::new();
    // Best effort; an unreadable stderr still leaves a useful message.
    let _ = stderr.read_to_string(&mut reason);
    let reason = reason.trim();
    if reason.is_empty() {
        anyhow::bail!("clipboard daemon exited without taking the clipboard");
    }
    anyhow::bail!("{}", reason)
}

pub fn copy_text_to_clipboard(text: String) -> Result<()> {
    #[cfg(not(target_os = "linux"))]
    {
        let mut clipboard = Clipboard::new().context("clipboard unavailable")?;
        clipboard.set_text(text)?;
    }

    #[cfg(target_os = "linux")]
    {
        use std::io::Write;
        use std::process::{Command, Stdio};

        // X11/Wayland selections die with their owner, so hand the text to a
        // detached copy of ourselves that outlives this process.
        let mut child = Command::new(std::env::current_exe()?)
            .arg(DAEMON_FLAG)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .current_dir("/")
            .spawn()
            .context("failed to start clipboard daemon")?;

        let (Some(mut stdin), Some(ack), Some(stderr)) =
            (child.stdin.take(), child.stdout.take(), child.stderr.take())
        else {
            return Err(anyhow::anyhow!("Failed to get pipes for clipboard daemon"));
        };
        stdin.write_all(text.as_bytes())?;
        stdin.flush()?;
        // Closing stdin lets the daemon finish reading.
        drop(stdin);

        if let Err(e) = await_daemon_ack(ack, stderr) {
            let _ = child.wait();
            return Err(e);
        }
        tracing::debug!(pid = child.id(), "clipboard handed to daemon");
    }
    Ok(())
}

/// Read `path` as UTF-8 text in one go.
pub fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))
}

/// Put the contents of `path` on the clipboard and return them.
pub fn copy_file_contents(path: &Path, sink: &mut impl ClipboardSink) -> Result<String> {
    let contents = read_document(path)?;
    sink.set_text(contents.clone())
        .context("could not write to the clipboard")?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "copied document");
    Ok(contents)
}
