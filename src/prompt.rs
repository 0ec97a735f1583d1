use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::io::{self, BufRead, Write};

/// One answer read from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    /// Ctrl-C, Ctrl-D on an empty line, or stdin closed.
    Interrupted,
}

pub trait LineReader {
    fn read_line(&mut self) -> io::Result<Input>;
}

/// Reads from any buffered source. Used when stdin is a pipe or file.
pub struct BufferedLineReader<R> {
    inner: R,
}

impl<R: BufRead> BufferedLineReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: BufRead> LineReader for BufferedLineReader<R> {
    fn read_line(&mut self) -> io::Result<Input> {
        let mut line = String::new();
        match self.inner.read_line(&mut line) {
            Ok(0) => Ok(Input::Interrupted),
            Ok(_) => Ok(Input::Line(line.trim_end_matches(['\r', '\n']).to_string())),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(Input::Interrupted),
            Err(e) => Err(e),
        }
    }
}

/// Line editor on top of crossterm raw mode, so Ctrl-C reaches us as a key
/// press instead of killing the process.
pub struct TerminalLineReader;

impl LineReader for TerminalLineReader {
    fn read_line(&mut self) -> io::Result<Input> {
        enable_raw_mode()?;
        let result = read_raw_line(&mut io::stdout());
        disable_raw_mode()?;
        result
    }
}

fn read_raw_line(out: &mut impl Write) -> io::Result<Input> {
    let mut buffer = String::new();
    loop {
        let Event::Key(key_event) = event::read()? else {
            continue;
        };
        if key_event.kind != KeyEventKind::Press {
            continue;
        }
        match apply_key(&mut buffer, key_event) {
            KeyOutcome::Continue => {}
            KeyOutcome::Echo(c) => write!(out, "{}", c)?,
            KeyOutcome::Erase => write!(out, "\x08 \x08")?,
            KeyOutcome::Submit => {
                write!(out, "\r\n")?;
                out.flush()?;
                return Ok(Input::Line(buffer));
            }
            KeyOutcome::Interrupt => {
                write!(out, "^C\r\n")?;
                out.flush()?;
                return Ok(Input::Interrupted);
            }
        }
        out.flush()?;
    }
}

#[derive(Debug, PartialEq, Eq)]
enum KeyOutcome {
    Continue,
    Echo(char),
    Erase,
    Submit,
    Interrupt,
}

fn apply_key(buffer: &mut String, key_event: KeyEvent) -> KeyOutcome {
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    match key_event.code {
        KeyCode::Char('c') if ctrl => KeyOutcome::Interrupt,
        KeyCode::Char('d') if ctrl && buffer.is_empty() => KeyOutcome::Interrupt,
        KeyCode::Char(_) if ctrl => KeyOutcome::Continue,
        KeyCode::Enter => KeyOutcome::Submit,
        KeyCode::Backspace => {
            if buffer.pop().is_some() {
                KeyOutcome::Erase
            } else {
                KeyOutcome::Continue
            }
        }
        KeyCode::Char(c) => {
            buffer.push(c);
            KeyOutcome::Echo(c)
        }
        _ => KeyOutcome::Continue,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;

    /// Replays canned answers; interrupts once they run out.
    pub struct ScriptedInput {
        answers: VecDeque<Input>,
    }

    impl ScriptedInput {
        pub fn lines(lines: &[&str]) -> Self {
            Self {
                answers: lines.iter().map(|l| Input::Line(l.to_string())).collect(),
            }
        }

        pub fn then_interrupt(mut self) -> Self {
            self.answers.push_back(Input::Interrupted);
            self
        }

        pub fn remaining(&self) -> usize {
            self.answers.len()
        }
    }

    impl LineReader for ScriptedInput {
        fn read_line(&mut self) -> io::Result<Input> {
            Ok(self.answers.pop_front().unwrap_or(Input::Interrupted))
        }
    }
}
