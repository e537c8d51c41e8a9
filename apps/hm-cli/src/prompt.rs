//! Interactive prompting for runs started without `--trucks`/`--stations`.
//!
//! Generic over the reader and writer so tests can drive it from memory.

use std::io::{self, BufRead, Write};

pub const TRUCKS_PROMPT:   &str = "Number of trucks: (1 - 65535) ";
pub const STATIONS_PROMPT: &str = "Number of stations: (1 - 65535) ";
pub const DEBUG_PROMPT:    &str = "Debug mode: (0: Debug Off, 1 : Debug On) ";
pub const AGAIN_PROMPT:    &str = "Would you like to run another simulation? (y/n): ";

/// Largest count accepted at the prompt.
pub const MAX_COUNT: u32 = 65_535;

/// A count: one or more ASCII digits whose value lies in `1..=MAX_COUNT`.
pub fn parse_count(input: &str) -> Option<u32> {
    let value = parse_digits(input)?;
    (1..=MAX_COUNT).contains(&value).then_some(value)
}

/// The debug flag: all digits, value 0 or 1.
pub fn parse_debug(input: &str) -> Option<bool> {
    match parse_digits(input)? {
        0 => Some(false),
        1 => Some(true),
        _ => None,
    }
}

fn parse_digits(input: &str) -> Option<u32> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Digit strings too long for u32 are out of range anyway.
    input.parse().ok()
}

pub struct Prompter<R, W> {
    input:  R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn count(&mut self, prompt: &str) -> io::Result<u32> {
        self.ask(prompt, true, parse_count)
    }

    pub fn debug_flag(&mut self) -> io::Result<bool> {
        self.ask(DEBUG_PROMPT, true, parse_debug)
    }

    /// `y`/`Y` to go again, `n`/`N` to stop.  No "Success" line follows the
    /// answer.
    pub fn run_again(&mut self) -> io::Result<bool> {
        self.ask(AGAIN_PROMPT, false, |s| match s {
            "y" | "Y" => Some(true),
            "n" | "N" => Some(false),
            _ => None,
        })
    }

    /// Re-prompt until `parse` accepts a line.  End of input is an error so a
    /// closed stdin cannot spin forever.
    fn ask<T>(
        &mut self,
        prompt: &str,
        confirm: bool,
        parse: impl Fn(&str) -> Option<T>,
    ) -> io::Result<T> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            if let Some(value) = self.read_line()?.as_deref().and_then(&parse) {
                if confirm {
                    writeln!(self.output, "Success")?;
                }
                return Ok(value);
            }
            writeln!(self.output, "Invalid input")?;
        }
    }

    /// One line without its terminator, or `None` if it is not UTF-8.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        while matches!(buf.last(), Some(b'\n' | b'\r')) {
            buf.pop();
        }
        Ok(String::from_utf8(buf).ok())
    }
}
