use std::io::{BufRead, Write};

use desk_core::errors::CoreError;

/// Line-oriented prompt over any reader/writer pair.
pub struct Prompt<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub const fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    /// Print `prompt` and read one trimmed line. `None` at end of input.
    pub fn line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }

    /// Offer a numbered list and read a 1-based selection.
    ///
    /// Returns the 0-based index, `Ok(None)` at end of input, or the
    /// `InvalidChoice` for an out-of-range or non-numeric answer.
    pub fn choose<S: AsRef<str>>(
        &mut self,
        heading: &str,
        options: &[S],
        prompt: &str,
    ) -> anyhow::Result<Option<Result<usize, CoreError>>> {
        writeln!(self.out, "{heading}")?;
        for (index, option) in options.iter().enumerate() {
            writeln!(self.out, "{}. {}", index + 1, option.as_ref())?;
        }
        Ok(self
            .line(prompt)?
            .map(|answer| parse_choice(&answer, options.len()).map(|n| n - 1)))
    }
}

/// Parse a 1-based menu selection in `1..=max`.
pub fn parse_choice(input: &str, max: usize) -> Result<usize, CoreError> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=max).contains(n))
        .ok_or_else(|| CoreError::InvalidChoice {
            input: input.trim().to_string(),
            max,
        })
}
