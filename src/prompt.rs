//! Line-based terminal prompts.
//!
//! `Prompter` is generic over its input and output so commands can be
//! driven from an in-memory buffer in tests. End of input is reported as
//! `Ok(None)`, which commands treat as a cancel. Secrets are read without
//! echo when the prompter sits on an interactive stdin.

use std::io::{self, BufRead, IsTerminal, Stdin, StdinLock, Stdout, Write};

use crate::error::ZammadError;

/// Interactive prompts over a reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    /// Read secrets from the terminal with echo off.
    masked: bool,
}

impl Prompter<StdinLock<'static>, Stdout> {
    /// Creates a prompter on the process's stdin and stdout.
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        let masked = stdin.is_terminal();
        Self {
            input: stdin.lock(),
            output: io::stdout(),
            masked,
        }
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Creates a prompter reading from `input` and writing to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            masked: false,
        }
    }

    /// Consumes the prompter and returns the output writer.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Prints a line to the prompt output.
    pub fn say(&mut self, message: &str) -> Result<(), ZammadError> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    /// Asks for free text until `validate` accepts it.
    ///
    /// `validate` returns `Some(reason)` to reject an answer; the reason is
    /// shown and the question is asked again. The accepted answer is
    /// returned trimmed.
    ///
    /// # Errors
    ///
    /// Returns `ZammadError::Io` if the terminal cannot be read or written.
    pub fn text<F>(&mut self, message: &str, validate: F) -> Result<Option<String>, ZammadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        loop {
            let Some(answer) = self.ask(message)? else {
                return Ok(None);
            };
            match validate(&answer) {
                Some(reason) => writeln!(self.output, "  {}", reason)?,
                None => return Ok(Some(answer)),
            }
        }
    }

    /// Asks for a secret value. Blank answers are rejected.
    ///
    /// On a terminal the value is typed with echo off. Otherwise it is read
    /// as a plain line from the input.
    pub fn secret(&mut self, message: &str) -> Result<Option<String>, ZammadError> {
        if !self.masked {
            return self.text(message, required);
        }

        loop {
            write!(self.output, "{} ", message)?;
            self.output.flush()?;

            let value = match rpassword::read_password() {
                Ok(value) => value.trim().to_string(),
                Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                    writeln!(self.output)?;
                    return Ok(None);
                }
                Err(err) => return Err(err.into()),
            };
            match required(&value) {
                Some(reason) => writeln!(self.output, "  {}", reason)?,
                None => return Ok(Some(value)),
            }
        }
    }

    /// Asks a yes/no question. An empty answer selects `default`.
    pub fn confirm(&mut self, message: &str, default: bool) -> Result<Option<bool>, ZammadError> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let question = format!("{} {}", message, hint);

        loop {
            let Some(answer) = self.ask(&question)? else {
                return Ok(None);
            };
            match answer.to_ascii_lowercase().as_str() {
                "" => return Ok(Some(default)),
                "y" | "yes" => return Ok(Some(true)),
                "n" | "no" => return Ok(Some(false)),
                _ => writeln!(self.output, "  Please answer y or n")?,
            }
        }
    }

    /// Shows a numbered list and returns the index of the chosen option.
    ///
    /// An empty option list returns `Ok(None)` without reading input.
    pub fn select<S: AsRef<str>>(
        &mut self,
        message: &str,
        options: &[S],
    ) -> Result<Option<usize>, ZammadError> {
        if options.is_empty() {
            return Ok(None);
        }

        writeln!(self.output, "{}", message)?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  {:>3}) {}", i + 1, option.as_ref())?;
        }

        let question = format!("Choose 1-{}", options.len());
        loop {
            let Some(answer) = self.ask(&question)? else {
                return Ok(None);
            };
            match answer.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(Some(n - 1)),
                _ => writeln!(
                    self.output,
                    "  Enter a number between 1 and {}",
                    options.len()
                )?,
            }
        }
    }

    /// Writes the question and reads one trimmed line; `None` at end of input.
    fn ask(&mut self, question: &str) -> Result<Option<String>, ZammadError> {
        write!(self.output, "{} ", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn required(value: &str) -> Option<String> {
    value
        .is_empty()
        .then(|| "A value is required".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn not_empty(value: &str) -> Option<String> {
        value.is_empty().then(|| "Cannot be empty".to_string())
    }

    #[test]
    fn test_text_returns_trimmed_answer() {
        let mut p = prompter("  hello world \n");
        assert_eq!(
            p.text("Message:", not_empty).unwrap(),
            Some("hello world".to_string())
        );
    }

    #[test]
    fn test_text_reprompts_on_invalid() {
        let mut p = prompter("\n   \nfinally\n");
        let answer = p.text("Message:", not_empty).unwrap();
        assert_eq!(answer, Some("finally".to_string()));

        let output = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(output.matches("Cannot be empty").count(), 2);
        assert_eq!(output.matches("Message:").count(), 3);
    }

    #[test]
    fn test_text_eof_cancels() {
        let mut p = prompter("");
        assert_eq!(p.text("Message:", not_empty).unwrap(), None);

        let mut p = prompter("\n");
        assert_eq!(p.text("Message:", not_empty).unwrap(), None);
    }

    #[test]
    fn test_secret_rejects_blank() {
        let mut p = prompter("\nabc123\n");
        assert_eq!(p.secret("Token:").unwrap(), Some("abc123".to_string()));

        let output = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(output.matches("A value is required").count(), 1);
    }

    #[test]
    fn test_secret_from_buffer_reads_plain_line() {
        let mut p = prompter("  tok-42  \n");
        assert!(!p.masked);
        assert_eq!(p.secret("Token:").unwrap(), Some("tok-42".to_string()));
        assert_eq!(prompter("").secret("Token:").unwrap(), None);
    }

    #[test]
    fn test_confirm_answers() {
        assert_eq!(prompter("y\n").confirm("Close?", false).unwrap(), Some(true));
        assert_eq!(prompter("No\n").confirm("Close?", true).unwrap(), Some(false));
        assert_eq!(prompter("\n").confirm("Close?", true).unwrap(), Some(true));
        assert_eq!(prompter("\n").confirm("Close?", false).unwrap(), Some(false));
        assert_eq!(prompter("").confirm("Close?", true).unwrap(), None);
    }

    #[test]
    fn test_confirm_reprompts() {
        let mut p = prompter("maybe\ny\n");
        assert_eq!(p.confirm("Close?", false).unwrap(), Some(true));
        let output = String::from_utf8(p.into_output()).unwrap();
        assert!(output.contains("Please answer y or n"));
    }

    #[test]
    fn test_select_returns_index() {
        let mut p = prompter("2\n");
        let options = ["show", "reply", "close"];
        assert_eq!(p.select("Action:", &options).unwrap(), Some(1));

        let output = String::from_utf8(p.into_output()).unwrap();
        assert!(output.contains("1) show"));
        assert!(output.contains("3) close"));
    }

    #[test]
    fn test_select_reprompts_out_of_range() {
        let mut p = prompter("0\n9\nx\n3\n");
        assert_eq!(p.select("Action:", &["a", "b", "c"]).unwrap(), Some(2));
    }

    #[test]
    fn test_select_empty_and_eof() {
        let empty: [&str; 0] = [];
        assert_eq!(prompter("1\n").select("Pick:", &empty).unwrap(), None);
        assert_eq!(prompter("").select("Pick:", &["a"]).unwrap(), None);
    }
}
