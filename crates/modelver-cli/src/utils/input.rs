//! User input utilities for interactive command-line prompts.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

/// Prompts the user for a yes/no confirmation. Empty input means no.
///
/// # Errors
///
/// Returns an error if reading from stdin fails.
pub fn prompt_confirmation(prompt: &str) -> Result<bool> {
    confirm_with(&mut io::stdin().lock(), &mut io::stdout(), prompt)
}

fn read_answer(input: &mut impl BufRead, output: &mut impl Write, prompt: &str) -> Result<String> {
    write!(output, "{prompt}: ")?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read user input")?;
    Ok(line.trim().to_string())
}

fn confirm_with(input: &mut impl BufRead, output: &mut impl Write, prompt: &str) -> Result<bool> {
    loop {
        let answer = read_answer(input, output, &format!("{prompt} (y/N)"))?;
        match answer.to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            // EOF reads as an empty line.
            "n" | "no" | "" => return Ok(false),
            _ => writeln!(output, "Please enter 'y' for yes or 'n' for no.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn confirm(answers: &str) -> (bool, String) {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = confirm_with(&mut input, &mut output, "Proceed?").unwrap();
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_yes_answers() {
        assert!(confirm("y\n").0);
        assert!(confirm("YES\n").0);
    }

    #[test]
    fn test_default_is_no() {
        assert!(!confirm("\n").0);
        assert!(!confirm("").0);
    }

    #[test]
    fn test_reprompts_on_garbage() {
        let (result, output) = confirm("maybe\nn\n");
        assert!(!result);
        assert_eq!(output.matches("Proceed? (y/N): ").count(), 2);
        assert!(output.contains("Please enter 'y'"));
    }
}
