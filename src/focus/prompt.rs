//! Free-form number prompts for Pomodoro settings.

use std::io::{BufRead, Write};

use crate::error::AlfredError;

/// Parse a whole number greater than zero.
///
/// # Errors
///
/// Returns `AlfredError::InvalidDuration` for anything else.
pub fn parse_positive(input: &str) -> Result<u32, AlfredError> {
    let trimmed = input.trim();
    match trimmed.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AlfredError::InvalidDuration(format!(
            "'{trimmed}' is not a whole number greater than 0"
        ))),
    }
}

/// Ask `question` until the answer is a whole number greater than zero.
///
/// # Errors
///
/// Returns `AlfredError::InvalidDuration` if input ends before a valid
/// answer, or `AlfredError::Io` if reading or writing fails.
pub fn prompt_positive<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<u32, AlfredError> {
    loop {
        write!(output, "{question} ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(AlfredError::InvalidDuration(format!(
                "no answer given for '{question}'"
            )));
        }

        match parse_positive(&line) {
            Ok(n) => return Ok(n),
            Err(_) => writeln!(output, "Please enter a whole number greater than 0.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("25").unwrap(), 25);
        assert_eq!(parse_positive(" 5\n").unwrap(), 5);
        assert!(parse_positive("0").is_err());
        assert!(parse_positive("-3").is_err());
        assert!(parse_positive("ten").is_err());
        assert!(parse_positive("").is_err());
    }

    #[test]
    fn test_prompt_accepts_first_valid() {
        let mut input = Cursor::new("25\n");
        let mut output = Vec::new();

        let n = prompt_positive(&mut input, &mut output, "Session length (min):").unwrap();
        assert_eq!(n, 25);
        assert_eq!(String::from_utf8(output).unwrap(), "Session length (min): ");
    }

    #[test]
    fn test_prompt_reasks_until_valid() {
        let mut input = Cursor::new("0\nabc\n-1\n4\n");
        let mut output = Vec::new();

        let n = prompt_positive(&mut input, &mut output, "Sessions:").unwrap();
        assert_eq!(n, 4);

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Please enter a whole number").count(), 3);
        assert_eq!(text.matches("Sessions:").count(), 4);
    }

    #[test]
    fn test_prompt_end_of_input() {
        let mut input = Cursor::new("0\n");
        let mut output = Vec::new();

        let err = prompt_positive(&mut input, &mut output, "Break length (min):").unwrap_err();
        assert!(matches!(err, AlfredError::InvalidDuration(_)));
    }
}
