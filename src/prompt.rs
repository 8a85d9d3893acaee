//! Interactive collection of search parameters.
//!
//! Anything not given on the command line is asked for on the terminal,
//! using the same questions as the original bot. Prompts read from any
//! `BufRead` and write to any `Write` so they can be driven from tests.

use crate::models::SearchRequest;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::debug;

pub const PHRASE_PROMPT: &str = "Enter a search phrase: ";
pub const CATEGORY_PROMPT: &str = "Enter a news category (leave blank for all): ";
pub const MONTHS_PROMPT: &str = "Enter the number of months for news retrieval \
    (0 for current month, 1 for current and previous month, and so on; blank for no limit): ";
const MONTHS_RETRY: &str = "Please enter a whole number of months, 0 or more.";

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("a search phrase is required")]
    MissingPhrase,

    #[error("input ended before all questions were answered")]
    EndOfInput,

    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
}

/// Print `question` and read one line, without its line ending. `None` at
/// end of input.
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<Option<String>, PromptError> {
    write!(output, "{question}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn ask_required<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<String, PromptError> {
    match ask(input, output, question)? {
        Some(answer) => Ok(answer),
        None => Err(PromptError::EndOfInput),
    }
}

/// Ask for a month count until the answer is blank or a non-negative integer.
pub fn ask_months<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Option<u32>, PromptError> {
    loop {
        let answer = ask_required(input, output, MONTHS_PROMPT)?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        match answer.parse::<u32>() {
            Ok(n) => return Ok(Some(n)),
            Err(_) => writeln!(output, "{MONTHS_RETRY}")?,
        }
    }
}

/// Values supplied on the command line, any of which may be missing.
#[derive(Debug, Clone, Default)]
pub struct Supplied {
    pub phrase: Option<String>,
    pub category: Option<String>,
    pub months: Option<u32>,
}

/// Fill in whatever `supplied` lacks by prompting, unless `interactive` is
/// false.
///
/// The phrase is kept exactly as entered, surrounding spaces included. The
/// same string is typed into the site search and counted in the results.
///
/// # Errors
///
/// [`PromptError::MissingPhrase`] if no non-blank phrase is available.
pub fn complete_request<R: BufRead, W: Write>(
    supplied: Supplied,
    interactive: bool,
    input: &mut R,
    output: &mut W,
) -> Result<SearchRequest, PromptError> {
    let phrase = match supplied.phrase {
        Some(p) => p,
        None if interactive => ask_required(input, output, PHRASE_PROMPT)?,
        None => String::new(),
    };
    if phrase.trim().is_empty() {
        return Err(PromptError::MissingPhrase);
    }

    let category = match supplied.category {
        Some(c) => c,
        None if interactive => ask(input, output, CATEGORY_PROMPT)?.unwrap_or_default(),
        None => String::new(),
    };

    let months = match supplied.months {
        Some(n) => Some(n),
        None if interactive => ask_months(input, output)?,
        None => None,
    };

    let request = SearchRequest {
        phrase,
        category,
        months,
    };
    debug!(?request, "Search request assembled");
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(
        supplied: Supplied,
        interactive: bool,
        stdin: &str,
    ) -> (Result<SearchRequest, PromptError>, String) {
        let mut input = Cursor::new(stdin.as_bytes().to_vec());
        let mut output = Vec::new();
        let res = complete_request(supplied, interactive, &mut input, &mut output);
        (res, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_prompts_for_everything() {
        let (res, out) = run(Supplied::default(), true, "climate change\nScience\n2\n");
        let req = res.unwrap();
        assert_eq!(req.phrase, "climate change");
        assert_eq!(req.category, "Science");
        assert_eq!(req.months, Some(2));
        assert!(out.contains(PHRASE_PROMPT));
        assert!(out.contains(CATEGORY_PROMPT));
        assert!(out.contains("number of months"));
    }

    #[test]
    fn test_phrase_kept_as_typed() {
        let (res, _) = run(Supplied::default(), true, "cat \r\n\n 0 \n");
        let req = res.unwrap();
        assert_eq!(req.phrase, "cat ");
        assert_eq!(req.category(), None);
        assert_eq!(req.months, Some(0));
    }

    #[test]
    fn test_blank_answers_mean_no_filter() {
        let (res, _) = run(Supplied::default(), true, "election\n\n\n");
        let req = res.unwrap();
        assert_eq!(req.category, "");
        assert_eq!(req.months, None);
    }

    #[test]
    fn test_invalid_months_reprompts() {
        let (res, out) = run(Supplied::default(), true, "x\n\nthree\n-1\n1\n");
        assert_eq!(res.unwrap().months, Some(1));
        assert_eq!(out.matches("Please enter a whole number").count(), 2);
    }

    #[test]
    fn test_supplied_values_skip_prompts() {
        let supplied = Supplied {
            phrase: Some("oil".to_string()),
            category: Some("Business".to_string()),
            months: Some(0),
        };
        let (res, out) = run(supplied, true, "");
        let req = res.unwrap();
        assert_eq!(req.phrase, "oil");
        assert_eq!(req.months, Some(0));
        assert!(out.is_empty());
    }

    #[test]
    fn test_non_interactive_requires_phrase() {
        let (res, _) = run(Supplied::default(), false, "ignored\n");
        assert!(matches!(res, Err(PromptError::MissingPhrase)));
    }

    #[test]
    fn test_end_of_input_on_phrase() {
        let (res, _) = run(Supplied::default(), true, "");
        assert!(matches!(res, Err(PromptError::EndOfInput)));
    }

    #[test]
    fn test_blank_phrase_rejected() {
        let (res, _) = run(Supplied::default(), true, "   \n");
        assert!(matches!(res, Err(PromptError::MissingPhrase)));
    }
}
