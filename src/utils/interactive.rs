use crate::core::traits::Prompter;
use crate::utils::error::{AppError, AppResult};
use std::io::{self, BufRead, Write};

pub fn prompt_input(prompt: &str) -> AppResult<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_string())
}

pub fn prompt_yes_no(prompt: &str) -> AppResult<bool> {
    loop {
        let input = prompt_input(&format!("{} [y/N]: ", prompt))?;
        match parse_yes_no(&input) {
            Some(answer) => return Ok(answer),
            None => println!("Please enter 'y' or 'n'"),
        }
    }
}

fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" | "" => Some(false),
        _ => None,
    }
}

/// Read the next line from `reader` without its line ending. `None` at end of input.
pub fn next_line<R: BufRead + ?Sized>(reader: &mut R) -> AppResult<Option<String>> {
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .map_err(|e| AppError::Io(format!("Failed to read input: {}", e)))?;
    if read == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

/// Prompter backed by the controlling terminal
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn read_secret(&self, prompt: &str) -> AppResult<String> {
        rpassword::prompt_password(prompt)
            .map(|s| s.trim().to_string())
            .map_err(|e| AppError::Io(format!("Failed to read hidden input: {}", e)))
    }

    fn confirm(&self, question: &str) -> AppResult<bool> {
        prompt_yes_no(question)
    }
}
