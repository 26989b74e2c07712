use crate::utils::error::{AppError, AppResult};
use crossterm::terminal::size;
use std::io::IsTerminal;

/// Terminal height in rows, if stdout is attached to one
fn terminal_rows() -> Option<u16> {
    if !std::io::stdout().is_terminal() {
        return None;
    }
    size().ok().map(|(_, rows)| rows)
}

/// Page when the content takes more than two thirds of the screen
pub fn should_paginate(line_count: usize, terminal_height: u16) -> bool {
    line_count > usize::from(terminal_height) * 2 / 3
}

/// Print lines, through the pager when they would not fit comfortably.
pub fn print_paged(lines: &[String]) -> AppResult<()> {
    match terminal_rows() {
        Some(rows) if should_paginate(lines.len(), rows) => page_lines(lines),
        _ => {
            for line in lines {
                println!("{}", line);
            }
            Ok(())
        }
    }
}

fn page_lines(lines: &[String]) -> AppResult<()> {
    let pager = minus::Pager::new();
    pager
        .push_str(lines.join("\n"))
        .map_err(|e| AppError::System(format!("Failed to push content to pager: {}", e)))?;

    if let Err(e) = minus::page_all(pager) {
        // Quitting the pager early is not an error
        if e.to_string().to_lowercase().contains("abort") {
            return Ok(());
        }
        return Err(AppError::System(format!("Failed to run pager: {}", e)));
    }

    Ok(())
}
