use crate::core::view::ViewLine;
use colored::*;

pub struct OutputStyle;

impl OutputStyle {
    pub fn title(text: &str) -> ColoredString {
        text.bright_blue().bold()
    }

    pub fn header(text: &str) -> ColoredString {
        text.bold()
    }

    pub fn label(text: &str) -> ColoredString {
        text.cyan()
    }

    pub fn section(text: &str) -> ColoredString {
        text.bright_cyan().bold()
    }

    pub fn due(text: &str) -> ColoredString {
        text.bright_yellow()
    }

    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    pub fn info(text: &str) -> ColoredString {
        text.blue()
    }

    pub fn muted(text: &str) -> ColoredString {
        text.dimmed()
    }

    pub fn header_separator() -> String {
        "═".repeat(50)
    }

    pub fn print_header(title: &str) {
        println!("{}", Self::title(title));
        println!("{}", Self::header_separator());
    }

    pub fn print_field(label: &str, value: &str) {
        println!("{:>16}: {}", Self::label(label), value);
    }

    /// Colorize one project view line.
    pub fn view_line(line: &ViewLine) -> String {
        match line {
            ViewLine::Header(name) => format!("## {}", Self::section(name)),
            ViewLine::Task { content, due: Some(label) } => {
                format!("  {} {}", content, Self::due(&format!("[{}]", label)))
            }
            ViewLine::Task { content, due: None } => format!("  {}", content),
        }
    }
}

/// Turn ANSI colors on or off for the rest of the process
pub fn set_color(enabled: bool) {
    if enabled {
        colored::control::unset_override();
    } else {
        colored::control::set_override(false);
    }
}

pub fn print_warning(message: &str) {
    println!("⚠️  {}", OutputStyle::warning(message));
}

pub fn print_success(message: &str) {
    println!("✅ {}", OutputStyle::success(message));
}

pub fn print_info(message: &str) {
    println!("{}", OutputStyle::info(message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_line_matches_plain_rendering_without_color() {
        colored::control::set_override(false);
        let lines = [
            ViewLine::Header("Work".to_string()),
            ViewLine::Task { content: "## literal".to_string(), due: None },
            ViewLine::Task { content: "Read [book]".to_string(), due: Some("240102".to_string()) },
        ];

        for line in &lines {
            assert_eq!(OutputStyle::view_line(line), line.to_string());
        }
    }
}
