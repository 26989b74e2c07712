//! Bulk import of tasks and sections from markdown-like notes
//!
//! One line is one instruction:
//!
//! ```text
//! # Work                  <- creates a section; later tasks go into it
//! - [ ] Email report      <- a task; one list marker is stripped
//! * Book flights [240315] <- a task due 2024-03-15
//! DONE                    <- stops reading
//! ```
//!
//! Blank lines are ignored. Tasks seen before the first header have no
//! section.

use crate::core::data::{DueDate, NewTask, ProjectRef};
use crate::core::traits::TaskService;
use crate::utils::error::AppResult;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Line that ends an import
pub const SENTINEL: &str = "DONE";

/// `[YYMMDD]` at the very end of a task line
static DUE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([0-9]{6})\]$").expect("due tag pattern is valid"));

/// Content and due date of a single task line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub content: String,
    pub due_date: Option<DueDate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportLine {
    Blank,
    Sentinel,
    SectionHeader(String),
    TaskLine(TaskDraft),
}

/// Classify one raw input line.
pub fn classify(raw: &str) -> ImportLine {
    let line = raw.trim();

    if line == SENTINEL {
        ImportLine::Sentinel
    } else if line.is_empty() {
        ImportLine::Blank
    } else if line.starts_with('#') {
        ImportLine::SectionHeader(line.trim_start_matches('#').trim().to_string())
    } else {
        ImportLine::TaskLine(parse_task_line(line))
    }
}

/// Strip a list marker and an inline due tag from a task line.
pub fn parse_task_line(line: &str) -> TaskDraft {
    split_due_tag(strip_list_marker(line.trim()))
}

/// Split a trailing `[YYMMDD]` tag off `text`. List markers are left alone.
pub fn split_due_tag(text: &str) -> TaskDraft {
    let content = text.trim();

    match DUE_TAG.captures(content) {
        Some(caps) => {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            TaskDraft {
                content: content[..whole.start].trim().to_string(),
                due_date: DueDate::from_tag_digits(&caps[1]),
            }
        }
        None => TaskDraft {
            content: content.to_string(),
            due_date: None,
        },
    }
}

/// Remove one leading `- [ ]`, `-` or `*` marker, in that order of preference.
fn strip_list_marker(line: &str) -> &str {
    let rest = line
        .strip_prefix("- [ ]")
        .or_else(|| line.strip_prefix('-'))
        .or_else(|| line.strip_prefix('*'))
        .unwrap_or(line);
    rest.trim()
}

/// What an import will do, in order. Used for dry runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportInstruction {
    CreateSection { name: String },
    /// `section` indexes the sections created earlier in the same plan
    CreateTask { draft: TaskDraft, section: Option<usize> },
}

impl fmt::Display for ImportInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportInstruction::CreateSection { name } => write!(f, "section {}", name),
            ImportInstruction::CreateTask { draft, .. } => {
                write!(f, "task    {}", draft.content)?;
                if let Some(due) = &draft.due_date {
                    write!(f, " (due {})", due)?;
                }
                Ok(())
            }
        }
    }
}

/// Turn lines into the instructions an import would execute, without
/// touching the service.
pub fn plan<I, S>(lines: I) -> Vec<ImportInstruction>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut instructions = Vec::new();
    let mut sections = 0usize;
    let mut current = None;

    for line in lines {
        match classify(line.as_ref()) {
            ImportLine::Sentinel => break,
            ImportLine::Blank => {}
            ImportLine::SectionHeader(name) => {
                instructions.push(ImportInstruction::CreateSection { name });
                current = Some(sections);
                sections += 1;
            }
            ImportLine::TaskLine(draft) => {
                instructions.push(ImportInstruction::CreateTask {
                    draft,
                    section: current,
                });
            }
        }
    }

    instructions
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub tasks_created: usize,
    pub sections_created: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Continue,
    Finished,
}

/// Streaming importer: creates sections and tasks as lines arrive.
pub struct BulkImporter<'a> {
    service: &'a dyn TaskService,
    project: &'a ProjectRef,
    current_section: Option<String>,
    summary: ImportSummary,
}

impl<'a> BulkImporter<'a> {
    pub fn new(service: &'a dyn TaskService, project: &'a ProjectRef) -> Self {
        Self {
            service,
            project,
            current_section: None,
            summary: ImportSummary::default(),
        }
    }

    /// Process one line. Returns `Finished` once the sentinel is seen; the
    /// sentinel line itself creates nothing.
    pub async fn feed(&mut self, line: &str) -> AppResult<Progress> {
        match classify(line) {
            ImportLine::Sentinel => return Ok(Progress::Finished),
            ImportLine::Blank => {}
            ImportLine::SectionHeader(name) => {
                let section = self.service.create_section(&name, &self.project.id).await?;
                tracing::debug!(section = %section.name, id = %section.id, "created section");
                self.current_section = Some(section.id);
                self.summary.sections_created += 1;
            }
            ImportLine::TaskLine(draft) => {
                let request = NewTask::new(draft.content, self.project.id.clone())
                    .in_section(self.current_section.clone())
                    .due_on(draft.due_date);
                let task = self.service.create_task(&request).await?;
                tracing::debug!(id = %task.id, section = ?self.current_section, "created task");
                self.summary.tasks_created += 1;
            }
        }
        Ok(Progress::Continue)
    }

    pub fn summary(&self) -> ImportSummary {
        self.summary
    }
}

/// Run a whole import over `lines` and report how much was created.
pub async fn parse_and_emit<I, S>(
    lines: I,
    project: &ProjectRef,
    service: &dyn TaskService,
) -> AppResult<ImportSummary>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut importer = BulkImporter::new(service, project);
    for line in lines {
        if importer.feed(line.as_ref()).await? == Progress::Finished {
            break;
        }
    }
    Ok(importer.summary())
}
