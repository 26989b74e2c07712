//! Rendering a project's active tasks grouped by section

use crate::core::data::{Section, Task};
use std::fmt;

/// One line of the project view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewLine {
    /// `## <name>`
    Header(String),
    /// `  <content>` with an optional `[YYMMDD]` label
    Task { content: String, due: Option<String> },
}

impl fmt::Display for ViewLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewLine::Header(name) => write!(f, "## {}", name),
            ViewLine::Task { content, due: Some(label) } => write!(f, "  {} [{}]", content, label),
            ViewLine::Task { content, due: None } => write!(f, "  {}", content),
        }
    }
}

/// Tasks sharing one `section_id`, in fetch order
struct Group<'a> {
    section_id: Option<&'a str>,
    tasks: Vec<&'a Task>,
}

/// Render tasks as display lines.
///
/// Groups appear in the order their first task appears in `tasks`. A group
/// gets a `## <name>` header only when its section id resolves to a named
/// section; tasks without a section, or whose section has since been
/// deleted, are listed without one.
pub fn render(tasks: &[Task], sections: &[Section]) -> Vec<String> {
    view_lines(tasks, sections)
        .iter()
        .map(ViewLine::to_string)
        .collect()
}

/// Same grouping as [`render`], before formatting.
pub fn view_lines(tasks: &[Task], sections: &[Section]) -> Vec<ViewLine> {
    let mut groups: Vec<Group> = Vec::new();

    for task in tasks {
        let key = task.section_id.as_deref();
        match groups.iter_mut().find(|g| g.section_id == key) {
            Some(group) => group.tasks.push(task),
            None => groups.push(Group {
                section_id: key,
                tasks: vec![task],
            }),
        }
    }

    let mut lines = Vec::with_capacity(tasks.len() + groups.len());
    for group in groups {
        if let Some(name) = group.section_id.and_then(|id| section_name(sections, id)) {
            lines.push(ViewLine::Header(name.to_string()));
        }
        lines.extend(group.tasks.into_iter().map(|task| ViewLine::Task {
            content: task.content.clone(),
            due: task.due_label(),
        }));
    }
    lines
}

fn section_name<'a>(sections: &'a [Section], id: &str) -> Option<&'a str> {
    sections
        .iter()
        .find(|s| s.id == id)
        .map(|s| s.name.as_str())
        .filter(|name| !name.is_empty())
}
