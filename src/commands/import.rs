use crate::cli::ImportArgs;
use crate::commands::handlers::open_session;
use crate::config::Config;
use crate::core::import::{BulkImporter, ImportInstruction, Progress, SENTINEL, plan};
use crate::utils::error::{AppError, AppResult};
use crate::utils::output::OutputStyle;
use crate::utils::{next_line, print_info, print_success};
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal};

const LINE_FORMAT: &str = "\
  # Name           starts a section; following tasks go into it
  - [ ] Task       list markers (- [ ], -, *) are stripped
  Task [YYMMDD]    a trailing date tag sets the due date
Type DONE on its own line to finish.";

pub async fn handle_import_command(
    config: &Config,
    args: &ImportArgs,
    project_name: Option<&str>,
) -> AppResult<()> {
    let from_stdin = args.file.is_none();
    let stdin_is_tty = from_stdin && io::stdin().is_terminal();

    if stdin_is_tty {
        println!("{}", OutputStyle::muted(&usage(args.dry_run)));
    }

    if args.dry_run {
        let mut reader = open_input(args)?;
        return dry_run(&mut reader);
    }

    // Resolve before reading so prompts and import lines never interleave.
    let session = open_session(config, project_name).await?;
    let mut reader = open_input(args)?;

    let mut importer = BulkImporter::new(&session.client, &session.project);
    while let Some(line) = next_line(&mut reader)? {
        if importer.feed(&line).await? == Progress::Finished {
            break;
        }
    }

    let summary = importer.summary();
    if summary.sections_created > 0 {
        print_info(&format!("{} section(s) created", summary.sections_created));
    }
    print_success(&format!("{} task(s) created", summary.tasks_created));
    Ok(())
}

fn usage(dry_run: bool) -> String {
    let intro = if dry_run {
        "Enter one task per line to preview the import. Nothing is sent to Todoist."
    } else {
        "Enter one task per line. Tasks are created as you go."
    };
    format!("{}\n{}", intro, LINE_FORMAT)
}

fn open_input(args: &ImportArgs) -> AppResult<Box<dyn BufRead>> {
    match &args.file {
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                AppError::Io(format!("Failed to open {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

fn dry_run(reader: &mut dyn BufRead) -> AppResult<()> {
    let mut lines = Vec::new();
    while let Some(line) = next_line(reader)? {
        let done = line.trim() == SENTINEL;
        lines.push(line);
        if done {
            break;
        }
    }

    let instructions = plan(&lines);
    let mut tasks = 0;
    for instruction in &instructions {
        match instruction {
            ImportInstruction::CreateSection { .. } => {
                println!("{}", OutputStyle::section(&instruction.to_string()))
            }
            ImportInstruction::CreateTask { .. } => {
                tasks += 1;
                println!("{}", instruction);
            }
        }
    }

    print_info(&format!(
        "Dry run: {} task(s) and {} section(s) would be created",
        tasks,
        instructions.len() - tasks
    ));
    Ok(())
}
