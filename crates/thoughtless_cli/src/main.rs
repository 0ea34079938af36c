//! Terminal client for the note list.
//!
//! # Responsibility
//! - Map subcommands onto list-screen actions in `thoughtless_core`.
//! - Own all terminal I/O: printing rows and asking for delete confirmation.

use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thoughtless_core::{
    default_log_level, init_logging, DeleteDecision, DeleteOutcome, EditorResult,
    FileNoteArchive, MergeOutcome, NoteList, RowAction, RowActionOutcome, DATA_DIR_ENV,
};

const DEFAULT_DATA_DIR: &str = ".thoughtless";

#[derive(Parser, Debug)]
#[command(name = "thoughtless", version, about = "Keep a short list of notes")]
struct Cli {
    #[arg(
        long,
        global = true,
        env = DATA_DIR_ENV,
        default_value = DEFAULT_DATA_DIR,
        help = "Directory holding the notes archive"
    )]
    data_dir: PathBuf,
    #[arg(long, global = true, help = "Log level (trace|debug|info|warn|error)")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every note with its row index.
    List,
    /// Add a note at the top.
    Add { text: String },
    /// Replace the text of the note at INDEX; changed notes move to the top.
    Edit { index: usize, text: String },
    /// Move the note at FROM to position TO.
    Move { from: usize, to: usize },
    /// Print the text of the note at INDEX for sharing.
    Share { index: usize },
    /// Delete the note at INDEX after confirmation.
    Delete {
        index: usize,
        #[arg(long, default_value_t = false, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let data_dir = absolute_dir(&cli.data_dir)?;
    start_logging(cli.log_level.as_deref(), &data_dir);

    let mut list = NoteList::open(FileNoteArchive::in_dir(&data_dir));
    match cli.command {
        Commands::List => print_list(&list),
        Commands::Add { text } => {
            let saved = list.add_note(text).map_err(|err| err.to_string())?;
            report_save(saved);
            print_list(&list);
        }
        Commands::Edit { index, text } => {
            let original = list
                .get(index)
                .ok_or_else(|| format!("row index {index} out of range for {} note(s)", list.len()))?;
            let edited = original.revise(text).map_err(|err| err.to_string())?;
            let outcome = list
                .apply_editor_result(EditorResult::Edited {
                    note: edited,
                    index,
                })
                .map_err(|err| err.to_string())?;
            if outcome.merge == MergeOutcome::Unchanged {
                println!("No changes.");
            }
            if let Some(saved) = outcome.saved {
                report_save(saved);
            }
            print_list(&list);
        }
        Commands::Move { from, to } => {
            let saved = list.reorder(from, to).map_err(|err| err.to_string())?;
            report_save(saved);
            print_list(&list);
        }
        Commands::Share { index } => {
            if let RowActionOutcome::Share(payload) = list
                .perform_row_action(RowAction::Share, index)
                .map_err(|err| err.to_string())?
            {
                println!("{}", payload.text);
            }
        }
        Commands::Delete { index, yes } => {
            let outcome = list
                .perform_row_action(RowAction::Delete, index)
                .map_err(|err| err.to_string())?;
            let decision = match outcome {
                RowActionOutcome::ConfirmDelete(prompt) if !yes => {
                    ask(prompt.title, prompt.subtitle, &prompt.buttons)?
                }
                _ => DeleteDecision::Confirm,
            };
            match list.resolve_delete(decision).map_err(|err| err.to_string())? {
                DeleteOutcome::Deleted { saved, .. } => {
                    report_save(saved);
                    print_list(&list);
                }
                DeleteOutcome::Cancelled => println!("Kept."),
                DeleteOutcome::NothingPending => {}
            }
        }
    }
    Ok(())
}

fn absolute_dir(dir: &Path) -> Result<PathBuf, String> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|err| format!("cannot read current dir: {err}"))?;
    Ok(cwd.join(dir))
}

// Logging is best-effort; the list still works without it.
fn start_logging(level: Option<&str>, data_dir: &Path) {
    let level = level.unwrap_or(default_log_level());
    let log_dir = data_dir.join("logs");
    if let Err(err) = init_logging(level, &log_dir.to_string_lossy()) {
        eprintln!("warning: logging disabled: {err}");
    }
}

fn print_list(list: &NoteList<FileNoteArchive>) {
    println!("{}", list.title());
    for (index, note) in list.notes().iter().enumerate() {
        let first_line = note.entry.lines().next().unwrap_or_default();
        println!(
            "{index:>3}  {first_line}  ({})",
            note.date_modification_time_stamp
        );
    }
}

fn report_save(saved: bool) {
    if !saved {
        eprintln!("warning: unable to save notes; changes are kept until the next save");
    }
}

/// Asks on stdin until the answer matches a button title or y/n.
fn ask(title: &str, subtitle: &str, buttons: &[&str]) -> Result<DeleteDecision, String> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{title} {subtitle} [{}] ", buttons.join(" / "));
        io::stdout().flush().map_err(|err| err.to_string())?;

        let Some(line) = lines.next() else {
            return Ok(DeleteDecision::Cancel);
        };
        let answer = line.map_err(|err| err.to_string())?;
        if let Some(decision) = parse_answer(&answer) {
            return Ok(decision);
        }
    }
}

fn parse_answer(answer: &str) -> Option<DeleteDecision> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(DeleteDecision::Confirm),
        "n" | "no" | "" => Some(DeleteDecision::Cancel),
        other => other.parse::<DeleteDecision>().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_answer;
    use thoughtless_core::DeleteDecision;

    #[test]
    fn answers_accept_button_titles_and_yes_no() {
        assert_eq!(parse_answer("Delete"), Some(DeleteDecision::Confirm));
        assert_eq!(parse_answer("don't delete"), Some(DeleteDecision::Cancel));
        assert_eq!(parse_answer(" y "), Some(DeleteDecision::Confirm));
        assert_eq!(parse_answer(""), Some(DeleteDecision::Cancel));
        assert_eq!(parse_answer("maybe"), None);
    }
}
