use std::io::{self, BufRead, Write};

use log::debug;

use crate::controller::Controller;
use crate::errors::Result;
use crate::settings::Settings;
use crate::store::{LocalStore, ProjectStore, RemoteStore};
use crate::types::ProjectRecord;
use crate::view::{render_cards, ConsoleView};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    Local,
    Remote,
}

/// One UI action per line; indices are 1-based as displayed in the list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Backend(BackendKind),
    Load,
    List,
    Cards,
    Create,
    Update(usize),
    Delete(usize),
    Seed,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> std::result::Result<Command, String> {
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default();
    let argument = words.next();
    if words.next().is_some() {
        return Err("Too many arguments, try `help`.".to_string());
    }

    let position = |argument: Option<&str>| -> std::result::Result<usize, String> {
        let raw = argument.ok_or_else(|| "Which project? e.g. `delete 2`".to_string())?;
        let n: usize = raw
            .parse()
            .map_err(|_| format!("\"{}\" is not a project position", raw))?;
        if n == 0 {
            return Err("Project positions start at 1".to_string());
        }
        Ok(n - 1)
    };

    match (verb, argument) {
        ("backend", Some("local")) => Ok(Command::Backend(BackendKind::Local)),
        ("backend", Some("remote")) => Ok(Command::Backend(BackendKind::Remote)),
        ("backend", _) => Err("Usage: backend <local|remote>".to_string()),
        ("load", None) => Ok(Command::Load),
        ("list", None) => Ok(Command::List),
        ("cards", None) => Ok(Command::Cards),
        ("create", None) => Ok(Command::Create),
        ("update", argument) => Ok(Command::Update(position(argument)?)),
        ("delete", argument) => Ok(Command::Delete(position(argument)?)),
        ("seed", None) => Ok(Command::Seed),
        ("help", None) => Ok(Command::Help),
        ("quit", None) | ("exit", None) => Ok(Command::Quit),
        _ => Err(format!("Unknown command \"{}\", try `help`.", verb)),
    }
}

fn make_store(settings: &Settings, kind: BackendKind) -> ProjectStore {
    match kind {
        BackendKind::Local => {
            ProjectStore::Local(LocalStore::new(&settings.local_store_path))
        }
        BackendKind::Remote => ProjectStore::Remote(RemoteStore::new(
            settings.remote_url.clone(),
            settings.access_key.clone(),
        )),
    }
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Empty input keeps the current value, like the pre-filled update form.
fn prompt_with_default(label: &str, current: &str) -> io::Result<String> {
    let entered = prompt(&format!("{} [{}]", label, current))?;
    if entered.is_empty() {
        Ok(current.to_string())
    } else {
        Ok(entered)
    }
}

fn confirm(question: &str) -> bool {
    match prompt(&format!("{} [y/N]", question)) {
        Ok(answer) => matches!(answer.to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn prompt_record() -> io::Result<ProjectRecord> {
    Ok(ProjectRecord::new(
        prompt("Title")?,
        prompt("Image")?,
        prompt("Image alt text")?,
        prompt("Description")?,
        prompt("Link")?,
        prompt("Link text (blank for \"Read More\")")?,
    ))
}

fn prompt_record_from(current: &ProjectRecord) -> io::Result<ProjectRecord> {
    Ok(ProjectRecord::new(
        prompt_with_default("Title", &current.title)?,
        prompt_with_default("Image", &current.img)?,
        prompt_with_default("Image alt text", &current.alt)?,
        prompt_with_default("Description", &current.desc)?,
        prompt_with_default("Link", &current.link)?,
        prompt_with_default("Link text", &current.link_text)?,
    ))
}

fn print_help() {
    println!("Commands:");
    println!("  backend <local|remote>  switch data source (discards loaded projects)");
    println!("  load                    load projects from the current backend");
    println!("  list                    show the loaded projects");
    println!("  cards                   show the rendered project cards");
    println!("  create                  add a project (prompts per field)");
    println!("  update <n>              edit project n (blank keeps current value)");
    println!("  delete <n>              remove project n (asks for confirmation)");
    println!("  seed                    write the stock projects if local data is absent");
    println!("  help                    this text");
    println!("  quit                    leave");
}

/// The interactive stand-in for the page. Each command runs to completion,
/// including any remote round trip, before the next one is read, so no
/// action is ever re-entered.
pub async fn run(settings: Settings) -> Result<()> {
    let mut controller = Controller::new(
        make_store(&settings, BackendKind::Local),
        ConsoleView,
    );
    println!("folio-cards: project store console (backend: local)");
    print_help();

    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match parse_command(line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };
        debug!("dispatching {:?}", command);

        // action errors are already reported through the status region
        match command {
            Command::Backend(kind) => {
                controller.select_backend(make_store(&settings, kind));
            }
            Command::Load => {
                let _ = controller.load().await;
            }
            Command::List => controller.render(),
            Command::Cards => {
                if controller.projects().is_empty() {
                    println!("No projects loaded.");
                } else {
                    println!("{}", render_cards(controller.projects()));
                }
            }
            Command::Create => {
                if !controller.is_loaded() {
                    println!("Please load projects first.");
                    continue;
                }
                let record = prompt_record()?;
                let _ = controller.create(record).await;
            }
            Command::Update(index) => {
                let Some(current) = controller.projects().get(index).cloned() else {
                    println!("No project at position {}, see `list`.", index + 1);
                    continue;
                };
                let record = prompt_record_from(&current)?;
                let _ = controller.update(index, record).await;
            }
            Command::Delete(index) => {
                if !controller.is_loaded() {
                    println!("Please load projects first.");
                    continue;
                }
                let _ = controller
                    .delete(index, |doomed| {
                        confirm(&format!(
                            "Are you sure you want to delete \"{}\"?",
                            doomed.title
                        ))
                    })
                    .await;
            }
            Command::Seed => {
                LocalStore::new(&settings.local_store_path).ensure_seeded()?;
                println!("Local store ready at {:?}.", settings.local_store_path);
            }
            Command::Help => print_help(),
            Command::Quit => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("load", Command::Load)]
    #[case("  list  ", Command::List)]
    #[case("backend local", Command::Backend(BackendKind::Local))]
    #[case("backend remote", Command::Backend(BackendKind::Remote))]
    #[case("update 1", Command::Update(0))]
    #[case("delete 3", Command::Delete(2))]
    #[case("exit", Command::Quit)]
    fn parses_valid_commands(#[case] line: &str, #[case] expected: Command) {
        assert_eq!(parse_command(line).unwrap(), expected);
    }

    #[rstest]
    #[case("backend cloud")]
    #[case("delete")]
    #[case("delete zero")]
    #[case("delete 0")]
    #[case("frobnicate")]
    #[case("load now please")]
    fn rejects_malformed_commands(#[case] line: &str) {
        assert!(parse_command(line).is_err());
    }
}
