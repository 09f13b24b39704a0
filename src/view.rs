use std::fmt;

use chrono::Local;

use crate::types::{ProjectRecord, DEFAULT_LINK_TEXT};

/// Severity of a status-region message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

impl fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StatusLevel::Info => "info",
            StatusLevel::Success => "success",
            StatusLevel::Error => "error",
        };
        write!(f, "{}", label)
    }
}

/// The controller's window to the UI: a full list re-render after every
/// successful action (so displayed indices always match the in-memory
/// collection) and a status/message region.
pub trait ProjectView {
    fn render_list(&mut self, projects: &[ProjectRecord]);
    fn status(&mut self, level: StatusLevel, message: &str);
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

/// Pure replacement for the shadow-DOM `<project-card>` element: same
/// attribute defaulting, no hidden state, one call per record.
pub fn render_card(record: &ProjectRecord) -> String {
    let title = or_default(&record.title, "Project Title");
    let img = or_default(&record.img, "res/default-project.jpg");
    let alt = or_default(&record.alt, "Project Image");
    let desc = or_default(&record.desc, "Short description of the project.");
    let link = or_default(&record.link, "#");
    let link_text = or_default(&record.link_text, DEFAULT_LINK_TEXT);

    format!(
        "<article class=\"card\">\n  \
         <h2>{}</h2>\n  \
         <picture>\n    <img src=\"{}\" alt=\"{}\" class=\"card-image\">\n  </picture>\n  \
         <p>{}</p>\n  \
         <div class=\"card-footer\">\n    <a href=\"{}\" target=\"_blank\">{}</a>\n  </div>\n\
         </article>",
        title, img, alt, desc, link, link_text
    )
}

pub fn render_cards(projects: &[ProjectRecord]) -> String {
    projects
        .iter()
        .map(render_card)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Terminal stand-in for the page: indexed list plus timestamped status
/// lines.
#[derive(Default)]
pub struct ConsoleView;

impl ProjectView for ConsoleView {
    fn render_list(&mut self, projects: &[ProjectRecord]) {
        if projects.is_empty() {
            println!("No projects found. Create one below!");
            return;
        }
        for (index, project) in projects.iter().enumerate() {
            println!("{}. {}", index + 1, project.title);
            println!("   {}", project.desc);
            println!("   Image: {} | Link: {}", project.img, project.link);
        }
    }

    fn status(&mut self, level: StatusLevel, message: &str) {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        match level {
            StatusLevel::Error => eprintln!("[{}] [{}] {}", stamp, level, message),
            _ => println!("[{}] [{}] {}", stamp, level, message),
        }
    }
}
