//! Line commands for the interactive chat.

#[cfg(test)]
#[path = "repl_test.rs"]
mod repl_test;

use std::path::PathBuf;

use widget::VisibilityEvent;

pub const HELP: &str = "\
commands:
  <text>          search for bugs matching an error message
  /image <path>   upload a screenshot
  /drop           toggle the image drop zone
  /open           launcher button (open, or restore when minimized)
  /minimize       minimize the chat
  /restore        click the minimized bar to expand the chat again
  /outside        simulate a click outside the widget
  /close          close the chat
  /history        print the whole conversation
  /help           show this help
  /quit           exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Ask(String),
    Image(PathBuf),
    Dropzone,
    Visibility(VisibilityEvent),
    History,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl ReplCommand {
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Self::Ask(line.to_string());
        };
        let (name, arg) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        let arg = arg.trim();
        match name {
            "image" | "img" if !arg.is_empty() => Self::Image(PathBuf::from(arg)),
            "drop" => Self::Dropzone,
            "open" => Self::Visibility(VisibilityEvent::Launcher),
            "minimize" | "min" => Self::Visibility(VisibilityEvent::Minimize),
            "restore" => Self::Visibility(VisibilityEvent::MinimizedBar),
            "outside" => Self::Visibility(VisibilityEvent::PointerDownOutside),
            "close" => Self::Visibility(VisibilityEvent::Close),
            "history" => Self::History,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}
