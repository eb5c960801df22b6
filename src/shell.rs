//! Terminal session: the imperative shell around the calculator.
//!
//! A session turns lines of input into presses and renders the display and the
//! newly visible trace rows after each line. It does no I/O itself.

use crate::config::Config;
use crate::display::{Display, HistoryView};
use crate::input::{parse_line, Calculator};
use serde::Serialize;

/// Result of handling one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text to print; the session goes on
    Output(String),
    /// The user asked to leave
    Quit,
}

/// Machine-readable frame printed in JSON mode.
#[derive(Debug, Serialize)]
struct Frame<'a> {
    phase: &'a str,
    #[serde(flatten)]
    display: Display,
    trace: Vec<&'a str>,
}

/// Interactive calculator session.
#[derive(Debug)]
pub struct Session {
    calculator: Calculator,
    view: HistoryView,
    json: bool,
    shown: usize,
}

impl Session {
    pub fn new(calculator: Calculator, view: HistoryView, json: bool) -> Self {
        Self {
            calculator,
            view,
            json,
            shown: 0,
        }
    }

    /// Session using the display settings of `config`.
    pub fn from_config(calculator: Calculator, config: &Config, json: bool) -> Self {
        let view = HistoryView::new(config.display.history_rows, config.display.show_timestamps);
        Self::new(calculator, view, json)
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Handle one line of input.
    ///
    /// `:quit` ends the session and `:history` lists the visible trace rows;
    /// anything else is fed to the calculator as presses.
    pub fn handle_line(&mut self, line: &str) -> Result<Outcome, serde_json::Error> {
        match line.trim() {
            ":quit" | ":q" => Ok(Outcome::Quit),
            ":history" => Ok(Outcome::Output(self.history())),
            _ => {
                for press in parse_line(line) {
                    self.calculator.press(press);
                }
                self.render().map(Outcome::Output)
            }
        }
    }

    /// Render the display and any trace rows not shown yet.
    pub fn render(&mut self) -> Result<String, serde_json::Error> {
        let log = self.calculator.history();
        let new_rows = self.view.visible_since(log, self.shown);
        let display = self.calculator.display();

        let output = if self.json {
            let frame = Frame {
                phase: self.calculator.state().phase().name(),
                display,
                trace: new_rows.iter().map(|entry| entry.text.as_str()).collect(),
            };
            serde_json::to_string(&frame)?
        } else {
            let mut lines = vec![display.expression, format!("= {}", display.result)];
            lines.extend(
                new_rows
                    .iter()
                    .map(|entry| format!("  {}", self.view.format_row(entry))),
            );
            lines.join("\n")
        };

        self.shown = log.len();
        Ok(output)
    }

    fn history(&self) -> String {
        let rows = self.view.visible(self.calculator.history());
        if rows.is_empty() {
            return "(no history)".to_string();
        }
        rows.iter()
            .map(|entry| self.view.format_row(entry))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
