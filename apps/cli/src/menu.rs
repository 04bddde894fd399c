//! # Terminal Menu
//!
//! The controller loop. Reads choices line by line and dispatches to
//! [`commands`](crate::commands). Generic over the reader and writer so the
//! whole loop can be driven from a test.
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │  1) Set order name                     │
//! │  2) Add item                           │
//! │  3) List items                         │
//! │  4) Calculate (worker)                 │
//! │  5) Show result                        │
//! │  6) Save JSON                          │
//! │  7) Load JSON                          │
//! │  0) Exit                               │
//! └────────────────────────────────────────┘
//! ```
//!
//! End of input behaves like `0`.

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::commands::{calc, order, storage};
use crate::state::AppState;

const MENU: &str = "\n=== Tally: order calculator ===\n\
1) Set order name\n\
2) Add item\n\
3) List items\n\
4) Calculate (worker)\n\
5) Show result\n\
6) Save JSON\n\
7) Load JSON\n\
0) Exit\n";

/// A menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    SetName,
    AddItem,
    ListItems,
    Calculate,
    ShowResult,
    Save,
    Load,
    Exit,
}

impl Choice {
    /// Parses the number typed at the menu prompt.
    pub fn parse(input: &str) -> Option<Choice> {
        match input.trim() {
            "1" => Some(Choice::SetName),
            "2" => Some(Choice::AddItem),
            "3" => Some(Choice::ListItems),
            "4" => Some(Choice::Calculate),
            "5" => Some(Choice::ShowResult),
            "6" => Some(Choice::Save),
            "7" => Some(Choice::Load),
            "0" | "q" | "quit" | "exit" => Some(Choice::Exit),
            _ => None,
        }
    }
}

/// Writes `label`, then reads one line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
}

/// Runs the menu until the user exits or input ends.
pub fn run_menu<R: BufRead, W: Write>(
    state: &AppState,
    mut input: R,
    mut out: W,
) -> io::Result<()> {
    loop {
        write!(out, "{}", MENU)?;

        let Some(line) = prompt(&mut input, &mut out, "Choose an option: ")? else {
            writeln!(out)?;
            break;
        };

        match Choice::parse(&line) {
            Some(Choice::Exit) => break,
            Some(choice) => dispatch(state, choice, &mut input, &mut out)?,
            None => writeln!(out, "Unknown option '{}'.", line.trim())?,
        }
    }
    Ok(())
}

fn dispatch<R: BufRead, W: Write>(
    state: &AppState,
    choice: Choice,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    match choice {
        Choice::SetName => {
            if let Some(name) = prompt(input, out, "Order name: ")? {
                let applied = order::set_name(&state.order, &name);
                writeln!(out, "Order name set to '{}'.", applied)?;
            }
        }

        Choice::AddItem => {
            let mut fields = Vec::with_capacity(4);
            for label in ["Item name: ", "Quantity: ", "Unit price: ", "VAT %: "] {
                match prompt(input, out, label)? {
                    Some(value) => fields.push(value),
                    None => return Ok(()),
                }
            }

            match order::add_item(&state.order, &fields[0], &fields[1], &fields[2], &fields[3]) {
                Ok(item) => writeln!(out, "Added: {}", order::format_item(&item))?,
                Err(e) => {
                    warn!(code = %e.code, "Item rejected: {}", e);
                    writeln!(out, "Warning: {}", e)?;
                }
            }
        }

        Choice::ListItems => {
            writeln!(out, "Order: {}", state.order.name())?;
            for line in order::list_items(&state.order) {
                writeln!(out, "  {}", line)?;
            }
        }

        Choice::Calculate => {
            let wait = state.config.result_wait();
            match calc::calculate(&state.runtime, &state.tasks, &state.results, wait) {
                Ok(Some(totals)) => writeln!(out, "{}", calc::format_result(Some(totals)))?,
                Ok(None) => writeln!(out, "{}", calc::PENDING)?,
                Err(e) => writeln!(out, "Warning: {}", e)?,
            }
        }

        Choice::ShowResult => writeln!(out, "{}", calc::show_result(&state.results))?,

        Choice::Save => match storage::save(&state.order, &state.store) {
            Ok(path) => writeln!(out, "Saved to {}", path.display())?,
            Err(e) => writeln!(out, "Warning: {}", e)?,
        },

        Choice::Load => match storage::load(&state.order, &state.store) {
            Ok(loaded) => {
                writeln!(
                    out,
                    "Loaded '{}' with {} item(s) from {}",
                    loaded.order_name,
                    loaded.item_count,
                    state.store.path().display()
                )?;
                writeln!(out, "{}", calc::show_result(&state.results))?;
            }
            Err(e) => writeln!(out, "Warning: {}. Current order kept.", e)?,
        },

        Choice::Exit => {}
    }
    Ok(())
}
