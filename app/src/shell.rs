//! FILENAME: app/src/shell.rs
//! PURPOSE: Line-oriented console front end for the working session.
//! CONTEXT: Stands in for the desktop form. One command per line; errors are
//! printed and the loop continues.

use crate::signature::blank_artifact;
use crate::{log_warn, WorkingSession};
use invoice::format_amount;
use std::io::{self, BufRead, Write};

const CAT: &str = "SHELL";

pub const HELP: &str = "\
Commands:
  vehicle <number>              set the vehicle number
  add <amount> <description>    add a job
  items                         list jobs on the current invoice
  preview                       print preview of the current invoice
  save                          save the current invoice
  retrieve <bill no>            load a saved invoice
  list                          list saved bill numbers
  next                          show the current bill number
  reset                         clear the form
  help                          show this text
  quit                          exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Vehicle(String),
    Add { amount: String, description: String },
    Items,
    Preview,
    Save,
    Retrieve(String),
    List,
    Next,
    Reset,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Command {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "" => Command::Empty,
            "vehicle" => Command::Vehicle(rest.to_string()),
            "add" => {
                let (amount, description) = rest
                    .split_once(char::is_whitespace)
                    .map(|(a, d)| (a.to_string(), d.trim().to_string()))
                    .unwrap_or_else(|| (rest.to_string(), String::new()));
                Command::Add { amount, description }
            }
            "items" => Command::Items,
            "preview" | "print" => Command::Preview,
            "save" => Command::Save,
            "retrieve" | "get" => Command::Retrieve(rest.to_string()),
            "list" => Command::List,
            "next" => Command::Next,
            "reset" | "clear" => Command::Reset,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

/// Runs commands from `input` until end of input or `quit`.
pub fn run_shell<R: BufRead, W: Write>(
    session: &mut WorkingSession,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "Lathe Workshop Invoice System")?;
    writeln!(out, "Bill No: {}", session.current_id())?;

    for line in input.lines() {
        let line = line?;
        match Command::parse(&line) {
            Command::Quit => break,
            command => execute(session, command, out)?,
        }
    }
    Ok(())
}

/// Executes one command, writing its result or error to `out`.
pub fn execute<W: Write>(session: &mut WorkingSession, command: Command, out: &mut W) -> io::Result<()> {
    let currency = session.currency().to_string();

    match command {
        Command::Empty | Command::Quit => {}
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Unknown(word) => writeln!(out, "Unknown command '{}'. Type 'help'.", word)?,
        Command::Vehicle(number) => {
            session.set_vehicle(&number);
            writeln!(out, "Vehicle No: {}", session.vehicle())?;
        }
        Command::Add { amount, description } => {
            match session.add_line_item(&description, &amount) {
                Ok(total) => writeln!(out, "Total: {}", format_amount(total, &currency))?,
                Err(e) => report(out, &e)?,
            }
        }
        Command::Items => {
            for (i, item) in session.items().iter().enumerate() {
                writeln!(
                    out,
                    "{}. {} - {}",
                    i + 1,
                    item.description,
                    format_amount(item.amount, &currency)
                )?;
            }
            writeln!(out, "Total: {}", format_amount(session.total(), &currency))?;
        }
        Command::Preview => match session.preview() {
            Ok(text) => writeln!(out, "{}", text)?,
            Err(e) => report(out, &e)?,
        },
        Command::Save => {
            let artifact = blank_artifact(session.current_id());
            match session.save(&artifact) {
                Ok((id, total)) => {
                    writeln!(
                        out,
                        "Invoice {} saved successfully! Total: {}",
                        id,
                        format_amount(total, &currency)
                    )?;
                    writeln!(out, "Bill No: {}", session.current_id())?;
                }
                Err(e) => report(out, &e)?,
            }
        }
        Command::Retrieve(id) => match session.load(&id) {
            Ok(record) => {
                writeln!(out, "Bill No: {}", record.id)?;
                writeln!(out, "Vehicle No: {}", record.vehicle)?;
                for (i, item) in record.items.iter().enumerate() {
                    writeln!(
                        out,
                        "{}. {} - {}",
                        i + 1,
                        item.description,
                        format_amount(item.amount, &currency)
                    )?;
                }
                writeln!(out, "Total: {}", format_amount(record.total(), &currency))?;
                writeln!(
                    out,
                    "Signature saved as file: {}",
                    session.signatures().resolve(&record.signature).display()
                )?;
            }
            Err(e) => report(out, &e)?,
        },
        Command::List => match session.ledger().identifiers() {
            Ok(ids) if ids.is_empty() => writeln!(out, "No invoices saved yet")?,
            Ok(ids) => {
                for id in ids {
                    writeln!(out, "{}", id)?;
                }
            }
            Err(e) => report(out, &e)?,
        },
        Command::Next => writeln!(out, "Bill No: {}", session.current_id())?,
        Command::Reset => match session.reset() {
            Ok(()) => writeln!(out, "Bill No: {}", session.current_id())?,
            Err(e) => report(out, &e)?,
        },
    }
    Ok(())
}

fn report<W: Write>(out: &mut W, err: &crate::LedgerError) -> io::Result<()> {
    if !err.is_user_error() {
        log_warn!(CAT, "{}", err);
    }
    writeln!(out, "Error: {}", err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        assert_eq!(
            Command::parse("add 450.00 Oil Change"),
            Command::Add {
                amount: "450.00".to_string(),
                description: "Oil Change".to_string()
            }
        );
        assert_eq!(
            Command::parse("add 12"),
            Command::Add {
                amount: "12".to_string(),
                description: String::new()
            }
        );
    }

    #[test]
    fn test_parse_other_commands() {
        assert_eq!(Command::parse("  "), Command::Empty);
        assert_eq!(Command::parse("vehicle KA 01 1234"), Command::Vehicle("KA 01 1234".to_string()));
        assert_eq!(Command::parse("RETRIEVE INV004"), Command::Retrieve("INV004".to_string()));
        assert_eq!(Command::parse("quit"), Command::Quit);
        assert_eq!(Command::parse("frobnicate"), Command::Unknown("frobnicate".to_string()));
    }
}
