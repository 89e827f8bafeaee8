//! Terminal Shell
//!
//! A line-oriented front-end for a [`Session`]: one command per line, output written back
//! as plain text. Item names are passed to the session as typed; nothing printed here is
//! ever parsed back.

use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};

use thiserror::Error;

use crate::{
    bill::BillError,
    menu::{Category, UnknownCategory},
    session::{MenuEntry, Session, SessionError},
};

const POPULAR_LIMIT: usize = 5;

const HELP: &str = "\
Commands:
  categories          list menu categories
  items <category>    list items in a category
  add <item name>     add one unit of an item to the cart
  combos              list available combos
  cart                show the cart and running total
  popular             show the most ordered items
  checkout            bill the cart and log the order
  reset               empty the cart
  help                show this help
  quit                leave";

/// Errors that stop the shell.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Reading input or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The bill couldn't be printed.
    #[error(transparent)]
    Bill(#[from] BillError),
}

/// A command line that couldn't be understood.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The first word isn't a command.
    #[error("Unknown command: {0} (type 'help' for a list)")]
    Unknown(String),

    /// The command needs an argument.
    #[error("Usage: {0}")]
    MissingArgument(&'static str),

    /// The category argument isn't a menu category.
    #[error(transparent)]
    Category(#[from] UnknownCategory),
}

/// A shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List categories
    Categories,

    /// List the items in a category
    Items(Category),

    /// Add one unit of the named item
    Add(String),

    /// List available combos
    Combos,

    /// Show the cart
    Cart,

    /// Show the most ordered items
    Popular,

    /// Bill and log the order
    Checkout,

    /// Empty the cart
    Reset,

    /// Show help
    Help,

    /// Leave the shell
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, argument) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

        let require = |usage| {
            if argument.is_empty() {
                Err(CommandError::MissingArgument(usage))
            } else {
                Ok(argument)
            }
        };

        match verb.to_lowercase().as_str() {
            "categories" => Ok(Command::Categories),
            "items" => Ok(Command::Items(require("items <category>")?.parse()?)),
            "add" => Ok(Command::Add(require("add <item name>")?.to_string())),
            "combos" => Ok(Command::Combos),
            "cart" => Ok(Command::Cart),
            "popular" => Ok(Command::Popular),
            "checkout" => Ok(Command::Checkout),
            "reset" => Ok(Command::Reset),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(verb.to_string())),
        }
    }
}

/// Run the shell until `quit` or end of input. Set `bold` only when `out` is a terminal.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails. Ordering problems (unknown
/// items, unavailable items, an empty cart) are reported to the user and don't stop the shell.
pub fn run(
    session: &mut Session,
    input: impl BufRead,
    mut out: impl Write,
    bold: bool,
) -> Result<(), ShellError> {
    writeln!(out, "Welcome! Type 'help' for commands.")?;
    prompt(&mut out)?;

    for line in input.lines() {
        let line = line?;

        if line.trim().is_empty() {
            prompt(&mut out)?;
            continue;
        }

        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => execute(session, command, &mut out, bold)?,
            Err(error) => writeln!(out, "{error}")?,
        }

        prompt(&mut out)?;
    }

    Ok(())
}

fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

/// Run a single command against the session.
///
/// # Errors
///
/// Returns an error if writing output fails.
pub fn execute(
    session: &mut Session,
    command: Command,
    out: &mut impl Write,
    bold: bool,
) -> Result<(), ShellError> {
    match command {
        Command::Categories => {
            for category in session.list_categories() {
                writeln!(out, "  {category}")?;
            }
        }
        Command::Items(category) => {
            writeln!(out, "{category}:")?;
            write_entries(out, &session.list_items_in_category(category))?;
        }
        Command::Add(name) => add(session, &name, out)?,
        Command::Combos => write_combos(out, &session.combo_alternatives())?,
        Command::Cart => {
            let snapshot = session.cart_snapshot();

            if snapshot.is_empty() {
                writeln!(out, "Your cart is empty.")?;
            }

            for line in &snapshot.lines {
                writeln!(out, "  {}  ×  {}", line.name(), line.quantity())?;
            }

            writeln!(out, "Total: {}", snapshot.total)?;
        }
        Command::Popular => {
            let popular = session.popular(POPULAR_LIMIT);

            if popular.is_empty() {
                writeln!(out, "Nothing ordered yet.")?;
            }

            for entry in popular {
                writeln!(out, "  {} ({} ordered)", entry.name, entry.popularity)?;
            }
        }
        Command::Checkout => checkout(session, out, bold)?,
        Command::Reset => {
            session.reset();
            writeln!(out, "Cart cleared. Total: {}", session.total())?;
        }
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => {}
    }

    Ok(())
}

fn add(session: &mut Session, name: &str, out: &mut impl Write) -> Result<(), ShellError> {
    match session.add_unit(name) {
        Ok(quantity) => {
            writeln!(out, "Added {name} (x{quantity}). Total: {}", session.total())?;
        }
        Err(SessionError::ItemUnavailable { name, alternatives }) => {
            writeln!(out, "{name} is currently unavailable.")?;
            write_combos(out, &session.entries(alternatives))?;
        }
        Err(error) => writeln!(out, "{error}")?,
    }

    Ok(())
}

fn checkout(session: &mut Session, out: &mut impl Write, bold: bool) -> Result<(), ShellError> {
    match session.checkout() {
        Ok(checkout) => {
            checkout.bill().write_to(&mut *out, bold)?;
            writeln!(out, "Order #{} {}", checkout.order().id(), checkout.order().status())?;

            if let Some(error) = checkout.log_error() {
                writeln!(out, "Warning: {error}")?;
            }
        }
        Err(SessionError::EmptyCart) => {
            writeln!(out, "Your cart is empty! Please add items before placing order.")?;
        }
        Err(error) => writeln!(out, "Checkout failed: {error}")?,
    }

    Ok(())
}

fn write_entries(out: &mut impl Write, entries: &[MenuEntry]) -> io::Result<()> {
    for entry in entries {
        let status = if entry.available {
            "[Available]"
        } else {
            "[Unavailable]"
        };

        writeln!(out, "  {} - {} {status}", entry.name, entry.price)?;
    }

    Ok(())
}

fn write_combos(out: &mut impl Write, combos: &[MenuEntry]) -> io::Result<()> {
    if combos.is_empty() {
        return writeln!(out, "No combo meals available.");
    }

    writeln!(out, "Combos you can order instead:")?;

    for combo in combos {
        writeln!(out, "  {} - {}", combo.name, combo.price)?;
    }

    Ok(())
}
