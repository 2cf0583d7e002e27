//! Interactive main menu over a loaded library.

use std::io::{self, BufRead, Write};

use hachidori_core::{EntryStore, LibraryStatus};

use crate::format;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    List(LibraryStatus),
    Lookup,
    Quit,
    Unknown,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => Self::List(LibraryStatus::CurrentlyWatching),
            "2" => Self::List(LibraryStatus::PlanToWatch),
            "3" => Self::List(LibraryStatus::Completed),
            "4" => Self::List(LibraryStatus::OnHold),
            "5" => Self::List(LibraryStatus::Dropped),
            "6" => Self::Lookup,
            "7" => Self::Quit,
            _ => Self::Unknown,
        }
    }
}

/// Read one line without its line terminator. `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

fn print_menu<W: Write>(username: &str, out: &mut W) -> io::Result<()> {
    writeln!(out, "---------------Main Menu---------------")?;
    for (n, status) in LibraryStatus::ALL.iter().enumerate() {
        writeln!(out, "{}. Print {username}'s {status} list", n + 1)?;
    }
    writeln!(out, "6. Get more information about a show")?;
    writeln!(out, "7. Quit")?;
    out.flush()
}

/// Prompt for titles until one is found or the user types `q`.
fn lookup<R: BufRead, W: Write>(store: &EntryStore, input: &mut R, out: &mut W) -> io::Result<()> {
    loop {
        writeln!(out, "Type the name of a show to get more info about it:")?;
        out.flush()?;

        let Some(title) = read_line(input)? else {
            return Ok(());
        };
        if title == "q" {
            return Ok(());
        }

        match store.lookup(&title) {
            Some(entry) => {
                writeln!(out)?;
                writeln!(out, "{}", format::details(entry))?;
                return Ok(());
            }
            None => {
                writeln!(out, "Couldn't find \"{title}\" (try again or type \"q\" to quit)")?;
                writeln!(out)?;
            }
        }
    }
}

/// Run the menu loop until the user quits or input ends.
pub fn run<R: BufRead, W: Write>(
    store: &EntryStore,
    username: &str,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    loop {
        print_menu(username, out)?;

        let choice = match read_line(input)? {
            Some(line) => MenuChoice::parse(&line),
            None => MenuChoice::Quit,
        };

        match choice {
            MenuChoice::List(status) => {
                for entry in store.entries_by_status(status) {
                    writeln!(out, "{}", format::list_line(entry))?;
                }
            }
            MenuChoice::Lookup => lookup(store, input, out)?,
            MenuChoice::Quit => {
                writeln!(out, "Goodbye!")?;
                return Ok(());
            }
            MenuChoice::Unknown => {
                writeln!(out, "Didn't understand that, please try again")?;
                writeln!(out)?;
            }
        }
    }
}
