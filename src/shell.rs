//! Line-oriented command shell: one command word and at most one numeral
//! argument per line, dispatched to the quash operations.
//!
//! Generic over `BufRead`/`Write` so the loop is testable with in-memory
//! buffers. Unrecognized commands, blank lines, and commands missing their
//! argument are silently ignored. No flags, no configuration, no state
//! across runs.

use std::io::{self, BufRead, Write};

use crate::quash::{DeleteOutcome, ExtractOutcome, Quash};
use crate::record::Record;

/// Run the command loop until `exit` or end of input, writing one reply line
/// per effective command.
pub fn run<R: BufRead, W: Write>(input: R, out: &mut W) -> io::Result<()> {
    let mut quash = Quash::new();
    for line in input.lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let argument = words.next();
        match (command, argument) {
            ("insert", Some(value)) => {
                let count = quash.insert(Record::from(value));
                writeln!(out, "inserted, count = {}", count)?;
            }
            ("delete", Some(value)) => match quash.delete(&Record::from(value)) {
                DeleteOutcome::NotFound => writeln!(out, "not found")?,
                DeleteOutcome::Decremented(count) => {
                    writeln!(out, "decremented, count = {}", count)?
                }
                DeleteOutcome::Removed => writeln!(out, "removed")?,
            },
            ("lookup", Some(value)) => match quash.lookup(&Record::from(value)) {
                Some(count) => writeln!(out, "found, count = {}", count)?,
                None => writeln!(out, "not found")?,
            },
            ("deleteMin", _) => match quash.extract_min() {
                ExtractOutcome::Empty => writeln!(out, "heap is empty")?,
                ExtractOutcome::Decremented {
                    record,
                    multiplicity,
                } => writeln!(out, "min {} decremented, count = {}", record, multiplicity)?,
                ExtractOutcome::Removed(record) => writeln!(out, "min {} removed", record)?,
            },
            ("print", _) => {
                let listing: Vec<String> = quash.iter().map(|rec| rec.to_string()).collect();
                writeln!(out, "{}", listing.join(" "))?;
            }
            ("exit", _) => break,
            _ => {}
        }
    }
    Ok(())
}
