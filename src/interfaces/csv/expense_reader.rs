use crate::domain::expense::{Expense, Participant};
use crate::error::{Result, SplitError};
use std::io::Read;

/// Reads expenses from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over
/// `Result<Expense>`. It handles whitespace trimming and flexible record
/// lengths automatically.
pub struct ExpenseReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ExpenseReader<R> {
    /// Creates a new `ExpenseReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes expenses.
    ///
    /// This allows for processing large files in a streaming fashion without
    /// loading the entire dataset into memory.
    pub fn expenses(self) -> impl Iterator<Item = Result<Expense>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(SplitError::from))
    }
}

/// Reads expense participants from a CSV source.
pub struct ParticipantReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ParticipantReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn participants(self) -> impl Iterator<Item = Result<Participant>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(SplitError::from))
    }
}
