//! Balance-statement parsing.
//!
//! The balance-statement endpoint answers with CRLF-delimited text rather
//! than JSON. The first line is a title and every following line is a tuple
//! literal of 22 positional values:
//!
//! ```text
//! header
//! ('deposit','tx1','2023-01-01',100.0,100.0,null,null,'PHP',0,null,'ord1',...)
//! ```
//!
//! [`parse`] decodes such a body lazily into [`TransactionRecord`]s, keeping
//! only those that match an optional [`FilterSpec`].
//!
//! ```rust
//! use coinsph_api_client::statement::{FilterSpec, parse};
//!
//! let body = "header\r\n\
//!     ('deposit','tx1','2023-01-01',100.0,100.0,null,null,'PHP',0,null,'ord1',\
//!     null,null,null,null,null,null,null,null,null,'done',null)\r\n";
//!
//! let filters = FilterSpec::new().with("status", "done");
//! let records: Vec<_> = parse(body, Some(&filters)).collect::<Result<_, _>>().unwrap();
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].order_id(), Some("ord1"));
//! ```

mod filter;
mod literal;
mod record;

pub use filter::FilterSpec;
pub use literal::{LiteralError, StatementValue, parse_tuple};
pub use record::{TRANSACTION_FIELD_COUNT, TransactionField, TransactionRecord};

use std::iter::{Enumerate, FusedIterator};
use std::str::Split;

use tracing::debug;

use crate::error::CoinsError;

/// Line separator of the statement feed.
const LINE_SEPARATOR: &str = "\r\n";

/// Lazily decode the records of a raw statement body.
///
/// Line 0 is discarded as a header and exactly-empty lines are skipped. The
/// first line that fails to decode yields a [`CoinsError::MalformedRecord`],
/// after which the iterator is exhausted. Calling `parse` again on the same
/// body starts a fresh, identical sequence.
pub fn parse<'a>(raw_body: &'a str, filters: Option<&'a FilterSpec>) -> Records<'a> {
    let mut lines = raw_body.split(LINE_SEPARATOR).enumerate();
    lines.next();
    Records {
        lines,
        filters,
        failed: false,
    }
}

/// Iterator returned by [`parse`].
#[derive(Debug, Clone)]
pub struct Records<'a> {
    lines: Enumerate<Split<'a, &'static str>>,
    filters: Option<&'a FilterSpec>,
    failed: bool,
}

impl Iterator for Records<'_> {
    type Item = Result<TransactionRecord, CoinsError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        for (line_number, line) in self.lines.by_ref() {
            if line.is_empty() {
                debug!(line_number, "skipping empty statement line");
                continue;
            }
            match decode_line(line_number, line) {
                Ok(record) => {
                    if self.filters.is_none_or(|filters| filters.matches(&record)) {
                        return Some(Ok(record));
                    }
                }
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

impl FusedIterator for Records<'_> {}

fn decode_line(line_number: usize, line: &str) -> Result<TransactionRecord, CoinsError> {
    let malformed = |reason: String| CoinsError::MalformedRecord {
        line_number,
        raw_line: line.to_string(),
        reason,
    };
    let values = parse_tuple(line).map_err(|e| malformed(e.to_string()))?;
    TransactionRecord::from_values(values).map_err(|values| {
        malformed(format!(
            "expected {TRANSACTION_FIELD_COUNT} values, found {}",
            values.len()
        ))
    })
}

/// An owned balance-statement body, as returned by
/// [`CoinsRestClient::get_transactions`](crate::rest::CoinsRestClient::get_transactions).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    body: String,
}

impl Statement {
    /// Wrap a raw statement body.
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// The body exactly as received.
    pub fn raw(&self) -> &str {
        &self.body
    }

    /// The title line.
    pub fn header(&self) -> Option<&str> {
        self.body.split(LINE_SEPARATOR).next().filter(|h| !h.is_empty())
    }

    /// Lazily decode the records, restarting from the top on every call.
    pub fn records<'a>(&'a self, filters: Option<&'a FilterSpec>) -> Records<'a> {
        parse(&self.body, filters)
    }

    /// Decode every matching record, stopping at the first malformed line.
    pub fn collect_records(
        &self,
        filters: Option<&FilterSpec>,
    ) -> Result<Vec<TransactionRecord>, CoinsError> {
        self.records(filters).collect()
    }
}
