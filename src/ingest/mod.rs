// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Turning uploaded spreadsheet bytes into a [`Deck`].
//!
//! Columns are mapped by position only: the first three columns of the first
//! sheet are `front`, `back` and `note`, whatever their header cells say.
//! Header text is read for one purpose, deciding whether row 0 is a header
//! (see [`HeaderRule`]).

mod decode;
mod header;

use thiserror::Error;

pub use crate::ingest::decode::Row;
use crate::ingest::decode::decode_first_sheet;
pub use crate::ingest::header::HeaderRule;
use crate::types::card::Card;
use crate::types::deck::Deck;

#[derive(Debug, Error)]
pub enum IngestError {
    /// The bytes could not be read as a spreadsheet.
    #[error("failed to decode spreadsheet: {cause}")]
    DecodeFailure { cause: String },
    /// The spreadsheet decoded, but no rows were left after the header skip.
    #[error("no valid data found")]
    NoData,
}

impl IngestError {
    pub fn decode(cause: impl ToString) -> Self {
        IngestError::DecodeFailure {
            cause: cause.to_string(),
        }
    }

    /// The message shown to the user. Decode causes are never included.
    pub fn user_message(&self) -> &'static str {
        match self {
            IngestError::DecodeFailure { .. } => {
                "Error processing file. Please ensure it's a valid Excel file with the correct format."
            }
            IngestError::NoData => "No valid data found in the file.",
        }
    }
}

/// Decode `bytes` and build a deck from the first sheet.
pub fn ingest(bytes: &[u8], rule: &HeaderRule) -> Result<Deck, IngestError> {
    let rows = decode_first_sheet(bytes)?;
    log::debug!("Decoded {} rows.", rows.len());
    ingest_rows(rows, rule)
}

/// Build a deck from an already-decoded grid.
pub fn ingest_rows(rows: Vec<Row>, rule: &HeaderRule) -> Result<Deck, IngestError> {
    let skip = match rows.first() {
        Some(first) if rule.is_header(first) => {
            log::debug!("Skipping header row.");
            1
        }
        _ => 0,
    };
    let cards: Vec<Card> = rows.into_iter().skip(skip).map(Row::into_card).collect();
    let deck = Deck::new(cards);
    if deck.is_empty() {
        return Err(IngestError::NoData);
    }
    Ok(deck)
}
