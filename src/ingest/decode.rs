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

use std::io::Cursor;

use calamine::Data;
use calamine::Range;
use calamine::Reader;
use calamine::open_workbook_auto_from_rs;

use crate::ingest::IngestError;
use crate::types::card::Card;

/// A spreadsheet cell as seen by the ingestion pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    /// The cell is absent or has no value.
    Empty,
    /// A string cell.
    Text(String),
    /// Any other typed cell (number, boolean, date, error), rendered as text.
    Value(String),
}

impl Cell {
    fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            Cell::Value(_) => false,
        }
    }

    fn into_string(self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) | Cell::Value(s) => s,
        }
    }
}

impl From<&Data> for Cell {
    fn from(value: &Data) -> Self {
        match value {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            // Zero and `false` read as no value, the same as an empty cell.
            Data::Int(0) | Data::Bool(false) => Cell::Value(String::new()),
            Data::Float(f) if *f == 0.0 || f.is_nan() => Cell::Value(String::new()),
            other => Cell::Value(other.to_string()),
        }
    }
}

/// One row, already cut down to the three positional columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub front: Cell,
    pub back: Cell,
    pub note: Cell,
}

impl Row {
    pub fn new(front: Cell, back: Cell, note: Cell) -> Self {
        Self { front, back, note }
    }

    fn is_blank(&self) -> bool {
        self.front.is_blank() && self.back.is_blank() && self.note.is_blank()
    }

    pub fn into_card(self) -> Card {
        Card::new(
            self.front.into_string(),
            self.back.into_string(),
            self.note.into_string(),
        )
    }
}

/// Decode a workbook and return the rows of its first sheet.
pub fn decode_first_sheet(bytes: &[u8]) -> Result<Vec<Row>, IngestError> {
    let reader = Cursor::new(bytes.to_vec());
    let mut workbook = open_workbook_auto_from_rs(reader).map_err(IngestError::decode)?;
    let range: Range<Data> = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(IngestError::decode)?,
        None => return Err(IngestError::decode("workbook has no sheets")),
    };
    Ok(grid_rows(&range))
}

/// Read the first three columns of the used range in every row. Columns are
/// counted from where the range starts, so a sheet whose data starts in
/// column B reads B, C and D. Blank rows are skipped.
fn grid_rows(range: &Range<Data>) -> Vec<Row> {
    let (Some(start), Some(end)) = (range.start(), range.end()) else {
        return Vec::new();
    };
    let cell = |row: u32, col: u32| -> Cell {
        range
            .get_value((row, col))
            .map(Cell::from)
            .unwrap_or(Cell::Empty)
    };
    (start.0..=end.0)
        .map(|r| Row::new(cell(r, start.1), cell(r, start.1 + 1), cell(r, start.1 + 2)))
        .filter(|row| !row.is_blank())
        .collect()
}
