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

use serde::Serialize;

/// A single flashcard, built from one spreadsheet row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Card {
    /// The prompt term, read from the first column.
    front: String,
    /// The answer term, read from the second column.
    back: String,
    /// An example sentence, read from the third column.
    note: String,
}

impl Card {
    pub fn new(front: impl Into<String>, back: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            note: note.into(),
        }
    }

    pub fn front(&self) -> &str {
        &self.front
    }

    pub fn back(&self) -> &str {
        &self.back
    }

    pub fn note(&self) -> &str {
        &self.note
    }
}
