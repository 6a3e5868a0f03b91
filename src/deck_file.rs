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

use std::fs::read;
use std::path::Path;
use std::time::Instant;

use crate::error::Fallible;
use crate::error::fail;
use crate::ingest::HeaderRule;
use crate::ingest::ingest;
use crate::types::deck::Deck;

/// Read and ingest a spreadsheet from disk.
pub fn load_deck(file: &Path, rule: &HeaderRule) -> Fallible<Deck> {
    if !file.exists() {
        return fail("file does not exist.");
    }
    if !file.is_file() {
        return fail("not a file.");
    }
    log::debug!("Loading deck from {}...", file.display());
    let start = Instant::now();
    let bytes = read(file)?;
    let deck = ingest(&bytes, rule)?;
    let duration = start.elapsed().as_millis();
    log::debug!("Deck loaded in {duration}ms.");
    Ok(deck)
}
