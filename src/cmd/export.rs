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

use std::fs::write;
use std::path::Path;

use serde::Serialize;

use crate::deck_file::load_deck;
use crate::error::Fallible;
use crate::ingest::HeaderRule;
use crate::types::deck::Deck;

pub fn export_file(file: &Path, output: Option<&Path>, rule: &HeaderRule) -> Fallible<()> {
    let deck = load_deck(file, rule)?;
    let json = export_json(&deck)?;
    match output {
        Some(output) => {
            write(output, json)?;
            log::debug!("Wrote {} cards to {}.", deck.len(), output.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Export<'a> {
    cards: &'a Deck,
}

fn export_json(deck: &Deck) -> Fallible<String> {
    let export = Export { cards: deck };
    Ok(serde_json::to_string_pretty(&export)?)
}
