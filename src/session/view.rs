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

use crate::session::Session;

/// What the presentation layer needs to draw the current state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    /// The current card, if a deck is loaded.
    pub card: Option<CardView>,
    pub loading: bool,
    pub error_message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub front: String,
    pub back: String,
    pub note: String,
    pub flipped: bool,
    /// 1-based.
    pub position: usize,
    pub total: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl View {
    pub fn of(session: &Session) -> Self {
        let cursor = session.cursor();
        let card = session.deck().and_then(|deck| {
            let card = deck.get(cursor.position)?;
            let total = deck.len();
            Some(CardView {
                front: card.front().to_string(),
                back: card.back().to_string(),
                note: card.note().to_string(),
                flipped: cursor.flipped,
                position: cursor.position + 1,
                total,
                prev_enabled: cursor.position > 0,
                next_enabled: cursor.position + 1 < total,
            })
        });
        Self {
            card,
            loading: session.loading(),
            error_message: session.error_message().map(str::to_string),
        }
    }
}
