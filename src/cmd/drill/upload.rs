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

use axum::extract::Multipart;
use axum::extract::State;
use axum::extract::multipart::Field;
use axum::response::Redirect;
use tokio::task::spawn_blocking;

use crate::cmd::drill::state::ServerState;
use crate::ingest::IngestError;
use crate::ingest::ingest;
use crate::types::deck::Deck;

/// Name of the multipart field carrying the spreadsheet.
const FILE_FIELD: &str = "file";

pub async fn upload_handler(State(state): State<ServerState>, mut multipart: Multipart) -> Redirect {
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() == Some(FILE_FIELD) {
                    upload_file(&state, field).await;
                    break;
                }
            }
            Ok(None) => {
                log::debug!("Upload without a file field.");
                break;
            }
            Err(e) => {
                log::error!("Malformed upload: {e}");
                break;
            }
        }
    }
    Redirect::to("/")
}

async fn upload_file(state: &ServerState, field: Field<'_>) {
    if field.file_name().is_none_or(str::is_empty) {
        log::debug!("Upload without a selected file.");
        return;
    }
    let token = state.session().begin_ingest();
    log::debug!("Ingestion {token:?} started.");
    let result = match field.bytes().await {
        Ok(bytes) => ingest_in_background(bytes.to_vec(), state).await,
        Err(e) => Err(IngestError::decode(e)),
    };
    state.session().finish_ingest(token, result);
}

async fn ingest_in_background(bytes: Vec<u8>, state: &ServerState) -> Result<Deck, IngestError> {
    let rule = state.rule.clone();
    match spawn_blocking(move || ingest(&bytes, &rule)).await {
        Ok(result) => result,
        Err(e) => Err(IngestError::decode(e)),
    }
}
