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

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;

use crate::cmd::drill::state::ServerState;
use crate::cmd::drill::template::page_template;
use crate::session::CardView;
use crate::session::View;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let view = state.session().view();
    let html = page_template(render_view(&view));
    (StatusCode::OK, Html(html.into_string()))
}

pub async fn state_handler(State(state): State<ServerState>) -> Json<View> {
    Json(state.session().view())
}

fn render_view(view: &View) -> Markup {
    let upload = html! {
        div.upload {
            form action="/upload" method="post" enctype="multipart/form-data" {
                label for="file" {
                    "Upload Excel File (columns: front, back, note)"
                }
                input id="file" type="file" name="file" accept=".xlsx, .xls";
                input id="upload" type="submit" value="Upload" disabled[view.loading];
            }
            @if view.loading {
                p.loading { "Loading..." }
            }
            @if let Some(error) = &view.error_message {
                p.error { (error) }
            }
        }
    };
    let main = match &view.card {
        Some(card) => render_card(card, view.loading),
        None if !view.loading && view.error_message.is_none() => html! {
            div.empty {
                p { "Upload an Excel file to start practicing flashcards." }
                p.hint { "Your file should have three columns: front, back, and note." }
            }
        },
        None => html! {},
    };
    html! {
        div.root {
            h1 { "Flashcards" }
            (upload)
            (main)
        }
    }
}

fn render_card(card: &CardView, loading: bool) -> Markup {
    let progress = format!("{} / {}", card.position, card.total);
    let content = if card.flipped {
        html! {
            div.content .back {
                div.term { (card.back) }
                div.note { (card.note) }
                div.hint { "(Click to flip back)" }
            }
        }
    } else {
        html! {
            div.content .front {
                div.term { (card.front) }
                div.hint { "(Click to flip)" }
            }
        }
    };
    html! {
        div.card {
            form #flip-form action="/" method="post" {
                button.face type="submit" name="action" value="Flip" disabled[loading] {
                    (content)
                }
            }
            div.controls {
                form action="/" method="post" {
                    button #prev type="submit" name="action" value="Prev" disabled[loading || !card.prev_enabled] {
                        "Prev"
                    }
                    div.progress { (progress) }
                    button #next type="submit" name="action" value="Next" disabled[loading || !card.next_enabled] {
                        "Next"
                    }
                }
            }
            div.controls {
                form action="/" method="post" {
                    button #reset type="submit" name="action" value="Reset" disabled[loading] {
                        "Reset"
                    }
                }
            }
        }
    }
}
