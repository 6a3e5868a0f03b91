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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::cmd::drill::state::ServerState;
use crate::session::Action;

#[derive(Debug, Deserialize)]
enum FormAction {
    Flip,
    Next,
    Prev,
    Reset,
}

impl FormAction {
    fn into_action(self) -> Action {
        match self {
            FormAction::Flip => Action::Flip,
            FormAction::Next => Action::Next,
            FormAction::Prev => Action::Prev,
            FormAction::Reset => Action::Reset,
        }
    }
}

#[derive(Deserialize)]
pub struct FormData {
    action: FormAction,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Redirect {
    log::debug!("Action: {:?}", form.action);
    state.session().dispatch(form.action.into_action());
    Redirect::to("/")
}
