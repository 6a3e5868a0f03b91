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

//! The navigation state machine.
//!
//! All state lives in one [`Session`] value, and every change goes through
//! [`Session::reduce`]. Navigation saturates at both ends and never fails.
//! Ingestion results are tagged with the [`IngestToken`] issued when the
//! request began, and only the latest token may commit.

mod view;

use crate::ingest::IngestError;
use crate::types::cursor::Cursor;
use crate::types::deck::Deck;

pub use crate::session::view::CardView;
pub use crate::session::view::View;

/// Identifies one ingestion request. Tokens increase monotonically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct IngestToken(u64);

impl IngestToken {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

#[derive(Debug)]
pub enum Action {
    Flip,
    Next,
    Prev,
    Reset,
    BeginIngest,
    FinishIngest {
        token: IngestToken,
        result: Result<Deck, IngestError>,
    },
}

#[derive(Clone, Debug, Default)]
pub struct Session {
    deck: Option<Deck>,
    cursor: Cursor,
    loading: bool,
    error_message: Option<String>,
    latest_token: IngestToken,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deck(&self) -> Option<&Deck> {
        self.deck.as_ref()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn latest_token(&self) -> IngestToken {
        self.latest_token
    }

    /// Apply `action`, returning the next state.
    pub fn reduce(self, action: Action) -> Session {
        match action {
            Action::Flip => match self.deck {
                Some(_) => Session {
                    cursor: Cursor {
                        flipped: !self.cursor.flipped,
                        ..self.cursor
                    },
                    ..self
                },
                None => self,
            },
            Action::Next => {
                let last = self.deck.as_ref().and_then(Deck::last_position);
                let position = self.cursor.position;
                match last {
                    Some(last) if position < last => self.moved_to(position + 1),
                    _ => self,
                }
            }
            Action::Prev => {
                let position = self.cursor.position;
                if self.deck.is_some() && position > 0 {
                    self.moved_to(position - 1)
                } else {
                    self
                }
            }
            Action::Reset => match self.deck {
                Some(_) => Session {
                    cursor: Cursor::start(),
                    ..self
                },
                None => self,
            },
            Action::BeginIngest => Session {
                loading: true,
                error_message: None,
                latest_token: self.latest_token.next(),
                ..self
            },
            Action::FinishIngest { token, result } => {
                if token != self.latest_token {
                    log::debug!(
                        "Discarding stale ingestion result {:?} (latest is {:?}).",
                        token,
                        self.latest_token
                    );
                    return self;
                }
                match result {
                    Ok(deck) => {
                        log::info!("Loaded {} cards.", deck.len());
                        Session {
                            deck: Some(deck),
                            cursor: Cursor::start(),
                            loading: false,
                            error_message: None,
                            ..self
                        }
                    }
                    Err(e) => {
                        log::error!("Error processing file: {e}");
                        Session {
                            loading: false,
                            error_message: Some(e.user_message().to_string()),
                            ..self
                        }
                    }
                }
            }
        }
    }

    /// Apply `action` in place.
    pub fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(self);
        *self = state.reduce(action);
    }

    /// Start an ingestion request and return its token.
    pub fn begin_ingest(&mut self) -> IngestToken {
        self.dispatch(Action::BeginIngest);
        self.latest_token()
    }

    /// Commit the result of the ingestion request identified by `token`.
    pub fn finish_ingest(&mut self, token: IngestToken, result: Result<Deck, IngestError>) {
        self.dispatch(Action::FinishIngest { token, result });
    }

    pub fn view(&self) -> View {
        View::of(self)
    }

    fn moved_to(self, position: usize) -> Session {
        Session {
            cursor: Cursor {
                position,
                flipped: false,
            },
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::card::Card;

    fn deck(n: usize) -> Deck {
        Deck::new(
            (0..n)
                .map(|i| Card::new(format!("front {i}"), format!("back {i}"), ""))
                .collect(),
        )
    }

    fn loaded(n: usize) -> Session {
        let mut session = Session::new();
        let token = session.begin_ingest();
        session.finish_ingest(token, Ok(deck(n)));
        session
    }

    fn at(session: &Session) -> (usize, bool) {
        (session.cursor.position, session.cursor.flipped)
    }

    #[test]
    fn test_initial_state() {
        let session = Session::new();
        assert!(session.deck().is_none());
        assert!(!session.loading());
        assert!(session.error_message().is_none());
        assert_eq!(at(&session), (0, false));
    }

    #[test]
    fn test_navigation_on_empty_session_is_noop() {
        let mut session = Session::new();
        for action in [Action::Flip, Action::Next, Action::Prev, Action::Reset] {
            session.dispatch(action);
            assert_eq!(at(&session), (0, false));
        }
    }

    #[test]
    fn test_next_saturates() {
        let n = 4;
        let mut session = loaded(n);
        for _ in 0..n + 5 {
            session.dispatch(Action::Next);
        }
        assert_eq!(at(&session), (n - 1, false));
        for _ in 0..n + 5 {
            session.dispatch(Action::Prev);
        }
        assert_eq!(at(&session), (0, false));
    }

    #[test]
    fn test_flip_toggles() {
        let mut session = loaded(3);
        session.dispatch(Action::Flip);
        assert_eq!(at(&session), (0, true));
        session.dispatch(Action::Flip);
        assert_eq!(at(&session), (0, false));
        session.dispatch(Action::Flip);
        assert_eq!(at(&session), (0, true));
    }

    #[test]
    fn test_move_clears_flip() {
        let mut session = loaded(3);
        session.dispatch(Action::Flip);
        session.dispatch(Action::Next);
        assert_eq!(at(&session), (1, false));
        session.dispatch(Action::Flip);
        session.dispatch(Action::Prev);
        assert_eq!(at(&session), (0, false));
    }

    #[test]
    fn test_saturated_move_keeps_flip() {
        let mut session = loaded(1);
        session.dispatch(Action::Flip);
        session.dispatch(Action::Next);
        assert_eq!(at(&session), (0, true));
        session.dispatch(Action::Prev);
        assert_eq!(at(&session), (0, true));
    }

    #[test]
    fn test_reset_from_any_position() {
        for moves in 0..5 {
            for flip in [false, true] {
                let mut session = loaded(3);
                for _ in 0..moves {
                    session.dispatch(Action::Next);
                }
                if flip {
                    session.dispatch(Action::Flip);
                }
                session.dispatch(Action::Reset);
                assert_eq!(at(&session), (0, false));
            }
        }
    }

    #[test]
    fn test_two_card_scenario() {
        let mut session = loaded(2);
        assert_eq!(at(&session), (0, false));
        session.dispatch(Action::Next);
        assert_eq!(at(&session), (1, false));
        session.dispatch(Action::Next);
        assert_eq!(at(&session), (1, false));
    }

    #[test]
    fn test_begin_ingest_sets_loading() {
        let mut session = loaded(2);
        session.dispatch(Action::Next);
        let token = session.begin_ingest();
        assert!(session.loading());
        assert_eq!(session.latest_token(), token);
        // The old deck is still there while loading.
        assert_eq!(session.deck().map(Deck::len), Some(2));
        assert_eq!(at(&session), (1, false));
    }

    #[test]
    fn test_successful_ingest_replaces_deck() {
        let mut session = loaded(2);
        session.dispatch(Action::Next);
        session.dispatch(Action::Flip);
        let token = session.begin_ingest();
        session.finish_ingest(token, Ok(deck(5)));
        assert!(!session.loading());
        assert_eq!(session.deck().map(Deck::len), Some(5));
        assert_eq!(at(&session), (0, false));
    }

    #[test]
    fn test_failed_ingest_keeps_deck() {
        let mut session = loaded(3);
        session.dispatch(Action::Next);
        session.dispatch(Action::Flip);
        let token = session.begin_ingest();
        session.finish_ingest(token, Err(IngestError::NoData));
        assert!(!session.loading());
        assert_eq!(session.error_message(), Some("No valid data found in the file."));
        assert_eq!(session.deck().map(Deck::len), Some(3));
        assert_eq!(at(&session), (1, true));
    }

    #[test]
    fn test_failed_ingest_on_empty_session() {
        let mut session = Session::new();
        let token = session.begin_ingest();
        session.finish_ingest(token, Err(IngestError::decode("bad zip")));
        assert!(session.deck().is_none());
        assert_eq!(
            session.error_message(),
            Some("Error processing file. Please ensure it's a valid Excel file with the correct format.")
        );
    }

    #[test]
    fn test_begin_ingest_clears_error() {
        let mut session = Session::new();
        let token = session.begin_ingest();
        session.finish_ingest(token, Err(IngestError::NoData));
        assert!(session.error_message().is_some());
        session.begin_ingest();
        assert!(session.error_message().is_none());
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut session = Session::new();
        let first = session.begin_ingest();
        let second = session.begin_ingest();
        assert!(second > first);

        // The second request finishes first.
        session.finish_ingest(second, Ok(deck(2)));
        assert!(!session.loading());
        session.dispatch(Action::Next);

        // The first one arrives late and must not overwrite anything.
        session.finish_ingest(first, Ok(deck(7)));
        assert_eq!(session.deck().map(Deck::len), Some(2));
        assert_eq!(at(&session), (1, false));
    }

    #[test]
    fn test_stale_result_does_not_end_loading() {
        let mut session = Session::new();
        let first = session.begin_ingest();
        let _second = session.begin_ingest();
        session.finish_ingest(first, Err(IngestError::NoData));
        assert!(session.loading());
        assert!(session.error_message().is_none());
    }
}
