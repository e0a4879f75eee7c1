//! # Effects
//!
//! Store subscribers that turn actions into I/O. The reducer never does any
//! of this; it only ever sees the actions these handlers dispatch back.
//!
//! ```text
//! FetchPlayground{id} ── GET  /api/playgrounds/:id ──► LoadPlayground
//! SavePlayground (id) ── PUT  /api/playgrounds/:id
//! SavePlayground (new) ─ POST /api/playgrounds ──────► LoadPlayground, RedirectTo
//! any failure ───────────────────────────────────────► SetError
//! RedirectTo{path} ───── History::push
//! ```
//!
//! Network calls run on tokio tasks and report back through a
//! [`Dispatcher`]. There are no retries.

use std::sync::Arc;

use log::{info, warn};

use crate::api::{PlaygroundApi, PlaygroundDraft};
use crate::core::action::Action;
use crate::core::history::SharedHistory;
use crate::core::state::{AppError, AppState};
use crate::core::store::{Dispatcher, Subscriber};

/// Performs the network calls for `FetchPlayground` and `SavePlayground`.
pub struct NetworkEffects {
    api: Arc<dyn PlaygroundApi>,
    dispatcher: Dispatcher,
}

impl NetworkEffects {
    pub fn new(api: Arc<dyn PlaygroundApi>, dispatcher: Dispatcher) -> Self {
        Self { api, dispatcher }
    }

    fn fetch(&self, id: String) {
        info!("Fetching playground {}", id);
        let api = self.api.clone();
        let dispatcher = self.dispatcher.clone();
        tokio::spawn(async move {
            match api.fetch(&id).await {
                Ok(envelope) => dispatcher.dispatch(Action::LoadPlayground {
                    playground: envelope.playground,
                }),
                Err(e) => {
                    warn!("Fetch of playground {} failed: {}", id, e);
                    dispatcher.dispatch(Action::SetError {
                        error: AppError::from(e),
                    });
                }
            }
        });
    }

    fn update_existing(&self, id: String, draft: PlaygroundDraft) {
        info!("Updating playground {}", id);
        let api = self.api.clone();
        let dispatcher = self.dispatcher.clone();
        tokio::spawn(async move {
            match api.update(&id, &draft).await {
                Ok(_) => info!("Saved playground {}", id),
                Err(e) => {
                    warn!("Update of playground {} failed: {}", id, e);
                    dispatcher.dispatch(Action::SetError {
                        error: AppError::from(e),
                    });
                }
            }
        });
    }

    fn create(&self, draft: PlaygroundDraft) {
        info!("Creating playground");
        let api = self.api.clone();
        let dispatcher = self.dispatcher.clone();
        tokio::spawn(async move {
            match api.create(&draft).await {
                Ok(envelope) => {
                    let path = format!("/playgrounds/{}", envelope.playground.id);
                    info!("Created playground {}", envelope.playground.id);
                    dispatcher.dispatch(Action::LoadPlayground {
                        playground: envelope.playground,
                    });
                    dispatcher.dispatch(Action::RedirectTo { path });
                }
                Err(e) => {
                    warn!("Create failed: {}", e);
                    dispatcher.dispatch(Action::SetError {
                        error: AppError::from(e),
                    });
                }
            }
        });
    }
}

impl Subscriber for NetworkEffects {
    fn on_dispatch(
        &mut self,
        before: &AppState,
        after: &AppState,
        action: &Action,
        _follow_ups: &mut Vec<Action>,
    ) {
        match action {
            Action::FetchPlayground { id } => self.fetch(id.clone()),
            Action::SavePlayground => {
                let draft = PlaygroundDraft::from(after);
                match &before.playground_id {
                    Some(id) => self.update_existing(id.clone(), draft),
                    None => self.create(draft),
                }
            }
            _ => {}
        }
    }
}

/// Applies `RedirectTo` to the shared history.
pub struct Navigation {
    history: SharedHistory,
}

impl Navigation {
    pub fn new(history: SharedHistory) -> Self {
        Self { history }
    }
}

impl Subscriber for Navigation {
    fn on_dispatch(
        &mut self,
        _before: &AppState,
        _after: &AppState,
        action: &Action,
        _follow_ups: &mut Vec<Action>,
    ) {
        if let Action::RedirectTo { path } = action {
            info!("Navigating to {}", path);
            self.history.borrow_mut().push(path.clone());
        }
    }
}
