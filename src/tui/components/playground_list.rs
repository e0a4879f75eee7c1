//! # Playground List
//!
//! Saved playgrounds, fetched once and kept for the rest of the session.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `PlaygroundListState` lives in `TuiState`, created the first time the
//!   list route is visited (which starts the fetch)
//! - `PlaygroundList` is created each frame with borrowed state

use std::sync::Arc;

use log::{info, warn};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use crate::api::{ApiError, Playground, PlaygroundApi};
use crate::core::action::Action;
use crate::core::state::AppError;
use crate::core::store::Dispatcher;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Loading,
    Loaded(Vec<Playground>),
    Failed(String),
}

type ListReply = Result<Vec<Playground>, ApiError>;

pub struct PlaygroundListState {
    pub listing: Listing,
    pub list_state: ListState,
    pending: Option<oneshot::Receiver<ListReply>>,
}

impl PlaygroundListState {
    /// Starts fetching `GET /api/playgrounds` in the background.
    pub fn load(api: Arc<dyn PlaygroundApi>) -> Self {
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let reply = api.list().await;
            if tx.send(reply).is_err() {
                warn!("Playground list arrived after the list was dropped");
            }
        });
        Self::waiting(rx)
    }

    fn waiting(rx: oneshot::Receiver<ListReply>) -> Self {
        Self {
            listing: Listing::Loading,
            list_state: ListState::default(),
            pending: Some(rx),
        }
    }

    /// Picks up the fetch result if it has arrived. Failures are also
    /// reported to the store. Returns whether anything changed.
    pub fn poll(&mut self, dispatcher: &Dispatcher) -> bool {
        let Some(rx) = self.pending.as_mut() else {
            return false;
        };
        let reply = match rx.try_recv() {
            Ok(reply) => reply,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Closed) => Err(ApiError::Network("request was dropped".to_string())),
        };
        self.pending = None;

        match reply {
            Ok(playgrounds) => {
                info!("Loaded {} playgrounds", playgrounds.len());
                if !playgrounds.is_empty() {
                    self.list_state.select(Some(0));
                }
                self.listing = Listing::Loaded(playgrounds);
            }
            Err(e) => {
                warn!("Listing playgrounds failed: {}", e);
                self.listing = Listing::Failed(e.to_string());
                dispatcher.dispatch(Action::SetError {
                    error: AppError::from(e),
                });
            }
        }
        true
    }

    fn playgrounds(&self) -> &[Playground] {
        match &self.listing {
            Listing::Loaded(playgrounds) => playgrounds,
            _ => &[],
        }
    }

    /// Up/Down select, Enter opens the selected playground.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<Action> {
        let count = self.playgrounds().len();
        if count == 0 {
            return None;
        }
        let selected = self.list_state.selected().unwrap_or(0).min(count - 1);
        match event {
            TuiEvent::CursorUp => {
                self.list_state.select(Some(selected.saturating_sub(1)));
                None
            }
            TuiEvent::CursorDown => {
                self.list_state.select(Some((selected + 1).min(count - 1)));
                None
            }
            TuiEvent::Enter => {
                let playground = &self.playgrounds()[selected];
                Some(Action::RedirectTo {
                    path: format!("/playgrounds/{}", playground.id),
                })
            }
            _ => None,
        }
    }
}

pub struct PlaygroundList<'a> {
    pub state: &'a mut PlaygroundListState,
}

impl Component for PlaygroundList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Playgrounds ([Enter] open, [Esc] back) ");

        match &self.state.listing {
            Listing::Loading => {
                frame.render_widget(Paragraph::new("Loading...").block(block), area);
            }
            Listing::Failed(message) => {
                let line = Line::from(vec![
                    Span::styled("Could not load playgrounds: ", Style::default().fg(Color::Red)),
                    Span::raw(message.clone()),
                ]);
                frame.render_widget(Paragraph::new(line).block(block), area);
            }
            Listing::Loaded(playgrounds) if playgrounds.is_empty() => {
                frame.render_widget(
                    Paragraph::new("No saved playgrounds yet. Press Ctrl+S on a playground to save it.")
                        .block(block),
                    area,
                );
            }
            Listing::Loaded(playgrounds) => {
                let items: Vec<ListItem> = playgrounds
                    .iter()
                    .map(|p| {
                        ListItem::new(Line::from(vec![
                            Span::raw(p.label().to_string()),
                            Span::styled(
                                format!("  /playgrounds/{}", p.id),
                                Style::default().fg(Color::DarkGray),
                            ),
                        ]))
                    })
                    .collect();
                let list = List::new(items)
                    .block(block)
                    .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                    .highlight_symbol("> ");
                frame.render_stateful_widget(list, area, &mut self.state.list_state);
            }
        }
    }
}
