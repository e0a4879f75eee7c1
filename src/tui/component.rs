use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::Rect;

use crate::core::store::Dispatcher;
use crate::tui::black_box::{ElementRef, Node};
use crate::tui::scheduler::Scheduler;

/// A reusable UI component.
///
/// Components in this architecture follow the React pattern:
/// - They receive data via props (struct fields).
/// - They may hold internal state (via `&mut State` fields).
/// - They render to a `Frame` within a given `Rect`.
///
/// # Mutability
///
/// The `render` method takes `&mut self` to allow components to:
/// 1. Update internal caches (e.g. layout calculations).
/// 2. Manage presentation state (e.g. scroll offsets) during rendering.
///
/// This aligns with Ratatui's `StatefulWidget` pattern.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that handles terminal events.
pub trait EventHandler {
    /// The type of high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}

/// What a black box may touch during `mount`/`update`.
pub struct Lifecycle<'a> {
    pub now: Instant,
    pub scheduler: &'a mut Scheduler,
    pub dispatcher: &'a Dispatcher,
}

/// A component whose element is managed outside the declarative render:
/// an editor widget with its own buffer, or a preview document that is
/// expensive to rebuild.
///
/// A fresh instance is built with new props on every render pass. The host
/// correlates it with the instance from the previous pass by `key()`, then
/// calls `mount` (first time the key is seen) or `update` (every time after).
pub trait BlackBox {
    /// Stable identity across render passes.
    fn key(&self) -> String;

    /// Initial description of the element to create.
    fn node(&self) -> Node;

    /// One-time setup after the element first exists.
    fn mount(&mut self, element: &ElementRef, cx: &mut Lifecycle<'_>);

    /// Reconcile with the instance from the previous pass. `previous` is
    /// dropped afterwards, so anything worth keeping must be moved out of it.
    fn update(&mut self, previous: &mut Self, element: &ElementRef, cx: &mut Lifecycle<'_>);
}
