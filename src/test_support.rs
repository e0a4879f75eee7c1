//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::api::{ApiError, Playground, PlaygroundApi, PlaygroundDraft, PlaygroundEnvelope};
use crate::core::action::Action;
use crate::core::compile::CompileError;

/// A recorded call against [`FakeApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum FakeCall {
    List,
    Fetch(String),
    Create(PlaygroundDraft),
    Update(String, PlaygroundDraft),
}

/// In-memory API: answers every call with the same playground, or the same
/// error.
pub struct FakeApi {
    outcome: Result<Playground, ApiError>,
    calls: Mutex<Vec<FakeCall>>,
}

impl FakeApi {
    pub fn with_playground(playground: Playground) -> Self {
        Self {
            outcome: Ok(playground),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ApiError) -> Self {
        Self {
            outcome: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<FakeCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: FakeCall) -> Result<PlaygroundEnvelope, ApiError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        self.outcome.clone().map(|playground| PlaygroundEnvelope { playground })
    }
}

#[async_trait]
impl PlaygroundApi for FakeApi {
    async fn list(&self) -> Result<Vec<Playground>, ApiError> {
        self.record(FakeCall::List).map(|e| vec![e.playground])
    }

    async fn fetch(&self, id: &str) -> Result<PlaygroundEnvelope, ApiError> {
        self.record(FakeCall::Fetch(id.to_string()))
    }

    async fn create(&self, draft: &PlaygroundDraft) -> Result<PlaygroundEnvelope, ApiError> {
        self.record(FakeCall::Create(draft.clone()))
    }

    async fn update(
        &self,
        id: &str,
        draft: &PlaygroundDraft,
    ) -> Result<PlaygroundEnvelope, ApiError> {
        self.record(FakeCall::Update(id.to_string(), draft.clone()))
    }
}

/// A compiler that "compiles" Ruby by wrapping it in a JS comment marker.
pub fn echo_compiler(source: &str) -> Result<String, CompileError> {
    Ok(format!("// compiled\n{source}"))
}

/// Drains every action currently queued on a dispatcher channel.
pub fn drain(rx: &mut UnboundedReceiver<Action>) -> Vec<Action> {
    let mut actions = Vec::new();
    while let Ok(action) = rx.try_recv() {
        actions.push(action);
    }
    actions
}
