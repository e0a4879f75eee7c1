//! Wire types for the playground HTTP API.
//!
//! ```text
//! GET  /api/playgrounds        → { "playgrounds": [Playground] }
//! GET  /api/playgrounds/:id    → { "playground": Playground }
//! POST /api/playgrounds        ← { "playground": PlaygroundDraft }  → { "playground": Playground }
//! PUT  /api/playgrounds/:id    ← { "playground": PlaygroundDraft }  → { "playground": Playground }
//! ```
//!
//! The server stores every field as a plain string property, but older
//! records may be missing any of them, so everything except `id` decodes
//! to an empty string when absent or `null`.

use serde::{Deserialize, Deserializer, Serialize};

/// A saved playground as returned by the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Playground {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub html: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub css: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ruby: String,
}

impl Playground {
    /// Label for list views: the name, or the id for unnamed playgrounds.
    pub fn label(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// `{ "playground": {...} }`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlaygroundEnvelope {
    pub playground: Playground,
}

/// `{ "playgrounds": [...] }`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaygroundList {
    #[serde(default)]
    pub playgrounds: Vec<Playground>,
}

/// The editable part of a playground, sent on create and update.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaygroundDraft {
    pub name: String,
    pub html: String,
    pub css: String,
    pub ruby: String,
}

/// `{ "playground": { name, html, css, ruby } }`
#[derive(Serialize, Debug, Clone)]
pub struct SavePlaygroundRequest<'a> {
    pub playground: &'a PlaygroundDraft,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
