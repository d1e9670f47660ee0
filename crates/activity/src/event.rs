// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::Serialize;
use serde_json::{Value, json};
use time::OffsetDateTime;

/// The kind of user action being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// A filter selection changed.
    FilterChange,
    /// A period comparison was run.
    Comparison,
    /// A dashboard tab was opened.
    TabChange,
    /// A report or slide deck was exported.
    Export,
}

impl ActivityKind {
    /// Converts this kind to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FilterChange => "filter_change",
            Self::Comparison => "comparison",
            Self::TabChange => "tab_change",
            Self::Export => "export",
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single user action, as sent to `registrar_atividade`.
///
/// Events are immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEvent {
    /// What happened.
    pub kind: ActivityKind,
    /// Human-readable description.
    pub description: String,
    /// The dashboard tab the action happened on.
    pub tab: Option<String>,
    /// The filter payload in effect, if any.
    pub filters: Value,
    /// The client session.
    pub session_id: Option<String>,
    /// When the action happened.
    #[serde(with = "time::serde::rfc3339")]
    pub occurred_at: OffsetDateTime,
}

impl ActivityEvent {
    /// Creates a new event stamped with the current time.
    ///
    /// # Arguments
    ///
    /// * `kind` - What happened
    /// * `description` - Human-readable description
    #[must_use]
    pub fn new(kind: ActivityKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            tab: None,
            filters: Value::Null,
            session_id: None,
            occurred_at: OffsetDateTime::now_utc(),
        }
    }

    #[must_use]
    pub fn with_tab(mut self, tab: impl Into<String>) -> Self {
        self.tab = Some(tab.into());
        self
    }

    #[must_use]
    pub fn with_filters(mut self, filters: Value) -> Self {
        self.filters = filters;
        self
    }

    #[must_use]
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Converts this event into `registrar_atividade` parameters.
    #[must_use]
    pub fn to_params(&self) -> Value {
        json!({
            "p_action_type": self.kind.as_str(),
            "p_action_details": self.description,
            "p_tab_name": self.tab,
            "p_filters_applied": self.filters,
            "p_session_id": self.session_id,
        })
    }
}
