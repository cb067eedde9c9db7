//! Core types and structures for agentweb
//!
//! This crate provides the wire and domain types shared by every agentweb
//! crate: the operations the agent service exposes, the response envelope,
//! transcript turns and the session credential.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Agent service used when no base URL was configured at build time
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8085";

/// Fixed name the credential is persisted under
pub const CREDENTIAL_KEY: &str = "jwt";

/// Sliding lifetime of a persisted credential, in days
pub const CREDENTIAL_TTL_DAYS: i64 = 30;

/// Lifetime applied to a credential every time it is issued or reused
pub fn credential_ttl() -> Duration {
    Duration::days(CREDENTIAL_TTL_DAYS)
}

// ============================================================================
// Operations
// ============================================================================

/// The four POST endpoints of the agent service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    InitSession,
    FetchHistory,
    AskAgent,
    ClearHistory,
}

impl Operation {
    /// Path of the endpoint relative to the service base URL
    pub fn path(&self) -> &'static str {
        match self {
            Operation::InitSession => "/init-session",
            Operation::FetchHistory => "/fetch-history",
            Operation::AskAgent => "/ask-agent",
            Operation::ClearHistory => "/clear-history",
        }
    }

    /// Human-facing name used in every error shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            Operation::InitSession => "init session",
            Operation::FetchHistory => "fetch history",
            Operation::AskAgent => "send message",
            Operation::ClearHistory => "clear history",
        }
    }

    /// Whether the request must carry the bearer credential
    pub fn requires_credential(&self) -> bool {
        !matches!(self, Operation::InitSession)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Transcript Types
// ============================================================================

/// Helper function to deserialize string or null values
pub fn deserialize_string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Null => Ok(String::new()),
        _ => Ok(String::new()),
    }
}

/// Author of a turn.
///
/// The service stores roles as free-form strings. Only the exact value
/// `"User"` maps to [`Role::User`]; everything else is the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Agent,
}

impl Role {
    pub fn from_wire(s: &str) -> Self {
        if s == "User" {
            Role::User
        } else {
            Role::Agent
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Agent => "Agent",
        }
    }

    /// Which side of the conversation a turn with this role renders on
    pub fn direction(&self) -> Direction {
        match self {
            Role::User => Direction::Outgoing,
            Role::Agent => Direction::Incoming,
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Agent
    }
}

impl Serialize for Role {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => Ok(Role::from_wire(&s)),
            _ => Ok(Role::Agent),
        }
    }
}

/// Rendering side of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Outgoing,
    Incoming,
}

/// One entry of the transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    #[serde(default)]
    pub role: Role,
    #[serde(deserialize_with = "deserialize_string_or_null", default)]
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn agent(content: impl Into<String>) -> Self {
        Self {
            role: Role::Agent,
            content: content.into(),
        }
    }

    pub fn direction(&self) -> Direction {
        self.role.direction()
    }
}

// ============================================================================
// Wire Types
// ============================================================================

/// Response envelope every endpoint answers with.
///
/// `{ "success": true, "data": .. }` or `{ "success": false, "err": .. }`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub err: Option<serde_json::Value>,
}

impl<T> Envelope<T> {
    /// Server-supplied error detail rendered as text
    pub fn error_detail(&self) -> String {
        match &self.err {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "unknown error".to_string(),
        }
    }
}

/// Body of the ask-agent request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskAgentBody {
    pub message: String,
}

// ============================================================================
// Credential
// ============================================================================

/// Opaque bearer token identifying a session, plus the instant it lapses
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// Credential valid for `ttl` starting at `now`
    pub fn issued_at(value: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self::new(value, now + ttl)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Short, log-safe prefix of the token
    pub fn fingerprint(&self) -> String {
        let prefix: String = self.value.chars().take(8).collect();
        format!("{}…", prefix)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("value", &self.fingerprint())
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
