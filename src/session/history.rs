//! Roll history for the campaign: what was rolled, by whom, and when.

use crate::common::{Int, DEFAULT_HISTORY_LIMIT};
use crate::error::RollError;
use crate::roll::{RollContext, Roller};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub type CharacterId = u64;
pub type RollContextData = serde_json::Map<String, serde_json::Value>;

/// One remembered roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollRecord {
    pub id: u64,
    pub character_id: Option<CharacterId>,
    /// The expression exactly as it was submitted.
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Int,
    #[serde(default)]
    pub context: RollContextData,
    pub created_at: DateTime<Utc>,
}

/// A player's request to roll. Only rolls tied to a character are remembered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiceRollRequest {
    pub dice_type: String,
    #[serde(default)]
    pub character_id: Option<CharacterId>,
    #[serde(default)]
    pub context: Option<RollContextData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRollResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Int,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    records: VecDeque<RollRecord>,
}

/// Shared, in-memory roll history. Oldest records are evicted once `capacity` is reached; a
/// capacity of zero keeps nothing.
#[derive(Default)]
pub struct RollLog {
    inner: Mutex<Inner>,
    capacity: Option<usize>,
}

impl RollLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::default(),
            capacity: Some(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn record(
        &self,
        character_id: Option<CharacterId>,
        kind: impl Into<String>,
        value: Int,
        context: RollContextData,
    ) -> RollRecord {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let record = RollRecord {
            id: inner.next_id,
            character_id,
            kind: kind.into(),
            value,
            context,
            created_at: Utc::now(),
        };
        if let Some(capacity) = self.capacity {
            while !inner.records.is_empty() && inner.records.len() >= capacity {
                inner.records.pop_front();
            }
        }
        if self.capacity != Some(0) {
            inner.records.push_back(record.clone());
        }
        tracing::info!(
            id = record.id,
            character_id = ?record.character_id,
            kind = %record.kind,
            value = record.value,
            "recorded roll"
        );
        record
    }

    /// Newest first, optionally restricted to one character.
    pub fn recent(&self, character_id: Option<CharacterId>, limit: usize) -> Vec<RollRecord> {
        self.inner
            .lock()
            .records
            .iter()
            .rev()
            .filter(|r| character_id.map_or(true, |id| r.character_id == Some(id)))
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn recent_default(&self, character_id: Option<CharacterId>) -> Vec<RollRecord> {
        self.recent(character_id, DEFAULT_HISTORY_LIMIT)
    }

    /// The most recent roll made by a character.
    pub fn last_for(&self, character_id: CharacterId) -> Option<RollRecord> {
        self.recent(Some(character_id), 1).pop()
    }

    /// Rolls the requested dice and remembers the result if the request names a character.
    /// Character id 0 means "no character".
    ///
    /// A bad expression is returned as is; nothing is recorded for it.
    pub fn handle<R: Roller>(
        &self,
        request: DiceRollRequest,
        ctx: &mut RollContext<R>,
    ) -> Result<DiceRollResponse, RollError> {
        let value = ctx.roll(&request.dice_type)?;
        if request.character_id.map_or(false, |id| id != 0) {
            self.record(
                request.character_id,
                request.dice_type.clone(),
                value,
                request.context.unwrap_or_default(),
            );
        }
        Ok(DiceRollResponse {
            kind: request.dice_type,
            value,
        })
    }
}
