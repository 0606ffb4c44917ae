use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, models::email::Email};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationMode {
    Online,
    Onspot,
}

impl RegistrationMode {
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.trim() {
            "online" => Ok(Self::Online),
            "onspot" => Ok(Self::Onspot),
            other => Err(DomainError::InvalidMode(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Onspot => "onspot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Lead,
    Member,
}

impl Role {
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.trim() {
            "lead" => Ok(Self::Lead),
            "member" => Ok(Self::Member),
            other => Err(DomainError::Validation(format!("Unknown role: {other}"))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::Member => "member",
        }
    }
}

/// One event the participant wants to hold, with the team inputs for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRequest {
    pub event_name: String,
    pub role: Option<Role>,
    pub team_name: Option<String>,
    pub team_code: Option<String>,
}

/// Validated reservation request: one email, one mode, distinct events in
/// caller order.
#[derive(Debug, Clone)]
pub struct ReservationRequest {
    email: Email,
    mode: RegistrationMode,
    slots: Vec<SlotRequest>,
}

impl ReservationRequest {
    pub fn new(
        email: Email,
        mode: RegistrationMode,
        slots: Vec<SlotRequest>,
    ) -> Result<Self, DomainError> {
        if slots.is_empty() {
            return Err(DomainError::Validation("Select at least one event".to_string()));
        }
        ensure_distinct(slots.iter().map(|slot| slot.event_name.as_str()))?;
        Ok(Self { email, mode, slots })
    }

    pub fn email(&self) -> &Email {
        &self.email
    }
    pub fn mode(&self) -> RegistrationMode {
        self.mode
    }
    pub fn slots(&self) -> &[SlotRequest] {
        &self.slots
    }
    pub fn event_names(&self) -> Vec<String> {
        self.slots.iter().map(|slot| slot.event_name.clone()).collect()
    }
}

pub(crate) fn ensure_distinct<'a>(names: impl Iterator<Item = &'a str>) -> Result<(), DomainError> {
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(DomainError::Validation("Event name is required".to_string()));
        }
        if !seen.insert(name) {
            return Err(DomainError::DuplicateEvent(name.to_string()));
        }
    }
    Ok(())
}

/// A hold as written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldSlot {
    pub event_name: String,
    pub role: Option<Role>,
    pub team_name: Option<String>,
    pub team_code: Option<String>,
    pub registration_mode: RegistrationMode,
    pub expires_at: DateTime<Utc>,
}
