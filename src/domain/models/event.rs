use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    models::reservation::{RegistrationMode, Role},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Individual,
    Team,
}

impl EventType {
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "individual" => Ok(Self::Individual),
            "team" => Ok(Self::Team),
            other => Err(DomainError::Validation(format!("Unknown event type: {other}"))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Team => "team",
        }
    }
}

/// Published event definition
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    id: i32,
    name: String,
    event_type: EventType,
    team_size: u64,
    max_slots: u64,
    max_online_slots: u64,
}

impl Event {
    pub fn new(
        id: i32,
        name: String,
        event_type: EventType,
        team_size: u64,
        max_slots: u64,
        max_online_slots: u64,
    ) -> Self {
        Self {
            id,
            name,
            event_type,
            team_size,
            max_slots,
            max_online_slots,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn event_type(&self) -> EventType {
        self.event_type
    }
    pub fn team_size(&self) -> u64 {
        self.team_size
    }
    pub fn max_slots(&self) -> u64 {
        self.max_slots
    }
    pub fn max_online_slots(&self) -> u64 {
        self.max_online_slots
    }

    pub fn is_team(&self) -> bool {
        self.event_type == EventType::Team
    }

    /// Only individuals and team leads take a slot; a lead's slot stands for
    /// the whole team.
    pub fn consumes_slot(&self, role: Option<Role>) -> bool {
        match self.event_type {
            EventType::Individual => true,
            EventType::Team => role == Some(Role::Lead),
        }
    }

    /// Admission decision for one more slot given the current usage.
    pub fn admit(&self, usage: &CapacityUsage, mode: RegistrationMode) -> Result<(), DomainError> {
        if usage.used >= self.max_slots {
            return Err(DomainError::CapacityExceeded(self.name.clone()));
        }
        if mode == RegistrationMode::Online && usage.used_online >= self.max_online_slots {
            return Err(DomainError::OnlineCapacityExceeded(self.name.clone()));
        }
        Ok(())
    }
}

/// Slots taken by confirmed registrations plus live holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapacityUsage {
    pub used: u64,
    pub used_online: u64,
}

/// Per-event view of remaining capacity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotAvailability {
    pub event_name: String,
    pub event_type: EventType,
    pub max_slots: u64,
    pub used_slots: u64,
    pub remaining_slots: u64,
    pub max_online_slots: u64,
    pub used_online_slots: u64,
    pub remaining_online_slots: u64,
}

impl SlotAvailability {
    pub fn from_usage(event: &Event, usage: &CapacityUsage) -> Self {
        let remaining_slots = event.max_slots.saturating_sub(usage.used);
        // online seats are also bounded by what is left of the total pool
        let remaining_online_slots = event
            .max_online_slots
            .saturating_sub(usage.used_online)
            .min(remaining_slots);
        Self {
            event_name: event.name.clone(),
            event_type: event.event_type,
            max_slots: event.max_slots,
            used_slots: usage.used,
            remaining_slots,
            max_online_slots: event.max_online_slots,
            used_online_slots: usage.used_online,
            remaining_online_slots,
        }
    }
}
