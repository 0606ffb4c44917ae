use rand_core::{OsRng, TryRngCore};
use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, models::reservation::Role};

const TEAM_NAME_MIN: usize = 3;
const TEAM_NAME_MAX: usize = 50;

/// Trimmed team name, 3 to 50 characters. Uniqueness is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamName(String);

impl TeamName {
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        let len = trimmed.chars().count();
        if !(TEAM_NAME_MIN..=TEAM_NAME_MAX).contains(&len) {
            return Err(DomainError::InvalidTeamName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Comparison key for case-insensitive uniqueness
    pub fn key(&self) -> String {
        self.0.to_lowercase()
    }
}

/// Shareable team identifier: 3 random bytes as 6 uppercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamCode(String);

impl TeamCode {
    pub fn generate() -> Result<Self, DomainError> {
        let mut bytes = [0u8; 3];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| DomainError::Randomness(e.to_string()))?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self(hex::encode_upper(bytes))
    }

    /// Code typed in by a member; surrounding whitespace and letter case are
    /// not significant.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_uppercase()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Resolved team identity for one event row. All `None` for individual
/// events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamAssignment {
    pub role: Option<Role>,
    pub team_name: Option<String>,
    pub team_code: Option<String>,
}

impl TeamAssignment {
    pub fn individual() -> Self {
        Self::default()
    }

    pub fn lead(team_name: &TeamName, team_code: &TeamCode) -> Self {
        Self {
            role: Some(Role::Lead),
            team_name: Some(team_name.as_str().to_string()),
            team_code: Some(team_code.as_str().to_string()),
        }
    }

    pub fn member(team_name: String, team_code: &TeamCode) -> Self {
        Self {
            role: Some(Role::Member),
            team_name: Some(team_name),
            team_code: Some(team_code.as_str().to_string()),
        }
    }
}
