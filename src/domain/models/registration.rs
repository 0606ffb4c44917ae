use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    models::{
        email::Email,
        food_token::FoodToken,
        reservation::{RegistrationMode, Role, ensure_distinct},
    },
};

/// Profile of the person registering. Every field is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    name: String,
    email: Email,
    phone: String,
    college: String,
    student_year: String,
    food: String,
}

impl Participant {
    pub fn new(
        name: &str,
        email: &str,
        phone: &str,
        college: &str,
        student_year: &str,
        food: &str,
    ) -> Result<Self, DomainError> {
        let required = [name, email, phone, college, student_year, food];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(DomainError::Validation(
                "Missing registration details".to_string(),
            ));
        }
        Ok(Self {
            name: name.trim().to_string(),
            email: Email::new(email)?,
            phone: phone.trim().to_string(),
            college: college.trim().to_string(),
            student_year: student_year.trim().to_string(),
            food: food.trim().to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn email(&self) -> &Email {
        &self.email
    }
    pub fn phone(&self) -> &str {
        &self.phone
    }
    pub fn college(&self) -> &str {
        &self.college
    }
    pub fn student_year(&self) -> &str {
        &self.student_year
    }
    pub fn food(&self) -> &str {
        &self.food
    }
}

/// Everything `finalize` needs: who, which held events, and the paid order.
#[derive(Debug, Clone)]
pub struct RegistrationPayload {
    participant: Participant,
    mode: RegistrationMode,
    event_names: Vec<String>,
    order_id: Option<String>,
}

impl RegistrationPayload {
    pub fn new(
        participant: Participant,
        mode: RegistrationMode,
        event_names: Vec<String>,
        order_id: Option<String>,
    ) -> Result<Self, DomainError> {
        if event_names.is_empty() {
            return Err(DomainError::Validation("Select at least one event".to_string()));
        }
        ensure_distinct(event_names.iter().map(String::as_str))?;
        let order_id = order_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());
        Ok(Self {
            participant,
            mode,
            event_names,
            order_id,
        })
    }

    pub fn participant(&self) -> &Participant {
        &self.participant
    }
    pub fn mode(&self) -> RegistrationMode {
        self.mode
    }
    pub fn event_names(&self) -> &[String] {
        &self.event_names
    }
    pub fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }
}

/// One committed event participation as reported back to the participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedEvent {
    pub event_name: String,
    pub role: Option<Role>,
    pub team_name: Option<String>,
    pub team_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub registration_id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub student_year: String,
    pub registration_mode: RegistrationMode,
    pub events: Vec<ConfirmedEvent>,
    pub food_token: FoodToken,
    pub food_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant() -> Participant {
        Participant::new("Ada", "ada@example.com", "9999999999", "MIT", "3", "veg").unwrap()
    }

    #[test]
    fn test_participant_missing_field_negative() {
        let err = Participant::new("Ada", "ada@example.com", " ", "MIT", "3", "veg").unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg == "Missing registration details"));
    }

    #[test]
    fn test_payload_requires_events() {
        let err =
            RegistrationPayload::new(participant(), RegistrationMode::Online, vec![], None)
                .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_payload_blank_order_id_is_absent() {
        let payload = RegistrationPayload::new(
            participant(),
            RegistrationMode::Online,
            vec!["quiz".to_string()],
            Some("  ".to_string()),
        )
        .unwrap();
        assert_eq!(payload.order_id(), None);
    }
}
