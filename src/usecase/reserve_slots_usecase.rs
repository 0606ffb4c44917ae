use crate::domain::{
    error::DomainError,
    models::{
        email::Email,
        reservation::{HeldSlot, RegistrationMode, ReservationRequest, Role, SlotRequest},
    },
    repositories::reservation_repository::ReservationRepository,
};

/// Raw per-event input as submitted by the client
#[derive(Debug, Clone, Default)]
pub struct SlotInput {
    pub event_name: String,
    pub role: Option<String>,
    pub team_name: Option<String>,
    pub team_code: Option<String>,
}

pub struct ReserveSlotsUsecase<R: ReservationRepository> {
    reservation_repository: R,
}

impl<R: ReservationRepository> ReserveSlotsUsecase<R> {
    pub fn new(reservation_repository: R) -> Self {
        Self {
            reservation_repository,
        }
    }

    pub async fn reserve(
        &self,
        email: String,
        mode: String,
        slots: Vec<SlotInput>,
    ) -> Result<Vec<HeldSlot>, DomainError> {
        let email = Email::new(&email)?;
        let mode = RegistrationMode::parse(&mode)?;
        let slots = slots
            .into_iter()
            .map(to_slot_request)
            .collect::<Result<Vec<_>, _>>()?;
        let request = ReservationRequest::new(email, mode, slots)?;

        let held = self.reservation_repository.reserve(&request).await?;
        tracing::info!(
            email = request.email().as_str(),
            mode = mode.as_str(),
            events = ?request.event_names(),
            "slots reserved"
        );
        Ok(held)
    }
}

fn to_slot_request(input: SlotInput) -> Result<SlotRequest, DomainError> {
    let role = match input.role.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(role) => Some(Role::parse(role)?),
    };
    Ok(SlotRequest {
        event_name: input.event_name.trim().to_string(),
        role,
        team_name: input.team_name,
        team_code: input.team_code,
    })
}
