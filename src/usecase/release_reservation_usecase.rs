use crate::domain::{
    error::DomainError, models::email::Email,
    repositories::reservation_repository::ReservationRepository,
};

pub struct ReleaseReservationUsecase<R: ReservationRepository> {
    reservation_repository: R,
}

impl<R: ReservationRepository> ReleaseReservationUsecase<R> {
    pub fn new(reservation_repository: R) -> Self {
        Self {
            reservation_repository,
        }
    }

    /// Drops every hold of the email. Releasing nothing is not an error.
    pub async fn release(&self, email: String) -> Result<u64, DomainError> {
        let email = Email::new(&email)?;
        let released = self.reservation_repository.release(&email).await?;
        tracing::info!(email = email.as_str(), released, "reservation released");
        Ok(released)
    }
}
