use thiserror::Error;

/// Coarse classification of a failure, used to pick the response status and
/// to tell the client whether resubmitting makes sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    ReservationMismatch,
    NotFound,
    Internal,
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Invalid registration mode: {0}")]
    InvalidMode(String),

    #[error("Role is required for team event \"{0}\"")]
    RoleRequired(String),

    #[error("Team name must be between 3 and 50 characters")]
    InvalidTeamName,

    #[error("Team code is required for \"{0}\"")]
    TeamCodeRequired(String),

    #[error("Event \"{0}\" was selected more than once")]
    DuplicateEvent(String),

    #[error("Payment for this registration has not been verified")]
    PaymentNotVerified,

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("\"{0}\" is already full")]
    CapacityExceeded(String),

    #[error("\"{0}\" online slots are full. Please register on-spot.")]
    OnlineCapacityExceeded(String),

    #[error("Team name \"{0}\" already exists")]
    TeamNameTaken(String),

    #[error("Invalid or expired team code for \"{0}\"")]
    InvalidTeamCode(String),

    #[error("Team is already full for \"{0}\"")]
    TeamFull(String),

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Payment already verified")]
    PaymentAlreadyVerified,

    #[error("Invalid payment signature")]
    InvalidPaymentSignature,

    #[error("Reservation expired. Please retry.")]
    ReservationExpired,

    #[error("Reservation does not match the selected events. Please retry.")]
    ReservationMismatch,

    #[error("Could not allocate a unique team code")]
    TeamCodeExhausted,

    #[error("Random source unavailable: {0}")]
    Randomness(String),
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_)
            | Self::InvalidEmail
            | Self::InvalidMode(_)
            | Self::RoleRequired(_)
            | Self::InvalidTeamName
            | Self::TeamCodeRequired(_)
            | Self::DuplicateEvent(_)
            | Self::PaymentNotVerified => ErrorKind::Validation,

            Self::CapacityExceeded(_)
            | Self::OnlineCapacityExceeded(_)
            | Self::TeamNameTaken(_)
            | Self::InvalidTeamCode(_)
            | Self::TeamFull(_)
            | Self::EmailAlreadyRegistered
            | Self::PaymentAlreadyVerified
            | Self::InvalidPaymentSignature => ErrorKind::Conflict,

            Self::ReservationExpired | Self::ReservationMismatch => {
                ErrorKind::ReservationMismatch
            }

            Self::EventNotFound(_) => ErrorKind::NotFound,

            Self::Repository(_) | Self::TeamCodeExhausted | Self::Randomness(_) => {
                ErrorKind::Internal
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sea_orm::DbErr> for RepositoryError {
    fn from(err: sea_orm::DbErr) -> Self {
        RepositoryError::DatabaseError(err.to_string())
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(err: sea_orm::DbErr) -> Self {
        DomainError::Repository(err.into())
    }
}
