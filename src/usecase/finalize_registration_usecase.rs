use std::sync::Arc;

use crate::domain::{
    error::DomainError,
    models::{
        registration::{Participant, Receipt, RegistrationPayload},
        reservation::RegistrationMode,
    },
    repositories::{
        registration_repository::RegistrationRepository,
        reservation_repository::ReservationRepository,
    },
    services::{
        food_pass_service::FoodPassEncoder,
        notification_service::{Notifier, RegistrationNotice},
    },
};

/// Registration form as submitted after the slots were held and paid for
#[derive(Debug, Clone, Default)]
pub struct RegistrationInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub student_year: String,
    pub food: String,
    pub registration_mode: String,
    pub events: Vec<String>,
    pub order_id: Option<String>,
}

pub struct FinalizeRegistrationUsecase<
    R: RegistrationRepository,
    S: ReservationRepository,
    N: Notifier,
    F: FoodPassEncoder,
> {
    registration_repository: R,
    reservation_repository: S,
    notifier: Arc<N>,
    food_pass_encoder: Arc<F>,
}

impl<R, S, N, F> FinalizeRegistrationUsecase<R, S, N, F>
where
    R: RegistrationRepository,
    S: ReservationRepository,
    N: Notifier + 'static,
    F: FoodPassEncoder + 'static,
{
    pub fn new(
        registration_repository: R,
        reservation_repository: S,
        notifier: N,
        food_pass_encoder: F,
    ) -> Self {
        Self {
            registration_repository,
            reservation_repository,
            notifier: Arc::new(notifier),
            food_pass_encoder: Arc::new(food_pass_encoder),
        }
    }

    /// Commits the held reservation as a registration. Once this returns
    /// `Ok` the registration stands; clean-up and the confirmation notice
    /// run afterwards and only log their failures.
    pub async fn register(&self, input: RegistrationInput) -> Result<Receipt, DomainError> {
        let participant = Participant::new(
            &input.name,
            &input.email,
            &input.phone,
            &input.college,
            &input.student_year,
            &input.food,
        )?;
        let mode = RegistrationMode::parse(&input.registration_mode)?;
        let events = input
            .events
            .iter()
            .map(|name| name.trim().to_string())
            .collect();
        let payload = RegistrationPayload::new(participant, mode, events, input.order_id)?;
        let email = payload.participant().email().clone();

        // fast path; finalize re-checks inside its transaction
        if self.registration_repository.email_exists(&email).await? {
            return Err(DomainError::EmailAlreadyRegistered);
        }

        let receipt = self.registration_repository.finalize(&payload).await?;
        tracing::info!(
            registration_id = receipt.registration_id,
            email = email.as_str(),
            events = receipt.events.len(),
            "registration finalized"
        );

        if let Err(err) = self.reservation_repository.release(&email).await {
            // registered holds no longer count, so a leftover only waits for the sweep
            tracing::warn!(email = email.as_str(), error = %err, "failed to clear consumed holds");
        }

        self.notify(&receipt);
        Ok(receipt)
    }

    fn notify(&self, receipt: &Receipt) {
        let notifier = Arc::clone(&self.notifier);
        let encoder = Arc::clone(&self.food_pass_encoder);
        let token = receipt.food_token.clone();
        let mut notice = RegistrationNotice {
            name: receipt.name.clone(),
            email: receipt.email.clone(),
            events: receipt.events.clone(),
            food_pass: Vec::new(),
            food_type: receipt.food_type.clone(),
        };

        tokio::spawn(async move {
            match encoder.encode(&token) {
                Ok(food_pass) => notice.food_pass = food_pass,
                Err(err) => {
                    tracing::error!(email = %notice.email, error = %err, "failed to encode food pass");
                }
            }
            if let Err(err) = notifier.send_confirmation(notice.clone()).await {
                tracing::error!(email = %notice.email, error = %err, "failed to send confirmation");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::mpsc;

    use super::*;
    use crate::domain::models::{
        email::Email,
        food_token::FoodToken,
        registration::ConfirmedEvent,
        reservation::{HeldSlot, ReservationRequest},
    };

    struct MockRegistrationRepository {
        registered: bool,
        finalized: Mutex<Vec<RegistrationPayload>>,
    }

    impl MockRegistrationRepository {
        fn new(registered: bool) -> Self {
            Self {
                registered,
                finalized: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RegistrationRepository for MockRegistrationRepository {
        async fn email_exists(&self, _email: &Email) -> Result<bool, DomainError> {
            Ok(self.registered)
        }

        async fn finalize(&self, payload: &RegistrationPayload) -> Result<Receipt, DomainError> {
            self.finalized.lock().unwrap().push(payload.clone());
            let participant = payload.participant();
            Ok(Receipt {
                registration_id: 7,
                name: participant.name().to_string(),
                email: participant.email().as_str().to_string(),
                phone: participant.phone().to_string(),
                college: participant.college().to_string(),
                student_year: participant.student_year().to_string(),
                registration_mode: payload.mode(),
                events: payload
                    .event_names()
                    .iter()
                    .map(|name| ConfirmedEvent {
                        event_name: name.clone(),
                        role: None,
                        team_name: None,
                        team_code: None,
                    })
                    .collect(),
                food_token: FoodToken::new("TOKEN".to_string()),
                food_type: participant.food().to_string(),
            })
        }
    }

    struct MockReservationRepository {
        fail_release: bool,
        released: Mutex<Vec<String>>,
    }

    impl MockReservationRepository {
        fn new(fail_release: bool) -> Self {
            Self {
                fail_release,
                released: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ReservationRepository for MockReservationRepository {
        async fn reserve(&self, _request: &ReservationRequest) -> Result<Vec<HeldSlot>, DomainError> {
            Ok(Vec::new())
        }

        async fn release(&self, email: &Email) -> Result<u64, DomainError> {
            if self.fail_release {
                return Err(DomainError::Validation("store unavailable".to_string()));
            }
            self.released.lock().unwrap().push(email.as_str().to_string());
            Ok(1)
        }
    }

    struct ChannelNotifier {
        sender: mpsc::UnboundedSender<RegistrationNotice>,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for ChannelNotifier {
        async fn send_confirmation(&self, notice: RegistrationNotice) -> Result<(), DomainError> {
            let _ = self.sender.send(notice);
            if self.fail {
                return Err(DomainError::Validation("smtp down".to_string()));
            }
            Ok(())
        }
    }

    struct StaticEncoder;

    impl FoodPassEncoder for StaticEncoder {
        fn encode(&self, token: &FoodToken) -> Result<Vec<u8>, DomainError> {
            Ok(token.as_str().as_bytes().to_vec())
        }
    }

    type Usecase = FinalizeRegistrationUsecase<
        MockRegistrationRepository,
        MockReservationRepository,
        ChannelNotifier,
        StaticEncoder,
    >;

    fn usecase(
        registered: bool,
        fail_release: bool,
        fail_notify: bool,
    ) -> (Usecase, mpsc::UnboundedReceiver<RegistrationNotice>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let usecase = FinalizeRegistrationUsecase::new(
            MockRegistrationRepository::new(registered),
            MockReservationRepository::new(fail_release),
            ChannelNotifier {
                sender,
                fail: fail_notify,
            },
            StaticEncoder,
        );
        (usecase, receiver)
    }

    fn input() -> RegistrationInput {
        RegistrationInput {
            name: "Ada".to_string(),
            email: "Ada@Example.com".to_string(),
            phone: "9876543210".to_string(),
            college: "Anna University".to_string(),
            student_year: "3".to_string(),
            food: "veg".to_string(),
            registration_mode: "online".to_string(),
            events: vec!["quiz".to_string(), " hackquest ".to_string()],
            order_id: Some("order_1".to_string()),
        }
    }

    async fn next_notice(receiver: &mut mpsc::UnboundedReceiver<RegistrationNotice>) -> RegistrationNotice {
        tokio::time::timeout(Duration::from_secs(1), receiver.recv())
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_positive() {
        let (usecase, mut receiver) = usecase(false, false, false);

        let receipt = usecase.register(input()).await.unwrap();

        assert_eq!(receipt.registration_id, 7);
        assert_eq!(receipt.email, "ada@example.com");
        let finalized = usecase.registration_repository.finalized.lock().unwrap().clone();
        assert_eq!(finalized[0].event_names(), ["quiz".to_string(), "hackquest".to_string()]);
        assert_eq!(finalized[0].order_id(), Some("order_1"));
        assert_eq!(
            *usecase.reservation_repository.released.lock().unwrap(),
            vec!["ada@example.com".to_string()]
        );

        let notice = next_notice(&mut receiver).await;
        assert_eq!(notice.email, "ada@example.com");
        assert_eq!(notice.events.len(), 2);
        assert_eq!(notice.food_pass, b"TOKEN".to_vec());
        assert_eq!(notice.food_type, "veg");
    }

    #[tokio::test]
    async fn test_register_already_registered_negative() {
        let (usecase, _receiver) = usecase(true, false, false);

        let err = usecase.register(input()).await.unwrap_err();

        assert!(matches!(err, DomainError::EmailAlreadyRegistered));
        assert!(usecase.registration_repository.finalized.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_missing_details_negative() {
        let (usecase, _receiver) = usecase(false, false, false);
        let mut form = input();
        form.college = "  ".to_string();

        let err = usecase.register(form).await.unwrap_err();

        assert_eq!(err.to_string(), "Missing registration details");
    }

    #[tokio::test]
    async fn test_post_commit_failures_do_not_fail_registration() {
        let (usecase, mut receiver) = usecase(false, true, true);

        let receipt = usecase.register(input()).await.unwrap();

        assert_eq!(receipt.registration_id, 7);
        // the notifier was still attempted
        let notice = next_notice(&mut receiver).await;
        assert_eq!(notice.name, "Ada");
    }
}
