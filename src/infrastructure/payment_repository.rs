use std::sync::Arc;

use async_trait::async_trait;
use entity::payments;
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait};

use crate::domain::{
    error::DomainError, models::payment::VerifiedPayment,
    repositories::payment_repository::PaymentRepository, services::clock::Clock,
};
use crate::infrastructure::transaction::is_unique_violation;

pub const PAID: &str = "PAID";

#[derive(Clone)]
pub struct SeaOrmPaymentRepository {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
}

impl SeaOrmPaymentRepository {
    pub fn new(db: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }
}

#[async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn record_verified(&self, payment: &VerifiedPayment) -> Result<(), DomainError> {
        // the unique index on order_id decides between concurrent callbacks
        payments::Entity::insert(payments::ActiveModel {
            order_id: Set(payment.order_id.clone()),
            payment_id: Set(payment.payment_id.clone()),
            email: Set(payment.email.as_str().to_string()),
            status: Set(PAID.to_string()),
            verified_at: Set(self.clock.now()),
            ..Default::default()
        })
        .exec(&self.db)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                DomainError::PaymentAlreadyVerified
            } else {
                err.into()
            }
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ColumnTrait, QueryFilter};

    use super::*;
    use crate::domain::models::email::Email;
    use crate::infrastructure::test_support::{TestClock, setup_db, t0};

    fn verified(order_id: &str) -> VerifiedPayment {
        VerifiedPayment {
            order_id: order_id.to_string(),
            payment_id: "pay_1".to_string(),
            email: Email::new("Ada@Example.com").unwrap(),
        }
    }

    #[tokio::test]
    async fn test_record_verified_positive() {
        let db = setup_db().await;
        let repo = SeaOrmPaymentRepository::new(db.clone(), Arc::new(TestClock::new(t0())));

        repo.record_verified(&verified("order_1")).await.unwrap();

        let row = payments::Entity::find()
            .filter(payments::Column::OrderId.eq("order_1"))
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.email, "ada@example.com");
        assert_eq!(row.status, PAID);
        assert_eq!(row.verified_at, t0());
    }

    #[tokio::test]
    async fn test_record_same_order_twice_negative() {
        let db = setup_db().await;
        let repo = SeaOrmPaymentRepository::new(db, Arc::new(TestClock::new(t0())));

        repo.record_verified(&verified("order_1")).await.unwrap();
        let err = repo.record_verified(&verified("order_1")).await.unwrap_err();
        assert!(matches!(err, DomainError::PaymentAlreadyVerified));
    }
}
