use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::entities::payments::PaymentEntity;
use crate::domain::errors::DomainResult;
use crate::domain::repositories::payments::PaymentRepository;
use crate::infrastructure::document_store::store::{
    DocumentStore, Filter, collections::PAYMENTS,
};

use super::{decode, encode};

pub struct PaymentDocuments<S>
where
    S: DocumentStore + 'static,
{
    store: Arc<S>,
}

impl<S> PaymentDocuments<S>
where
    S: DocumentStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> PaymentRepository for PaymentDocuments<S>
where
    S: DocumentStore + 'static,
{
    async fn insert(&self, payment: PaymentEntity) -> DomainResult<Uuid> {
        self.store.insert(PAYMENTS, encode(&payment)?).await?;
        Ok(payment.id)
    }

    async fn delete(&self, payment_id: Uuid) -> DomainResult<()> {
        self.store.delete(PAYMENTS, &payment_id.to_string()).await
    }

    async fn list_for_client(&self, client_id: Uuid) -> DomainResult<Vec<PaymentEntity>> {
        let docs = self
            .store
            .query(PAYMENTS, Filter::new().eq("client_id", client_id.to_string()))
            .await?;

        let mut payments = docs
            .into_iter()
            .map(decode::<PaymentEntity>)
            .collect::<DomainResult<Vec<_>>>()?;

        payments.sort_by(|a, b| {
            (b.payment_date, b.recorded_at).cmp(&(a.payment_date, a.recorded_at))
        });
        Ok(payments)
    }

    async fn sum_amount_between(&self, from: NaiveDate, to: NaiveDate) -> DomainResult<i64> {
        // Equality filters only; the date range is applied repo-side.
        let docs = self.store.query(PAYMENTS, Filter::new()).await?;

        let mut total = 0;
        for doc in docs {
            let payment: PaymentEntity = decode(doc)?;
            if payment.payment_date >= from && payment.payment_date <= to {
                total += payment.amount_minor;
            }
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    use crate::domain::value_objects::enums::payment_methods::PaymentMethod;
    use crate::infrastructure::document_store::memory::InMemoryDocumentStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn payment(client_id: Uuid, payment_date: NaiveDate, amount_minor: i64) -> PaymentEntity {
        PaymentEntity {
            id: Uuid::new_v4(),
            client_id,
            subscription_id: Uuid::new_v4(),
            amount_minor,
            payment_date,
            method: PaymentMethod::Cash,
            recorded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn history_is_per_client_and_newest_first() {
        let repo = PaymentDocuments::new(Arc::new(InMemoryDocumentStore::new()));
        let client_id = Uuid::new_v4();

        let older = payment(client_id, date(2025, 1, 5), 15000);
        let newer = payment(client_id, date(2025, 1, 20), 15000);
        let foreign = payment(Uuid::new_v4(), date(2025, 1, 10), 99000);
        repo.insert(older.clone()).await.unwrap();
        repo.insert(newer.clone()).await.unwrap();
        repo.insert(foreign).await.unwrap();

        let history = repo.list_for_client(client_id).await.unwrap();
        assert_eq!(history, vec![newer, older]);
    }

    #[tokio::test]
    async fn monthly_income_bounds_are_inclusive() {
        let repo = PaymentDocuments::new(Arc::new(InMemoryDocumentStore::new()));
        let client_id = Uuid::new_v4();

        repo.insert(payment(client_id, date(2025, 1, 1), 100)).await.unwrap();
        repo.insert(payment(client_id, date(2025, 1, 15), 200)).await.unwrap();
        repo.insert(payment(client_id, date(2025, 1, 16), 400)).await.unwrap();
        repo.insert(payment(client_id, date(2024, 12, 31), 800)).await.unwrap();

        let total = repo
            .sum_amount_between(date(2025, 1, 1), date(2025, 1, 15))
            .await
            .unwrap();
        assert_eq!(total, 300);
    }

    #[tokio::test]
    async fn delete_supports_the_recorder_rollback() {
        let repo = PaymentDocuments::new(Arc::new(InMemoryDocumentStore::new()));
        let client_id = Uuid::new_v4();

        let stored = payment(client_id, date(2025, 1, 5), 15000);
        repo.insert(stored.clone()).await.unwrap();
        repo.delete(stored.id).await.unwrap();

        assert!(repo.list_for_client(client_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn same_day_payments_order_by_recording_time() {
        let repo = PaymentDocuments::new(Arc::new(InMemoryDocumentStore::new()));
        let client_id = Uuid::new_v4();

        let mut first = payment(client_id, date(2025, 1, 5), 100);
        first.recorded_at = Utc::now() - Duration::hours(2);
        let second = payment(client_id, date(2025, 1, 5), 200);
        repo.insert(first.clone()).await.unwrap();
        repo.insert(second.clone()).await.unwrap();

        let history = repo.list_for_client(client_id).await.unwrap();
        assert_eq!(history, vec![second, first]);
    }
}
