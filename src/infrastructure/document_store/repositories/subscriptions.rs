use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::subscriptions::SubscriptionEntity;
use crate::domain::errors::DomainResult;
use crate::domain::repositories::subscriptions::{RenewalUpdate, SubscriptionRepository};
use crate::domain::value_objects::enums::payment_statuses::PaymentStatus;
use crate::infrastructure::document_store::store::{
    DocumentStore, Filter, collections::SUBSCRIPTIONS,
};

use super::{decode, encode};

pub struct SubscriptionDocuments<S>
where
    S: DocumentStore + 'static,
{
    store: Arc<S>,
}

impl<S> SubscriptionDocuments<S>
where
    S: DocumentStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> SubscriptionRepository for SubscriptionDocuments<S>
where
    S: DocumentStore + 'static,
{
    async fn find_by_id(
        &self,
        subscription_id: Uuid,
    ) -> DomainResult<Option<SubscriptionEntity>> {
        self.store
            .get(SUBSCRIPTIONS, &subscription_id.to_string())
            .await?
            .map(decode)
            .transpose()
    }

    async fn find_active_for_client(
        &self,
        client_id: Uuid,
    ) -> DomainResult<Option<SubscriptionEntity>> {
        let docs = self
            .store
            .query(
                SUBSCRIPTIONS,
                Filter::new().eq("client_id", client_id.to_string()),
            )
            .await?;

        let rows = docs
            .into_iter()
            .map(decode::<SubscriptionEntity>)
            .collect::<DomainResult<Vec<_>>>()?;

        // Latest end date wins; historical rows only exist when the
        // one-row-per-client convention was violated upstream.
        Ok(rows.into_iter().max_by_key(|row| row.end_date))
    }

    async fn insert(&self, subscription: SubscriptionEntity) -> DomainResult<Uuid> {
        self.store
            .insert(SUBSCRIPTIONS, encode(&subscription)?)
            .await?;
        Ok(subscription.id)
    }

    async fn apply_renewal(
        &self,
        subscription_id: Uuid,
        expected_version: u64,
        update: RenewalUpdate,
    ) -> DomainResult<bool> {
        let patch = json!({
            "end_date": update.end_date,
            "payment_status": update.payment_status,
            "late_fee_minor": update.late_fee_minor,
            "version": expected_version + 1,
            "updated_at": Utc::now(),
        });

        self.store
            .update_guarded(
                SUBSCRIPTIONS,
                &subscription_id.to_string(),
                "version",
                json!(expected_version),
                patch,
            )
            .await
    }

    async fn mark_all_overdue_for_client(&self, client_id: Uuid) -> DomainResult<u64> {
        let docs = self
            .store
            .query(
                SUBSCRIPTIONS,
                Filter::new().eq("client_id", client_id.to_string()),
            )
            .await?;

        let patch = json!({
            "payment_status": PaymentStatus::Overdue,
            "updated_at": Utc::now(),
        });

        let mut updated = 0;
        for doc in docs {
            let row: SubscriptionEntity = decode(doc)?;
            self.store
                .update(SUBSCRIPTIONS, &row.id.to_string(), patch.clone())
                .await?;
            updated += 1;
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::infrastructure::document_store::memory::InMemoryDocumentStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn subscription(client_id: Uuid, end_date: NaiveDate) -> SubscriptionEntity {
        SubscriptionEntity {
            id: Uuid::new_v4(),
            client_id,
            plan_id: Uuid::new_v4(),
            start_date: date(2025, 1, 1),
            end_date,
            payment_status: PaymentStatus::Paid,
            late_fee_minor: 0,
            version: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn active_subscription_is_the_latest_end_date_among_rows() {
        let repo = SubscriptionDocuments::new(Arc::new(InMemoryDocumentStore::new()));
        let client_id = Uuid::new_v4();

        let old = subscription(client_id, date(2024, 12, 1));
        let current = subscription(client_id, date(2025, 2, 1));
        let other_client = subscription(Uuid::new_v4(), date(2025, 3, 1));
        repo.insert(old).await.unwrap();
        repo.insert(current.clone()).await.unwrap();
        repo.insert(other_client).await.unwrap();

        let active = repo.find_active_for_client(client_id).await.unwrap();
        assert_eq!(active, Some(current));
    }

    #[tokio::test]
    async fn apply_renewal_bumps_version_and_rejects_stale_writers() {
        let repo = SubscriptionDocuments::new(Arc::new(InMemoryDocumentStore::new()));
        let row = subscription(Uuid::new_v4(), date(2025, 1, 10));
        repo.insert(row.clone()).await.unwrap();

        let update = RenewalUpdate {
            end_date: date(2025, 2, 9),
            payment_status: PaymentStatus::Paid,
            late_fee_minor: 0,
        };

        let applied = repo.apply_renewal(row.id, 0, update.clone()).await.unwrap();
        assert!(applied);

        let stored = repo.find_by_id(row.id).await.unwrap().unwrap();
        assert_eq!(stored.end_date, date(2025, 2, 9));
        assert_eq!(stored.version, 1);

        // A writer still holding version 0 lost the race and must not land.
        let stale = repo.apply_renewal(row.id, 0, update).await.unwrap();
        assert!(!stale);
        let stored = repo.find_by_id(row.id).await.unwrap().unwrap();
        assert_eq!(stored.version, 1);
    }

    #[tokio::test]
    async fn apply_renewal_on_vanished_row_is_not_found() {
        let repo = SubscriptionDocuments::new(Arc::new(InMemoryDocumentStore::new()));

        let update = RenewalUpdate {
            end_date: date(2025, 2, 9),
            payment_status: PaymentStatus::Paid,
            late_fee_minor: 0,
        };

        let result = repo.apply_renewal(Uuid::new_v4(), 0, update).await;
        assert!(matches!(
            result,
            Err(crate::domain::errors::DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn mark_all_overdue_touches_every_row_of_the_client_only() {
        let repo = SubscriptionDocuments::new(Arc::new(InMemoryDocumentStore::new()));
        let client_id = Uuid::new_v4();

        let first = subscription(client_id, date(2025, 1, 10));
        let second = subscription(client_id, date(2024, 6, 1));
        let unrelated = subscription(Uuid::new_v4(), date(2025, 1, 10));
        repo.insert(first.clone()).await.unwrap();
        repo.insert(second.clone()).await.unwrap();
        repo.insert(unrelated.clone()).await.unwrap();

        let updated = repo.mark_all_overdue_for_client(client_id).await.unwrap();
        assert_eq!(updated, 2);

        let first_stored = repo.find_by_id(first.id).await.unwrap().unwrap();
        assert_eq!(first_stored.payment_status, PaymentStatus::Overdue);
        // End date and late fee stay untouched.
        assert_eq!(first_stored.end_date, first.end_date);
        assert_eq!(first_stored.late_fee_minor, first.late_fee_minor);

        let untouched = repo.find_by_id(unrelated.id).await.unwrap().unwrap();
        assert_eq!(untouched.payment_status, PaymentStatus::Paid);
    }
}
