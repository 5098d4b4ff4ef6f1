use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::payments::PaymentEntity;
use crate::domain::errors::DomainResult;

#[async_trait]
#[automock]
pub trait PaymentRepository {
    async fn insert(&self, payment: PaymentEntity) -> DomainResult<Uuid>;
    /// Only called as the recorder's compensating action or by an
    /// administrative escape hatch; payments are otherwise immutable.
    async fn delete(&self, payment_id: Uuid) -> DomainResult<()>;
    /// Payment history, newest first.
    async fn list_for_client(&self, client_id: Uuid) -> DomainResult<Vec<PaymentEntity>>;
    /// Sum of amounts with `payment_date` in `[from, to]`, both inclusive.
    async fn sum_amount_between(&self, from: NaiveDate, to: NaiveDate) -> DomainResult<i64>;
}
