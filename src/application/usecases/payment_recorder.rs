use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::config_model::RenewalConfig;
use crate::domain::{
    entities::payments::PaymentEntity,
    errors::{DomainError, DomainResult},
    repositories::{
        clients::ClientRepository, payments::PaymentRepository, plans::PlanRepository,
        subscriptions::SubscriptionRepository,
    },
    value_objects::enums::payment_methods::PaymentMethod,
};
use crate::infrastructure::clock::Clock;

use super::subscription_ledger::SubscriptionLedgerUseCase;

/// The one write path the recorder drives on the ledger. A seam so the
/// recorder can be tested against a mocked ledger.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RenewalLedger: Send + Sync {
    async fn renew_on_payment(
        &self,
        subscription_id: Uuid,
        payment_date: NaiveDate,
        duration_days: i64,
    ) -> DomainResult<()>;
}

#[async_trait]
impl<C, P, S, Clk> RenewalLedger for SubscriptionLedgerUseCase<C, P, S, Clk>
where
    C: ClientRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    Clk: Clock + 'static,
{
    async fn renew_on_payment(
        &self,
        subscription_id: Uuid,
        payment_date: NaiveDate,
        duration_days: i64,
    ) -> DomainResult<()> {
        SubscriptionLedgerUseCase::renew_on_payment(self, subscription_id, payment_date, duration_days)
            .await
    }
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub client_id: Uuid,
    pub subscription_id: Uuid,
    /// Minor currency units; must be positive.
    pub amount_minor: i64,
    /// Local calendar day of the payment, normalized at the boundary.
    pub payment_date: NaiveDate,
    pub method: PaymentMethod,
}

/// Records a payment and drives exactly one renewal for it.
pub struct PaymentRecorderUseCase<C, S, P, Pay, L, Clk>
where
    C: ClientRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
    L: RenewalLedger + 'static,
    Clk: Clock + 'static,
{
    client_repo: Arc<C>,
    subscription_repo: Arc<S>,
    plan_repo: Arc<P>,
    payment_repo: Arc<Pay>,
    ledger: Arc<L>,
    clock: Arc<Clk>,
    renewal: RenewalConfig,
}

impl<C, S, P, Pay, L, Clk> PaymentRecorderUseCase<C, S, P, Pay, L, Clk>
where
    C: ClientRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
    L: RenewalLedger + 'static,
    Clk: Clock + 'static,
{
    pub fn new(
        client_repo: Arc<C>,
        subscription_repo: Arc<S>,
        plan_repo: Arc<P>,
        payment_repo: Arc<Pay>,
        ledger: Arc<L>,
        clock: Arc<Clk>,
        renewal: RenewalConfig,
    ) -> Self {
        Self {
            client_repo,
            subscription_repo,
            plan_repo,
            payment_repo,
            ledger,
            clock,
            renewal,
        }
    }

    /// Stores the payment, resolves the plan duration and renews the
    /// subscription. If the renewal fails after the payment was stored the
    /// payment is deleted again, so no orphaned payment survives.
    pub async fn create_payment(&self, new_payment: NewPayment) -> DomainResult<Uuid> {
        if new_payment.amount_minor <= 0 {
            return Err(DomainError::Validation(format!(
                "payment amount must be positive, got {}",
                new_payment.amount_minor
            )));
        }

        let client = self
            .client_repo
            .find_by_id(new_payment.client_id)
            .await?
            .ok_or_else(|| DomainError::client_not_found(new_payment.client_id))?;

        if !client.is_active {
            return Err(DomainError::InvalidState(format!(
                "cannot record a payment for inactive client {}",
                client.id
            )));
        }

        let subscription = self
            .subscription_repo
            .find_by_id(new_payment.subscription_id)
            .await?
            .ok_or_else(|| DomainError::subscription_not_found(new_payment.subscription_id))?;

        let payment = PaymentEntity {
            id: Uuid::new_v4(),
            client_id: client.id,
            subscription_id: subscription.id,
            amount_minor: new_payment.amount_minor,
            payment_date: new_payment.payment_date,
            method: new_payment.method,
            recorded_at: self.clock.now(),
        };
        let payment_id = payment.id;

        self.payment_repo.insert(payment).await?;

        let duration_days = self.resolve_duration(subscription.plan_id).await;

        match self
            .ledger
            .renew_on_payment(subscription.id, new_payment.payment_date, duration_days)
            .await
        {
            Ok(()) => {
                info!(
                    %payment_id,
                    client_id = %client.id,
                    subscription_id = %subscription.id,
                    amount_minor = new_payment.amount_minor,
                    method = %new_payment.method,
                    "recorder: payment stored and subscription renewed"
                );
                Ok(payment_id)
            }
            Err(renewal_error) => {
                error!(
                    %payment_id,
                    subscription_id = %subscription.id,
                    error = %renewal_error,
                    "recorder: renewal failed after payment was stored, rolling the payment back"
                );
                if let Err(delete_error) = self.payment_repo.delete(payment_id).await {
                    error!(
                        %payment_id,
                        error = %delete_error,
                        "recorder: failed to roll back orphaned payment"
                    );
                }
                Err(renewal_error)
            }
        }
    }

    /// Degraded mode: a subscription whose plan no longer resolves still
    /// renews, with the configured default duration.
    async fn resolve_duration(&self, plan_id: Uuid) -> i64 {
        match self.plan_repo.find_by_id(plan_id).await {
            Ok(Some(plan)) => plan.duration_days,
            Ok(None) => {
                warn!(
                    %plan_id,
                    default_days = self.renewal.default_plan_duration_days,
                    "recorder: plan is gone, renewing with default duration"
                );
                self.renewal.default_plan_duration_days
            }
            Err(err) => {
                warn!(
                    %plan_id,
                    error = %err,
                    default_days = self.renewal.default_plan_duration_days,
                    "recorder: plan lookup failed, renewing with default duration"
                );
                self.renewal.default_plan_duration_days
            }
        }
    }
}
