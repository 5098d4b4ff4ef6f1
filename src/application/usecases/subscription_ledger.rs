use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::renewal;
use crate::config::config_model::RenewalConfig;
use crate::domain::{
    entities::subscriptions::SubscriptionEntity,
    errors::{DomainError, DomainResult},
    repositories::{
        clients::ClientRepository,
        plans::PlanRepository,
        subscriptions::{RenewalUpdate, SubscriptionRepository},
    },
    value_objects::enums::payment_statuses::PaymentStatus,
};
use crate::infrastructure::clock::Clock;

/// Single source of truth for a client's membership window and payment
/// state. Every write to a subscription row goes through here.
pub struct SubscriptionLedgerUseCase<C, P, S, Clk>
where
    C: ClientRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    Clk: Clock + 'static,
{
    client_repo: Arc<C>,
    plan_repo: Arc<P>,
    subscription_repo: Arc<S>,
    clock: Arc<Clk>,
    renewal: RenewalConfig,
}

impl<C, P, S, Clk> SubscriptionLedgerUseCase<C, P, S, Clk>
where
    C: ClientRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    Clk: Clock + 'static,
{
    pub fn new(
        client_repo: Arc<C>,
        plan_repo: Arc<P>,
        subscription_repo: Arc<S>,
        clock: Arc<Clk>,
        renewal: RenewalConfig,
    ) -> Self {
        Self {
            client_repo,
            plan_repo,
            subscription_repo,
            clock,
            renewal,
        }
    }

    /// Opens the client's subscription row: `Pending`, zero-length window
    /// anchored on today, awaiting its first payment.
    ///
    /// Idempotent: if the client already has a subscription the existing row
    /// is returned unchanged, keeping the one-row-per-client invariant.
    pub async fn create_initial(
        &self,
        client_id: Uuid,
        plan_id: Uuid,
    ) -> DomainResult<SubscriptionEntity> {
        let client = self
            .client_repo
            .find_by_id(client_id)
            .await?
            .ok_or_else(|| DomainError::client_not_found(client_id))?;

        if !client.is_active {
            return Err(DomainError::InvalidState(format!(
                "cannot open a subscription for inactive client {client_id}"
            )));
        }

        self.plan_repo
            .find_by_id(plan_id)
            .await?
            .ok_or_else(|| DomainError::plan_not_found(plan_id))?;

        if let Some(existing) = self
            .subscription_repo
            .find_active_for_client(client_id)
            .await?
        {
            debug!(
                %client_id,
                subscription_id = %existing.id,
                "ledger: client already has a subscription, returning it"
            );
            return Ok(existing);
        }

        let today = self.clock.today();
        let now = self.clock.now();
        let subscription = SubscriptionEntity {
            id: Uuid::new_v4(),
            client_id,
            plan_id,
            start_date: today,
            end_date: today,
            payment_status: PaymentStatus::Pending,
            late_fee_minor: 0,
            version: 0,
            created_at: now,
            updated_at: now,
        };

        self.subscription_repo.insert(subscription.clone()).await?;

        info!(
            %client_id,
            %plan_id,
            subscription_id = %subscription.id,
            start_date = %subscription.start_date,
            "ledger: initial subscription created"
        );

        Ok(subscription)
    }

    /// Applies one payment to the membership window (see
    /// [`renewal::compute_renewal`] for the arithmetic).
    ///
    /// Not idempotent: a second call for the same payment advances the
    /// window again. The payment recorder is the only caller and invokes it
    /// exactly once per stored payment.
    ///
    /// Concurrent renewals of the same row are serialized by the version
    /// guard: a write that lost the race is recomputed against a fresh read
    /// instead of clobbering the winner, up to the configured retry limit.
    pub async fn renew_on_payment(
        &self,
        subscription_id: Uuid,
        payment_date: NaiveDate,
        duration_days: i64,
    ) -> DomainResult<()> {
        if duration_days < 1 {
            return Err(DomainError::Validation(format!(
                "plan duration must be at least one day, got {duration_days}"
            )));
        }

        let mut attempt = 0;
        loop {
            let subscription = self
                .subscription_repo
                .find_by_id(subscription_id)
                .await?
                .ok_or_else(|| DomainError::subscription_not_found(subscription_id))?;

            let outcome = renewal::compute_renewal(
                subscription.end_date,
                payment_date,
                duration_days,
                self.renewal.late_fee_per_day_minor,
            );

            let update = RenewalUpdate {
                end_date: outcome.new_end_date,
                payment_status: PaymentStatus::Paid,
                late_fee_minor: outcome.late_fee_minor,
            };

            let applied = self
                .subscription_repo
                .apply_renewal(subscription_id, subscription.version, update)
                .await?;

            if applied {
                info!(
                    %subscription_id,
                    %payment_date,
                    days_overdue = outcome.days_overdue,
                    late_fee_minor = outcome.late_fee_minor,
                    new_end_date = %outcome.new_end_date,
                    "ledger: renewal applied"
                );
                return Ok(());
            }

            attempt += 1;
            if attempt > self.renewal.retry_limit {
                return Err(DomainError::InvalidState(format!(
                    "subscription {subscription_id} kept changing under renewal, gave up after {attempt} attempts"
                )));
            }

            warn!(
                %subscription_id,
                attempt,
                "ledger: renewal lost a version race, retrying with a fresh read"
            );
        }
    }

    /// Administrative suspension: every subscription row of the client goes
    /// to `Overdue`; end dates and late fees stay as they are.
    pub async fn deactivate_all_for_client(&self, client_id: Uuid) -> DomainResult<u64> {
        let updated = self
            .subscription_repo
            .mark_all_overdue_for_client(client_id)
            .await?;

        info!(%client_id, updated, "ledger: subscriptions marked overdue for client");
        Ok(updated)
    }
}
