use std::collections::HashMap;
use std::sync::Arc;

use chrono::Datelike;
use tracing::warn;
use uuid::Uuid;

use crate::application::renewal;
use crate::config::config_model::StatusConfig;
use crate::domain::{
    entities::{payments::PaymentEntity, subscriptions::SubscriptionEntity},
    errors::DomainResult,
    repositories::{
        clients::ClientRepository, payments::PaymentRepository, plans::PlanRepository,
        subscriptions::SubscriptionRepository,
    },
    value_objects::{
        client_views::{ClientWithSubscription, DashboardStats, PlanRef, SubscriptionView},
        enums::expiry_buckets::ExpiryBucket,
    },
};
use crate::infrastructure::clock::Clock;

/// Read-only projections over clients, subscriptions, plans and payments.
/// Never mutates state; plan lookups degrade per item so one broken row
/// cannot take down a whole list view.
pub struct ClientOverviewUseCase<C, S, P, Pay, Clk>
where
    C: ClientRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
    Clk: Clock + 'static,
{
    client_repo: Arc<C>,
    subscription_repo: Arc<S>,
    plan_repo: Arc<P>,
    payment_repo: Arc<Pay>,
    clock: Arc<Clk>,
    status: StatusConfig,
}

impl<C, S, P, Pay, Clk> ClientOverviewUseCase<C, S, P, Pay, Clk>
where
    C: ClientRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
    Clk: Clock + 'static,
{
    pub fn new(
        client_repo: Arc<C>,
        subscription_repo: Arc<S>,
        plan_repo: Arc<P>,
        payment_repo: Arc<Pay>,
        clock: Arc<Clk>,
        status: StatusConfig,
    ) -> Self {
        Self {
            client_repo,
            subscription_repo,
            plan_repo,
            payment_repo,
            clock,
            status,
        }
    }

    /// One composite view per client. Clients without a subscription come
    /// back as [`SubscriptionView::NoSubscription`] instead of erroring.
    pub async fn clients_with_subscription(&self) -> DomainResult<Vec<ClientWithSubscription>> {
        let clients = self.client_repo.list().await?;
        let today = self.clock.today();

        // Request-scoped memo: many clients share the same handful of plans.
        let mut plan_cache: HashMap<Uuid, PlanRef> = HashMap::new();
        let mut views = Vec::with_capacity(clients.len());

        for client in clients {
            let view = match self
                .subscription_repo
                .find_active_for_client(client.id)
                .await?
            {
                None => SubscriptionView::NoSubscription,
                Some(subscription) => {
                    self.build_active_view(subscription, today, &mut plan_cache)
                        .await
                }
            };
            views.push(ClientWithSubscription { client, view });
        }

        Ok(views)
    }

    /// Payment history for one client, newest first.
    pub async fn payment_history(&self, client_id: Uuid) -> DomainResult<Vec<PaymentEntity>> {
        self.payment_repo.list_for_client(client_id).await
    }

    pub async fn dashboard_stats(&self) -> DomainResult<DashboardStats> {
        let clients = self.client_repo.list().await?;
        let today = self.clock.today();

        let total_clients = clients.len();
        let active_clients = clients.iter().filter(|client| client.is_active).count();

        // Per client, look only at its single active subscription; historical
        // rows must never inflate the count.
        let mut expiring_this_week = 0;
        for client in &clients {
            if let Some(subscription) = self
                .subscription_repo
                .find_active_for_client(client.id)
                .await?
            {
                let days = renewal::expiration_days(subscription.end_date, today);
                if ExpiryBucket::classify(days, self.status.expiring_threshold_days)
                    == ExpiryBucket::Expiring
                {
                    expiring_this_week += 1;
                }
            }
        }

        let month_start = today.with_day(1).unwrap_or(today);
        let monthly_income_minor = self
            .payment_repo
            .sum_amount_between(month_start, today)
            .await?;

        Ok(DashboardStats {
            total_clients,
            active_clients,
            expiring_this_week,
            monthly_income_minor,
        })
    }

    async fn build_active_view(
        &self,
        subscription: SubscriptionEntity,
        today: chrono::NaiveDate,
        plan_cache: &mut HashMap<Uuid, PlanRef>,
    ) -> SubscriptionView {
        let days_until_expiration = renewal::expiration_days(subscription.end_date, today);
        let bucket =
            ExpiryBucket::classify(days_until_expiration, self.status.expiring_threshold_days);

        let plan = match plan_cache.get(&subscription.plan_id) {
            Some(cached) => cached.clone(),
            None => {
                let resolved = self.resolve_plan(subscription.plan_id).await;
                plan_cache.insert(subscription.plan_id, resolved.clone());
                resolved
            }
        };

        let next_payment_date = subscription.end_date;
        let mut snapshot = subscription;
        snapshot.payment_status =
            renewal::effective_payment_status(snapshot.payment_status, days_until_expiration);

        SubscriptionView::Active {
            subscription: snapshot,
            plan,
            days_until_expiration,
            bucket,
            next_payment_date,
        }
    }

    async fn resolve_plan(&self, plan_id: Uuid) -> PlanRef {
        match self.plan_repo.find_by_id(plan_id).await {
            Ok(Some(plan)) => PlanRef::Resolved(plan),
            Ok(None) => {
                warn!(%plan_id, "overview: subscription references a missing plan");
                PlanRef::Unavailable { plan_id }
            }
            Err(err) => {
                warn!(%plan_id, error = %err, "overview: plan lookup failed, degrading entry");
                PlanRef::Unavailable { plan_id }
            }
        }
    }
}
