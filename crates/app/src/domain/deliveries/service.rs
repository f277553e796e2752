//! Deliveries service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        deliveries::{
            data::{DeliveryScope, DeliveryStatusUpdate, NewDelivery},
            errors::DeliveriesServiceError,
            records::{DeliveryRecord, DeliveryUuid},
            repository::PgDeliveriesRepository,
        },
        notifications::{messages, repository::PgNotificationsRepository},
        orders::{
            lifecycle::transition, repositories::PgOrdersRepository,
            transitions::OrderTransitions,
        },
        users::records::UserUuid,
    },
};

/// How far back "recent" deliveries reach.
pub const RECENT_DELIVERY_DAYS: i32 = 7;

#[derive(Debug, Clone)]
pub struct PgDeliveriesService {
    db: Db,
    repository: PgDeliveriesRepository,
    orders: PgOrdersRepository,
    notifications: PgNotificationsRepository,
    transitions: OrderTransitions,
}

impl PgDeliveriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgDeliveriesRepository::new(),
            orders: PgOrdersRepository::new(),
            notifications: PgNotificationsRepository::new(),
            transitions: OrderTransitions::new(),
        }
    }

    async fn list(
        &self,
        user: UserUuid,
        scope: DeliveryScope,
    ) -> Result<Vec<DeliveryRecord>, DeliveriesServiceError> {
        let mut tx = self.db.begin().await?;

        let deliveries = self.repository.list_deliveries(&mut tx, user, scope).await?;

        tx.commit().await?;

        Ok(deliveries)
    }
}

#[async_trait]
impl DeliveriesService for PgDeliveriesService {
    async fn list_deliveries(
        &self,
        user: UserUuid,
    ) -> Result<Vec<DeliveryRecord>, DeliveriesServiceError> {
        self.list(user, DeliveryScope::default()).await
    }

    async fn get_delivery(
        &self,
        user: UserUuid,
        delivery: DeliveryUuid,
    ) -> Result<DeliveryRecord, DeliveriesServiceError> {
        let mut tx = self.db.begin().await?;

        let delivery = self
            .repository
            .get_delivery(&mut tx, delivery, Some(user))
            .await?;

        tx.commit().await?;

        Ok(delivery)
    }

    async fn active_deliveries(
        &self,
        user: UserUuid,
    ) -> Result<Vec<DeliveryRecord>, DeliveriesServiceError> {
        self.list(
            user,
            DeliveryScope {
                active_only: true,
                within_days: None,
            },
        )
        .await
    }

    async fn recent_deliveries(
        &self,
        user: UserUuid,
    ) -> Result<Vec<DeliveryRecord>, DeliveriesServiceError> {
        self.list(
            user,
            DeliveryScope {
                active_only: false,
                within_days: Some(RECENT_DELIVERY_DAYS),
            },
        )
        .await
    }

    async fn create_delivery(
        &self,
        delivery: NewDelivery,
    ) -> Result<DeliveryRecord, DeliveriesServiceError> {
        let mut tx = self.db.begin().await?;

        match self.orders.get_order(&mut tx, delivery.order, None).await {
            Ok(_) => {}
            Err(sqlx::Error::RowNotFound) => return Err(DeliveriesServiceError::OrderNotFound),
            Err(error) => return Err(error.into()),
        }

        self.repository
            .create_delivery(&mut tx, delivery.uuid, delivery.order)
            .await?;

        let created = self
            .repository
            .get_delivery(&mut tx, delivery.uuid, None)
            .await?;

        tx.commit().await?;

        info!(delivery = %created.uuid, order = %created.order.uuid, "delivery opened");

        Ok(created)
    }

    async fn update_status(
        &self,
        actor: UserUuid,
        delivery: DeliveryUuid,
        update: DeliveryStatusUpdate,
    ) -> Result<DeliveryRecord, DeliveriesServiceError> {
        let mut tx = self.db.begin().await?;

        let locked = self.repository.lock_delivery(&mut tx, delivery).await?;

        self.repository
            .set_status(&mut tx, delivery, update.status)
            .await?;

        let order = self
            .orders
            .lock_order(&mut tx, locked.order.uuid, None)
            .await?;

        self.notifications
            .notify_user(&mut tx, order.user_uuid, &messages::delivery_status(update.status))
            .await?;

        let nudge = update
            .status
            .order_nudge(order.status)
            .and_then(|target| transition(order.status, target).ok());

        if let Some(accepted) = nudge {
            self.transitions
                .apply(
                    &mut tx,
                    &order,
                    accepted,
                    Some(actor),
                    update.comment.as_deref(),
                )
                .await?;
        }

        let updated = self.repository.get_delivery(&mut tx, delivery, None).await?;

        tx.commit().await?;

        info!(
            delivery = %updated.uuid,
            from = %locked.status,
            to = %updated.status,
            "delivery status changed"
        );

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait DeliveriesService: Send + Sync {
    /// Deliveries of the user's orders.
    async fn list_deliveries(
        &self,
        user: UserUuid,
    ) -> Result<Vec<DeliveryRecord>, DeliveriesServiceError>;

    async fn get_delivery(
        &self,
        user: UserUuid,
        delivery: DeliveryUuid,
    ) -> Result<DeliveryRecord, DeliveriesServiceError>;

    /// Deliveries not yet delivered.
    async fn active_deliveries(
        &self,
        user: UserUuid,
    ) -> Result<Vec<DeliveryRecord>, DeliveriesServiceError>;

    /// Deliveries updated in the last [`RECENT_DELIVERY_DAYS`] days.
    async fn recent_deliveries(
        &self,
        user: UserUuid,
    ) -> Result<Vec<DeliveryRecord>, DeliveriesServiceError>;

    /// Start tracking an order, in preparation.
    async fn create_delivery(
        &self,
        delivery: NewDelivery,
    ) -> Result<DeliveryRecord, DeliveriesServiceError>;

    /// Set the delivery status, tell the customer and move the order along
    /// where the lifecycle allows it.
    async fn update_status(
        &self,
        actor: UserUuid,
        delivery: DeliveryUuid,
        update: DeliveryStatusUpdate,
    ) -> Result<DeliveryRecord, DeliveriesServiceError>;
}
