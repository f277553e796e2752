//! Applying accepted status changes.

use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::domain::{
    notifications::{messages, repository::PgNotificationsRepository},
    orders::{
        lifecycle::Transition,
        records::OrderRecord,
        repositories::{PgOrderHistoryRepository, PgOrdersRepository},
    },
    users::records::UserUuid,
};

/// Writes every effect of a [`Transition`] inside the caller's transaction.
#[derive(Debug, Clone, Default)]
pub(crate) struct OrderTransitions {
    orders: PgOrdersRepository,
    history: PgOrderHistoryRepository,
    notifications: PgNotificationsRepository,
}

impl OrderTransitions {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            orders: PgOrdersRepository::new(),
            history: PgOrderHistoryRepository::new(),
            notifications: PgNotificationsRepository::new(),
        }
    }

    /// Set the status, stamp milestones, return stock on cancellation, record
    /// history and tell the owner. `order` must be locked by the caller.
    pub(crate) async fn apply(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &OrderRecord,
        transition: Transition,
        actor: Option<UserUuid>,
        comment: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        self.orders.set_status(tx, order.uuid, &transition).await?;

        if transition.restores_stock {
            let restocked = self.orders.restore_stock(tx, order.uuid).await?;

            info!(order = %order.uuid, restocked, "returned order items to stock");
        }

        let comment = match comment.map(str::trim) {
            Some(comment) if !comment.is_empty() => comment.to_string(),
            _ => transition.default_comment(),
        };

        self.history
            .append(tx, order.uuid, transition.to, &comment, actor)
            .await?;

        self.notifications
            .notify_user(
                tx,
                order.user_uuid,
                &messages::order_status(&order.order_number, transition.to),
            )
            .await?;

        info!(
            order = %order.uuid,
            from = %transition.from,
            to = %transition.to,
            "order status changed"
        );

        Ok(())
    }
}
