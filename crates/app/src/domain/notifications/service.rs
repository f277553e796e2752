//! Notifications service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        notifications::{
            errors::NotificationsServiceError,
            messages::{self, Draft},
            records::{Broadcast, NotificationInbox, NotificationRecord, NotificationUuid},
            repository::{InboxScope, PgNotificationsRepository},
        },
        products::{
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
        users::records::UserUuid,
    },
};

/// How far back "recent" notifications reach.
pub const RECENT_NOTIFICATION_DAYS: i32 = 7;

#[derive(Debug, Clone)]
pub struct PgNotificationsService {
    db: Db,
    repository: PgNotificationsRepository,
    products: PgProductsRepository,
}

impl PgNotificationsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgNotificationsRepository::new(),
            products: PgProductsRepository::new(),
        }
    }

    async fn list(
        &self,
        user: UserUuid,
        scope: InboxScope,
    ) -> Result<Vec<NotificationRecord>, NotificationsServiceError> {
        let mut tx = self.db.begin().await?;

        let notifications = self
            .repository
            .list_notifications(&mut tx, user, scope)
            .await?;

        tx.commit().await?;

        Ok(notifications)
    }

    async fn broadcast_about(
        &self,
        product: ProductUuid,
        draft: impl FnOnce(&ProductRecord) -> Draft + Send,
    ) -> Result<Broadcast, NotificationsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = match self.products.get_product(&mut tx, product).await {
            Ok(product) => product,
            Err(sqlx::Error::RowNotFound) => {
                return Err(NotificationsServiceError::ProductNotFound);
            }
            Err(error) => return Err(error.into()),
        };

        let recipients = self.repository.broadcast(&mut tx, &draft(&product)).await?;

        tx.commit().await?;

        info!(product = %product.uuid, recipients, "broadcast product notification");

        Ok(Broadcast {
            product: product.uuid,
            recipients,
        })
    }
}

#[async_trait]
impl NotificationsService for PgNotificationsService {
    async fn list_notifications(
        &self,
        user: UserUuid,
    ) -> Result<NotificationInbox, NotificationsServiceError> {
        let mut tx = self.db.begin().await?;

        let notifications = self
            .repository
            .list_notifications(&mut tx, user, InboxScope::default())
            .await?;

        let unread_count = self.repository.count_unread(&mut tx, user).await?;

        tx.commit().await?;

        Ok(NotificationInbox {
            notifications,
            unread_count,
        })
    }

    async fn unread_notifications(
        &self,
        user: UserUuid,
    ) -> Result<Vec<NotificationRecord>, NotificationsServiceError> {
        self.list(
            user,
            InboxScope {
                is_read: Some(false),
                within_days: None,
            },
        )
        .await
    }

    async fn recent_notifications(
        &self,
        user: UserUuid,
    ) -> Result<Vec<NotificationRecord>, NotificationsServiceError> {
        self.list(
            user,
            InboxScope {
                is_read: None,
                within_days: Some(RECENT_NOTIFICATION_DAYS),
            },
        )
        .await
    }

    async fn get_notification(
        &self,
        user: UserUuid,
        notification: NotificationUuid,
    ) -> Result<NotificationRecord, NotificationsServiceError> {
        let mut tx = self.db.begin().await?;

        let notification = self
            .repository
            .get_notification(&mut tx, user, notification)
            .await?;

        tx.commit().await?;

        Ok(notification)
    }

    async fn mark_as_read(
        &self,
        user: UserUuid,
        notification: NotificationUuid,
    ) -> Result<NotificationRecord, NotificationsServiceError> {
        let mut tx = self.db.begin().await?;

        let notification = self
            .repository
            .mark_as_read(&mut tx, user, notification)
            .await?;

        tx.commit().await?;

        Ok(notification)
    }

    async fn mark_all_as_read(&self, user: UserUuid) -> Result<u64, NotificationsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.mark_all_as_read(&mut tx, user).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn clear_read(&self, user: UserUuid) -> Result<u64, NotificationsServiceError> {
        let mut tx = self.db.begin().await?;

        let deleted = self.repository.clear_read(&mut tx, user).await?;

        tx.commit().await?;

        Ok(deleted)
    }

    async fn delete_notification(
        &self,
        user: UserUuid,
        notification: NotificationUuid,
    ) -> Result<(), NotificationsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_notification(&mut tx, user, notification)
            .await?;

        if rows_affected == 0 {
            return Err(NotificationsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn send_promotion(
        &self,
        product: ProductUuid,
        discount_percent: u8,
    ) -> Result<Broadcast, NotificationsServiceError> {
        if !(1..=100).contains(&discount_percent) {
            return Err(NotificationsServiceError::InvalidDiscount);
        }

        self.broadcast_about(product, |product| {
            messages::promotion(&product.name, discount_percent)
        })
        .await
    }

    async fn send_new_product(
        &self,
        product: ProductUuid,
    ) -> Result<Broadcast, NotificationsServiceError> {
        self.broadcast_about(product, |product| {
            messages::new_product(&product.name, product.price)
        })
        .await
    }
}

#[automock]
#[async_trait]
pub trait NotificationsService: Send + Sync {
    /// All of a user's notifications with the unread total.
    async fn list_notifications(
        &self,
        user: UserUuid,
    ) -> Result<NotificationInbox, NotificationsServiceError>;

    async fn unread_notifications(
        &self,
        user: UserUuid,
    ) -> Result<Vec<NotificationRecord>, NotificationsServiceError>;

    /// Notifications from the last week.
    async fn recent_notifications(
        &self,
        user: UserUuid,
    ) -> Result<Vec<NotificationRecord>, NotificationsServiceError>;

    async fn get_notification(
        &self,
        user: UserUuid,
        notification: NotificationUuid,
    ) -> Result<NotificationRecord, NotificationsServiceError>;

    async fn mark_as_read(
        &self,
        user: UserUuid,
        notification: NotificationUuid,
    ) -> Result<NotificationRecord, NotificationsServiceError>;

    /// Returns how many notifications changed.
    async fn mark_all_as_read(&self, user: UserUuid) -> Result<u64, NotificationsServiceError>;

    /// Delete every read notification. Returns how many were removed.
    async fn clear_read(&self, user: UserUuid) -> Result<u64, NotificationsServiceError>;

    async fn delete_notification(
        &self,
        user: UserUuid,
        notification: NotificationUuid,
    ) -> Result<(), NotificationsServiceError>;

    /// Tell every active user about a discount on a product.
    async fn send_promotion(
        &self,
        product: ProductUuid,
        discount_percent: u8,
    ) -> Result<Broadcast, NotificationsServiceError>;

    /// Tell every active user about a product.
    async fn send_new_product(
        &self,
        product: ProductUuid,
    ) -> Result<Broadcast, NotificationsServiceError>;
}
