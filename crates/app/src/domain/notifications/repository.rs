//! Notifications Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    notifications::{
        messages::Draft,
        records::{NotificationRecord, NotificationUuid},
    },
    products::records::ProductUuid,
    rows::{try_get_count, try_get_timestamp},
    users::records::UserUuid,
};

const CREATE_NOTIFICATION_SQL: &str = include_str!("sql/create_notification.sql");
const BROADCAST_SQL: &str = include_str!("sql/broadcast.sql");
const NOTIFY_CART_HOLDERS_SQL: &str = include_str!("sql/notify_cart_holders.sql");
const LIST_NOTIFICATIONS_SQL: &str = include_str!("sql/list_notifications.sql");
const COUNT_UNREAD_SQL: &str = include_str!("sql/count_unread.sql");
const GET_NOTIFICATION_SQL: &str = include_str!("sql/get_notification.sql");
const MARK_AS_READ_SQL: &str = include_str!("sql/mark_as_read.sql");
const MARK_ALL_AS_READ_SQL: &str = include_str!("sql/mark_all_as_read.sql");
const CLEAR_READ_SQL: &str = include_str!("sql/clear_read.sql");
const DELETE_NOTIFICATION_SQL: &str = include_str!("sql/delete_notification.sql");

/// Which of a user's notifications to list.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct InboxScope {
    pub(crate) is_read: Option<bool>,
    pub(crate) within_days: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgNotificationsRepository;

impl PgNotificationsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn notify_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        draft: &Draft,
    ) -> Result<NotificationRecord, sqlx::Error> {
        query_as::<Postgres, NotificationRecord>(CREATE_NOTIFICATION_SQL)
            .bind(NotificationUuid::new().into_uuid())
            .bind(user.into_uuid())
            .bind(&draft.title)
            .bind(&draft.message)
            .fetch_one(&mut **tx)
            .await
    }

    /// Send to every active user. Returns the number of notifications created.
    pub(crate) async fn broadcast(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        draft: &Draft,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(BROADCAST_SQL)
            .bind(&draft.title)
            .bind(&draft.message)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Send to every user holding the product in an active cart.
    pub(crate) async fn notify_cart_holders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        draft: &Draft,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(NOTIFY_CART_HOLDERS_SQL)
            .bind(product.into_uuid())
            .bind(&draft.title)
            .bind(&draft.message)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_notifications(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        scope: InboxScope,
    ) -> Result<Vec<NotificationRecord>, sqlx::Error> {
        query_as::<Postgres, NotificationRecord>(LIST_NOTIFICATIONS_SQL)
            .bind(user.into_uuid())
            .bind(scope.is_read)
            .bind(scope.within_days)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_unread(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let row = query(COUNT_UNREAD_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        try_get_count(&row, "unread_count")
    }

    pub(crate) async fn get_notification(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        notification: NotificationUuid,
    ) -> Result<NotificationRecord, sqlx::Error> {
        query_as::<Postgres, NotificationRecord>(GET_NOTIFICATION_SQL)
            .bind(notification.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn mark_as_read(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        notification: NotificationUuid,
    ) -> Result<NotificationRecord, sqlx::Error> {
        query_as::<Postgres, NotificationRecord>(MARK_AS_READ_SQL)
            .bind(notification.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn mark_all_as_read(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(MARK_ALL_AS_READ_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_read(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_READ_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_notification(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        notification: NotificationUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_NOTIFICATION_SQL)
            .bind(notification.into_uuid())
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for NotificationRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: NotificationUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            title: row.try_get("title")?,
            message: row.try_get("message")?,
            is_read: row.try_get("is_read")?,
            created_at: try_get_timestamp(row, "created_at")?,
        })
    }
}
