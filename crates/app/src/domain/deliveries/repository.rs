//! Deliveries Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    deliveries::{
        data::DeliveryScope,
        records::{DeliveryOrder, DeliveryRecord, DeliveryStatus, DeliveryUuid},
    },
    orders::records::OrderUuid,
    rows::{try_get_amount, try_get_parsed, try_get_timestamp},
    users::records::UserUuid,
};

const LIST_DELIVERIES_SQL: &str = include_str!("sql/list_deliveries.sql");
const GET_DELIVERY_SQL: &str = include_str!("sql/get_delivery.sql");
const LOCK_DELIVERY_SQL: &str = include_str!("sql/lock_delivery.sql");
const CREATE_DELIVERY_SQL: &str = include_str!("sql/create_delivery.sql");
const SET_DELIVERY_STATUS_SQL: &str = include_str!("sql/set_delivery_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgDeliveriesRepository;

impl PgDeliveriesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Deliveries of the user's orders, newest first.
    pub(crate) async fn list_deliveries(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        scope: DeliveryScope,
    ) -> Result<Vec<DeliveryRecord>, sqlx::Error> {
        query_as::<Postgres, DeliveryRecord>(LIST_DELIVERIES_SQL)
            .bind(user.into_uuid())
            .bind(scope.active_only)
            .bind(scope.within_days)
            .fetch_all(&mut **tx)
            .await
    }

    /// Fetch a delivery, restricted to the order owner when one is given.
    pub(crate) async fn get_delivery(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        delivery: DeliveryUuid,
        owner: Option<UserUuid>,
    ) -> Result<DeliveryRecord, sqlx::Error> {
        query_as::<Postgres, DeliveryRecord>(GET_DELIVERY_SQL)
            .bind(delivery.into_uuid())
            .bind(owner.map(UserUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn lock_delivery(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        delivery: DeliveryUuid,
    ) -> Result<DeliveryRecord, sqlx::Error> {
        query_as::<Postgres, DeliveryRecord>(LOCK_DELIVERY_SQL)
            .bind(delivery.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_delivery(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        delivery: DeliveryUuid,
        order: OrderUuid,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_DELIVERY_SQL)
            .bind(delivery.into_uuid())
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn set_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        delivery: DeliveryUuid,
        status: DeliveryStatus,
    ) -> Result<(), sqlx::Error> {
        query(SET_DELIVERY_STATUS_SQL)
            .bind(delivery.into_uuid())
            .bind(status.as_str())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for DeliveryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: DeliveryUuid::from_uuid(row.try_get("uuid")?),
            order: DeliveryOrder {
                uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
                order_number: row.try_get("order_number")?,
                status: try_get_parsed(row, "order_status")?,
                total_amount: try_get_amount(row, "total_amount")?,
            },
            status: try_get_parsed(row, "status")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
