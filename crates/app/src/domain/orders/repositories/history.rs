//! Order History Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::{
    orders::{
        lifecycle::OrderStatus,
        records::{OrderHistoryRecord, OrderHistoryUuid, OrderUuid},
    },
    rows::{try_get_parsed, try_get_timestamp},
    users::records::UserUuid,
};

const CREATE_ORDER_HISTORY_SQL: &str = include_str!("../sql/create_order_history.sql");
const GET_ORDER_HISTORY_SQL: &str = include_str!("../sql/get_order_history.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderHistoryRepository;

impl PgOrderHistoryRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn append(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
        comment: &str,
        actor: Option<UserUuid>,
    ) -> Result<OrderHistoryRecord, sqlx::Error> {
        query_as::<Postgres, OrderHistoryRecord>(CREATE_ORDER_HISTORY_SQL)
            .bind(OrderHistoryUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(status.as_str())
            .bind(comment)
            .bind(actor.map(UserUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await
    }

    /// History of all the given orders, oldest entry first.
    pub(crate) async fn get_order_history(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<OrderHistoryRecord>, sqlx::Error> {
        let uuids: Vec<Uuid> = orders.iter().map(|o| o.into_uuid()).collect();

        query_as::<Postgres, OrderHistoryRecord>(GET_ORDER_HISTORY_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderHistoryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderHistoryUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            status: try_get_parsed(row, "status")?,
            comment: row.try_get("comment")?,
            created_by: row
                .try_get::<Option<Uuid>, _>("created_by")?
                .map(UserUuid::from_uuid),
            created_at: try_get_timestamp(row, "created_at")?,
        })
    }
}
