//! Orders Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    orders::{
        data::{DeliveryAddress, OrderFilter},
        lifecycle::Transition,
        pricing::OrderTotals,
        records::{OrderRecord, OrderUuid, PaymentMethod},
    },
    rows::{
        amount_to_i64, try_get_amount, try_get_optional_timestamp, try_get_parsed,
        try_get_timestamp,
    },
    users::records::UserUuid,
};

const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("../sql/lock_order.sql");
const ORDER_NUMBER_TAKEN_SQL: &str = include_str!("../sql/order_number_taken.sql");
const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const SET_ORDER_STATUS_SQL: &str = include_str!("../sql/set_order_status.sql");
const RESTORE_STOCK_SQL: &str = include_str!("../sql/restore_stock.sql");

/// Columns written when an order is placed.
pub(crate) struct OrderHeader<'a> {
    pub(crate) uuid: OrderUuid,
    pub(crate) user: UserUuid,
    pub(crate) order_number: &'a str,
    pub(crate) payment_method: PaymentMethod,
    pub(crate) delivery: &'a DeliveryAddress,
    pub(crate) totals: OrderTotals,
}

/// Listing filter plus an optional age limit.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OrderListing<'a> {
    pub(crate) filter: &'a OrderFilter,
    pub(crate) within_days: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// A user's orders, without items or history.
    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        listing: OrderListing<'_>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let filter = listing.filter;

        let sql = format!(
            "{LIST_ORDERS_SQL}ORDER BY {}, o.uuid",
            filter.sort.order_by()
        );

        query_as::<Postgres, OrderRecord>(&sql)
            .bind(user.into_uuid())
            .bind(filter.status.map(|status| status.as_str()))
            .bind(filter.payment_method.map(PaymentMethod::as_str))
            .bind(filter.payment_status)
            .bind(listing.within_days)
            .fetch_all(&mut **tx)
            .await
    }

    /// Fetch an order, restricted to `owner` when one is given.
    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        owner: Option<UserUuid>,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(owner.map(UserUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await
    }

    /// Like [`Self::get_order`], holding a row lock until commit.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        owner: Option<UserUuid>,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(owner.map(UserUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn order_number_taken(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_number: &str,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(ORDER_NUMBER_TAKEN_SQL)
            .bind(order_number)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        header: OrderHeader<'_>,
    ) -> Result<OrderRecord, sqlx::Error> {
        let totals = header.totals;

        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(header.uuid.into_uuid())
            .bind(header.user.into_uuid())
            .bind(header.order_number)
            .bind(header.payment_method.as_str())
            .bind(&header.delivery.address)
            .bind(&header.delivery.city)
            .bind(&header.delivery.postal_code)
            .bind(&header.delivery.country)
            .bind(&header.delivery.phone)
            .bind(amount_to_i64(totals.subtotal, "subtotal")?)
            .bind(amount_to_i64(totals.tax_amount, "tax_amount")?)
            .bind(amount_to_i64(totals.shipping_cost, "shipping_cost")?)
            .bind(amount_to_i64(totals.total_amount, "total_amount")?)
            .fetch_one(&mut **tx)
            .await
    }

    /// Write the new status and stamp its milestone, if any.
    pub(crate) async fn set_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        transition: &Transition,
    ) -> Result<(), sqlx::Error> {
        query(SET_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(transition.to.as_str())
            .bind(transition.milestone.map(|milestone| milestone.as_str()))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Put every unit of the order back into stock.
    pub(crate) async fn restore_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(RESTORE_STOCK_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            order_number: row.try_get("order_number")?,
            status: try_get_parsed(row, "status")?,
            payment_method: try_get_parsed(row, "payment_method")?,
            payment_status: row.try_get("payment_status")?,
            delivery: DeliveryAddress {
                address: row.try_get("delivery_address")?,
                city: row.try_get("delivery_city")?,
                postal_code: row.try_get("delivery_postal_code")?,
                country: row.try_get("delivery_country")?,
                phone: row.try_get("delivery_phone")?,
            },
            subtotal: try_get_amount(row, "subtotal")?,
            tax_amount: try_get_amount(row, "tax_amount")?,
            shipping_cost: try_get_amount(row, "shipping_cost")?,
            total_amount: try_get_amount(row, "total_amount")?,
            items: Vec::new(),
            history: Vec::new(),
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
            confirmed_at: try_get_optional_timestamp(row, "confirmed_at")?,
            shipped_at: try_get_optional_timestamp(row, "shipped_at")?,
            delivered_at: try_get_optional_timestamp(row, "delivered_at")?,
        })
    }
}
