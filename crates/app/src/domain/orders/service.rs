//! Orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rand::Rng;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        carts::repositories::{PgCartItemsRepository, PgCartsRepository},
        notifications::{messages, repository::PgNotificationsRepository},
        orders::{
            checkout::plan_checkout,
            data::{NewOrder, OrderFilter, OrderStatusUpdate},
            errors::OrdersServiceError,
            lifecycle::{OrderStatus, transition},
            pricing::{OrderTotals, order_number},
            records::{OrderHistoryRecord, OrderItemRecord, OrderRecord, OrderUuid},
            repositories::{
                OrderHeader, OrderListing, PgOrderHistoryRepository, PgOrderItemsRepository,
                PgOrdersRepository,
            },
            transitions::OrderTransitions,
        },
        products::repository::PgProductsRepository,
        users::records::UserUuid,
    },
};

/// How far back "recent" orders reach.
pub const RECENT_ORDER_DAYS: i32 = 30;

const ORDER_NUMBER_ATTEMPTS: usize = 10;

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    items: PgOrderItemsRepository,
    history: PgOrderHistoryRepository,
    carts: PgCartsRepository,
    cart_items: PgCartItemsRepository,
    products: PgProductsRepository,
    notifications: PgNotificationsRepository,
    transitions: OrderTransitions,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            items: PgOrderItemsRepository::new(),
            history: PgOrderHistoryRepository::new(),
            carts: PgCartsRepository::new(),
            cart_items: PgCartItemsRepository::new(),
            products: PgProductsRepository::new(),
            notifications: PgNotificationsRepository::new(),
            transitions: OrderTransitions::new(),
        }
    }

    /// Attach items and history to each order with one query apiece.
    async fn hydrate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut orders: Vec<OrderRecord>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        if orders.is_empty() {
            return Ok(orders);
        }

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let mut items: FxHashMap<OrderUuid, Vec<OrderItemRecord>> = FxHashMap::default();

        for item in self.items.get_order_items(tx, &uuids).await? {
            items.entry(item.order_uuid).or_default().push(item);
        }

        let mut history: FxHashMap<OrderUuid, Vec<OrderHistoryRecord>> = FxHashMap::default();

        for entry in self.history.get_order_history(tx, &uuids).await? {
            history.entry(entry.order_uuid).or_default().push(entry);
        }

        for order in &mut orders {
            order.items = items.remove(&order.uuid).unwrap_or_default();
            order.history = history.remove(&order.uuid).unwrap_or_default();
        }

        Ok(orders)
    }

    async fn hydrate_one(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        owner: Option<UserUuid>,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let order = self.orders.get_order(tx, order, owner).await?;

        self.hydrate(tx, vec![order])
            .await?
            .pop()
            .ok_or(OrdersServiceError::NotFound)
    }

    async fn list(
        &self,
        user: UserUuid,
        listing: OrderListing<'_>,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders.list_orders(&mut tx, user, listing).await?;
        let orders = self.hydrate(&mut tx, orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    /// Pick an order number nobody holds yet.
    async fn allocate_order_number(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<String, OrdersServiceError> {
        for _ in 0..ORDER_NUMBER_ATTEMPTS {
            let candidate = order_number(Timestamp::now(), rand::thread_rng().gen_range(0..1000));

            if !self.orders.order_number_taken(tx, &candidate).await? {
                return Ok(candidate);
            }
        }

        Err(OrdersServiceError::OrderNumberExhausted)
    }

    /// Lock an order and move it to `to`, recording `comment`.
    async fn change_status(
        &self,
        order: OrderUuid,
        owner: Option<UserUuid>,
        actor: UserUuid,
        to: OrderStatus,
        comment: Option<&str>,
        refuse: impl FnOnce(OrderStatus) -> Option<OrdersServiceError> + Send,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let locked = self.orders.lock_order(&mut tx, order, owner).await?;

        if let Some(error) = refuse(locked.status) {
            return Err(error);
        }

        let accepted = transition(locked.status, to)?;

        self.transitions
            .apply(&mut tx, &locked, accepted, Some(actor), comment)
            .await?;

        let order = self.hydrate_one(&mut tx, order, owner).await?;

        tx.commit().await?;

        Ok(order)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn list_orders(
        &self,
        user: UserUuid,
        filter: OrderFilter,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        self.list(
            user,
            OrderListing {
                filter: &filter,
                within_days: None,
            },
        )
        .await
    }

    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.hydrate_one(&mut tx, order, Some(user)).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let delivery = order.delivery.validated()?;

        let mut tx = self.db.begin().await?;

        let cart = self
            .carts
            .lock_active_cart(&mut tx, user)
            .await?
            .filter(|cart| cart.uuid == order.cart)
            .ok_or(OrdersServiceError::CartNotFound)?;

        let items = self.cart_items.get_cart_items(&mut tx, cart.uuid).await?;

        if items.is_empty() {
            return Err(OrdersServiceError::CartEmpty);
        }

        let product_uuids: Vec<_> = items.iter().map(|item| item.product_uuid).collect();
        let products = self.products.lock_products(&mut tx, &product_uuids).await?;

        let plan = plan_checkout(&items, &products)?;
        let totals = OrderTotals::compute(plan.line_totals(), order.shipping_cost)?;
        let number = self.allocate_order_number(&mut tx).await?;

        let created = self
            .orders
            .create_order(
                &mut tx,
                OrderHeader {
                    uuid: order.uuid,
                    user,
                    order_number: &number,
                    payment_method: order.payment_method,
                    delivery: &delivery,
                    totals,
                },
            )
            .await?;

        for line in &plan.lines {
            self.items
                .create_order_item(&mut tx, created.uuid, line)
                .await?;

            let taken = self
                .products
                .decrement_stock(&mut tx, line.product, line.quantity)
                .await?;

            if !taken {
                let available = products
                    .iter()
                    .find(|product| product.uuid == line.product)
                    .map_or(0, |product| product.stock);

                return Err(OrdersServiceError::InsufficientStock {
                    product: line.product,
                    available,
                });
            }
        }

        self.carts.deactivate_cart(&mut tx, cart.uuid).await?;

        self.history
            .append(&mut tx, created.uuid, OrderStatus::Pending, "Order created", Some(user))
            .await?;

        for depleted in &plan.depleted {
            if let Some(product) = products.iter().find(|product| product.uuid == *depleted) {
                let notified = self
                    .notifications
                    .notify_cart_holders(&mut tx, product.uuid, &messages::stock_out(&product.name))
                    .await?;

                info!(product = %product.uuid, notified, "sent stock-out alert");
            }
        }

        let placed = self.hydrate_one(&mut tx, created.uuid, Some(user)).await?;

        tx.commit().await?;

        info!(
            order = %placed.uuid,
            order_number = %placed.order_number,
            total_amount = placed.total_amount,
            "order placed"
        );

        Ok(placed)
    }

    async fn confirm_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        self.change_status(
            order,
            Some(user),
            user,
            OrderStatus::Confirmed,
            Some("Order confirmed by the customer"),
            |status| (status != OrderStatus::Pending).then_some(OrdersServiceError::AlreadyConfirmed),
        )
        .await
    }

    async fn cancel_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        self.change_status(
            order,
            Some(user),
            user,
            OrderStatus::Cancelled,
            Some("Order cancelled by the customer"),
            |status| {
                transition(status, OrderStatus::Cancelled)
                    .is_err()
                    .then_some(OrdersServiceError::CannotBeCancelled)
            },
        )
        .await
    }

    async fn update_status(
        &self,
        actor: UserUuid,
        order: OrderUuid,
        update: OrderStatusUpdate,
    ) -> Result<OrderRecord, OrdersServiceError> {
        self.change_status(
            order,
            None,
            actor,
            update.status,
            update.comment.as_deref(),
            |_| None,
        )
        .await
    }

    async fn pending_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let filter = OrderFilter {
            status: Some(OrderStatus::Pending),
            ..OrderFilter::default()
        };

        self.list(
            user,
            OrderListing {
                filter: &filter,
                within_days: None,
            },
        )
        .await
    }

    async fn recent_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let filter = OrderFilter::default();

        self.list(
            user,
            OrderListing {
                filter: &filter,
                within_days: Some(RECENT_ORDER_DAYS),
            },
        )
        .await
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// The user's orders with their items and history.
    async fn list_orders(
        &self,
        user: UserUuid,
        filter: OrderFilter,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Check out the user's active cart.
    ///
    /// Locks the cart's products, freezes each line, takes the units out of
    /// stock and retires the cart. Nothing is written unless every step
    /// succeeds.
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Confirm a pending order.
    async fn confirm_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Cancel an order and return its units to stock.
    async fn cancel_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Move any user's order to a new status on behalf of `actor`.
    async fn update_status(
        &self,
        actor: UserUuid,
        order: OrderUuid,
        update: OrderStatusUpdate,
    ) -> Result<OrderRecord, OrdersServiceError>;

    async fn pending_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Orders placed in the last [`RECENT_ORDER_DAYS`] days.
    async fn recent_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError>;
}
