//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use larder_app::{
    auth::{Identity, MockAuthService},
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            records::{CartItemRecord, CartItemUuid, CartRecord, CartUuid},
        },
        categories::{
            MockCategoriesService,
            records::{CategoryRecord, CategoryUuid},
        },
        deliveries::{
            MockDeliveriesService,
            records::{DeliveryOrder, DeliveryRecord, DeliveryStatus, DeliveryUuid},
        },
        notifications::{
            MockNotificationsService,
            records::{NotificationRecord, NotificationUuid},
        },
        orders::{
            MockOrdersService,
            data::DeliveryAddress,
            lifecycle::OrderStatus,
            records::{OrderRecord, OrderUuid, PaymentMethod},
        },
        products::{
            MockProductsService,
            records::{ProductOrigin, ProductRecord, ProductUuid},
        },
        users::records::{UserRecord, UserUuid},
    },
};

use crate::{extensions::*, state::State};

pub(crate) const CUSTOMER: Identity = Identity {
    user: UserUuid::from_uuid(Uuid::nil()),
    is_staff: false,
};

pub(crate) const STAFF: Identity = Identity {
    user: UserUuid::from_uuid(Uuid::from_u128(1)),
    is_staff: true,
};

/// One mock per service. A mock without expectations fails the test on any
/// call, so only the services a handler should touch get expectations.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) auth: MockAuthService,
    pub(crate) categories: MockCategoriesService,
    pub(crate) products: MockProductsService,
    pub(crate) carts: MockCartsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) deliveries: MockDeliveriesService,
    pub(crate) notifications: MockNotificationsService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            auth: Arc::new(self.auth),
            categories: Arc::new(self.categories),
            products: Arc::new(self.products),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            deliveries: Arc::new(self.deliveries),
            notifications: Arc::new(self.notifications),
        })
    }
}

pub(crate) struct InjectIdentity(Identity);

#[salvo::handler]
impl InjectIdentity {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_identity(self.0);
        ctrl.call_next(req, depot, res).await;
    }
}

pub(crate) fn inject_identity(identity: Identity) -> InjectIdentity {
    InjectIdentity(identity)
}

/// Serve `route` with the mocks and no signed-in user.
pub(crate) fn public_service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
}

/// Serve `route` with the mocks and `identity` already authenticated.
pub(crate) fn service_as(identity: Identity, mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject_identity(identity))
            .push(route),
    )
}

pub(crate) fn make_user(uuid: UserUuid) -> UserRecord {
    UserRecord {
        uuid,
        email: "marie@example.com".to_string(),
        username: "marie".to_string(),
        first_name: "Marie".to_string(),
        last_name: "Curie".to_string(),
        phone: String::new(),
        is_active: true,
        is_staff: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_category(name: &str, slug: &str) -> CategoryRecord {
    CategoryRecord {
        uuid: CategoryUuid::new(),
        name: name.to_string(),
        slug: slug.to_string(),
        product_count: 0,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        category_uuid: CategoryUuid::from_uuid(Uuid::nil()),
        category_name: "Fruits".to_string(),
        name: "Apples".to_string(),
        slug: "apples".to_string(),
        description: "Crisp local apples".to_string(),
        origin: ProductOrigin::Local,
        price: 250,
        stock: 12,
        is_available: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_cart(uuid: CartUuid, user: UserUuid, items: Vec<CartItemRecord>) -> CartRecord {
    CartRecord {
        uuid,
        user_uuid: user,
        is_active: true,
        items,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart_item(
    cart: CartUuid,
    product: ProductUuid,
    price: u64,
    quantity: u32,
) -> CartItemRecord {
    CartItemRecord {
        uuid: CartItemUuid::new(),
        cart_uuid: cart,
        product_uuid: product,
        product_name: "Apples".to_string(),
        product_price: price,
        quantity,
        added_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(uuid: OrderUuid, user: UserUuid, status: OrderStatus) -> OrderRecord {
    OrderRecord {
        uuid,
        user_uuid: user,
        order_number: "CMD20250101120000001".to_string(),
        status,
        payment_method: PaymentMethod::Card,
        payment_status: false,
        delivery: DeliveryAddress {
            address: "12 rue des Lilas".to_string(),
            city: "Lyon".to_string(),
            postal_code: "69001".to_string(),
            country: "France".to_string(),
            phone: "0601020304".to_string(),
        },
        subtotal: 1_000,
        tax_amount: 200,
        shipping_cost: 500,
        total_amount: 1_700,
        items: Vec::new(),
        history: Vec::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        confirmed_at: None,
        shipped_at: None,
        delivered_at: None,
    }
}

pub(crate) fn make_delivery(uuid: DeliveryUuid, status: DeliveryStatus) -> DeliveryRecord {
    DeliveryRecord {
        uuid,
        order: DeliveryOrder {
            uuid: OrderUuid::new(),
            order_number: "CMD20250101120000001".to_string(),
            status: OrderStatus::Confirmed,
            total_amount: 1_700,
        },
        status,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_notification(uuid: NotificationUuid, is_read: bool) -> NotificationRecord {
    NotificationRecord {
        uuid,
        user_uuid: CUSTOMER.user,
        title: "Order confirmed".to_string(),
        message: "Your order CMD20250101120000001 is confirmed".to_string(),
        is_read,
        created_at: Timestamp::UNIX_EPOCH,
    }
}
