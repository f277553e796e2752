//! App Router
//!
//! Static segments are pushed before `{uuid}` so that names such as
//! `available` or `pending` never reach the uuid extractor.

use salvo::Router;

use crate::{auth, carts, categories, deliveries, notifications, orders, products};

/// Every API route, with authentication and staff guards applied.
pub(crate) fn app_router() -> Router {
    Router::new().push(public_router()).push(
        Router::new()
            .hoop(auth::middleware::handler)
            .push(user_router())
            .push(Router::new().hoop(auth::staff::handler).push(staff_router())),
    )
}

fn public_router() -> Router {
    Router::new()
        .push(
            Router::with_path("auth")
                .push(Router::with_path("register").post(auth::handlers::register::handler))
                .push(Router::with_path("login").post(auth::handlers::login::handler))
                .push(
                    Router::with_path("token")
                        .post(auth::handlers::token::handler)
                        .push(Router::with_path("refresh").post(auth::handlers::refresh::handler)),
                ),
        )
        .push(
            Router::with_path("categories")
                .get(categories::index::handler)
                .push(
                    Router::with_path("{slug}")
                        .get(categories::get::handler)
                        .push(Router::with_path("products").get(categories::products::handler)),
                ),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("available").get(products::available::handler))
                .push(Router::with_path("low_stock").get(products::low_stock::handler))
                .push(Router::with_path("{uuid}").get(products::get::handler)),
        )
}

fn user_router() -> Router {
    Router::new()
        .push(Router::with_path("auth/me").get(auth::handlers::me::handler))
        .push(
            Router::with_path("carts")
                .get(carts::current::handler)
                .post(carts::create::handler)
                .push(Router::with_path("current").get(carts::current::handler))
                .push(Router::with_path("add_item").post(carts::add_item::handler))
                .push(Router::with_path("update_item").put(carts::update_item::handler))
                .push(Router::with_path("remove_item").delete(carts::remove_item::handler))
                .push(Router::with_path("clear").delete(carts::clear::handler))
                .push(Router::with_path("summary").get(carts::summary::handler)),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(Router::with_path("pending").get(orders::pending::handler))
                .push(Router::with_path("recent").get(orders::recent::handler))
                .push(
                    Router::with_path("{uuid}")
                        .get(orders::get::handler)
                        .push(Router::with_path("confirm").post(orders::confirm::handler))
                        .push(Router::with_path("cancel").post(orders::cancel::handler)),
                ),
        )
        .push(
            Router::with_path("deliveries")
                .get(deliveries::index::handler)
                .push(Router::with_path("active").get(deliveries::active::handler))
                .push(Router::with_path("recent").get(deliveries::recent::handler))
                .push(Router::with_path("{uuid}").get(deliveries::get::handler)),
        )
        .push(
            Router::with_path("notifications")
                .get(notifications::index::handler)
                .push(Router::with_path("unread").get(notifications::unread::handler))
                .push(Router::with_path("recent").get(notifications::recent::handler))
                .push(
                    Router::with_path("mark_all_as_read")
                        .post(notifications::mark_all_as_read::handler),
                )
                .push(Router::with_path("clear_read").delete(notifications::clear_read::handler))
                .push(
                    Router::with_path("{uuid}")
                        .get(notifications::get::handler)
                        .delete(notifications::delete::handler)
                        .push(
                            Router::with_path("mark_as_read")
                                .post(notifications::mark_as_read::handler),
                        ),
                ),
        )
}

fn staff_router() -> Router {
    Router::new()
        .push(
            Router::with_path("categories")
                .post(categories::create::handler)
                .push(
                    Router::with_path("{slug}")
                        .put(categories::update::handler)
                        .delete(categories::delete::handler),
                ),
        )
        .push(
            Router::with_path("products")
                .post(products::create::handler)
                .push(
                    Router::with_path("{uuid}")
                        .put(products::update::handler)
                        .delete(products::delete::handler)
                        .push(Router::with_path("update_stock").post(products::update_stock::handler))
                        .push(
                            Router::with_path("toggle_availability")
                                .post(products::toggle_availability::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("orders/{uuid}/status").patch(orders::update_status::handler),
        )
        .push(
            Router::with_path("deliveries")
                .post(deliveries::create::handler)
                .push(
                    Router::with_path("{uuid}/update_status")
                        .post(deliveries::update_status::handler),
                ),
        )
        .push(
            Router::with_path("notifications")
                .push(
                    Router::with_path("send_promotion")
                        .post(notifications::send_promotion::handler),
                )
                .push(
                    Router::with_path("send_new_product")
                        .post(notifications::send_new_product::handler),
                ),
        )
}
