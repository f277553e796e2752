//! Send New Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    errors::ApiError,
    extensions::*,
    notifications::{BroadcastResponse, NewProductRequest, into_api_error},
    responses::Envelope,
    state::State,
};

/// Send New Product Handler
#[endpoint(
    tags("notifications"),
    summary = "Send New Product",
    security(("bearer_auth" = [])),
    status_codes(200, 400, 401, 403, 404, 500)
)]
pub(crate) async fn handler(
    json: JsonBody<NewProductRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<BroadcastResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let broadcast = state
        .app
        .notifications
        .send_new_product(json.into_inner().product_id.into())
        .await
        .map_err(into_api_error)?;

    tracing::info!(
        product_uuid = %broadcast.product,
        recipients = broadcast.recipients,
        "announced new product"
    );

    Ok(Envelope::json(
        format!("New product announced to {} users", broadcast.recipients),
        broadcast.into(),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use larder_app::domain::{
        notifications::{MockNotificationsService, records::Broadcast},
        products::records::ProductUuid,
    };

    use crate::test_helpers::{Mocks, STAFF, service_as};

    use super::*;

    #[tokio::test]
    async fn test_send_new_product_success() -> TestResult {
        let product = ProductUuid::new();

        let mut notifications = MockNotificationsService::new();

        notifications
            .expect_send_new_product()
            .once()
            .withf(move |uuid| *uuid == product)
            .return_once(move |_| {
                Ok(Broadcast {
                    product,
                    recipients: 0,
                })
            });

        let service = service_as(
            STAFF,
            Mocks {
                notifications,
                ..Mocks::default()
            },
            Router::with_path("notifications/send_new_product").post(handler),
        );

        let mut res = TestClient::post("http://example.com/notifications/send_new_product")
            .json(&json!({ "product_id": product.into_uuid() }))
            .send(&service)
            .await;

        let body: Envelope<BroadcastResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.product_uuid, product.into_uuid());
        assert_eq!(body.data.recipients, 0);

        Ok(())
    }
}
