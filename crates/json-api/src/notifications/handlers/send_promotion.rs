//! Send Promotion Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    errors::ApiError,
    extensions::*,
    notifications::{BroadcastResponse, PromotionRequest, into_api_error, invalid_discount},
    responses::Envelope,
    state::State,
};

/// Send Promotion Handler
///
/// Notifies every active user of a discount on one product.
#[endpoint(
    tags("notifications"),
    summary = "Send Promotion",
    security(("bearer_auth" = [])),
    status_codes(200, 400, 401, 403, 404, 500)
)]
pub(crate) async fn handler(
    json: JsonBody<PromotionRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<BroadcastResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let discount_percent = u8::try_from(request.discount_percent)
        .ok()
        .filter(|discount| (1..=100).contains(discount))
        .ok_or_else(invalid_discount)?;

    let broadcast = state
        .app
        .notifications
        .send_promotion(request.product_id.into(), discount_percent)
        .await
        .map_err(into_api_error)?;

    tracing::info!(
        product_uuid = %broadcast.product,
        recipients = broadcast.recipients,
        discount_percent,
        "sent promotion"
    );

    Ok(Envelope::json(
        format!("Promotion sent to {} users", broadcast.recipients),
        broadcast.into(),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use larder_app::domain::{
        notifications::{MockNotificationsService, NotificationsServiceError, records::Broadcast},
        products::records::ProductUuid,
    };

    use crate::{
        errors::ErrorBody,
        test_helpers::{Mocks, STAFF, service_as},
    };

    use super::*;

    fn make_service(notifications: MockNotificationsService) -> Service {
        service_as(
            STAFF,
            Mocks {
                notifications,
                ..Mocks::default()
            },
            Router::with_path("notifications/send_promotion").post(handler),
        )
    }

    #[tokio::test]
    async fn test_send_promotion_success() -> TestResult {
        let product = ProductUuid::new();

        let mut notifications = MockNotificationsService::new();

        notifications
            .expect_send_promotion()
            .once()
            .withf(move |uuid, discount| *uuid == product && *discount == 15)
            .return_once(move |_, _| {
                Ok(Broadcast {
                    product,
                    recipients: 3,
                })
            });

        let mut res = TestClient::post("http://example.com/notifications/send_promotion")
            .json(&json!({ "product_id": product.into_uuid(), "discount": 15 }))
            .send(&make_service(notifications))
            .await;

        let body: Envelope<BroadcastResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.recipients, 3);
        assert_eq!(body.message, "Promotion sent to 3 users");

        Ok(())
    }

    #[tokio::test]
    async fn test_send_promotion_rejects_out_of_range_discount() -> TestResult {
        for discount in [0, 101, -5] {
            let mut res = TestClient::post("http://example.com/notifications/send_promotion")
                .json(&json!({
                    "product_id": ProductUuid::new().into_uuid(),
                    "discount_percent": discount,
                }))
                .send(&make_service(MockNotificationsService::new()))
                .await;

            let body: ErrorBody = res.take_json().await?;

            assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
            assert_eq!(body.error, "invalid_discount");
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_send_promotion_unknown_product_returns_404() -> TestResult {
        let mut notifications = MockNotificationsService::new();

        notifications
            .expect_send_promotion()
            .once()
            .return_once(|_, _| Err(NotificationsServiceError::ProductNotFound));

        let mut res = TestClient::post("http://example.com/notifications/send_promotion")
            .json(&json!({
                "product_id": ProductUuid::new().into_uuid(),
                "discount_percent": 10,
            }))
            .send(&make_service(notifications))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.error, "product_not_found");

        Ok(())
    }
}
