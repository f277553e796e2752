//! Current User Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    auth::{UserResponse, into_api_error},
    errors::ApiError,
    extensions::*,
    responses::Envelope,
    state::State,
};

/// Current User Handler
#[endpoint(
    tags("auth"),
    summary = "Current User",
    security(("bearer_auth" = [])),
    status_codes(200, 401, 500)
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Envelope<UserResponse>>, ApiError> {
    let identity = depot.identity_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .auth
        .current_user(identity.user)
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::json("User retrieved", user.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use larder_app::auth::{AuthServiceError, MockAuthService};

    use crate::test_helpers::{CUSTOMER, Mocks, make_user, public_service, service_as};

    use super::*;

    fn route() -> Router {
        Router::with_path("auth/me").get(handler)
    }

    #[tokio::test]
    async fn test_me_returns_the_signed_in_user() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_current_user()
            .once()
            .withf(|user| *user == CUSTOMER.user)
            .return_once(|user| Ok(make_user(user)));

        let service = service_as(
            CUSTOMER,
            Mocks {
                auth,
                ..Mocks::default()
            },
            route(),
        );

        let mut res = TestClient::get("http://example.com/auth/me")
            .send(&service)
            .await;

        let body: Envelope<UserResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.uuid, CUSTOMER.user.into_uuid());
        assert_eq!(body.data.username, "marie");
        assert!(!body.data.is_staff);

        Ok(())
    }

    #[tokio::test]
    async fn test_me_for_a_deactivated_user_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_current_user()
            .once()
            .return_once(|_| Err(AuthServiceError::InvalidToken));

        let service = service_as(
            CUSTOMER,
            Mocks {
                auth,
                ..Mocks::default()
            },
            route(),
        );

        let res = TestClient::get("http://example.com/auth/me")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_me_without_identity_returns_401() -> TestResult {
        let res = TestClient::get("http://example.com/auth/me")
            .send(&public_service(Mocks::default(), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
