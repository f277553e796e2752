//! Notification Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    errors::ApiError,
    extensions::*,
    notifications::{InboxEnvelope, into_api_error},
    state::State,
};

/// Notification Index Handler
///
/// Newest first, with the number of unread notifications.
#[endpoint(
    tags("notifications"),
    summary = "List Notifications",
    security(("bearer_auth" = [])),
    status_codes(200, 401, 500)
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<InboxEnvelope>, ApiError> {
    let identity = depot.identity_or_401()?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let inbox = state
        .app
        .notifications
        .list_notifications(identity.user)
        .await
        .map_err(into_api_error)?;

    Ok(InboxEnvelope::json("Notifications retrieved", inbox))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use larder_app::domain::notifications::{
        MockNotificationsService,
        records::{NotificationInbox, NotificationUuid},
    };

    use crate::test_helpers::{CUSTOMER, Mocks, make_notification, service_as};

    use super::*;

    #[tokio::test]
    async fn test_inbox_counts() -> TestResult {
        let mut notifications = MockNotificationsService::new();

        notifications
            .expect_list_notifications()
            .once()
            .withf(|user| *user == CUSTOMER.user)
            .return_once(|_| {
                Ok(NotificationInbox {
                    notifications: vec![
                        make_notification(NotificationUuid::new(), false),
                        make_notification(NotificationUuid::new(), true),
                        make_notification(NotificationUuid::new(), true),
                    ],
                    unread_count: 1,
                })
            });

        let service = service_as(
            CUSTOMER,
            Mocks {
                notifications,
                ..Mocks::default()
            },
            Router::with_path("notifications").get(handler),
        );

        let mut res = TestClient::get("http://example.com/notifications")
            .send(&service)
            .await;

        let body: InboxEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.count, 3);
        assert_eq!(body.unread_count, 1);

        Ok(())
    }
}
