//! `x-request-id` handling.

use salvo::{http::header::HeaderValue, prelude::Response};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied id that is echoed back.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Correlates a request's logs, span and response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RequestId(String);

impl RequestId {
    /// Reuse the caller's id when it is usable, else mint a v7 uuid.
    pub(super) fn resolve(header: Option<String>) -> Self {
        header
            .map(|value| value.trim().to_string())
            .filter(|value| is_usable(value))
            .map_or_else(Self::generate, Self)
    }

    fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub(super) fn as_str(&self) -> &str {
        &self.0
    }

    pub(super) fn write_header(&self, res: &mut Response) {
        match HeaderValue::from_str(&self.0) {
            Ok(value) => {
                res.headers_mut().insert(REQUEST_ID_HEADER, value);
            }
            Err(source) => {
                warn!(request_id = %self.0, "request id is not a valid header value: {source}");
            }
        }
    }
}

fn is_usable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|byte| byte.is_ascii_graphic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_id_is_reused() {
        let id = RequestId::resolve(Some(" abc-123 ".to_string()));

        assert_eq!(id.as_str(), "abc-123");
    }

    #[test]
    fn blank_or_oversized_ids_are_replaced() {
        for header in [None, Some("   ".to_string()), Some("x".repeat(200))] {
            let id = RequestId::resolve(header);

            assert!(
                Uuid::parse_str(id.as_str()).is_ok(),
                "a fresh uuid should be generated"
            );
        }
    }

    #[test]
    fn id_is_echoed_in_response_header() {
        let mut res = Response::new();

        RequestId::resolve(Some("abc-123".to_string())).write_header(&mut res);

        assert_eq!(
            res.headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some("abc-123")
        );
    }
}
