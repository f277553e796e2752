//! Success envelopes.

use salvo::{oapi::ToSchema, prelude::Json};
use serde::{Deserialize, Serialize};

/// A single resource with a status message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct Envelope<T: ToSchema + 'static> {
    pub message: String,
    pub data: T,
}

impl<T: ToSchema + 'static> Envelope<T> {
    pub(crate) fn json(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            message: message.into(),
            data,
        })
    }
}

/// A list of resources with its length.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ListEnvelope<T: ToSchema + 'static> {
    pub message: String,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T: ToSchema + 'static> ListEnvelope<T> {
    pub(crate) fn json<I, R>(message: impl Into<String>, records: I) -> Json<Self>
    where
        I: IntoIterator<Item = R>,
        R: Into<T>,
    {
        let data: Vec<T> = records.into_iter().map(Into::into).collect();

        Json(Self {
            message: message.into(),
            count: data.len(),
            data,
        })
    }
}

/// Outcome of a bulk update.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdatedCount {
    pub message: String,
    pub updated_count: u64,
}

/// Outcome of a bulk delete.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeletedCount {
    pub message: String,
    pub deleted_count: u64,
}

/// A status message with no payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn json(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}
