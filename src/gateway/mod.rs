//! Seams to the remote admin API.
//!
//! The console core never performs HTTP itself. Each view controller is
//! handed a [`RecordSource`] for its entity's raw payload; transport, retry
//! and timeout policy live behind that trait.

/// Canned in-memory gateway.
pub mod fixture;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::api::{Envelope, LoginRequest, LoginResponse, Resource};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{resource:?} request rejected ({status_code}): {message}")]
    Rejected {
        resource: Resource,
        status_code: u16,
        message: String,
    },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0:?} is not served by this gateway")]
    Unavailable(Resource),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Fetches every raw record of one resource.
#[async_trait]
pub trait RecordSource<R>: Send + Sync {
    async fn fetch(&self) -> GatewayResult<Vec<R>>;
}

/// `POST /Login` collaborator.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, request: LoginRequest) -> GatewayResult<LoginResponse>;
}

/// Decodes an enveloped list body and unwraps it.
pub fn decode_envelope<T: DeserializeOwned>(
    body: &str,
    resource: Resource,
) -> GatewayResult<Vec<T>> {
    let envelope: Envelope<Vec<T>> = serde_json::from_str(body)?;
    envelope.into_data(resource)
}
