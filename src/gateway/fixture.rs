//! In-memory gateway serving canned response bodies.

use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use hashbrown::HashMap;
use serde::Serialize;
use tracing::debug;

use crate::api::{
    Analytics, Envelope, LoginRequest, LoginResponse, RawBooking, RawCustomer, Resource,
};

use super::{AuthGateway, GatewayError, GatewayResult, RecordSource, decode_envelope};

enum Scripted {
    Body(String),
    TransportFailure(String),
}

/// Gateway answering from per-resource JSON bodies.
///
/// Bodies are decoded exactly as a network adapter would decode them, so a
/// failed envelope surfaces as [`GatewayError::Rejected`].
pub struct StaticGateway {
    responses: HashMap<Resource, Scripted>,
    calls: HashMap<Resource, AtomicUsize>,
    delay: Duration,
}

impl Default for StaticGateway {
    fn default() -> Self {
        let calls = [
            Resource::Bookings,
            Resource::Customers,
            Resource::Analytics,
            Resource::Login,
        ]
        .into_iter()
        .map(|r| (r, AtomicUsize::new(0)))
        .collect();

        Self {
            responses: HashMap::new(),
            calls,
            delay: Duration::ZERO,
        }
    }
}

impl StaticGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` verbatim for `resource`.
    pub fn with_body(mut self, resource: Resource, body: impl Into<String>) -> Self {
        self.responses.insert(resource, Scripted::Body(body.into()));
        self
    }

    /// Serves a successful envelope around `records`.
    pub fn with_records<T: Serialize>(
        self,
        resource: Resource,
        records: &[T],
    ) -> GatewayResult<Self> {
        let body = serde_json::to_string(&Envelope::success(records))?;
        Ok(self.with_body(resource, body))
    }

    /// Fails every request for `resource` at the transport level.
    pub fn with_transport_failure(
        mut self,
        resource: Resource,
        message: impl Into<String>,
    ) -> Self {
        self.responses
            .insert(resource, Scripted::TransportFailure(message.into()));
        self
    }

    /// Delays every response, simulating network latency.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of requests received for `resource`.
    pub fn calls(&self, resource: Resource) -> usize {
        self.calls
            .get(&resource)
            .map_or(0, |c| c.load(Ordering::SeqCst))
    }

    async fn respond(&self, resource: Resource) -> GatewayResult<&str> {
        if let Some(counter) = self.calls.get(&resource) {
            counter.fetch_add(1, Ordering::SeqCst);
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        debug!(?resource, "serving canned response");
        match self.responses.get(&resource) {
            Some(Scripted::Body(body)) => Ok(body.as_str()),
            Some(Scripted::TransportFailure(msg)) => Err(GatewayError::Transport(msg.clone())),
            None => Err(GatewayError::Unavailable(resource)),
        }
    }
}

#[async_trait]
impl RecordSource<RawBooking> for StaticGateway {
    async fn fetch(&self) -> GatewayResult<Vec<RawBooking>> {
        let body = self.respond(Resource::Bookings).await?;
        decode_envelope(body, Resource::Bookings)
    }
}

#[async_trait]
impl RecordSource<RawCustomer> for StaticGateway {
    async fn fetch(&self) -> GatewayResult<Vec<RawCustomer>> {
        let body = self.respond(Resource::Customers).await?;
        decode_envelope(body, Resource::Customers)
    }
}

#[async_trait]
impl RecordSource<Analytics> for StaticGateway {
    async fn fetch(&self) -> GatewayResult<Vec<Analytics>> {
        let body = self.respond(Resource::Analytics).await?;
        decode_envelope(body, Resource::Analytics)
    }
}

#[async_trait]
impl AuthGateway for StaticGateway {
    async fn login(&self, request: LoginRequest) -> GatewayResult<LoginResponse> {
        debug!(name = %request.name, "login request");
        let body = self.respond(Resource::Login).await?;
        Ok(serde_json::from_str(body)?)
    }
}
