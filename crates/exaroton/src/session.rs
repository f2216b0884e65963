//! The shared session: transport, configuration, and bearer token.
//!
//! Every entity that can issue requests holds an `Arc<Session<T>>`, so a
//! token change through the client is seen by all of them. The token is
//! read once when a request is built; a request already on its way keeps
//! the header it was built with.
//!
//! Responses are checked in one of three ways:
//!
//! - **enveloped**: decode `{success, error, data}` and require `data`
//! - **acknowledged**: decode the envelope and require no `error`
//! - **raw**: require `200 OK`, hand back the body untouched

use exaroton_protocol::{ApiError, Codec, Envelope, JsonCodec};
use exaroton_transport::{HttpRequest, HttpResponse, HttpTransport};
use parking_lot::RwLock;
use serde::de::{DeserializeOwned, IgnoredAny};

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::ExarotonError;

/// State shared by a client and every entity it hands out.
pub struct Session<T> {
    transport: T,
    config: ClientConfig,
    token: RwLock<String>,
    codec: JsonCodec,
}

impl<T: HttpTransport> Session<T> {
    pub(crate) fn new(transport: T, config: ClientConfig, token: String) -> Self {
        Self {
            transport,
            config,
            token: RwLock::new(token),
            codec: JsonCodec,
        }
    }

    pub(crate) fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn codec(&self) -> &JsonCodec {
        &self.codec
    }

    pub(crate) fn token(&self) -> String {
        self.token.read().clone()
    }

    pub(crate) fn set_token(&self, token: String) {
        *self.token.write() = token;
    }

    /// Headers every request and websocket handshake carries.
    pub(crate) fn default_headers(&self) -> Vec<(String, String)> {
        vec![
            ("Authorization".to_string(), format!("Bearer {}", self.token())),
            ("User-Agent".to_string(), self.config.user_agent.clone()),
        ]
    }

    fn build(&self, endpoint: Endpoint) -> (HttpRequest, String) {
        let Endpoint {
            method,
            path,
            operation,
            body,
            content_type,
        } = endpoint;

        let mut headers = self.default_headers();
        if let Some(content_type) = content_type {
            headers.push(("Content-Type".to_string(), content_type.to_string()));
        }

        let request = HttpRequest {
            method,
            url: format!("{}{}", self.config.base_url(), path),
            headers,
            body,
        };
        (request, operation)
    }

    async fn send(&self, endpoint: Endpoint) -> Result<(HttpResponse, String), ExarotonError> {
        let (request, operation) = self.build(endpoint);
        tracing::debug!(method = %request.method, url = %request.url, "dispatching request");
        let response = self.transport.send(request).await?;
        tracing::debug!(status = response.status, operation = %operation, "response received");
        Ok((response, operation))
    }

    /// Issues `endpoint` and unwraps the envelope's payload.
    ///
    /// # Errors
    /// `Api` for a non-2xx status or a missing payload, `Protocol` if the
    /// body isn't a valid envelope, `Transport` if the call never completed.
    pub(crate) async fn enveloped<D: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
    ) -> Result<D, ExarotonError> {
        let (response, operation) = self.send(endpoint).await?;
        let status = response.status;
        let success = response.is_success();
        let body = response.bytes().await?;
        if !success {
            return Err(self.status_error(&operation, status, &body).into());
        }

        let envelope: Envelope<D> = self.codec.decode_envelope(&body)?;
        Ok(envelope.into_data(&operation)?)
    }

    /// Issues `endpoint` and checks that the API acknowledged it.
    pub(crate) async fn acknowledged(&self, endpoint: Endpoint) -> Result<(), ExarotonError> {
        let (response, operation) = self.send(endpoint).await?;
        let status = response.status;
        let success = response.is_success();
        let body = response.bytes().await?;
        if !success {
            return Err(self.status_error(&operation, status, &body).into());
        }

        let envelope: Envelope<IgnoredAny> = self.codec.decode_envelope(&body)?;
        Ok(envelope.acknowledge(&operation)?)
    }

    /// Issues `endpoint` and returns the response if it is `200 OK`.
    ///
    /// Any other status fails; the body of a failed response is dropped
    /// unread.
    pub(crate) async fn raw(&self, endpoint: Endpoint) -> Result<HttpResponse, ExarotonError> {
        let (response, operation) = self.send(endpoint).await?;
        if !response.is_ok() {
            return Err(ApiError::new(operation, None)
                .with_status(response.status)
                .into());
        }
        Ok(response)
    }

    /// Builds the error for a non-2xx enveloped response, keeping the
    /// server's message when the body is still an envelope.
    fn status_error(&self, operation: &str, status: u16, body: &[u8]) -> ApiError {
        let message = self
            .codec
            .decode_envelope::<IgnoredAny>(body)
            .ok()
            .and_then(|envelope| envelope.error);
        ApiError::new(operation, message).with_status(status)
    }
}
