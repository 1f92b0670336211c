use bytes::Bytes;
use futures_util::future::BoxFuture;
use futures_util::stream::BoxStream;
use futures_util::{FutureExt, StreamExt};
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use super::error::TransportError;
use super::request::TranslationRequest;

/// Response body delivered incrementally.
pub type ByteStream = BoxStream<'static, Result<Bytes, TransportError>>;

/// Sends a translation request and hands back the response body.
///
/// Dropping the returned future or stream aborts the request.
pub trait Transport: Send + Sync {
    fn send<'a>(
        &'a self,
        request: &'a TranslationRequest,
    ) -> BoxFuture<'a, Result<ByteStream, TransportError>>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send<'a>(
        &'a self,
        request: &'a TranslationRequest,
    ) -> BoxFuture<'a, Result<ByteStream, TransportError>> {
        (**self).send(request)
    }
}

/// [`Transport`] over HTTP with reqwest.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn post(&self, request: &TranslationRequest) -> Result<ByteStream, TransportError> {
        let response = self
            .client
            .post(request.endpoint().clone())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(request.credential())
            .json(&request.body())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map_err(TransportError::from))
            .boxed())
    }
}

impl Transport for HttpTransport {
    fn send<'a>(
        &'a self,
        request: &'a TranslationRequest,
    ) -> BoxFuture<'a, Result<ByteStream, TransportError>> {
        self.post(request).boxed()
    }
}
