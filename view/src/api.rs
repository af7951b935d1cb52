//! Async access to the book API.
//!
//! `BookApi` is what the view depends on. `RestBookApi` implements it by
//! pairing the pure `BookClient` with a `Transport` that performs the
//! round-trip; `ReqwestTransport` is the production transport.

use async_trait::async_trait;
use book_core::{
    ApiError, Book, BookClient, BookInput, HttpMethod, HttpRequest, HttpResponse, Stats,
};

use crate::config::ViewConfig;
use crate::error::ViewError;

/// The seven operations of the book API.
#[async_trait]
pub trait BookApi: Send + Sync {
    async fn list_books(&self) -> Result<Vec<Book>, ApiError>;

    async fn stats(&self) -> Result<Stats, ApiError>;

    /// `query` is sent as given.
    async fn search_books(&self, query: &str) -> Result<Vec<Book>, ApiError>;

    async fn get_book(&self, id: i64) -> Result<Book, ApiError>;

    async fn create_book(&self, input: &BookInput) -> Result<Book, ApiError>;

    async fn update_book(&self, id: i64, input: &BookInput) -> Result<Book, ApiError>;

    async fn delete_book(&self, id: i64) -> Result<(), ApiError>;
}

/// Executes one HTTP exchange. Failures below HTTP are reported as
/// `ApiError::Transport`; any status code is returned as data.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// `BookApi` over any `Transport`.
#[derive(Debug, Clone)]
pub struct RestBookApi<T> {
    client: BookClient,
    transport: T,
}

impl<T: Transport> RestBookApi<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: BookClient::new(base_url),
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl RestBookApi<ReqwestTransport> {
    pub fn from_config(config: &ViewConfig) -> Result<Self, ViewError> {
        Ok(Self::new(&config.base_url, ReqwestTransport::new(config)?))
    }
}

#[async_trait]
impl<T: Transport> BookApi for RestBookApi<T> {
    async fn list_books(&self) -> Result<Vec<Book>, ApiError> {
        let response = self.transport.execute(self.client.build_list_books()).await?;
        self.client.parse_list_books(response)
    }

    async fn stats(&self) -> Result<Stats, ApiError> {
        let response = self.transport.execute(self.client.build_stats()).await?;
        self.client.parse_stats(response)
    }

    async fn search_books(&self, query: &str) -> Result<Vec<Book>, ApiError> {
        let response = self
            .transport
            .execute(self.client.build_search_books(query))
            .await?;
        self.client.parse_search_books(response)
    }

    async fn get_book(&self, id: i64) -> Result<Book, ApiError> {
        let response = self.transport.execute(self.client.build_get_book(id)).await?;
        self.client.parse_get_book(response)
    }

    async fn create_book(&self, input: &BookInput) -> Result<Book, ApiError> {
        let request = self.client.build_create_book(input)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_create_book(response)
    }

    async fn update_book(&self, id: i64, input: &BookInput) -> Result<Book, ApiError> {
        let request = self.client.build_update_book(id, input)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_update_book(response)
    }

    async fn delete_book(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .transport
            .execute(self.client.build_delete_book(id))
            .await?;
        self.client.parse_delete_book(response)
    }
}

/// Production transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ViewConfig) -> Result<Self, ViewError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        log::debug!("{} {}", request.method, request.url);

        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.http.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        log::debug!("{} {} -> {status}", request.method, request.url);
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
