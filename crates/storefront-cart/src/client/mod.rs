//! HTTP client for the storefront's AJAX cart endpoints.

mod origin;

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use storefront_core::AppConfig;

use crate::api::CartApi;
use crate::error::CartError;
use crate::types::{AddItem, AddItemsRequest, Cart, ChangeLineRequest};

pub use origin::extract_store_origin;

/// HTTP client for `/cart.js`, `/cart/add.js` and `/cart/change.js`.
///
/// Every non-2xx status is surfaced as [`CartError::UnexpectedStatus`].
/// Requests are never retried: a cart mutation that timed out may still
/// have been applied, so replaying it could double-add.
///
/// The client keeps a cookie store, so the cart session the store assigns
/// on the first request is reused for every later call.
pub struct CartClient {
    client: Client,
    base_url: Url,
}

impl CartClient {
    /// Creates a client for the store at `store_url` (any page URL of the
    /// store works; only its origin is kept).
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidStoreUrl`] if the origin cannot be extracted.
    /// - [`CartError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(store_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, CartError> {
        let base_url = extract_store_origin(store_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .cookie_store(true)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// See [`CartClient::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, CartError> {
        Self::new(
            &config.store_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// The store origin requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, CartError> {
        self.base_url
            .join(path)
            .map_err(|e| CartError::InvalidStoreUrl {
                store_url: self.base_url.to_string(),
                reason: format!("cannot resolve \"{path}\": {e}"),
            })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<T, CartError> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "cart endpoint returned non-success status");
            return Err(CartError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| CartError::Deserialize {
            context: format!("response from {}", url.path()),
            source: e,
        })
    }

    /// Reads the current cart snapshot from `GET /cart.js`.
    ///
    /// # Errors
    ///
    /// - [`CartError::UnexpectedStatus`] for any non-2xx status.
    /// - [`CartError::Http`] on network failure or timeout.
    /// - [`CartError::Deserialize`] if the body is not a cart snapshot.
    pub async fn get_cart(&self) -> Result<Cart, CartError> {
        let url = self.endpoint("cart.js")?;
        tracing::debug!(url = %url, "fetching cart");
        self.send_json(self.client.get(url.clone()), &url).await
    }

    /// Adds items through `POST /cart/add.js`.
    ///
    /// # Errors
    ///
    /// Same as [`CartClient::get_cart`].
    pub async fn add_items(&self, items: &[AddItem<'_>]) -> Result<Cart, CartError> {
        let url = self.endpoint("cart/add.js")?;
        let body = AddItemsRequest {
            items: items.to_vec(),
        };
        tracing::debug!(url = %url, lines = items.len(), "adding items to cart");
        self.send_json(self.client.post(url.clone()).json(&body), &url)
            .await
    }

    /// Sets the line `key` to an absolute `quantity` through
    /// `POST /cart/change.js`.
    ///
    /// # Errors
    ///
    /// Same as [`CartClient::get_cart`].
    pub async fn change_quantity(&self, key: &str, quantity: u32) -> Result<Cart, CartError> {
        let url = self.endpoint("cart/change.js")?;
        let body = ChangeLineRequest { id: key, quantity };
        tracing::debug!(url = %url, key, quantity, "changing cart line");
        self.send_json(self.client.post(url.clone()).json(&body), &url)
            .await
    }
}

impl CartApi for CartClient {
    fn fetch_cart(&self) -> impl Future<Output = Result<Cart, CartError>> + Send {
        self.get_cart()
    }

    fn add_variant(
        &self,
        variant_id: &str,
        quantity: u32,
    ) -> impl Future<Output = Result<Cart, CartError>> + Send {
        async move {
            self.add_items(&[AddItem {
                id: variant_id,
                quantity,
            }])
            .await
        }
    }

    fn change_line(
        &self,
        key: &str,
        quantity: u32,
    ) -> impl Future<Output = Result<Cart, CartError>> + Send {
        self.change_quantity(key, quantity)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
