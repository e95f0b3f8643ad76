//! The seam between the product card and the remote cart.

use std::future::Future;
use std::sync::Arc;

use crate::error::CartError;
use crate::types::Cart;

/// Remote cart operations the product card depends on.
///
/// [`CartClient`](crate::CartClient) is the HTTP implementation; tests swap in
/// an in-memory fake.
pub trait CartApi: Send + Sync {
    /// Reads the current cart snapshot.
    fn fetch_cart(&self) -> impl Future<Output = Result<Cart, CartError>> + Send;

    /// Adds `quantity` units of `variant_id` to the cart.
    fn add_variant(
        &self,
        variant_id: &str,
        quantity: u32,
    ) -> impl Future<Output = Result<Cart, CartError>> + Send;

    /// Sets the line addressed by `key` to an absolute `quantity`.
    fn change_line(
        &self,
        key: &str,
        quantity: u32,
    ) -> impl Future<Output = Result<Cart, CartError>> + Send;
}

impl<T: CartApi> CartApi for Arc<T> {
    fn fetch_cart(&self) -> impl Future<Output = Result<Cart, CartError>> + Send {
        (**self).fetch_cart()
    }

    fn add_variant(
        &self,
        variant_id: &str,
        quantity: u32,
    ) -> impl Future<Output = Result<Cart, CartError>> + Send {
        (**self).add_variant(variant_id, quantity)
    }

    fn change_line(
        &self,
        key: &str,
        quantity: u32,
    ) -> impl Future<Output = Result<Cart, CartError>> + Send {
        (**self).change_line(key, quantity)
    }
}
