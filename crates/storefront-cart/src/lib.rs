pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use api::CartApi;
pub use client::CartClient;
pub use error::CartError;
pub use types::{AddItem, AddItemsRequest, Cart, ChangeLineRequest, LineItem};
