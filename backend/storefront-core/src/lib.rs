pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod navigation;
pub mod preferences;
pub mod router;
pub mod session;
pub mod storefront;

#[cfg(test)]
mod tests;

pub use storefront::Storefront;

pub const STOREFRONT_LOCAL_HOSTNAME: &str = "0.0.0.0";
pub const DEFAULT_ENDPOINT_URL: &str =
    const_format::concatcp!("https://", STOREFRONT_LOCAL_HOSTNAME, ":8000");
pub const DEFAULT_BASE_URL: &str =
    const_format::concatcp!("https://", STOREFRONT_LOCAL_HOSTNAME, ":3000");
