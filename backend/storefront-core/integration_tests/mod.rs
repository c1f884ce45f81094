mod helpers;

mod cart;
mod catalog;
mod checkout;
mod config;
mod error;
mod preferences;
mod router;
mod session;
mod storefront;
