mod api;
mod cart;
mod catalog;
mod config;
mod latch;
mod navigation;
mod router;
