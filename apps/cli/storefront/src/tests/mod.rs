mod checkout;
mod error;
mod logger;
