//! Single-submission guard for authorization codes.

use super::AuthorizationCode;

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Codes this tab has already submitted (or discarded).
///
/// Lives for the whole tab, not one page load: a reload that still shows
/// an old code must not exchange it again.
#[derive(Debug, Default)]
pub struct ExchangeLatch {
    consumed: Mutex<HashSet<String>>,
}

impl ExchangeLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `code` for exchange.
    ///
    /// Check and insert happen under one lock. Returns true for exactly one
    /// caller per distinct code.
    pub fn claim(&self, code: &AuthorizationCode) -> bool {
        let mut consumed = self.consumed.lock().unwrap_or_else(PoisonError::into_inner);
        consumed.insert(code.expose().to_string())
    }

    pub fn is_consumed(&self, code: &AuthorizationCode) -> bool {
        let consumed = self.consumed.lock().unwrap_or_else(PoisonError::into_inner);
        consumed.contains(code.expose())
    }

    pub fn consumed_count(&self) -> usize {
        self.consumed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
