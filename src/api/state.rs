//! Application state for the Booking and Loyalty Engine API.

use std::sync::Arc;

use crate::front_desk::FrontDesk;
use crate::store::MemoryStore;

/// Shared application state.
///
/// Holds the front desk of the shop served by this process.
#[derive(Clone)]
pub struct AppState {
    desk: Arc<FrontDesk<MemoryStore>>,
}

impl AppState {
    /// Creates the application state around a front desk.
    pub fn new(desk: FrontDesk<MemoryStore>) -> Self {
        Self {
            desk: Arc::new(desk),
        }
    }

    /// Returns the front desk.
    pub fn desk(&self) -> &FrontDesk<MemoryStore> {
        &self.desk
    }
}
