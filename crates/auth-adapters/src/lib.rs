//! # auth-adapters
//!
//! The two `AuthProvider` implementations: the hosted identity service's
//! password-grant endpoints, and a mock with fixed demo credentials for
//! running without any remote configuration.

pub mod mock;
pub mod remote;

pub use mock::MockAuth;
pub use remote::RemoteAuth;

use configs::StoreConfig;
use domains::{AuthProvider, Result};
use std::sync::Arc;

/// Picks the auth backend once, mirroring the store selection.
pub fn connect(config: Option<&StoreConfig>) -> Result<Arc<dyn AuthProvider>> {
    match config {
        Some(store_config) => Ok(Arc::new(RemoteAuth::new(store_config.clone())?)),
        None => Ok(Arc::new(MockAuth::default())),
    }
}
