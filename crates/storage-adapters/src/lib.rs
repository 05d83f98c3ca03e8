//! # storage-adapters
//!
//! The two implementations of the store ports: `RemoteStore`, a client for
//! the hosted relational service's REST surface, and `MockStore`, the
//! in-memory stand-in used when credentials are absent or placeholders.
//! `connect` performs the one-shot selection; nothing downstream ever
//! branches on which backend came back.

pub mod mock;
pub mod remote;

pub use mock::{demo_projects, MockStore};
pub use remote::RemoteStore;

use configs::StoreConfig;
use domains::{EngagementStore, ProfileStore, ProjectStore, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// The assembled store ports, whichever backend is behind them.
#[derive(Clone)]
pub struct Stores {
    pub projects: Arc<dyn ProjectStore>,
    pub engagement: Arc<dyn EngagementStore>,
    pub profiles: Arc<dyn ProfileStore>,
}

/// Selects the backend once, at startup. Remote failures later on surface
/// as `Backend` errors — there is no silent mid-session fallback to the
/// mock, which would mask an outage as success.
pub fn connect(config: Option<&StoreConfig>) -> Result<Stores> {
    match config {
        Some(store_config) => {
            info!(base_url = %store_config.base_url, "using the remote store");
            let remote = Arc::new(RemoteStore::new(store_config.clone())?);
            Ok(Stores {
                projects: remote.clone(),
                engagement: remote.clone(),
                profiles: remote,
            })
        }
        None => {
            warn!("store credentials missing or placeholders — running on the in-memory mock store");
            warn!("data will not survive a restart; demo logins: admin@naedex.com / admin123");
            let mock = Arc::new(MockStore::new());
            Ok(Stores {
                projects: mock.clone(),
                engagement: mock.clone(),
                profiles: mock,
            })
        }
    }
}
