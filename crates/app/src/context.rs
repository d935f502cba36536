//! App Context

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::{
    ai::Enrichment,
    domain::{
        accounts::{AccountsService, StoreAccountsService},
        carts::{CartsService, StoreCartsService},
        credits::{CreditsService, StoreCreditsService},
        orders::{OrdersService, StoreOrdersService},
        platform::{PlatformService, StorePlatformService},
        videos::{PublishPolicy, StoreVideosService, VideosService},
        withdrawals::{StoreWithdrawalsService, WithdrawalsService},
    },
    storage::{JsonFileStorage, Storage, StorageError},
    store::Store,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to open the data directory")]
    Storage(#[from] StorageError),
}

#[derive(Clone)]
pub struct AppContext {
    pub accounts: Arc<dyn AccountsService>,
    pub videos: Arc<dyn VideosService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub withdrawals: Arc<dyn WithdrawalsService>,
    pub credits: Arc<dyn CreditsService>,
    pub platform: Arc<dyn PlatformService>,
    pub enrichment: Arc<dyn Enrichment>,
}

impl AppContext {
    /// Build the application context over a data directory on disk.
    ///
    /// # Errors
    ///
    /// Returns an error when the data directory cannot be created.
    pub fn from_data_dir(
        dir: impl AsRef<Path>,
        policy: PublishPolicy,
        enrichment: Arc<dyn Enrichment>,
    ) -> Result<Self, AppInitError> {
        let storage = Arc::new(JsonFileStorage::open(dir.as_ref())?);

        Ok(Self::from_storage(storage, policy, enrichment))
    }

    /// Build the application context over an arbitrary storage backend.
    #[must_use]
    pub fn from_storage(
        storage: Arc<dyn Storage>,
        policy: PublishPolicy,
        enrichment: Arc<dyn Enrichment>,
    ) -> Self {
        let store = Store::open(storage);

        Self {
            accounts: Arc::new(StoreAccountsService::new(store.clone())),
            videos: Arc::new(StoreVideosService::with_policy(store.clone(), policy)),
            carts: Arc::new(StoreCartsService::new(store.clone())),
            orders: Arc::new(StoreOrdersService::new(store.clone())),
            withdrawals: Arc::new(StoreWithdrawalsService::new(store.clone())),
            credits: Arc::new(StoreCreditsService::new(store.clone())),
            platform: Arc::new(StorePlatformService::new(store)),
            enrichment,
        }
    }
}
