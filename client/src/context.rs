//! Explicitly constructed application context.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything a page or hook needs (stores, HTTP client, services, query
//! client, notifier, poller) is built once here and passed by reference.
//! The CLI opens one per invocation; tests build one over memory storage.

use std::sync::Arc;

use tracing::info;

use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::notify::Notifier;
use crate::poll::scan_status::ScanStatusPoller;
use crate::query::client::QueryClient;
use crate::services::Services;
use crate::state::auth::AuthStore;
use crate::state::router::Router;
use crate::state::theme::{Theme, ThemeStore};
use crate::util::storage::{FileStorage, Storage, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

pub struct AppContext {
    pub config: ClientConfig,
    pub storage: Arc<dyn Storage>,
    pub auth: Arc<AuthStore>,
    pub theme: Arc<ThemeStore>,
    pub router: Arc<Router>,
    pub api: ApiClient,
    pub services: Services,
    pub queries: QueryClient,
    pub notifier: Arc<dyn Notifier>,
    pub poller: ScanStatusPoller,
}

impl AppContext {
    /// Build a context over `storage`, restoring auth and theme from it.
    pub fn new(
        config: ClientConfig,
        storage: Arc<dyn Storage>,
        notifier: Arc<dyn Notifier>,
        system_theme: Theme,
    ) -> Result<Self, ContextError> {
        let auth = Arc::new(AuthStore::restore(storage.clone())?);
        let theme = Arc::new(ThemeStore::restore(storage.clone(), system_theme)?);
        let router = Arc::new(Router::default());
        let api = ApiClient::new(&config, auth.clone(), router.clone())?;
        let services = Services::new(&api);
        let queries = QueryClient::new(notifier.clone());
        let poller = ScanStatusPoller::new(Arc::new(services.scans.clone()), notifier.clone(), config.scan_poll_interval)
            .with_query_client(queries.clone());

        info!(api_url = %config.api_url, authenticated = auth.is_authenticated(), "context: ready");
        Ok(Self { config, storage, auth, theme, router, api, services, queries, notifier, poller })
    }

    /// Build a context over the state file in `config.state_dir`.
    pub fn open(config: ClientConfig, notifier: Arc<dyn Notifier>, system_theme: Theme) -> Result<Self, ContextError> {
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(config.state_file())?);
        Self::new(config, storage, notifier, system_theme)
    }
}
