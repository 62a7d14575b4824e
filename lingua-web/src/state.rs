//! Application state
//!
//! One state struct owning the configuration, the store, the user service,
//! the per-domain CRUD services, and the navigation tables. The view
//! dispatch table is validated against the route table before the server
//! accepts a request.

use crate::{
    auth::users::{UserService, UserStore},
    db::Database,
    services::{
        BillingService, CollectionsService, ContentService, ForumService, ScheduleService,
        SettingsService,
    },
    WebConfig, WebError, WebResult,
};
use lingua_app::{RouteTable, ViewRegistry};
use std::sync::Arc;
use tracing::info;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: WebConfig,
    /// Database handle
    pub db: Database,
    /// User service for authentication and the admin user screen
    pub user_service: UserService,
    /// Content management: languages, courses, dictionary, materials
    pub content: ContentService,
    /// Personal vocabulary and sentence collections
    pub collections: CollectionsService,
    /// Teacher schedules and private lessons
    pub schedule: ScheduleService,
    /// Forum categories, topics, posts
    pub forum: ForumService,
    /// Membership plans, subscriptions, payments
    pub billing: BillingService,
    /// System settings
    pub settings: SettingsService,
    /// View dispatch table
    pub views: Arc<ViewRegistry>,
    /// Client route table
    pub routes: Arc<RouteTable>,
}

impl AppState {
    /// Create a new application state
    pub async fn new(config: WebConfig) -> WebResult<Self> {
        let db = Database::new(&config.database_url).await?;

        let store = UserStore::new(db.pool().clone())
            .await
            .map_err(|e| WebError::Config(format!("Failed to initialize user store: {}", e)))?;
        let user_service = UserService::new(store);

        let views = ViewRegistry::platform();
        let routes = RouteTable::platform();
        views.validate(&routes).map_err(WebError::App)?;

        let pool = db.pool().clone();
        let state = Self {
            config,
            user_service,
            content: ContentService::new(pool.clone()),
            collections: CollectionsService::new(pool.clone()),
            schedule: ScheduleService::new(pool.clone()),
            forum: ForumService::new(pool.clone()),
            billing: BillingService::new(pool.clone()),
            settings: SettingsService::new(pool),
            views: Arc::new(views),
            routes: Arc::new(routes),
            db,
        };

        info!("Application state initialized successfully");
        Ok(state)
    }
}
