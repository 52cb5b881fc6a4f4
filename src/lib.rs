// SPDX-License-Identifier: MIT

//! PR Tracker: record a runner's profile and personal-best race times.
//!
//! This crate provides the backend API the tracker frontend talks to.
//! Session verification, table reads/writes and avatar storage are all
//! thin proxies over the managed provider's auth, table and object
//! storage APIs.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::TableStore;
use services::{AuthClient, StorageClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: TableStore,
    pub auth: AuthClient,
    pub storage: StorageClient,
}
