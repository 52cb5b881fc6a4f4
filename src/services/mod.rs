// SPDX-License-Identifier: MIT

//! Services module - provider API clients.

pub mod auth;
pub mod storage;

pub use auth::{AuthClient, ProviderUser, SessionTokens};
pub use storage::StorageClient;
