// SPDX-License-Identifier: MIT

//! Middleware modules (authentication gate, security headers).

pub mod auth;
pub mod security;

pub use auth::require_session;
