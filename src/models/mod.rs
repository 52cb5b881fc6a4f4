// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod profile;
pub mod record;

pub use profile::Profile;
pub use record::{Distance, PersonalRecord};
