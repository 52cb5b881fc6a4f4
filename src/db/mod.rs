//! Table store layer (provider REST API).

pub mod tables;

pub use tables::TableStore;

/// Table names as constants.
pub mod names {
    pub const PROFILES: &str = "profiles";
    pub const PERSONAL_RECORDS: &str = "personal_records";
}
