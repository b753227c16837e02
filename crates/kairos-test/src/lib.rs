//! Kairos calendar service - integration test support.
//!
//! Re-exports the workspace crates so integration tests can use
//! `kairos_test::` paths.

#![allow(ambiguous_glob_reexports)]

pub mod component {
    pub use kairos_core::*;
    pub use kairos_db::{db, model};
    pub use kairos_service::*;

    // Config from both core and app
    pub mod config {
        pub use kairos_app::config::ConfigHandler;
        pub use kairos_core::config::*;
    }
}

pub mod app {
    pub use kairos_app::*;
}
