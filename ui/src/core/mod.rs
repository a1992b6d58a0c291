//! Platform-agnostic analytics engine. Nothing in here depends on Dioxus; the
//! presentation layer reads the derived views exposed by [`session`].

pub mod analysis;
pub mod compare;
pub mod config;
pub mod deaths;
pub mod error;
pub mod filename;
pub mod format;
pub mod freshness;
pub mod ladder;
pub mod platform;
pub mod range;
pub mod rates;
pub mod series;
pub mod session;
pub mod source;
pub mod storage;
pub mod timing;
pub mod view_state;
