//! Terminal dashboard for browsing MCU productions and tracking watch
//! progress.
//!
//! The catalog is loaded once at startup from a [`source::ProductionSource`],
//! arranged into phase groups by [`arrange::arrange`], and rendered by
//! [`ui::draw`]. Watched titles live in a [`store::WatchedStore`] backed by a
//! pluggable key-value [`store::StorageBackend`].

pub mod app;
pub mod arrange;
pub mod config;
pub mod error;
pub mod models;
pub mod source;
pub mod store;
pub mod ui;
