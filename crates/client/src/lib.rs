//! Client for the Idealizador project/collaborator matching services.
//!
//! [`api::Services`] bundles one typed client per remote service;
//! [`controllers`] holds the per-screen state machines built on top of them.

pub mod api;
pub mod config;
pub mod controllers;
pub mod error;
pub mod http;
pub mod matching;
pub mod models;
pub mod session;
pub mod storage;

pub use api::Services;
pub use config::Config;
pub use error::{ClientError, Result};
pub use session::{Session, SessionStore};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
