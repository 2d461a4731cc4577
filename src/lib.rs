pub mod changelog;
pub mod client;
pub mod error;
pub mod field;
pub mod greenhopper;
pub mod models;
pub mod node;
pub mod pagination;
pub mod resource;
pub mod search;
pub mod transport;

pub use client::{Auth, DEFAULT_API_REVISION, HttpTransport, JiraClient, JiraConfig};
pub use error::{Error, Result};
pub use models::*;

// Agile board re-exports
pub use greenhopper::*;

// Materialization re-exports
pub use node::Node;
pub use resource::{Materialize, Resource, ResourceRef, materialize_many, materialize_one};

// Pagination re-exports
pub use changelog::filter_changelog;
pub use pagination::{Page, PageSource, collect_pages};
pub use transport::Transport;
