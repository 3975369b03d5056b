//! Portal Client - tenant portal client for PG buildings
//!
//! Talks to the portal's single `gofor` endpoint and drives the form logic
//! on top of it: cascading selections, file uploads and submissions.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod notify;
pub mod pages;
pub mod selection;
pub mod submit;
pub mod upload;

pub use api::PortalClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{NetworkPortalApi, PortalApi};
pub use notify::Notifier;
pub use pages::{Pages, ReviewSummary, ReviewsPage};

// Re-export shared types for convenience
pub use shared::{
    FieldError, Gofor, NotificationLevel, NotificationPayload, PortalSession, SelectOption,
};
