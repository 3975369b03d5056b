//! Shared types for the PG tenant portal
//!
//! Wire-level types used by the portal client: the `gofor` operation
//! discriminator, entity models returned by the remote data API, response
//! envelopes, the session context and notification payloads.

pub mod error;
pub mod gofor;
pub mod message;
pub mod models;
pub mod response;
pub mod session;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{FieldError, SessionError};
pub use gofor::Gofor;
pub use message::{NotificationLevel, NotificationPayload};
pub use models::SelectOption;
pub use response::{SubmitOutcome, UploadResponse};
pub use session::PortalSession;
