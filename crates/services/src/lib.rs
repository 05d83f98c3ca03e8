//! # services
//!
//! The application core: project moderation, the like/comment layer,
//! session management, and notification dispatch. Everything here talks to
//! the outside world through the `domains` ports and is handed its
//! implementations once, at assembly time.

pub mod engagement;
pub mod moderation;
pub mod names;
pub mod notify;
pub mod session;

pub use engagement::{EngagementService, ItemEngagement, LikeToggle};
pub use moderation::ModerationService;
pub use notify::{Notifier, Toast, ToastKind};
pub use session::{CurrentUser, Session, SessionManager, SignupOutcome};
