//! # lumen-app
//!
//! The interactive client. [`AppContext`] is built once at startup and owns
//! the configuration, the backend client, the shared file-state query, and the
//! notification center. [`Shell`] shows the splash, resolves the single route,
//! mounts [`HomePage`], and feeds it line commands.

pub mod context;
pub mod home;
pub mod notifications;
pub mod router;
pub mod shell;

pub use context::AppContext;
pub use home::{Command, CommandOutcome, FileView, HomePage, PredictPhase};
pub use notifications::{Notification, NotificationCenter, NotificationKind};
pub use router::{Route, Router};
pub use shell::Shell;
