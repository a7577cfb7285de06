pub mod audit;
mod chrome_finder;
pub mod config;
mod error;
pub mod probe;
mod profile;
pub mod screenshot;
pub mod scripts;
pub mod session;

pub use audit::{LocalAuditor, RemoteAuditor, auditor_for};
pub use chrome_finder::ChromeFinder;
pub use config::{AuditConfig, Backend, SessionConfig, Viewport};
pub use error::{Error, Result};
pub use probe::ChromePage;
pub use profile::SessionProfile;
pub use screenshot::LocalScreenshotStore;
pub use session::BrowserSession;
