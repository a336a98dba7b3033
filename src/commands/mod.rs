pub mod files;
pub mod inference;
pub mod settings;
pub mod stats;
pub mod upload;

use crate::db::Database;
use crate::recognizer::ServiceConfig;

/// Resolve the service endpoint from the settings store. Cheap enough to do
/// per command; the lock is released before any request goes out.
pub(crate) fn resolve_service(db: &Database) -> ServiceConfig {
    ServiceConfig::new(db.server_url())
}
