//! Database schema and queries

pub mod cases;
pub mod documents;
pub mod init;
pub mod queries;
pub mod students;

pub use cases::*;
pub use documents::*;
pub use init::*;
pub use queries::*;
pub use students::*;

use crate::{Error, Result};
use uuid::Uuid;

/// Maximum number of rows returned by list endpoints
pub const LIST_LIMIT: i64 = 100;

pub(crate) fn parse_uuid(column: &'static str, value: &str) -> Result<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| Error::corrupt(column, value, e))
}
