pub mod error_code;
mod bazaar_error;
mod storage_error;

pub use bazaar_error::{BazaarError, BazaarResult};
pub use storage_error::StorageError;
