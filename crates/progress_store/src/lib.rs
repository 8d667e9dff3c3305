mod error;
mod paths;
mod schema;
mod store;

pub use error::ProgressStoreError;
pub use paths::{progress_file, progress_root};
pub use schema::{ProgressRecord, ProgressRecordType};
pub use store::ProgressStore;
