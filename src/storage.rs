//! On-disk persistence of the colleague list

pub mod store;

pub use store::{MAX_FILE_SIZE, Store, StoreError, TransactionError};
