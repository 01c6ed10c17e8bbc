//! Writing materialized files to disk.

mod transaction;

pub use transaction::{FileStatus, Report, Transaction, WriteAction};
