//! Commit history
//!
//! - `rev_list`: walks the single-parent chain from a starting commit
//! - `log_entry`: one record of the append-only commit log

pub mod log_entry;
pub mod rev_list;
