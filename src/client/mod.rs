//! Question bank clients.

mod bank_file;
mod jservice;
mod source;

pub use bank_file::*;
pub use jservice::*;
pub use source::*;
