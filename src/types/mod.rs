//! Type definitions for cost-report

mod account;
mod error;
mod report;

pub use account::*;
pub use error::*;
pub use report::*;
