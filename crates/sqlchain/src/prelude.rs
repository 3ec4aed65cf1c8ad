//! Convenient imports for typical `sqlchain` usage.
//!
//! ```ignore
//! use sqlchain::prelude::*;
//! ```

pub use crate::{Builder, Condition, JoinKind, Record, SqlError, SqlResult, Statement, Value};
pub use crate::{Raw, raw};
pub use crate::{fields, record, values};
