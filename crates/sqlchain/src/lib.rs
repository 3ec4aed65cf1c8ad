//! # sqlchain
//!
//! A fluent, parameter-safe MySQL statement builder.
//!
//! ## Features
//!
//! - **Chainable**: every mutator consumes and returns the [`Builder`]
//! - **Parameterized**: values never enter the SQL text; they come back next to
//!   it as [`Value`]s, one per `?`, in order
//! - **Escaped identifiers**: `user.name as n` becomes `` `user`.`name` as `n` ``;
//!   wrap anything that must stay verbatim in [`raw`]
//! - **Sub-queries**: as tables, joins and conditions, with `tmp1`, `tmp2`, ...
//!   aliases unique across one statement
//! - **No I/O**: rendering is pure; hand the [`Statement`] to any MySQL driver
//!
//! ## Example
//!
//! ```
//! use sqlchain::prelude::*;
//!
//! # fn main() -> SqlResult<()> {
//! let mut users = Builder::new("user");
//!
//! // SELECT
//! let stmt = users
//!     .clone()
//!     .select("id,name")
//!     .where_eq("status", 1)
//!     .where_in("role", ["admin", "owner"])
//!     .order_desc("id")
//!     .limit(10)
//!     .to_sql()?;
//! assert_eq!(
//!     stmt.sql,
//!     "SELECT `id`,`name` FROM `user` WHERE `status` = ? AND `role` IN (?,?) ORDER BY `id` DESC LIMIT 10"
//! );
//! assert_eq!(stmt.params, values![1, "admin", "owner"]);
//!
//! // INSERT
//! let stmt = users.insert(record! { "name" => "alice", "age" => 18 })?;
//! assert_eq!(stmt.sql, "INSERT INTO `user` (`name`,`age`) VALUES(?,?)");
//!
//! // UPDATE
//! let stmt = Builder::new("user")
//!     .where_eq("id", 1)
//!     .update(record! { "status" => 0 })?;
//! assert_eq!(stmt.sql, "UPDATE `user` SET `status`=? WHERE `id` = ?");
//! assert_eq!(stmt.params, values![0, 1]);
//!
//! // DELETE
//! let stmt = Builder::new("user").where_eq("id", 1).delete()?;
//! assert_eq!(stmt.sql, "DELETE FROM `user` WHERE `id` = ?");
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod condition;
pub mod error;
pub mod ident;
pub mod prelude;
pub mod record;
pub mod statement;
pub mod value;

mod macros;
mod trace;

pub use builder::{Builder, IntoRows, JoinKind};
pub use condition::{Condition, Connector, Fragment, Operand};
pub use error::{SqlError, SqlResult};
pub use ident::{Field, IntoFields, Raw, escape_fields, escape_id, raw};
pub use record::Record;
pub use statement::{Statement, StatementKind};
pub use value::{ClauseKind, ParamBuckets, Value};
