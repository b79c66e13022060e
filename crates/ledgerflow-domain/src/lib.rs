//! ledgerflow-domain
//!
//! Pure domain models (Account, Category, Transaction, Budget, Event, State).
//! No I/O, no services, no storage. Only immutable data types and identity.

pub mod account;
pub mod budget;
pub mod category;
pub mod common;
pub mod event;
pub mod state;
pub mod transaction;

pub use account::*;
pub use budget::*;
pub use category::*;
pub use common::*;
pub use event::*;
pub use state::*;
pub use transaction::*;
