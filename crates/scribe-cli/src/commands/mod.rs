//! Command implementations.

mod ask;
mod index;
mod query;

pub use ask::execute_ask;
pub use index::execute_index;
pub use query::execute_query;
