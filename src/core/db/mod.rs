/// Database Module
///
/// The mapping engine, organized into focused submodules:
/// - **Schema Resolution** (`schema.rs`): table and column descriptors of a record type
/// - **Query Templates** (`template.rs`): `@TableName` / `@DatabaseName` expansion
/// - **Connection Management** (`connection.rs`): one connection per call, scoped cursors
/// - **Hydration** (`hydrate.rs`): result rows into typed records
/// - **Raw Results** (`query.rs`): un-hydrated rows as display text
///
/// All operations use the standardized `DbSetError` type for error propagation.
pub mod connection;
pub mod hydrate;
pub mod query;
pub mod schema;
pub mod template;

pub use connection::*;
pub use hydrate::*;
pub use query::*;
pub use schema::*;
pub use template::*;
