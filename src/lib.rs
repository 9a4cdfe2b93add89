pub mod bootstrap;
pub mod fetch;
pub mod tables;

pub use bootstrap::initialize;
pub use fetch::{FetchError, HttpSource, RemoteSource};
pub use tables::PrefixTables;
