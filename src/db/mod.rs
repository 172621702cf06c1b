pub mod connection;
pub mod schema;
pub mod reports;
pub mod analysis;

pub use connection::Database;
