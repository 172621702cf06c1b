pub mod report;
pub mod analysis;
pub mod chat;

pub use report::*;
pub use analysis::*;
pub use chat::*;
