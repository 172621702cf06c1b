pub mod banner;
pub mod commands;
pub mod completer;
pub mod progress;
pub mod renderer;
pub mod session;

pub use progress::spawn_progress;
pub use session::ReplSession;
