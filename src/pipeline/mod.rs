pub mod aggregator;
pub mod collector;
pub mod events;
pub mod orchestrator;
pub mod responder;

pub use aggregator::Aggregator;
pub use collector::Collector;
pub use events::{PipelineEvent, Stage};
pub use orchestrator::{Orchestrator, PipelineRun};
pub use responder::Responder;
