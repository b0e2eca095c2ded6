//! Assistant services: the completion gateway and the insight endpoints
//! built on it.

mod gateway;
mod insights;
mod prompts;

pub use gateway::AiGateway;
pub use insights::{InsightsError, InsightsResult, InsightsService};
