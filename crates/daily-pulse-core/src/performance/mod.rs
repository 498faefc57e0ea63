pub mod advice;
pub mod input;
pub mod metrics;
pub mod pipeline;
