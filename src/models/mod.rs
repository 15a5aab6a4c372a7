// Counter snapshot models

mod compression;
mod counters;

pub use compression::{CompChannel, CompressionCounters};
pub use counters::{LinkCounters, VjCounters};
