pub mod aggregators;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod output;
pub mod records;
pub mod report;

#[cfg(test)]
pub mod test_utils;

pub use error::PipelineError;
