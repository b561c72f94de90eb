//! Retriever implementations

mod fixed;

pub use fixed::FixedSourceRetriever;
