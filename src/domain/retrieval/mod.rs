//! Retrieval-augmented generation domain
//!
//! Chunks returned by a [`Retriever`] become numbered context blocks in the
//! user prompt and source attributions on the analysed response.

mod chunk;
mod prompt;
mod retriever;

pub use chunk::RetrievedChunk;
pub use prompt::build_augmented_prompt;
pub use retriever::Retriever;

#[cfg(test)]
pub use retriever::mock::MockRetriever;
