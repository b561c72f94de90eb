//! OpenAI-compatible chat-completions provider

mod openai;
mod transport;

pub use openai::OpenAiProvider;
pub use transport::{CompletionTransport, ReqwestTransport};
