use super::RetrievedChunk;

/// Wrap `query` with the retrieved context, or return it unchanged when
/// there is nothing to add
pub fn build_augmented_prompt(query: &str, chunks: &[RetrievedChunk]) -> String {
    if chunks.is_empty() {
        return query.to_string();
    }

    let context = chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| format!("[Source {}: {}]\n{}", i + 1, chunk.display_name(), chunk.content))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n");

    format!(
        "Use the following context from industrial documentation to answer the question.\n\
         If the context doesn't contain relevant information, use your general knowledge \
         but clearly indicate that it's not from the provided documentation.\n\n\
         CONTEXT:\n{}\n\n\
         QUESTION: {}\n\n\
         Answer with technical precision. Cite [Source N] when using context.",
        context, query
    )
}
