//! The two fixed prompt templates. Queries and context are embedded
//! verbatim; the templates themselves never change at runtime.

/// Classification prompt: asks for exactly one category name.
pub fn classification_prompt(query: &str) -> String {
    format!(
        "You are a smart AI classifier for product manager queries. \
         Classify the following query into one of the following categories: \
         Feature, Insight, or Competitive. Respond with only the category name.\n\
         Input: \"{}\"\nCategory:",
        query
    )
}

/// Answer prompt: retrieved context block plus the original query.
pub fn answer_prompt(context: &str, query: &str) -> String {
    format!(
        "You are a helpful AI assistant for product managers.\n\n\
         Based on the following context, answer the user query in detail.\n\n\
         Context:\n{}\n\nQuery:\n{}\n\nAnswer:",
        context, query
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_prompt_embeds_query_verbatim() {
        let prompt = classification_prompt("should we build dark mode?");
        assert!(prompt.contains("Input: \"should we build dark mode?\""));
        assert!(prompt.contains("Feature, Insight, or Competitive"));
        assert!(prompt.ends_with("Category:"));
    }

    #[test]
    fn test_answer_prompt_places_context_before_query() {
        let prompt = answer_prompt("doc one\ndoc two", "what changed?");
        let context_at = prompt.find("Context:\ndoc one\ndoc two").unwrap();
        let query_at = prompt.find("Query:\nwhat changed?").unwrap();

        assert!(context_at < query_at);
        assert!(prompt.ends_with("Answer:"));
    }

    #[test]
    fn test_answer_prompt_with_empty_context() {
        // Zero retrieved documents is not an error; the block is just empty.
        let prompt = answer_prompt("", "anything");
        assert!(prompt.contains("Context:\n\n"));
    }
}
