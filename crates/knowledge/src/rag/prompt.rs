//! Prompt builder: fixed two-part template, filled by string substitution.
//!
//! The system block is fixed text parameterized only by the library name
//! and language from configuration; it is never influenced by user input.
//! The user block carries the assembled context and the raw question. No
//! code execution, no retrieval happens inside the template.

/// Fixed phrase the model must use when the context lacks an answer.
/// Shared with tests so the contract stays in one place.
pub const NOT_FOUND_PHRASE: &str = "not found in the provided context";

/// The fixed prompt template for grounded answering.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    library: String,
    language: String,
}

impl PromptTemplate {
    pub fn new(library: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            library: library.into(),
            language: language.into(),
        }
    }

    /// System/role instruction block.
    pub fn system(&self) -> String {
        format!(
            "You are the dedicated technical support agent for the {language} library \
             \"{library}\". Answer accurately, based only on the provided context \
             (source code and documentation).\n\
             \n\
             Follow these guidelines strictly:\n\
             1. Language restriction: code samples must be written in {language}. \
             No other programming language is allowed.\n\
             2. Accuracy: use the exact function names, arguments, and return values \
             from the provided code. Never invent functions that do not exist.\n\
             3. Completeness: when asked for code, provide a complete, compilable \
             example.\n\
             4. Citations: when the context includes the relevant file name \
             (e.g. README.md), mention it in your answer.\n\
             5. Honesty: if the answer is {not_found}, say exactly that instead of \
             guessing.\n",
            language = self.language,
            library = self.library,
            not_found = NOT_FOUND_PHRASE,
        )
    }

    /// User-turn block: assembled context plus the raw question.
    pub fn user(&self, context: &str, question: &str) -> String {
        format!(
            "Answer the question by referring to the context below.\n\
             \n\
             [Context]\n\
             {context}\n\
             \n\
             [Question]\n\
             {question}"
        )
    }
}
