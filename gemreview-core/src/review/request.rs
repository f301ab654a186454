//! Review request and prompt generation
//!
//! A review request pairs the submitted source text with its language. The
//! prompt asks the model to cover a fixed list of focus areas and embeds the
//! code verbatim in a fenced block.

use serde::{Deserialize, Serialize};

use super::Language;

/// Areas the model is asked to comment on, in order
pub const FOCUS_AREAS: [&str; 5] = [
    "Code correctness and potential bugs",
    "Code style and readability",
    "Potential performance issues",
    "Security vulnerabilities (if applicable)",
    "Best practices and suggestions for improvement",
];

/// Sampling parameters sent with every review
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl GenerationParams {
    /// Parameters used for code reviews
    pub const REVIEW: GenerationParams = GenerationParams {
        temperature: 0.7,
        top_p: 1.0,
        top_k: 1,
        max_output_tokens: 2048,
    };
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::REVIEW
    }
}

/// A single review request, built per review action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// Source text exactly as submitted
    pub code: String,
    /// Declared language of the source
    pub language: Language,
}

impl ReviewRequest {
    /// Create a new review request
    pub fn new(code: impl Into<String>, language: Language) -> Self {
        Self {
            code: code.into(),
            language,
        }
    }

    /// True when the code is empty or whitespace only
    ///
    /// Front-ends must not submit blank requests.
    pub fn is_blank(&self) -> bool {
        self.code.trim().is_empty()
    }

    /// Generate the prompt sent to the model
    pub fn to_prompt(&self) -> String {
        let focus = FOCUS_AREAS
            .iter()
            .map(|area| format!("- {}", area))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Review the following {language} code and provide feedback on:\n\n\
             {focus}\n\n\
             ```{fence}\n{code}\n```\n",
            language = self.language.display_name(),
            focus = focus,
            fence = self.language.fence_tag(),
            code = self.code,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_params() {
        let params = GenerationParams::default();
        assert_eq!(params.temperature, 0.7);
        assert_eq!(params.top_p, 1.0);
        assert_eq!(params.top_k, 1);
        assert_eq!(params.max_output_tokens, 2048);
    }

    #[test]
    fn test_blank_detection() {
        assert!(ReviewRequest::new("", Language::Python).is_blank());
        assert!(ReviewRequest::new("  \n\t ", Language::Python).is_blank());
        assert!(!ReviewRequest::new(" x ", Language::Python).is_blank());
    }

    #[test]
    fn test_prompt_exact_text() {
        let request = ReviewRequest::new("print(1)", Language::Python);
        let expected = "Review the following Python code and provide feedback on:\n\
                        \n\
                        - Code correctness and potential bugs\n\
                        - Code style and readability\n\
                        - Potential performance issues\n\
                        - Security vulnerabilities (if applicable)\n\
                        - Best practices and suggestions for improvement\n\
                        \n\
                        ```python\n\
                        print(1)\n\
                        ```\n";
        assert_eq!(request.to_prompt(), expected);
    }

    #[test]
    fn test_prompt_uses_lowercase_fence_and_display_name() {
        let request = ReviewRequest::new("int main() {}", Language::Cpp);
        let prompt = request.to_prompt();
        assert!(prompt.starts_with("Review the following C++ code"));
        assert!(prompt.contains("```c++\nint main() {}\n```"));
    }

    #[test]
    fn test_prompt_keeps_code_verbatim() {
        let code = "  def f():\n\treturn \"```\"  \n";
        let prompt = ReviewRequest::new(code, Language::Python).to_prompt();
        assert!(prompt.contains(code));
    }

    #[test]
    fn test_focus_order() {
        let prompt = ReviewRequest::new("x", Language::Go).to_prompt();
        let positions: Vec<usize> = FOCUS_AREAS
            .iter()
            .map(|area| prompt.find(area).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
