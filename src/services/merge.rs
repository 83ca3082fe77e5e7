//! Snippet merge engine.
//!
//! Integrates a code snippet into existing file contents through a single
//! constrained-generation call. The engine owns directive construction and
//! failure classification; the transport lives behind the [`Generator`]
//! port.

use minijinja::{Environment, context};

use crate::domain::AppError;
use crate::ports::{Directive, Generator};

/// System-role framing for the merge call. Carries the ambiguity policy:
/// pick the most logical location rather than failing, and normalize an
/// already-present snippet instead of duplicating it.
const SYSTEM_PROMPT: &str = "\
You are an expert code editor.

Inputs:
<original> // FULL contents of the file
<code_snippet> // code to insert or modify
<instructions> // plain-English directions for how the snippet must be integrated (if not provided, just integrate the code snippet)

Task:
1. Read the entire original file.
2. Apply the code snippet to the original file.
3. Maintain existing style, indentation, and line endings.
4. Make no other changes.
5. Return ONLY the complete, updated file contents - no commentary, no JSON wrapper, no code fences.

If a location is ambiguous, choose the most logical spot and proceed. If the snippet already exists, ensure it matches the provided version.

Your response must be the final file contents, and nothing else.";

const USER_PROMPT_TEMPLATE: &str = "\
You are an expert code editor.
You will be given a code file, and a snippet as well as instructions for how to implement the snippet in the provided code.
Return only the final code file with the snippet implemented.
<original>{{ original }}</original><code_snippet>{{ snippet }}</code_snippet>\
{% if instructions %}<instructions>{{ instructions }}</instructions>{% endif %}";

/// Merges snippets into file contents through an injected [`Generator`].
pub struct SnippetMergeEngine<G> {
    generator: G,
}

impl<G: Generator> SnippetMergeEngine<G> {
    /// Create an engine delegating generation to `generator`.
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Produce the complete new contents of a file.
    ///
    /// The only failure mode is the generation call itself: a transport
    /// error propagates with its cause, and an empty response surfaces as
    /// [`AppError::EmptyCompletion`]. No write happens here; persistence is
    /// the caller's responsibility and must only occur on `Ok`.
    pub fn merge(
        &self,
        original: &str,
        snippet: &str,
        instructions: Option<&str>,
    ) -> Result<String, AppError> {
        let directive = build_directive(original, snippet, instructions)?;
        let merged = self.generator.complete(&directive)?;
        if merged.trim().is_empty() {
            return Err(AppError::EmptyCompletion);
        }
        Ok(merged)
    }
}

/// Render the merge directive, seeding the original contents as the
/// predicted decoding baseline.
fn build_directive(
    original: &str,
    snippet: &str,
    instructions: Option<&str>,
) -> Result<Directive, AppError> {
    let mut env = Environment::new();
    env.add_template("merge-directive", USER_PROMPT_TEMPLATE)
        .map_err(|e| AppError::configuration(format!("Invalid merge directive template: {e}")))?;
    let prompt = env
        .get_template("merge-directive")
        .and_then(|template| template.render(context! { original, snippet, instructions }))
        .map_err(|e| AppError::configuration(format!("Failed to render merge directive: {e}")))?;

    Ok(Directive {
        system: SYSTEM_PROMPT.to_string(),
        prompt,
        predicted: original.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeGenerator;

    const ORIGINAL: &str = "const x = 1;\n";
    const SNIPPET: &str = "function f(){}";

    #[test]
    fn directive_embeds_original_and_snippet() {
        let generator = FakeGenerator::returning("merged");
        let engine = SnippetMergeEngine::new(generator.clone());

        engine.merge(ORIGINAL, SNIPPET, None).unwrap();

        let recorded = generator.recorded();
        assert_eq!(recorded.len(), 1);
        let directive = &recorded[0];
        assert!(directive.prompt.contains(&format!("<original>{ORIGINAL}</original>")));
        assert!(directive.prompt.contains(&format!("<code_snippet>{SNIPPET}</code_snippet>")));
        assert!(!directive.prompt.contains("<instructions>"));
    }

    #[test]
    fn directive_includes_instructions_when_given() {
        let generator = FakeGenerator::returning("merged");
        let engine = SnippetMergeEngine::new(generator.clone());

        engine.merge(ORIGINAL, SNIPPET, Some("add f at end of file")).unwrap();

        let directive = &generator.recorded()[0];
        assert!(directive.prompt.contains("<instructions>add f at end of file</instructions>"));
    }

    #[test]
    fn predicted_baseline_is_the_original_contents() {
        let generator = FakeGenerator::returning("merged");
        let engine = SnippetMergeEngine::new(generator.clone());

        engine.merge(ORIGINAL, SNIPPET, None).unwrap();
        assert_eq!(generator.recorded()[0].predicted, ORIGINAL);
    }

    #[test]
    fn system_prompt_states_the_ambiguity_policy() {
        let generator = FakeGenerator::returning("merged");
        let engine = SnippetMergeEngine::new(generator.clone());

        engine.merge(ORIGINAL, SNIPPET, None).unwrap();

        let system = &generator.recorded()[0].system;
        assert!(system.contains("choose the most logical spot and proceed"));
        assert!(system.contains("If the snippet already exists"));
    }

    #[test]
    fn generator_output_is_returned_verbatim() {
        let engine = SnippetMergeEngine::new(FakeGenerator::returning("const x = 1;\nfunction f(){}\n"));
        let merged = engine.merge(ORIGINAL, SNIPPET, None).unwrap();
        assert_eq!(merged, "const x = 1;\nfunction f(){}\n");
    }

    #[test]
    fn generator_failure_propagates_with_cause() {
        let engine = SnippetMergeEngine::new(FakeGenerator::failing("connection refused"));
        let err = engine.merge(ORIGINAL, SNIPPET, None).unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn empty_response_is_a_merge_failure() {
        let engine = SnippetMergeEngine::new(FakeGenerator::returning("  \n"));
        assert!(matches!(
            engine.merge(ORIGINAL, SNIPPET, None),
            Err(AppError::EmptyCompletion)
        ));
    }
}
