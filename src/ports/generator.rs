//! Constrained-generation port used by the snippet merge engine.

use crate::domain::AppError;

/// A fully rendered merge directive, ready for a single generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// System-role framing for the generation call.
    pub system: String,
    /// User-role prompt embedding the original file, snippet, and any
    /// placement instructions.
    pub prompt: String,
    /// Baseline text the decoder should reproduce verbatim outside the
    /// edited region.
    pub predicted: String,
}

/// Single-shot, non-streaming text generation.
///
/// Implementations must bias decoding toward reproducing the directive's
/// `predicted` baseline (predicted-output style) so that regions of the file
/// unrelated to the edit survive byte-for-byte. The response text is treated
/// as the complete new file contents; no post-processing is applied.
pub trait Generator {
    /// Produce the complete merged file contents.
    fn complete(&self, directive: &Directive) -> Result<String, AppError>;
}
