//! Language-specific collaborators of the generation pipeline.

mod traits;

pub use traits::{
    Eligibility, EligibilityFilter, FormatError, LanguageBackend, SourceFormatter,
    SynthesisError, SynthesisRequest, Synthesizer,
};
