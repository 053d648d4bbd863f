//! Protein-level effects of coding variants.

mod error;
pub mod in_frame;
pub mod transcript;
pub mod types;

pub use error::Error;
pub use in_frame::{predict_in_frame_coding_effect, Config, Predictor};
pub use transcript::RefTranscriptData;
pub use types::{EffectKind, ProteinEffect};
