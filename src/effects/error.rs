//! Error type definition.

use thiserror::Error;

/// Contract violations detected while predicting a coding effect.
///
/// These indicate inconsistent transcript or variant data handed in by the
/// caller.  Biological outcomes such as a lost stop codon are never errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("sequence operation failed")]
    SequenceOperationFailed(#[from] crate::sequences::Error),
    #[error("expected in-frame mutation but got {0} (length = {1})")]
    NotInFrame(String, usize),
    #[error(
        "unexpected mutation at codon {first_codon_index} (protein length is {protein_len}) \
        while annotating {variant} on {transcript_id}"
    )]
    CodonIndexOutOfRange {
        first_codon_index: usize,
        protein_len: usize,
        variant: String,
        transcript_id: String,
    },
    #[error("expected first codon index ({0}) <= last codon index ({1})")]
    CodonIndexInversion(usize, usize),
    #[error("CDS offset {0} is beyond the end of the coding sequence (length {1})")]
    OffsetBeyondSequence(usize, usize),
    #[error("expected end of coding sequence for {0}, got reference residues {1:?}")]
    StopLossReferenceNotEmpty(String, String),
    #[error("protein sequence of {0} is not ASCII")]
    InvalidProteinSequence(String),
    #[error("CDS start {1} is out of range for {0} (length {2})")]
    CdsStartOutOfRange(String, usize, usize),
    #[error(
        "transcript {0} is not supported because its CDS length of {1} is not a multiple of 3"
    )]
    TranscriptLengthInvalid(String, usize),
}
