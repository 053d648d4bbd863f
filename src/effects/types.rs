//! Protein-level effect types.
//!
//! All positions are 0-based amino acid offsets into the reference protein.
//! The `Display` implementations print a short HGVS-like description using
//! 1-letter amino acids and 1-based positions.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Effect of a variant on a single transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProteinEffect {
    /// Identity of the originating variant.
    pub variant: String,
    /// Identity of the affected transcript.
    pub transcript_id: String,
    #[serde(flatten)]
    pub kind: EffectKind,
}

/// The classification of a coding change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum EffectKind {
    /// No amino acid changes; `aa_ref` are the residues covered by the edit.
    Silent { aa_pos: usize, aa_ref: String },
    /// One residue replaced by another.
    Substitution {
        aa_pos: usize,
        aa_ref: char,
        aa_alt: char,
    },
    /// A block of residues replaced by a different block, neither empty.
    ComplexSubstitution {
        aa_pos: usize,
        aa_ref: String,
        aa_alt: String,
    },
    /// Residues inserted before `aa_pos`.
    Insertion { aa_pos: usize, aa_alt: String },
    /// Residues deleted starting at `aa_pos`.
    Deletion { aa_pos: usize, aa_ref: String },
    /// A new stop codon shortens the protein.  `aa_alt` are the residues
    /// translated before the stop.
    PrematureStop {
        aa_pos: usize,
        aa_ref: String,
        aa_alt: String,
    },
    /// The start codon is replaced by a codon that cannot initiate translation.
    StartLoss,
    /// The start codon is replaced by a different start codon.
    AlternateStartCodon {
        ref_codon: String,
        alt_codon: String,
        aa_ref: String,
    },
    /// The stop codon is lost; `extended_sequence` starts at the position of
    /// the former stop codon `aa_pos`.
    StopLoss {
        aa_pos: usize,
        extended_sequence: String,
    },
}

impl EffectKind {
    /// Name of the effect category.
    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::Silent { .. } => "Silent",
            EffectKind::Substitution { .. } => "Substitution",
            EffectKind::ComplexSubstitution { .. } => "ComplexSubstitution",
            EffectKind::Insertion { .. } => "Insertion",
            EffectKind::Deletion { .. } => "Deletion",
            EffectKind::PrematureStop { .. } => "PrematureStop",
            EffectKind::StartLoss => "StartLoss",
            EffectKind::AlternateStartCodon { .. } => "AlternateStartCodon",
            EffectKind::StopLoss { .. } => "StopLoss",
        }
    }

    /// First affected amino acid position, if the effect has one.
    pub fn aa_pos(&self) -> Option<usize> {
        match self {
            EffectKind::Silent { aa_pos, .. }
            | EffectKind::Substitution { aa_pos, .. }
            | EffectKind::ComplexSubstitution { aa_pos, .. }
            | EffectKind::Insertion { aa_pos, .. }
            | EffectKind::Deletion { aa_pos, .. }
            | EffectKind::PrematureStop { aa_pos, .. }
            | EffectKind::StopLoss { aa_pos, .. } => Some(*aa_pos),
            EffectKind::AlternateStartCodon { .. } => Some(0),
            EffectKind::StartLoss => None,
        }
    }

    /// Whether the protein sequence differs from the reference.
    pub fn modifies_protein_sequence(&self) -> bool {
        !matches!(
            self,
            EffectKind::Silent { .. } | EffectKind::AlternateStartCodon { .. }
        )
    }
}

/// Format the residues `aa` starting at 0-based `pos` as `D2` or `D2_P3`.
fn aa_range(aa: &str, pos: usize) -> String {
    let mut chars = aa.chars();
    match (chars.next(), chars.last()) {
        (None, _) => format!("{}", pos + 1),
        (Some(first), None) => format!("{}{}", first, pos + 1),
        (Some(first), Some(last)) => {
            format!("{}{}_{}{}", first, pos + 1, last, pos + aa.chars().count())
        }
    }
}

impl Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EffectKind::Silent { aa_pos, aa_ref } => {
                if aa_ref.is_empty() {
                    write!(f, "p.=")
                } else {
                    write!(f, "p.{}=", aa_range(aa_ref, *aa_pos))
                }
            }
            EffectKind::Substitution {
                aa_pos,
                aa_ref,
                aa_alt,
            } => write!(f, "p.{}{}{}", aa_ref, aa_pos + 1, aa_alt),
            EffectKind::ComplexSubstitution {
                aa_pos,
                aa_ref,
                aa_alt,
            } => write!(f, "p.{}delins{}", aa_range(aa_ref, *aa_pos), aa_alt),
            EffectKind::Insertion { aa_pos, aa_alt } => {
                write!(f, "p.{}_{}ins{}", aa_pos, aa_pos + 1, aa_alt)
            }
            EffectKind::Deletion { aa_pos, aa_ref } => {
                write!(f, "p.{}del", aa_range(aa_ref, *aa_pos))
            }
            EffectKind::PrematureStop {
                aa_pos,
                aa_ref,
                aa_alt,
            } => {
                if aa_ref.is_empty() {
                    write!(f, "p.{}_{}ins{}*", aa_pos, aa_pos + 1, aa_alt)
                } else {
                    write!(f, "p.{}{}*", aa_range(aa_ref, *aa_pos), aa_alt)
                }
            }
            EffectKind::StartLoss => write!(f, "p.M1?"),
            EffectKind::AlternateStartCodon {
                ref_codon,
                alt_codon,
                aa_ref,
            } => write!(f, "p.{}1= ({}>{})", aa_ref, ref_codon, alt_codon),
            EffectKind::StopLoss {
                aa_pos,
                extended_sequence,
            } => write!(f, "p.*{}ext{}", aa_pos + 1, extended_sequence),
        }
    }
}

impl Display for ProteinEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.transcript_id, self.kind)
    }
}
