//! Effect prediction for variants that change the coding sequence without
//! changing the reading frame.
//!
//! Classification runs as an ordered list of guard-and-return steps:
//!
//! 1. start codon handling (only when codon 0 is touched),
//! 2. premature stop detection,
//! 3. generic classification of the flank-trimmed amino acid change.
//!
//! The order matters, e.g., a change right after the last residue is a stop
//! loss even though it looks like an insertion once the flanks are trimmed.

use log::{debug, trace, warn};

use crate::{
    effects::{EffectKind, Error, ProteinEffect, RefTranscriptData},
    sequences::{
        is_start_codon, is_stop_codon, normalize_nucleotides, translate, trim_shared_flanks,
        TranslationTable,
    },
};

/// Configuration for `Predictor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Codon table used for translation and for the start/stop codon sets.
    pub translation_table: TranslationTable,
    /// When the mutated codons no longer contain the natural stop, keep
    /// translating into the 3' UTR up to the next stop codon.  Otherwise only
    /// the residues of the mutated codons are considered.
    pub extend_stop_loss: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translation_table: TranslationTable::Standard,
            extend_stop_loss: true,
        }
    }
}

/// The reference codons touched by an edit and their mutated replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CodonWindow {
    /// Index of the first affected reference codon.
    first_codon_index: usize,
    /// Index of the last affected reference codon (inclusive).
    last_codon_index: usize,
    /// Mutated nucleotides replacing the reference codons.
    mutant_codons: String,
}

impl CodonWindow {
    /// Compute the mutant codons for replacing `reference` by `alternative` at
    /// `cds_offset`.  For a pure insertion, `cds_offset` is the position after
    /// which `alternative` is inserted.
    ///
    /// All sequences must be normalized.
    fn locate(
        reference: &str,
        alternative: &str,
        cds_offset: usize,
        sequence_from_start_codon: &str,
    ) -> Result<Self, Error> {
        let seq = sequence_from_start_codon;
        let first_codon_index = cds_offset / 3;
        let offset_in_first_codon = cds_offset % 3;
        let window_start = first_codon_index * 3;
        if window_start > seq.len() {
            return Err(Error::OffsetBeyondSequence(cds_offset, seq.len()));
        }

        let (last_codon_index, mutant_codons) = if reference.is_empty() {
            // One extra codon so that a stop inserted right before the
            // existing stop translates to nothing new.
            let ref_codons = &seq[window_start..(window_start + 6).min(seq.len())];
            let split = (offset_in_first_codon + 1).min(ref_codons.len());
            let (prefix, suffix) = ref_codons.split_at(split);
            (
                first_codon_index + 1,
                format!("{prefix}{alternative}{suffix}"),
            )
        } else {
            let last_offset = cds_offset + reference.len() - 1;
            let last_codon_index = last_offset / 3;
            // Cannot happen for a non-empty reference.
            if last_codon_index < first_codon_index {
                return Err(Error::CodonIndexInversion(
                    first_codon_index,
                    last_codon_index,
                ));
            }

            let observed = seq
                .get(cds_offset..cds_offset + reference.len())
                .unwrap_or_default();
            if observed != reference {
                warn!(
                    "reference {} does not match transcript sequence {} at CDS offset {}",
                    reference, observed, cds_offset
                );
            }

            // Untouched bases of the first and last codon flank `alternative`.
            let ref_codons = &seq[window_start..(last_codon_index * 3 + 3).min(seq.len())];
            let prefix = &ref_codons[..offset_in_first_codon.min(ref_codons.len())];
            let suffix_len = match last_offset % 3 {
                0 => 2,
                1 => 1,
                _ => 0,
            };
            let suffix = &ref_codons[ref_codons.len().saturating_sub(suffix_len)..];
            (last_codon_index, format!("{prefix}{alternative}{suffix}"))
        };

        if mutant_codons.len() % 3 != 0 {
            let len = mutant_codons.len();
            return Err(Error::NotInFrame(mutant_codons, len));
        }

        Ok(Self {
            first_codon_index,
            last_codon_index,
            mutant_codons,
        })
    }

    /// Offset of the first base after the window.
    fn end(&self) -> usize {
        (self.last_codon_index + 1) * 3
    }

    fn codons(&self) -> impl Iterator<Item = &str> {
        self.mutant_codons
            .as_bytes()
            .chunks_exact(3)
            .filter_map(|codon| std::str::from_utf8(codon).ok())
    }
}

/// Reference and mutant residues at an amino acid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AaChange<'a> {
    aa_pos: usize,
    aa_ref: &'a [u8],
    aa_alt: &'a [u8],
}

impl AaChange<'_> {
    /// Drop the residues both sides start with, advancing the position.
    fn without_shared_prefix(self) -> Self {
        let n_shared = self
            .aa_ref
            .iter()
            .zip(self.aa_alt)
            .take_while(|(r, a)| r == a)
            .count();
        Self {
            aa_pos: self.aa_pos + n_shared,
            aa_ref: &self.aa_ref[n_shared..],
            aa_alt: &self.aa_alt[n_shared..],
        }
    }
}

fn residues(aa: &[u8]) -> String {
    aa.iter().copied().map(char::from).collect()
}

/// Predicts the protein effect of in-frame coding variants.
#[derive(Debug, Clone, Default)]
pub struct Predictor {
    config: Config,
}

impl Predictor {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Coding effect of an in-frame nucleotide change.
    ///
    /// # Args
    ///
    /// * `reference` -- Reference nucleotides, empty for a pure insertion.
    /// * `alternative` -- Nucleotides replacing `reference`.
    /// * `cds_offset` -- 0-based offset of the first reference nucleotide from the
    ///   first base of the start codon.  For a pure insertion, the offset *after*
    ///   which `alternative` is inserted.
    /// * `sequence_from_start_codon` -- Transcript sequence from the start codon,
    ///   including the 3' UTR so that a lost stop can be translated past.
    /// * `transcript` -- Reference transcript data.
    /// * `variant` -- Identity of the variant, copied into the result.
    ///
    /// # Returns
    ///
    /// Exactly one effect, or an error if the inputs are inconsistent (e.g., a
    /// frameshift or an edit outside of the coding sequence).
    pub fn predict(
        &self,
        reference: &str,
        alternative: &str,
        cds_offset: usize,
        sequence_from_start_codon: &str,
        transcript: &RefTranscriptData,
        variant: &str,
    ) -> Result<ProteinEffect, Error> {
        let reference = normalize_nucleotides(reference)?;
        let alternative = normalize_nucleotides(alternative)?;
        let seq = normalize_nucleotides(sequence_from_start_codon)?;

        let first_codon_index = cds_offset / 3;
        if !reference.is_empty() && first_codon_index > transcript.protein_len() {
            return Err(Error::CodonIndexOutOfRange {
                first_codon_index,
                protein_len: transcript.protein_len(),
                variant: variant.to_owned(),
                transcript_id: transcript.transcript_id.clone(),
            });
        }

        let window = CodonWindow::locate(&reference, &alternative, cds_offset, &seq)?;
        debug!(
            "{} on {}: codons {}..={} become {}",
            variant,
            transcript.transcript_id,
            window.first_codon_index,
            window.last_codon_index,
            window.mutant_codons
        );

        let kind = self.classify(&reference, &alternative, &window, &seq, transcript)?;
        debug!("{} on {}: {}", variant, transcript.transcript_id, kind);

        Ok(ProteinEffect {
            variant: variant.to_owned(),
            transcript_id: transcript.transcript_id.clone(),
            kind,
        })
    }

    /// Like `predict()`, taking the sequence from the start codon from `transcript`.
    pub fn predict_on_transcript(
        &self,
        reference: &str,
        alternative: &str,
        cds_offset: usize,
        transcript: &RefTranscriptData,
        variant: &str,
    ) -> Result<ProteinEffect, Error> {
        self.predict(
            reference,
            alternative,
            cds_offset,
            transcript.sequence_from_start_codon(),
            transcript,
            variant,
        )
    }

    fn classify(
        &self,
        reference: &str,
        alternative: &str,
        window: &CodonWindow,
        seq: &str,
        transcript: &RefTranscriptData,
    ) -> Result<EffectKind, Error> {
        let table = self.config.translation_table;
        let protein_len = transcript.protein_len();

        if window.first_codon_index == 0 {
            if let Some(kind) = self.classify_start_codon(reference, alternative, window, transcript)
            {
                return Ok(kind);
            }
        }

        let mut mutant_aa =
            translate(&window.mutant_codons, window.first_codon_index == 0, table)?;
        let has_stop = window.codons().any(|codon| is_stop_codon(codon, table));
        if !has_stop && self.config.extend_stop_loss && window.last_codon_index >= protein_len {
            // The natural stop is gone, read on into the 3' UTR.
            let downstream = self.translate_downstream(seq, window.end())?;
            trace!("stop codon lost, translated {} residues downstream", downstream.len());
            mutant_aa.push_str(&downstream);
        }

        let reference_aa = transcript
            .protein_subsequence(window.first_codon_index, window.last_codon_index + 1);
        let mut change = AaChange {
            aa_pos: window.first_codon_index,
            aa_ref: reference_aa.as_bytes(),
            aa_alt: mutant_aa.as_bytes(),
        };

        if has_stop {
            let trimmed = change.without_shared_prefix();
            if let Some(kind) = classify_premature_stop(trimmed, protein_len) {
                return Ok(kind);
            }
            // Keep the trimmed residues but report from the first codon.
            change = AaChange {
                aa_pos: window.first_codon_index,
                ..trimmed
            };
        }

        classify_in_frame(change, transcript)
    }

    /// Handle edits touching the start codon.
    ///
    /// Returns `None` if the start codon survives and classification should
    /// continue with the generic logic.
    fn classify_start_codon(
        &self,
        reference: &str,
        alternative: &str,
        window: &CodonWindow,
        transcript: &RefTranscriptData,
    ) -> Option<EffectKind> {
        let mutant = window.mutant_codons.as_str();
        let alt_codon = mutant.get(..3).unwrap_or(mutant);
        if !is_start_codon(alt_codon, self.config.translation_table) {
            // The protein start (and frame) is unknown from here on.
            trace!("start codon replaced by {:?}", alt_codon);
            return Some(EffectKind::StartLoss);
        }

        let ref_codon = transcript.start_codon();
        if mutant.len() == 3 && reference.len() == alternative.len() && mutant != ref_codon {
            return Some(EffectKind::AlternateStartCodon {
                ref_codon: ref_codon.to_owned(),
                alt_codon: mutant.to_owned(),
                aa_ref: transcript.protein_subsequence(0, 1).to_owned(),
            });
        }

        trace!("start codon preserved, continuing");
        None
    }

    /// Translate `seq` from `start` on, ignoring a trailing partial codon.
    fn translate_downstream(&self, seq: &str, start: usize) -> Result<String, Error> {
        let downstream = seq.get(start..).unwrap_or_default();
        let n_full = downstream.len() - downstream.len() % 3;
        Ok(translate(
            &downstream[..n_full],
            false,
            self.config.translation_table,
        )?)
    }
}

/// A stop codon in the mutated codons only counts as premature stop if the
/// protein actually gets shorter.
fn classify_premature_stop(change: AaChange, protein_len: usize) -> Option<EffectKind> {
    let n_remaining = protein_len.saturating_sub(change.aa_pos);
    if change.aa_alt.len() < n_remaining {
        Some(EffectKind::PrematureStop {
            aa_pos: change.aa_pos,
            aa_ref: residues(change.aa_ref),
            aa_alt: residues(change.aa_alt),
        })
    } else {
        trace!("stop codon at {} does not shorten the protein", change.aa_pos);
        None
    }
}

/// Classify changes that neither touch the start codon nor truncate the
/// protein, looking only at amino acids.
fn classify_in_frame(
    change: AaChange,
    transcript: &RefTranscriptData,
) -> Result<EffectKind, Error> {
    let trimmed = trim_shared_flanks(change.aa_ref, change.aa_alt);
    let (aa_ref, aa_alt) = (trimmed.reference, trimmed.alternative);

    if aa_ref.is_empty() && aa_alt.is_empty() {
        return Ok(EffectKind::Silent {
            aa_pos: change.aa_pos,
            aa_ref: residues(&[trimmed.prefix, trimmed.suffix].concat()),
        });
    }

    // First residue that differs from the reference.
    let aa_pos = change.aa_pos + trimmed.prefix.len();

    let kind = if aa_pos == transcript.protein_len() {
        // The reference residues are clamped to the protein, so none are left here.
        if !aa_ref.is_empty() {
            return Err(Error::StopLossReferenceNotEmpty(
                transcript.transcript_id.clone(),
                residues(aa_ref),
            ));
        }
        EffectKind::StopLoss {
            aa_pos,
            extended_sequence: residues(aa_alt),
        }
    } else if aa_alt.is_empty() {
        EffectKind::Deletion {
            aa_pos,
            aa_ref: residues(aa_ref),
        }
    } else if aa_ref.is_empty() {
        EffectKind::Insertion {
            aa_pos,
            aa_alt: residues(aa_alt),
        }
    } else if let ([r], [a]) = (aa_ref, aa_alt) {
        EffectKind::Substitution {
            aa_pos,
            aa_ref: char::from(*r),
            aa_alt: char::from(*a),
        }
    } else {
        EffectKind::ComplexSubstitution {
            aa_pos,
            aa_ref: residues(aa_ref),
            aa_alt: residues(aa_alt),
        }
    };

    Ok(kind)
}

/// Predict with the default configuration, see `Predictor::predict()`.
pub fn predict_in_frame_coding_effect(
    reference: &str,
    alternative: &str,
    cds_offset: usize,
    sequence_from_start_codon: &str,
    transcript: &RefTranscriptData,
    variant: &str,
) -> Result<ProteinEffect, Error> {
    Predictor::default().predict(
        reference,
        alternative,
        cds_offset,
        sequence_from_start_codon,
        transcript,
        variant,
    )
}


// <LICENSE>
// Copyright 2026 coding-effects Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
// </LICENSE>
