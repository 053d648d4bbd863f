//! Reference transcript data consumed by the effect predictor.

use crate::{
    effects::Error,
    sequences::{normalize_nucleotides, translate, TranslationTable},
};

/// Reference sequences of a single coding transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefTranscriptData {
    /// Transcript accession or other identity, passed through to results.
    pub transcript_id: String,
    /// Transcript nucleotide sequence, normalized to upper case DNA.
    pub transcript_sequence: String,
    /// 0-based position of the first base of the start codon on the transcript.
    pub cds_start: usize,
    /// Reference amino acid sequence, without the terminal stop.
    pub aa_sequence: String,
}

impl RefTranscriptData {
    /// Construct from a transcript sequence and its precomputed protein.
    ///
    /// # Args
    ///
    /// * `transcript_id` -- Transcript identity.
    /// * `transcript_sequence` -- Full transcript sequence including UTRs.
    /// * `cds_start` -- 0-based start codon position on `transcript_sequence`.
    /// * `aa_sequence` -- Reference protein in 1-letter amino acids.
    pub fn new(
        transcript_id: &str,
        transcript_sequence: &str,
        cds_start: usize,
        aa_sequence: &str,
    ) -> Result<Self, Error> {
        let transcript_sequence = normalize_nucleotides(transcript_sequence)?;
        if cds_start > transcript_sequence.len() {
            return Err(Error::CdsStartOutOfRange(
                transcript_id.to_owned(),
                cds_start,
                transcript_sequence.len(),
            ));
        }
        if !aa_sequence.is_ascii() {
            return Err(Error::InvalidProteinSequence(transcript_id.to_owned()));
        }

        Ok(Self {
            transcript_id: transcript_id.to_owned(),
            transcript_sequence,
            cds_start,
            aa_sequence: aa_sequence.to_owned(),
        })
    }

    /// Construct by translating the CDS `cds_start..cds_end` of the transcript.
    ///
    /// The CDS must include the stop codon and have a length divisible by 3.
    pub fn from_cds(
        transcript_id: &str,
        transcript_sequence: &str,
        cds_start: usize,
        cds_end: usize,
        table: TranslationTable,
    ) -> Result<Self, Error> {
        let normalized = normalize_nucleotides(transcript_sequence)?;
        if cds_start > cds_end || cds_end > normalized.len() {
            return Err(Error::CdsStartOutOfRange(
                transcript_id.to_owned(),
                cds_start,
                normalized.len(),
            ));
        }

        // Coding sequences that are not divisible by 3 are not supported.
        let cds = &normalized[cds_start..cds_end];
        if cds.len() % 3 != 0 {
            return Err(Error::TranscriptLengthInvalid(
                transcript_id.to_owned(),
                cds.len(),
            ));
        }
        let aa_sequence = translate(cds, true, table)?;

        Ok(Self {
            transcript_id: transcript_id.to_owned(),
            transcript_sequence: normalized,
            cds_start,
            aa_sequence,
        })
    }

    /// Transcript sequence from the start codon through the 3' UTR.
    pub fn sequence_from_start_codon(&self) -> &str {
        &self.transcript_sequence[self.cds_start..]
    }

    /// The reference start codon, shorter if the transcript is truncated.
    pub fn start_codon(&self) -> &str {
        let end = (self.cds_start + 3).min(self.transcript_sequence.len());
        &self.transcript_sequence[self.cds_start..end]
    }

    pub fn protein_len(&self) -> usize {
        self.aa_sequence.len()
    }

    /// Reference residues `start..end`, clamped to the protein.
    pub fn protein_subsequence(&self, start: usize, end: usize) -> &str {
        let len = self.protein_len();
        let end = end.min(len);
        self.aa_sequence
            .get(start.min(end)..end)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::RefTranscriptData;
    use crate::{effects::Error, sequences::TranslationTable};

    #[test]
    fn from_cds() -> Result<(), Error> {
        let tx = RefTranscriptData::from_cds(
            "TX1",
            "gccATGGATCCCTAAgggttttgaac",
            3,
            15,
            TranslationTable::Standard,
        )?;

        assert_eq!(tx.aa_sequence, "MDP");
        assert_eq!(tx.protein_len(), 3);
        assert_eq!(tx.start_codon(), "ATG");
        assert_eq!(tx.sequence_from_start_codon(), "ATGGATCCCTAAGGGTTTTGAAC");

        Ok(())
    }

    #[test]
    fn from_cds_rejects_partial_codon() {
        assert_eq!(
            RefTranscriptData::from_cds("TX1", "ATGGATCCTAA", 0, 11, TranslationTable::Standard),
            Err(Error::TranscriptLengthInvalid("TX1".to_string(), 11))
        );
    }

    #[test]
    fn new_validates() {
        assert_eq!(
            RefTranscriptData::new("TX1", "ATG", 4, "M"),
            Err(Error::CdsStartOutOfRange("TX1".to_string(), 4, 3))
        );
        assert_eq!(
            RefTranscriptData::new("TX1", "ATG", 0, "Mé"),
            Err(Error::InvalidProteinSequence("TX1".to_string()))
        );
    }

    #[test]
    fn protein_subsequence_clamps() -> Result<(), Error> {
        let tx = RefTranscriptData::new("TX1", "ATGGATCCCTAA", 0, "MDP")?;

        assert_eq!(tx.protein_subsequence(1, 2), "D");
        assert_eq!(tx.protein_subsequence(2, 4), "P");
        assert_eq!(tx.protein_subsequence(3, 4), "");
        assert_eq!(tx.protein_subsequence(5, 6), "");

        Ok(())
    }
}
