//! Utility code for working with nucleotide and amino acid sequences.
//!
//! Holds the codon translator and the flanking trimmer used for diffing
//! amino acid fragments.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

pub use crate::sequences::error::Error;

mod error {
    /// Error type for sequence translation.
    #[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
    pub enum Error {
        #[error("codon is undefined in codon table: {0}")]
        UndefinedCodon(String),
        #[error("can only translate DNA sequences whose length is multiple of 3, but is: {0}")]
        UntranslatableDnaLength(usize),
        #[error("sequence contains non-IUPAC nucleotides: {0}")]
        InvalidNucleotides(String),
        #[error("first codon is not a start codon: {0:?}")]
        NotAStartCodon(String),
    }
}

lazy_static::lazy_static! {
    /// Mapping for DNA characters for normalization.
    static ref DNA_ASCII_MAP: [u8; 256] = {
        let mut result = [0; 256];

        for c in 0..=255 {
            if c == b'u' || c == b'U' {
                result[c as usize] = b'T';
            } else if c.is_ascii_lowercase() {
                result[c as usize] = c.to_ascii_uppercase();
            } else {
                result[c as usize] = c;
            }
        }

        result
    };

    static ref DNA_ASCII_TO_2BIT: [u8; 256] = {
        let mut result = [255; 256];

        result[b'A' as usize] = 0;
        result[b'C' as usize] = 1;
        result[b'G' as usize] = 2;
        result[b'T' as usize] = 3;

        result
    };

    /// NCBI standard translation table, indexed by 2-bit codon (`A=0, C=1, G=2, T=3`).
    static ref CODON_2BIT_TO_AA1_STANDARD: [u8; 64] = codon_lut(STANDARD_AAS);

    /// Standard table with `TGA` read through as selenocysteine.
    static ref CODON_2BIT_TO_AA1_SEC: [u8; 64] = {
        let mut result = codon_lut(STANDARD_AAS);
        result[dna3_to_2bit(b"TGA").expect("valid codon") as usize] = b'U';
        result
    };

    static ref STOP_CODONS_STANDARD: FxHashSet<&'static str> = stop_codons(&CODON_2BIT_TO_AA1_STANDARD);
    static ref STOP_CODONS_SEC: FxHashSet<&'static str> = stop_codons(&CODON_2BIT_TO_AA1_SEC);
}

/// Amino acids of the standard genetic code in NCBI `TCAG` codon order.
const STANDARD_AAS: &[u8; 64] =
    b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

/// Start codons shared by the supported tables.
const START_CODONS: &[&str] = &["ATG", "CTG", "TTG"];

/// All 64 codons in 2-bit order, so `ALL_CODONS[dna3_to_2bit(c)] == c`.
const ALL_CODONS: [&str; 64] = [
    "AAA", "AAC", "AAG", "AAT", "ACA", "ACC", "ACG", "ACT", "AGA", "AGC", "AGG", "AGT", "ATA",
    "ATC", "ATG", "ATT", "CAA", "CAC", "CAG", "CAT", "CCA", "CCC", "CCG", "CCT", "CGA", "CGC",
    "CGG", "CGT", "CTA", "CTC", "CTG", "CTT", "GAA", "GAC", "GAG", "GAT", "GCA", "GCC", "GCG",
    "GCT", "GGA", "GGC", "GGG", "GGT", "GTA", "GTC", "GTG", "GTT", "TAA", "TAC", "TAG", "TAT",
    "TCA", "TCC", "TCG", "TCT", "TGA", "TGC", "TGG", "TGT", "TTA", "TTC", "TTG", "TTT",
];

static IUPAC_AMBIGUITY_CODES: &[u8] = b"BDHVNWSMKRY";

/// Re-index a `TCAG`-ordered amino acid table by 2-bit codon.
fn codon_lut(tcag_aas: &[u8; 64]) -> [u8; 64] {
    const TCAG: &[u8; 4] = b"TCAG";
    let mut result = [0; 64];
    for (i, aa) in tcag_aas.iter().enumerate() {
        let codon = [TCAG[i / 16], TCAG[(i / 4) % 4], TCAG[i % 4]];
        let idx = dna3_to_2bit(&codon).expect("TCAG codons are unambiguous");
        result[idx as usize] = *aa;
    }
    result
}

fn stop_codons(lut: &[u8; 64]) -> FxHashSet<&'static str> {
    ALL_CODONS
        .iter()
        .enumerate()
        .filter(|(i, _)| lut[*i] == b'*')
        .map(|(_, codon)| *codon)
        .collect()
}

fn dna3_to_2bit(c: &[u8]) -> Option<u8> {
    if c.len() != 3 {
        return None;
    }
    let mut result = 0;
    for b in c {
        result <<= 2;
        let tmp = DNA_ASCII_TO_2BIT[*b as usize];
        if tmp == 255 {
            return None;
        }
        result |= tmp;
    }
    Some(result)
}

/// Allow selection of translation table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TranslationTable {
    #[default]
    Standard,
    Selenocysteine,
}

impl TranslationTable {
    /// Codons that may initiate translation.
    pub fn start_codons(&self) -> &'static [&'static str] {
        START_CODONS
    }

    /// Codons that terminate translation.
    pub fn stop_codons(&self) -> &'static FxHashSet<&'static str> {
        match self {
            TranslationTable::Standard => &STOP_CODONS_STANDARD,
            TranslationTable::Selenocysteine => &STOP_CODONS_SEC,
        }
    }

    fn codon_2bit_to_aa1(&self) -> &'static [u8; 64] {
        match self {
            TranslationTable::Standard => &CODON_2BIT_TO_AA1_STANDARD,
            TranslationTable::Selenocysteine => &CODON_2BIT_TO_AA1_SEC,
        }
    }
}

/// Whether `codon` (normalized, upper case) is a start codon in `table`.
pub fn is_start_codon(codon: &str, table: TranslationTable) -> bool {
    table.start_codons().contains(&codon)
}

/// Whether `codon` (normalized, upper case) is a stop codon in `table`.
pub fn is_stop_codon(codon: &str, table: TranslationTable) -> bool {
    table.stop_codons().contains(codon)
}

/// Normalize a nucleotide sequence to upper case DNA (`U` becomes `T`).
///
/// Fails if any character is outside of the IUPAC DNA alphabet.
pub fn normalize_nucleotides(seq: &str) -> Result<String, Error> {
    let normalized: Vec<u8> = seq.bytes().map(|c| DNA_ASCII_MAP[c as usize]).collect();
    if !bio::alphabets::dna::iupac_alphabet().is_word(&normalized) {
        return Err(Error::InvalidNucleotides(seq.to_owned()));
    }
    // Only ASCII IUPAC letters survive the alphabet check.
    Ok(normalized.into_iter().map(char::from).collect())
}

/// Allow translation of `&[u8]` DNA codons to `u8` amino acids.
///
/// Expects codons normalized by `normalize_nucleotides()`.
struct CodonTranslator {
    /// Mapping from 2bit DNA codon to amino acid 1-letter ASCII.
    codon_2bit_to_aa1: &'static [u8; 64],
    /// IUPAC ambiguity codes.
    iupac_ambiguity_codes: &'static [u8],
}

impl CodonTranslator {
    pub fn new(table: TranslationTable) -> Self {
        Self {
            codon_2bit_to_aa1: table.codon_2bit_to_aa1(),
            iupac_ambiguity_codes: IUPAC_AMBIGUITY_CODES,
        }
    }

    /// Translate the given codon to an amino acid.
    pub fn translate(&self, codon: &[u8]) -> Result<u8, Error> {
        if let Some(val) = dna3_to_2bit(codon) {
            return Ok(self.codon_2bit_to_aa1[val as usize]);
        }
        if codon.len() == 3 && codon.iter().any(|c| self.iupac_ambiguity_codes.contains(c)) {
            Ok(b'X')
        } else {
            Err(Error::UndefinedCodon(
                String::from_utf8_lossy(codon).into_owned(),
            ))
        }
    }
}

/// Translates a nucleotide sequence into single-letter amino acids.
///
/// Translation stops at the first stop codon, which is not included in the
/// result.  When `first_codon_is_start` is set, the first codon must be a
/// start codon of `table` and is always translated to methionine.
///
/// # Args
///
/// * `seq` -- A normalized nucleotide sequence with length a multiple of 3.
/// * `first_codon_is_start` -- Whether the first codon initiates translation.
/// * `table` -- Indicates which codon to amino acid translation table to use.
pub fn translate(
    seq: &str,
    first_codon_is_start: bool,
    table: TranslationTable,
) -> Result<String, Error> {
    if seq.len() % 3 != 0 {
        return Err(Error::UntranslatableDnaLength(seq.len()));
    }

    let mut codons = seq.as_bytes().chunks_exact(3);
    let mut result = String::with_capacity(seq.len() / 3);

    if first_codon_is_start {
        let first = codons.next().unwrap_or_default();
        let first = String::from_utf8_lossy(first);
        if !is_start_codon(&first, table) {
            return Err(Error::NotAStartCodon(first.into_owned()));
        }
        result.push('M');
    }

    let translator = CodonTranslator::new(table);
    for codon in codons {
        let aa = translator.translate(codon)?;
        if aa == b'*' {
            break;
        }
        result.push(char::from(aa));
    }

    Ok(result)
}

/// Result of `trim_shared_flanks()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimmedFlanks<'a, T> {
    /// What remains of the reference between the shared flanks.
    pub reference: &'a [T],
    /// What remains of the alternative between the shared flanks.
    pub alternative: &'a [T],
    pub prefix: &'a [T],
    pub suffix: &'a [T],
}

/// Strip the longest common prefix and then the longest common suffix of what
/// remains, so the two flanks never overlap.
pub fn trim_shared_flanks<'a, T: PartialEq>(
    reference: &'a [T],
    alternative: &'a [T],
) -> TrimmedFlanks<'a, T> {
    let n_prefix = reference
        .iter()
        .zip(alternative)
        .take_while(|(r, a)| r == a)
        .count();
    let (prefix, ref_rest) = reference.split_at(n_prefix);
    let alt_rest = &alternative[n_prefix..];

    let n_suffix = ref_rest
        .iter()
        .rev()
        .zip(alt_rest.iter().rev())
        .take_while(|(r, a)| r == a)
        .count();
    let (ref_core, suffix) = ref_rest.split_at(ref_rest.len() - n_suffix);
    let alt_core = &alt_rest[..alt_rest.len() - n_suffix];

    TrimmedFlanks {
        reference: ref_core,
        alternative: alt_core,
        prefix,
        suffix,
    }
}

/// String shortcut for `trim_shared_flanks()`.
///
/// # Returns
///
/// Tuple of trimmed reference, trimmed alternative, shared prefix, shared suffix.
pub fn trim_shared_flanking_strings(
    reference: &str,
    alternative: &str,
) -> (String, String, String, String) {
    let reference: Vec<char> = reference.chars().collect();
    let alternative: Vec<char> = alternative.chars().collect();
    let trimmed = trim_shared_flanks(&reference, &alternative);
    (
        trimmed.reference.iter().collect(),
        trimmed.alternative.iter().collect(),
        trimmed.prefix.iter().collect(),
        trimmed.suffix.iter().collect(),
    )
}

#[cfg(test)]
mod test {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn s(x: &str) -> String {
        x.to_string()
    }

    #[rstest]
    #[case("", "", ("", "", "", ""))]
    #[case("", "C", ("", "C", "", ""))]
    #[case("C", "", ("C", "", "", ""))]
    #[case("A", "AA", ("", "A", "A", ""))]
    #[case("AT", "AG", ("T", "G", "A", ""))]
    #[case("ATCG", "AGCG", ("T", "G", "A", "CG"))]
    #[case("DP", "DKP", ("", "K", "D", "P"))]
    #[case("AAA", "AA", ("A", "", "AA", ""))]
    #[case("KGF", "DP", ("KGF", "DP", "", ""))]
    fn flanking_trim_cases(
        #[case] reference: &str,
        #[case] alternative: &str,
        #[case] expected: (&str, &str, &str, &str),
    ) {
        assert_eq!(
            trim_shared_flanking_strings(reference, alternative),
            (s(expected.0), s(expected.1), s(expected.2), s(expected.3))
        );
    }

    #[rstest]
    #[case("")]
    #[case("M")]
    #[case("MDPK")]
    #[case("AAAA")]
    fn flanking_trim_identical(#[case] x: &str) {
        let (reference, alternative, prefix, suffix) = trim_shared_flanking_strings(x, x);
        assert!(reference.is_empty());
        assert!(alternative.is_empty());
        assert_eq!(format!("{prefix}{suffix}"), x);
    }

    #[test]
    fn flanking_trim_generic() {
        let trimmed = trim_shared_flanks(&[1, 2, 3, 4], &[1, 5, 4]);
        assert_eq!(trimmed.prefix, &[1]);
        assert_eq!(trimmed.suffix, &[4]);
        assert_eq!(trimmed.reference, &[2, 3]);
        assert_eq!(trimmed.alternative, &[5]);
    }

    #[test]
    fn normalize_nucleotides_examples() -> Result<(), Error> {
        assert_eq!(normalize_nucleotides("acgt")?, "ACGT");
        assert_eq!(normalize_nucleotides("AUG")?, "ATG");
        assert_eq!(normalize_nucleotides("")?, "");
        assert_eq!(normalize_nucleotides("ggn")?, "GGN");
        assert_eq!(
            normalize_nucleotides("ACGQ"),
            Err(Error::InvalidNucleotides(s("ACGQ")))
        );

        Ok(())
    }

    #[test]
    fn translate_examples() -> Result<(), Error> {
        let table = TranslationTable::Standard;
        assert_eq!(translate("", false, table)?, "");
        assert_eq!(translate("ATGCGA", true, table)?, "MR");
        assert_eq!(translate("GATCCC", false, table)?, "DP");
        assert_eq!(translate("CTGGAT", true, table)?, "MD");
        assert_eq!(translate("CTGGAT", false, table)?, "LD");
        assert_eq!(translate("GCCTGAAAA", false, table)?, "A");
        assert_eq!(translate("TAG", false, table)?, "");
        assert_eq!(translate("GGNAAA", false, table)?, "XK");
        assert_eq!(
            translate("ATGCG", true, table),
            Err(Error::UntranslatableDnaLength(5))
        );
        assert_eq!(
            translate("ATTGAT", true, table),
            Err(Error::NotAStartCodon(s("ATT")))
        );
        assert_eq!(
            translate("", true, table),
            Err(Error::NotAStartCodon(s("")))
        );

        Ok(())
    }

    #[test]
    fn translate_selenocysteine() -> Result<(), Error> {
        assert_eq!(
            translate("ATGTGAAAATAA", true, TranslationTable::Selenocysteine)?,
            "MUK"
        );
        assert_eq!(
            translate("ATGTGAAAATAA", true, TranslationTable::Standard)?,
            "M"
        );

        Ok(())
    }

    #[test]
    fn codon_sets() {
        let mut standard: Vec<_> = TranslationTable::Standard
            .stop_codons()
            .iter()
            .copied()
            .collect();
        standard.sort();
        assert_eq!(standard, vec!["TAA", "TAG", "TGA"]);

        assert!(is_stop_codon("TAA", TranslationTable::Selenocysteine));
        assert!(!is_stop_codon("TGA", TranslationTable::Selenocysteine));

        assert!(is_start_codon("ATG", TranslationTable::Standard));
        assert!(is_start_codon("TTG", TranslationTable::Standard));
        assert!(!is_start_codon("ATT", TranslationTable::Standard));
    }

    #[test]
    fn codon_translator_standard() -> Result<(), Error> {
        let translator = CodonTranslator::new(TranslationTable::Standard);

        assert_eq!(translator.translate(b"AAA")?, b'K');
        assert_eq!(translator.translate(b"TGG")?, b'W');
        assert_eq!(translator.translate(b"TGA")?, b'*');
        assert_eq!(translator.translate(b"AAR")?, b'X');
        assert!(translator.translate(b"AA").is_err());

        Ok(())
    }
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
