//! Static data.
//!
//! Reference assemblies and the aliases used to recognize them in free text
//! such as FASTA file paths.

use std::{fmt::Display, str::FromStr};

use enum_map::{enum_map, Enum, EnumMap};
use serde::{Deserialize, Serialize};

pub use crate::static_data::error::Error;

mod error {
    /// Error type for reference assembly lookup.
    #[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
    pub enum Error {
        #[error("failed to infer genome assembly name for {0:?}")]
        UnknownReferenceName(String),
    }
}

#[derive(Debug, Serialize, Deserialize, Enum, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Assembly {
    Ncbi36,
    Grch37,
    Grch38,
    Grcm37,
    Grcm38,
}

impl Assembly {
    /// Canonical name, as used by Ensembl.
    pub fn name(&self) -> &'static str {
        match self {
            Assembly::Ncbi36 => "NCBI36",
            Assembly::Grch37 => "GRCh37",
            Assembly::Grch38 => "GRCh38",
            Assembly::Grcm37 => "GRCm37",
            Assembly::Grcm38 => "GRCm38",
        }
    }

    /// Alternative names, not including the canonical one.
    pub fn aliases(&self) -> &'static [&'static str] {
        &ASSEMBLY_ALIASES[*self]
    }
}

impl Display for Assembly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Assembly {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        infer_reference_name(s)
    }
}

lazy_static::lazy_static! {
    /// Aliases for each assembly.
    ///
    /// NCBI builds and hg releases are not identical, but the differences
    /// are all on chrM and unplaced contigs.
    pub static ref ASSEMBLY_ALIASES: EnumMap<Assembly, Vec<&'static str>> = enum_map! {
        Assembly::Ncbi36 => vec!["hg18", "B36", "NCBI36"],
        Assembly::Grch37 => vec!["hg19", "B37", "NCBI37"],
        Assembly::Grch38 => vec!["hg38", "B38", "NCBI38"],
        Assembly::Grcm37 => vec!["mm9"],
        Assembly::Grcm38 => vec![
            "mm10",
            "GCF_000001635.24", // GRCm38.p4
            "GCF_000001635.23", // GRCm38.p3
            "GCF_000001635.22", // GRCm38.p2
            "GCF_000001635.21", // GRCm38.p1
            "GCF_000001635.20", // GRCm38
        ],
    };
}

/// Infer the assembly from a string containing its name, e.g., the path to
/// the reference FASTA file.
///
/// Names are matched case-insensitively as substrings.  Assemblies are tried
/// in reverse alphabetical order of their canonical name, so `GRCh38` is
/// preferred over `GRCh37`.
pub fn infer_reference_name(reference_name_or_path: &str) -> Result<Assembly, Error> {
    let haystack = reference_name_or_path.to_lowercase();

    let mut assemblies: Vec<Assembly> = ASSEMBLY_ALIASES.iter().map(|(a, _)| a).collect();
    assemblies.sort_by(|a, b| b.name().cmp(a.name()));

    assemblies
        .into_iter()
        .find(|assembly| {
            std::iter::once(assembly.name())
                .chain(assembly.aliases().iter().copied())
                .any(|candidate| haystack.contains(&candidate.to_lowercase()))
        })
        .ok_or_else(|| Error::UnknownReferenceName(reference_name_or_path.to_owned()))
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::{infer_reference_name, Assembly, Error};

    #[rstest]
    #[case("path/to/hg19/file", Assembly::Grch37)]
    #[case("GRCh38.primary_assembly.genome.fa", Assembly::Grch38)]
    #[case("/data/B37/human_g1k_v37.fasta", Assembly::Grch37)]
    #[case("HG18", Assembly::Ncbi36)]
    #[case("mm10.fa.gz", Assembly::Grcm38)]
    #[case("GCF_000001635.22_GRCm38.p2_genomic.fna", Assembly::Grcm38)]
    #[case("mm9", Assembly::Grcm37)]
    fn infer(#[case] name: &str, #[case] expected: Assembly) -> Result<(), Error> {
        assert_eq!(infer_reference_name(name)?, expected);
        Ok(())
    }

    #[test]
    fn infer_unknown() {
        assert_eq!(
            infer_reference_name("unknown_genome"),
            Err(Error::UnknownReferenceName("unknown_genome".to_string()))
        );
        assert!(infer_reference_name("").is_err());
    }

    #[test]
    fn display_and_from_str() -> Result<(), Error> {
        assert_eq!(format!("{}", infer_reference_name("path/to/hg19/file")?), "GRCh37");
        assert_eq!("hg38".parse::<Assembly>()?, Assembly::Grch38);
        assert_eq!(Assembly::Grcm37.aliases(), &["mm9"]);
        Ok(())
    }

    #[test]
    fn ncbi36_is_tried_first() {
        // Matches both NCBI36 and GRCh37 aliases.
        assert_eq!(infer_reference_name("hg19_vs_hg18"), Ok(Assembly::Ncbi36));
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
