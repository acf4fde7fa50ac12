use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::contig::Contig;

/// An ordered sequence dictionary, as found in the `@SQ` lines of a SAM
/// header, a Picard `.dict` file, or a FASTA index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceDictionary {
    /// Source file path (if known)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// All contigs, in dictionary order
    pub contigs: Vec<Contig>,

    /// Name and alias lookup into `contigs`
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl SequenceDictionary {
    #[must_use]
    pub fn new(contigs: Vec<Contig>) -> Self {
        let mut dictionary = Self {
            source: None,
            contigs,
            index: HashMap::new(),
        };

        dictionary.rebuild_index();
        dictionary
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn rebuild_index(&mut self) {
        self.index.clear();

        // Aliases first so a primary name always wins over another contig's alias
        for (i, contig) in self.contigs.iter().enumerate() {
            for alias in &contig.aliases {
                self.index.entry(alias.clone()).or_insert(i);
            }
        }
        for (i, contig) in self.contigs.iter().enumerate() {
            self.index.insert(contig.name.clone(), i);
        }
    }

    /// Look up a contig by name or alias
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Contig> {
        self.index.get(name).map(|&i| &self.contigs[i])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contigs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contigs.is_empty()
    }

    /// Total number of bases across all contigs
    #[must_use]
    pub fn total_length(&self) -> u64 {
        self.contigs.iter().map(|c| c.length).sum()
    }
}
