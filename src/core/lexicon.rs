use std::collections::BTreeMap;
use thiserror::Error;

use crate::models::{Attribute, TechniqueCode};

/// Lookup failure in a lexicon table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown code {code} for {table}")]
pub struct LexiconError {
    pub table: &'static str,
    pub code: u32,
}

/// Fixed code-to-label table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    name: &'static str,
    labels: BTreeMap<u32, String>,
}

impl Lexicon {
    pub fn new<I, S>(name: &'static str, entries: I) -> Self
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        Self {
            name,
            labels: entries.into_iter().map(|(code, label)| (code, label.into())).collect(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Resolve a code to its display label
    pub fn resolve(&self, code: u32) -> Result<&str, LexiconError> {
        self.labels
            .get(&code)
            .map(String::as_str)
            .ok_or(LexiconError { table: self.name, code })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn codes(&self) -> impl Iterator<Item = u32> + '_ {
        self.labels.keys().copied()
    }
}

/// The full set of lexicons used by the prediction pipeline
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLexicon {
    attributes: [Lexicon; 7],
    technique: Lexicon,
}

impl CategoryLexicon {
    /// Build from one table per attribute (in `Attribute::ALL` order) plus
    /// the technique table
    pub fn new(attributes: [Lexicon; 7], technique: Lexicon) -> Self {
        Self { attributes, technique }
    }

    /// Tables matching the deployed classifier's training labels
    pub fn standard() -> Self {
        Self::new(
            [
                Lexicon::new("GayaBelajar", [(0, "Auditory"), (1, "Kinestetik"), (2, "Visual")]),
                Lexicon::new("Suasana", [(0, "Individual"), (1, "Sosial")]),
                Lexicon::new(
                    "Durasi",
                    [
                        (0, "Panjang (Lebih dari 60 menit)"),
                        (1, "Sedang (40 - 50 Menit)"),
                        (2, "Singkat (15 - 25 Menit)"),
                    ],
                ),
                Lexicon::new("Interval", [(0, "Ya"), (1, "Tidak")]),
                Lexicon::new(
                    "Tujuan",
                    [
                        (0, "Jangka Panjang (Pemahaman Mendalam)"),
                        (1, "Jangka Pendek (Ujian)"),
                        (2, "Kebutuhan Khusus (Interview)"),
                        (3, "Pengembangan Pribadi (Memperdalam Pengetahuan Keterampilan)"),
                    ],
                ),
                Lexicon::new("Kesulitan", [(0, "Mudah"), (1, "Sulit"), (2, "Sedang")]),
                Lexicon::new("Pemahaman", [(0, "Sedang"), (1, "Tinggi"), (2, "Rendah")]),
            ],
            Lexicon::new(
                "MetodeBelajar",
                [
                    (0, "Feynman"),
                    (1, "Active Recall"),
                    (2, "Circuit Learning"),
                    (3, "Pomodoro"),
                    (4, "SQ3R"),
                    (5, "Mind Mapping"),
                    (6, "Note Taking"),
                ],
            ),
        )
    }

    /// Table for a categorical attribute
    pub fn attribute(&self, attribute: Attribute) -> &Lexicon {
        &self.attributes[attribute.index()]
    }

    /// Table for classifier output codes
    pub fn technique(&self) -> &Lexicon {
        &self.technique
    }

    pub fn resolve_technique(&self, code: TechniqueCode) -> Result<&str, LexiconError> {
        self.technique.resolve(code.0)
    }
}

impl Default for CategoryLexicon {
    fn default() -> Self {
        Self::standard()
    }
}
