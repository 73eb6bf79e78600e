//! Read-only records for the historical works section.
//!
//! Field names follow the bundled JSON documents (camelCase). Every record is
//! addressed by its string `id`.

use serde::{Deserialize, Serialize};

/// Titled block of prose inside a major work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquationDetail {
    pub formula: String,
    pub name: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPoint {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MajorWork {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub year: String,
    /// Kind of work as labelled by the document (book, theory, lecture...).
    #[serde(rename = "type")]
    pub kind: String,
    pub icon: String,
    pub summary: String,
    #[serde(default)]
    pub key_equation: Option<String>,
    #[serde(default)]
    pub key_equation_explanation: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub fun_facts: Vec<String>,
    #[serde(default)]
    pub equations: Vec<EquationDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Essay {
    pub id: String,
    pub title: String,
    pub year: String,
    pub publication: String,
    pub icon: String,
    pub summary: String,
    pub opening_quote: String,
    pub main_themes: Vec<String>,
    pub key_points: Vec<KeyPoint>,
    #[serde(default)]
    pub relevance_today: Vec<String>,
    #[serde(default)]
    pub closing_thought: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Letter {
    pub id: String,
    pub title: String,
    pub date: String,
    pub recipient: String,
    pub location: String,
    pub icon: String,
    pub summary: String,
    pub historical_context: String,
    pub letter_text: String,
    pub key_points: Vec<KeyPoint>,
    #[serde(default)]
    pub legacy: Option<String>,
}

/// Scientific prediction made by a paper and how it held up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub prediction: String,
    pub description: String,
    pub confirmed: String,
    pub impact: String,
}

/// One paper inside a collected series (e.g. the 1905 papers).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubPaper {
    pub number: u32,
    pub title: String,
    pub date: String,
    pub topic: String,
    pub pages: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub key_equation: Option<String>,
    #[serde(default)]
    pub key_equations: Option<Vec<String>>,
    pub impact: String,
    #[serde(default)]
    pub nobel_prize: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    pub id: String,
    pub title: String,
    pub year: String,
    pub journal: String,
    #[serde(default)]
    pub date: Option<String>,
    pub icon: String,
    pub summary: String,
    pub context: String,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub key_equations: Option<Vec<String>>,
    #[serde(default)]
    pub predictions: Option<Vec<Prediction>>,
    #[serde(default)]
    pub papers: Option<Vec<SubPaper>>,
    #[serde(default)]
    pub legacy: Option<String>,
}

impl Paper {
    /// Number of individual papers this entry stands for (1 for a single
    /// paper, the series length for a collection).
    pub fn paper_count(&self) -> usize {
        self.papers.as_ref().map_or(1, |papers| papers.len().max(1))
    }
}
