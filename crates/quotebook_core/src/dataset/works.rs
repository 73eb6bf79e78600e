//! Works documents: major works, essays, letters and papers.

use super::{DatasetError, DatasetResult};
use crate::model::works::{Essay, Letter, MajorWork, Paper};
use log::info;
use serde::de::DeserializeOwned;
use std::path::Path;

const MAJOR_WORKS_FILE: &str = "major_works.json";
const ESSAYS_FILE: &str = "essays.json";
const LETTERS_FILE: &str = "letters.json";
const PAPERS_FILE: &str = "papers.json";

/// Raw JSON text of the four works documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorksDocuments {
    pub major_works: String,
    pub essays: String,
    pub letters: String,
    pub papers: String,
}

impl WorksDocuments {
    /// Reads the four documents from a bundle directory.
    pub fn read_dir(dir: impl AsRef<Path>) -> DatasetResult<Self> {
        let dir = dir.as_ref();
        let read = |name: &str| {
            let path = dir.join(name);
            std::fs::read_to_string(&path).map_err(|source| DatasetError::Io { path, source })
        };
        Ok(Self {
            major_works: read(MAJOR_WORKS_FILE)?,
            essays: read(ESSAYS_FILE)?,
            letters: read(LETTERS_FILE)?,
            papers: read(PAPERS_FILE)?,
        })
    }
}

/// Parsed, immutable works section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorksCatalog {
    major_works: Vec<MajorWork>,
    essays: Vec<Essay>,
    letters: Vec<Letter>,
    papers: Vec<Paper>,
}

impl WorksCatalog {
    /// Parses all four documents; the first malformed one fails the load.
    pub fn parse(documents: &WorksDocuments) -> DatasetResult<Self> {
        let catalog = Self {
            major_works: parse_list(&documents.major_works, MAJOR_WORKS_FILE)?,
            essays: parse_list(&documents.essays, ESSAYS_FILE)?,
            letters: parse_list(&documents.letters, LETTERS_FILE)?,
            papers: parse_list(&documents.papers, PAPERS_FILE)?,
        };
        info!(
            "event=works_load module=dataset status=ok major_works={} essays={} letters={} papers={}",
            catalog.major_works.len(),
            catalog.essays.len(),
            catalog.letters.len(),
            catalog.papers.len()
        );
        Ok(catalog)
    }

    pub fn from_dir(dir: impl AsRef<Path>) -> DatasetResult<Self> {
        Self::parse(&WorksDocuments::read_dir(dir)?)
    }

    pub fn major_works(&self) -> &[MajorWork] {
        &self.major_works
    }

    pub fn essays(&self) -> &[Essay] {
        &self.essays
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    pub fn major_work(&self, id: &str) -> Option<&MajorWork> {
        self.major_works.iter().find(|work| work.id == id)
    }

    pub fn essay(&self, id: &str) -> Option<&Essay> {
        self.essays.iter().find(|essay| essay.id == id)
    }

    pub fn letter(&self, id: &str) -> Option<&Letter> {
        self.letters.iter().find(|letter| letter.id == id)
    }

    pub fn paper(&self, id: &str) -> Option<&Paper> {
        self.papers.iter().find(|paper| paper.id == id)
    }

    /// Total number of papers, counting each paper of a series separately.
    pub fn total_paper_count(&self) -> usize {
        self.papers.iter().map(Paper::paper_count).sum()
    }
}

fn parse_list<T: DeserializeOwned>(json: &str, document: &str) -> DatasetResult<Vec<T>> {
    serde_json::from_str(json).map_err(|source| DatasetError::Json {
        document: document.to_string(),
        source,
    })
}
