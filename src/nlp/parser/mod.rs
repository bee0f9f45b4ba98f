//! Natural-language parsing for feature extraction.
//!
//! A [`LanguageParser`] turns text into a [`ParsedDoc`]: tokens with lemma and
//! part of speech, named entities and sentence spans. Offsets are byte offsets
//! into the parsed text.

mod lexicon;
mod rules;

use std::ops::Range;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use thiserror::Error;

pub use rules::RuleParser;


#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Gazetteer I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed gazetteer line {line}: {reason}")]
    Gazetteer { line: usize, reason: String },

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}


pub trait LanguageParser: Send + Sync {
    fn parse(&self, text: &str) -> ParsedDoc;
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    Person,
    Org,
    Gpe,
    Loc,
    Date,
    Time,
    Product,
    Event,
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartOfSpeech {
    ProperNoun,
    Number,
    Punctuation,
    Symbol,
    Other,
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub like_num: bool,
    pub is_alpha: bool,
    pub start: usize,
    pub end: usize,
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}


#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedDoc {
    pub tokens: Vec<Token>,
    pub entities: Vec<Entity>,
    pub sentences: Vec<Range<usize>>,
}

impl ParsedDoc {
    pub fn count_label(&self, label: EntityLabel) -> usize {
        self.entities.iter().filter(|e| e.label == label).count()
    }

    pub fn count_labels(&self, labels: &[EntityLabel]) -> usize {
        self.entities.iter().filter(|e| labels.contains(&e.label)).count()
    }

    pub fn entity_texts(&self, labels: &[EntityLabel]) -> Vec<String> {
        self.entities
            .iter()
            .filter(|e| labels.contains(&e.label))
            .map(|e| e.text.clone())
            .collect()
    }


    /// Number of sentences holding at least one entity with one of `labels`.
    pub fn sentences_with(&self, labels: &[EntityLabel]) -> usize {
        self.sentences
            .iter()
            .filter(|sentence| {
                self.entities.iter().any(|e| {
                    labels.contains(&e.label) && e.start >= sentence.start && e.end <= sentence.end
                })
            })
            .count()
    }
}
