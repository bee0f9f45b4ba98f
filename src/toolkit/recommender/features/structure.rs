//! Layout analysis of the response text: tables, lists, indentation and
//! entity density.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use super::extractor::list_counts;
use super::models::StructureFeatures;
use crate::nlp::parser::{EntityLabel, ParsedDoc};
use crate::utils::{compile_patterns, count_matches};

const TABLE_SAMPLE_LINES: usize = 10;

lazy_static! {
    static ref KEY_VALUE: Vec<Regex> = compile_patterns(&[r"(\w+):\s*([^\n]+)"]);
}


/// Analyses `response`; `doc` is its parse.
pub fn analyze_structure(response: &str, doc: &ParsedDoc) -> StructureFeatures {
    let rows: Vec<&str> = response.split('\n').collect();
    let (bullets, numbered) = list_counts(response);

    StructureFeatures {
        has_table: rows.len() > 3 && has_table(&rows),
        has_lists: bullets > 3 || numbered > 3,
        has_hierarchy: has_indented_hierarchy(&rows),
        has_dated_sequence: doc.count_label(EntityLabel::Date) > 2
            || doc.count_label(EntityLabel::Time) > 1,
        has_categories: doc.count_labels(&[
            EntityLabel::Org,
            EntityLabel::Product,
            EntityLabel::Gpe,
            EntityLabel::Person,
            EntityLabel::Event,
        ]) > 3
            || doc.sentences_with(&[EntityLabel::Org, EntityLabel::Product, EntityLabel::Gpe]) > 2,
        has_key_value: count_matches(&KEY_VALUE, response) > 3,
    }
}

/// A delimiter occurs equally often on each of the first non-empty lines.
fn has_table(rows: &[&str]) -> bool {
    let sample: Vec<&str> = rows
        .iter()
        .copied()
        .filter(|row| !row.trim().is_empty())
        .take(TABLE_SAMPLE_LINES)
        .collect();

    consistent_count(&sample, '|', 1) || consistent_count(&sample, ',', 2) || consistent_count(&sample, '\t', 0)
}

fn consistent_count(sample: &[&str], delimiter: char, more_than: usize) -> bool {
    let mut counts = sample.iter().map(|row| row.matches(delimiter).count());
    match counts.next() {
        Some(first) => first > more_than && counts.all(|c| c == first),
        None => false,
    }
}

fn has_indented_hierarchy(rows: &[&str]) -> bool {
    let indents: Vec<usize> = rows
        .iter()
        .filter(|row| !row.trim().is_empty())
        .map(|row| row.chars().count() - row.trim_start().chars().count())
        .collect();

    if indents.len() <= 3 {
        return false;
    }
    let unique = indents.iter().collect::<HashSet<_>>().len();
    let deepest = indents.iter().copied().max().unwrap_or(0);
    unique > 2 && deepest > 4
}
