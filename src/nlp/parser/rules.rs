//! Rule-based English parser.
//!
//! Tokens come from a Unicode-aware regex, lemmas from [`lexicon::lemmatize`]
//! and entities from ordered pattern passes over the raw text. Earlier passes
//! claim their spans first; later matches overlapping a claimed span are
//! dropped.

use std::collections::HashMap;
use std::fs;
use std::ops::Range;
use std::path::Path;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info};

use super::lexicon::{self, ACRONYM_STOPLIST};
use super::{Entity, EntityLabel, LanguageParser, ParsedDoc, ParserError, PartOfSpeech, Token};
use crate::core::config::ParserConfig;
use crate::utils::compile_patterns;


const RECOGNITION_ORDER: [EntityLabel; 8] = [
    EntityLabel::Date,
    EntityLabel::Time,
    EntityLabel::Event,
    EntityLabel::Person,
    EntityLabel::Product,
    EntityLabel::Org,
    EntityLabel::Gpe,
    EntityLabel::Loc,
];

const NAME_LABELS: [EntityLabel; 6] = [
    EntityLabel::Person,
    EntityLabel::Org,
    EntityLabel::Gpe,
    EntityLabel::Loc,
    EntityLabel::Product,
    EntityLabel::Event,
];

const SYMBOL_CHARS: &str = "$€£¥%+=<>&#@^~|°";

lazy_static! {
    static ref TOKEN_PATTERN: Vec<Regex> =
        compile_patterns(&[r"\p{N}+(?:[.,]\p{N}+)*|\p{L}+(?:['’]\p{L}+)*|[^\s\p{L}\p{N}]"]);

    static ref DATE_PATTERNS: Vec<Regex> = compile_patterns(&[
        r"\b(?:January|February|March|April|May|June|July|August|September|October|November|December)(?:\s+\d{1,2}(?:st|nd|rd|th)?)?(?:,?\s+\d{4})?\b",
        r"\b(?:Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sep|Sept|Oct|Nov|Dec)\.(?:\s+\d{1,2})?(?:,?\s+\d{4})?",
        r"\b\d{4}-\d{2}-\d{2}\b",
        r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b",
        r"\b(?:Q[1-4]|H[12])(?:\s+(?:19|20)\d{2})?\b",
        r"(?i)\b(?:first|second|third|fourth|last)\s+quarter(?:\s+of\s+(?:19|20)\d{2})?\b",
        r"(?i)\b(?:last|past|next|previous|coming|recent)\s+(?:(?:\d+|few|several|two|three|four|five|six|seven|eight|nine|ten|twelve)\s+)?(?:years?|months?|weeks?|days?|decades?|quarters?)\b",
        r"(?i)\b\d+\s+(?:years?|months?|weeks?|days?|decades?)\s+ago\b",
        r"(?i)\b(?:today|yesterday|tomorrow|this\s+(?:year|month|week|quarter)|(?:mon|tues|wednes|thurs|fri|satur|sun)day|annually|quarterly|yearly)\b",
        r"\b(?:1[89]\d{2}|20\d{2})s?\b",
    ]);

    static ref TIME_PATTERNS: Vec<Regex> = compile_patterns(&[
        r"(?i)\b\d{1,2}:\d{2}(?::\d{2})?(?:\s*[ap]m\b)?",
        r"(?i)\b\d{1,2}\s*[ap]m\b",
        r"(?i)\b(?:noon|midnight|morning|afternoon|evening|tonight)\b",
        r"(?i)\b\d+\s+(?:hours?|minutes?|seconds?)\b",
    ]);

    static ref EVENT_PATTERNS: Vec<Regex> = compile_patterns(&[
        r"\b(?:[A-Z][a-z]+[ \t]+)+(?:Summit|Conference|Festival|Championship|Expo|Games)\b",
    ]);

    static ref PERSON_PATTERNS: Vec<Regex> = compile_patterns(&[
        r"\b(?:Mr|Mrs|Ms|Dr|Prof|Sir|Dame|President|Senator|Governor)\.?[ \t]+[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)?",
    ]);

    static ref PRODUCT_PATTERNS: Vec<Regex> = compile_patterns(&[
        r"\b(?:iPhone|iPad|Galaxy|Pixel)[ \t]+(?:\d+|[A-Z]\d*|Pro|Max|Ultra|Mini)\b",
    ]);

    static ref ORG_PATTERNS: Vec<Regex> = compile_patterns(&[
        r"\b(?:[A-Z][\w&'-]*[ \t]+)+(?:Inc|Corp|Corporation|Ltd|LLC|Co|Company|Group|Holdings|Technologies|Systems|Labs|University|Institute|College|Bank|Foundation|Association|Agency|Ministry|Council|Commission|Partners)\b\.?",
        r"\b(?:University|Department|Ministry|Bank)[ \t]+of[ \t]+[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)?",
    ]);

    static ref ACRONYM_PATTERN: Vec<Regex> = compile_patterns(&[r"\b[A-Z]{2,5}\b"]);
}

fn builtin_patterns(label: EntityLabel) -> &'static [Regex] {
    match label {
        EntityLabel::Date => DATE_PATTERNS.as_slice(),
        EntityLabel::Time => TIME_PATTERNS.as_slice(),
        EntityLabel::Event => EVENT_PATTERNS.as_slice(),
        EntityLabel::Person => PERSON_PATTERNS.as_slice(),
        EntityLabel::Product => PRODUCT_PATTERNS.as_slice(),
        EntityLabel::Org => ORG_PATTERNS.as_slice(),
        EntityLabel::Gpe | EntityLabel::Loc => &[],
    }
}


pub struct RuleParser {
    gazetteer: Vec<(EntityLabel, Regex)>,
}

impl RuleParser {
    pub fn new() -> Result<Self, ParserError> {
        Self::with_entries(lexicon::builtin_gazetteer())
    }

    pub fn load(config: &ParserConfig) -> Result<Self, ParserError> {
        let mut entries = lexicon::builtin_gazetteer();
        if let Some(path) = &config.gazetteer_path {
            let extra = read_gazetteer(path)?;
            info!("Loaded {} gazetteer entries from {}", extra.len(), path.display());
            entries.extend(extra);
        }
        Self::with_entries(entries)
    }

    fn with_entries(entries: Vec<(EntityLabel, String)>) -> Result<Self, ParserError> {
        let mut by_label: HashMap<EntityLabel, Vec<String>> = HashMap::new();
        for (label, phrase) in entries {
            by_label.entry(label).or_default().push(phrase);
        }

        let mut gazetteer = Vec::with_capacity(by_label.len());
        for (label, phrases) in by_label {
            if let Some(pattern) = phrase_pattern(phrases)? {
                gazetteer.push((label, pattern));
            }
        }
        Ok(Self { gazetteer })
    }

    fn recognize(&self, text: &str) -> Vec<Entity> {
        let mut found: Vec<Entity> = Vec::new();

        for label in RECOGNITION_ORDER {
            let listed = self
                .gazetteer
                .iter()
                .filter(|(l, _)| *l == label)
                .map(|(_, pattern)| pattern);

            for pattern in listed.chain(builtin_patterns(label).iter()) {
                for m in pattern.find_iter(text) {
                    claim(&mut found, text, m.range(), label);
                }
            }
        }

        for pattern in ACRONYM_PATTERN.iter() {
            for m in pattern.find_iter(text) {
                if !ACRONYM_STOPLIST.contains(m.as_str()) {
                    claim(&mut found, text, m.range(), EntityLabel::Org);
                }
            }
        }

        found.sort_by_key(|e| e.start);
        found
    }
}

impl LanguageParser for RuleParser {
    fn parse(&self, text: &str) -> ParsedDoc {
        let sentences = split_sentences(text);
        let entities = self.recognize(text);
        let tokens = tokenize(text, &sentences, &entities);

        debug!(
            "Parsed {} tokens, {} entities, {} sentences",
            tokens.len(),
            entities.len(),
            sentences.len()
        );

        ParsedDoc {
            tokens,
            entities,
            sentences,
        }
    }
}


fn claim(found: &mut Vec<Entity>, text: &str, span: Range<usize>, label: EntityLabel) {
    if span.is_empty() || found.iter().any(|e| span.start < e.end && e.start < span.end) {
        return;
    }
    found.push(Entity {
        text: text[span.clone()].to_string(),
        label,
        start: span.start,
        end: span.end,
    });
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// One alternation over all phrases, longest first so that
/// "New York City" wins over "New York".
fn phrase_pattern(mut phrases: Vec<String>) -> Result<Option<Regex>, ParserError> {
    phrases.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    phrases.dedup();
    if phrases.is_empty() {
        return Ok(None);
    }

    let alternatives: Vec<String> = phrases
        .iter()
        .map(|phrase| {
            let mut alt = String::new();
            if phrase.starts_with(is_word_char) {
                alt.push_str(r"\b");
            }
            alt.push_str(&regex::escape(phrase));
            if phrase.ends_with(is_word_char) {
                alt.push_str(r"\b");
            }
            alt
        })
        .collect();

    Ok(Some(Regex::new(&alternatives.join("|"))?))
}

fn read_gazetteer(path: &Path) -> Result<Vec<(EntityLabel, String)>, ParserError> {
    let content = fs::read_to_string(path)?;
    let mut entries = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (label, phrase) = line.split_once('\t').ok_or_else(|| ParserError::Gazetteer {
            line: idx + 1,
            reason: "expected LABEL<TAB>phrase".to_string(),
        })?;
        let label = EntityLabel::from_str(label.trim()).map_err(|_| ParserError::Gazetteer {
            line: idx + 1,
            reason: format!("unknown label '{}'", label.trim()),
        })?;
        let phrase = phrase.trim();
        if phrase.is_empty() {
            return Err(ParserError::Gazetteer {
                line: idx + 1,
                reason: "empty phrase".to_string(),
            });
        }

        entries.push((label, phrase.to_string()));
    }

    Ok(entries)
}


/// Sentence spans, split after `.`, `!` or `?` followed by whitespace (or the
/// end of text) and at every newline. Spans are trimmed; blank ones are skipped.
fn split_sentences(text: &str) -> Vec<Range<usize>> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        let boundary = match c {
            '\n' => Some(idx),
            '.' | '!' | '?' => match chars.peek() {
                None => Some(idx + 1),
                Some((_, next)) if next.is_whitespace() => Some(idx + 1),
                _ => None,
            },
            _ => None,
        };

        if let Some(end) = boundary {
            push_trimmed(&mut sentences, text, start, end);
            start = end;
        }
    }
    push_trimmed(&mut sentences, text, start, text.len());

    sentences
}

fn push_trimmed(sentences: &mut Vec<Range<usize>>, text: &str, start: usize, end: usize) {
    let slice = &text[start..end];
    let trimmed_start = start + (slice.len() - slice.trim_start().len());
    let trimmed_end = start + slice.trim_end().len();
    if trimmed_start < trimmed_end {
        sentences.push(trimmed_start..trimmed_end);
    }
}


fn tokenize(text: &str, sentences: &[Range<usize>], entities: &[Entity]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut sentence_idx = 0;
    let mut word_seen_in: Option<usize> = None;

    for pattern in TOKEN_PATTERN.iter() {
        for m in pattern.find_iter(text) {
            let piece = m.as_str();
            let (start, end) = (m.start(), m.end());

            while sentence_idx < sentences.len() && sentences[sentence_idx].end <= start {
                sentence_idx += 1;
            }
            let in_sentence = sentences
                .get(sentence_idx)
                .is_some_and(|s| s.contains(&start));

            let starts_alnum = piece.chars().next().is_some_and(char::is_alphanumeric);
            let sentence_initial =
                starts_alnum && in_sentence && word_seen_in != Some(sentence_idx);
            if starts_alnum && in_sentence {
                word_seen_in = Some(sentence_idx);
            }

            let is_alpha = piece.chars().all(char::is_alphabetic);
            let like_num = looks_like_number(piece);
            let in_name = entities
                .iter()
                .any(|e| NAME_LABELS.contains(&e.label) && e.start <= start && end <= e.end);

            tokens.push(Token {
                text: piece.to_string(),
                lemma: lexicon::lemmatize(piece),
                pos: part_of_speech(piece, like_num, is_alpha, sentence_initial, in_name),
                like_num,
                is_alpha,
                start,
                end,
            });
        }
    }

    tokens
}

fn looks_like_number(piece: &str) -> bool {
    if piece.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return piece.replace(',', "").parse::<f64>().is_ok();
    }
    lexicon::is_number_word(piece)
}

fn part_of_speech(
    piece: &str,
    like_num: bool,
    is_alpha: bool,
    sentence_initial: bool,
    in_name: bool,
) -> PartOfSpeech {
    let Some(first) = piece.chars().next() else {
        return PartOfSpeech::Other;
    };

    if like_num {
        return PartOfSpeech::Number;
    }
    if !first.is_alphanumeric() {
        return if SYMBOL_CHARS.contains(first) {
            PartOfSpeech::Symbol
        } else {
            PartOfSpeech::Punctuation
        };
    }

    if is_alpha && first.is_uppercase() && piece != "I" {
        let acronym = piece.chars().count() >= 2 && piece.chars().all(char::is_uppercase);
        if !sentence_initial || acronym || in_name {
            return PartOfSpeech::ProperNoun;
        }
    }

    PartOfSpeech::Other
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parser() -> RuleParser {
        RuleParser::new().unwrap()
    }

    fn labels(doc: &ParsedDoc) -> Vec<(EntityLabel, &str)> {
        doc.entities.iter().map(|e| (e.label, e.text.as_str())).collect()
    }

    #[test]
    fn test_tokens_carry_lemma_and_pos() {
        let doc = parser().parse("Revenue grew from $1M in 2019 to $1.2M in 2020.");

        let texts: Vec<&str> = doc.tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["Revenue", "grew", "from", "$", "1", "M", "in", "2019", "to", "$", "1.2", "M", "in", "2020", "."]
        );

        let grew = &doc.tokens[1];
        assert_eq!(grew.lemma, "grow");
        assert!(grew.is_alpha);

        assert_eq!(doc.tokens[0].pos, PartOfSpeech::Other);
        assert_eq!(doc.tokens[3].pos, PartOfSpeech::Symbol);
        assert_eq!(doc.tokens[4].pos, PartOfSpeech::Number);
        assert_eq!(doc.tokens[5].pos, PartOfSpeech::ProperNoun);
        assert_eq!(doc.tokens[14].pos, PartOfSpeech::Punctuation);
        assert_eq!(doc.tokens.iter().filter(|t| t.like_num).count(), 4);

        assert_eq!(doc.count_label(EntityLabel::Date), 2);
    }

    #[test]
    fn test_dates_and_times() {
        let doc = parser().parse("Sales peaked on March 3, 2021 at 10:30 am, up over the last 5 years.");
        let found = labels(&doc);
        assert!(found.contains(&(EntityLabel::Date, "March 3, 2021")));
        assert!(found.contains(&(EntityLabel::Time, "10:30 am")));
        assert!(found.contains(&(EntityLabel::Date, "last 5 years")));
    }

    #[test]
    fn test_places_prefer_longest_name() {
        let doc = parser().parse("Offices in Tokyo, London and New York.");
        assert_eq!(
            doc.entity_texts(&[EntityLabel::Gpe]),
            vec!["Tokyo".to_string(), "London".to_string(), "New York".to_string()]
        );
    }

    #[test]
    fn test_organisations_and_acronym_stoplist() {
        let doc = parser().parse("Acme Corp and Google compete with NASA.");
        assert_eq!(doc.count_label(EntityLabel::Org), 3);

        let doc = parser().parse("The CEO reviewed KPI data for ACME.");
        assert_eq!(doc.entity_texts(&[EntityLabel::Org]), vec!["ACME".to_string()]);
    }

    #[test]
    fn test_person_title() {
        let doc = parser().parse("Dr. Jane Smith presented the results.");
        assert!(labels(&doc).contains(&(EntityLabel::Person, "Dr. Jane Smith")));
    }

    #[test]
    fn test_sentence_splitting() {
        let text = "First point. Second point!\nThird line";
        let doc = parser().parse(text);
        let sentences: Vec<&str> = doc.sentences.iter().map(|r| &text[r.clone()]).collect();
        assert_eq!(sentences, vec!["First point.", "Second point!", "Third line"]);

        let doc = parser().parse("Value is 1.5 today.");
        assert_eq!(doc.sentences.len(), 1);
    }

    #[test]
    fn test_sentences_with_entities() {
        let doc = parser().parse("Google grew. Apple fell. Sales rose.");
        assert_eq!(doc.sentences_with(&[EntityLabel::Org]), 2);
    }

    #[test]
    fn test_capitalised_words_after_sentence_start_are_proper_nouns() {
        let doc = parser().parse("Engineering: 40%, Sales: 30%");
        let pos: Vec<(&str, PartOfSpeech)> = doc.tokens.iter().map(|t| (t.text.as_str(), t.pos)).collect();
        assert!(pos.contains(&("Engineering", PartOfSpeech::Other)));
        assert!(pos.contains(&("Sales", PartOfSpeech::ProperNoun)));
        assert_eq!(doc.tokens.iter().filter(|t| t.text == "%").count(), 2);
    }

    #[test]
    fn test_gazetteer_file_extends_builtin_entries() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# custom places\nGPE\tAtlantis\nPRODUCT\tWidgetPro").unwrap();

        let config = ParserConfig {
            gazetteer_path: Some(file.path().to_path_buf()),
        };
        let parser = RuleParser::load(&config).unwrap();
        let doc = parser.parse("Atlantis buys WidgetPro units.");
        let found = labels(&doc);
        assert!(found.contains(&(EntityLabel::Gpe, "Atlantis")));
        assert!(found.contains(&(EntityLabel::Product, "WidgetPro")));
    }

    #[test]
    fn test_gazetteer_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "NOPE\tSomething").unwrap();
        let config = ParserConfig {
            gazetteer_path: Some(file.path().to_path_buf()),
        };
        assert!(matches!(
            RuleParser::load(&config),
            Err(ParserError::Gazetteer { line: 1, .. })
        ));

        let config = ParserConfig {
            gazetteer_path: Some("/nonexistent/gazetteer.tsv".into()),
        };
        assert!(matches!(RuleParser::load(&config), Err(ParserError::Io(_))));
    }
}
