/// Affix conditions are rudimentary regexps (supporting [] groups and
/// [^] negated groups and '.' as wildcard). They are matched against
/// the start or end of words to determine eligibility for suffix and
/// prefix rules.
use anyhow::{bail, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
enum CondToken {
    /// `.`
    Any,
    Char(char),
    /// `[abc]`
    OneOf(String),
    /// `[^abc]`
    NoneOf(String),
}

impl CondToken {
    fn matches(&self, wc: char) -> bool {
        match self {
            CondToken::Any => true,
            CondToken::Char(c) => *c == wc,
            CondToken::OneOf(s) => s.contains(wc),
            CondToken::NoneOf(s) => !s.contains(wc),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AffixCondition {
    /// One token per char of the word that the condition examines.
    tokens: Vec<CondToken>,
}

impl AffixCondition {
    pub fn new(condition: &str) -> Result<Self> {
        let mut tokens = Vec::new();
        let mut chars = condition.chars();
        while let Some(c) = chars.next() {
            let token = match c {
                '.' => CondToken::Any,
                ']' => bail!("closing bracket without opening in condition {}", condition),
                '[' => {
                    let mut group = String::new();
                    let mut closed = false;
                    for gc in chars.by_ref() {
                        match gc {
                            ']' => {
                                closed = true;
                                break;
                            }
                            '[' => bail!("nested bracket in condition {}", condition),
                            _ => group.push(gc),
                        }
                    }
                    if !closed {
                        bail!("unclosed bracket in condition {}", condition);
                    }
                    if group.is_empty() || group == "^" {
                        bail!("empty bracket group in condition {}", condition);
                    }
                    // a caret only negates at the start of a group
                    match group.strip_prefix('^') {
                        Some(negated) => CondToken::NoneOf(negated.to_string()),
                        None => CondToken::OneOf(group),
                    }
                }
                _ => CondToken::Char(c),
            };
            tokens.push(token);
        }
        Ok(AffixCondition { tokens })
    }

    /// The number of chars this condition needs to examine.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Check that a word starting with `s` could match this condition.
    /// Only the positions covered by both are compared.
    pub fn prefix_compatible(&self, s: &str) -> bool {
        self.tokens.iter().zip(s.chars()).all(|(t, c)| t.matches(c))
    }

    /// Check that a word ending with `s` could match this condition.
    /// Only the positions covered by both are compared.
    pub fn suffix_compatible(&self, s: &str) -> bool {
        self.tokens.iter().rev().zip(s.chars().rev()).all(|(t, c)| t.matches(c))
    }

    /// The word must be at least as long as the condition.
    pub fn prefix_match(&self, word: &str) -> bool {
        let mut chars = word.chars();
        self.tokens.iter().all(|t| chars.next().map_or(false, |c| t.matches(c)))
    }

    /// The word must be at least as long as the condition.
    pub fn suffix_match(&self, word: &str) -> bool {
        let mut chars = word.chars().rev();
        self.tokens.iter().rev().all(|t| chars.next().map_or(false, |c| t.matches(c)))
    }
}
