use anyhow::{bail, Result};
use itertools::Itertools;

/// One MAP entry: a group of chars and char sequences that are easily
/// confused with each other, such as a letter and its accented forms.
/// Multi-char members are written in parentheses, as in `æ(ae)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimilarityGroup {
    /// In declaration order, which is also the order candidates are made in.
    tokens: Vec<String>,
}

impl SimilarityGroup {
    pub fn new(group: &str) -> Result<Self> {
        let mut tokens: Vec<String> = Vec::new();
        let mut rest = group;
        while let Some(c) = rest.chars().next() {
            match c {
                '(' => {
                    let Some(end) = rest.find(')') else {
                        bail!("unclosed parenthesis in MAP entry {}", group);
                    };
                    let token = &rest[1..end];
                    if token.is_empty() {
                        bail!("empty parentheses in MAP entry {}", group);
                    }
                    tokens.push(token.to_string());
                    rest = &rest[end + 1..];
                }
                ')' => bail!("closing parenthesis without opening in MAP entry {}", group),
                _ => {
                    tokens.push(c.to_string());
                    rest = &rest[c.len_utf8()..];
                }
            }
        }
        let tokens: Vec<String> = tokens.into_iter().unique().collect();
        if tokens.len() < 2 {
            bail!("MAP entry {} needs at least two members", group);
        }
        Ok(SimilarityGroup { tokens })
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The members that occur at the start of `text`.
    pub fn matches_at<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.tokens
            .iter()
            .map(String::as_str)
            .filter(move |t| text.starts_with(t))
    }
}
