/// The BREAK table: literal markers at which a word may be split into
/// separately checked parts. A marker starting with `^` only applies at
/// the start of the word, one ending with `$` only at the end.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BreakTable {
    start_word: Vec<String>,
    end_word: Vec<String>,
    middle_word: Vec<String>,
}

impl BreakTable {
    pub fn push(&mut self, pattern: &str) {
        if let Some(p) = pattern.strip_prefix('^') {
            if !p.is_empty() {
                self.start_word.push(p.to_string());
            }
        } else if let Some(p) = pattern.strip_suffix('$') {
            if !p.is_empty() {
                self.end_word.push(p.to_string());
            }
        } else if !pattern.is_empty() {
            self.middle_word.push(pattern.to_string());
        }
    }

    /// The table used when the affix file does not declare one.
    pub fn hunspell_default() -> Self {
        ["-", "^-", "-$"].into_iter().collect()
    }

    pub fn start_word_breaks(&self) -> &[String] {
        &self.start_word
    }

    pub fn end_word_breaks(&self) -> &[String] {
        &self.end_word
    }

    pub fn middle_word_breaks(&self) -> &[String] {
        &self.middle_word
    }

    pub fn is_empty(&self) -> bool {
        self.start_word.is_empty() && self.end_word.is_empty() && self.middle_word.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for BreakTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = BreakTable::default();
        for pattern in iter {
            table.push(pattern.as_ref());
        }
        table
    }
}
