use crate::affix_trie::PrefixTrie;

#[derive(Clone, Debug, Default)]
struct Rep {
    anchor_begin: bool,
    anchor_end: bool,
    from: String,
    to: String,
}

impl Rep {
    /// Call `f` with the byte offset of every place in `word` where this
    /// rep may be applied. Unanchored matches may overlap.
    fn for_each_match(&self, word: &str, mut f: impl FnMut(usize) -> bool) -> bool {
        match (self.anchor_begin, self.anchor_end) {
            (true, true) => word == self.from && f(0),
            (true, false) => word.starts_with(&self.from) && f(0),
            (false, true) => word.ends_with(&self.from) && f(word.len() - self.from.len()),
            (false, false) => {
                for (i, _) in word.char_indices() {
                    if word[i..].starts_with(&self.from) && f(i) {
                        return true;
                    }
                }
                false
            }
        }
    }
}

/// The REP table: pattern and replacement pairs in the order the affix
/// file declared them. Patterns may be anchored with `^` and `$`.
#[derive(Clone, Debug, Default)]
pub struct ReplacementTable {
    reps: Vec<Rep>,
}

impl ReplacementTable {
    pub fn push(&mut self, from: &str, to: &str) {
        let mut rep = Rep::default();
        let mut from = from;
        if let Some(f) = from.strip_prefix('^') {
            from = f;
            rep.anchor_begin = true;
        }
        if let Some(f) = from.strip_suffix('$') {
            from = f;
            rep.anchor_end = true;
        }
        if from.is_empty() {
            return;
        }
        rep.from = from.to_string();
        rep.to = to.to_string();
        self.reps.push(rep);
    }

    pub fn len(&self) -> usize {
        self.reps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reps.is_empty()
    }

    /// Produce one candidate per place where a rep applies to `word`.
    /// When `suggest` returns false, we abort.
    pub fn suggest(&self, word: &str, mut suggest: impl FnMut(String) -> bool) {
        for rep in self.reps.iter() {
            let stop = rep.for_each_match(word, |i| {
                let mut sugg = String::with_capacity(word.len() + rep.to.len());
                sugg.push_str(&word[..i]);
                sugg.push_str(&rep.to);
                sugg.push_str(&word[i + rep.from.len()..]);
                !suggest(sugg)
            });
            if stop {
                return;
            }
        }
    }
}

impl<S: AsRef<str>> FromIterator<(S, S)> for ReplacementTable {
    fn from_iter<I: IntoIterator<Item = (S, S)>>(iter: I) -> Self {
        let mut table = ReplacementTable::default();
        for (from, to) in iter {
            table.push(from.as_ref(), to.as_ref());
        }
        table
    }
}

/// Literal substring substitution where the longest pattern matching at
/// each position wins. Used for ICONV and OCONV.
#[derive(Clone, Debug, Default)]
pub struct SubstrReplacer {
    table: Vec<(String, String)>,
    trie: PrefixTrie<usize>,
}

impl SubstrReplacer {
    pub fn new<S: AsRef<str>>(pairs: &[(S, S)]) -> Self {
        let mut replacer = SubstrReplacer::default();
        for (from, to) in pairs {
            replacer.push(from.as_ref(), to.as_ref());
        }
        replacer
    }

    /// Add a pattern. Empty patterns are ignored, and so are patterns
    /// that were already added.
    pub fn push(&mut self, from: &str, to: &str) {
        if from.is_empty() || self.table.iter().any(|(f, _)| f == from) {
            return;
        }
        self.trie.insert(from, self.table.len());
        self.table.push((from.to_string(), to.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    fn longest_match(&self, text: &str) -> Option<&(String, String)> {
        let mut longest = None;
        self.trie.lookup(text, |idx| {
            longest = Some(idx);
            false
        });
        longest.map(|idx| &self.table[idx])
    }

    pub fn replace_copy(&self, text: &str) -> String {
        if self.table.is_empty() {
            return text.to_string();
        }
        let mut output = String::with_capacity(text.len());
        let mut skip_to = 0;
        for (i, c) in text.char_indices() {
            if i < skip_to {
                continue;
            }
            if let Some((from, to)) = self.longest_match(&text[i..]) {
                output.push_str(to);
                skip_to = i + from.len();
            } else {
                output.push(c);
            }
        }
        output
    }

    pub fn replace(&self, text: &mut String) {
        if !self.table.is_empty() {
            *text = self.replace_copy(text);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn collect(table: &ReplacementTable, word: &str) -> Vec<String> {
        let mut v = Vec::new();
        table.suggest(word, |s| {
            v.push(s);
            true
        });
        v
    }

    #[test]
    fn test_rep_anchors() {
        let table: ReplacementTable = [
            ("ph", "f"),
            ("shun$", "tion"),
            ("^voo", "foo"),
            ("^alot$", "a lot"),
        ]
        .into_iter()
        .collect();
        assert_eq!(4, table.len());

        assert_eq!(vec!["fat"], collect(&table, "phat"));
        assert_eq!(vec!["fphtph", "phftph", "phphtf"], collect(&table, "phphtph"));
        assert_eq!(vec!["station"], collect(&table, "stashun"));
        assert!(collect(&table, "stashuns").is_empty());
        assert_eq!(vec!["food"], collect(&table, "vood"));
        assert!(collect(&table, "vvood").is_empty());
        assert_eq!(vec!["a lot"], collect(&table, "alot"));
        assert!(collect(&table, "aalot").is_empty());
        assert!(collect(&table, "alott").is_empty());
    }

    #[test]
    fn test_rep_overlapping() {
        let table: ReplacementTable = [("aa", "b")].into_iter().collect();
        assert_eq!(vec!["baa", "aba", "aab"], collect(&table, "aaaa"));
    }

    #[test]
    fn test_rep_abort() {
        let table: ReplacementTable = [("a", "b"), ("a", "c")].into_iter().collect();
        let mut v = Vec::new();
        table.suggest("aa", |s| {
            v.push(s);
            v.len() < 3
        });
        assert_eq!(vec!["ba", "ab", "ca"], v);
    }

    #[test]
    fn test_substr_replacer() {
        let replacer = SubstrReplacer::new(&[
            ("asd", "zxc"),
            ("as", "rtt"),
            ("a", "A"),
            ("abbb", "ABBB"),
            ("asd  ", ""),
            ("asd ZXC", "YES"),
            ("sd ZXC as", "NO"),
            ("", "123"),
            (" TT", ""),
        ]);
        assert_eq!("QWE YES rtt", replacer.replace_copy("QWE asd ZXC as TT"));

        let mut s = "abbbb aasd".to_string();
        replacer.replace(&mut s);
        assert_eq!("ABBBb Azxc", s);
    }

    #[test]
    fn test_substr_replacer_first_wins() {
        let replacer = SubstrReplacer::new(&[("ß", "ss"), ("ß", "sz"), ("’", "'")]);
        assert_eq!("Strasse isn't", replacer.replace_copy("Straße isn’t"));
        assert_eq!("", SubstrReplacer::default().replace_copy(""));
    }
}
