use crate::hunspell::DictBase;

/// No more than this many suggestion attempts from any one source.
pub const MAX_SUGGESTS_PER_SOURCE: usize = 1000;

/// Gathers the candidates of one suggestion source, keeping the ones
/// that the dictionary accepts.
#[derive(Clone, Debug)]
pub struct SuggCollector<'a> {
    dict: &'a DictBase,
    word: &'a str,
    suggs: Vec<String>,
    counter: usize,
}

impl<'a> SuggCollector<'a> {
    pub fn new(dict: &'a DictBase, word: &'a str) -> Self {
        SuggCollector {
            dict,
            word,
            suggs: Vec::new(),
            counter: MAX_SUGGESTS_PER_SOURCE,
        }
    }

    #[allow(dead_code)] // This function is useful when debugging
    pub fn len(&self) -> usize {
        self.suggs.len()
    }

    /// Return true iff no more suggestions should be submitted
    pub fn limit(&self) -> bool {
        self.counter == 0
    }

    /// Offer a candidate. Returns false when the source should stop.
    pub fn suggest(&mut self, sugg: String) -> bool {
        if self.limit() {
            return false;
        }
        self.counter -= 1;
        if sugg != self.word && !self.suggs.contains(&sugg) && self.dict.check_suggestion(&sugg) {
            self.suggs.push(sugg);
        }
        !self.limit()
    }
}

impl<'a> IntoIterator for SuggCollector<'a> {
    type Item = String;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.suggs.into_iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hunspell::affixdata::AffixData;
    use crate::hunspell::flagset::FlagSet;

    #[test]
    fn test_collect() {
        let dict = DictBase::from_parts(
            AffixData::new(),
            ["cat", "hat"].map(|w| (w.to_string(), FlagSet::new())),
        );
        let mut c = SuggCollector::new(&dict, "cat");
        assert!(c.suggest("cat".to_string()));
        assert!(c.suggest("hat".to_string()));
        assert!(c.suggest("hat".to_string()));
        assert!(c.suggest("bat".to_string()));
        assert_eq!(vec!["hat"], c.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_source_cap() {
        let dict = DictBase::from_parts(AffixData::new(), std::iter::empty());
        let mut c = SuggCollector::new(&dict, "x");
        let mut offered = 0;
        while c.suggest(format!("y{}", offered)) {
            offered += 1;
        }
        assert_eq!(MAX_SUGGESTS_PER_SOURCE - 1, offered);
        assert!(!c.suggest("more".to_string()));
    }
}
