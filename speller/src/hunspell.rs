use fnv::FnvHashMap;
use itertools::Itertools;
use log::debug;
use rayon::prelude::*;
use smallvec::SmallVec;
use std::fs::read;
use std::path::Path;
use unicode_casing::CharExt;
use unicode_titlecase::StrTitleCase;

pub mod affixdata;
pub mod affixentry;
pub mod breaktable;
pub mod condition;
pub mod flagset;
pub mod keyboard;
mod parse_aff;
mod parse_dic;
pub mod replacements;
pub mod similarity;
mod stripping;
mod suggcollector;
mod suggestions;
pub mod wordflags;

use crate::error::LoadError;
use crate::hunspell::affixdata::AffixData;
use crate::hunspell::flagset::FlagSet;
use crate::hunspell::parse_aff::parse_affix_data;
use crate::hunspell::parse_dic::{decode, detect_encoding, parse_dictionary};
use crate::hunspell::stripping::strip_affixes;
use crate::hunspell::suggcollector::SuggCollector;
use crate::hunspell::suggestions::{
    bad_char_suggestions, extra_char_suggestions, forgotten_char_suggestions,
    keyboard_suggestions, map_suggestions, rep_suggestions,
};
use crate::hunspell::wordflags::WordFlags;
use crate::Speller;

pub use crate::hunspell::suggcollector::MAX_SUGGESTS_PER_SOURCE;

/// Tokens longer than this many chars are rejected without checking.
pub const DEFAULT_MAX_WORD_LEN: usize = 180;
/// A limit on the recursive attempts to break a word at breakpoints such as -
pub const MAX_BREAK_DEPTH: usize = 9;

/// The homonyms of each word, in the order they were loaded.
pub(crate) type WordTable = FnvHashMap<String, SmallVec<[WordInfo; 1]>>;

/// Results of checking spans of one word, by (start, end, depth).
type BreakMemo = FnvHashMap<(usize, usize, usize), bool>;

/// A suggestion strategy. They all take the word in its internal form.
type SuggestFn = fn(&DictBase, &str) -> Vec<String>;

/// A dictionary loaded from Hunspell-format affix and word files,
/// checking words and suggesting corrections.
#[derive(Clone, Debug)]
pub struct DictBase {
    affix_data: AffixData,
    words: WordTable,
    max_word_len: Option<usize>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct WordInfo {
    pub word_flags: WordFlags,
    pub affix_flags: FlagSet,
}

impl WordInfo {
    pub fn new(word_flags: WordFlags, affix_flags: FlagSet) -> Self {
        WordInfo {
            word_flags,
            affix_flags,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CapStyle {
    /// No uppercase letters, including words without letters
    Lowercase,
    /// One uppercase letter, at the start
    Capitalized,
    /// No lowercase letters
    AllCaps,
    /// Uppercase letters after a lowercase start, as in "iPod"
    Camel,
    /// Uppercase letters after an uppercase start, as in "OpenGL"
    Pascal,
}

impl CapStyle {
    pub fn from_str(word: &str) -> Self {
        let mut upper = 0;
        let mut lower = 0;
        let mut first_upper = None;
        for c in word.chars() {
            let is_upper = c.is_uppercase() || c.is_titlecase();
            if is_upper {
                upper += 1;
            } else if c.is_lowercase() {
                lower += 1;
            } else {
                continue;
            }
            first_upper.get_or_insert(is_upper);
        }
        match (upper, lower, first_upper) {
            (0, _, _) => CapStyle::Lowercase,
            (_, 0, _) => CapStyle::AllCaps,
            (1, _, Some(true)) => CapStyle::Capitalized,
            (_, _, Some(true)) => CapStyle::Pascal,
            _ => CapStyle::Camel,
        }
    }
}

/// Allow numbers with dots or commas,
/// and -- at the end and - at the front
fn is_numeric(word: &str) -> bool {
    let word = word.strip_suffix("--").unwrap_or(word);
    let word = word.strip_prefix('-').unwrap_or(word);
    if word.is_empty() {
        return false;
    }
    let mut seen_digit = false;
    for c in word.chars() {
        if c == '.' || c == ',' {
            if !seen_digit {
                return false;
            }
            seen_digit = false;
        } else if c.is_ascii_digit() {
            seen_digit = true;
        } else {
            return false;
        }
    }
    true
}

/// Uppercase the first char and lowercase the rest.
fn title_case(word: &str) -> String {
    word.to_titlecase_lower_rest()
}

impl DictBase {
    /// Load a dictionary from a word file and an affix file.
    pub fn new(dictionary: &Path, affixes: &Path) -> Result<Self, LoadError> {
        let read_file = |path: &Path| {
            read(path).map_err(|source| LoadError::NotFound {
                path: path.to_path_buf(),
                source,
            })
        };
        let aff = read_file(affixes)?;
        let dic = read_file(dictionary)?;
        Self::from_bytes(&aff, &dic)
    }

    /// Load a dictionary from the raw contents of its affix and word
    /// files, decoding them according to the affix file's SET directive.
    pub fn from_bytes(aff: &[u8], dic: &[u8]) -> Result<Self, LoadError> {
        let encoding = detect_encoding(aff);
        let aff = decode(aff, encoding.as_deref())?;
        let dic = decode(dic, encoding.as_deref())?;
        Self::from_text(&aff, &dic)
    }

    /// Load a dictionary from the text of its affix and word files.
    pub fn from_text(aff: &str, dic: &str) -> Result<Self, LoadError> {
        let affix_data = parse_affix_data(aff)?;
        let words = parse_dictionary(dic, &affix_data)?;
        Ok(Self::from_parts(affix_data, words))
    }

    /// Build a dictionary from already parsed affix data and words.
    pub fn from_parts(affix_data: AffixData, words: impl IntoIterator<Item = (String, FlagSet)>) -> Self {
        let mut dict = DictBase {
            affix_data,
            words: WordTable::default(),
            max_word_len: Some(DEFAULT_MAX_WORD_LEN),
        };
        for (word, affix_flags) in words {
            let word = dict.erase_ignored(word);
            if word.is_empty() {
                continue;
            }
            let word_flags = WordFlags::from_flagset(&affix_flags, &dict.affix_data.special_flags);
            let winfo = WordInfo::new(word_flags, affix_flags);
            dict.words.entry(word).or_default().push(winfo);
        }
        // Words with mixed case get an all-caps copy, so that they are
        // accepted when written in all caps for emphasis.
        let mut addvec = Vec::new();
        for (word, homonyms) in dict.words.iter() {
            if !matches!(CapStyle::from_str(word), CapStyle::Camel | CapStyle::Pascal) {
                continue;
            }
            for winfo in homonyms.iter() {
                // "forbidden" and "keepcase" entries are case sensitive,
                // so don't upcase them
                if !winfo
                    .word_flags
                    .intersects(WordFlags::Forbidden | WordFlags::KeepCase)
                {
                    let mut hidden = winfo.clone();
                    hidden.word_flags |= WordFlags::HiddenHomonym;
                    addvec.push((word.to_uppercase(), hidden));
                }
            }
        }
        // Ensure a stable result regardless of hash order above
        addvec.sort_by(|(a, _), (b, _)| a.cmp(b));
        let hidden_count = addvec.len();
        for (word, winfo) in addvec.drain(..) {
            dict.words.entry(word).or_default().push(winfo);
        }
        debug!(
            "loaded {} distinct words, including {} hidden homonyms",
            dict.words.len(),
            hidden_count
        );
        dict
    }

    pub fn affix_data(&self) -> &AffixData {
        &self.affix_data
    }

    pub fn max_word_len(&self) -> Option<usize> {
        self.max_word_len
    }

    /// Change the length limit for checked words. `None` removes it.
    pub fn set_max_word_len(&mut self, max_word_len: Option<usize>) {
        self.max_word_len = max_word_len;
    }

    fn erase_ignored(&self, mut word: String) -> String {
        if !self.affix_data.ignore_chars.is_empty() {
            word.retain(|c| !self.affix_data.ignore_chars.contains(c));
        }
        word
    }

    /// Bring a token into the form the dictionary stores words in.
    /// Returns None if it is too long to check.
    fn normalize(&self, word: &str) -> Option<String> {
        let word = self.affix_data.iconv.replace_copy(word);
        let word = self.erase_ignored(word.trim().to_string());
        match self.max_word_len {
            Some(max) if word.chars().count() > max => None,
            _ => Some(word),
        }
    }

    /// Returns true if the word is correctly spelled.
    pub fn spell(&self, word: &str) -> bool {
        match self.normalize(word) {
            Some(word) => self.spell_normalized(&word),
            None => false,
        }
    }

    fn spell_normalized(&self, word: &str) -> bool {
        if word.is_empty() || is_numeric(word) {
            return true;
        }
        // Abbreviations may end in a dot
        let bare = word.trim_end_matches('.');
        if bare.is_empty() {
            return true;
        }
        if self.spell_break(bare) {
            return true;
        }
        if bare.len() < word.len() {
            let abbreviation = format!("{}.", bare);
            return self.spell_break(&abbreviation);
        }
        false
    }

    fn is_rejected(&self, winfo: &WordInfo) -> bool {
        winfo.word_flags.contains(WordFlags::Forbidden)
            || (self.affix_data.forbid_warn && winfo.word_flags.contains(WordFlags::Warn))
    }

    // Check a word against the dictionary and try word breaks
    fn spell_break(&self, word: &str) -> bool {
        let mut memo = BreakMemo::default();
        self.spell_break_span(word, 0, word.len(), 0, &mut memo)
    }

    // Check the part of `word` between byte offsets `start` and `end`.
    // Each span is only checked once per depth.
    fn spell_break_span(
        &self,
        word: &str,
        start: usize,
        end: usize,
        depth: usize,
        memo: &mut BreakMemo,
    ) -> bool {
        if let Some(known) = memo.get(&(start, end, depth)) {
            return *known;
        }
        let result = self.spell_break_uncached(word, start, end, depth, memo);
        memo.insert((start, end, depth), result);
        result
    }

    fn spell_break_uncached(
        &self,
        word: &str,
        start: usize,
        end: usize,
        depth: usize,
        memo: &mut BreakMemo,
    ) -> bool {
        let span = &word[start..end];
        if let Some(winfo) = self.spell_casing(span) {
            return !self.is_rejected(winfo);
        }
        if depth == MAX_BREAK_DEPTH {
            return false;
        }
        let table = &self.affix_data.break_table;

        for pat in table.start_word_breaks() {
            if span.starts_with(pat.as_str())
                && self.spell_break_span(word, start + pat.len(), end, depth + 1, memo)
            {
                return true;
            }
        }
        for pat in table.end_word_breaks() {
            if span.ends_with(pat.as_str())
                && self.spell_break_span(word, start, end - pat.len(), depth + 1, memo)
            {
                return true;
            }
        }

        // Try breaking the word into two pieces at every occurrence.
        // The pieces must not be empty.
        for pat in table.middle_word_breaks() {
            for (i, _) in span.char_indices().skip(1) {
                if i + pat.len() >= span.len() || !span[i..].starts_with(pat.as_str()) {
                    continue;
                }
                let split = start + i;
                if self.spell_break_span(word, start, split, depth + 1, memo)
                    && self.spell_break_span(word, split + pat.len(), end, depth + 1, memo)
                {
                    return true;
                }
            }
        }
        false
    }

    /// Find the dictionary entry for a word, trying other case forms
    /// according to how the word is capitalized.
    fn spell_casing(&self, word: &str) -> Option<&WordInfo> {
        match CapStyle::from_str(word) {
            CapStyle::Lowercase | CapStyle::Camel | CapStyle::Pascal => self.check_word(word, false),
            CapStyle::AllCaps => self.spell_casing_upper(word),
            CapStyle::Capitalized => self.spell_casing_title(word),
        }
    }

    fn not_keep_case(winfo: &WordInfo) -> bool {
        !winfo.word_flags.contains(WordFlags::KeepCase)
    }

    fn spell_casing_upper(&self, word: &str) -> Option<&WordInfo> {
        if let Some(winfo) = self.check_word(word, true) {
            return Some(winfo);
        }

        // Handle prefixes separated by an apostrophe, as in
        // SANT'ELIA -> Sant'Elia or D'OSORMORT -> d'Osormort
        if let Some(apos) = word.find('\'') {
            let (part1, part2) = word.split_at(apos + 1);
            if !part2.is_empty() {
                let part2 = title_case(part2);
                let t = format!("{}{}", part1.to_lowercase(), part2);
                if let Some(winfo) = self.check_word(&t, false) {
                    return Some(winfo);
                }
                let t = format!("{}{}", title_case(part1), part2);
                if let Some(winfo) = self.check_word(&t, false) {
                    return Some(winfo);
                }
            }
        }

        let title = title_case(word);
        if let Some(winfo) = self.check_word(&title, false).filter(|w| Self::not_keep_case(w)) {
            return Some(winfo);
        }
        let lower = word.to_lowercase();
        self.check_word(&lower, false).filter(|w| Self::not_keep_case(w))
    }

    fn spell_casing_title(&self, word: &str) -> Option<&WordInfo> {
        if let Some(winfo) = self.check_word(word, false) {
            return Some(winfo);
        }
        let lower = word.to_lowercase();
        self.check_word(&lower, false).filter(|w| Self::not_keep_case(w))
    }

    /// Check a word against the dictionary, directly or by stripping affixes.
    /// Returns the entry of the word or of its root.
    fn check_word(&self, word: &str, allow_hidden_homonyms: bool) -> Option<&WordInfo> {
        if let Some(homonyms) = self.words.get(word) {
            let direct = homonyms.iter().find(|winfo| {
                !winfo
                    .word_flags
                    .intersects(WordFlags::NeedAffix | WordFlags::OnlyInCompound)
                    && (allow_hidden_homonyms || !winfo.word_flags.contains(WordFlags::HiddenHomonym))
            });
            if direct.is_some() {
                return direct;
            }
        }
        strip_affixes(word, &self.affix_data, &self.words, allow_hidden_homonyms)
    }

    /// Decide whether a candidate correction is acceptable. It is checked
    /// in the form it will be returned in, so `spell` accepts it too.
    pub(crate) fn check_suggestion(&self, sugg: &str) -> bool {
        let word = match self.normalize(&self.affix_data.oconv.replace_copy(sugg)) {
            Some(word) if !word.is_empty() => word,
            _ => return false,
        };
        if let Some(winfo) = self.spell_casing(&word) {
            return !self.is_rejected(winfo) && !winfo.word_flags.contains(WordFlags::NoSuggest);
        }
        self.spell_normalized(&word)
    }

    fn collect_suggestions(&self, word: &str, run: impl FnOnce(&mut SuggCollector)) -> Vec<String> {
        let mut collector = SuggCollector::new(self, word);
        run(&mut collector);
        collector.into_iter().collect()
    }

    /// Suggestions from the REP table of typical misspellings.
    pub fn rep_suggest(&self, word: &str) -> Vec<String> {
        self.collect_suggestions(word, |c| {
            rep_suggestions(&self.affix_data.replacements, word, |s| c.suggest(s))
        })
    }

    /// Suggestions with one char removed.
    pub fn extra_char_suggest(&self, word: &str) -> Vec<String> {
        self.collect_suggestions(word, |c| {
            extra_char_suggestions(word, &self.affix_data.try_chars, |s| c.suggest(s))
        })
    }

    /// Suggestions with one of the TRY chars inserted.
    pub fn forgotten_char_suggest(&self, word: &str) -> Vec<String> {
        self.collect_suggestions(word, |c| {
            forgotten_char_suggestions(word, &self.affix_data.try_chars, |s| c.suggest(s))
        })
    }

    /// Suggestions with one char replaced by one of the TRY chars.
    pub fn bad_char_suggest(&self, word: &str) -> Vec<String> {
        self.collect_suggestions(word, |c| {
            bad_char_suggestions(word, &self.affix_data.try_chars, |s| c.suggest(s))
        })
    }

    /// Suggestions from the MAP groups of related chars.
    pub fn map_suggest(&self, word: &str) -> Vec<String> {
        self.collect_suggestions(word, |c| {
            map_suggestions(&self.affix_data.similarities, word, |s| c.suggest(s))
        })
    }

    /// Suggestions for a wrongly cased char or a neighboring key.
    pub fn keyboard_suggest(&self, word: &str) -> Vec<String> {
        self.collect_suggestions(word, |c| {
            keyboard_suggestions(&self.affix_data.keyboard, word, |s| c.suggest(s))
        })
    }

    /// Returns a list of possible corrections to a word, most likely
    /// first. The list may be empty.
    pub fn suggest(&self, word: &str) -> Vec<String> {
        let Some(word) = self.normalize(word) else {
            return Vec::new();
        };
        if word.is_empty() {
            return Vec::new();
        }
        let strategies: [SuggestFn; 6] = [
            Self::rep_suggest,
            Self::extra_char_suggest,
            Self::forgotten_char_suggest,
            Self::bad_char_suggest,
            Self::map_suggest,
            Self::keyboard_suggest,
        ];
        let results: Vec<Vec<String>> = strategies[..].par_iter().map(|f| f(self, &word)).collect();
        results
            .into_iter()
            .flatten()
            .map(|sugg| self.affix_data.oconv.replace_copy(&sugg))
            .unique()
            .collect()
    }
}

impl Speller for DictBase {
    fn spell(&self, word: &str) -> bool {
        DictBase::spell(self, word)
    }

    fn suggest(&self, word: &str) -> Vec<String> {
        DictBase::suggest(self, word)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn dict(aff: &str, dic: &str) -> DictBase {
        DictBase::from_text(aff, dic).unwrap()
    }

    fn words_dict(words: &[&str]) -> DictBase {
        let list = words.iter().map(|w| (w.to_string(), FlagSet::new()));
        DictBase::from_parts(AffixData::new(), list)
    }

    #[test]
    fn test_is_numeric() {
        assert_eq!(true, is_numeric("54"));
        assert_eq!(true, is_numeric("-1,000.00"));
        assert_eq!(true, is_numeric("-1,000.--"));
        assert_eq!(false, is_numeric("1,ooo"));
        assert_eq!(false, is_numeric("100,,000"));
        assert_eq!(false, is_numeric(".."));
        assert_eq!(false, is_numeric(".50"));
        assert_eq!(false, is_numeric("-"));
    }

    #[test]
    fn test_cap_style() {
        assert_eq!(CapStyle::Lowercase, CapStyle::from_str("table"));
        assert_eq!(CapStyle::Lowercase, CapStyle::from_str("123"));
        assert_eq!(CapStyle::Lowercase, CapStyle::from_str(""));
        assert_eq!(CapStyle::Capitalized, CapStyle::from_str("Table"));
        assert_eq!(CapStyle::Capitalized, CapStyle::from_str("'Tis"));
        assert_eq!(CapStyle::AllCaps, CapStyle::from_str("TABLE"));
        assert_eq!(CapStyle::AllCaps, CapStyle::from_str("SANT'ELIA"));
        assert_eq!(CapStyle::Camel, CapStyle::from_str("iPod"));
        assert_eq!(CapStyle::Camel, CapStyle::from_str("d'Osormort"));
        assert_eq!(CapStyle::Pascal, CapStyle::from_str("OpenGL"));
        assert_eq!(CapStyle::Pascal, CapStyle::from_str("Sant'Elia"));
    }

    #[test]
    fn test_simple() {
        let d = words_dict(&["table", "chair", "book", "fóóáár", "áárfóóĳ"]);
        for good in ["", ".", "..", "table", "chair", "book", "fóóáár", "áárfóóĳ", "Table", "TABLE", "12,000"] {
            assert!(d.spell(good), "{} should be good", good);
        }
        for bad in ["bable", "fóóá", "áár", "tablé", "tAble", "TaBLE"] {
            assert!(!d.spell(bad), "{} should be bad", bad);
        }
    }

    #[test]
    fn test_suffixes() {
        let d = dict(
            "SFX T Y 1\nSFX T y ies .[^aeiou]y\n",
            "3\nberry/T\nMay/T\nvary\n",
        );
        for good in ["berry", "Berry", "berries", "BERRIES", "May", "MAY", "vary"] {
            assert!(d.spell(good), "{} should be good", good);
        }
        for bad in ["beRRies", "Maies", "MAIES", "maies", "varies"] {
            assert!(!d.spell(bad), "{} should be bad", bad);
        }
    }

    #[test]
    fn test_break() {
        let d = dict(
            "FORBIDWARN\nWARN W\nBREAK 2\nBREAK -\nBREAK ++++++$\n",
            "3\nuser\ninterface\ninterface-interface/W\n",
        );
        for good in ["user", "interface", "user-interface", "interface-user", "user-user"] {
            assert!(d.spell(good), "{} should be good", good);
        }
        for bad in ["user--interface", "user interface", "user - interface", "interface-interface"] {
            assert!(!d.spell(bad), "{} should be bad", bad);
        }
        assert!(d.spell("user++++++"));
        assert!(!d.spell("-user"));
    }

    #[test]
    fn test_default_break() {
        let d = dict("", "1\nuser\n");
        assert!(d.spell("-user"));
        assert!(d.spell("user-"));
        assert!(d.spell("user-user-user"));
        assert!(!d.spell("user-usr"));
        assert!(!d.spell("-"));
    }

    #[test]
    fn test_break_depth() {
        let d = dict("", "1\na\n");
        let deepest = format!("{}a", "-".repeat(MAX_BREAK_DEPTH));
        assert!(d.spell(&deepest));
        let too_deep = format!("{}a", "-".repeat(MAX_BREAK_DEPTH + 1));
        assert!(!d.spell(&too_deep));
    }

    #[test]
    fn test_break_many_segments() {
        let d = dict("", "1\na\n");
        let start = std::time::Instant::now();
        let good = format!("{}a", "a-".repeat(84));
        assert!(d.spell(&good));
        let bad = format!("{}x", "a-".repeat(84));
        assert!(!d.spell(&bad));
        assert!(start.elapsed().as_secs() < 10);
    }

    #[test]
    fn test_casing() {
        let d = words_dict(&["Sant'Elia", "d'Osormort", "OpenGL", "Paris"]);
        assert!(d.spell("SANT'ELIA"));
        assert!(d.spell("D'OSORMORT"));
        assert!(d.spell("OPENGL"));
        assert!(d.spell("PARIS"));
        assert!(d.spell("Paris"));
        assert!(!d.spell("paris"));
        assert!(!d.spell("Opengl"));
        assert!(!d.spell("openGL"));
    }

    #[test]
    fn test_keep_case() {
        let d = dict("KEEPCASE K\n", "2\nmeV/K\nfoo/K\n");
        assert!(d.spell("meV"));
        assert!(!d.spell("MEV"));
        assert!(d.spell("foo"));
        assert!(!d.spell("Foo"));
        assert!(!d.spell("FOO"));
    }

    #[test]
    fn test_forbidden_and_need_affix() {
        let d = dict(
            "FORBIDDENWORD !\nNEEDAFFIX N\nSFX S Y 1\nSFX S 0 s .\n",
            "3\ncat/S\ncats/!\nfoo/NS\n",
        );
        assert!(d.spell("cat"));
        assert!(!d.spell("cats"));
        assert!(!d.spell("foo"));
        assert!(d.spell("foos"));
    }

    #[test]
    fn test_abbreviation_and_ignore() {
        let d = dict("IGNORE -\n", "2\netc.\nbook\n");
        assert!(d.spell("etc."));
        assert!(d.spell("book."));
        assert!(d.spell("bo-ok"));
        assert!(!d.spell("etc"));
    }

    #[test]
    fn test_iconv_oconv() {
        let d = dict(
            "ICONV 1\nICONV ’ '\nOCONV 1\nOCONV ' ’\nTRY o\n",
            "1\ndon't\n",
        );
        assert!(d.spell("don’t"));
        assert_eq!(vec!["don’t"], d.suggest("dn’t"));
    }

    #[test]
    fn test_max_word_len() {
        let mut d = words_dict(&["aaaa"]);
        d.set_max_word_len(Some(3));
        assert!(!d.spell("aaaa"));
        d.set_max_word_len(None);
        assert!(d.spell("aaaa"));
        let long = "a".repeat(DEFAULT_MAX_WORD_LEN + 1);
        let d = words_dict(&[long.as_str()]);
        assert!(!d.spell(&long));
    }

    #[test]
    fn test_rep_suggest() {
        let d = dict(
            "REP 4\nREP f ph\nREP ph f\nREP shun$ tion\nREP ^alot$ a_lot\n",
            "4\nfat\nstation\na lot\nlot\n",
        );
        assert_eq!(vec!["fat"], d.rep_suggest("phat"));
        assert_eq!(vec!["station"], d.rep_suggest("stashun"));
        assert!(d.rep_suggest("stashuns").is_empty());
        assert_eq!(vec!["a lot"], d.rep_suggest("alot"));
        assert!(d.rep_suggest("aalot").is_empty());
        assert!(d.rep_suggest("alott").is_empty());
    }

    #[test]
    fn test_rep_two_words() {
        // the two words are only offered if the pair is itself a dictionary entry
        let d = dict("REP 1\nREP ^foobar$ foo_bar\n", "2\nfoo\nbar\n");
        assert!(!d.spell("foo bar"));
        assert!(d.rep_suggest("foobar").is_empty());
        assert!(d.suggest("foobar").iter().all(|s| d.spell(s)));

        let d = dict("REP 1\nREP ^foobar$ foo_bar\n", "3\nfoo\nbar\nfoo bar\n");
        assert_eq!(vec!["foo bar"], d.rep_suggest("foobar"));
        assert!(d.spell("foo bar"));
    }

    #[test]
    fn test_suggestions_pass_spell() {
        let long = "a".repeat(DEFAULT_MAX_WORD_LEN);
        let mut d = dict("TRY a\n", &format!("1\n{}a\n", long));
        assert!(d.suggest(&long).is_empty());
        d.set_max_word_len(None);
        assert_eq!(vec![format!("{}a", long)], d.suggest(&long));

        let d = dict("TRY -xz\nIGNORE -\n", "2\nxyz\nxy\n");
        for word in ["xyy", "x-yy", "xyzz", "yz"] {
            for sugg in d.suggest(word) {
                assert!(d.spell(&sugg), "{} suggested for {}", sugg, word);
            }
        }
    }

    #[test]
    fn test_oconv_duplicates() {
        let aff = "TRY ab\nICONV 1\nICONV y a\nOCONV 2\nOCONV a y\nOCONV b y\n";
        let d = dict(aff, "2\nxa\nxb\n");
        assert_eq!(vec!["xy"], d.suggest("x"));
        assert!(d.spell("xy"));
    }

    #[test]
    fn test_char_suggest() {
        let d = dict("TRY abcd\n", "1\nabcd\n");
        assert_eq!(vec!["abcd"], d.extra_char_suggest("abxcd"));
        assert_eq!(vec!["abcd"], d.bad_char_suggest("abce"));
        assert_eq!(vec!["abcd"], d.forgotten_char_suggest("abd"));
        assert!(d.forgotten_char_suggest("abcd").is_empty());
    }

    #[test]
    fn test_map_suggest() {
        let d = dict("MAP 3\nMAP aäâ\nMAP æ(ae)\nMAP (ij)ĳ\n", "3\näbcd\næon\nzijn\n");
        assert_eq!(vec!["äbcd"], d.map_suggest("abcd"));
        assert_eq!(vec!["æon"], d.map_suggest("aeon"));
        assert_eq!(vec!["zijn"], d.map_suggest("zĳn"));
    }

    #[test]
    fn test_keyboard_suggest() {
        let d = dict("KEY uiop|xdf|nm\n", "2\nabcd\nAbb\n");
        assert_eq!(vec!["abcd"], d.keyboard_suggest("abcf"));
        assert_eq!(vec!["abcd"], d.keyboard_suggest("abcx"));
        assert!(d.keyboard_suggest("abcg").is_empty());
        assert_eq!(vec!["Abb"], d.keyboard_suggest("abb"));
    }

    #[test]
    fn test_no_suggest() {
        let d = dict("NOSUGGEST !\nFORBIDDENWORD *\nTRY ab\n", "3\nbad/!\nab\naab/*\n");
        assert!(d.spell("bad"));
        assert!(d.forgotten_char_suggest("bd").is_empty());
        assert!(d.forgotten_char_suggest("ab").is_empty());
    }

    #[test]
    fn test_suggest_order() {
        let d = dict(
            "TRY ae\nREP 1\nREP hn an\nKEY qwertyuiop|asdfghjkl|zxcvbnm\n",
            "3\npan\nphan\npen\n",
        );
        // rep first, then forgotten char, then bad char; no duplicates
        assert_eq!(vec!["pan", "phan", "pen"], d.suggest("phn"));
        assert!(d.suggest("").is_empty());
    }
}
