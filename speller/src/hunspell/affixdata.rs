use anyhow::{bail, Context, Result};
use fnv::FnvHashMap;
use itertools::Itertools;
use smallvec::SmallVec;

use crate::affix_trie::{PrefixTrie, SuffixTrie};
use crate::hunspell::affixentry::{AffixEntry, AffixKind};
use crate::hunspell::breaktable::BreakTable;
use crate::hunspell::flagset::{AffixFlag, FlagSet};
use crate::hunspell::keyboard::KeyboardLayout;
use crate::hunspell::replacements::{ReplacementTable, SubstrReplacer};
use crate::hunspell::similarity::SimilarityGroup;

/// Represents the format of the flags after words in the dictionary file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlagMode {
    /// Single-character flags
    #[default]
    CharFlags,
    /// Two-character flags
    DoubleCharFlags,
    /// Flags are comma-separated ASCII integers
    NumericFlags,
    /// Flags are Unicode codepoints in UTF-8 format
    Utf8Flags,
}

/// The flags that give words a special status, if the affix file
/// declares them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpecialFlags {
    /// The flag for invalid words.
    pub forbidden: Option<AffixFlag>,
    /// The flag for rare words that are likely to be misspellings.
    pub warn: Option<AffixFlag>,
    /// The flag for words that should not be suggested.
    pub no_suggest: Option<AffixFlag>,
    /// The flag for words that must have an affix.
    pub need_affix: Option<AffixFlag>,
    /// The flag for words that should not change case.
    pub keep_case: Option<AffixFlag>,
    /// The flag for words that may appear only inside compound words.
    pub only_in_compound: Option<AffixFlag>,
}

/// All prefixes or all suffixes of a dictionary.
/// Entries are grouped by flag, and indexed by their `append` string so
/// that stripping only looks at entries that can apply to a word.
#[derive(Clone, Debug)]
pub struct AffixTable {
    kind: AffixKind,
    entries: Vec<AffixEntry>,
    by_flag: FnvHashMap<AffixFlag, SmallVec<[usize; 4]>>,
    prefix_index: PrefixTrie<usize>,
    suffix_index: SuffixTrie<usize>,
}

impl AffixTable {
    pub fn new(kind: AffixKind) -> Self {
        AffixTable {
            kind,
            entries: Vec::new(),
            by_flag: FnvHashMap::default(),
            prefix_index: PrefixTrie::default(),
            suffix_index: SuffixTrie::default(),
        }
    }

    pub fn kind(&self) -> AffixKind {
        self.kind
    }

    pub fn push(&mut self, entry: AffixEntry) -> Result<()> {
        if entry.kind != self.kind {
            bail!("{:?} entry added to the {:?} table", entry.kind, self.kind);
        }
        let idx = self.entries.len();
        match self.kind {
            AffixKind::Prefix => self.prefix_index.insert(&entry.append, idx),
            AffixKind::Suffix => self.suffix_index.insert(&entry.append, idx),
        }
        self.by_flag.entry(entry.flag).or_default().push(idx);
        self.entries.push(entry);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AffixEntry> {
        self.entries.iter()
    }

    /// The entries filed under `flag`, in declaration order.
    pub fn with_flag(&self, flag: AffixFlag) -> impl Iterator<Item = &AffixEntry> {
        self.by_flag
            .get(&flag)
            .into_iter()
            .flat_map(move |v| v.iter().map(move |idx| &self.entries[*idx]))
    }

    /// Call `found` for every entry whose `append` string is at the
    /// proper end of `word`. Stops when `found` returns true.
    pub fn lookup<'t>(&'t self, word: &str, mut found: impl FnMut(&'t AffixEntry) -> bool) -> bool {
        match self.kind {
            AffixKind::Prefix => self
                .prefix_index
                .lookup(word, |idx| found(&self.entries[idx])),
            AffixKind::Suffix => self
                .suffix_index
                .lookup(word, |idx| found(&self.entries[idx])),
        }
    }
}

impl Default for AffixTable {
    fn default() -> Self {
        AffixTable::new(AffixKind::Suffix)
    }
}

#[derive(Clone, Debug)]
pub struct AffixData {
    /// Affixes that can be applied to the front of a word
    pub prefixes: AffixTable,
    /// Affixes that can be applied to the end of a word
    pub suffixes: AffixTable,
    /// Replacements to try when suggesting words
    pub replacements: ReplacementTable,
    /// Groups of related characters, from the MAP table
    pub similarities: Vec<SimilarityGroup>,
    /// Where words may be split into separately checked parts
    pub break_table: BreakTable,
    /// keyboard layout, used to suggest spelling fixes.
    pub keyboard: KeyboardLayout,
    /// letters to try when suggesting fixes, from common to rare.
    pub try_chars: String,
    /// Conversions applied to words before checking them.
    pub iconv: SubstrReplacer,
    /// Conversions applied to suggestions before returning them.
    pub oconv: SubstrReplacer,
    /// Characters that are removed from words and dictionary entries.
    pub ignore_chars: String,
    /// The valid formats for flags used in this affix file
    pub flag_mode: FlagMode,
    /// Flag sets declared with AF, referred to by their 1-based number.
    pub flag_aliases: Vec<FlagSet>,
    pub special_flags: SpecialFlags,
    /// Strip two prefixes instead of two suffixes.
    pub complex_prefixes: bool,
    /// Allow affixes to completely remove a root
    pub fullstrip: bool,
    /// Treat words with the warn flag as misspelled.
    pub forbid_warn: bool,
    /// The encoding declared with SET.
    pub encoding: Option<String>,
}

impl Default for AffixData {
    fn default() -> Self {
        AffixData {
            prefixes: AffixTable::new(AffixKind::Prefix),
            suffixes: AffixTable::new(AffixKind::Suffix),
            replacements: ReplacementTable::default(),
            similarities: Vec::new(),
            break_table: BreakTable::default(),
            keyboard: KeyboardLayout::default(),
            try_chars: String::new(),
            iconv: SubstrReplacer::default(),
            oconv: SubstrReplacer::default(),
            ignore_chars: String::new(),
            flag_mode: FlagMode::CharFlags,
            flag_aliases: Vec::new(),
            special_flags: SpecialFlags::default(),
            complex_prefixes: false,
            fullstrip: false,
            forbid_warn: false,
            encoding: None,
        }
    }
}

impl AffixData {
    pub fn new() -> Self {
        AffixData::default()
    }

    pub fn add_prefix(&mut self, entry: AffixEntry) -> Result<()> {
        self.prefixes.push(entry)
    }

    pub fn add_suffix(&mut self, entry: AffixEntry) -> Result<()> {
        self.suffixes.push(entry)
    }

    /// Decode flags according to the flag mode, without alias lookup.
    pub fn parse_flags(&self, flags: &str) -> Result<Vec<AffixFlag>> {
        match self.flag_mode {
            FlagMode::CharFlags | FlagMode::Utf8Flags => {
                Ok(flags.chars().map(|c| c as u32).collect())
            }
            FlagMode::DoubleCharFlags => flags
                .chars()
                .chunks(2)
                .into_iter()
                .map(|pair| {
                    let pair: SmallVec<[char; 2]> = pair.collect();
                    if pair.len() != 2 {
                        bail!("Odd number of characters in double flags {}", flags);
                    }
                    let c1 = pair[0] as u32;
                    let c2 = pair[1] as u32;
                    if c1 > 255 || c2 > 255 {
                        bail!("Invalid characters in double flag");
                    }
                    Ok(c1 * 256 + c2)
                })
                .collect(),
            FlagMode::NumericFlags => flags
                .split(',')
                .filter(|d| !d.is_empty())
                .map(|d| {
                    d.parse::<u32>()
                        .with_context(|| format!("Invalid numeric flag {}", d))
                })
                .collect(),
        }
    }

    /// Decode a single flag, such as the one an affix is filed under.
    pub fn parse_flag(&self, flag: &str) -> Result<AffixFlag> {
        let flags = self.parse_flags(flag)?;
        if flags.len() != 1 {
            bail!("Expected a single flag, got {}", flag);
        }
        Ok(flags[0])
    }

    /// Decode the flags of a word or the continuation flags of an affix.
    /// If the affix file declared AF aliases, a number refers to one of them.
    pub fn parse_flag_set(&self, flags: &str) -> Result<FlagSet> {
        if !self.flag_aliases.is_empty() && !flags.is_empty() && flags.chars().all(|c| c.is_ascii_digit()) {
            let n: usize = flags.parse().with_context(|| format!("Invalid flag alias {}", flags))?;
            return match n.checked_sub(1).and_then(|i| self.flag_aliases.get(i)) {
                Some(set) => Ok(set.clone()),
                None => bail!("Flag alias {} is not defined", n),
            };
        }
        Ok(self.parse_flags(flags)?.into_iter().collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_flag_modes() {
        let mut d = AffixData::new();
        assert_eq!(vec!['A' as u32, 'b' as u32], d.parse_flags("Ab").unwrap());

        d.flag_mode = FlagMode::DoubleCharFlags;
        assert_eq!(
            vec!['A' as u32 * 256 + 'a' as u32, 'B' as u32 * 256 + 'b' as u32],
            d.parse_flags("AaBb").unwrap()
        );
        assert!(d.parse_flags("AaB").is_err());
        assert!(d.parse_flags("Ő1").is_err());

        d.flag_mode = FlagMode::NumericFlags;
        assert_eq!(vec![101, 7, 65000], d.parse_flags("101,7,65000").unwrap());
        assert!(d.parse_flags("1,x").is_err());
        assert!(d.parse_flags("").unwrap().is_empty());

        d.flag_mode = FlagMode::Utf8Flags;
        assert_eq!(vec!['Ő' as u32], d.parse_flags("Ő").unwrap());
        assert_eq!('Ő' as u32, d.parse_flag("Ő").unwrap());
        assert!(d.parse_flag("ŐŐ").is_err());
    }

    #[test]
    fn test_flag_aliases() {
        let mut d = AffixData::new();
        d.flag_aliases.push(FlagSet::from_chars("AB"));
        d.flag_aliases.push(FlagSet::from_chars("C"));
        assert_eq!(FlagSet::from_chars("C"), d.parse_flag_set("2").unwrap());
        assert_eq!(FlagSet::from_chars("AB"), d.parse_flag_set("1").unwrap());
        assert!(d.parse_flag_set("3").is_err());
        assert!(d.parse_flag_set("0").is_err());
        assert_eq!(FlagSet::new(), d.parse_flag_set("").unwrap());
    }

    #[test]
    fn test_affix_table() {
        let mut table = AffixTable::new(AffixKind::Suffix);
        let s1 = AffixEntry::new_suffix('S' as u32, true, "", "s", FlagSet::new(), ".").unwrap();
        let s2 = AffixEntry::new_suffix('S' as u32, true, "y", "ies", FlagSet::new(), "y").unwrap();
        let s3 = AffixEntry::new_suffix('D' as u32, true, "", "ed", FlagSet::new(), ".").unwrap();
        table.push(s1).unwrap();
        table.push(s2).unwrap();
        table.push(s3).unwrap();
        let p = AffixEntry::new_prefix('P' as u32, true, "", "re", FlagSet::new(), ".").unwrap();
        assert!(table.push(p).is_err());

        assert_eq!(2, table.with_flag('S' as u32).count());
        assert_eq!(0, table.with_flag('X' as u32).count());

        let mut appends = Vec::new();
        table.lookup("berries", |e| {
            appends.push(e.append.clone());
            false
        });
        assert_eq!(vec!["s", "ies"], appends);
    }
}
