use smallvec::SmallVec;
use std::fmt;

/// A flag as decoded from the affix or dictionary file.
/// All flag modes fit in 32 bits: single chars, char pairs, numbers and
/// UTF-8 codepoints.
pub type AffixFlag = u32;

/// A small sorted set of flags. Most words carry only a handful of flags,
/// so they are kept inline and searched with a binary search.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct FlagSet {
    flags: SmallVec<[AffixFlag; 4]>,
}

impl FlagSet {
    pub fn new() -> Self {
        FlagSet::default()
    }

    /// Make a set from a string in which every char is one flag.
    /// This matches the default flag mode of affix files.
    pub fn from_chars(s: &str) -> Self {
        s.chars().map(|c| c as AffixFlag).collect()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn contains(&self, flag: AffixFlag) -> bool {
        self.flags.binary_search(&flag).is_ok()
    }

    /// Like `contains`, for the optional special flags of a dictionary.
    pub fn contains_opt(&self, flag: Option<AffixFlag>) -> bool {
        flag.map_or(false, |f| self.contains(f))
    }

    /// Returns true if the flag was not already present.
    pub fn insert(&mut self, flag: AffixFlag) -> bool {
        match self.flags.binary_search(&flag) {
            Ok(_) => false,
            Err(pos) => {
                self.flags.insert(pos, flag);
                true
            }
        }
    }

    /// Returns true if the flag was present.
    pub fn remove(&mut self, flag: AffixFlag) -> bool {
        match self.flags.binary_search(&flag) {
            Ok(pos) => {
                self.flags.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    pub fn union(&self, other: &FlagSet) -> FlagSet {
        let mut result = self.clone();
        for flag in other.iter() {
            result.insert(flag);
        }
        result
    }

    pub fn difference(&self, other: &FlagSet) -> FlagSet {
        self.iter().filter(|f| !other.contains(*f)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = AffixFlag> + '_ {
        self.flags.iter().copied()
    }
}

impl FromIterator<AffixFlag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = AffixFlag>>(iter: I) -> Self {
        let mut flags: SmallVec<[AffixFlag; 4]> = iter.into_iter().collect();
        flags.sort_unstable();
        flags.dedup();
        FlagSet { flags }
    }
}

impl Extend<AffixFlag> for FlagSet {
    fn extend<I: IntoIterator<Item = AffixFlag>>(&mut self, iter: I) {
        for flag in iter {
            self.insert(flag);
        }
    }
}

impl fmt::Debug for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Show printable flags as chars, which is how they are usually written
        let mut set = f.debug_set();
        for flag in self.iter() {
            match char::from_u32(flag).filter(|c| c.is_ascii_graphic()) {
                Some(c) => set.entry(&c),
                None => set.entry(&flag),
            };
        }
        set.finish()
    }
}
