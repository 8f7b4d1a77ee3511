/// SuffixTrie and PrefixTrie are very similar, but they differ in their
/// internal logic and performance is important, so it was easier to make
/// two separate structs than to make one that can do both.
///
/// Both are keyed by chars. Dictionaries are not limited to ASCII, and a
/// char key keeps every lookup aligned to char boundaries.
use fnv::FnvHashMap;

#[derive(Clone, Debug)]
pub struct SuffixTrie<T> {
    end_here: Vec<T>,
    more: FnvHashMap<char, SuffixTrie<T>>,
}

impl<T> Default for SuffixTrie<T> {
    fn default() -> Self {
        SuffixTrie {
            end_here: Vec::new(),
            more: FnvHashMap::default(),
        }
    }
}

impl<T: Copy> SuffixTrie<T> {
    pub fn insert(&mut self, suffix: &str, t: T) {
        let mut ptr = self;
        for c in suffix.chars().rev() {
            ptr = ptr.more.entry(c).or_default();
        }
        ptr.end_here.push(t);
    }

    /// Call `found` for every value whose key is a suffix of `word`,
    /// shortest keys first. Stops early and returns true as soon as
    /// `found` returns true.
    pub fn lookup(&self, word: &str, mut found: impl FnMut(T) -> bool) -> bool {
        let mut ptr = self;
        let mut iter = word.chars().rev();
        loop {
            for t in ptr.end_here.iter() {
                if found(*t) {
                    return true;
                }
            }
            let next = match iter.next() {
                Some(c) => ptr.more.get(&c),
                None => None,
            };
            match next {
                Some(next) => ptr = next,
                None => break,
            }
        }
        false
    }
}

#[derive(Clone, Debug)]
pub struct PrefixTrie<T> {
    end_here: Vec<T>,
    more: FnvHashMap<char, PrefixTrie<T>>,
}

impl<T> Default for PrefixTrie<T> {
    fn default() -> Self {
        PrefixTrie {
            end_here: Vec::new(),
            more: FnvHashMap::default(),
        }
    }
}

impl<T: Copy> PrefixTrie<T> {
    pub fn insert(&mut self, prefix: &str, t: T) {
        let mut ptr = self;
        for c in prefix.chars() {
            ptr = ptr.more.entry(c).or_default();
        }
        ptr.end_here.push(t);
    }

    /// Call `found` for every value whose key is a prefix of `word`,
    /// shortest keys first. Stops early and returns true as soon as
    /// `found` returns true.
    pub fn lookup(&self, word: &str, mut found: impl FnMut(T) -> bool) -> bool {
        let mut ptr = self;
        let mut iter = word.chars();
        loop {
            for t in ptr.end_here.iter() {
                if found(*t) {
                    return true;
                }
            }
            let next = match iter.next() {
                Some(c) => ptr.more.get(&c),
                None => None,
            };
            match next {
                Some(next) => ptr = next,
                None => break,
            }
        }
        false
    }
}
