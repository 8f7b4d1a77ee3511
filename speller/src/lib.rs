#![warn(missing_debug_implementations)]

mod affix_trie;
mod error;
mod hunspell;

pub use crate::error::LoadError;
pub use crate::hunspell::affixdata::{AffixData, AffixTable, FlagMode, SpecialFlags};
pub use crate::hunspell::affixentry::{AffixEntry, AffixKind};
pub use crate::hunspell::breaktable::BreakTable;
pub use crate::hunspell::condition::AffixCondition;
pub use crate::hunspell::flagset::{AffixFlag, FlagSet};
pub use crate::hunspell::keyboard::KeyboardLayout;
pub use crate::hunspell::replacements::{ReplacementTable, SubstrReplacer};
pub use crate::hunspell::similarity::SimilarityGroup;
pub use crate::hunspell::wordflags::WordFlags;
pub use crate::hunspell::{
    CapStyle, DictBase, DEFAULT_MAX_WORD_LEN, MAX_BREAK_DEPTH, MAX_SUGGESTS_PER_SOURCE,
};

pub trait Speller {
    /// Returns true if the word is correctly spelled, otherwise false.
    fn spell(&self, word: &str) -> bool;

    /// Returns a list of possible corrections to a misspelled word,
    /// most likely first. The list may be empty.
    fn suggest(&self, word: &str) -> Vec<String>;

    /// Like `suggest`, but returns no more than `max` corrections.
    fn suggestions(&self, word: &str, max: usize) -> Vec<String> {
        let mut suggs = self.suggest(word);
        suggs.truncate(max);
        suggs
    }
}
