#![allow(non_upper_case_globals)]

use bitflags::bitflags;

use crate::hunspell::affixdata::SpecialFlags;
use crate::hunspell::flagset::FlagSet;

bitflags! {
    /// The dictionary-level markers of a word entry, decoded once from
    /// its flag set so that checking doesn't have to search for them.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct WordFlags: u16 {
        /// This word must not be accepted as good.
        const Forbidden = 0x0001;
        /// This is a very rare word that is likely a spelling error
        const Warn = 0x0002;
        /// This word must not be suggested as a correction.
        const NoSuggest = 0x0004;
        /// This word is not valid without an affix.
        const NeedAffix = 0x0008;
        /// This word should not have its case changed.
        const KeepCase = 0x0010;
        /// This word can only appear as part of compound words.
        const OnlyInCompound = 0x0020;
        /// An all-caps copy of a mixed case word. It is only accepted
        /// when checking an all-caps token.
        const HiddenHomonym = 0x0040;
    }
}

impl WordFlags {
    pub fn from_flagset(flags: &FlagSet, special: &SpecialFlags) -> Self {
        let mut wf = WordFlags::empty();
        let pairs = [
            (special.forbidden, WordFlags::Forbidden),
            (special.warn, WordFlags::Warn),
            (special.no_suggest, WordFlags::NoSuggest),
            (special.need_affix, WordFlags::NeedAffix),
            (special.keep_case, WordFlags::KeepCase),
            (special.only_in_compound, WordFlags::OnlyInCompound),
        ];
        for (flag, wordflag) in pairs {
            if flags.contains_opt(flag) {
                wf |= wordflag;
            }
        }
        wf
    }
}
