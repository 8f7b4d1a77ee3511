use anyhow::{bail, Result};

use crate::hunspell::condition::AffixCondition;
use crate::hunspell::flagset::{AffixFlag, FlagSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AffixKind {
    Prefix,
    Suffix,
}

/// One PFX or SFX rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffixEntry {
    pub kind: AffixKind,
    /// The flag the entry is filed under. Roots must carry it.
    pub flag: AffixFlag,
    /// Whether an affix of the opposite kind may also apply to the root.
    pub cross_product: bool,
    /// Removed from the root when deriving.
    pub strip: String,
    /// Added to the root when deriving.
    pub append: String,
    /// Flags the derived word gains, allowing further affixes.
    pub cont_flags: FlagSet,
    /// Must match the root at the end where the affix applies.
    pub condition: AffixCondition,
}

impl AffixEntry {
    pub fn new(
        kind: AffixKind,
        flag: AffixFlag,
        cross_product: bool,
        strip: &str,
        append: &str,
        cont_flags: FlagSet,
        condition: &str,
    ) -> Result<Self> {
        let entry = AffixEntry {
            kind,
            flag,
            cross_product,
            strip: strip.to_string(),
            append: append.to_string(),
            cont_flags,
            condition: AffixCondition::new(condition)?,
        };
        if !entry.strip_fits_condition() {
            bail!(
                "affix strips {:?} which can never satisfy its condition {:?}",
                strip,
                condition
            );
        }
        Ok(entry)
    }

    pub fn new_prefix(
        flag: AffixFlag,
        cross_product: bool,
        strip: &str,
        append: &str,
        cont_flags: FlagSet,
        condition: &str,
    ) -> Result<Self> {
        Self::new(AffixKind::Prefix, flag, cross_product, strip, append, cont_flags, condition)
    }

    pub fn new_suffix(
        flag: AffixFlag,
        cross_product: bool,
        strip: &str,
        append: &str,
        cont_flags: FlagSet,
        condition: &str,
    ) -> Result<Self> {
        Self::new(AffixKind::Suffix, flag, cross_product, strip, append, cont_flags, condition)
    }

    /// Every root this entry applies to carries `strip` at the affix end,
    /// so `strip` and the condition must agree where they overlap.
    fn strip_fits_condition(&self) -> bool {
        match self.kind {
            AffixKind::Prefix => self.condition.prefix_compatible(&self.strip),
            AffixKind::Suffix => self.condition.suffix_compatible(&self.strip),
        }
    }

    pub fn check_condition(&self, word: &str) -> bool {
        match self.kind {
            AffixKind::Prefix => self.condition.prefix_match(word),
            AffixKind::Suffix => self.condition.suffix_match(word),
        }
    }

    fn has_append(&self, word: &str) -> bool {
        match self.kind {
            AffixKind::Prefix => word.starts_with(&self.append),
            AffixKind::Suffix => word.ends_with(&self.append),
        }
    }

    fn has_strip(&self, word: &str) -> bool {
        match self.kind {
            AffixKind::Prefix => word.starts_with(&self.strip),
            AffixKind::Suffix => word.ends_with(&self.strip),
        }
    }

    fn splice(word: &mut String, kind: AffixKind, remove: &str, add: &str) {
        match kind {
            AffixKind::Prefix => {
                word.replace_range(..remove.len(), add);
            }
            AffixKind::Suffix => {
                let at = word.len() - remove.len();
                word.truncate(at);
                word.push_str(add);
            }
        }
    }

    /// Turn a derived word back into its root, in place.
    /// Returns false, leaving the word untouched, if the word doesn't
    /// carry this affix or the resulting root fails the condition.
    pub fn to_root_mut(&self, word: &mut String) -> bool {
        if !self.has_append(word) {
            return false;
        }
        Self::splice(word, self.kind, &self.append, &self.strip);
        if self.check_condition(word) {
            true
        } else {
            Self::splice(word, self.kind, &self.strip, &self.append);
            false
        }
    }

    pub fn to_root(&self, word: &str) -> Option<String> {
        let mut root = word.to_string();
        if self.to_root_mut(&mut root) {
            Some(root)
        } else {
            None
        }
    }

    /// Apply this affix to a root, in place.
    /// Returns false, leaving the root untouched, if the root does not
    /// satisfy the condition or does not contain the strip string.
    pub fn to_derived_mut(&self, root: &mut String) -> bool {
        if !self.has_strip(root) || !self.check_condition(root) {
            return false;
        }
        Self::splice(root, self.kind, &self.strip, &self.append);
        true
    }

    pub fn to_derived(&self, root: &str) -> Option<String> {
        let mut word = root.to_string();
        if self.to_derived_mut(&mut word) {
            Some(word)
        } else {
            None
        }
    }
}
