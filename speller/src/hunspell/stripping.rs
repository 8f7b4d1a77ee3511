/// Finding the root of a derived word by stripping affixes.
///
/// The search is a depth-first walk over chains of affix entries, listed
/// from the outermost affix inwards. Which chains are tried depends on
/// whether the dictionary uses complex prefixes: normally up to two
/// suffixes and one prefix can be stripped, with complex prefixes it's up
/// to two prefixes and one suffix.
///
/// Every prefix of an allowed chain is itself an allowed chain, so the
/// root candidate at each step of the walk is looked up right away and
/// intermediate words are never derived twice.
use smallvec::SmallVec;

use crate::hunspell::affixdata::AffixData;
use crate::hunspell::affixentry::{AffixEntry, AffixKind};
use crate::hunspell::wordflags::WordFlags;
use crate::hunspell::{WordInfo, WordTable};

use AffixKind::{Prefix as P, Suffix as S};

/// The maximum number of affixes stripped from one word.
const MAX_CHAIN: usize = 3;

const CHAINS: &[&[AffixKind]] = &[&[S], &[P], &[P, S], &[S, P], &[S, S], &[P, S, S], &[S, P, S]];

const COMPLEX_CHAINS: &[&[AffixKind]] = &[&[S], &[P], &[P, S], &[S, P], &[P, P], &[S, P, P], &[P, S, P]];

type Chain<'a> = SmallVec<[&'a AffixEntry; MAX_CHAIN]>;

struct Frame<'a> {
    word: String,
    chain: Chain<'a>,
}

fn chain_allowed(chain: &Chain, next: AffixKind, complex_prefixes: bool) -> bool {
    let allowed = if complex_prefixes { COMPLEX_CHAINS } else { CHAINS };
    let len = chain.len() + 1;
    allowed.iter().any(|kinds| {
        kinds.len() == len
            && kinds[len - 1] == next
            && kinds.iter().zip(chain.iter()).all(|(k, e)| *k == e.kind)
    })
}

/// Can `entry` be stripped from a word from which `chain` was stripped?
fn link_allowed(entry: &AffixEntry, chain: &Chain, affix_data: &AffixData) -> bool {
    match chain.last() {
        None => !entry
            .cont_flags
            .contains_opt(affix_data.special_flags.need_affix),
        Some(outer) if outer.kind == entry.kind => entry.cont_flags.contains(outer.flag),
        Some(outer) => outer.cross_product && entry.cross_product,
    }
}

/// Every affix in the chain must be licensed, either by the continuation
/// flags of the affix directly inside it or by the flags of the root.
/// An affix can only be licensed by the root if no affix of the same kind
/// lies between it and the root.
fn chain_licensed(chain: &Chain, root: &WordInfo) -> bool {
    chain.iter().enumerate().all(|(i, entry)| {
        if let Some(inner) = chain.get(i + 1) {
            if inner.cont_flags.contains(entry.flag) {
                return true;
            }
        }
        let same_kind_inside = chain[i + 1..].iter().any(|e| e.kind == entry.kind);
        !same_kind_inside && root.affix_flags.contains(entry.flag)
    })
}

fn find_root<'a>(
    frame: &Frame,
    words: &'a WordTable,
    allow_hidden_homonyms: bool,
) -> Option<&'a WordInfo> {
    let homonyms = words.get(&frame.word)?;
    homonyms.iter().find(|winfo| {
        !winfo.word_flags.contains(WordFlags::OnlyInCompound)
            && (allow_hidden_homonyms || !winfo.word_flags.contains(WordFlags::HiddenHomonym))
            && chain_licensed(&frame.chain, winfo)
    })
}

/// Strip up to `MAX_CHAIN` affixes from `word` and return the dictionary
/// entry of the first root that licenses all of them.
pub fn strip_affixes<'a>(
    word: &str,
    affix_data: &'a AffixData,
    words: &'a WordTable,
    allow_hidden_homonyms: bool,
) -> Option<&'a WordInfo> {
    let mut stack = vec![Frame {
        word: word.to_string(),
        chain: Chain::new(),
    }];
    let mut next_frames = Vec::new();
    while let Some(frame) = stack.pop() {
        if !frame.chain.is_empty() {
            if let Some(winfo) = find_root(&frame, words, allow_hidden_homonyms) {
                return Some(winfo);
            }
        }
        if frame.chain.len() == MAX_CHAIN {
            continue;
        }
        for table in [&affix_data.suffixes, &affix_data.prefixes] {
            if !chain_allowed(&frame.chain, table.kind(), affix_data.complex_prefixes) {
                continue;
            }
            table.lookup(&frame.word, |entry| {
                if frame.word.len() == entry.append.len() && !affix_data.fullstrip {
                    return false;
                }
                if !link_allowed(entry, &frame.chain, affix_data) {
                    return false;
                }
                if let Some(root) = entry.to_root(&frame.word) {
                    if !root.is_empty() {
                        let mut chain = frame.chain.clone();
                        chain.push(entry);
                        next_frames.push(Frame { word: root, chain });
                    }
                }
                false
            });
        }
        // Keep the suffix-first, declaration order when popping
        stack.extend(next_frames.drain(..).rev());
    }
    None
}
