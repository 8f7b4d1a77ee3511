use smallvec::SmallVec;

use crate::hunspell::keyboard::KeyboardLayout;
use crate::hunspell::replacements::ReplacementTable;
use crate::hunspell::similarity::SimilarityGroup;

// All of these call `suggest` with candidate words, most likely first,
// and stop as soon as it returns false.

pub fn rep_suggestions(
    reps: &ReplacementTable,
    word: &str,
    mut suggest: impl FnMut(String) -> bool,
) {
    let mut first_pass = Vec::new();
    let mut aborted = false;
    reps.suggest(word, |sugg| {
        first_pass.push(sugg.clone());
        aborted = !suggest(sugg);
        !aborted
    });
    if aborted {
        return;
    }
    // Apply the table once more, to fix words with two typical errors
    for cand in first_pass.iter() {
        let mut aborted = false;
        reps.suggest(cand, |sugg| {
            aborted = !suggest(sugg);
            !aborted
        });
        if aborted {
            return;
        }
    }
}

/// Remove one char. If try chars are given, only candidates made
/// entirely of try chars are offered.
pub fn extra_char_suggestions(
    word: &str,
    try_chars: &str,
    mut suggest: impl FnMut(String) -> bool,
) {
    for (i, c) in word.char_indices() {
        let mut sugg = String::with_capacity(word.len());
        sugg.push_str(&word[..i]);
        sugg.push_str(&word[i + c.len_utf8()..]);
        if !try_chars.is_empty() && !sugg.chars().all(|sc| try_chars.contains(sc)) {
            continue;
        }
        if !suggest(sugg) {
            return;
        }
    }
}

pub fn forgotten_char_suggestions(
    word: &str,
    try_chars: &str,
    mut suggest: impl FnMut(String) -> bool,
) {
    // Try them in order; the affix file put them in order of likelihood
    for tc in try_chars.chars() {
        // Try the char in front of each char
        let sugg_len = word.len() + tc.len_utf8();
        for (i, _) in word.char_indices() {
            let mut sugg = String::with_capacity(sugg_len);
            sugg.push_str(&word[..i]);
            sugg.push(tc);
            sugg.push_str(&word[i..]);
            if !suggest(sugg) {
                return;
            }
        }
        // Also try it at the end
        let mut sugg = String::with_capacity(sugg_len);
        sugg.push_str(word);
        sugg.push(tc);
        if !suggest(sugg) {
            return;
        }
    }
}

pub fn bad_char_suggestions(
    word: &str,
    try_chars: &str,
    mut suggest: impl FnMut(String) -> bool,
) {
    for tc in try_chars.chars() {
        for (i, c) in word.char_indices() {
            if c == tc {
                continue;
            }
            let mut sugg = String::with_capacity(word.len() + tc.len_utf8());
            sugg.push_str(&word[..i]);
            sugg.push(tc);
            sugg.push_str(&word[i + c.len_utf8()..]);
            if !suggest(sugg) {
                return;
            }
        }
    }
}

/// Replace one member of a MAP group with each of the others.
pub fn map_suggestions(
    groups: &[SimilarityGroup],
    word: &str,
    mut suggest: impl FnMut(String) -> bool,
) {
    for (i, _) in word.char_indices() {
        let rest = &word[i..];
        for group in groups.iter() {
            for found in group.matches_at(rest) {
                for other in group.tokens().iter() {
                    if other == found {
                        continue;
                    }
                    let mut sugg = String::with_capacity(word.len() + other.len());
                    sugg.push_str(&word[..i]);
                    sugg.push_str(other);
                    sugg.push_str(&rest[found.len()..]);
                    if !suggest(sugg) {
                        return;
                    }
                }
            }
        }
    }
}

/// The char with its case swapped, if that is a single char.
fn swap_case(c: char) -> Option<char> {
    let swapped: SmallVec<[char; 3]> = if c.is_uppercase() {
        c.to_lowercase().collect()
    } else {
        c.to_uppercase().collect()
    };
    match swapped[..] {
        [s] if s != c => Some(s),
        _ => None,
    }
}

/// Fix chars typed with the wrong case or with a neighboring key.
pub fn keyboard_suggestions(
    layout: &KeyboardLayout,
    word: &str,
    mut suggest: impl FnMut(String) -> bool,
) {
    let replace_at = |i: usize, c: char, r: char| {
        let mut sugg = String::with_capacity(word.len() + r.len_utf8());
        sugg.push_str(&word[..i]);
        sugg.push(r);
        sugg.push_str(&word[i + c.len_utf8()..]);
        sugg
    };
    for (i, c) in word.char_indices() {
        if let Some(swapped) = swap_case(c) {
            if !suggest(replace_at(i, c, swapped)) {
                return;
            }
        }
        let mut aborted = false;
        layout.neighbors(c, |n| {
            if !suggest(replace_at(i, c, n)) {
                aborted = true;
            } else if let Some(swapped) = swap_case(n) {
                aborted = !suggest(replace_at(i, c, swapped));
            }
            !aborted
        });
        if aborted {
            return;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn collect(f: impl FnOnce(&mut dyn FnMut(String) -> bool)) -> Vec<String> {
        let mut v = Vec::new();
        f(&mut |s| {
            v.push(s);
            true
        });
        v
    }

    #[test]
    fn test_rep_second_pass() {
        let reps: ReplacementTable = [("ph", "f"), ("shun", "tion")].into_iter().collect();
        let v = collect(|f| rep_suggestions(&reps, "phashun", f));
        assert_eq!(vec!["fashun", "phation", "fation", "fation"], v);
    }

    #[test]
    fn test_extra_char() {
        let v = collect(|f| extra_char_suggestions("abxcd", "abcd", f));
        assert_eq!(vec!["abcd"], v);
        let v = collect(|f| extra_char_suggestions("abc", "", f));
        assert_eq!(vec!["bc", "ac", "ab"], v);
    }

    #[test]
    fn test_forgotten_char() {
        let v = collect(|f| forgotten_char_suggestions("ab", "xy", f));
        assert_eq!(vec!["xab", "axb", "abx", "yab", "ayb", "aby"], v);
    }

    #[test]
    fn test_bad_char() {
        let v = collect(|f| bad_char_suggestions("ab", "bc", f));
        assert_eq!(vec!["bb", "cb", "ac"], v);
    }

    #[test]
    fn test_map() {
        let groups = vec![SimilarityGroup::new("æ(ae)").unwrap()];
        let v = collect(|f| map_suggestions(&groups, "aeon", f));
        assert_eq!(vec!["æon"], v);
        let v = collect(|f| map_suggestions(&groups, "æonæ", f));
        assert_eq!(vec!["aeonæ", "æonae"], v);

        let groups = vec![SimilarityGroup::new("aäâ").unwrap()];
        let v = collect(|f| map_suggestions(&groups, "abcd", f));
        assert_eq!(vec!["äbcd", "âbcd"], v);
    }

    #[test]
    fn test_keyboard() {
        let layout = KeyboardLayout::new("uiop|xdf|nm");
        let v = collect(|f| keyboard_suggestions(&layout, "xd", f));
        assert_eq!(vec!["Xd", "dd", "Dd", "xD", "xx", "xX", "xf", "xF"], v);
        assert_eq!(None, swap_case('ß'));
        assert_eq!(None, swap_case('1'));
        assert_eq!(Some('ä'), swap_case('Ä'));
        assert_eq!(Some('Ж'), swap_case('ж'));
    }

    #[test]
    fn test_abort() {
        let mut n = 0;
        bad_char_suggestions("abcdef", "xyz", |_| {
            n += 1;
            n < 4
        });
        assert_eq!(4, n);
    }
}
