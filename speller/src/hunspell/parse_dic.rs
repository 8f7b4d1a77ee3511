/// Reading the word list of a .dic file, and decoding both files from the
/// character set declared in the affix file.
use anyhow::{anyhow, Context, Result};
use encoding::label::encoding_from_whatwg_label;
use encoding::DecoderTrap;
use log::warn;

use crate::error::LoadError;
use crate::hunspell::affixdata::AffixData;
use crate::hunspell::flagset::FlagSet;

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Find the SET directive in raw affix file contents.
/// The directive itself is always plain ASCII, whatever encoding it names.
pub fn detect_encoding(aff: &[u8]) -> Option<String> {
    for line in aff.split(|b| *b == b'\n') {
        let line = String::from_utf8_lossy(line);
        let line = line.trim_start_matches(BYTE_ORDER_MARK);
        let mut tokens = line.split_whitespace();
        if tokens.next() == Some("SET") {
            return tokens.next().map(str::to_string);
        }
    }
    None
}

fn is_utf8(label: &str) -> bool {
    label.eq_ignore_ascii_case("UTF-8") || label.eq_ignore_ascii_case("UTF8")
}

/// Map hunspell's names for encodings to the labels the web uses.
fn whatwg_label(label: &str) -> String {
    let label = label.to_ascii_lowercase();
    if let Some(cp) = label.strip_prefix("microsoft-cp") {
        return format!("windows-{}", cp);
    }
    match label.as_str() {
        "tis620-2533" => "tis-620".to_string(),
        _ => label,
    }
}

/// Turn file contents into text. Without a declared encoding, the file
/// must be UTF-8.
pub fn decode(bytes: &[u8], encoding: Option<&str>) -> Result<String, LoadError> {
    let label = match encoding {
        Some(label) if !is_utf8(label) => label,
        _ => {
            let text = String::from_utf8(bytes.to_vec())
                .map_err(|e| anyhow!("Invalid UTF-8 text: {}", e))?;
            return Ok(text);
        }
    };
    let Some(decoder) = encoding_from_whatwg_label(&whatwg_label(label)) else {
        return Err(LoadError::UnsupportedEncoding(label.to_string()));
    };
    decoder
        .decode(bytes, DecoderTrap::Strict)
        .map_err(|e| LoadError::Malformed(anyhow!("Invalid {} text: {}", label, e)))
}

/// Split a dictionary line into the word with its flags, and its
/// morphological fields.
fn split_morphological_fields(s: &str) -> (&str, Option<&str>) {
    // Parsing these is tricky because they are separated from the
    // word by a space, but the word may itself contain a space.
    // Parse them by recognizing the pattern xx:yyy with a two-char tag.
    let mut last_space = None;
    for (i, c) in s.char_indices() {
        if let Some(spos) = last_space {
            if (i - spos <= 2 && !c.is_alphanumeric()) || (i - spos == 3 && c != ':') {
                last_space = None;
            } else if i - spos == 3 {
                return (&s[..spos], Some(s[spos + 1..].trim()));
            }
        } else if c == ' ' || c == '\t' {
            last_space = Some(i);
        }
    }
    (s, None)
}

/// Read the words and their flags from the text of a .dic file.
/// Lines with undecodable flags are skipped with a warning.
pub fn parse_dictionary(text: &str, affix_data: &AffixData) -> Result<Vec<(String, FlagSet)>> {
    let text = text.trim_start_matches(BYTE_ORDER_MARK);
    let mut lines = text.lines().enumerate();
    // The first line is just the number of words
    let count = match lines.next() {
        Some((_, line)) => line
            .trim()
            .parse::<usize>()
            .with_context(|| format!("Expected a word count, got {}", line))?,
        None => return Ok(Vec::new()),
    };
    let mut words = Vec::with_capacity(count);
    for (nr, line) in lines {
        if line.starts_with('\t') {
            // comment
            continue;
        }
        let (word, _morphs) = split_morphological_fields(line);
        let (word, flagstr) = word.split_once('/').unwrap_or((word, ""));
        let word = word.trim();
        if word.is_empty() {
            continue;
        }
        match affix_data.parse_flag_set(flagstr.trim()) {
            Ok(flags) => words.push((word.to_string(), flags)),
            Err(e) => warn!("skipping dictionary line {}: {:#}", nr + 1, e),
        }
    }
    Ok(words)
}
