/// Parser for hunspell-format .aff files
use anyhow::{anyhow, bail, Context, Result};
use fnv::FnvHashMap;
use log::debug;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_till1};
use nom::character::complete::{
    char, line_ending, not_line_ending, one_of, space0, space1, u32,
};
use nom::combinator::{eof, map, opt, peek, success, value, verify};
use nom::error::{ErrorKind, ParseError};
use nom::multi::many0;
use nom::sequence::{delimited, preceded, separated_pair};
use nom::{Compare, Err, Finish, IResult, InputLength, Parser};

use crate::hunspell::affixdata::{AffixData, FlagMode};
use crate::hunspell::affixentry::{AffixEntry, AffixKind};
use crate::hunspell::breaktable::BreakTable;
use crate::hunspell::flagset::{AffixFlag, FlagSet};
use crate::hunspell::keyboard::KeyboardLayout;
use crate::hunspell::similarity::SimilarityGroup;

type Input<'a> = &'a str;

const BYTE_ORDER_MARK: char = '\u{FEFF}';

#[derive(Debug)]
struct AffError {
    message: String,
}

impl AffError {
    fn new(message: &str) -> Self {
        AffError {
            message: message.to_string(),
        }
    }

    fn wrapped(message: &str) -> Err<Self> {
        Err::Error(Self::new(message))
    }
}

impl<'a> ParseError<Input<'a>> for AffError {
    fn from_error_kind(input: Input, kind: ErrorKind) -> Self {
        let line = input.lines().next().unwrap_or_default();
        let message = format!("{:?}:\t{}", kind, line);
        AffError { message }
    }

    fn append(_input: Input, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl std::fmt::Display for AffError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// The fields of one PFX or SFX rule line, still undecoded.
#[derive(Clone, Debug)]
struct AffixRule<'a> {
    flag: &'a str,
    strip: &'a str,
    append: &'a str,
    condition: Option<&'a str>,
}

#[derive(Clone, Debug)]
enum AffixLine<'a> {
    Empty,
    TableSize(&'static str),
    Unknown(&'a str),
    SetEncoding(&'a str),
    SetFlagMode(FlagMode),
    SetKeyboardString(&'a str),
    SetTryString(&'a str),
    SetIgnoreString(&'a str),
    SetFlag(&'a str, &'a str),
    SetComplexPrefixes,
    SetFullstrip,
    SetForbidWarn,
    AddFlagAlias(&'a str),
    AddReplacement((&'a str, &'a str)),
    AddIconv((&'a str, &'a str)),
    AddOconv((&'a str, &'a str)),
    AddRelatedChars(&'a str),
    AddWordBreak(&'a str),
    AffixHeader(AffixKind, &'a str, bool),
    AddAffix(AffixKind, AffixRule<'a>),
}

/// Parse a line starting with a keyword and then a value.
/// Takes the tag for the keyword, and a parser for the value.
/// Returns the result of the value parser.
fn keyword<'a, T, O, E: ParseError<Input<'a>>, F>(
    key: T,
    mut value: F,
) -> impl FnMut(Input<'a>) -> IResult<Input<'a>, O, E>
where
    F: Parser<Input<'a>, O, E>,
    Input<'a>: Compare<T>,
    T: InputLength + Copy,
{
    move |s: Input<'a>| {
        let (s, _) = tag(key).parse(s)?;
        let (s, _) = space1.parse(s)?;
        // re-implement cut() because I don't know how to pass cut(value)
        // without errors about copying value.
        match value.parse(s) {
            Err(Err::Error(e)) => Err(Err::Failure(e)),
            rest => rest,
        }
    }
}

/// Parse a line that is a table entry. Each line of a table
/// starts with the same keyword. The first line contains the
/// number of entries that follow, which we ignore.
///
/// Takes the tag for the keyword, a parser for the value, and the
/// `AffixLine` type to convert the value to.
/// Returns `AffixLine::TableSize` for the first line, and the given
/// `AffixLine` type for the following lines.
fn table_line<'a, O>(
    key: &'static str,
    mut value: impl Parser<Input<'a>, O, AffError>,
    conv: impl Fn(O) -> AffixLine<'a>,
) -> impl FnMut(Input<'a>) -> IResult<Input<'a>, AffixLine<'a>, AffError> {
    move |s: Input<'a>| {
        let (s, _) = tag(key).parse(s)?;
        let (s, _) = space1.parse(s)?;
        if let Ok((s, _)) = u32::<Input<'a>, AffError>(s) {
            if peek(ending)(s).is_ok() {
                return Ok((s, AffixLine::TableSize(key)));
            }
        }
        // re-implement cut() because I don't know how to pass cut(value)
        // without errors about copying value.
        match value.parse(s) {
            Err(Err::Error(e)) => Err(Err::Failure(e)),
            Ok((s, v)) => Ok((s, conv(v))),
            Err(other) => Err(other),
        }
    }
}

fn comment(s: &str) -> IResult<&str, (), AffError> {
    value((), preceded(char('#'), not_line_ending))(s)
}

fn ending(s: &str) -> IResult<&str, (), AffError> {
    value((), delimited(space0, opt(comment), line_ending))(s)
}

fn value_string(s: &str) -> IResult<&str, &str, AffError> {
    take_till1(|c: char| c.is_whitespace())(s)
}

/// A directive without arguments.
fn bare_keyword<'a>(
    key: &'static str,
    line: AffixLine<'a>,
) -> impl FnMut(Input<'a>) -> IResult<Input<'a>, AffixLine<'a>, AffError> {
    value(line, verify(value_string, move |k: &str| k == key))
}

const FLAG_NAMES: [&str; 7] = [
    "FORBIDDENWORD",
    "WARN",
    "NOSUGGEST",
    "NEEDAFFIX",
    "PSEUDOROOT",
    "KEEPCASE",
    "ONLYINCOMPOUND",
];

fn assign_flag(s: &str) -> IResult<&str, AffixLine, AffError> {
    let (s, key) = value_string(s)?;
    if !FLAG_NAMES.contains(&key) {
        return Err(AffError::wrapped("Keyword not a known flag"));
    }
    let (s, _) = space1(s)?;
    let (s, v) = value_string(s).map_err(|_| Err::Failure(AffError::new(key)))?;
    Ok((s, AffixLine::SetFlag(key, v)))
}

fn set_encoding(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(keyword("SET", value_string), AffixLine::SetEncoding)(s)
}

fn flag_mode(s: &str) -> IResult<&str, FlagMode, AffError> {
    alt((
        value(FlagMode::DoubleCharFlags, tag("long")),
        value(FlagMode::NumericFlags, tag("num")),
        value(FlagMode::Utf8Flags, tag("UTF-8")),
    ))(s)
}

fn set_flag_mode(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(keyword("FLAG", flag_mode), AffixLine::SetFlagMode)(s)
}

fn set_keyboard_string(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(keyword("KEY", value_string), AffixLine::SetKeyboardString)(s)
}

fn set_try_string(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(keyword("TRY", value_string), AffixLine::SetTryString)(s)
}

fn set_ignore_string(s: &str) -> IResult<&str, AffixLine, AffError> {
    map(keyword("IGNORE", value_string), AffixLine::SetIgnoreString)(s)
}

fn string_pair(s: &str) -> IResult<&str, (&str, &str), AffError> {
    separated_pair(value_string, space1, value_string)(s)
}

fn add_flag_alias(s: &str) -> IResult<&str, AffixLine, AffError> {
    table_line("AF", value_string, AffixLine::AddFlagAlias)(s)
}

fn add_replacement(s: &str) -> IResult<&str, AffixLine, AffError> {
    table_line("REP", string_pair, AffixLine::AddReplacement)(s)
}

fn add_iconv(s: &str) -> IResult<&str, AffixLine, AffError> {
    table_line("ICONV", string_pair, AffixLine::AddIconv)(s)
}

fn add_oconv(s: &str) -> IResult<&str, AffixLine, AffError> {
    table_line("OCONV", string_pair, AffixLine::AddOconv)(s)
}

fn add_related_chars(s: &str) -> IResult<&str, AffixLine, AffError> {
    table_line("MAP", value_string, AffixLine::AddRelatedChars)(s)
}

fn add_word_break(s: &str) -> IResult<&str, AffixLine, AffError> {
    table_line("BREAK", value_string, AffixLine::AddWordBreak)(s)
}

/// `strip append[/flags] [condition [morphology...]]`
fn affix_rule(s: &str) -> IResult<&str, (&str, &str, Option<&str>), AffError> {
    let (s, strip) = value_string(s)?;
    let (s, _) = space1(s)?;
    let (s, append) = value_string(s)?;
    let (s, condition) = opt(preceded(space1, verify(value_string, |v: &str| !v.starts_with('#'))))(s)?;
    // Morphological fields are not used
    let (s, _) = opt(preceded(space1, not_line_ending))(s)?;
    Ok((s, (strip, append, condition)))
}

/// `Y|N count`, the first line of an affix class
fn affix_header(s: &str) -> IResult<&str, (bool, u32), AffError> {
    let (s, yn) = one_of("YN")(s)?;
    let (s, _) = space1(s)?;
    let (s, count) = u32(s)?;
    let (s, _) = peek(ending)(s)?;
    Ok((s, (yn == 'Y', count)))
}

fn add_affix<'a>(
    key: &'static str,
    kind: AffixKind,
) -> impl FnMut(Input<'a>) -> IResult<Input<'a>, AffixLine<'a>, AffError> {
    move |s: Input<'a>| {
        let (s, _) = tag(key)(s)?;
        let (s, _) = space1(s)?;
        let (s, flag) = value_string(s).map_err(|_| Err::Failure(AffError::new(key)))?;
        let (s, _) = space1(s).map_err(|_: Err<AffError>| Err::Failure(AffError::new(key)))?;
        if let Ok((s, (cross, _))) = affix_header(s) {
            return Ok((s, AffixLine::AffixHeader(kind, flag, cross)));
        }
        match affix_rule(s) {
            Ok((s, (strip, append, condition))) => Ok((
                s,
                AffixLine::AddAffix(
                    kind,
                    AffixRule {
                        flag,
                        strip,
                        append,
                        condition,
                    },
                ),
            )),
            Err(Err::Error(e)) => Err(Err::Failure(e)),
            Err(e) => Err(e),
        }
    }
}

fn unknown_line(s: &str) -> IResult<&str, AffixLine, AffError> {
    let (s, key) = verify(value_string, |k: &str| !k.starts_with('#'))(s)?;
    let (s, _) = not_line_ending(s)?;
    Ok((s, AffixLine::Unknown(key)))
}

fn line(s: &str) -> IResult<&str, AffixLine, AffError> {
    alt((
        set_encoding,
        set_flag_mode,
        set_keyboard_string,
        set_try_string,
        set_ignore_string,
        assign_flag,
        add_flag_alias,
        add_replacement,
        add_iconv,
        add_oconv,
        add_related_chars,
        add_word_break,
        bare_keyword("COMPLEXPREFIXES", AffixLine::SetComplexPrefixes),
        bare_keyword("FULLSTRIP", AffixLine::SetFullstrip),
        bare_keyword("FORBIDWARN", AffixLine::SetForbidWarn),
        add_affix("PFX", AffixKind::Prefix),
        add_affix("SFX", AffixKind::Suffix),
        unknown_line,
        success(AffixLine::Empty),
    ))(s)
}

fn affix_lines(s: &str) -> IResult<&str, Vec<AffixLine>, AffError> {
    let (s, _) = opt(char(BYTE_ORDER_MARK)).parse(s)?; // discard BOM
    let (s, lines) = many0(delimited(space0, line, ending))(s)?;
    let (s, _) = eof(s)?;
    Ok((s, lines))
}

/// "0" stands for the empty string in affix rules.
fn zero_empty(s: &str) -> &str {
    if s == "0" {
        ""
    } else {
        s
    }
}

fn build_affix_data(lines: &[AffixLine]) -> Result<AffixData> {
    let mut d = AffixData::new();
    let mut cross_products: FnvHashMap<(AffixKind, AffixFlag), bool> = FnvHashMap::default();
    let mut break_declared = false;
    for l in lines.iter() {
        match l {
            AffixLine::Empty => (),
            AffixLine::TableSize(key) => {
                if *key == "BREAK" {
                    break_declared = true;
                }
            }
            AffixLine::Unknown(key) => debug!("ignoring affix directive {}", key),
            AffixLine::SetEncoding(enc) => d.encoding = Some(enc.to_string()),
            AffixLine::SetFlagMode(fm) => d.flag_mode = *fm,
            AffixLine::SetKeyboardString(k) => d.keyboard = KeyboardLayout::new(k),
            AffixLine::SetTryString(t) => d.try_chars = t.to_string(),
            AffixLine::SetIgnoreString(t) => d.ignore_chars = t.to_string(),
            AffixLine::SetFlag(f, v) => {
                let flag = Some(d.parse_flag(v).with_context(|| format!("Could not parse {}", f))?);
                match *f {
                    "FORBIDDENWORD" => d.special_flags.forbidden = flag,
                    "WARN" => d.special_flags.warn = flag,
                    "NOSUGGEST" => d.special_flags.no_suggest = flag,
                    "NEEDAFFIX" | "PSEUDOROOT" => d.special_flags.need_affix = flag,
                    "KEEPCASE" => d.special_flags.keep_case = flag,
                    "ONLYINCOMPOUND" => d.special_flags.only_in_compound = flag,
                    _ => bail!("Unhandled flag {}", f),
                }
            }
            AffixLine::SetComplexPrefixes => d.complex_prefixes = true,
            AffixLine::SetFullstrip => d.fullstrip = true,
            AffixLine::SetForbidWarn => d.forbid_warn = true,
            AffixLine::AddFlagAlias(v) => {
                let flags = d.parse_flags(v).with_context(|| format!("Could not parse AF {}", v))?;
                d.flag_aliases.push(flags.into_iter().collect());
            }
            AffixLine::AddReplacement((from, to)) => {
                // underscores stand for spaces
                d.replacements.push(&from.replace('_', " "), &to.replace('_', " "));
            }
            AffixLine::AddIconv((from, to)) => d.iconv.push(from, to),
            AffixLine::AddOconv((from, to)) => d.oconv.push(from, to),
            AffixLine::AddRelatedChars(v) => {
                d.similarities.push(SimilarityGroup::new(v)?);
            }
            AffixLine::AddWordBreak(v) => {
                break_declared = true;
                d.break_table.push(v);
            }
            AffixLine::AffixHeader(kind, flag, cross) => {
                let flag = d
                    .parse_flag(flag)
                    .with_context(|| format!("Invalid affix header flag {}", flag))?;
                cross_products.insert((*kind, flag), *cross);
            }
            AffixLine::AddAffix(kind, rule) => {
                let flag = d.parse_flag(rule.flag)?;
                let cross = cross_products.get(&(*kind, flag)).copied().ok_or_else(|| {
                    anyhow!("Affix rule for {} without a header line", rule.flag)
                })?;
                let (append, cont_flags) = match rule.append.split_once('/') {
                    Some((append, flags)) => (append, d.parse_flag_set(flags)?),
                    None => (rule.append, FlagSet::new()),
                };
                let entry = AffixEntry::new(
                    *kind,
                    flag,
                    cross,
                    zero_empty(rule.strip),
                    zero_empty(append),
                    cont_flags,
                    rule.condition.unwrap_or("."),
                )
                .with_context(|| format!("Invalid affix rule for {}", rule.flag))?;
                match kind {
                    AffixKind::Prefix => d.add_prefix(entry)?,
                    AffixKind::Suffix => d.add_suffix(entry)?,
                }
            }
        };
    }
    if !break_declared {
        d.break_table = BreakTable::hunspell_default();
    }
    Ok(d)
}

pub fn parse_affix_data(text: &str) -> Result<AffixData> {
    // The last line may be missing its line ending
    let owned;
    let text = if text.ends_with('\n') {
        text
    } else {
        owned = format!("{}\n", text);
        &owned
    };
    let lines = match affix_lines.parse(text).finish() {
        Ok((_, lines)) => lines,
        Err(e) => return Err(anyhow!("Could not parse affix file: {}", e)),
    };
    let d = build_affix_data(&lines)?;
    debug!(
        "loaded {} prefixes, {} suffixes, {} replacements",
        d.prefixes.len(),
        d.suffixes.len(),
        d.replacements.len()
    );
    Ok(d)
}

#[cfg(test)]
mod test {
    use super::*;

    const AFF: &str = "\u{FEFF}# comment
SET UTF-8
TRY esianrtolcdugmphbyfvkwz
KEY qwertyuiop|asdfghjkl|zxcvbnm
NOSUGGEST !
FORBIDDENWORD *
KEEPCASE K  # trailing comment
COMPOUNDMIN 1

REP 2
REP ph f
REP ^alot$ a_lot
MAP 1
MAP aáä(ae)
ICONV 1
ICONV ’ '

PFX A Y 1
PFX A 0 re .

SFX D N 2
SFX D y ied [^aeiou]y
SFX D 0 ed/S [^y] po:verb
";

    #[test]
    fn test_parse() {
        let d = parse_affix_data(AFF).unwrap();
        assert_eq!(Some("UTF-8".to_string()), d.encoding);
        assert_eq!("esianrtolcdugmphbyfvkwz", d.try_chars);
        assert!(!d.keyboard.is_empty());
        assert_eq!(Some('!' as u32), d.special_flags.no_suggest);
        assert_eq!(Some('*' as u32), d.special_flags.forbidden);
        assert_eq!(Some('K' as u32), d.special_flags.keep_case);
        assert_eq!(2, d.replacements.len());
        assert_eq!(1, d.similarities.len());
        assert_eq!("don't", d.iconv.replace_copy("don’t"));
        // no BREAK lines means the default table
        assert_eq!(BreakTable::hunspell_default(), d.break_table);

        assert_eq!(1, d.prefixes.len());
        let re = d.prefixes.iter().next().unwrap();
        assert!(re.cross_product);
        assert_eq!("", re.strip);
        assert_eq!("re", re.append);

        assert_eq!(2, d.suffixes.len());
        let mut suffixes = d.suffixes.iter();
        let ied = suffixes.next().unwrap();
        assert!(!ied.cross_product);
        assert_eq!("y", ied.strip);
        assert_eq!(Some("tried".to_string()), ied.to_derived("try"));
        let ed = suffixes.next().unwrap();
        assert_eq!(FlagSet::from_chars("S"), ed.cont_flags);
        assert_eq!(Some("jumped".to_string()), ed.to_derived("jump"));
        assert_eq!(None, ed.to_derived("play"));
    }

    #[test]
    fn test_long_flags_and_aliases() {
        let aff = "FLAG long
AF 2
AF AaBb
AF Cc
COMPLEXPREFIXES
FULLSTRIP
FORBIDWARN
WARN Ww
BREAK 0
SFX Aa Y 1
SFX Aa 0 s/2 .
";
        let d = parse_affix_data(aff).unwrap();
        assert_eq!(FlagMode::DoubleCharFlags, d.flag_mode);
        assert_eq!(2, d.flag_aliases.len());
        assert!(d.complex_prefixes);
        assert!(d.fullstrip);
        assert!(d.forbid_warn);
        assert_eq!(Some('W' as u32 * 256 + 'w' as u32), d.special_flags.warn);
        assert!(d.break_table.is_empty());
        let s = d.suffixes.iter().next().unwrap();
        assert_eq!('A' as u32 * 256 + 'a' as u32, s.flag);
        assert!(s.cont_flags.contains('C' as u32 * 256 + 'c' as u32));
    }

    #[test]
    fn test_breaks() {
        let d = parse_affix_data("BREAK 2\nBREAK -\nBREAK ^'").unwrap();
        assert_eq!(["-"], d.break_table.middle_word_breaks());
        assert_eq!(["'"], d.break_table.start_word_breaks());
    }

    #[test]
    fn test_errors() {
        assert!(parse_affix_data("SFX A Y 1\nSFX A 0 s [ab\n").is_err());
        assert!(parse_affix_data("SFX A 0 s .\n").is_err());
        assert!(parse_affix_data("SFX A Y 1\nSFX A y ies [^y]\n").is_err());
        assert!(parse_affix_data("FLAG long\nSFX A Y 1\n").is_err());
        assert!(parse_affix_data("MAP 1\nMAP a(b\n").is_err());
        assert!(parse_affix_data("KEEPCASE\n").is_err());
        assert!(parse_affix_data("REP 1\nREP x\n").is_err());
        assert!(parse_affix_data("").is_ok());
    }
}
