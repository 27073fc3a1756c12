//! Escape-aware run-length coding for one row of glyphs.
//!
//! Rows are lexed into tokens (escape sequence, single character, decimal
//! count) before anything is counted. A *visible unit* is either a bare
//! character or an `escape + character + escape` wrapper as written by the
//! color glyph mapper; runs are counted over whole units so escape sequences
//! are never split or merged into a count.
//!
//! Encoded form: a run of `n >= threshold` identical units is written as the
//! unit followed by `n` in decimal. Rows must not contain ASCII digits outside
//! escape sequences; none of the glyph palettes do.

const ESC: char = '\x1b';

/// Longest run a single count may describe. Longer runs are written as
/// several counted chunks; larger counts are treated as literal digits.
pub const MAX_RUN: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Escape,
    Char,
    Count,
}

#[derive(Debug, Clone, Copy)]
struct Token {
    kind: Kind,
    start: usize,
    end: usize,
}

/// Splits text into tokens. Digit runs become `Count` tokens only when
/// `counts` is set; otherwise every digit is an ordinary character.
struct Lexer<'a> {
    text: &'a str,
    pos: usize,
    counts: bool,
}

impl<'a> Lexer<'a> {
    fn new(text: &'a str, counts: bool) -> Self {
        Self {
            text,
            pos: 0,
            counts,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let rest = &self.text[self.pos..];
        let first = rest.chars().next()?;
        let (kind, len) = if first == ESC {
            (Kind::Escape, escape_len(rest))
        } else if self.counts && first.is_ascii_digit() {
            (Kind::Count, rest.bytes().take_while(u8::is_ascii_digit).count())
        } else {
            (Kind::Char, first.len_utf8())
        };

        let token = Token {
            kind,
            start: self.pos,
            end: self.pos + len,
        };
        self.pos += len;
        Some(token)
    }
}

/// Byte length of the escape sequence at the start of `rest`.
///
/// CSI sequences (`ESC [`) run up to and including the first final byte in
/// `@`..=`~`; an unterminated CSI sequence swallows the rest of the text.
/// Any other escape is `ESC` plus one character.
fn escape_len(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    match bytes.get(1).copied() {
        None => 1,
        Some(b'[') => bytes[2..]
            .iter()
            .position(|b| (0x40..=0x7e).contains(b))
            .map_or(bytes.len(), |i| i + 3),
        Some(_) => 1 + rest[1..].chars().next().map_or(0, char::len_utf8),
    }
}

fn is_wrapped(tokens: &[Token]) -> bool {
    matches!(
        tokens,
        [open, glyph, close]
            if open.kind == Kind::Escape && glyph.kind == Kind::Char && close.kind == Kind::Escape
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Unit<'a> {
    text: &'a str,
    countable: bool,
}

/// Group a row into visible units. Lone escapes are kept but never counted.
fn units(row: &str) -> Vec<Unit<'_>> {
    let tokens: Vec<Token> = Lexer::new(row, false).collect();
    let mut units = Vec::with_capacity(tokens.len());
    let mut i = 0;

    while i < tokens.len() {
        if tokens.get(i..i + 3).is_some_and(is_wrapped) {
            units.push(Unit {
                text: &row[tokens[i].start..tokens[i + 2].end],
                countable: true,
            });
            i += 3;
            continue;
        }

        let token = tokens[i];
        units.push(Unit {
            text: &row[token.start..token.end],
            countable: token.kind == Kind::Char,
        });
        i += 1;
    }

    units
}

/// Run-length encode one row.
///
/// Runs of at least `threshold` identical units are written as the unit
/// followed by the run length; shorter runs are written out literally. With
/// `enabled == false` the row is returned unchanged. A threshold of 0 behaves
/// like 1.
///
/// # Example
/// ```ignore
/// assert_eq!(compress("AAAAABBBCC", true, 3), "A5B3CC");
/// ```
pub fn compress(row: &str, enabled: bool, threshold: usize) -> String {
    if !enabled {
        return row.to_string();
    }

    let threshold = threshold.max(1);
    let units = units(row);
    let mut out = String::with_capacity(row.len());
    let mut i = 0;

    while i < units.len() {
        let unit = units[i];
        let mut run = 1;
        if unit.countable {
            while units.get(i + run) == Some(&unit) {
                run += 1;
            }
        }

        i += run;
        if !unit.countable {
            out.push_str(unit.text);
            continue;
        }

        while run > 0 {
            let chunk = run.min(MAX_RUN);
            if chunk >= threshold {
                out.push_str(unit.text);
                out.push_str(&chunk.to_string());
            } else {
                out.push_str(&unit.text.repeat(chunk));
            }
            run -= chunk;
        }
    }

    out
}

/// The unit a count at `tokens[i]` repeats, as a byte range of the text.
fn repeated_unit(tokens: &[Token], i: usize) -> Option<(usize, usize)> {
    match &tokens[..i] {
        [.., prev] if prev.kind == Kind::Char => Some((prev.start, prev.end)),
        [.., open, glyph, close] if is_wrapped(&[*open, *glyph, *close]) => {
            Some((open.start, close.end))
        }
        _ => None,
    }
}

/// Expand a row written by [`compress`].
///
/// Escape sequences are copied through. A count repeats the character before
/// it, or the whole escape-wrapped glyph when the three preceding tokens form
/// one. Digits with nothing repeatable in front of them are copied literally,
/// so text that was never compressed (and holds no digits) is unchanged.
pub fn unpack(text: &str) -> String {
    let tokens: Vec<Token> = Lexer::new(text, true).collect();
    let mut out = String::with_capacity(text.len() * 2);

    for (i, token) in tokens.iter().enumerate() {
        let slice = &text[token.start..token.end];
        if token.kind != Kind::Count {
            out.push_str(slice);
            continue;
        }

        let count = slice.parse::<usize>().ok().filter(|n| *n <= MAX_RUN);
        match (repeated_unit(&tokens, i), count) {
            (Some((start, end)), Some(0)) => {
                // The unit was already written once; a zero count removes it
                out.truncate(out.len() - (end - start));
            }
            (Some((start, end)), Some(n)) => {
                let unit = &text[start..end];
                out.reserve(unit.len() * (n - 1));
                for _ in 1..n {
                    out.push_str(unit);
                }
            }
            _ => out.push_str(slice),
        }
    }

    out
}

/// Remove every escape sequence, leaving only visible characters.
pub fn strip_escapes(text: &str) -> String {
    Lexer::new(text, false)
        .filter(|t| t.kind == Kind::Char)
        .map(|t| &text[t.start..t.end])
        .collect()
}
