//! Diacritic folding, collation and match ranges.
//!
//! These are the default primitives behind [`crate::locale::RegionLocale`].
//! Folding decomposes each character canonically and drops combining marks,
//! so `Å` compares and matches like `A`.
//!
//! Match ranges are reported in UTF-16 code units of the original title,
//! which is what most presentation toolkits index attributed text by. Use
//! [`MatchRange::byte_range`] to get back to Rust string offsets.

use std::cmp::Ordering;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Letters with a stroke or bar have no canonical decomposition.
fn fold_stroke(c: char) -> Option<char> {
    let base = match c {
        'Ø' => 'O',
        'ø' => 'o',
        'Ł' => 'L',
        'ł' => 'l',
        'Đ' => 'D',
        'đ' => 'd',
        'Ħ' => 'H',
        'ħ' => 'h',
        _ => return None,
    };
    Some(base)
}

/// Feed the folded form of `c` (zero or more chars) to `emit`.
fn fold_char_with(c: char, mut emit: impl FnMut(char)) {
    if let Some(base) = fold_stroke(c) {
        emit(base);
        return;
    }
    for d in std::iter::once(c).nfd() {
        if !is_combining_mark(d) {
            emit(d);
        }
    }
}

fn folded_chars(s: &str) -> Vec<char> {
    let mut out = Vec::with_capacity(s.len());
    for c in s.chars() {
        fold_char_with(c, |f| out.push(f));
    }
    out
}

/// Remove diacritics, keeping case: `"Åland"` → `"Aland"`.
#[must_use]
pub fn fold_diacritics(s: &str) -> String {
    folded_chars(s).into_iter().nfc().collect()
}

/// Fold a single character, e.g. for bucketing by initial letter.
#[must_use]
pub fn fold_char(c: char) -> String {
    let mut buf = [0u8; 4];
    fold_diacritics(c.encode_utf8(&mut buf))
}

/// Compare two strings ignoring diacritics.
///
/// Case only breaks ties, lowercase first. Strings that differ solely in
/// diacritics compare `Equal`. The result is a total order, so it can be
/// handed straight to `sort_by`.
#[must_use]
pub fn compare_folding_diacritics(a: &str, b: &str) -> Ordering {
    let fa = folded_chars(a);
    let fb = folded_chars(b);

    let primary = fa
        .iter()
        .flat_map(|c| c.to_lowercase())
        .cmp(fb.iter().flat_map(|c| c.to_lowercase()));
    if primary != Ordering::Equal {
        return primary;
    }

    fa.iter()
        .map(|c| (c.is_uppercase(), *c))
        .cmp(fb.iter().map(|c| (c.is_uppercase(), *c)))
}

/// Find `needle` in `haystack`, ignoring case and diacritics.
///
/// Returns the first match. The range always covers whole characters of the
/// haystack, including combining marks that trail the last matched letter.
/// An empty needle, or one that folds to nothing, never matches.
#[must_use]
pub fn find_folding(haystack: &str, needle: &str) -> Option<MatchRange> {
    let needle: Vec<char> = folded_chars(needle)
        .into_iter()
        .flat_map(char::to_lowercase)
        .collect();
    if needle.is_empty() {
        return None;
    }

    let original: Vec<char> = haystack.chars().collect();
    let mut folded = Vec::with_capacity(original.len());
    let mut origin = Vec::with_capacity(original.len());
    for (i, c) in original.iter().enumerate() {
        fold_char_with(*c, |f| {
            for lower in f.to_lowercase() {
                folded.push(lower);
                origin.push(i);
            }
        });
    }
    if needle.len() > folded.len() {
        return None;
    }

    let start = folded
        .windows(needle.len())
        .position(|window| window == needle.as_slice())?;
    let first = origin[start];
    let mut last = origin[start + needle.len() - 1];
    while last + 1 < original.len() && is_combining_mark(original[last + 1]) {
        last += 1;
    }

    let utf16_start = original[..first].iter().map(|c| c.len_utf16()).sum();
    let utf16_len = original[first..=last].iter().map(|c| c.len_utf16()).sum();
    Some(MatchRange::new(utf16_start, utf16_len))
}

/// Where a search query was found inside a title.
///
/// Offsets are UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchRange {
    pub start: usize,
    pub length: usize,
}

impl MatchRange {
    #[must_use]
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Convert to a byte range of `text`.
    ///
    /// Returns `None` if either end falls outside `text` or inside a
    /// surrogate pair.
    #[must_use]
    pub fn byte_range(&self, text: &str) -> Option<Range<usize>> {
        let mut start = None;
        let mut end = None;
        let mut units = 0;

        for (byte, c) in text.char_indices() {
            if units == self.start {
                start = Some(byte);
            }
            if units == self.end() {
                end = Some(byte);
                break;
            }
            units += c.len_utf16();
        }
        if units == self.start && start.is_none() {
            start = Some(text.len());
        }
        if units == self.end() && end.is_none() {
            end = Some(text.len());
        }

        Some(start?..end?)
    }

    /// Split `text` into the parts before, inside and after the range.
    #[must_use]
    pub fn split<'a>(&self, text: &'a str) -> Option<(&'a str, &'a str, &'a str)> {
        let range = self.byte_range(text)?;
        Some((&text[..range.start], &text[range.clone()], &text[range.end..]))
    }
}
