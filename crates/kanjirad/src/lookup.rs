//! Radical intersection and kanji ordering.

use crate::{radicals::RadicalTable, store::KanjiTable};
use itertools::Itertools;
use std::collections::BTreeSet;

/// The first character used as a stroke count group marker, ①.
const MARKER_START: u32 = 0x2460;
/// The last character usable as a group marker, ⓿.
const MARKER_END: u32 = 0x24FF;

/// Returns the kanji that contain every one of `radicals`.
///
/// The result keeps the order of the first radical's kanji list and contains no duplicates.
/// No radicals, an unknown radical or a radical without kanji all result in no matches.
pub fn intersect_by_radicals<I>(table: &RadicalTable, radicals: I) -> String
where
    I: IntoIterator<Item = char>,
{
    let mut radicals = radicals.into_iter();
    let Some(first) = radicals.next() else {
        return String::new();
    };
    let mut candidates = table.lookup_radical(first).chars().unique().collect::<Vec<_>>();
    for radical in radicals {
        if candidates.is_empty() {
            break;
        }
        let kanji = table.lookup_radical(radical);
        candidates.retain(|&c| kanji.contains(c));
    }
    candidates.into_iter().collect()
}

/// Orders kanji by stroke count, then grade, then code point.
///
/// Kanji without a known stroke count are compared by code point: they are merged into the
/// ordered known kanji in front of the first one with a higher code point. A set made only of
/// unknown kanji is therefore sorted by code point.
#[derive(Debug, Clone, Copy)]
pub struct KanjiOrder<'a> {
    strokes: &'a KanjiTable,
    grades: &'a KanjiTable,
}

/// The sort key of a kanji with a known stroke count, see [`KanjiOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey {
    pub strokes: u32,
    pub grade: u32,
    pub kanji: char,
}

impl<'a> KanjiOrder<'a> {
    pub fn new(strokes: &'a KanjiTable, grades: &'a KanjiTable) -> Self {
        Self { strokes, grades }
    }

    /// The sort key of `kanji`, `None` if its stroke count is unknown.
    pub fn key(&self, kanji: char) -> Option<SortKey> {
        let strokes = self.strokes.get(kanji)?;
        Some(SortKey {
            strokes,
            grade: self.grades.get(kanji).unwrap_or_default(),
            kanji,
        })
    }

    pub fn sort(&self, kanji: &str) -> String {
        let mut known = vec![];
        let mut unknown = vec![];
        for k in kanji.chars() {
            match self.key(k) {
                Some(key) => known.push(key),
                None => unknown.push(k),
            }
        }
        known.sort();
        unknown.sort();
        known
            .into_iter()
            .map(|key| key.kanji)
            .merge_by(unknown, |known, unknown| known < unknown)
            .collect()
    }

    /// Inserts a group marker in front of each run of kanji with the same stroke count.
    ///
    /// Expects kanji sorted by this order. Kanji with unknown stroke counts get no marker and
    /// end the current run.
    pub fn annotate_with_group_markers(&self, sorted: &str) -> String {
        let mut annotated = String::with_capacity(sorted.len() * 2);
        let mut current = None;
        for kanji in sorted.chars() {
            let strokes = self.strokes.get(kanji);
            if let Some(marker) = strokes
                .filter(|&s| current != Some(s))
                .and_then(group_marker)
            {
                annotated.push(marker);
            }
            current = strokes;
            annotated.push(kanji);
        }
        annotated
    }
}

/// The group marker for `strokes`, ① for one stroke, saturating at the end of the block.
/// There is no marker for zero strokes.
pub fn group_marker(strokes: u32) -> Option<char> {
    let offset = strokes.checked_sub(1)?;
    char::from_u32(MARKER_START.saturating_add(offset).min(MARKER_END))
}

/// The stroke count encoded by a group marker.
pub fn marker_strokes(c: char) -> Option<u32> {
    let code_point = c as u32;
    (MARKER_START..=MARKER_END)
        .contains(&code_point)
        .then(|| code_point - MARKER_START + 1)
}

/// Whether `c` is a kanji rather than a group marker or the empty placeholder.
pub fn is_regular_kanji(c: char) -> bool {
    c != '\0' && marker_strokes(c).is_none()
}

/// The radicals appearing in any of `matches`.
pub fn radicals_available_for(table: &RadicalTable, matches: &str) -> BTreeSet<char> {
    matches
        .chars()
        .filter(|&k| is_regular_kanji(k))
        .flat_map(|k| table.kanji_parts(k).chars())
        .collect()
}
