//! Vocabulary matcher: resolves free-text tokens onto controlled vocabularies.
//!
//! Match order is exact -> synonym table -> fuzzy, and exact always wins so
//! callers that check exact matches themselves stay consistent with this
//! module and cannot produce duplicate entries.

use strsim::normalized_levenshtein;

use crate::filters::data::{INDUSTRY_DATA, REGION_DATA, SYNONYMS};

/// Stricter threshold for regions; a wrong geographic match is costly.
pub const REGION_MATCH_THRESHOLD: f64 = 0.3;
/// Industries tolerate a looser match.
pub const INDUSTRY_MATCH_THRESHOLD: f64 = 0.4;

/// A region display name with its numeric search-API id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionEntry {
    pub name: &'static str,
    pub id: &'static str,
}

/// Controlled vocabularies, built once at startup and shared by reference.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    industries: Vec<&'static str>,
    regions: Vec<RegionEntry>,
}

impl Vocabulary {
    pub fn builtin() -> Self {
        Self {
            industries: INDUSTRY_DATA.to_vec(),
            regions: REGION_DATA
                .iter()
                .map(|&(name, id)| RegionEntry { name, id })
                .collect(),
        }
    }

    pub fn industries(&self) -> &[&'static str] {
        &self.industries
    }

    pub fn region_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.regions.iter().map(|r| r.name)
    }

    /// Resolves a free-text industry token to a canonical industry name.
    pub fn match_industry(&self, token: &str) -> Option<&'static str> {
        find_match(token, &self.industries, INDUSTRY_MATCH_THRESHOLD)
    }

    /// Resolves a free-text region token to a canonical region with its id.
    pub fn match_region(&self, token: &str) -> Option<RegionEntry> {
        let names: Vec<&'static str> = self.regions.iter().map(|r| r.name).collect();
        let name = find_match(token, &names, REGION_MATCH_THRESHOLD)?;
        self.regions.iter().copied().find(|r| r.name == name)
    }

}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Resolves `token` to the closest entry in `vocabulary`.
///
/// `threshold` is a normalized edit distance in `0..=1`; lower is stricter.
/// Returns `None` for empty input, an empty vocabulary, or no candidate
/// within the threshold; callers log and drop the value, never substitute.
pub fn find_match<'a>(token: &str, vocabulary: &[&'a str], threshold: f64) -> Option<&'a str> {
    let token = token.trim();
    if token.is_empty() || vocabulary.is_empty() {
        return None;
    }
    let lowered = token.to_lowercase();

    // Exact, case-insensitive.
    if let Some(&hit) = vocabulary.iter().find(|v| v.eq_ignore_ascii_case(token)) {
        return Some(hit);
    }

    // Synonym table, then confirm the canonical value exists in this vocabulary.
    if let Some(&(_, canonical)) = SYNONYMS.iter().find(|&&(alias, _)| alias == lowered) {
        if let Some(&hit) = vocabulary
            .iter()
            .find(|v| v.eq_ignore_ascii_case(canonical))
        {
            return Some(hit);
        }
    }

    // Fuzzy fallback: best normalized edit distance within the threshold.
    let mut best: Option<(&'a str, f64)> = None;
    for &candidate in vocabulary {
        let distance = 1.0 - normalized_levenshtein(&lowered, &candidate.to_lowercase());
        if distance <= threshold && best.map_or(true, |(_, d)| distance < d) {
            best = Some((candidate, distance));
        }
    }
    best.map(|(hit, _)| hit)
}
