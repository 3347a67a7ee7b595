//! "Did you mean" suggestions for undefined identifiers and types.

use strsim::jaro_winkler;

const SIMILARITY_THRESHOLD: f64 = 0.7;

/// Returns the closest candidate to `name` among `candidates`, if any
/// candidate clears [`SIMILARITY_THRESHOLD`].
pub fn find_similar<'a>(name: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    candidates
        .into_iter()
        .map(|candidate| (candidate, jaro_winkler(name, candidate)))
        .filter(|(_, score)| *score >= SIMILARITY_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_close_typo() {
        let candidates = ["length", "concat", "substr"];
        assert_eq!(find_similar("lenght", candidates), Some("length"));
    }

    #[test]
    fn returns_none_when_nothing_close() {
        let candidates = ["length", "concat", "substr"];
        assert_eq!(find_similar("zzz", candidates), None);
    }
}
