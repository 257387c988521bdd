/// Number of suggestions a search box shows.
pub const SUGGESTION_LIMIT: usize = 8;

/// Filter `candidates` to those containing `query` (case-insensitive), order them by
/// edit distance to the query, and keep the first `limit`.
///
/// Equal distances keep the relative order of `candidates`. An empty query matches
/// everything.
pub fn rank<S: AsRef<str>>(query: &str, candidates: &[S], limit: usize) -> Vec<String> {
    let query = query.trim().to_lowercase();

    let mut matches: Vec<(usize, &str)> = candidates
        .iter()
        .filter_map(|candidate| {
            let candidate = candidate.as_ref();
            let normalized = candidate.to_lowercase();
            normalized
                .contains(&query)
                .then(|| (levenshtein(&normalized, &query), candidate))
        })
        .collect();

    // `sort_by_key` is a stable sort.
    matches.sort_by_key(|(distance, _)| *distance);

    matches
        .into_iter()
        .take(limit)
        .map(|(_, candidate)| candidate.to_owned())
        .collect()
}

/// Levenshtein distance over Unicode scalar values.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    if b.is_empty() {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != *cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("noaa 19", "noaa 18"), 1);
        assert_eq!(levenshtein("метеор", "метео"), 1);
    }

    #[test]
    fn exact_match_ranks_first() {
        let candidates = ["ISS (ZARYA)", "ISS DEB", "NOAA 19"];
        let ranked = rank("ISS (ZARYA)", &candidates, SUGGESTION_LIMIT);
        assert_eq!(ranked.first().map(String::as_str), Some("ISS (ZARYA)"));
        assert_eq!(levenshtein("iss (zarya)", "iss (zarya)"), 0);
    }

    #[test]
    fn filters_by_case_insensitive_substring() {
        let candidates = ["ISS (ZARYA)", "NOAA 19"];
        assert!(rank("zz", &candidates, SUGGESTION_LIMIT).is_empty());
        assert_eq!(rank("  noaa ", &candidates, SUGGESTION_LIMIT), vec!["NOAA 19"]);
    }

    #[test]
    fn orders_by_edit_distance() {
        let candidates = ["METEOR-M2 3", "NOAA 18", "NOAA 15 DEB", "NOAA"];
        let ranked = rank("noaa", &candidates, SUGGESTION_LIMIT);
        assert_eq!(ranked, vec!["NOAA", "NOAA 18", "NOAA 15 DEB"]);
    }

    #[test]
    fn ties_keep_candidate_order() {
        let candidates = ["NOAA 19", "NOAA 15", "NOAA 18", "NOAA 17"];
        let ranked = rank("noaa", &candidates, SUGGESTION_LIMIT);
        assert_eq!(ranked, vec!["NOAA 19", "NOAA 15", "NOAA 18", "NOAA 17"]);
    }

    #[test]
    fn truncates_to_limit() {
        let candidates: Vec<String> = (0..20).map(|i| format!("STARLINK-{i}")).collect();
        assert_eq!(rank("starlink", &candidates, 8).len(), 8);
        assert_eq!(rank("", &candidates, 8).len(), 8);
    }

    #[test]
    fn empty_candidates_give_empty_result() {
        let candidates: [&str; 0] = [];
        assert!(rank("iss", &candidates, SUGGESTION_LIMIT).is_empty());
    }

    #[test]
    fn reranking_is_stable() {
        let candidates = ["COSMOS 2251 DEB", "COSMOS 1408", "COSMOS 2251", "COSMOS"];
        let once = rank("cosmos", &candidates, SUGGESTION_LIMIT);
        let twice = rank("cosmos", &once, SUGGESTION_LIMIT);
        assert_eq!(once, twice);
    }
}
