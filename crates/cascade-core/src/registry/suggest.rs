//! "Did you mean" suggestions for resolver names

use crate::config::SuggestionSettings;

/// Registered names close to `target`, nearest first
///
/// Comparison is case-insensitive Levenshtein distance; ties are broken by
/// name so the output is deterministic.
pub fn suggest_names<'a, I>(target: &str, candidates: I, settings: &SuggestionSettings) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    if settings.limit == 0 {
        return Vec::new();
    }

    let target = target.to_lowercase();
    let mut scored: Vec<(usize, &str)> = candidates
        .into_iter()
        .map(|name| (strsim::levenshtein(&target, &name.to_lowercase()), name))
        .filter(|(distance, _)| *distance <= settings.max_distance)
        .collect();

    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(settings.limit)
        .map(|(_, name)| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(max_distance: usize, limit: usize) -> SuggestionSettings {
        SuggestionSettings { max_distance, limit }
    }

    #[test]
    fn test_nearest_first() {
        let names = ["features", "feature_flags", "tenant", "featured"];
        let out = suggest_names("feature", names, &settings(3, 3));
        assert_eq!(out, vec!["featured", "features"]);
    }

    #[test]
    fn test_case_insensitive() {
        let out = suggest_names("TENANT", ["tenant"], &settings(0, 3));
        assert_eq!(out, vec!["tenant"]);
    }

    #[test]
    fn test_limit_and_threshold() {
        let names = ["ab", "ac", "ad", "zzzz"];
        assert_eq!(suggest_names("aa", names, &settings(1, 2)), vec!["ab", "ac"]);
        assert!(suggest_names("aa", names, &settings(1, 0)).is_empty());
        assert!(suggest_names("completely-different", names, &settings(3, 3)).is_empty());
    }
}
