//! Near-miss suggestions for template names.

use strsim::levenshtein;

/// Suggests up to three names from `available` that are close to `name`.
///
/// Short names (three characters or fewer) allow an edit distance of 1,
/// longer names 2. Exact matches are not suggestions. Results are ordered by
/// distance, nearest first, then alphabetically.
///
/// ```
/// use transclude::suggest_names;
///
/// let found = ["Pp-move", "Pp-vandalism", "Citation_needed"];
/// assert_eq!(suggest_names("Pp-mov", found), vec!["Pp-move"]);
/// ```
pub fn suggest_names<'a>(name: &str, available: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let max_distance = if name.chars().count() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, &str)> = available
        .into_iter()
        .filter_map(|candidate| {
            let dist = levenshtein(name, candidate);
            (dist > 0 && dist <= max_distance).then_some((dist, candidate))
        })
        .collect();

    suggestions.sort_unstable();
    suggestions.dedup();
    suggestions
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}
