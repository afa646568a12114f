use std::collections::HashMap;

/// Make repeated names unique by numbering each occurrence.
///
/// Every name that appears more than once gets `_<k>` appended, where `k`
/// counts its occurrences from 1 in input order. Names that appear once are
/// returned unchanged.
///
/// ```
/// use masstools::names::name_duplicated;
///
/// let names = ["apple", "orange", "apple", "banana", "orange"];
/// assert_eq!(
///     name_duplicated(&names),
///     ["apple_1", "orange_1", "apple_2", "banana", "orange_2"]
/// );
/// ```
pub fn name_duplicated<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut totals: HashMap<&str, usize> = HashMap::new();
    for name in names {
        *totals.entry(name.as_ref()).or_default() += 1;
    }

    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(totals.len());
    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            if totals[name] > 1 {
                let k = seen.entry(name).or_default();
                *k += 1;
                format!("{name}_{k}")
            } else {
                name.to_string()
            }
        })
        .collect()
}
