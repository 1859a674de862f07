/// Lengths of the leading and trailing runs where ground truth and reference
/// agree position by position on their folded text.
///
/// The trailing run is counted from the end of both sequences so a single
/// insertion or deletion in the middle does not disable the shortcut for the
/// tail. The two runs never overlap on either side.
pub(crate) fn direct_runs(ground_truth: &[String], reference: &[String]) -> (usize, usize) {
    let same = |a: &String, b: &String| !a.is_empty() && a == b;

    let leading = ground_truth
        .iter()
        .zip(reference)
        .take_while(|(g, r)| same(g, r))
        .count();

    let max_trailing = ground_truth.len().min(reference.len()) - leading;
    let trailing = ground_truth
        .iter()
        .rev()
        .zip(reference.iter().rev())
        .take(max_trailing)
        .take_while(|(g, r)| same(g, r))
        .count();

    (leading, trailing)
}

/// Comparison keys for the direct pass: the folded word, or the trimmed raw
/// text when folding leaves nothing (dashes, bullets, lone punctuation).
pub(crate) fn direct_keys<S: AsRef<str>>(raw: &[S], folded: &[String]) -> Vec<String> {
    raw.iter()
        .zip(folded)
        .map(|(raw, folded)| {
            if folded.is_empty() {
                raw.as_ref().trim().to_string()
            } else {
                folded.clone()
            }
        })
        .collect()
}
