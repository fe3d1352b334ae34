use sighash_frontend::ModifierSet;
use std::cmp::Ordering;

/// Total order over optional collections of comparable strings.
///
/// `None` (not declared) sorts after any `Some` — "declared but empty" is
/// never conflated with "not declared". Among present collections the shorter
/// sorts first; equal lengths compare element-wise in iteration order.
pub fn compare_text_seqs(a: Option<&[String]>, b: Option<&[String]>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a
            .len()
            .cmp(&b.len())
            .then_with(|| a.iter().cmp(b.iter())),
    }
}

/// Order modifier sets by size, then by the sorted list of modifier names.
pub fn compare_modifier_sets(a: &ModifierSet, b: &ModifierSet) -> Ordering {
    let by_size = a.len().cmp(&b.len());
    if by_size != Ordering::Equal {
        return by_size;
    }
    let mut a_names: Vec<&str> = a.iter().map(|m| m.name()).collect();
    let mut b_names: Vec<&str> = b.iter().map(|m| m.name()).collect();
    a_names.sort_unstable();
    b_names.sort_unstable();
    a_names.cmp(&b_names)
}
