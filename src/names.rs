//! Name change significance
//!
//! Road names arrive in the profile's encoding `"{name} ({ref})"`, for
//! example `"Rue de la Loi (N3)"`. Splitting on the parenthesis conflates
//! names and references that contain one themselves; that imprecision is
//! accepted.

/// Split `"{name} ({ref})"` into name and reference.
///
/// The character right before `(` is treated as the separating space and
/// dropped. Without a closing `)` the reference runs to the end.
pub fn split_name_and_ref(name: &str) -> (&str, &str) {
    let Some(ref_begin) = name.find('(') else {
        return (name, "");
    };

    let head = &name[..ref_begin];
    let base = match head.char_indices().next_back() {
        Some((last, _)) => &head[..last],
        None => "",
    };

    let after_paren = ref_begin + 1;
    let reference = match name.find(')') {
        Some(ref_end) if ref_end >= after_paren => &name[after_paren..ref_end],
        _ => &name[after_paren..],
    };

    (base, reference)
}

/// Whether going from road `from` to road `to` changes the name enough to
/// be announced.
pub fn requires_name_announced(from: &str, to: &str) -> bool {
    let (from_name, from_ref) = split_name_and_ref(from);
    let (to_name, to_ref) = split_name_and_ref(to);

    let names_are_empty = from_name.is_empty() && to_name.is_empty();
    let names_are_equal = from_name == to_name;
    let name_is_removed = !from_name.is_empty() && to_name.is_empty();

    let refs_are_empty = from_ref.is_empty() && to_ref.is_empty();
    let ref_is_contained = from_ref.is_empty()
        || to_ref.is_empty()
        || from_ref.contains(to_ref)
        || to_ref.contains(from_ref);
    let ref_is_removed = !from_ref.is_empty() && to_ref.is_empty();

    let obvious_change = (names_are_empty && refs_are_empty)
        || (names_are_equal && ref_is_contained)
        || (names_are_equal && refs_are_empty)
        || name_is_removed
        || ref_is_removed;

    !obvious_change
}
