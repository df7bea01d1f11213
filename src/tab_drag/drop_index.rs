use crate::tab::TabRect;

/// Insertion slot for a pointer at `x`: before the first button whose center
/// lies right of it, else after the last one.
pub fn drop_index(rects: &[TabRect], x: f32) -> usize {
    rects
        .iter()
        .position(|rect| x < rect.center())
        .unwrap_or(rects.len())
}

/// Dropping a tab at its own slot or the one right after it changes nothing
pub fn is_noop_slot(source_index: Option<usize>, slot: usize) -> bool {
    source_index.is_some_and(|src| slot == src || slot == src + 1)
}
