/// Map a display row to the item index it shows while `drag_index` hovers over `hover_index`.
///
/// The item array is left untouched during a drag; rows between the two slots read from
/// their neighbour so the list renders as if the move had already been applied.
pub fn display_to_item(row: usize, drag_index: usize, hover_index: usize) -> usize {
    if drag_index == hover_index {
        row
    } else if row == hover_index {
        drag_index
    } else if hover_index < row && row <= drag_index {
        row - 1
    } else if drag_index <= row && row < hover_index {
        row + 1
    } else {
        row
    }
}

/// Inverse of [`display_to_item`]: the row an item is shown on.
pub fn item_to_display(item: usize, drag_index: usize, hover_index: usize) -> usize {
    if drag_index == hover_index {
        item
    } else if item == drag_index {
        hover_index
    } else if hover_index <= item && item < drag_index {
        item + 1
    } else if drag_index < item && item <= hover_index {
        item - 1
    } else {
        item
    }
}

/// The default commit policy: remove the item at `from` and re-insert it at `to`.
///
/// Out-of-range indices leave the slice as it is.
pub fn apply_move<T>(items: &mut [T], from: usize, to: usize) {
    if from >= items.len() || to >= items.len() || from == to {
        return;
    }
    if from < to {
        items[from..=to].rotate_left(1);
    } else {
        items[to..=from].rotate_right(1);
    }
}
