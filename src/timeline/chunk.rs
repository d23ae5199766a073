/// Split `items` into consecutive rows of `row_size`.
///
/// Only the last row may be shorter. `row_size` is validated by the caller;
/// a zero is treated as one so this stays total.
pub fn chunk_rows<T: Clone>(items: &[T], row_size: usize) -> Vec<Vec<T>> {
    items
        .chunks(row_size.max(1))
        .map(|row| row.to_vec())
        .collect()
}
