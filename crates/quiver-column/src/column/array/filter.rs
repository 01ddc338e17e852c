//! Row-mask filtering kernels over `(flat data, cumulative offsets)` pairs.
//!
//! The kernels are pure functions over slices so the rebasing arithmetic is
//! testable without the surrounding column machinery. Callers have already
//! validated that `mask` has one entry per row.

use crate::offsets::Offsets;

/// Keeps the element spans of masked rows and rebuilds the cumulative
/// offsets of the kept rows. With no size hint the output reserves the full
/// source size, the common case for selective pipelines being cheap enough.
pub(crate) fn filter_arrays_impl<T: Copy>(
    src_data: &[T],
    src_offsets: &[u64],
    mask: &[bool],
    size_hint: Option<usize>,
) -> (Vec<T>, Vec<u64>) {
    debug_assert_eq!(src_offsets.len(), mask.len());
    let mut res_data: Vec<T> =
        Vec::with_capacity(if size_hint.is_none() { src_data.len() } else { 0 });
    let mut res_offsets: Vec<u64> = Vec::with_capacity(size_hint.unwrap_or(src_offsets.len()));

    let mut current = 0u64;
    let mut prev = 0u64;
    for (&end, &keep) in src_offsets.iter().zip(mask) {
        if keep {
            res_data.extend_from_slice(&src_data[prev as usize..end as usize]);
            current += end - prev;
            res_offsets.push(current);
        }
        prev = end;
    }
    (res_data, res_offsets)
}

/// Like [`filter_arrays_impl`] but producing only the filtered elements;
/// used for the null-map half of a nullable decomposition, which shares the
/// offsets produced by the value half.
pub(crate) fn filter_arrays_impl_only_data<T: Copy>(
    src_data: &[T],
    src_offsets: &[u64],
    mask: &[bool],
    size_hint: Option<usize>,
) -> Vec<T> {
    debug_assert_eq!(src_offsets.len(), mask.len());
    let mut res_data: Vec<T> =
        Vec::with_capacity(if size_hint.is_none() { src_data.len() } else { 0 });

    let mut prev = 0u64;
    for (&end, &keep) in src_offsets.iter().zip(mask) {
        if keep {
            res_data.extend_from_slice(&src_data[prev as usize..end as usize]);
        }
        prev = end;
    }
    res_data
}

/// In-place form: compacts kept element spans to the front of `data` and
/// replaces `offsets`. Returns the kept row count.
pub(crate) fn filter_arrays_in_place<T: Copy>(
    data: &mut Vec<T>,
    offsets: &mut Offsets,
    mask: &[bool],
) -> usize {
    debug_assert_eq!(offsets.len(), mask.len());
    let mut res_offsets: Vec<u64> = Vec::with_capacity(offsets.len());

    let mut write = 0usize;
    let mut current = 0u64;
    let mut prev = 0usize;
    for (i, &keep) in mask.iter().enumerate() {
        let end = offsets.as_slice()[i] as usize;
        if keep {
            data.copy_within(prev..end, write);
            write += end - prev;
            current += (end - prev) as u64;
            res_offsets.push(current);
        }
        prev = end;
    }
    data.truncate(write);
    *offsets = Offsets::new_unchecked(res_offsets);
    offsets.len()
}

/// String fast path: for each kept row, copies its contiguous character span
/// and appends the string-internal offsets shifted by the distance between
/// the source and destination character cursors.
pub(crate) fn filter_string_arrays(
    chars: &[u8],
    str_offsets: &[u64],
    arr_offsets: &[u64],
    mask: &[bool],
    size_hint: Option<usize>,
) -> (Vec<u8>, Vec<u64>, Vec<u64>) {
    debug_assert_eq!(arr_offsets.len(), mask.len());
    let unknown = size_hint.is_none();
    let mut res_chars: Vec<u8> = Vec::with_capacity(if unknown { chars.len() } else { 0 });
    let mut res_str_offsets: Vec<u64> =
        Vec::with_capacity(if unknown { str_offsets.len() } else { 0 });
    let mut res_arr_offsets: Vec<u64> = Vec::with_capacity(size_hint.unwrap_or(arr_offsets.len()));

    let mut prev_src_offset = 0u64;
    let mut prev_src_string_offset = 0u64;
    let mut prev_res_offset = 0u64;
    let mut prev_res_string_offset = 0u64;

    for (&end, &keep) in arr_offsets.iter().zip(mask) {
        let array_size = end - prev_src_offset;
        if keep {
            if array_size > 0 {
                let chars_to_copy = str_offsets[(prev_src_offset + array_size - 1) as usize]
                    - prev_src_string_offset;
                res_chars.extend_from_slice(
                    &chars[prev_src_string_offset as usize
                        ..(prev_src_string_offset + chars_to_copy) as usize],
                );
                for j in 0..array_size {
                    res_str_offsets.push(
                        str_offsets[(prev_src_offset + j) as usize] - prev_src_string_offset
                            + prev_res_string_offset,
                    );
                }
                prev_res_string_offset += chars_to_copy;
            }
            prev_res_offset += array_size;
            res_arr_offsets.push(prev_res_offset);
        }
        if array_size > 0 {
            prev_src_offset += array_size;
            prev_src_string_offset = str_offsets[(prev_src_offset - 1) as usize];
        }
    }
    (res_chars, res_str_offsets, res_arr_offsets)
}

/// In-place form of [`filter_string_arrays`]; compacts the character buffer
/// and replaces both offset indexes. Returns the kept row count.
pub(crate) fn filter_string_arrays_in_place(
    chars: &mut Vec<u8>,
    str_offsets: &mut Offsets,
    arr_offsets: &mut Offsets,
    mask: &[bool],
) -> usize {
    debug_assert_eq!(arr_offsets.len(), mask.len());
    let mut res_str_offsets: Vec<u64> = Vec::with_capacity(str_offsets.len());
    let mut res_arr_offsets: Vec<u64> = Vec::with_capacity(arr_offsets.len());

    let mut char_write = 0usize;
    let mut prev_src_offset = 0u64;
    let mut prev_src_string_offset = 0u64;
    let mut prev_res_offset = 0u64;
    let mut prev_res_string_offset = 0u64;

    for (i, &keep) in mask.iter().enumerate() {
        let array_size = arr_offsets.as_slice()[i] - prev_src_offset;
        if keep {
            if array_size > 0 {
                let chars_to_copy = str_offsets.as_slice()
                    [(prev_src_offset + array_size - 1) as usize]
                    - prev_src_string_offset;
                chars.copy_within(
                    prev_src_string_offset as usize
                        ..(prev_src_string_offset + chars_to_copy) as usize,
                    char_write,
                );
                char_write += chars_to_copy as usize;
                for j in 0..array_size {
                    res_str_offsets.push(
                        str_offsets.as_slice()[(prev_src_offset + j) as usize]
                            - prev_src_string_offset
                            + prev_res_string_offset,
                    );
                }
                prev_res_string_offset += chars_to_copy;
            }
            prev_res_offset += array_size;
            res_arr_offsets.push(prev_res_offset);
        }
        if array_size > 0 {
            prev_src_offset += array_size;
            prev_src_string_offset = str_offsets.as_slice()[(prev_src_offset - 1) as usize];
        }
    }
    chars.truncate(char_write);
    *str_offsets = Offsets::new_unchecked(res_str_offsets);
    *arr_offsets = Offsets::new_unchecked(res_arr_offsets);
    arr_offsets.len()
}
