//! Row replication kernels over `(flat data, cumulative offsets)` pairs.
//!
//! `replicate_offsets[i] - replicate_offsets[i - 1]` is how many times row
//! `i` appears in the output, consecutively and in source order.

/// Re-appends each row's element span `times` times while accumulating the
/// output offsets.
pub(crate) fn replicate_arrays_impl<T: Copy>(
    src_data: &[T],
    src_offsets: &[u64],
    replicate_offsets: &[u64],
) -> (Vec<T>, Vec<u64>) {
    debug_assert_eq!(src_offsets.len(), replicate_offsets.len());
    let total_rows = replicate_offsets.last().copied().unwrap_or(0) as usize;
    let mut res_data: Vec<T> = Vec::with_capacity(src_data.len());
    let mut res_offsets: Vec<u64> = Vec::with_capacity(total_rows);

    let mut prev_rep = 0u64;
    let mut prev_data = 0u64;
    let mut current = 0u64;
    for (&end, &rep) in src_offsets.iter().zip(replicate_offsets) {
        let value_size = end - prev_data;
        for _ in prev_rep..rep {
            current += value_size;
            res_offsets.push(current);
            res_data.extend_from_slice(&src_data[prev_data as usize..end as usize]);
        }
        prev_rep = rep;
        prev_data = end;
    }
    (res_data, res_offsets)
}

/// String fast path: per source row, re-appends the row's character span and
/// re-derives the per-string offsets for every copy.
pub(crate) fn replicate_string_arrays(
    chars: &[u8],
    str_offsets: &[u64],
    arr_offsets: &[u64],
    replicate_offsets: &[u64],
) -> (Vec<u8>, Vec<u64>, Vec<u64>) {
    debug_assert_eq!(arr_offsets.len(), replicate_offsets.len());
    let total_rows = replicate_offsets.last().copied().unwrap_or(0) as usize;
    let mut res_chars: Vec<u8> = Vec::with_capacity(chars.len());
    let mut res_str_offsets: Vec<u64> = Vec::with_capacity(str_offsets.len());
    let mut res_arr_offsets: Vec<u64> = Vec::with_capacity(total_rows);

    let mut prev_rep = 0u64;
    let mut prev_src_offset = 0u64;
    let mut prev_src_string_offset = 0u64;
    let mut current_res_offset = 0u64;
    let mut current_res_string_offset = 0u64;

    for (&end, &rep) in arr_offsets.iter().zip(replicate_offsets) {
        // strings in the array, and the characters they cover
        let value_size = end - prev_src_offset;
        let sum_chars_size = if value_size > 0 {
            str_offsets[(prev_src_offset + value_size - 1) as usize] - prev_src_string_offset
        } else {
            0
        };

        for _ in prev_rep..rep {
            current_res_offset += value_size;
            res_arr_offsets.push(current_res_offset);

            let mut prev_local = prev_src_string_offset;
            for k in 0..value_size {
                let chars_size = str_offsets[(prev_src_offset + k) as usize] - prev_local;
                current_res_string_offset += chars_size;
                res_str_offsets.push(current_res_string_offset);
                prev_local += chars_size;
            }

            if sum_chars_size > 0 {
                res_chars.extend_from_slice(
                    &chars[prev_src_string_offset as usize
                        ..(prev_src_string_offset + sum_chars_size) as usize],
                );
            }
        }

        prev_rep = rep;
        prev_src_offset = end;
        prev_src_string_offset += sum_chars_size;
    }
    (res_chars, res_str_offsets, res_arr_offsets)
}
