use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;

use crate::{int_array, nullable_array, string_array};

fn row_hash(col: &quiver_column::ArrayColumn, row: usize) -> u64 {
    let mut state = DefaultHasher::new();
    col.update_hash_with_value(row, &mut state);
    state.finish()
}

#[test]
fn running_hash_is_order_sensitive() {
    let col = int_array(&[1, 2, 2, 1], &[2, 4]);
    assert_ne!(row_hash(&col, 0), row_hash(&col, 1));

    let equal = int_array(&[1, 2, 1, 2], &[2, 4]);
    assert_eq!(row_hash(&equal, 0), row_hash(&equal, 1));
}

#[test]
fn string_and_nullable_rows_feed_the_running_hash() {
    let text = string_array(&["ab", "c"], &[1, 2]);
    assert_ne!(row_hash(&text, 0), row_hash(&text, 1));

    // a null element hashes differently from the value 0
    let nullable = nullable_array(&[0, 0], &[1, 0], &[1, 2]);
    assert_ne!(row_hash(&nullable, 0), row_hash(&nullable, 1));
}

#[test]
fn empty_rows_mix_in_a_length_marker() {
    // rows [[], [1]]
    let col = int_array(&[1], &[0, 1]);
    let mut hash = 0u64;
    col.update_xxhash_with_value(0, 1, &mut hash, None);
    assert_ne!(hash, 0, "an empty row must still disturb the hash state");

    let mut crc = 0u32;
    col.update_crc_with_value(0, 1, &mut crc, None);
    assert_ne!(crc, 0);
}

#[test]
fn ranged_hash_chains_across_rows() {
    let col = int_array(&[1, 2, 3], &[2, 2, 3]);
    let mut whole = 0u64;
    col.update_xxhash_with_value(0, 3, &mut whole, None);

    let mut chained = 0u64;
    for row in 0..3 {
        col.update_xxhash_with_value(row, row + 1, &mut chained, None);
    }
    assert_eq!(whole, chained);
}

#[test]
fn excluded_rows_leave_the_hash_untouched() {
    let col = int_array(&[1, 2, 3], &[2, 2, 3]);
    let all_excluded = [1u8, 1, 1];
    let mut hash = 7u64;
    col.update_xxhash_with_value(0, 3, &mut hash, Some(&all_excluded));
    assert_eq!(hash, 7);

    let mut crc = 9u32;
    col.update_crc_with_value(0, 3, &mut crc, Some(&all_excluded));
    assert_eq!(crc, 9);

    // skipping row 0 must differ from hashing everything
    let skip_first = [1u8, 0, 0];
    let mut partial = 0u64;
    col.update_xxhash_with_value(0, 3, &mut partial, Some(&skip_first));
    let mut full = 0u64;
    col.update_xxhash_with_value(0, 3, &mut full, None);
    assert_ne!(partial, full);
}

#[test]
fn per_row_hash_slots_match_the_ranged_form() {
    let col = int_array(&[1, 2, 3], &[2, 2, 3]);
    let mut slots = vec![0u64; col.len()];
    col.update_hashes_with_value(&mut slots, None);
    for row in 0..col.len() {
        let mut expected = 0u64;
        col.update_xxhash_with_value(row, row + 1, &mut expected, None);
        assert_eq!(slots[row], expected);
    }

    let nulls = [0u8, 1, 0];
    let mut masked = vec![0u64; col.len()];
    col.update_hashes_with_value(&mut masked, Some(&nulls));
    assert_eq!(masked[1], 0);
    assert_eq!(masked[0], slots[0]);

    let mut crcs = vec![0u32; col.len()];
    col.update_crcs_with_value(&mut crcs, None);
    for row in 0..col.len() {
        let mut expected = 0u32;
        col.update_crc_with_value(row, row + 1, &mut expected, None);
        assert_eq!(crcs[row], expected);
    }
}

#[test]
fn equal_rows_hash_equally_across_columns() {
    let a = int_array(&[4, 5], &[2]);
    let b = int_array(&[9, 4, 5], &[1, 3]);
    let mut ha = 0u64;
    a.update_xxhash_with_value(0, 1, &mut ha, None);
    let mut hb = 0u64;
    b.update_xxhash_with_value(1, 2, &mut hb, None);
    assert_eq!(ha, hb);
}
