//! Contiguous block partitioning of an index range across workers.
//!
//! The partition is computed once per run and reused by every phase:
//! assignment, reduction, and each seeding round all cover `[0, n)` with the
//! same `threads` blocks.

use std::ops::Range;

/// Per-worker block size: `ceil(num_points / threads)`.
///
/// Slice-chunking by this size yields exactly the non-empty blocks of
/// [`blocks`], which is how the assignment phase hands out disjoint
/// mutable slices of the shared assignment array.
pub(crate) fn block_size(num_points: usize, threads: usize) -> usize {
    debug_assert!(threads >= 1);
    num_points.div_ceil(threads)
}

/// Split `[0, num_points)` into `threads` contiguous, disjoint blocks.
///
/// Block size is `ceil(num_points / threads)`; the last block absorbs any
/// remainder, and trailing blocks may be empty when there are fewer points
/// than workers. The union of the returned ranges is exactly `[0, num_points)`.
pub(crate) fn blocks(num_points: usize, threads: usize) -> Vec<Range<usize>> {
    let block = block_size(num_points, threads);
    (0..threads)
        .map(|i| {
            let start = (i * block).min(num_points);
            let end = ((i + 1) * block).min(num_points);
            start..end
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_even_split() {
        assert_eq!(blocks(8, 4), vec![0..2, 2..4, 4..6, 6..8]);
    }

    #[test]
    fn test_last_block_absorbs_remainder() {
        assert_eq!(blocks(10, 4), vec![0..3, 3..6, 6..9, 9..10]);
    }

    #[test]
    fn test_more_threads_than_points() {
        let blocks = blocks(3, 5);
        assert_eq!(blocks.len(), 5);
        assert_eq!(blocks[..3], [0..1, 1..2, 2..3]);
        assert!(blocks[3..].iter().all(|r| r.is_empty()));
    }

    #[test]
    fn test_single_thread_takes_everything() {
        assert_eq!(blocks(7, 1), vec![0..7]);
    }

    proptest! {
        #[test]
        fn blocks_cover_every_index_exactly_once(
            num_points in 0usize..2000,
            threads in 1usize..64,
        ) {
            let blocks = blocks(num_points, threads);
            prop_assert_eq!(blocks.len(), threads);

            // Contiguous and disjoint: each block starts where the previous ended.
            let mut next = 0;
            for block in &blocks {
                prop_assert_eq!(block.start, next);
                prop_assert!(block.end >= block.start);
                next = block.end;
            }
            prop_assert_eq!(next, num_points);
        }

        #[test]
        fn chunking_by_block_size_matches_nonempty_blocks(
            num_points in 1usize..2000,
            threads in 1usize..64,
        ) {
            let data = vec![0u8; num_points];
            let chunk_lens: Vec<usize> =
                data.chunks(block_size(num_points, threads)).map(<[u8]>::len).collect();
            let block_lens: Vec<usize> = blocks(num_points, threads)
                .into_iter()
                .map(|r| r.len())
                .filter(|&len| len > 0)
                .collect();
            prop_assert_eq!(chunk_lens, block_lens);
        }
    }
}
