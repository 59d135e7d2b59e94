//! Sorting algorithms over a contiguous record sequence.
//!
//! The linked backend has its own list-native versions of both algorithms in
//! `linked_store`; they report their work through the same [`SortReport`].

use skyseat_core::SortReport;
use skyseat_shared::PassengerRecord;
use std::cmp::Ordering;

pub fn by_name(a: &PassengerRecord, b: &PassengerRecord) -> Ordering {
    a.name.cmp(&b.name)
}

pub fn by_id(a: &PassengerRecord, b: &PassengerRecord) -> Ordering {
    a.id.cmp(&b.id)
}

/// Adjacent-swap bubble sort. Stops after the first pass without swaps.
pub fn bubble_sort_by<T, F>(items: &mut [T], mut compare: F) -> SortReport
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut report = SortReport::default();
    let mut unsorted = items.len();

    while unsorted > 1 {
        report.passes += 1;
        let mut swapped = false;

        for j in 0..unsorted - 1 {
            report.comparisons += 1;
            if compare(&items[j], &items[j + 1]) == Ordering::Greater {
                items.swap(j, j + 1);
                report.swaps += 1;
                swapped = true;
            }
        }

        if !swapped {
            break;
        }
        unsorted -= 1;
    }

    report
}

/// Top-down merge sort. Each level splits the buffer into two owned halves
/// and merges them back, so equal keys keep their relative order.
pub fn merge_sort_by<T, F>(items: Vec<T>, compare: &mut F, report: &mut SortReport) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let mut left = items;
    let right = left.split_off(left.len() / 2);
    report.passes += 1;

    let left = merge_sort_by(left, compare, report);
    let right = merge_sort_by(right, compare, report);
    merge(left, right, compare, report)
}

fn merge<T, F>(left: Vec<T>, right: Vec<T>, compare: &mut F, report: &mut SortReport) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => {
                report.comparisons += 1;
                compare(l, r) != Ordering::Greater
            }
            _ => break,
        };
        let next = if take_left { left.next() } else { right.next() };
        merged.extend(next);
    }

    merged.extend(left);
    merged.extend(right);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bubble_sort_counts_swaps() {
        let mut values = vec![3, 1, 2];
        let report = bubble_sort_by(&mut values, |a, b| a.cmp(b));
        assert_eq!(values, vec![1, 2, 3]);
        assert_eq!(report.swaps, 2);

        let again = bubble_sort_by(&mut values, |a, b| a.cmp(b));
        assert_eq!(again.swaps, 0);
        assert_eq!(again.passes, 1);
    }

    #[test]
    fn test_bubble_sort_trivial_inputs() {
        let mut empty: Vec<i32> = vec![];
        assert_eq!(bubble_sort_by(&mut empty, |a, b| a.cmp(b)), SortReport::default());

        let mut single = vec![7];
        assert_eq!(bubble_sort_by(&mut single, |a, b| a.cmp(b)).comparisons, 0);
    }

    #[test]
    fn test_merge_sort_is_stable() {
        let items = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd'), (0, 'e')];
        let mut report = SortReport::default();
        let mut by_key = |a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0);
        let sorted = merge_sort_by(items, &mut by_key, &mut report);

        assert_eq!(sorted, vec![(0, 'e'), (1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
        assert!(report.comparisons > 0);
    }

    #[test]
    fn test_merge_sort_handles_odd_lengths() {
        let items: Vec<u32> = (0..17).rev().collect();
        let mut report = SortReport::default();
        let sorted = merge_sort_by(items, &mut |a: &u32, b: &u32| a.cmp(b), &mut report);
        assert_eq!(sorted, (0..17).collect::<Vec<_>>());
    }
}
