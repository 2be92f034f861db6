//! Deterministic linear-time order statistics (median of medians).
//!
//! Purpose
//! - Split point sets by x and pick median slopes without sorting, so one
//!   bridge search stays linear in the number of candidates.
//!
//! Contract
//! - `select_nth_by_key(items, k, key)` returns an element whose key equals the
//!   key at index `k` of a stable sort of `items` by `key`.
//! - Medians use index `(len - 1) / 2` (lower median for even lengths).
//! - Inputs are never mutated; selection works on a scratch copy.
//! - Empty input is a caller bug and panics.
//!
//! Keys are compared with `f64::total_cmp`; callers reject NaN before this point.

use std::cmp::Ordering;

use nalgebra::Vector2;

use crate::cfg::SELECT_GROUP;

/// Element of rank `nth` under `key`, in worst-case linear time.
///
/// Panics if `items` is empty or `nth >= items.len()`.
pub fn select_nth_by_key<T, F>(items: &[T], nth: usize, key: F) -> T
where
    T: Copy,
    F: Fn(&T) -> f64,
{
    assert!(
        nth < items.len(),
        "select: rank {nth} out of range for {} items",
        items.len()
    );
    if items.len() == 1 {
        return items[0];
    }
    let mut scratch = items.to_vec();
    select_in(&mut scratch, nth, &key)
}

/// Lower median under `key`.
#[inline]
pub fn select_median_by_key<T, F>(items: &[T], key: F) -> T
where
    T: Copy,
    F: Fn(&T) -> f64,
{
    assert!(!items.is_empty(), "select: median of an empty sequence");
    select_nth_by_key(items, (items.len() - 1) / 2, key)
}

/// Point with the lower-median x coordinate.
#[inline]
pub fn median_by_x(points: &[Vector2<f64>]) -> Vector2<f64> {
    select_median_by_key(points, |p| p.x)
}

/// Lower median of raw scalars (slopes).
#[inline]
pub fn median_scalar(values: &[f64]) -> f64 {
    select_median_by_key(values, |v| *v)
}

/// Narrow `[lo, hi)` around rank `nth` until the pivot band contains it.
///
/// Invariant: `lo <= nth < hi`, so the active range is never empty.
fn select_in<T, F>(buf: &mut [T], nth: usize, key: &F) -> T
where
    T: Copy,
    F: Fn(&T) -> f64,
{
    let mut lo = 0usize;
    let mut hi = buf.len();
    loop {
        debug_assert!(lo <= nth && nth < hi);
        let range = &mut buf[lo..hi];
        let k = nth - lo;
        if range.len() <= SELECT_GROUP {
            sort_by_key(range, key);
            return range[k];
        }
        let pivot = median_of_medians(range, key);
        let (lt, gt) = partition3(range, pivot, key);
        match (k < lt, k < gt) {
            (true, _) => hi = lo + lt,
            (false, true) => return range[k],
            (false, false) => lo += gt,
        }
    }
}

/// Pivot key: median of the group-of-five medians, selected recursively.
fn median_of_medians<T, F>(range: &mut [T], key: &F) -> f64
where
    T: Copy,
    F: Fn(&T) -> f64,
{
    let mut medians: Vec<T> = range
        .chunks_mut(SELECT_GROUP)
        .map(|group| {
            sort_by_key(group, key);
            group[(group.len() - 1) / 2]
        })
        .collect();
    let mid = (medians.len() - 1) / 2;
    let pivot = select_in(&mut medians, mid, key);
    key(&pivot)
}

/// Three-way partition: `[0, lt)` below, `[lt, gt)` equal, `[gt, len)` above.
fn partition3<T, F>(range: &mut [T], pivot: f64, key: &F) -> (usize, usize)
where
    F: Fn(&T) -> f64,
{
    let mut lt = 0usize;
    let mut i = 0usize;
    let mut gt = range.len();
    while i < gt {
        match key(&range[i]).total_cmp(&pivot) {
            Ordering::Less => {
                range.swap(lt, i);
                lt += 1;
                i += 1;
            }
            Ordering::Greater => {
                gt -= 1;
                range.swap(i, gt);
            }
            Ordering::Equal => i += 1,
        }
    }
    (lt, gt)
}

#[inline]
fn sort_by_key<T, F>(group: &mut [T], key: &F)
where
    F: Fn(&T) -> f64,
{
    group.sort_by(|a, b| key(a).total_cmp(&key(b)));
}
