//! Catch, release and rename rules
//!
//! Every roll comes in two flavours: a `*_roll` form taking any [`Rng`] so
//! callers can seed it, and an `attempt_*` form drawing from the thread RNG.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::DomainError;
use crate::models::{CatalogDetail, NamedResource};

/// A catch succeeds when a draw from `[0, 100]` is at or below this
pub const CATCH_THRESHOLD: f64 = 50.0;

pub const RENAME_DELIMITER: &str = " - ";

/// Number of move slots the detail view fills
pub const FEATURED_MOVE_SLOTS: usize = 4;

pub fn catch_roll<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.gen_range(0.0..=100.0) <= CATCH_THRESHOLD
}

pub fn attempt_catch() -> bool {
    catch_roll(&mut rand::thread_rng())
}

/// Succeeds when a draw from `1..=100` is prime
pub fn release_roll<R: Rng + ?Sized>(rng: &mut R) -> bool {
    is_prime(rng.gen_range(1..=100))
}

pub fn attempt_release() -> bool {
    release_roll(&mut rand::thread_rng())
}

/// Trial division up to the square root
pub fn is_prime(n: u32) -> bool {
    if n < 2 {
        return false;
    }
    (2..)
        .take_while(|d| *d <= n / *d)
        .all(|d| n % d != 0)
}

/// `F(index)` with `F(0) = 0` and `F(1) = 1`, or `None` past `u64`
pub fn fibonacci(index: usize) -> Option<u64> {
    let (mut current, mut next) = (0u64, Some(1u64));
    for _ in 0..index {
        let advanced = next?;
        next = current.checked_add(advanced);
        current = advanced;
    }
    Some(current)
}

/// Append the next Fibonacci suffix to a nickname
///
/// The new segment's index is the current number of `" - "` separated
/// segments, so `"Sparky"` becomes `"Sparky - 1"` and `"Sparky - 1"` becomes
/// `"Sparky - 1 - 1"`, then `- 2`, `- 3`, `- 5` and so on.
pub fn next_rename_suffix(nickname: &str) -> Result<String, DomainError> {
    let index = nickname.split(RENAME_DELIMITER).count();
    let suffix = fibonacci(index).ok_or(DomainError::RenameOverflow { index })?;
    Ok(format!("{nickname}{RENAME_DELIMITER}{suffix}"))
}

/// Pick `count` moves at random, with replacement
pub fn featured_moves<'a, R: Rng + ?Sized>(
    detail: &'a CatalogDetail,
    count: usize,
    rng: &mut R,
) -> Vec<&'a NamedResource> {
    (0..count).filter_map(|_| detail.moves.choose(&mut *rng)).collect()
}
