use sha2::{Digest, Sha256};

use crate::constants::POW_DIFFICULTY_BITS;

/// Find the smallest candidate such that `is_valid(reference, candidate)`
/// holds, by trying candidates from zero upward. Expected ~65536 attempts;
/// unbounded in principle.
pub fn solve(reference: u64) -> u64 {
    let mut candidate = 0u64;
    while !is_valid(reference, candidate) {
        candidate += 1;
    }
    candidate
}

/// The difficulty predicate: hash the decimal concatenation of `reference`
/// and `candidate` and require the digest to start with four zero hex
/// characters.
pub fn is_valid(reference: u64, candidate: u64) -> bool {
    let guess = format!("{reference}{candidate}");
    let digest = Sha256::digest(guess.as_bytes());
    count_leading_zero_bits(&digest) >= POW_DIFFICULTY_BITS
}

pub fn count_leading_zero_bits(digest: &[u8]) -> u32 {
    let mut total = 0u32;
    for b in digest {
        if *b == 0 {
            total += 8;
        } else {
            total += b.leading_zeros();
            break;
        }
    }
    total
}
