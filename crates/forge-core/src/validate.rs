use tracing::debug;

use crate::{block_hash, pow, Block};

/// Walk adjacent pairs and check the hash link, then the proof pair.
/// A chain of zero or one blocks is trivially valid.
pub fn is_valid_chain(chain: &[Block]) -> bool {
    for pair in chain.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        if curr.previous_hash != block_hash(prev) {
            debug!(index = curr.index, "hash link broken");
            return false;
        }
        if !pow::is_valid(prev.proof, curr.proof) {
            debug!(index = curr.index, "proof does not satisfy the puzzle");
            return false;
        }
    }
    true
}
