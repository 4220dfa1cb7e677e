use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ledger::Ledger;
use crate::validate::is_valid_chain;
use crate::Block;

/// A peer's view of its chain: the blocks plus the length it reports.
/// This is the wire shape of a chain fetch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub chain: Vec<Block>,
    pub length: u64,
}

/// Adopt the longest valid peer chain, if any is strictly longer than ours.
///
/// Snapshots compete on the length they report, starting from the local
/// chain length; a snapshot only becomes the candidate if it also passes
/// validation. A snapshot with no blocks is never adopted, whatever length
/// it reports, so the local chain never drops below its genesis block.
/// Equal-length chains never win, so among peers reporting the same maximum
/// the first in iteration order is kept. Returns whether the local chain was
/// replaced.
pub fn resolve_conflicts<I>(ledger: &mut Ledger, peer_chains: I) -> bool
where
    I: IntoIterator<Item = ChainSnapshot>,
{
    let mut max_length = ledger.len() as u64;
    let mut candidate: Option<Vec<Block>> = None;

    for snapshot in peer_chains {
        if snapshot.length <= max_length {
            debug!(reported = snapshot.length, max_length, "peer chain is not longer");
            continue;
        }
        if snapshot.chain.is_empty() {
            debug!(reported = snapshot.length, "peer sent an empty chain");
            continue;
        }
        if !is_valid_chain(&snapshot.chain) {
            debug!(reported = snapshot.length, "peer chain failed validation");
            continue;
        }
        max_length = snapshot.length;
        candidate = Some(snapshot.chain);
    }

    match candidate {
        Some(chain) => {
            info!(length = chain.len(), "replacing local chain");
            ledger.replace_chain(chain);
            true
        }
        None => false,
    }
}
