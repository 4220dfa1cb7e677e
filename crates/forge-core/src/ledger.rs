use std::time::{SystemTime, UNIX_EPOCH};

use tracing::info;

use crate::constants::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF, REWARD_AMOUNT, REWARD_SENDER};
use crate::error::LedgerError;
use crate::{block_hash, pow, Block, Transaction};

/// The chain and the pool of transactions waiting for the next block.
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
}

impl Ledger {
    /// Start a chain with its genesis block. The genesis sentinels are fixed
    /// at construction and never recomputed.
    pub fn new() -> Self {
        let mut ledger = Self {
            chain: Vec::new(),
            pending: Vec::new(),
        };
        ledger.push_block(GENESIS_PROOF, GENESIS_PREVIOUS_HASH.to_string());
        ledger
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn last_block(&self) -> Result<&Block, LedgerError> {
        self.chain.last().ok_or(LedgerError::EmptyChain)
    }

    /// Queue a transaction and return the index of the block it will join.
    /// Sender, recipient, and amount are taken as opaque data.
    pub fn new_transaction(&mut self, sender: &str, recipient: &str, amount: u64) -> u64 {
        self.pending.push(Transaction {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            amount,
        });
        self.chain.len() as u64 + 1
    }

    /// Forge the next block out of everything pending. `previous_hash`
    /// defaults to the hash of the last block.
    pub fn new_block(
        &mut self,
        proof: u64,
        previous_hash: Option<String>,
    ) -> Result<Block, LedgerError> {
        let previous_hash = match previous_hash {
            Some(hash) => hash,
            None => block_hash(self.last_block()?),
        };
        Ok(self.push_block(proof, previous_hash))
    }

    /// Solve the puzzle seeded by the last block's proof, credit `node_id`
    /// with the reward, and forge the block. The reward transaction lands
    /// after any user transactions already pooled.
    pub fn mine(&mut self, node_id: &str) -> Result<Block, LedgerError> {
        let (last_proof, previous_hash) = {
            let last = self.last_block()?;
            (last.proof, block_hash(last))
        };
        let proof = pow::solve(last_proof);
        self.new_transaction(REWARD_SENDER, node_id, REWARD_AMOUNT);
        let block = self.new_block(proof, Some(previous_hash))?;
        info!(index = block.index, proof = block.proof, "forged block");
        Ok(block)
    }

    pub(crate) fn replace_chain(&mut self, chain: Vec<Block>) {
        self.chain = chain;
    }

    fn push_block(&mut self, proof: u64, previous_hash: String) -> Block {
        let block = Block {
            index: self.chain.len() as u64 + 1,
            timestamp: unix_millis(),
            transactions: std::mem::take(&mut self.pending),
            proof,
            previous_hash,
        };
        self.chain.push(block.clone());
        block
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}
