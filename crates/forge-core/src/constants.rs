pub const HASH_SIZE: usize = 32;
pub const HASH_HEX_SIZE: usize = HASH_SIZE * 2;

pub const GENESIS_PREVIOUS_HASH: &str = "1";
pub const GENESIS_PROOF: u64 = 100;

// 16 leading zero bits, i.e. the digest's first four hex characters are '0'.
pub const POW_DIFFICULTY_BITS: u32 = 16;

pub const REWARD_SENDER: &str = "0";
pub const REWARD_AMOUNT: u64 = 1;
