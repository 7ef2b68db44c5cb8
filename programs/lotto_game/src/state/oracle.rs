use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace)]
pub struct Oracle {
    /// Key allowed to publish randomness.
    pub authority: Pubkey,
    /// Most recent randomness word.
    pub value: u64,
    /// Number of words published so far.
    pub rounds: u64,
    /// PDA bump seed.
    pub bump: u8,
}

impl Oracle {
    pub const SEED: &'static [u8] = b"oracle";
}
