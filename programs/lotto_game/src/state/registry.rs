use anchor_lang::prelude::*;

use crate::errors::LottoError;

#[account]
#[derive(InitSpace)]
pub struct Registry {
    /// Admin who can start and settle games.
    pub authority: Pubkey,
    /// Oracle account trusted for draw randomness.
    pub oracle: Pubkey,
    /// Running count of games created, open or closed.
    pub total_games: u64,
    /// PDA bump seed.
    pub bump: u8,
}

impl Registry {
    pub const SEED: &'static [u8] = b"registry";

    /// Hands out the next dense game number, starting from zero.
    pub fn allocate_game_number(&mut self) -> Result<u64> {
        let number = self.total_games;
        self.total_games = self
            .total_games
            .checked_add(1)
            .ok_or(LottoError::MathOverflow)?;
        Ok(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_numbers_are_dense_and_zero_based() {
        let mut registry = Registry {
            authority: Pubkey::new_unique(),
            oracle: Pubkey::new_unique(),
            total_games: 0,
            bump: 255,
        };

        assert_eq!(registry.allocate_game_number().unwrap(), 0);
        assert_eq!(registry.allocate_game_number().unwrap(), 1);
        assert_eq!(registry.allocate_game_number().unwrap(), 2);
        assert_eq!(registry.total_games, 3);
    }
}
