use anchor_lang::prelude::*;

use crate::errors::LottoError;
use crate::state::{Game, GameSnapshot, Registry};

#[derive(Accounts)]
pub struct GetGameState<'info> {
    #[account(
        seeds = [Registry::SEED],
        bump = registry.bump,
    )]
    pub registry: Account<'info, Registry>,

    /// CHECK: Validated against the registry and deserialized in the handler
    /// so an unknown game number surfaces as GameNotFound.
    pub game: UncheckedAccount<'info>,
}

pub fn handler(ctx: Context<GetGameState>, game_number: u64) -> Result<GameSnapshot> {
    let registry = &ctx.accounts.registry;
    require!(
        game_number < registry.total_games,
        LottoError::GameNotFound
    );

    let (expected, _) = Pubkey::find_program_address(
        &[Game::SEED, game_number.to_le_bytes().as_ref()],
        ctx.program_id,
    );
    require_keys_eq!(ctx.accounts.game.key(), expected, LottoError::GameNotFound);

    let data = ctx.accounts.game.try_borrow_data()?;
    let mut slice: &[u8] = &data;
    let game = Game::try_deserialize(&mut slice).map_err(|_| LottoError::GameNotFound)?;

    Ok(game.snapshot())
}

#[derive(Accounts)]
pub struct TotalGames<'info> {
    #[account(
        seeds = [Registry::SEED],
        bump = registry.bump,
    )]
    pub registry: Account<'info, Registry>,
}

pub fn total_games_handler(ctx: Context<TotalGames>) -> Result<u64> {
    Ok(ctx.accounts.registry.total_games)
}
