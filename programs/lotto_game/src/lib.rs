use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;
use state::GameSnapshot;

declare_id!("EN3nNkcvf3sDnL7888hKMrxEfqELQe2DY6s4iLeLMj4x");

#[program]
pub mod lotto_game {
    use super::*;

    /// One-time creation of the randomness oracle account.
    pub fn initialize_oracle(ctx: Context<InitializeOracle>) -> Result<()> {
        instructions::initialize_oracle::handler(ctx)
    }

    /// Oracle authority publishes a fresh randomness word.
    pub fn feed_randomness(ctx: Context<FeedRandomness>, value: u64) -> Result<()> {
        instructions::feed_randomness::handler(ctx, value)
    }

    /// One-time registry initialization, binding the trusted oracle.
    pub fn initialize_registry(ctx: Context<InitializeRegistry>) -> Result<()> {
        instructions::initialize_registry::handler(ctx)
    }

    /// Rotate the settlement authority to a new key.
    pub fn update_authority(ctx: Context<UpdateAuthority>, new_authority: Pubkey) -> Result<()> {
        instructions::update_authority::handler(ctx, new_authority)
    }

    /// Open a new game round for a given token mint and fee destination.
    pub fn start_game(ctx: Context<StartGame>, params: StartGameParams) -> Result<()> {
        instructions::start_game::handler(ctx, params)
    }

    /// Purchase tickets in an open game; funds move into the game vault.
    pub fn buy_ticket(
        ctx: Context<BuyTicket>,
        game_number: u64,
        number_of_tickets: u32,
    ) -> Result<()> {
        instructions::buy_ticket::handler(ctx, game_number, number_of_tickets)
    }

    /// Settle an open game: draw a winner, pay fee and prize, close the round.
    pub fn end_game(ctx: Context<EndGame>, game_number: u64) -> Result<()> {
        instructions::end_game::handler(ctx, game_number)
    }

    /// Read the live snapshot of a game round.
    pub fn get_game_state(ctx: Context<GetGameState>, game_number: u64) -> Result<GameSnapshot> {
        instructions::get_game_state::handler(ctx, game_number)
    }

    /// Number of games ever created, open or closed.
    pub fn total_games(ctx: Context<TotalGames>) -> Result<u64> {
        instructions::get_game_state::total_games_handler(ctx)
    }
}
