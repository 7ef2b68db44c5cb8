use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::events::TicketPurchased;
use crate::state::Game;

#[derive(Accounts)]
#[instruction(game_number: u64)]
pub struct BuyTicket<'info> {
    #[account(
        mut,
        seeds = [Game::SEED, game_number.to_le_bytes().as_ref()],
        bump = game.bump,
    )]
    pub game: Account<'info, Game>,

    /// Player's token account for the round's mint.
    #[account(
        mut,
        constraint = player_token_account.owner == player.key(),
        constraint = player_token_account.mint == game.token_mint,
    )]
    pub player_token_account: Account<'info, TokenAccount>,

    /// Vault token account owned by the game PDA.
    #[account(
        mut,
        constraint = vault.key() == game.vault,
    )]
    pub vault: Account<'info, TokenAccount>,

    pub player: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<BuyTicket>, game_number: u64, number_of_tickets: u32) -> Result<()> {
    let player_key = ctx.accounts.player.key();
    let cost = ctx
        .accounts
        .game
        .check_admission(&player_key, number_of_tickets)?;

    // Move the stake before touching the books; the transaction unwinds both
    // together on failure.
    let transfer_ctx = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        Transfer {
            from: ctx.accounts.player_token_account.to_account_info(),
            to: ctx.accounts.vault.to_account_info(),
            authority: ctx.accounts.player.to_account_info(),
        },
    );
    token::transfer(transfer_ctx, cost)?;

    let game = &mut ctx.accounts.game;
    let (player_count, ticket_count) = game.record_purchase(&player_key, number_of_tickets, cost)?;

    emit!(TicketPurchased {
        player_address: player_key,
        game_number,
        player_count,
        ticket_count,
    });

    Ok(())
}
