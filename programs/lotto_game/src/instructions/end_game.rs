use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::errors::LottoError;
use crate::events::GameEnded;
use crate::state::{selection_index, Game, GameStatus, Oracle, Registry};

#[derive(Accounts)]
#[instruction(game_number: u64)]
pub struct EndGame<'info> {
    #[account(
        seeds = [Registry::SEED],
        bump = registry.bump,
        has_one = authority @ LottoError::Unauthorized,
        has_one = oracle @ LottoError::IncorrectOracle,
    )]
    pub registry: Account<'info, Registry>,

    #[account(
        seeds = [Oracle::SEED],
        bump = oracle.bump,
    )]
    pub oracle: Account<'info, Oracle>,

    #[account(
        mut,
        seeds = [Game::SEED, game_number.to_le_bytes().as_ref()],
        bump = game.bump,
    )]
    pub game: Account<'info, Game>,

    /// Vault token account owned by the game PDA.
    #[account(
        mut,
        constraint = vault.key() == game.vault,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Token account of the drawn winner; ownership is checked against the
    /// draw in the handler.
    #[account(
        mut,
        constraint = winner_token_account.mint == game.token_mint,
    )]
    pub winner_token_account: Account<'info, TokenAccount>,

    /// Fee wallet's token account.
    #[account(
        mut,
        constraint = fee_token_account.owner == game.fee_address,
        constraint = fee_token_account.mint == game.token_mint,
    )]
    pub fee_token_account: Account<'info, TokenAccount>,

    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<EndGame>, game_number: u64) -> Result<()> {
    let game = &ctx.accounts.game;
    let oracle = &ctx.accounts.oracle;

    game.ensure_open()?;
    require!(game.total_tickets > 0, LottoError::NoTicketsSold);

    let index = selection_index(
        oracle.value,
        oracle.rounds,
        game.game_number,
        game.total_tickets,
    )?;
    let winner = game.winner_of(index)?;

    require_keys_eq!(
        ctx.accounts.winner_token_account.owner,
        winner,
        LottoError::WinnerAccountMismatch
    );

    let (fee, prize) = game.fee_split()?;
    let pot = game.pot;

    msg!(
        "game {} drew ticket {} of {}: winner {}",
        game_number,
        index,
        game.total_tickets,
        winner
    );

    // Build PDA signer seeds for the game account.
    let game_number_bytes = game.game_number.to_le_bytes();
    let bump_bytes = [game.bump];
    let signer_seeds: &[&[&[u8]]] = &[&[Game::SEED, &game_number_bytes, &bump_bytes]];

    // Transfer prize to winner.
    let transfer_to_winner = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        Transfer {
            from: ctx.accounts.vault.to_account_info(),
            to: ctx.accounts.winner_token_account.to_account_info(),
            authority: ctx.accounts.game.to_account_info(),
        },
        signer_seeds,
    );
    token::transfer(transfer_to_winner, prize)?;

    // Transfer fee to the fee wallet.
    if fee > 0 {
        let transfer_fee = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.fee_token_account.to_account_info(),
                authority: ctx.accounts.game.to_account_info(),
            },
            signer_seeds,
        );
        token::transfer(transfer_fee, fee)?;
    }

    let game = &mut ctx.accounts.game;
    game.status = GameStatus::Closed;

    emit!(GameEnded {
        token_address: game.token_mint,
        game_number,
        winner_address: winner,
        pot,
    });

    Ok(())
}
