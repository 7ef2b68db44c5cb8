use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::errors::LottoError;
use crate::events::GameStarted;
use crate::state::{Game, GameStatus, Registry, FEE_UNIT, MAX_PLAYERS_CAP};

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct StartGameParams {
    pub fee_percent: u8,
    pub ticket_price: u64,
    pub max_players: u32,
    pub max_tickets_player: u32,
}

#[derive(Accounts)]
#[instruction(params: StartGameParams)]
pub struct StartGame<'info> {
    #[account(
        mut,
        seeds = [Registry::SEED],
        bump = registry.bump,
        has_one = authority @ LottoError::Unauthorized,
    )]
    pub registry: Account<'info, Registry>,

    #[account(
        init,
        payer = authority,
        space = Game::space_for(params.max_players.min(MAX_PLAYERS_CAP)),
        seeds = [Game::SEED, registry.total_games.to_le_bytes().as_ref()],
        bump,
    )]
    pub game: Account<'info, Game>,

    /// The vault token account owned by the game PDA.
    #[account(
        init,
        payer = authority,
        associated_token::mint = token_mint,
        associated_token::authority = game,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Mint the round is played in.
    pub token_mint: Account<'info, Mint>,

    /// CHECK: Wallet credited with the fee cut at settlement.
    pub fee_address: UncheckedAccount<'info>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}

pub fn handler(ctx: Context<StartGame>, params: StartGameParams) -> Result<()> {
    require!(params.ticket_price > 0, LottoError::InvalidParameters);
    require!(
        params.max_players > 0 && params.max_players <= MAX_PLAYERS_CAP,
        LottoError::InvalidParameters
    );
    require!(params.max_tickets_player > 0, LottoError::InvalidParameters);
    require!(
        (params.fee_percent as u64) < FEE_UNIT,
        LottoError::InvalidParameters
    );

    let registry = &mut ctx.accounts.registry;
    let game_number = registry.allocate_game_number()?;

    let game = &mut ctx.accounts.game;
    game.game_number = game_number;
    game.token_mint = ctx.accounts.token_mint.key();
    game.fee_address = ctx.accounts.fee_address.key();
    game.fee_percent = params.fee_percent;
    game.ticket_price = params.ticket_price;
    game.max_players = params.max_players;
    game.max_tickets_player = params.max_tickets_player;
    game.entries = Vec::new();
    game.total_tickets = 0;
    game.pot = 0;
    game.vault = ctx.accounts.vault.key();
    game.status = GameStatus::Open;
    game.bump = ctx.bumps.game;

    emit!(GameStarted {
        token_address: game.token_mint,
        fee_address: game.fee_address,
        game_number,
        fee_percent: params.fee_percent,
        ticket_price: params.ticket_price,
        max_players: params.max_players,
        max_tickets_player: params.max_tickets_player,
    });

    Ok(())
}
