use anchor_lang::prelude::*;

use crate::state::{Oracle, Registry};

#[derive(Accounts)]
pub struct InitializeRegistry<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + Registry::INIT_SPACE,
        seeds = [Registry::SEED],
        bump,
    )]
    pub registry: Account<'info, Registry>,

    /// The oracle the registry will trust for draws.
    #[account(
        seeds = [Oracle::SEED],
        bump = oracle.bump,
    )]
    pub oracle: Account<'info, Oracle>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeRegistry>) -> Result<()> {
    let registry = &mut ctx.accounts.registry;
    registry.authority = ctx.accounts.authority.key();
    registry.oracle = ctx.accounts.oracle.key();
    registry.total_games = 0;
    registry.bump = ctx.bumps.registry;

    Ok(())
}
