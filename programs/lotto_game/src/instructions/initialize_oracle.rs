use anchor_lang::prelude::*;

use crate::state::Oracle;

#[derive(Accounts)]
pub struct InitializeOracle<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + Oracle::INIT_SPACE,
        seeds = [Oracle::SEED],
        bump,
    )]
    pub oracle: Account<'info, Oracle>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeOracle>) -> Result<()> {
    let oracle = &mut ctx.accounts.oracle;
    oracle.authority = ctx.accounts.authority.key();
    oracle.value = 0;
    oracle.rounds = 0;
    oracle.bump = ctx.bumps.oracle;

    Ok(())
}
