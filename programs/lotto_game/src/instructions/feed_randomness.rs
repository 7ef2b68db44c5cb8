use anchor_lang::prelude::*;

use crate::errors::LottoError;
use crate::events::RandomnessFed;
use crate::state::Oracle;

#[derive(Accounts)]
pub struct FeedRandomness<'info> {
    #[account(
        mut,
        seeds = [Oracle::SEED],
        bump = oracle.bump,
        has_one = authority @ LottoError::Unauthorized,
    )]
    pub oracle: Account<'info, Oracle>,

    pub authority: Signer<'info>,
}

pub fn handler(ctx: Context<FeedRandomness>, value: u64) -> Result<()> {
    let oracle = &mut ctx.accounts.oracle;
    oracle.value = value;
    oracle.rounds = oracle
        .rounds
        .checked_add(1)
        .ok_or(LottoError::MathOverflow)?;

    emit!(RandomnessFed {
        value,
        rounds: oracle.rounds,
    });

    Ok(())
}
