use anchor_lang::prelude::*;

use crate::errors::LottoError;
use crate::state::Registry;

#[derive(Accounts)]
pub struct UpdateAuthority<'info> {
    #[account(
        mut,
        seeds = [Registry::SEED],
        bump = registry.bump,
        has_one = authority @ LottoError::Unauthorized,
    )]
    pub registry: Account<'info, Registry>,

    pub authority: Signer<'info>,
}

pub fn handler(ctx: Context<UpdateAuthority>, new_authority: Pubkey) -> Result<()> {
    ctx.accounts.registry.authority = new_authority;

    Ok(())
}
