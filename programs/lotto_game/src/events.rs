use anchor_lang::prelude::*;

#[event]
pub struct GameStarted {
    pub token_address: Pubkey,
    pub fee_address: Pubkey,
    pub game_number: u64,
    pub fee_percent: u8,
    pub ticket_price: u64,
    pub max_players: u32,
    pub max_tickets_player: u32,
}

#[event]
pub struct TicketPurchased {
    pub player_address: Pubkey,
    pub game_number: u64,
    pub player_count: u32,
    pub ticket_count: u32,
}

#[event]
pub struct GameEnded {
    pub token_address: Pubkey,
    pub game_number: u64,
    pub winner_address: Pubkey,
    pub pot: u64,
}

#[event]
pub struct RandomnessFed {
    pub value: u64,
    pub rounds: u64,
}
