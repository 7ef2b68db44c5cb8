use anchor_lang::prelude::*;

use crate::errors::LottoError;

/// Hard cap on distinct purchasers per round: entry space is allocated up
/// front and a fresh account allocation tops out at 10 KiB.
pub const MAX_PLAYERS_CAP: u32 = 256;

/// Divisor for the whole-percent fee rate.
pub const FEE_UNIT: u64 = 100;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Accepting ticket purchases.
    Open,
    /// Settled; terminal.
    Closed,
}

/// One purchaser's position in a round, kept in purchase order.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq)]
pub struct TicketEntry {
    pub player: Pubkey,
    pub tickets: u32,
}

impl TicketEntry {
    pub const LEN: usize = 32 + 4;
}

#[account]
pub struct Game {
    /// Sequential round identifier, dense from zero.
    pub game_number: u64,
    /// Mint of the token this round is played in.
    pub token_mint: Pubkey,
    /// Wallet that receives the fee cut at settlement.
    pub fee_address: Pubkey,
    /// Whole-percent fee rate taken from the pot (0-99).
    pub fee_percent: u8,
    /// Token base units per ticket.
    pub ticket_price: u64,
    /// Cap on distinct purchasers.
    pub max_players: u32,
    /// Cap on tickets a single purchaser may hold.
    pub max_tickets_player: u32,
    /// Purchasers and their holdings, in purchase order.
    pub entries: Vec<TicketEntry>,
    /// Total tickets sold.
    pub total_tickets: u64,
    /// Accumulated stake, equal to tickets sold times ticket price.
    pub pot: u64,
    /// Token account owned by this round's PDA holding the pot.
    pub vault: Pubkey,
    /// Round status; flips Open -> Closed exactly once.
    pub status: GameStatus,
    /// PDA bump seed.
    pub bump: u8,
}

impl Game {
    pub const SEED: &'static [u8] = b"game";

    /// Account size for a round admitting up to `max_players` purchasers.
    pub fn space_for(max_players: u32) -> usize {
        8                                               // discriminator
            + 8                                         // game_number
            + 32                                        // token_mint
            + 32                                        // fee_address
            + 1                                         // fee_percent
            + 8                                         // ticket_price
            + 4                                         // max_players
            + 4                                         // max_tickets_player
            + 4 + max_players as usize * TicketEntry::LEN // entries
            + 8                                         // total_tickets
            + 8                                         // pot
            + 32                                        // vault
            + 1                                         // status
            + 1                                         // bump
    }

    pub fn player_count(&self) -> u32 {
        self.entries.len() as u32
    }

    fn position_of(&self, player: &Pubkey) -> Option<usize> {
        self.entries.iter().position(|e| e.player == *player)
    }

    pub fn ensure_open(&self) -> Result<()> {
        require!(self.status == GameStatus::Open, LottoError::GameClosed);
        Ok(())
    }

    /// Validates a purchase without touching state and returns its cost.
    /// The first failing condition decides the surfaced error: closed round,
    /// then the distinct-player cap, then the per-player ticket cap.
    pub fn check_admission(&self, player: &Pubkey, number_of_tickets: u32) -> Result<u64> {
        self.ensure_open()?;
        require!(number_of_tickets > 0, LottoError::InvalidParameters);

        let held = match self.position_of(player) {
            Some(pos) => self.entries[pos].tickets,
            None => {
                // Repeat purchases never count against the player cap.
                require!(
                    self.player_count() < self.max_players,
                    LottoError::TooManyPlayers
                );
                0
            }
        };

        let total_held = held
            .checked_add(number_of_tickets)
            .ok_or(LottoError::MathOverflow)?;
        require!(
            total_held <= self.max_tickets_player,
            LottoError::TicketLimitExceeded
        );

        let cost = (number_of_tickets as u64)
            .checked_mul(self.ticket_price)
            .ok_or(LottoError::MathOverflow)?;
        Ok(cost)
    }

    /// Applies a validated purchase to the round's books. Returns the updated
    /// distinct-player count and the purchaser's updated ticket holding.
    pub fn record_purchase(
        &mut self,
        player: &Pubkey,
        number_of_tickets: u32,
        cost: u64,
    ) -> Result<(u32, u32)> {
        let ticket_count = match self.position_of(player) {
            Some(pos) => {
                let entry = &mut self.entries[pos];
                entry.tickets = entry
                    .tickets
                    .checked_add(number_of_tickets)
                    .ok_or(LottoError::MathOverflow)?;
                entry.tickets
            }
            None => {
                self.entries.push(TicketEntry {
                    player: *player,
                    tickets: number_of_tickets,
                });
                number_of_tickets
            }
        };

        self.total_tickets = self
            .total_tickets
            .checked_add(number_of_tickets as u64)
            .ok_or(LottoError::MathOverflow)?;
        self.pot = self.pot.checked_add(cost).ok_or(LottoError::MathOverflow)?;

        Ok((self.player_count(), ticket_count))
    }

    /// Splits the pot into (fee, prize). The fee truncates downward.
    pub fn fee_split(&self) -> Result<(u64, u64)> {
        let fee = (self.pot as u128 * self.fee_percent as u128 / FEE_UNIT as u128) as u64;
        let prize = self.pot.checked_sub(fee).ok_or(LottoError::MathOverflow)?;
        Ok((fee, prize))
    }

    /// Maps a selection index in [0, total_tickets) to the purchaser whose
    /// cumulative ticket range contains it. Purchase order fixes the ranges,
    /// so win probability is proportional to tickets held.
    pub fn winner_of(&self, index: u64) -> Result<Pubkey> {
        let mut cumulative = 0u64;
        for entry in &self.entries {
            cumulative += entry.tickets as u64;
            if index < cumulative {
                return Ok(entry.player);
            }
        }
        Err(LottoError::NoTicketsSold.into())
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            game_number: self.game_number,
            token_address: self.token_mint,
            fee_address: self.fee_address,
            fee_percent: self.fee_percent,
            ticket_price: self.ticket_price,
            max_players: self.max_players,
            max_tickets_player: self.max_tickets_player,
            player_count: self.player_count(),
            ticket_count: self.total_tickets,
            pot: self.pot,
            status: self.status,
        }
    }
}

/// Live view of a round, returned by the state query.
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct GameSnapshot {
    pub game_number: u64,
    pub token_address: Pubkey,
    pub fee_address: Pubkey,
    pub fee_percent: u8,
    pub ticket_price: u64,
    pub max_players: u32,
    pub max_tickets_player: u32,
    pub player_count: u32,
    pub ticket_count: u64,
    pub pot: u64,
    pub status: GameStatus,
}

/// Derives the winning ticket index for a round. Blake3 over the oracle word,
/// the feed round, the game number and the ticket total, with the first eight
/// digest bytes taken little-endian and reduced into [0, total_tickets).
pub fn selection_index(
    oracle_value: u64,
    oracle_rounds: u64,
    game_number: u64,
    total_tickets: u64,
) -> Result<u64> {
    require!(total_tickets > 0, LottoError::NoTicketsSold);

    let mut hasher = blake3::Hasher::new();
    hasher.update(&oracle_value.to_le_bytes());
    hasher.update(&oracle_rounds.to_le_bytes());
    hasher.update(&game_number.to_le_bytes());
    hasher.update(&total_tickets.to_le_bytes());
    let digest = hasher.finalize();

    let word = u64::from_le_bytes(digest.as_bytes()[0..8].try_into().unwrap());
    Ok(word % total_tickets)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRICE: u64 = 1_000_000_000;

    fn open_game(max_players: u32, max_tickets_player: u32, fee_percent: u8, price: u64) -> Game {
        Game {
            game_number: 0,
            token_mint: Pubkey::new_unique(),
            fee_address: Pubkey::new_unique(),
            fee_percent,
            ticket_price: price,
            max_players,
            max_tickets_player,
            entries: Vec::new(),
            total_tickets: 0,
            pot: 0,
            vault: Pubkey::new_unique(),
            status: GameStatus::Open,
            bump: 255,
        }
    }

    fn buy(game: &mut Game, player: &Pubkey, tickets: u32) -> Result<(u32, u32)> {
        let cost = game.check_admission(player, tickets)?;
        game.record_purchase(player, tickets, cost)
    }

    fn error_code<T: std::fmt::Debug>(res: Result<T>) -> u32 {
        match res.expect_err("expected rejection") {
            anchor_lang::error::Error::AnchorError(e) => e.error_code_number,
            err => panic!("unexpected error kind: {err:?}"),
        }
    }

    fn code(err: LottoError) -> u32 {
        anchor_lang::error::ERROR_CODE_OFFSET + err as u32
    }

    #[test]
    fn purchases_accumulate_in_purchase_order() {
        let mut game = open_game(3, 10, 0, PRICE);
        let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());

        assert_eq!(buy(&mut game, &a, 4).unwrap(), (1, 4));
        assert_eq!(buy(&mut game, &b, 2).unwrap(), (2, 2));
        assert_eq!(buy(&mut game, &a, 3).unwrap(), (2, 7));

        assert_eq!(game.entries.len(), 2);
        assert_eq!(game.entries[0].player, a);
        assert_eq!(game.entries[0].tickets, 7);
        assert_eq!(game.entries[1].player, b);
        assert_eq!(game.entries[1].tickets, 2);
        assert_eq!(game.total_tickets, 9);
    }

    #[test]
    fn pot_equals_tickets_times_price() {
        let mut game = open_game(4, 10, 0, PRICE);
        for tickets in [1u32, 5, 10, 3] {
            let player = Pubkey::new_unique();
            buy(&mut game, &player, tickets).unwrap();
            assert_eq!(game.pot, game.total_tickets * game.ticket_price);
        }
        assert_eq!(game.total_tickets, 19);
        assert_eq!(game.pot, 19 * PRICE);
    }

    #[test]
    fn rejects_distinct_player_past_cap_without_state_change() {
        let mut game = open_game(3, 10, 0, PRICE);
        for _ in 0..3 {
            let player = Pubkey::new_unique();
            buy(&mut game, &player, 10).unwrap();
        }

        let before_entries = game.entries.clone();
        let before_pot = game.pot;

        let fourth = Pubkey::new_unique();
        assert_eq!(
            error_code(buy(&mut game, &fourth, 10)),
            code(LottoError::TooManyPlayers)
        );
        assert!(game.entries == before_entries);
        assert_eq!(game.pot, before_pot);
        assert_eq!(game.total_tickets, 30);
    }

    #[test]
    fn repeat_purchases_never_count_against_player_cap() {
        let mut game = open_game(2, 10, 0, PRICE);
        let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());
        buy(&mut game, &a, 1).unwrap();
        buy(&mut game, &b, 1).unwrap();
        // Both slots taken; an existing purchaser still buys freely.
        assert_eq!(buy(&mut game, &a, 2).unwrap(), (2, 3));
    }

    #[test]
    fn rejects_tickets_past_player_limit() {
        let mut game = open_game(3, 10, 0, PRICE);
        let player = Pubkey::new_unique();

        // Single oversized call.
        assert_eq!(
            error_code(buy(&mut game, &player, 11)),
            code(LottoError::TicketLimitExceeded)
        );
        assert!(game.entries.is_empty());
        assert_eq!(game.pot, 0);

        // Cumulative overrun.
        buy(&mut game, &player, 10).unwrap();
        assert_eq!(
            error_code(buy(&mut game, &player, 1)),
            code(LottoError::TicketLimitExceeded)
        );
        assert_eq!(game.entries[0].tickets, 10);
        assert_eq!(game.total_tickets, 10);
    }

    #[test]
    fn closed_game_rejects_purchases() {
        let mut game = open_game(3, 10, 0, PRICE);
        game.status = GameStatus::Closed;
        let player = Pubkey::new_unique();
        assert_eq!(
            error_code(buy(&mut game, &player, 1)),
            code(LottoError::GameClosed)
        );
    }

    #[test]
    fn zero_ticket_purchase_is_invalid() {
        let mut game = open_game(3, 10, 0, PRICE);
        let player = Pubkey::new_unique();
        assert_eq!(
            error_code(buy(&mut game, &player, 0)),
            code(LottoError::InvalidParameters)
        );
    }

    #[test]
    fn observed_full_round() {
        // Three purchasers fill a 3-player round with 10 tickets each, the
        // fourth wallet and an 11th ticket both bounce, and the closed
        // snapshot reports 3 players / 30 tickets.
        let mut game = open_game(3, 10, 0, PRICE);
        let players: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();
        for player in &players {
            buy(&mut game, player, 10).unwrap();
        }

        let fourth = Pubkey::new_unique();
        assert_eq!(
            error_code(buy(&mut game, &fourth, 10)),
            code(LottoError::TooManyPlayers)
        );
        assert_eq!(
            error_code(buy(&mut game, &players[0], 10)),
            code(LottoError::TicketLimitExceeded)
        );

        game.status = GameStatus::Closed;
        let snap = game.snapshot();
        assert_eq!(snap.player_count, 3);
        assert_eq!(snap.ticket_count, 30);
        assert_eq!(snap.pot, 30 * PRICE);
        assert!(snap.status == GameStatus::Closed);

        assert_eq!(
            error_code(buy(&mut game, &players[1], 1)),
            code(LottoError::GameClosed)
        );
    }

    #[test]
    fn fee_split_matches_observed_arithmetic() {
        // Three one-ticket purchases at 10^18 base units with a 3% rate pay
        // exactly 0.09 * 10^18 to the fee address.
        let price = 1_000_000_000_000_000_000u64;
        let mut game = open_game(3, 2, 3, price);
        for _ in 0..3 {
            let player = Pubkey::new_unique();
            buy(&mut game, &player, 1).unwrap();
        }
        assert_eq!(game.pot, 3_000_000_000_000_000_000);

        let (fee, prize) = game.fee_split().unwrap();
        assert_eq!(fee, 90_000_000_000_000_000);
        assert_eq!(prize, 2_910_000_000_000_000_000);
        assert_eq!(fee + prize, game.pot);
    }

    #[test]
    fn zero_fee_pays_full_pot() {
        let mut game = open_game(3, 10, 0, PRICE);
        let player = Pubkey::new_unique();
        buy(&mut game, &player, 10).unwrap();

        let (fee, prize) = game.fee_split().unwrap();
        assert_eq!(fee, 0);
        assert_eq!(prize, game.pot);
    }

    #[test]
    fn winner_ranges_follow_purchase_order() {
        let mut game = open_game(3, 10, 0, PRICE);
        let players: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();
        for player in &players {
            buy(&mut game, player, 10).unwrap();
        }

        assert_eq!(game.winner_of(0).unwrap(), players[0]);
        assert_eq!(game.winner_of(9).unwrap(), players[0]);
        assert_eq!(game.winner_of(10).unwrap(), players[1]);
        assert_eq!(game.winner_of(19).unwrap(), players[1]);
        assert_eq!(game.winner_of(20).unwrap(), players[2]);
        assert_eq!(game.winner_of(29).unwrap(), players[2]);
    }

    #[test]
    fn selection_is_exactly_proportional_to_tickets_held() {
        let mut game = open_game(3, 10, 0, PRICE);
        let players: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();
        let weights = [1u32, 3, 6];
        for (player, tickets) in players.iter().zip(weights) {
            buy(&mut game, player, tickets).unwrap();
        }

        // Sweep the whole index space: each purchaser must win exactly as
        // many times as tickets held.
        let mut wins = [0u32; 3];
        for index in 0..game.total_tickets {
            let winner = game.winner_of(index).unwrap();
            let pos = players.iter().position(|p| *p == winner).unwrap();
            wins[pos] += 1;
        }
        assert_eq!(wins, weights);
    }

    #[test]
    fn selection_index_is_scoped_and_deterministic() {
        for value in [0u64, 1, 7, 12345, u64::MAX] {
            for total in [1u64, 3, 30, 1000] {
                let index = selection_index(value, 1, 0, total).unwrap();
                assert!(index < total);
                assert_eq!(index, selection_index(value, 1, 0, total).unwrap());
            }
        }
        // A fresh feed round reseeds the draw even for an unchanged word.
        let a = selection_index(42, 1, 0, 1000).unwrap();
        let b = selection_index(42, 2, 0, 1000).unwrap();
        assert!(a < 1000 && b < 1000);
    }

    #[test]
    fn selection_rejects_empty_round() {
        assert_eq!(
            error_code(selection_index(7, 1, 0, 0)),
            code(LottoError::NoTicketsSold)
        );
        let game = open_game(3, 10, 0, PRICE);
        assert_eq!(
            error_code(game.winner_of(0)),
            code(LottoError::NoTicketsSold)
        );
    }

    #[test]
    fn largest_round_fits_a_fresh_allocation() {
        assert!(Game::space_for(MAX_PLAYERS_CAP) <= 10_240);
    }
}
