use anchor_lang::prelude::*;

#[error_code]
pub enum LottoError {
    #[msg("Invalid game parameters.")]
    InvalidParameters,
    #[msg("Game does not exist.")]
    GameNotFound,
    #[msg("Game is closed.")]
    GameClosed,
    #[msg("Too many players in game")]
    TooManyPlayers,
    #[msg("Exceeds max player tickets, try lower value")]
    TicketLimitExceeded,
    #[msg("Signer is not authorized for this action.")]
    Unauthorized,
    #[msg("Oracle account does not match the registry.")]
    IncorrectOracle,
    #[msg("Cannot settle a game with no tickets sold.")]
    NoTicketsSold,
    #[msg("Token account owner does not match the drawn winner.")]
    WinnerAccountMismatch,
    #[msg("Arithmetic overflow.")]
    MathOverflow,
}
