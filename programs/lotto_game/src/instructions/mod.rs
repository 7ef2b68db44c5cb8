pub mod buy_ticket;
pub mod end_game;
pub mod feed_randomness;
pub mod get_game_state;
pub mod initialize_oracle;
pub mod initialize_registry;
pub mod start_game;
pub mod update_authority;

pub use buy_ticket::*;
pub use end_game::*;
pub use feed_randomness::*;
pub use get_game_state::*;
pub use initialize_oracle::*;
pub use initialize_registry::*;
pub use start_game::*;
pub use update_authority::*;
