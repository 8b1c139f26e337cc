mod game;
mod season;
mod standings;
mod team;

pub use game::*;
pub use season::*;
pub use standings::*;
pub use team::*;
