mod board;
mod funnel;

pub use board::{BoardCommands, MoveArgs};
pub use funnel::FunnelCommands;
