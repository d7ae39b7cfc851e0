pub mod board;
pub mod dispatch;
pub mod funnel;
pub mod schema;
pub mod stages;
