pub mod afford;
pub mod market;
pub mod prices;
pub mod ratio;
pub mod setup;
pub mod ui;
