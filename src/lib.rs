pub mod export;
pub mod page;
pub mod roster;
