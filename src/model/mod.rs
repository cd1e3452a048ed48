pub mod punch;
pub mod record;
pub mod role;
pub mod roster;
