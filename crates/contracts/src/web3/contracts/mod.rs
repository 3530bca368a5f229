pub mod core;
pub mod diamond;
pub mod helpers;
pub mod implementations;
