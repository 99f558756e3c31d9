pub mod layout;
pub mod setup;
