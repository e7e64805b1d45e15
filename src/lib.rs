pub mod address;
pub mod commands;
pub mod config;
pub mod grants;
pub mod hash;
pub mod messages;
pub mod net;
pub mod search;
pub mod session;
pub mod term;
pub mod units;
pub mod vars;

#[cfg(test)]
pub mod test_helpers;
