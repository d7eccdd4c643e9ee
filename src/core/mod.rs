pub mod db;
pub mod filter;
pub mod membership;
pub mod security;
pub mod session;
pub mod sqlx_utils;
#[cfg(test)]
pub mod test_utils;
pub mod utils;
