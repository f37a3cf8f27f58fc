pub mod board;
pub mod config;
pub mod fetch;
pub mod process;
pub mod render;
pub mod server;

#[cfg(test)]
pub(crate) mod test_support;
