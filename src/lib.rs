pub mod app;
pub mod cli;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod logging;
pub mod output;
pub mod runner;

#[cfg(test)]
mod tests;
