pub mod app;
pub mod assessment;
pub mod cli;
pub mod coerce;
pub mod llm;
pub mod models;
pub mod utils;

#[cfg(test)]
pub mod test_utils;
