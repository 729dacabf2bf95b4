pub mod clean;

pub use clean::run_clean;
