pub mod traits;

// Market-data service implementations
pub mod http;
