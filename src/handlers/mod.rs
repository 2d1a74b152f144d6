pub mod order;

pub use order::order_config;
