pub mod orders;

pub use orders as order_entity;
