// ORM Schema
pub mod schema;

// ORM Models
pub mod bookmark;

// Storage port
pub mod store;

// Storage backends
pub mod memory;
pub mod postgres;

// Driver
pub mod connection;
