// src/db/mod.rs
//
// Database module
//
// Provides:
// - Connection pooling
// - Schema migrations

pub mod connection;
pub mod migrations;

pub use connection::{
    create_connection_pool, create_test_connection, get_connection, get_database_path,
    ConnectionPool, PooledConn,
};

pub use migrations::{initialize_database, verify_database_integrity};
