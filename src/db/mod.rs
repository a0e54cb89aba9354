//! Storage contracts on PostgreSQL. Every function is a single statement;
//! uniqueness and isolation are left to the database.

pub mod accounts;
pub mod entries;
