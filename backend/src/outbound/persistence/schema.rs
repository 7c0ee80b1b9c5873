//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the deployed database exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// User accounts table.
    ///
    /// The `id` column is a serial primary key assigned by the store on
    /// insert. Names carry no uniqueness constraint.
    users (id) {
        /// Primary key: positive serial identifier.
        id -> Int4,
        /// Human-readable user name.
        name -> Varchar,
    }
}
