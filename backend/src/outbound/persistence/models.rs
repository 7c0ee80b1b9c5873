//! Row structs mapping the `users` table to the domain entity.

use diesel::prelude::*;

use crate::domain::ports::UserPersistenceError;
use crate::domain::User;

use super::schema::users;

/// Read model for a row of the `users` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Store-assigned primary key.
    pub id: i32,
    /// User name as stored.
    pub name: String,
}

/// Insert model for the `users` table; the store assigns the id.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// Name for the new row.
    pub name: String,
}

impl UserRow {
    /// Convert a stored row into the domain entity.
    ///
    /// Rows that violate the entity invariants (non-positive id, blank name)
    /// indicate corrupt data and surface as a query error rather than a
    /// panic.
    pub fn into_entity(self) -> Result<User, UserPersistenceError> {
        User::try_from_parts(self.id, self.name)
            .map_err(|err| UserPersistenceError::query(format!("invalid stored user row: {err}")))
    }
}
