//! Generic entity retrieval shared by the services.

use rusqlite::Connection;

use crate::{
    Error,
    database_id::DatabaseId,
    db::{Entity, select_all, select_by_id},
    error::ServiceResult,
};

/// Get the entity with the ID `id`.
///
/// # Errors
/// Returns an [crate::ErrorKind::NotFound] entry "{Entity} {id} not found" if there is no such
/// row, or [Error::SqlError] if there is some other SQL error.
pub fn get_entity<T: Entity>(id: DatabaseId, connection: &Connection) -> ServiceResult<T> {
    select_by_id::<T>(id, connection)?
        .ok_or_else(|| Error::not_found(format!("{} {id} not found", T::NAME)))
}

/// Get every entity of type `T`, an empty vector if there are none.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn get_all_entities<T: Entity>(connection: &Connection) -> ServiceResult<Vec<T>> {
    select_all::<T>(connection)
}
