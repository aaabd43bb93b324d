#![allow(missing_docs)]

use rusqlite::Connection;

use crate::db::initialize;

#[track_caller]
pub(crate) fn must_create_test_connection() -> Connection {
    let connection =
        Connection::open_in_memory().expect("could not create in-memory SQLite database");
    initialize(&connection).expect("could not initialize test DB");

    connection
}
