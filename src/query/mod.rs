//! Types and methods used for database queries.

pub use self::statement::Statement;

mod statement;
