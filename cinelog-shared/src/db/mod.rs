/// Database layer for Cinelog
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with health check
/// - `schema`: Idempotent schema bootstrap run at startup

pub mod pool;
pub mod schema;
