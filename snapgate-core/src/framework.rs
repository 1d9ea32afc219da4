use sqlx::PgPool;

/// Runs SQL query objects against the connection pool.
///
/// Each query is a plain struct with a `kanau::processor::Processor`
/// implementation for this type.
#[derive(Debug, Clone)]
pub struct DatabaseProcessor {
    pub pool: PgPool,
}
