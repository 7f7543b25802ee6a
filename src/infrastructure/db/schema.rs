use sqlx::PgPool;
use tracing::info;

/// Tables first, then columns added after the first deployments. Older
/// databases tie comments to their post; deleting a post leaves them orphaned.
const SCHEMA_STATEMENTS: [&str; 8] = [
    r#"
    CREATE TABLE IF NOT EXISTS projects (
        id SERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        description TEXT,
        image_url TEXT,
        tech_stack TEXT,
        source_url TEXT,
        demo_url TEXT,
        github_url TEXT,
        price DECIMAL(10, 2) DEFAULT 0,
        views INTEGER DEFAULT 0,
        created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS blog_posts (
        id SERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        content TEXT NOT NULL,
        published_date DATE DEFAULT CURRENT_DATE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS messages (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255) NOT NULL,
        message TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS comments (
        id SERIAL PRIMARY KEY,
        post_id INTEGER,
        name VARCHAR(255),
        content TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    "ALTER TABLE projects ADD COLUMN IF NOT EXISTS views INTEGER DEFAULT 0",
    "ALTER TABLE projects ADD COLUMN IF NOT EXISTS github_url TEXT",
    "ALTER TABLE blog_posts ADD COLUMN IF NOT EXISTS published_date DATE DEFAULT CURRENT_DATE",
    "ALTER TABLE comments DROP CONSTRAINT IF EXISTS comments_post_id_fkey",
];

/// Creates missing tables and columns in one transaction. Safe to run on every start.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement).execute(&mut *tx).await?;
    }

    tx.commit().await?;
    info!("Database schema is up to date.");
    Ok(())
}
