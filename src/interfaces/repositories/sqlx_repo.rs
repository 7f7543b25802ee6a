use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxProjectRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxBlogPostRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxInquiryRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxSystemRepo {
    pub pool: PgPool,
}
