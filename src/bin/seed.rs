use menew_api::{
    config::AppConfig,
    db::{DbPool, create_pool, run_migrations},
    models::{Category, Role},
    services::auth_service::hash_password,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, 2).await?;
    run_migrations(&pool).await?;

    let admin_id = ensure_user(&pool, "admin@example.com", "admin123", Role::Admin).await?;
    let client_id = ensure_user(&pool, "client@example.com", "client123", Role::Client).await?;
    seed_dishes(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}, Client ID: {client_id}");
    Ok(())
}

async fn ensure_user(pool: &DbPool, email: &str, password: &str, role: Role) -> anyhow::Result<i32> {
    let password_hash = hash_password(password)?;

    let (user_id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO users (email, password_hash, role)
        VALUES ($1, $2, $3)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .bind(role.as_str())
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(user_id)
}

async fn seed_dishes(pool: &DbPool) -> anyhow::Result<()> {
    let dishes = [
        ("Lentil soup", Category::Starter),
        ("Mixed salad", Category::Starter),
        ("Gazpacho", Category::Starter),
        ("Grilled chicken", Category::Main),
        ("Baked hake", Category::Main),
        ("Vegetable paella", Category::Main),
        ("Fresh fruit", Category::Dessert),
        ("Rice pudding", Category::Dessert),
        ("Yoghurt", Category::Dessert),
    ];

    let mut inserted = 0;
    for (name, category) in dishes {
        let result = sqlx::query(
            r#"
            INSERT INTO dishes (name, category)
            SELECT $1, $2
            WHERE NOT EXISTS (SELECT 1 FROM dishes WHERE name = $1)
            "#,
        )
        .bind(name)
        .bind(category.code())
        .execute(pool)
        .await?;
        inserted += result.rows_affected();
    }

    println!("Seeded {inserted} dishes");
    Ok(())
}
