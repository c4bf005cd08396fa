use hotel_ops_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    services::auth_service::hash_password,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;

    let admin_id = ensure_user(&pool, "admin@example.com", "admin1234", "admin").await?;
    let staff_user_id = ensure_user(&pool, "staff@example.com", "staff1234", "staff").await?;
    let guest_user_id = ensure_user(&pool, "guest@example.com", "guest1234", "customer").await?;

    let staff_id = ensure_staff(&pool, staff_user_id, "Front Desk", "staff@example.com").await?;
    ensure_customer(&pool, guest_user_id, "Demo Guest", "guest@example.com").await?;
    seed_rooms(&pool).await?;
    seed_services(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}, Staff ID: {staff_id}, Guest user ID: {guest_user_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let row: (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(row.0)
}

async fn ensure_staff(
    pool: &sqlx::PgPool,
    user_id: Uuid,
    full_name: &str,
    email: &str,
) -> anyhow::Result<Uuid> {
    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM staff WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }

    let row: (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO staff (id, user_id, full_name, email, position, hired_on)
        VALUES ($1, $2, $3, $4, 'reception', CURRENT_DATE)
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(full_name)
    .bind(email)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

async fn ensure_customer(
    pool: &sqlx::PgPool,
    user_id: Uuid,
    full_name: &str,
    email: &str,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO customers (id, user_id, full_name, email)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(full_name)
    .bind(email)
    .execute(pool)
    .await?;
    Ok(())
}

async fn seed_rooms(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let rooms = vec![
        ("101", "standard", 2, 800_000_i64, "Queen bed, garden view"),
        ("102", "standard", 2, 800_000, "Twin beds, garden view"),
        ("201", "deluxe", 3, 1_200_000, "King bed, balcony"),
        ("301", "family", 5, 1_800_000, "Two bedrooms, kitchenette"),
        ("501", "suite", 4, 3_500_000, "Top floor suite with lounge"),
    ];

    for (name, room_type, capacity, rate, desc) in rooms {
        sqlx::query(
            r#"
            INSERT INTO rooms (id, name, room_type, capacity, nightly_rate, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(room_type)
        .bind(capacity)
        .bind(rate)
        .bind(desc)
        .execute(pool)
        .await?;
    }

    println!("Seeded rooms");
    Ok(())
}

async fn seed_services(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let services = vec![
        ("Breakfast buffet", "Served 06:30 - 10:00", 150_000_i64),
        ("Airport transfer", "One way, up to 4 guests", 350_000),
        ("Laundry", "Per bag, next-day return", 100_000),
        ("Spa massage", "60 minutes", 500_000),
    ];

    for (name, desc, fee) in services {
        sqlx::query(
            r#"
            INSERT INTO services (id, name, description, fee)
            SELECT $1, $2, $3, $4
            WHERE NOT EXISTS (SELECT 1 FROM services WHERE name = $2)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(desc)
        .bind(fee)
        .execute(pool)
        .await?;
    }

    println!("Seeded services");
    Ok(())
}
