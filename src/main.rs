use dotenvy::dotenv;

use lonca::logging::init_tracing;
use lonca::router::init_router;
use lonca::state::init_app_state;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    // Bootstrap commands run against the database and exit.
    match args.get(1).map(String::as_str) {
        Some("create-admin") => {
            handle_create_admin(args).await;
            return;
        }
        Some("seed-matrix") => {
            handle_seed_matrix().await;
            return;
        }
        _ => {}
    }

    // Normal server startup
    init_tracing();

    let state = init_app_state().await;
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    println!("Server running on http://localhost:3000");
    println!("Swagger UI available at http://localhost:3000/swagger-ui");
    println!("Scalar UI available at http://localhost:3000/scalar");
    axum::serve(listener, app).await.unwrap();
}

async fn connect_pool() -> sqlx::PgPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

async fn handle_create_admin(args: Vec<String>) {
    if args.len() != 7 {
        eprintln!(
            "Usage: {} create-admin <first_name> <last_name> <email> <password> <role>",
            args[0]
        );
        std::process::exit(1);
    }

    let pool = connect_pool().await;

    match lonca::cli::create_admin(&pool, &args[2], &args[3], &args[4], &args[5], &args[6]).await {
        Ok(()) => {
            println!("Admin member created successfully.");
            println!("   Email: {}", args[4]);
            println!("   Role:  {}", args[6]);
        }
        Err(e) => {
            eprintln!("Error creating admin member: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed_matrix() {
    let pool = connect_pool().await;

    match lonca::cli::seed_matrix(&pool).await {
        Ok(()) => println!("Default role-permission matrix seeded."),
        Err(e) => {
            eprintln!("Error seeding matrix: {}", e);
            std::process::exit(1);
        }
    }
}
