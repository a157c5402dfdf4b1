use restaurant_hub::infra::{Config, StorageBackend};
use restaurant_hub::storage::{PgStorage, Storage};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--apply-schema]\n\
         \n\
         Reads env vars (or .env):\n\
           DATABASE_URL, STORAGE_BACKEND, DB_MAX_CONNECTIONS, BIND_ADDR\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let apply_schema = args.iter().any(|a| a == "--apply-schema");

    let config = Config::from_env()?;
    println!("> Preflight:");
    println!("  STORAGE_BACKEND={:?}", config.backend);
    println!("  DB_MAX_CONNECTIONS={}", config.max_connections);
    println!("  BIND_ADDR={}", config.bind_addr);

    let url = match (config.backend, config.database_url.as_deref()) {
        (StorageBackend::Postgres, Some(url)) => url,
        _ => {
            println!("  In-memory backend selected; nothing to check.");
            return Ok(());
        }
    };

    let storage = PgStorage::connect(url, 1).await?;
    storage.ping().await?;
    println!("  Postgres reachable.");

    if apply_schema {
        storage.apply_schema().await?;
        println!("  Schema applied.");
    } else {
        println!("  Schema untouched (pass --apply-schema to create missing tables).");
    }

    Ok(())
}
