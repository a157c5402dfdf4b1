//! Runs only when DATABASE_URL points at a disposable Postgres database.

use restaurant_hub::domain::model::{NewMenuItem, RestaurantInput, UserId};
use restaurant_hub::domain::query::{FilterDescriptor, Operator, SortDescriptor};
use restaurant_hub::storage::PgStorage;
use restaurant_hub::Services;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn postgres_roundtrip() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let Ok(url) = std::env::var("DATABASE_URL") else {
        println!("DATABASE_URL not set, skipping postgres_roundtrip");
        return Ok(());
    };

    let storage = PgStorage::connect(&url, 2).await?;
    storage.apply_schema().await?;
    let services = Services::new(Arc::new(storage));

    // Unique per run so the test can be repeated against the same database.
    let tag = chrono::Utc::now().timestamp_micros();
    let name = format!("Bistro {}", tag % 1_000_000_000);
    let owner = UserId(tag);

    let restaurant = services
        .restaurants
        .create(
            owner,
            RestaurantInput {
                name: name.clone(),
                address: "Rua dos Testes, 1".to_string(),
                cuisine_type_id: None,
                opening_hours: "09:00-17:00".to_string(),
            },
        )
        .await?;
    let restaurant_id = restaurant.id.expect("persisted restaurant has an id");

    for (item, price) in [("Quiche", 18.0), ("Croissant", 7.5), ("Ratatouille", 32.0)] {
        services
            .menu_items
            .create(
                owner,
                NewMenuItem {
                    restaurant_id,
                    name: item.to_string(),
                    description: String::new(),
                    price,
                    dine_in_only: false,
                    photo_path: None,
                },
            )
            .await?;
    }

    let page = services
        .menu_items
        .list_page(
            0,
            2,
            vec![
                FilterDescriptor::new("restaurant_id", restaurant_id.to_string(), Operator::Equals)?,
                FilterDescriptor::new("price", "5,20", Operator::Between)?,
            ],
            vec![SortDescriptor::asc("name")?],
        )
        .await?;
    assert_eq!(page.total_elements, 2);
    let names: Vec<_> = page.content.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Croissant", "Quiche"]);

    let err = services
        .restaurants
        .update(
            UserId(tag + 1),
            restaurant_id,
            RestaurantInput {
                name: "Intruso".to_string(),
                address: "Rua dos Testes, 2".to_string(),
                cuisine_type_id: None,
                opening_hours: "09:00-17:00".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_forbidden());

    let stored = services.restaurants.get(restaurant_id).await?;
    assert_eq!(stored.name, name);
    assert_eq!(stored.owner_id, Some(owner));
    Ok(())
}
