//! Tables backing the Postgres adapter. Every statement is idempotent.

pub const STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS cuisine_types (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT
    )",
    "CREATE TABLE IF NOT EXISTS user_roles (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        active BOOLEAN NOT NULL DEFAULT TRUE,
        editable BOOLEAN NOT NULL DEFAULT TRUE,
        is_owner BOOLEAN NOT NULL DEFAULT FALSE,
        restaurant_id BIGINT
    )",
    "CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        login TEXT NOT NULL UNIQUE,
        role_id BIGINT REFERENCES user_roles (id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
    "CREATE TABLE IF NOT EXISTS restaurants (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        address TEXT NOT NULL,
        cuisine_type_id BIGINT REFERENCES cuisine_types (id),
        opening_hours TEXT NOT NULL,
        owner_id BIGINT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
    "CREATE TABLE IF NOT EXISTS menu_items (
        id BIGSERIAL PRIMARY KEY,
        restaurant_id BIGINT REFERENCES restaurants (id),
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        price DOUBLE PRECISION NOT NULL CHECK (price > 0),
        dine_in_only BOOLEAN NOT NULL DEFAULT FALSE,
        photo_path TEXT
    )",
    "CREATE INDEX IF NOT EXISTS idx_menu_items_restaurant ON menu_items (restaurant_id)",
    "CREATE INDEX IF NOT EXISTS idx_user_roles_restaurant ON user_roles (restaurant_id)",
    "CREATE INDEX IF NOT EXISTS idx_restaurants_owner ON restaurants (owner_id)",
];
