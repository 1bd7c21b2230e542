use sesg_portal::config::{AppConfig, Env};
use serial_test::serial;
use std::env;

// These tests mutate process-wide environment variables, so they are
// serialized and restore nothing: each test sets everything it reads.

fn set(key: &str, value: &str) {
    unsafe { env::set_var(key, value) };
}

fn unset(key: &str) {
    unsafe { env::remove_var(key) };
}

#[test]
fn test_default_config_is_local() {
    let config = AppConfig::default();
    assert_eq!(config.env, Env::Local);
    assert_eq!(config.admin_username, "admin");
    assert_eq!(config.token_expire_minutes, 30);
    assert!(!config.jwt_secret.is_empty());
}

#[test]
#[serial]
fn test_load_reads_environment() {
    set("APP_ENV", "local");
    set("DATABASE_URL", "postgres://u:p@localhost:5432/sesg");
    set("ADMIN_USERNAME", "sesg-admin");
    set("ADMIN_PASSWORD", "swordfish");
    set("SECRET_KEY", "env-secret");
    set("ACCESS_TOKEN_EXPIRE_MINUTES", "45");

    let config = AppConfig::load();

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.db_url, "postgres://u:p@localhost:5432/sesg");
    assert_eq!(config.admin_username, "sesg-admin");
    assert_eq!(config.admin_password, "swordfish");
    assert_eq!(config.jwt_secret, "env-secret");
    assert_eq!(config.token_expire_minutes, 45);
}

#[test]
#[serial]
fn test_load_falls_back_on_defaults_in_local() {
    set("APP_ENV", "local");
    set("DATABASE_URL", "postgres://u:p@localhost:5432/sesg");
    unset("ADMIN_USERNAME");
    unset("ADMIN_PASSWORD");
    unset("SECRET_KEY");
    unset("ACCESS_TOKEN_EXPIRE_MINUTES");

    let config = AppConfig::load();

    assert_eq!(config.admin_username, "admin");
    assert_eq!(config.token_expire_minutes, 30);
    assert!(!config.admin_password.is_empty());
}

#[test]
#[serial]
fn test_load_ignores_unparseable_lifetime() {
    set("APP_ENV", "local");
    set("DATABASE_URL", "postgres://u:p@localhost:5432/sesg");
    set("ACCESS_TOKEN_EXPIRE_MINUTES", "soon");

    let config = AppConfig::load();

    assert_eq!(config.token_expire_minutes, 30);
}
