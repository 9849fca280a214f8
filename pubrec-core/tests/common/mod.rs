//! Shared fixture: a temp-dir SQLite store seeded with a testnet snapshot.

#![allow(dead_code)]

use pubrec_core::db::{create_pool, schema};
use pubrec_core::{PublicRecord, StoreConfig};
use tempfile::TempDir;

pub const SEED: &str = include_str!("../fixtures/seed.sql");

pub const SUN_TXID: &str = "f7800712c20377c2d29680c1aecf2331d6f80f5a44510d30ceb2e30fd5dafdcf";
pub const MIND_TXID: &str = "933c592a1a22b41a9a692aba57da649c91fe32403e8ff7b13f452071aa9820b9";
pub const BANNED_TXID: &str = "b0a1ba6e40d8f35aac526eecbc05d82b2a6d3c8d6a316627f593cbe592a777be";
pub const ENCODED_TXID: &str = "5ed76ba84d4116045df14ecf7a7eca86300a649ef3cbefdd2eeea3f84e1432dc";
pub const NIL_TXID: &str = "126484de57d01ab12ae19dfc7c4eb74087e6abb8e749badecc75d570ad577fa3";
pub const RECENT_TXID: &str = "5df96dcb607701d19f7ae3a5da2708d834df7dc8ff505d74aa27dc82aeb7b3c1";

pub const GENESIS_HASH: &str = "000000000933ea01ad0ee984209779baaec3ced90fa3f408719526f8d77f4943";
pub const MIND_BLOCK: &str = "00000000000016b6ff59b9fffcade68943bb02270b46d2a001054d95c56ca8ad";
pub const EMPTY_BLOCK: &str = "00000000efaee711979fe42e667188e50b1096e4d9cfcbc9a82101336189c2ca";
pub const BANNED_BLOCK: &str = "00000000777213b4fd7c5d5a71b9b52608356c4194203b1b63d1bb0e6141d17d";

pub const MIUD: &str = "miUDcP8obUKPhqkrBrQz57sbSg2Mz1kZXH";
pub const ENCODED_BOARD: &str = "#!~*Enc ded-boÄ&\\/Ӂ";
pub const ENCODED_BOARD_URL: &str = "%23%21~%2AEnc%20ded-bo%C3%84&%5C/%D3%81";

/// Create an empty store with the schema applied. Returns the temp dir so
/// the file outlives the test.
pub async fn empty_store() -> (TempDir, StoreConfig) {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = StoreConfig {
        read_only: false,
        ..StoreConfig::new(dir.path().join("pubrecord.db"))
    };

    let pool = create_pool(&config).await.expect("create pool");
    schema::apply(&pool).await.expect("apply schema");
    pool.close().await;

    (dir, StoreConfig {
        read_only: true,
        ..config
    })
}

/// Run extra SQL against the store behind `config` with a writable pool.
pub async fn execute(config: &StoreConfig, sql: &str) {
    let writable = StoreConfig {
        read_only: false,
        ..config.clone()
    };
    let pool = create_pool(&writable).await.expect("create pool");
    sqlx::raw_sql(sql).execute(&pool).await.expect("execute sql");
    pool.close().await;
}

/// Seeded store opened read-only, the way the server opens it.
pub async fn seeded_record() -> (TempDir, PublicRecord) {
    let (dir, config) = empty_store().await;
    execute(&config, SEED).await;
    let record = PublicRecord::open(&config).await.expect("open record");
    (dir, record)
}
