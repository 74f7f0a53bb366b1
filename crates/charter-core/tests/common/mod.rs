use charter_core::{GatewayBuilder, SqliteGateway};
use tempfile::TempDir;

/// Helper function to create a gateway over a fresh temporary database
pub async fn create_test_gateway() -> (TempDir, SqliteGateway) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let gateway = GatewayBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create gateway");
    (temp_dir, gateway)
}
