//! Shared helpers for unit tests.

use std::path::Path;

use crate::service::DeskService;

pub async fn test_service() -> DeskService {
    DeskService::new_local(":memory:", None, None).await.unwrap()
}

pub async fn test_service_with_trail(dir: &Path) -> DeskService {
    DeskService::new_local(":memory:", Some(dir.to_path_buf()), None)
        .await
        .unwrap()
}
