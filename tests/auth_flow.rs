//! End-to-end authentication and quota scenarios.

use std::collections::HashMap;
use std::sync::atomic::Ordering;
use std::time::Duration;

use axum::http::StatusCode;

mod common;

const LAUNCHER_TOKEN: &str = "AbCd1234EfGh5678";

fn one_valid_token() -> HashMap<String, (String, String)> {
    let mut valid = HashMap::new();
    valid.insert(
        "ms-access-token".to_string(),
        ("069a79f444e94726a5befca90e38aaf5".to_string(), "Notch".to_string()),
    );
    valid
}

#[tokio::test]
async fn test_no_credentials_is_401() {
    let data_dir = common::write_fixture_data();
    let addr = common::start_api(common::test_config(&data_dir)).await;

    let res = common::client()
        .get(format!("http://{addr}/v1/modpacks/list"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Unauthorized");

    std::fs::remove_dir_all(data_dir).ok();
}

#[tokio::test]
async fn test_launcher_token_is_accepted() {
    let data_dir = common::write_fixture_data();
    let addr = common::start_api(common::test_config(&data_dir)).await;

    let res = common::client()
        .get(format!("http://{addr}/v1/modpacks/list"))
        .header("x-lk-token", LAUNCHER_TOKEN)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);

    // The alternate header name works too
    let res = common::client()
        .get(format!("http://{addr}/v1/modpacks/list"))
        .header("x-luminakraft-token", LAUNCHER_TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    std::fs::remove_dir_all(data_dir).ok();
}

#[tokio::test]
async fn test_malformed_launcher_token_is_401() {
    let data_dir = common::write_fixture_data();
    let addr = common::start_api(common::test_config(&data_dir)).await;

    for bad in ["short", "has spaces in it!", "invalid+chars=="] {
        let res = common::client()
            .get(format!("http://{addr}/v1/modpacks/list"))
            .header("x-lk-token", bad)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "token {bad:?}");
    }

    std::fs::remove_dir_all(data_dir).ok();
}

#[tokio::test]
async fn test_verified_bearer_is_cached() {
    let data_dir = common::write_fixture_data();
    let verifier = common::start_mock_verifier(one_valid_token()).await;

    let mut config = common::test_config(&data_dir);
    config.auth.verify_url = verifier.profile_url();
    let addr = common::start_api(config).await;

    for _ in 0..3 {
        let res = common::client()
            .get(format!("http://{addr}/v1/modpacks/list"))
            .header("authorization", "Bearer ms-access-token")
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    // One remote verification, two cache hits
    assert_eq!(verifier.calls.load(Ordering::SeqCst), 1);

    std::fs::remove_dir_all(data_dir).ok();
}

#[tokio::test]
async fn test_expired_cache_entry_reverifies() {
    let data_dir = common::write_fixture_data();
    let verifier = common::start_mock_verifier(one_valid_token()).await;

    let mut config = common::test_config(&data_dir);
    config.auth.verify_url = verifier.profile_url();
    config.auth.cache_ttl_secs = 1;
    let addr = common::start_api(config).await;

    let send = || {
        common::client()
            .get(format!("http://{addr}/v1/modpacks/list"))
            .header("authorization", "Bearer ms-access-token")
            .send()
    };

    assert_eq!(send().await.unwrap().status(), StatusCode::OK);
    assert_eq!(verifier.calls.load(Ordering::SeqCst), 1);

    tokio::time::sleep(Duration::from_millis(1_200)).await;

    assert_eq!(send().await.unwrap().status(), StatusCode::OK);
    assert_eq!(verifier.calls.load(Ordering::SeqCst), 2);

    std::fs::remove_dir_all(data_dir).ok();
}

#[tokio::test]
async fn test_rejected_bearer_falls_back_to_launcher_token() {
    let data_dir = common::write_fixture_data();
    // Verifier that accepts nothing
    let verifier = common::start_mock_verifier(HashMap::new()).await;

    let mut config = common::test_config(&data_dir);
    config.auth.verify_url = verifier.profile_url();
    let addr = common::start_api(config).await;

    let res = common::client()
        .get(format!("http://{addr}/v1/modpacks/list"))
        .header("authorization", "Bearer expired-ms-token")
        .header("x-lk-token", LAUNCHER_TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Without the fallback header both paths fail
    let res = common::client()
        .get(format!("http://{addr}/v1/modpacks/list"))
        .header("authorization", "Bearer expired-ms-token")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    std::fs::remove_dir_all(data_dir).ok();
}

#[tokio::test]
async fn test_unreachable_verifier_falls_back_to_launcher_token() {
    let data_dir = common::write_fixture_data();

    let mut config = common::test_config(&data_dir);
    // Nothing listens here; the verification call fails fast
    config.auth.verify_url = "http://127.0.0.1:9/minecraft/profile".to_string();
    let addr = common::start_api(config).await;

    let res = common::client()
        .get(format!("http://{addr}/v1/modpacks/list"))
        .header("authorization", "Bearer anything")
        .header("x-lk-token", LAUNCHER_TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    std::fs::remove_dir_all(data_dir).ok();
}

#[tokio::test]
async fn test_quota_exhaustion_returns_429_with_retry_after() {
    let data_dir = common::write_fixture_data();
    let mut config = common::test_config(&data_dir);
    config.rate_limit.max_requests = 3;
    let addr = common::start_api(config).await;

    for _ in 0..3 {
        let res = common::client()
            .get(format!("http://{addr}/v1/modpacks/list"))
            .header("x-lk-token", LAUNCHER_TOKEN)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res = common::client()
        .get(format!("http://{addr}/v1/modpacks/list"))
        .header("x-lk-token", LAUNCHER_TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);

    let retry_after: u64 = res
        .headers()
        .get("retry-after")
        .unwrap()
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!((1..=60).contains(&retry_after));

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["resetInSeconds"], retry_after);

    std::fs::remove_dir_all(data_dir).ok();
}

#[tokio::test]
async fn test_quota_is_per_identity() {
    let data_dir = common::write_fixture_data();
    let mut config = common::test_config(&data_dir);
    config.rate_limit.max_requests = 1;
    let addr = common::start_api(config).await;

    let send = |token: &'static str| {
        common::client()
            .get(format!("http://{addr}/v1/modpacks/list"))
            .header("x-lk-token", token)
            .send()
    };

    assert_eq!(send(LAUNCHER_TOKEN).await.unwrap().status(), StatusCode::OK);
    assert_eq!(
        send("ZzYy9876WwVv5432").await.unwrap().status(),
        StatusCode::OK
    );
    assert_eq!(
        send(LAUNCHER_TOKEN).await.unwrap().status(),
        StatusCode::TOO_MANY_REQUESTS
    );

    std::fs::remove_dir_all(data_dir).ok();
}

#[tokio::test]
async fn test_quota_window_rollover() {
    let data_dir = common::write_fixture_data();
    let mut config = common::test_config(&data_dir);
    config.rate_limit.window_ms = 500;
    config.rate_limit.max_requests = 1;
    let addr = common::start_api(config).await;

    let send = || {
        common::client()
            .get(format!("http://{addr}/v1/modpacks/list"))
            .header("x-lk-token", LAUNCHER_TOKEN)
            .send()
    };

    assert_eq!(send().await.unwrap().status(), StatusCode::OK);
    assert_eq!(
        send().await.unwrap().status(),
        StatusCode::TOO_MANY_REQUESTS
    );

    tokio::time::sleep(Duration::from_millis(700)).await;
    assert_eq!(send().await.unwrap().status(), StatusCode::OK);

    std::fs::remove_dir_all(data_dir).ok();
}
