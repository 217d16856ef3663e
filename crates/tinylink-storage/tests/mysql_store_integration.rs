use tinylink_core::ShortCode;
use tinylink_storage::{LinkStore, MySqlStore, StorageError};
use tinylink_test_infra::mysql::{MySqlServer, MysqlConfig};

struct Fixture {
    _mysql: MySqlServer,
    store: MySqlStore,
}

impl Fixture {
    async fn start() -> Self {
        let mysql = MySqlServer::start(MysqlConfig::default())
            .await
            .expect("start mysql");
        let pool = mysql.connect(16).await.expect("connect mysql");

        let store = MySqlStore::new(pool);
        store.ensure_schema().await.expect("create schema");

        Self {
            _mysql: mysql,
            store,
        }
    }
}

fn code(value: &str) -> ShortCode {
    ShortCode::new_unchecked(value)
}

#[tokio::test]
async fn create_and_get_round_trip() {
    let fixture = Fixture::start().await;
    let short_code = code("abc123");

    let created = fixture
        .store
        .create(&short_code, "https://example.com")
        .await
        .unwrap();
    assert_eq!(created.total_clicks, 0);
    assert_eq!(created.last_clicked_at, None);

    let got = fixture.store.get(&short_code).await.unwrap().unwrap();
    assert_eq!(got.target_url, "https://example.com");
    assert_eq!(got.total_clicks, 0);
    assert_eq!(got.last_clicked_at, None);
    assert_eq!(got.created_at, created.created_at);
}

#[tokio::test]
async fn create_conflicts_when_code_already_exists() {
    let fixture = Fixture::start().await;
    let short_code = code("abc123");

    fixture
        .store
        .create(&short_code, "https://one.example")
        .await
        .unwrap();

    let err = fixture
        .store
        .create(&short_code, "https://two.example")
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Conflict(_)));

    let got = fixture.store.get(&short_code).await.unwrap().unwrap();
    assert_eq!(got.target_url, "https://one.example");
}

#[tokio::test]
async fn codes_differing_only_in_case_are_distinct() {
    let fixture = Fixture::start().await;

    fixture
        .store
        .create(&code("abcdef"), "https://lower.example")
        .await
        .unwrap();
    fixture
        .store
        .create(&code("ABCDEF"), "https://upper.example")
        .await
        .unwrap();

    let upper = fixture.store.get(&code("ABCDEF")).await.unwrap().unwrap();
    assert_eq!(upper.target_url, "https://upper.example");
}

#[tokio::test]
async fn concurrent_resolves_count_every_click() {
    let fixture = Fixture::start().await;
    let short_code = code("hot123");

    fixture
        .store
        .create(&short_code, "https://example.com")
        .await
        .unwrap();

    let mut handles = vec![];
    for _ in 0..64 {
        let store = fixture.store.clone();
        let short_code = short_code.clone();
        handles.push(tokio::spawn(async move {
            store.resolve_and_increment(&short_code).await.unwrap().unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let got = fixture.store.get(&short_code).await.unwrap().unwrap();
    assert_eq!(got.total_clicks, 64);
    assert!(got.last_clicked_at.is_some());
}

#[tokio::test]
async fn resolve_missing_code_returns_none() {
    let fixture = Fixture::start().await;

    let got = fixture
        .store
        .resolve_and_increment(&code("nope12"))
        .await
        .unwrap();
    assert!(got.is_none());
}

#[tokio::test]
async fn delete_then_recreate_resets_counters() {
    let fixture = Fixture::start().await;
    let short_code = code("reuse1");

    fixture
        .store
        .create(&short_code, "https://old.example")
        .await
        .unwrap();
    fixture
        .store
        .resolve_and_increment(&short_code)
        .await
        .unwrap();

    assert!(fixture.store.delete(&short_code).await.unwrap());
    assert!(fixture.store.get(&short_code).await.unwrap().is_none());
    assert!(!fixture.store.delete(&short_code).await.unwrap());

    let recreated = fixture
        .store
        .create(&short_code, "https://new.example")
        .await
        .unwrap();
    assert_eq!(recreated.total_clicks, 0);

    let got = fixture.store.get(&short_code).await.unwrap().unwrap();
    assert_eq!(got.target_url, "https://new.example");
    assert_eq!(got.last_clicked_at, None);
}

#[tokio::test]
async fn list_returns_newest_first() {
    let fixture = Fixture::start().await;

    for value in ["first1", "second", "third3"] {
        fixture
            .store
            .create(&code(value), "https://example.com")
            .await
            .unwrap();
    }

    let codes: Vec<String> = fixture
        .store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|link| link.code.to_string())
        .collect();
    assert_eq!(codes, vec!["third3", "second", "first1"]);
}
