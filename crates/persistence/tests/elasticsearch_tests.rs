//! Elasticsearch backend integration tests.
//!
//! These tests verify the Elasticsearch backend implementation.
//! Tests that require a running Elasticsearch instance use testcontainers
//! to spin up real ES instances in Docker.
//!
//! Run with: `cargo test -p roster-persistence --features elasticsearch -- elasticsearch`

#![cfg(feature = "elasticsearch")]

use roster_persistence::backends::elasticsearch::schema::create_index_mapping;
use roster_persistence::backends::elasticsearch::{
    ElasticsearchAuth, ElasticsearchBackend, ElasticsearchConfig,
};
use roster_persistence::core::{Backend, BackendCapability, BackendKind};

// ============================================================================
// Backend Configuration Tests (no ES instance required)
// ============================================================================

#[test]
fn test_elasticsearch_config_defaults() {
    let config = ElasticsearchConfig::default();
    assert_eq!(config.nodes, vec!["http://localhost:9200".to_string()]);
    assert_eq!(config.index, "employee");
    assert_eq!(config.number_of_shards, 1);
    assert_eq!(config.number_of_replicas, 1);
    assert!(config.refresh_on_write);
    assert!(config.auth.is_none());
}

#[test]
fn test_elasticsearch_config_serialization() {
    let config = ElasticsearchConfig {
        nodes: vec!["http://es1:9200".to_string(), "http://es2:9200".to_string()],
        index: "staff".to_string(),
        auth: Some(ElasticsearchAuth::Basic {
            username: "elastic".to_string(),
            password: "changeme".to_string(),
        }),
        ..Default::default()
    };

    let json = serde_json::to_string(&config).unwrap();
    let deserialized: ElasticsearchConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized.nodes, config.nodes);
    assert_eq!(deserialized.index, "staff");
    assert!(matches!(
        deserialized.auth,
        Some(ElasticsearchAuth::Basic { ref username, .. }) if username == "elastic"
    ));
}

#[test]
fn test_elasticsearch_config_partial_json_uses_defaults() {
    let config: ElasticsearchConfig =
        serde_json::from_str(r#"{ "nodes": ["http://search:9200"] }"#).unwrap();
    assert_eq!(config.index, "employee");
    assert_eq!(config.refresh_interval, "1s");
    assert!(config.refresh_on_write);
}

#[test]
fn test_backend_creation() {
    let config = ElasticsearchConfig::default();
    // This just creates the client; nothing is sent.
    let backend = ElasticsearchBackend::new(config);
    assert!(backend.is_ok());

    let backend = backend.unwrap();
    assert_eq!(backend.kind(), BackendKind::Elasticsearch);
    assert_eq!(backend.name(), "elasticsearch");
    assert_eq!(backend.index(), "employee");
}

#[test]
fn test_backend_rejects_invalid_url() {
    let config = ElasticsearchConfig {
        nodes: vec!["not a url".to_string()],
        ..Default::default()
    };
    let err = ElasticsearchBackend::new(config).unwrap_err();
    assert!(err.is_unavailable());
}

#[test]
fn test_backend_capabilities() {
    let backend = ElasticsearchBackend::new(ElasticsearchConfig::default()).unwrap();

    assert!(backend.supports(BackendCapability::Crud));
    assert!(backend.supports(BackendCapability::FullTextSearch));
    assert!(backend.supports(BackendCapability::Aggregations));
    assert!(backend.supports(BackendCapability::Scroll));
}

#[test]
fn test_index_mapping_uses_config() {
    let config = ElasticsearchConfig {
        number_of_shards: 3,
        number_of_replicas: 0,
        ..Default::default()
    };
    let mapping = create_index_mapping(&config);

    assert_eq!(mapping["settings"]["number_of_shards"], 3);
    assert_eq!(mapping["settings"]["number_of_replicas"], 0);
    assert_eq!(
        mapping["mappings"]["properties"]["lastName"]["fields"]["keyword"]["type"],
        "keyword"
    );
    assert_eq!(mapping["mappings"]["properties"]["salary"]["type"], "integer");
}

// ============================================================================
// Query Builder Unit Tests (no ES instance required)
// ============================================================================

mod query_builder_tests {
    use roster_persistence::backends::elasticsearch::search::query_builder::EsQueryBuilder;
    use roster_persistence::search::queries;
    use serde_json::json;

    fn builder() -> EsQueryBuilder {
        EsQueryBuilder::new("employee")
    }

    #[test]
    fn test_name_lookup_body() {
        let es_query = builder().build(&queries::by_last_name_and_first_name("Doe", "John"));

        assert_eq!(es_query.index, "employee");
        assert_eq!(
            es_query.body["query"],
            json!({
                "bool": {
                    "must": [
                        { "term": { "lastName.keyword": { "value": "Doe" } } },
                        { "term": { "firstName.keyword": { "value": "John" } } }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_interests_body_pages_and_tracks_totals() {
        let es_query = builder().build(&queries::by_interests(&["reading", "music"]));

        assert_eq!(
            es_query.body["query"],
            json!({ "match": { "interests": { "query": "reading,music" } } })
        );
        assert_eq!(es_query.body["size"], 10);
        assert_eq!(es_query.body["from"], 0);
        assert_eq!(es_query.body["track_total_hits"], true);
    }

    #[test]
    fn test_address_body_projects_source() {
        let es_query = builder().build(&queries::by_address("Baker Street"));
        assert_eq!(
            es_query.body["_source"],
            json!(["firstName", "lastName", "address"])
        );
    }

    #[test]
    fn test_salary_histogram_body() {
        let es_query = builder().build(&queries::salary_histogram_by_gender());

        assert_eq!(es_query.body["size"], 0);
        let gender = &es_query.body["aggs"][queries::GENDER_AGG];
        assert_eq!(gender["terms"]["field"], "gender.keyword");
        assert_eq!(
            gender["aggs"][queries::SALARY_BUCKETS_AGG]["histogram"],
            json!({ "field": "salary", "interval": 10000.0 })
        );
    }

    #[test]
    fn test_retirement_body_uses_should() {
        let es_query = builder().build(&queries::retiring_within_year());

        let should = es_query.body["query"]["bool"]["should"].as_array().unwrap();
        assert_eq!(should.len(), 2);
        assert!(es_query.body["query"]["bool"].get("must").is_none());
        assert_eq!(
            should[0]["bool"]["must"][0],
            json!({ "term": { "age": { "value": 59 } } })
        );
        assert_eq!(
            should[1]["bool"]["must"][1],
            json!({ "term": { "gender.keyword": { "value": "Male" } } })
        );
    }

    #[test]
    fn test_reindex_scan_body() {
        let es_query = builder().build_scroll(&queries::reindex_scan());

        assert_eq!(es_query.body["query"], json!({ "match_all": {} }));
        assert_eq!(es_query.body["size"], 1000);
        assert_eq!(es_query.body["_source"], json!(["message"]));
        assert!(es_query.body.get("from").is_none());
    }
}

// ============================================================================
// Integration Tests (requires Docker for testcontainers)
// ============================================================================

/// Integration tests that require a real Elasticsearch instance via testcontainers.
///
/// Run with:
///   cargo test -p roster-persistence --features elasticsearch -- --ignored es_integration
#[cfg(test)]
mod es_integration {
    use std::sync::Arc;

    use roster_persistence::backends::elasticsearch::schema::delete_index;
    use roster_persistence::backends::elasticsearch::{ElasticsearchBackend, ElasticsearchConfig};
    use roster_persistence::core::{Backend, ScrollProvider, SearchProvider};
    use roster_persistence::error::{SearchError, StorageError};
    use roster_persistence::search::{EmployeeService, queries};
    use roster_persistence::types::Employee;

    use testcontainers::ImageExt;
    use testcontainers::runners::AsyncRunner;
    use testcontainers_modules::elastic_search::ElasticSearch;
    use tokio::sync::OnceCell;

    /// Shared Elasticsearch container reused across all tests in this module.
    struct SharedEs {
        host: String,
        port: u16,
        /// Kept alive for the duration of the test binary; dropped at process exit.
        _container: testcontainers::ContainerAsync<ElasticSearch>,
    }

    static SHARED_ES: OnceCell<SharedEs> = OnceCell::const_new();

    async fn shared_es() -> &'static SharedEs {
        SHARED_ES
            .get_or_init(|| async {
                let run_id = std::env::var("GITHUB_RUN_ID").unwrap_or_default();
                let container = ElasticSearch::default()
                    .with_env_var("ES_JAVA_OPTS", "-Xms256m -Xmx256m")
                    .with_label("github.run_id", &run_id)
                    .with_startup_timeout(std::time::Duration::from_secs(120))
                    .start()
                    .await
                    .expect("Failed to start Elasticsearch container");

                let port = container
                    .get_host_port_ipv4(9200)
                    .await
                    .expect("Failed to get host port");

                let host = container
                    .get_host()
                    .await
                    .expect("Failed to get host")
                    .to_string();

                SharedEs {
                    host,
                    port,
                    _container: container,
                }
            })
            .await
    }

    /// Creates a backend on the shared instance with a unique index per test.
    async fn create_backend() -> Arc<ElasticsearchBackend> {
        let es = shared_es().await;

        let config = ElasticsearchConfig {
            nodes: vec![format!("http://{}:{}", es.host, es.port)],
            index: format!("employee_{}", uuid::Uuid::new_v4().simple()),
            number_of_replicas: 0,
            refresh_interval: "1ms".to_string(),
            ..Default::default()
        };

        let backend = ElasticsearchBackend::new(config).expect("Failed to create backend");
        backend
            .initialize()
            .await
            .expect("Failed to initialize ES backend");

        Arc::new(backend)
    }

    fn person(first: &str, last: &str, gender: &str, age: i32, salary: i32) -> Employee {
        Employee::new(first, last)
            .with_gender(gender)
            .with_age(age)
            .with_salary(salary)
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn es_integration_health_and_initialize_twice() {
        let backend = create_backend().await;
        backend.health_check().await.unwrap();
        // Index already exists; second initialize is a no-op.
        backend.initialize().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn es_integration_save_and_fetch() {
        let service = EmployeeService::new(create_backend().await);

        let saved = service
            .save_employee(person("John", "Doe", "Male", 30, 50_000).with_interests(["chess"]))
            .await
            .unwrap();
        let id = saved.id.clone().unwrap();

        let fetched = service.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(fetched, saved);

        assert!(service.find_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn es_integration_save_with_id_overwrites() {
        let service = EmployeeService::new(create_backend().await);

        service
            .save_employee(Employee::new("John", "Doe").with_id("e-1").with_age(30))
            .await
            .unwrap();
        service
            .save_employee(Employee::new("John", "Doe").with_id("e-1").with_age(31))
            .await
            .unwrap();

        let found = service.employees_by_name("Doe", None).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].age, Some(31));
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn es_integration_name_and_text_lookups() {
        let service = EmployeeService::new(create_backend().await);
        for employee in [
            Employee::new("John", "Doe")
                .with_address("12 Baker Street")
                .with_interests(["reading", "music"]),
            Employee::new("Jane", "Doe").with_interests(["music"]),
            Employee::new("John", "Smith").with_address("3 Elm Road"),
        ] {
            service.save_employee(employee).await.unwrap();
        }

        assert_eq!(service.employees_by_name("Doe", None).await.unwrap().len(), 2);
        assert_eq!(
            service
                .employees_by_name("Doe", Some("John"))
                .await
                .unwrap()
                .len(),
            1
        );

        let hits = service.by_interests(&["music"]).await.unwrap();
        assert_eq!(hits.total_hits, 2);

        let addresses = service.by_address("baker").await.unwrap();
        assert_eq!(addresses.len(), 1);
        assert!(addresses[0].source.get("salary").is_none());
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn es_integration_aggregations() {
        let service = EmployeeService::new(create_backend().await);
        for employee in [
            person("A", "X", "Female", 59, 15_000),
            person("B", "X", "Female", 60, 32_000),
            person("C", "X", "Male", 64, 40_000),
            person("D", "X", "Male", 30, 60_000),
        ] {
            service.save_employee(employee).await.unwrap();
        }

        let avg_age = service.average_age().await.unwrap().unwrap();
        assert!((avg_age - 53.25).abs() < f64::EPSILON);

        let averages = service.average_salary_by_gender().await.unwrap();
        let male = averages.iter().find(|a| a.gender == "Male").unwrap();
        assert_eq!(male.average_salary, Some(50_000.0));

        let histograms = service.salary_histogram_by_gender().await.unwrap();
        let female = histograms.iter().find(|h| h.gender == "Female").unwrap();
        let keys: Vec<f64> = female.buckets.iter().map(|b| b.key).collect();
        assert_eq!(keys, vec![10_000.0, 20_000.0, 30_000.0]);

        assert_eq!(service.retiring_within_year().await.unwrap(), 2);
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn es_integration_reindex_clears_scroll() {
        let backend = create_backend().await;
        let service = EmployeeService::new(Arc::clone(&backend));
        for i in 0..3 {
            service
                .save_employee(Employee::new(format!("E{}", i), "Scan"))
                .await
                .unwrap();
        }

        let report = service.reindex().await.unwrap();
        assert_eq!(report.documents_scanned, 3);
        assert_eq!(report.pages_fetched, 2);
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn es_integration_cleared_scroll_is_gone() {
        let backend = create_backend().await;
        backend
            .search(&queries::average_age())
            .await
            .expect("search on empty index");

        let page = backend
            .open_scroll(&queries::reindex_scan(), Default::default())
            .await
            .unwrap();
        let scroll_id = page.scroll_id.clone();
        backend.clear_scroll(&scroll_id).await.unwrap();

        let err = backend
            .continue_scroll(&scroll_id, Default::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StorageError::Search(SearchError::ScrollNotFound { .. })
        ));

        delete_index(&backend).await.unwrap();
    }
}
