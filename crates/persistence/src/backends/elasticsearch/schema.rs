//! Elasticsearch index schema and mapping definitions.
//!
//! Name fields and gender are indexed twice: analyzed `text` for full-text
//! matching and a `keyword` sub-field for exact lookups and terms
//! aggregation. `lastName` and `gender` also enable fielddata on the text
//! form.

use elasticsearch::indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts};
use serde_json::{Value, json};

use crate::error::StorageResult;

use super::backend::{ElasticsearchBackend, ElasticsearchConfig, check_status, transport_error};

fn text_with_keyword(fielddata: bool) -> Value {
    let mut field = json!({
        "type": "text",
        "fields": {
            "keyword": { "type": "keyword", "ignore_above": 256 }
        }
    });
    if fielddata {
        field["fielddata"] = json!(true);
    }
    field
}

/// Creates the index settings and mapping for employee records.
pub fn create_index_mapping(config: &ElasticsearchConfig) -> Value {
    json!({
        "settings": {
            "number_of_shards": config.number_of_shards,
            "number_of_replicas": config.number_of_replicas,
            "refresh_interval": config.refresh_interval
        },
        "mappings": {
            "properties": {
                "firstName": text_with_keyword(false),
                "lastName": text_with_keyword(true),
                "designation": { "type": "text" },
                "salary": { "type": "integer" },
                "dateOfJoining": { "type": "date", "format": "yyyy-MM-dd" },
                "address": { "type": "text" },
                "gender": text_with_keyword(true),
                "age": { "type": "integer" },
                "maritalStatus": { "type": "text" },
                "interests": { "type": "text" }
            }
        }
    })
}

/// Ensures the employee index exists, creating it with the mapping if necessary.
pub async fn ensure_index(backend: &ElasticsearchBackend) -> StorageResult<()> {
    let index = backend.index();

    let exists_response = backend
        .client()
        .indices()
        .exists(IndicesExistsParts::Index(&[index]))
        .send()
        .await
        .map_err(transport_error)?;

    if exists_response.status_code().is_success() {
        return Ok(());
    }

    let response = backend
        .client()
        .indices()
        .create(IndicesCreateParts::Index(index))
        .body(create_index_mapping(backend.config()))
        .send()
        .await
        .map_err(transport_error)?;

    let status = response.status_code();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        // Another instance created it first
        if body.contains("resource_already_exists_exception") {
            return Ok(());
        }
        return Err(crate::error::StorageError::Backend(
            crate::error::BackendError::QueryError {
                status: status.as_u16(),
                message: format!("Failed to create index {}: {}", index, body),
            },
        ));
    }

    tracing::info!("Created Elasticsearch index '{}'", index);
    Ok(())
}

/// Deletes the employee index. A missing index is not an error.
pub async fn delete_index(backend: &ElasticsearchBackend) -> StorageResult<()> {
    let index = backend.index();

    let response = backend
        .client()
        .indices()
        .delete(IndicesDeleteParts::Index(&[index]))
        .send()
        .await
        .map_err(transport_error)?;

    if response.status_code().as_u16() == 404 {
        return Ok(());
    }
    check_status(response, "delete index").await?;

    tracing::debug!("Deleted Elasticsearch index '{}'", index);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_index_mapping_structure() {
        let config = ElasticsearchConfig::default();
        let mapping = create_index_mapping(&config);

        assert_eq!(mapping["settings"]["number_of_shards"], 1);
        assert_eq!(mapping["settings"]["number_of_replicas"], 1);

        let props = &mapping["mappings"]["properties"];
        assert_eq!(props["lastName"]["type"], "text");
        assert_eq!(props["lastName"]["fielddata"], true);
        assert_eq!(props["lastName"]["fields"]["keyword"]["type"], "keyword");
        assert_eq!(props["firstName"]["fields"]["keyword"]["type"], "keyword");
        assert!(props["firstName"].get("fielddata").is_none());
        assert_eq!(props["gender"]["fielddata"], true);
        assert_eq!(props["salary"]["type"], "integer");
        assert_eq!(props["age"]["type"], "integer");
        assert_eq!(props["dateOfJoining"]["type"], "date");
        assert_eq!(props["dateOfJoining"]["format"], "yyyy-MM-dd");
        assert_eq!(props["interests"]["type"], "text");
    }

    #[test]
    fn test_mapping_covers_every_field() {
        let mapping = create_index_mapping(&ElasticsearchConfig::default());
        let props = mapping["mappings"]["properties"].as_object().unwrap();
        for field in crate::types::EmployeeField::ALL {
            assert!(props.contains_key(field.path()), "missing {}", field);
        }
    }
}
