//! Employee query service.
//!
//! [`EmployeeService`] turns each read operation into a single
//! [`SearchRequest`], submits it once and maps the response into typed
//! results. There are no retries; engine failures surface unchanged.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use super::queries;
use super::reindex::{ReindexReport, scan_collection};
use crate::core::{EmployeeRepository, KeepAlive, ScrollProvider, SearchProvider};
use crate::error::{StorageError, StorageResult};
use crate::types::{
    AggregationResult, Bucket, Employee, GenderAverageSalary, GenderSalaryHistogram,
    HistogramBucket, SearchHit, SearchHits, SearchResponse,
};

/// Employee operations over a backend.
pub struct EmployeeService<S> {
    storage: Arc<S>,
    keep_alive: KeepAlive,
}

// Manual Clone so S itself does not need to be Clone.
impl<S> Clone for EmployeeService<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            keep_alive: self.keep_alive,
        }
    }
}

impl<S> std::fmt::Debug for EmployeeService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmployeeService")
            .field("keep_alive", &self.keep_alive)
            .finish_non_exhaustive()
    }
}

impl<S> EmployeeService<S>
where
    S: EmployeeRepository + SearchProvider + ScrollProvider,
{
    /// Creates a service with the default scroll keep-alive.
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            keep_alive: KeepAlive::DEFAULT,
        }
    }

    /// Sets the keep-alive used by the reindex scroll.
    pub fn with_keep_alive(mut self, keep_alive: KeepAlive) -> Self {
        self.keep_alive = keep_alive;
        self
    }

    /// Returns the underlying backend.
    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    /// Returns the scroll keep-alive.
    pub fn keep_alive(&self) -> KeepAlive {
        self.keep_alive
    }

    /// Inserts or overwrites a record.
    pub async fn save_employee(&self, employee: Employee) -> StorageResult<Employee> {
        debug!(id = ?employee.id, "Saving employee");
        self.storage.save(employee).await
    }

    /// Reads a record by id.
    pub async fn find_by_id(&self, id: &str) -> StorageResult<Option<Employee>> {
        self.storage.find_by_id(id).await
    }

    /// Exact name lookup: both names when a first name is given, otherwise
    /// the last name alone.
    pub async fn employees_by_name(
        &self,
        last_name: &str,
        first_name: Option<&str>,
    ) -> StorageResult<Vec<Employee>> {
        debug!(last_name, first_name, "Looking up employees by name");
        match first_name {
            Some(first_name) => {
                self.storage
                    .find_by_last_name_and_first_name(last_name, first_name)
                    .await
            }
            None => self.storage.find_by_last_name(last_name).await,
        }
    }

    /// Full-text lookup by interest keywords; first page with hit metadata.
    pub async fn by_interests<T: AsRef<str> + Sync>(
        &self,
        interests: &[T],
    ) -> StorageResult<SearchHits<Employee>> {
        debug!(count = interests.len(), "Searching employees by interests");
        let response = self
            .storage
            .search(&queries::by_interests(interests))
            .await?;
        response.into_search_hits()
    }

    /// Full-text lookup by address; raw hits with the projected source.
    pub async fn by_address(&self, address: &str) -> StorageResult<Vec<SearchHit<Value>>> {
        debug!(address, "Searching employees by address");
        let response = self.storage.search(&queries::by_address(address)).await?;
        Ok(response.hits)
    }

    /// Mean age across the collection; `None` when no record has an age.
    pub async fn average_age(&self) -> StorageResult<Option<f64>> {
        let response = self.storage.search(&queries::average_age()).await?;
        let result = required(&response, queries::AVG_AGE_AGG)?;
        metric(result, queries::AVG_AGE_AGG)
    }

    /// Salary histogram per gender.
    pub async fn salary_histogram_by_gender(&self) -> StorageResult<Vec<GenderSalaryHistogram>> {
        let response = self
            .storage
            .search(&queries::salary_histogram_by_gender())
            .await?;

        gender_buckets(&response)?
            .iter()
            .map(|bucket| {
                let histogram = bucket
                    .aggregation(queries::SALARY_BUCKETS_AGG)
                    .ok_or_else(|| missing(queries::SALARY_BUCKETS_AGG))?;
                let buckets = histogram
                    .buckets()
                    .iter()
                    .map(|b| {
                        let key = b.key.as_f64().ok_or_else(|| {
                            StorageError::malformed(format!(
                                "histogram bucket key '{}' is not numeric",
                                b.key
                            ))
                        })?;
                        Ok(HistogramBucket {
                            key,
                            doc_count: b.doc_count,
                        })
                    })
                    .collect::<StorageResult<Vec<_>>>()?;

                Ok(GenderSalaryHistogram {
                    gender: bucket.key.to_string(),
                    doc_count: bucket.doc_count,
                    buckets,
                })
            })
            .collect()
    }

    /// Average salary per gender.
    pub async fn average_salary_by_gender(&self) -> StorageResult<Vec<GenderAverageSalary>> {
        let response = self
            .storage
            .search(&queries::average_salary_by_gender())
            .await?;

        gender_buckets(&response)?
            .iter()
            .map(|bucket| {
                let avg = bucket
                    .aggregation(queries::AVG_SALARY_AGG)
                    .ok_or_else(|| missing(queries::AVG_SALARY_AGG))?;
                Ok(GenderAverageSalary {
                    gender: bucket.key.to_string(),
                    doc_count: bucket.doc_count,
                    average_salary: metric(avg, queries::AVG_SALARY_AGG)?,
                })
            })
            .collect()
    }

    /// Number of employees one year short of retirement age.
    pub async fn retiring_within_year(&self) -> StorageResult<u64> {
        let response = self
            .storage
            .search(&queries::retiring_within_year())
            .await?;
        Ok(response.total.value)
    }

    /// Scans the whole collection through a scroll cursor.
    ///
    /// The scanned hits are collected but not written back anywhere.
    pub async fn reindex(&self) -> StorageResult<ReindexReport> {
        let scan = scan_collection(
            self.storage.as_ref(),
            &queries::reindex_scan(),
            self.keep_alive,
        )
        .await?;

        let report = scan.report();
        info!(
            documents = report.documents_scanned,
            pages = report.pages_fetched,
            "Reindex scan complete"
        );
        Ok(report)
    }
}

fn missing(name: &str) -> StorageError {
    StorageError::malformed(format!("aggregation '{}' missing from response", name))
}

fn required<'a>(response: &'a SearchResponse, name: &str) -> StorageResult<&'a AggregationResult> {
    response.aggregation(name).ok_or_else(|| missing(name))
}

fn metric(result: &AggregationResult, name: &str) -> StorageResult<Option<f64>> {
    match result {
        AggregationResult::Metric { value } => Ok(*value),
        AggregationResult::Buckets { .. } => Err(StorageError::malformed(format!(
            "aggregation '{}' is not a metric",
            name
        ))),
    }
}

fn gender_buckets(response: &SearchResponse) -> StorageResult<&[Bucket]> {
    match required(response, queries::GENDER_AGG)? {
        AggregationResult::Buckets { buckets } => Ok(buckets),
        AggregationResult::Metric { .. } => Err(StorageError::malformed(format!(
            "aggregation '{}' has no buckets",
            queries::GENDER_AGG
        ))),
    }
}
