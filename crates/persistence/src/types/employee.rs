//! Employee record type.
//!
//! This module defines [`Employee`], the single entity stored in the
//! collection, and [`EmployeeField`], which names its indexed fields together
//! with their full-text and exact-match representations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{StorageError, StorageResult};

/// An employee record.
///
/// Every field is optional on input, and absent fields are left out of the
/// serialized form. The `id` is assigned by the backend on
/// first save and is kept out of the stored document body; it travels as the
/// document identifier instead.
///
/// # Examples
///
/// ```
/// use roster_persistence::types::Employee;
///
/// let employee = Employee::new("Ada", "Lovelace")
///     .with_gender("Female")
///     .with_age(36)
///     .with_salary(120_000);
///
/// assert_eq!(employee.last_name.as_deref(), Some("Lovelace"));
/// assert!(employee.id.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Employee {
    /// Unique identifier, assigned on first save when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Given name (full-text, with an exact-match sibling).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// Family name (full-text, with an exact-match sibling).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Job title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,

    /// Yearly salary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<i32>,

    /// Date the employee joined, without a time component.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_joining: Option<NaiveDate>,

    /// Postal address (full-text).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Gender (full-text, with an exact-match sibling used for aggregation).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    /// Age in years.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,

    /// Marital status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<String>,

    /// Comma-joined list of interests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interests: Option<String>,
}

impl Employee {
    /// Creates a record with the given first and last name.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            ..Default::default()
        }
    }

    /// Sets the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the designation.
    pub fn with_designation(mut self, designation: impl Into<String>) -> Self {
        self.designation = Some(designation.into());
        self
    }

    /// Sets the salary.
    pub fn with_salary(mut self, salary: i32) -> Self {
        self.salary = Some(salary);
        self
    }

    /// Sets the joining date.
    pub fn with_date_of_joining(mut self, date: NaiveDate) -> Self {
        self.date_of_joining = Some(date);
        self
    }

    /// Sets the address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Sets the gender.
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Sets the age.
    pub fn with_age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }

    /// Sets the marital status.
    pub fn with_marital_status(mut self, status: impl Into<String>) -> Self {
        self.marital_status = Some(status.into());
        self
    }

    /// Sets the interests from a list, joined with commas.
    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined: Vec<String> = interests
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect();
        self.interests = Some(joined.join(","));
        self
    }

    /// Serializes the record into the document body stored by the engine.
    ///
    /// The `id` is removed; backends store it as the document identifier.
    pub fn to_document(&self) -> StorageResult<Value> {
        let mut document = serde_json::to_value(self)?;
        if let Some(obj) = document.as_object_mut() {
            obj.remove("id");
        }
        Ok(document)
    }

    /// Rebuilds a record from a stored document body and its identifier.
    ///
    /// Unknown fields are ignored and missing fields stay `None`, so projected
    /// documents (only some fields returned) still parse.
    pub fn from_document(id: &str, source: &Value) -> StorageResult<Self> {
        let source = match source {
            Value::Null => Value::Object(Default::default()),
            other => other.clone(),
        };
        let mut employee: Employee = serde_json::from_value(source).map_err(|e| {
            StorageError::malformed(format!("document {} is not an employee: {}", id, e))
        })?;
        employee.id = Some(id.to_string());
        Ok(employee)
    }
}

/// Indexed fields of an [`Employee`].
///
/// Text fields that need whole-value comparison carry a keyword sibling in the
/// index mapping. Writes always go to the logical field; reads pick either the
/// analyzed path ([`path`](Self::path)) or the exact-match path
/// ([`exact_path`](Self::exact_path)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmployeeField {
    /// `firstName`
    FirstName,
    /// `lastName`
    LastName,
    /// `designation`
    Designation,
    /// `salary`
    Salary,
    /// `dateOfJoining`
    DateOfJoining,
    /// `address`
    Address,
    /// `gender`
    Gender,
    /// `age`
    Age,
    /// `maritalStatus`
    MaritalStatus,
    /// `interests`
    Interests,
}

impl EmployeeField {
    /// All indexed fields, in document order.
    pub const ALL: [EmployeeField; 10] = [
        EmployeeField::FirstName,
        EmployeeField::LastName,
        EmployeeField::Designation,
        EmployeeField::Salary,
        EmployeeField::DateOfJoining,
        EmployeeField::Address,
        EmployeeField::Gender,
        EmployeeField::Age,
        EmployeeField::MaritalStatus,
        EmployeeField::Interests,
    ];

    /// The field name as stored, used for full-text queries.
    pub fn path(&self) -> &'static str {
        match self {
            EmployeeField::FirstName => "firstName",
            EmployeeField::LastName => "lastName",
            EmployeeField::Designation => "designation",
            EmployeeField::Salary => "salary",
            EmployeeField::DateOfJoining => "dateOfJoining",
            EmployeeField::Address => "address",
            EmployeeField::Gender => "gender",
            EmployeeField::Age => "age",
            EmployeeField::MaritalStatus => "maritalStatus",
            EmployeeField::Interests => "interests",
        }
    }

    /// The path used for whole-value equality, terms aggregation and sorting.
    ///
    /// Numeric and date fields compare exactly on their own path. Free-text
    /// fields without a keyword sibling return `None`.
    pub fn exact_path(&self) -> Option<&'static str> {
        match self {
            EmployeeField::FirstName => Some("firstName.keyword"),
            EmployeeField::LastName => Some("lastName.keyword"),
            EmployeeField::Gender => Some("gender.keyword"),
            EmployeeField::Salary => Some("salary"),
            EmployeeField::Age => Some("age"),
            EmployeeField::DateOfJoining => Some("dateOfJoining"),
            EmployeeField::Designation
            | EmployeeField::Address
            | EmployeeField::MaritalStatus
            | EmployeeField::Interests => None,
        }
    }
}

impl std::fmt::Display for EmployeeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_field_names_are_camel_case() {
        let employee = Employee::new("John", "Doe")
            .with_date_of_joining(NaiveDate::from_ymd_opt(2015, 4, 1).unwrap())
            .with_marital_status("Married");
        let value = serde_json::to_value(&employee).unwrap();

        assert_eq!(value["firstName"], "John");
        assert_eq!(value["lastName"], "Doe");
        assert_eq!(value["dateOfJoining"], "2015-04-01");
        assert_eq!(value["maritalStatus"], "Married");
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let value = serde_json::to_value(Employee::new("Ada", "Lovelace")).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 2);
        assert!(!object.contains_key("designation"));
        assert!(!object.contains_key("id"));
        assert_eq!(value["lastName"], "Lovelace");
    }

    #[test]
    fn test_to_document_strips_id() {
        let employee = Employee::new("John", "Doe").with_id("emp-1");
        let document = employee.to_document().unwrap();
        assert!(document.get("id").is_none());
        assert_eq!(document["lastName"], "Doe");
    }

    #[test]
    fn test_from_document_sets_id_and_tolerates_projection() {
        let source = json!({ "firstName": "Jane", "address": "12 Elm Street" });
        let employee = Employee::from_document("abc", &source).unwrap();
        assert_eq!(employee.id.as_deref(), Some("abc"));
        assert_eq!(employee.first_name.as_deref(), Some("Jane"));
        assert!(employee.last_name.is_none());

        let empty = Employee::from_document("xyz", &Value::Null).unwrap();
        assert_eq!(empty.id.as_deref(), Some("xyz"));
    }

    #[test]
    fn test_from_document_rejects_wrong_types() {
        let source = json!({ "age": "not a number" });
        assert!(Employee::from_document("abc", &source).is_err());
    }

    #[test]
    fn test_with_interests_joins_with_commas() {
        let employee = Employee::default().with_interests(["chess", "sailing"]);
        assert_eq!(employee.interests.as_deref(), Some("chess,sailing"));
    }

    #[test]
    fn test_exact_paths() {
        assert_eq!(EmployeeField::LastName.path(), "lastName");
        assert_eq!(
            EmployeeField::LastName.exact_path(),
            Some("lastName.keyword")
        );
        assert_eq!(EmployeeField::Gender.exact_path(), Some("gender.keyword"));
        assert_eq!(EmployeeField::Age.exact_path(), Some("age"));
        assert_eq!(EmployeeField::Address.exact_path(), None);
    }
}
