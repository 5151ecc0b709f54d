//! User record schema.
//!
//! Requests arrive as loose JSON field mappings. [`NewUser::from_fields`] and
//! [`UserPatch::from_fields`] are the only way to turn them into typed
//! values, so everything reaching a repository already satisfies the schema:
//!
//! - `name`: required, non-blank text.
//! - `age`: optional number; numeric strings are coerced.
//! - `favoriteFoods`: ordered text list, empty by default; a lone string
//!   becomes a one-element list.
//!
//! Unknown fields are ignored and never persisted.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value, json};

/// Entity name the storage collection is derived from.
pub const USER_ENTITY: &str = "User";

const NAME: &str = "name";
const AGE: &str = "age";
const FAVORITE_FOODS: &str = "favoriteFoods";

/// Derive a collection name from an entity name: lower-cased and pluralised.
///
/// # Examples
/// ```
/// use users_api::domain::user::{USER_ENTITY, collection_name};
///
/// assert_eq!(collection_name(USER_ENTITY), "users");
/// assert_eq!(collection_name("Address"), "address");
/// ```
pub fn collection_name(entity: &str) -> String {
    let lower = entity.to_lowercase();
    if lower.ends_with('s') {
        lower
    } else {
        format!("{lower}s")
    }
}

/// Opaque record identifier assigned by the storage layer.
///
/// The domain does not know the identifier format. Repositories parse it and
/// report [`crate::domain::ports::UserPersistenceError::MalformedId`] when it
/// does not fit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted user.
///
/// ## Invariants
/// - `name` is non-blank.
/// - `id` is assigned by the repository and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    name: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_age"
    )]
    age: Option<f64>,
    #[serde(default)]
    favorite_foods: Vec<String>,
}

/// Largest magnitude at which every whole `f64` is exactly representable.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Write whole-number ages as JSON integers (`30`, not `30.0`).
fn serialize_age<S>(age: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match *age {
        Some(value) if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER => {
            // Lossless: the value is whole and within the exact-integer range.
            serializer.serialize_some(&(value as i64))
        }
        Some(value) => serializer.serialize_some(&value),
        None => serializer.serialize_none(),
    }
}

impl User {
    /// Combine a validated candidate with its storage-assigned identifier.
    pub fn new(id: UserId, record: NewUser) -> Self {
        let NewUser {
            name,
            age,
            favorite_foods,
        } = record;
        Self {
            id,
            name,
            age,
            favorite_foods,
        }
    }

    /// Rebuild a user loaded from storage.
    ///
    /// Stored records were validated on the way in, so they are not checked
    /// again here.
    pub fn from_stored(
        id: UserId,
        name: String,
        age: Option<f64>,
        favorite_foods: Vec<String>,
    ) -> Self {
        Self {
            id,
            name,
            age,
            favorite_foods,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> Option<f64> {
        self.age
    }

    pub fn favorite_foods(&self) -> &[String] {
        &self.favorite_foods
    }

    /// Replace the fields present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &UserPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(foods) = &patch.favorite_foods {
            self.favorite_foods.clone_from(foods);
        }
    }
}

/// A validated user that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    name: String,
    age: Option<f64>,
    favorite_foods: Vec<String>,
}

impl NewUser {
    /// Validate a request body and build a candidate record.
    ///
    /// Every failing field is reported, not just the first.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use users_api::domain::NewUser;
    ///
    /// let fields = json!({ "name": "Ada", "age": "36" });
    /// let user = NewUser::from_fields(fields.as_object().unwrap()).expect("valid");
    /// assert_eq!(user.age(), Some(36.0));
    ///
    /// let err = NewUser::from_fields(json!({ "age": 3 }).as_object().unwrap()).unwrap_err();
    /// assert_eq!(
    ///     err.to_string(),
    ///     "User validation failed: name: Path `name` is required."
    /// );
    /// ```
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, UserValidationError> {
        let mut issues = Vec::new();

        let name = collect(&mut issues, parse_name(fields.get(NAME)));
        let age = match fields.get(AGE) {
            Some(value) => collect(&mut issues, parse_age(value)).flatten(),
            None => None,
        };
        let favorite_foods = match fields.get(FAVORITE_FOODS) {
            Some(value) => collect(&mut issues, parse_foods(value)).unwrap_or_default(),
            None => Vec::new(),
        };

        match name {
            Some(name) if issues.is_empty() => Ok(Self {
                name,
                age,
                favorite_foods,
            }),
            _ => Err(UserValidationError { issues }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> Option<f64> {
        self.age
    }

    pub fn favorite_foods(&self) -> &[String] {
        &self.favorite_foods
    }
}

/// A validated partial update.
///
/// Absent fields are left alone. `age: null` clears the age and
/// `favoriteFoods: null` empties the list; `name` can only be replaced, so
/// the merged record always keeps a valid name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    name: Option<String>,
    age: Option<Option<f64>>,
    favorite_foods: Option<Vec<String>>,
}

impl UserPatch {
    /// Validate the supplied subset of fields.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, UserValidationError> {
        let mut issues = Vec::new();

        let name = fields
            .get(NAME)
            .and_then(|value| collect(&mut issues, parse_name(Some(value))));
        let age = fields
            .get(AGE)
            .and_then(|value| collect(&mut issues, parse_age(value)));
        let favorite_foods = fields
            .get(FAVORITE_FOODS)
            .and_then(|value| collect(&mut issues, parse_foods(value)));

        if issues.is_empty() {
            Ok(Self {
                name,
                age,
                favorite_foods,
            })
        } else {
            Err(UserValidationError { issues })
        }
    }

    /// True when the patch would not change any field.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.favorite_foods.is_none()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// `Some(None)` clears the stored age.
    pub fn age(&self) -> Option<Option<f64>> {
        self.age
    }

    pub fn favorite_foods(&self) -> Option<&[String]> {
        self.favorite_foods.as_deref()
    }
}

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldIssueKind {
    /// The field is missing, null, or blank.
    Required,
    /// The value could not be coerced to the field type.
    Cast {
        expected: &'static str,
        value: Value,
    },
}

/// A rejected field and the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    field: &'static str,
    kind: FieldIssueKind,
}

impl FieldIssue {
    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn kind(&self) -> &FieldIssueKind {
        &self.kind
    }

    fn code(&self) -> &'static str {
        match self.kind {
            FieldIssueKind::Required => "required",
            FieldIssueKind::Cast { .. } => "invalid_type",
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FieldIssueKind::Required => write!(f, "Path `{}` is required.", self.field),
            FieldIssueKind::Cast { expected, value } => write!(
                f,
                "Cast to {expected} failed for value {value} (type {}) at path \"{}\"",
                json_type_name(value),
                self.field
            ),
        }
    }
}

/// Validation failure for a user payload.
#[derive(Debug, Clone, PartialEq)]
pub struct UserValidationError {
    issues: Vec<FieldIssue>,
}

impl UserValidationError {
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Per-field breakdown for API error details.
    pub fn details(&self) -> Value {
        let fields: Vec<Value> = self
            .issues
            .iter()
            .map(|issue| {
                json!({
                    "field": issue.field,
                    "code": issue.code(),
                    "message": issue.to_string(),
                })
            })
            .collect();
        json!({ "fields": fields })
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{USER_ENTITY} validation failed: ")?;
        for (index, issue) in self.issues.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {issue}", issue.field)?;
        }
        Ok(())
    }
}

impl std::error::Error for UserValidationError {}

fn collect<T>(issues: &mut Vec<FieldIssue>, parsed: Result<T, FieldIssue>) -> Option<T> {
    match parsed {
        Ok(value) => Some(value),
        Err(issue) => {
            issues.push(issue);
            None
        }
    }
}

fn cast_issue(field: &'static str, expected: &'static str, value: &Value) -> FieldIssue {
    FieldIssue {
        field,
        kind: FieldIssueKind::Cast {
            expected,
            value: value.clone(),
        },
    }
}

fn parse_name(value: Option<&Value>) -> Result<String, FieldIssue> {
    match value {
        Some(Value::String(name)) if !name.trim().is_empty() => Ok(name.clone()),
        None | Some(Value::Null | Value::String(_)) => Err(FieldIssue {
            field: NAME,
            kind: FieldIssueKind::Required,
        }),
        Some(other) => Err(cast_issue(NAME, "string", other)),
    }
}

fn parse_age(value: &Value) -> Result<Option<f64>, FieldIssue> {
    let parsed = match value {
        Value::Null => return Ok(None),
        Value::Number(number) => number.as_f64(),
        Value::String(text) if text.trim().is_empty() => return Ok(None),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(age) if age.is_finite() => Ok(Some(age)),
        _ => Err(cast_issue(AGE, "Number", value)),
    }
}

fn parse_foods(value: &Value) -> Result<Vec<String>, FieldIssue> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(food) => Ok(vec![food.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(food) => Ok(food.clone()),
                _ => Err(cast_issue(FAVORITE_FOODS, "[string]", value)),
            })
            .collect(),
        _ => Err(cast_issue(FAVORITE_FOODS, "[string]", value)),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
