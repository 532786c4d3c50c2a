// List options: filters, sorts and paging over stored documents.
//
// Query string form
// - `field=value` or `field[op]=value` for filters
// - `_sort=+a,-b`, `_after=<id>`, `_offset=<n>`, `_limit=<n>`

use crate::shared::core::metadata::etag_for;
use crate::shared::infrastructure::object_store::StoredObject;
use serde_json::{Value, json};
use std::cmp::Ordering;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListOptsError {
    #[error("unknown filter operator: {0}")]
    UnknownOperator(String),

    #[error("unknown list parameter: {0}")]
    UnknownParameter(String),

    #[error("invalid value for {param}: {value}")]
    InvalidNumber { param: String, value: String },

    #[error("empty sort field")]
    EmptySort,

    #[error("malformed filter key: {0}")]
    MalformedKey(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
    HasPrefix,
    In,
}

impl FromStr for FilterOp {
    type Err = ListOptsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(Self::Eq),
            "gt" => Ok(Self::Gt),
            "gte" => Ok(Self::Gte),
            "lt" => Ok(Self::Lt),
            "lte" => Ok(Self::Lte),
            "hp" => Ok(Self::HasPrefix),
            "in" => Ok(Self::In),
            other => Err(ListOptsError::UnknownOperator(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub path: String,
    pub op: FilterOp,
    pub value: String,
}

impl Filter {
    pub fn new(path: impl Into<String>, op: FilterOp, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            op,
            value: value.into(),
        }
    }

    pub fn matches(&self, document: &Value) -> bool {
        let Some(field) = lookup(document, &self.path) else {
            return false;
        };
        match self.op {
            FilterOp::Eq => compare_to(field, &self.value) == Some(Ordering::Equal),
            FilterOp::Gt => compare_to(field, &self.value) == Some(Ordering::Greater),
            FilterOp::Gte => matches!(
                compare_to(field, &self.value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            FilterOp::Lt => compare_to(field, &self.value) == Some(Ordering::Less),
            FilterOp::Lte => matches!(
                compare_to(field, &self.value),
                Some(Ordering::Less | Ordering::Equal)
            ),
            FilterOp::HasPrefix => as_text(field).starts_with(&self.value),
            FilterOp::In => self
                .value
                .split(',')
                .any(|candidate| compare_to(field, candidate) == Some(Ordering::Equal)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub path: String,
    pub descending: bool,
}

impl FromStr for Sort {
    type Err = ListOptsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (path, descending) = match s.as_bytes().first() {
            Some(b'-') => (&s[1..], true),
            Some(b'+') => (&s[1..], false),
            _ => (s, false),
        };
        if path.is_empty() {
            return Err(ListOptsError::EmptySort);
        }
        Ok(Self {
            path: path.to_string(),
            descending,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOpts {
    pub filters: Vec<Filter>,
    pub sorts: Vec<Sort>,
    pub after: Option<String>,
    pub offset: usize,
    pub limit: Option<usize>,
}

impl ListOpts {
    pub fn from_query_pairs<I>(pairs: I) -> Result<Self, ListOptsError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut opts = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "_sort" => {
                    for sort in value.split(',').filter(|s| !s.trim().is_empty()) {
                        opts.sorts.push(sort.parse()?);
                    }
                }
                "_after" => opts.after = Some(value),
                "_offset" => opts.offset = parse_count(&key, &value)?,
                "_limit" => opts.limit = Some(parse_count(&key, &value)?),
                k if k.starts_with('_') => {
                    return Err(ListOptsError::UnknownParameter(k.to_string()));
                }
                _ => opts.filters.push(parse_filter(&key, value)?),
            }
        }
        Ok(opts)
    }

    pub fn apply(&self, objects: Vec<StoredObject>) -> Vec<StoredObject> {
        let mut rows: Vec<(Value, StoredObject)> = objects
            .into_iter()
            .map(|object| (object.to_document(), object))
            .filter(|(document, _)| self.filters.iter().all(|f| f.matches(document)))
            .collect();

        rows.sort_by(|(a, a_object), (b, b_object)| {
            for sort in &self.sorts {
                let ordering = compare_fields(lookup(a, &sort.path), lookup(b, &sort.path));
                let ordering = if sort.descending {
                    ordering.reverse()
                } else {
                    ordering
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            a_object.metadata.id.cmp(&b_object.metadata.id)
        });

        let mut objects: Vec<StoredObject> = rows.into_iter().map(|(_, object)| object).collect();

        if let Some(after) = &self.after {
            if let Some(position) = objects.iter().position(|o| &o.metadata.id == after) {
                objects.drain(..=position);
            }
        }

        objects
            .into_iter()
            .skip(self.offset)
            .take(self.limit.unwrap_or(usize::MAX))
            .collect()
    }
}

/// `(id, generation)` of each object, in order. Two results with equal
/// revisions hold the same documents.
pub fn revisions(objects: &[StoredObject]) -> Vec<(String, i64)> {
    objects
        .iter()
        .map(|o| (o.metadata.id.clone(), o.metadata.generation))
        .collect()
}

pub fn list_etag(objects: &[StoredObject]) -> String {
    etag_for(&json!(revisions(objects)))
}

fn parse_count(param: &str, value: &str) -> Result<usize, ListOptsError> {
    value.parse().map_err(|_| ListOptsError::InvalidNumber {
        param: param.to_string(),
        value: value.to_string(),
    })
}

fn parse_filter(key: &str, value: String) -> Result<Filter, ListOptsError> {
    let Some((path, rest)) = key.split_once('[') else {
        return Ok(Filter::new(key, FilterOp::Eq, value));
    };
    let Some(op) = rest.strip_suffix(']') else {
        return Err(ListOptsError::MalformedKey(key.to_string()));
    };
    if path.is_empty() {
        return Err(ListOptsError::MalformedKey(key.to_string()));
    }
    Ok(Filter::new(path, op.parse()?, value))
}

fn lookup<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(document, |value, segment| value.as_object()?.get(segment))
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// Interpret the raw filter value in the type of the stored field.
fn compare_to(field: &Value, raw: &str) -> Option<Ordering> {
    match field {
        Value::Number(n) => n.as_f64()?.partial_cmp(&raw.trim().parse::<f64>().ok()?),
        Value::Bool(b) => Some(b.cmp(&raw.trim().parse::<bool>().ok()?)),
        Value::String(s) => Some(s.as_str().cmp(raw)),
        Value::Null => None,
        other => Some(other.to_string().as_str().cmp(raw)),
    }
}

fn rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(x), Some(y)) => rank(x)
            .cmp(&rank(y))
            .then_with(|| x.to_string().cmp(&y.to_string())),
    }
}
