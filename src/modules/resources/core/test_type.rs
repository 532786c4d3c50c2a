use crate::modules::resources::core::resource::Resource;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestType {
    pub text: String,
    pub num: i64,
}

impl Resource for TestType {
    const TYPE_NAME: &'static str = "testtype";
}

/// Partial TestType for merge updates; unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestTypeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num: Option<i64>,
}
