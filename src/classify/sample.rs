//! Training samples for the category classifier.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SaffronError};

/// Purchase history text labelled with a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSample {
    pub text_features: String,
    pub category_id: i64,
}

impl TrainingSample {
    pub fn new<S: Into<String>>(text_features: S, category_id: i64) -> Self {
        TrainingSample {
            text_features: text_features.into(),
            category_id,
        }
    }
}

/// Read samples from `{"training_samples": [...]}` or a bare array.
///
/// Every sample needs a string `text_features` and an integer `category_id`;
/// the first one that does not have them fails the whole batch.
pub fn parse_training_samples(value: &Value) -> Result<Vec<TrainingSample>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("training_samples") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(SaffronError::malformed(
                    "expected a `training_samples` array",
                ));
            }
        },
        _ => {
            return Err(SaffronError::malformed(
                "expected an array of training samples",
            ));
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let text_features = item
                .get("text_features")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    SaffronError::malformed(format!("sample {i} has no string `text_features`"))
                })?;
            let category_id = item
                .get("category_id")
                .and_then(Value::as_i64)
                .ok_or_else(|| {
                    SaffronError::malformed(format!("sample {i} has no integer `category_id`"))
                })?;
            Ok(TrainingSample::new(text_features, category_id))
        })
        .collect()
}
