use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Identifier of a backend record.
///
/// Record ids are positive integers assigned by the backend; the UI carries
/// them around as strings (combobox values, selection sets, URL params).
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug + Send + Sync + 'static
{
    fn value(&self) -> i64;

    fn from_value(value: i64) -> Self;

    fn as_string(&self) -> String {
        self.value().to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|e| format!("Invalid id `{}`: {}", s, e))?;
        if value <= 0 {
            return Err(format!("Invalid id `{}`: must be positive", s));
        }
        Ok(Self::from_value(value))
    }
}

impl AggregateId for i64 {
    fn value(&self) -> i64 {
        *self
    }

    fn from_value(value: i64) -> Self {
        value
    }
}

/// Declares a transparent `i64` newtype id.
#[macro_export]
macro_rules! record_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $crate::domain::common::AggregateId for $name {
            fn value(&self) -> i64 {
                self.0
            }

            fn from_value(value: i64) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::record_id!(TestId);

    #[test]
    fn test_from_string() {
        assert_eq!(TestId::from_string(" 42 "), Ok(TestId(42)));
        assert!(TestId::from_string("0").is_err());
        assert!(TestId::from_string("abc").is_err());
        assert_eq!(TestId(7).as_string(), "7");
    }

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&TestId(3)).unwrap(), "3");
        let id: TestId = serde_json::from_str("9").unwrap();
        assert_eq!(id, TestId(9));
    }
}
