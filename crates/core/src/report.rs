//! The immutable progress report value.

use serde::{Deserialize, Serialize};

use crate::error::ProgressError;
use crate::state::ProgressState;

/// A single progress update: message, progress bounds, and state.
///
/// Omitted fields always take the same defaults: no message, value `0.0`,
/// maximum `0.0`, state [`ProgressState::Normal`]. Constructors store their
/// inputs as given; use [`ProgressReport::validate`] to check the bounds.
///
/// In serialized form finite bounds are numbers and non-finite ones are the
/// strings `"NaN"`, `"inf"` and `"-inf"`, so every report reads back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport<M> {
    message: Option<M>,
    #[serde(default, with = "bound")]
    value: f64,
    #[serde(default, with = "bound")]
    maximum: f64,
    #[serde(default)]
    state: ProgressState,
}

impl<M> ProgressReport<M> {
    pub const DEFAULT_VALUE: f64 = 0.0;
    pub const DEFAULT_MAXIMUM: f64 = 0.0;

    fn build(message: Option<M>, value: f64, maximum: f64, state: ProgressState) -> Self {
        Self {
            message,
            value,
            maximum,
            state,
        }
    }

    /// Report carrying only a message.
    pub fn new(message: M) -> Self {
        Self::build(
            Some(message),
            Self::DEFAULT_VALUE,
            Self::DEFAULT_MAXIMUM,
            ProgressState::default(),
        )
    }

    /// Report with explicit progress bounds. `value` is expected in `[0, maximum]`
    /// but is not checked.
    pub fn with_progress(message: M, value: f64, maximum: f64) -> Self {
        Self::build(Some(message), value, maximum, ProgressState::default())
    }

    pub fn with_progress_and_state(
        message: M,
        value: f64,
        maximum: f64,
        state: ProgressState,
    ) -> Self {
        Self::build(Some(message), value, maximum, state)
    }

    pub fn with_state(message: M, state: ProgressState) -> Self {
        Self::build(
            Some(message),
            Self::DEFAULT_VALUE,
            Self::DEFAULT_MAXIMUM,
            state,
        )
    }

    /// Report without a message whose state is [`ProgressState::Error`].
    pub fn error() -> Self {
        Self::build(
            None,
            Self::DEFAULT_VALUE,
            Self::DEFAULT_MAXIMUM,
            ProgressState::Error,
        )
    }

    /// Like [`ProgressReport::with_progress`], but rejects bounds that
    /// [`ProgressReport::validate`] would reject.
    pub fn try_with_progress(message: M, value: f64, maximum: f64) -> Result<Self, ProgressError> {
        let report = Self::with_progress(message, value, maximum);
        report.validate()?;
        Ok(report)
    }

    pub fn message(&self) -> Option<&M> {
        self.message.as_ref()
    }

    pub fn into_message(self) -> Option<M> {
        self.message
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    pub fn state(&self) -> ProgressState {
        self.state
    }

    /// True when the report carries a positive maximum.
    pub fn has_progress(&self) -> bool {
        self.maximum > 0.0
    }

    /// `value / maximum`, unclamped. `None` when there is no positive finite maximum.
    pub fn fraction(&self) -> Option<f64> {
        if self.has_progress() && self.maximum.is_finite() && self.value.is_finite() {
            Some(self.value / self.maximum)
        } else {
            None
        }
    }

    pub fn percent(&self) -> Option<f64> {
        self.fraction().map(|f| f * 100.0)
    }

    /// Check that both bounds are finite and non-negative and that
    /// `value <= maximum`.
    pub fn validate(&self) -> Result<(), ProgressError> {
        for (field, value) in [("value", self.value), ("maximum", self.maximum)] {
            if !value.is_finite() {
                return Err(ProgressError::NotFinite { field, value });
            }
            if value < 0.0 {
                return Err(ProgressError::Negative { field, value });
            }
        }
        if self.value > self.maximum {
            return Err(ProgressError::ValueExceedsMaximum {
                value: self.value,
                maximum: self.maximum,
            });
        }
        Ok(())
    }
}

mod bound {
    use std::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if *value > 0.0 {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(BoundVisitor)
    }

    struct BoundVisitor;

    impl<'de> Visitor<'de> for BoundVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number or one of \"NaN\", \"inf\", \"-inf\"")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            match v {
                "NaN" => Ok(f64::NAN),
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
            }
        }
    }
}
