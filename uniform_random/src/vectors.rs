// Conformance vectors: recorded call sequences and the values they produced.
//
// A `ReferenceVector` is a seed, a list of `Call`s, and the `Draw`s those calls
// must return on a freshly seeded `Stream`. Vector files are JSON, so the same
// file can be checked by every implementation of the generator. The default
// set is embedded from `data/reference_vectors.json`.
//
// Floats are compared by bit pattern, not by `==`: the point is bit-exact
// agreement, and `0.0 == -0.0` would hide a real divergence.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Stream;

/// One recorded operation on a `Stream`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Call {
    /// `generate_random_number()`
    Raw,
    /// `random_float(low, high)`
    Float { low: f32, high: f32 },
    /// `random_float_exp(min, max, exponent)`
    FloatExp { min: f32, max: f32, exponent: f32 },
    /// `random_int(low, high)`
    Int { low: i32, high: i32 },
}

impl Call {
    /// Perform this call on `stream`.
    pub fn apply(&self, stream: &mut Stream) -> Draw {
        match *self {
            Call::Raw => Draw::Int(stream.generate_random_number()),
            Call::Float { low, high } => Draw::Float(stream.random_float(low, high)),
            Call::FloatExp { min, max, exponent } => {
                Draw::Float(stream.random_float_exp(min, max, exponent))
            }
            Call::Int { low, high } => Draw::Int(stream.random_int(low, high)),
        }
    }
}

/// A value produced by a `Call`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Draw {
    Int(i32),
    Float(f32),
}

impl Draw {
    /// Exact equality: same variant, and for floats the same bit pattern.
    pub fn same_bits(&self, other: &Draw) -> bool {
        match (self, other) {
            (Draw::Int(a), Draw::Int(b)) => a == b,
            (Draw::Float(a), Draw::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl fmt::Display for Draw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Draw::Int(v) => write!(f, "{v}"),
            Draw::Float(v) => write!(f, "{v:?}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum VectorError {
    #[error("malformed vector JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("vector `{name}` lists {calls} calls but {expected} expected values")]
    LengthMismatch {
        name: String,
        calls: usize,
        expected: usize,
    },
    #[error("vector `{name}` diverges at call {index} ({call:?}): expected {expected}, got {actual}")]
    ValueMismatch {
        name: String,
        index: usize,
        call: Call,
        expected: Draw,
        actual: Draw,
    },
    #[error("vector `{name}` holds a non-finite float at {field}, which JSON cannot represent")]
    NonFinite { name: String, field: String },
}

/// A seed, a call sequence, and the values that sequence must produce.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferenceVector {
    pub name: String,
    pub seed: i32,
    pub calls: Vec<Call>,
    pub expected: Vec<Draw>,
}

impl ReferenceVector {
    /// Build a vector whose expected values are whatever this implementation
    /// produces for `calls`.
    pub fn record(name: impl Into<String>, seed: i32, calls: Vec<Call>) -> Self {
        let mut vector = Self {
            name: name.into(),
            seed,
            calls,
            expected: Vec::new(),
        };
        vector.expected = vector.replay();
        vector
    }

    /// Run the calls on a freshly seeded stream.
    pub fn replay(&self) -> Vec<Draw> {
        let mut stream = Stream::with_seed(self.seed);
        self.calls.iter().map(|call| call.apply(&mut stream)).collect()
    }

    /// Replay and compare against `expected`, reporting the first divergence.
    pub fn check(&self) -> Result<(), VectorError> {
        if self.calls.len() != self.expected.len() {
            return Err(VectorError::LengthMismatch {
                name: self.name.clone(),
                calls: self.calls.len(),
                expected: self.expected.len(),
            });
        }

        let mut stream = Stream::with_seed(self.seed);
        for (index, (call, expected)) in self.calls.iter().zip(&self.expected).enumerate() {
            let actual = call.apply(&mut stream);
            if !actual.same_bits(expected) {
                return Err(VectorError::ValueMismatch {
                    name: self.name.clone(),
                    index,
                    call: *call,
                    expected: *expected,
                    actual,
                });
            }
        }
        Ok(())
    }

    fn ensure_finite(&self) -> Result<(), VectorError> {
        let non_finite = |field: String| VectorError::NonFinite {
            name: self.name.clone(),
            field,
        };
        for (index, call) in self.calls.iter().enumerate() {
            let finite = match *call {
                Call::Float { low, high } => low.is_finite() && high.is_finite(),
                Call::FloatExp { min, max, exponent } => {
                    min.is_finite() && max.is_finite() && exponent.is_finite()
                }
                Call::Raw | Call::Int { .. } => true,
            };
            if !finite {
                return Err(non_finite(format!("call {index}")));
            }
        }
        for (index, draw) in self.expected.iter().enumerate() {
            if matches!(draw, Draw::Float(v) if !v.is_finite()) {
                return Err(non_finite(format!("expected value {index}")));
            }
        }
        Ok(())
    }
}

/// The top-level JSON structure of a vector file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorSet {
    pub vectors: Vec<ReferenceVector>,
}

impl VectorSet {
    /// Parse a vector set from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, VectorError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize as pretty-printed JSON.
    ///
    /// Fails on NaN or infinite floats: serde_json would write them as `null`,
    /// producing a file that `from_json` rejects.
    pub fn to_json_pretty(&self) -> Result<String, VectorError> {
        for vector in &self.vectors {
            vector.ensure_finite()?;
        }
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every vector in file order, stopping at the first failure.
    /// Returns the number of vectors checked.
    pub fn check_all(&self) -> Result<usize, VectorError> {
        for vector in &self.vectors {
            vector.check()?;
            debug!(
                "vector `{}` ok ({} calls, seed {})",
                vector.name,
                vector.calls.len(),
                vector.seed
            );
        }
        Ok(self.vectors.len())
    }
}

/// Load the embedded default vector set.
pub fn default_vectors() -> VectorSet {
    let json = include_str!("../data/reference_vectors.json");
    VectorSet::from_json(json).expect("embedded reference_vectors.json is malformed")
}
