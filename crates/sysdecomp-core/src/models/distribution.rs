//! Binary cause-state bit string conditioning every distribution of a request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::TensorError;

/// One bit per cause variable; character `i` is the state of cause `i`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BinaryDistribution {
    bits: Vec<bool>,
}

impl BinaryDistribution {
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Keep only the bits at `positions`, in ascending position order.
    pub fn project(&self, positions: &[usize]) -> Self {
        let bits = self
            .bits
            .iter()
            .enumerate()
            .filter(|(i, _)| positions.contains(i))
            .map(|(_, b)| *b)
            .collect();
        Self { bits }
    }
}

impl FromStr for BinaryDistribution {
    type Err = TensorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(TensorError::InvalidDistribution {
                    value: s.to_string(),
                    reason: format!("unexpected character {other:?}"),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { bits })
    }
}

impl TryFrom<String> for BinaryDistribution {
    type Error = TensorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BinaryDistribution> for String {
    fn from(value: BinaryDistribution) -> Self {
        value.to_string()
    }
}

impl fmt::Display for BinaryDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
