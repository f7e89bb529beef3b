//! C data models.
//!
//! A data model fixes the widths of the primitive integer types a C
//! compiler uses on a platform.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Widths of the C integer types, in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TypeWidths {
    /// `short`
    pub short: u32,
    /// `int`
    pub int: u32,
    /// `long`
    pub long: u32,
    /// `long long`
    pub long_long: u32,
}

/// One of the three data models in common use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataModel {
    /// 32-bit `int`, `long` and pointers.
    Ilp32,
    /// 64-bit Windows: `long` stays 32-bit, `long long` and pointers are 64-bit.
    Llp64,
    /// 64-bit Unix: `long` and pointers are 64-bit.
    Lp64,
}

impl DataModel {
    /// Every data model.
    pub const ALL: [DataModel; 3] = [DataModel::Ilp32, DataModel::Llp64, DataModel::Lp64];

    /// Widths of the C integer types under this model.
    pub fn widths(self) -> TypeWidths {
        match self {
            DataModel::Ilp32 | DataModel::Llp64 => TypeWidths {
                short: 16,
                int: 32,
                long: 32,
                long_long: 64,
            },
            DataModel::Lp64 => TypeWidths {
                short: 16,
                int: 32,
                long: 64,
                long_long: 64,
            },
        }
    }

    /// Width of `short` in bits.
    pub fn short_size(self) -> u32 {
        self.widths().short
    }

    /// Width of `int` in bits.
    pub fn int_size(self) -> u32 {
        self.widths().int
    }

    /// Width of `long` in bits.
    pub fn long_size(self) -> u32 {
        self.widths().long
    }

    /// Width of `long long` in bits.
    pub fn long_long_size(self) -> u32 {
        self.widths().long_long
    }

    /// Conventional upper-case name, e.g. `"LP64"`.
    pub fn name(self) -> &'static str {
        match self {
            DataModel::Ilp32 => "ILP32",
            DataModel::Llp64 => "LLP64",
            DataModel::Lp64 => "LP64",
        }
    }
}

impl fmt::Display for DataModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
