use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassId {
    #[serde(rename = "9A")]
    NineA,
    #[serde(rename = "9B")]
    NineB,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown class `{0}`; expected one of: 9A, 9B")]
pub struct UnknownClassError(pub String);

impl ClassId {
    pub const ALL: [ClassId; 2] = [ClassId::NineA, ClassId::NineB];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NineA => "9A",
            Self::NineB => "9B",
        }
    }

    /// Company names offered to the class, in display order.
    pub fn companies(self) -> &'static [&'static str] {
        match self {
            Self::NineA => &NINE_A_COMPANIES,
            Self::NineB => &NINE_B_COMPANIES,
        }
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassId {
    type Err = UnknownClassError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "9A" => Ok(Self::NineA),
            "9B" => Ok(Self::NineB),
            _ => Err(UnknownClassError(value.to_owned())),
        }
    }
}

const NINE_A_COMPANIES: [&str; 5] = [
    "ECOSOL",
    "MAXXIMINÉRIOS",
    "AGROSOJA",
    "FUTUROBANK",
    "SMARTAL",
];

const NINE_B_COMPANIES: [&str; 5] = [
    "EOLION",
    "GALINDOS'S COFFEE",
    "MINEX",
    "SANTOS TECNOVA",
    "ALFABANK",
];
