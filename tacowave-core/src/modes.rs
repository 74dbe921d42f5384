use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{field::Field, Value};

/// Input representation of the WaveNet vocoder.
///
/// `Raw` and `Mulaw` feed a scalar sample in `[-1, 1]` and predict a mixture of
/// logistic distributions; `MulawQuantize` feeds one-hot classes in `[0, mu]`
/// and predicts a softmax.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum InputType {
    #[serde(rename = "raw")]
    Raw,
    #[serde(rename = "mulaw")]
    Mulaw,
    #[serde(rename = "mulaw-quantize")]
    MulawQuantize,
}

impl InputType {
    pub const VARIANTS: &'static [&'static str] = &["raw", "mulaw", "mulaw-quantize"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Mulaw => "mulaw",
            Self::MulawQuantize => "mulaw-quantize",
        }
    }

    pub fn is_mulaw(&self) -> bool {
        matches!(self, Self::Mulaw | Self::MulawQuantize)
    }

    /// Scalar input with a discretized mixture of logistics output.
    pub fn is_scalar_input(&self) -> bool {
        !matches!(self, Self::MulawQuantize)
    }
}

impl FromStr for InputType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(Self::Raw),
            "mulaw" => Ok(Self::Mulaw),
            "mulaw-quantize" => Ok(Self::MulawQuantize),
            a => Err(format!(
                "Unknown input type `{a}`. Possible input types: `raw`, `mulaw`, `mulaw-quantize`."
            )),
        }
    }
}

/// How decoder inputs are chosen while training the spectrogram model.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum TeacherForcingMode {
    /// Fixed teacher forcing ratio.
    #[serde(rename = "constant")]
    Constant,
    /// Cosine decay of the ratio from the initial to the final value.
    #[serde(rename = "scheduled")]
    Scheduled,
}

impl TeacherForcingMode {
    pub const VARIANTS: &'static [&'static str] = &["constant", "scheduled"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::Scheduled => "scheduled",
        }
    }
}

impl FromStr for TeacherForcingMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "constant" => Ok(Self::Constant),
            "scheduled" => Ok(Self::Scheduled),
            a => Err(format!(
                "Unknown teacher forcing mode `{a}`. Possible modes: `constant`, `scheduled`."
            )),
        }
    }
}

macro_rules! string_enum_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl Field for $ty {
                type Ref<'a> = $ty;

                fn kind() -> String {
                    format!("one of {}", <$ty>::VARIANTS.join(", "))
                }

                fn get(&self) -> $ty {
                    *self
                }

                fn to_value(&self) -> Value {
                    Value::Str(self.as_str().to_string())
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Str(s) => s.parse().ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

string_enum_field!(InputType, TeacherForcingMode);
