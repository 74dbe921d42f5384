//! Typed hyperparameters for a Tacotron-2 spectrogram model and WaveNet vocoder.
//!
//! [`HParams`] is built once from compiled-in defaults and an optional set of
//! [`Overrides`], runs its derivation rules, checks every cross-field relation
//! and is read-only afterwards. Share it by reference or clone; a changed
//! configuration is a new value from [`HParams::with_overrides`].
//!
//! ```
//! use tacowave_core::{HParams, Overrides};
//!
//! let hparams = HParams::from_overrides(&Overrides::parse("n_fft=2048").unwrap()).unwrap();
//! assert_eq!(hparams.win_size(), 2048);
//! println!("{}", hparams.debug_string());
//! ```

#[macro_use]
mod macros;

mod error;
pub mod field;
mod hparams;
mod modes;
mod overrides;
mod utils;
mod value;

pub use error::{HParamsError, Result, Violation};
pub use field::{Field, FieldSpec, Origin, Render};
pub use hparams::{HParams, LOG_SCALE_MIN_FLOOR};
pub use modes::{InputType, TeacherForcingMode};
pub use overrides::Overrides;
pub use utils::debug::initialize_logging;
pub use value::Value;
