use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::{
    field::{Field, FieldSpec, Origin, Render},
    HParamsError, InputType, Overrides, Result, TeacherForcingMode, Value, Violation,
};

mod sentences;
mod validation;

use sentences::default_sentences;

/// Floor whose natural logarithm is the minimum log scale of the logistic mixture.
pub const LOG_SCALE_MIN_FLOOR: f64 = 1e-14;

hparams! {
    /// Text cleaners run before training and eval. Use `basic_cleaners` or
    /// `transliteration_cleaners` for non-English text.
    cleaners: String = String::from("basic_cleaners");

    gpu_start_idx: usize = 0;
    /// Use every available GPU; overrides `num_gpus`.
    use_all_gpus: bool = false;
    num_gpus: usize = 2;

    /// Mel channels; also the local conditioning width of the vocoder.
    num_mels: usize = 80;
    /// Linear spectrogram bins (`n_fft / 2 + 1`). Only used with `predict_linear`.
    num_freq: usize = 513;
    rescale: bool = true;
    rescaling_max: f64 = 0.999;
    /// Trim leading and trailing silence.
    trim_silence: bool = true;
    clip_mels_length: bool = true;
    /// Only relevant when `clip_mels_length` is set.
    max_mel_frames: usize = 900;
    /// Use LWS for STFT and phase reconstruction. Requires `n_fft` to be a
    /// multiple of `hop_size`.
    use_lws: bool = true;
    silence_threshold: usize = 2;

    /// FFT size. Extra window size is zero padded up to this value.
    n_fft: usize = 1024;
    /// Frame shift in samples.
    hop_size: usize = 256;
    /// Window size in samples; `n_fft` when unset.
    win_size: Option<usize> = None => derived;
    sample_rate: usize = 16000;
    /// When set and `hop_size` is not overridden, `hop_size` is derived from it
    /// and `sample_rate`. For 22050 Hz, 12.5 ms gives 275.
    frame_shift_ms: Option<f64> = None;

    trim_fft_size: usize = 512;
    trim_hop_size: usize = 128;
    trim_top_db: usize = 60;

    signal_normalization: bool = true;
    /// Only relevant with `signal_normalization`.
    allow_clipping_in_normalization: bool = true;
    /// Scale to `[-max_abs_value, max_abs_value]` instead of `[0, max_abs_value]`.
    symmetric_mels: bool = true;
    max_abs_value: f64 = 4.0;

    min_level_db: i64 = -100;
    ref_level_db: i64 = 20;
    fmin: usize = 25;
    fmax: usize = 7600;

    /// Griffin-Lim magnitude exponent.
    power: f64 = 1.2;
    griffin_lim_iters: usize = 60;

    /// Frames generated per decoder step.
    outputs_per_step: usize = 1;
    /// Stop when any frame predicts `<stop>` rather than all of them.
    stop_at_any: bool = true;
    embedding_dim: usize = 512;

    enc_conv_num_layers: usize = 3;
    enc_conv_kernel_size: [usize; 1] = [5];
    enc_conv_channels: usize = 512;
    /// LSTM units per direction.
    encoder_lstm_units: usize = 256;

    smoothing: bool = false;
    attention_dim: usize = 128;
    attention_filters: usize = 32;
    attention_kernel: [usize; 1] = [31];
    /// Accumulate previous attention weights instead of feeding only the last ones.
    cumulative_weights: bool = true;

    /// Units per prenet layer; the length is the layer count.
    prenet_layers: Vec<usize> = vec![256, 256];
    decoder_layers: usize = 2;
    decoder_lstm_units: usize = 1024;
    /// Decoder step limit at inference.
    max_iters: usize = 2500;

    postnet_num_layers: usize = 5;
    postnet_kernel_size: [usize; 1] = [5];
    postnet_channels: usize = 512;

    mask_encoder: bool = false;
    /// Mask padded frames in the loss.
    mask_decoder: bool = false;

    /// Stop-token positive class weight (1 disables).
    cross_entropy_pos_weight: f64 = 20.0;
    predict_linear: bool = false;

    input_type: InputType = InputType::Raw;
    /// 65536 for 16-bit raw input, 256 for mu-law.
    quantize_channels: usize = 65536;
    /// Minimum log scale of the logistic mixture, `ln(1e-14)`.
    log_scale_min: f64 = 0.0 => computed;
    /// `quantize_channels` for `mulaw-quantize`, otherwise `num_distributions * 3`.
    out_channels: usize = 30;
    layers: usize = 24;
    stacks: usize = 4;
    residual_channels: usize = 512;
    /// Split in two by the gated activation.
    gate_channels: usize = 512;
    skip_out_channels: usize = 256;
    kernel_size: usize = 3;

    /// Local conditioning width; `-1` disables it, otherwise must equal `num_mels`.
    cin_channels: i64 = 80;
    /// Upsample conditional features instead of repeating them.
    upsample_conditional_features: bool = true;
    /// Their product must equal `hop_size`.
    upsample_scales: Vec<usize> = vec![16, 16];
    freq_axis_kernel_size: usize = 3;

    /// Global conditioning width; `-1` disables it. Multi-speaker only.
    gin_channels: i64 = -1;
    use_bias: bool = true;

    /// When set and `max_time_steps` is not overridden, `max_time_steps` is
    /// derived from it and `sample_rate`.
    max_time_sec: Option<f64> = None;
    max_time_steps: usize = 13000;

    tacotron_random_seed: u64 = 5339;
    tacotron_swap_with_cpu: bool = false;

    tacotron_batch_size: usize = 32;
    /// L2 regularization weight.
    tacotron_reg_weight: f64 = 1e-6;
    tacotron_scale_regularization: bool = true;

    /// Fraction of data held out for test; `tacotron_test_batches` is used when unset.
    tacotron_test_size: Option<f64> = None;
    tacotron_test_batches: Option<usize> = Some(32);
    tacotron_data_random_state: u64 = 1234;

    /// Exponential learning rate decay.
    tacotron_decay_learning_rate: bool = true;
    tacotron_start_decay: usize = 50000;
    tacotron_decay_steps: usize = 50000;
    tacotron_decay_rate: f64 = 0.4;
    tacotron_initial_learning_rate: f64 = 1e-3;
    tacotron_final_learning_rate: f64 = 1e-5;

    tacotron_adam_beta1: f64 = 0.9;
    tacotron_adam_beta2: f64 = 0.999;
    tacotron_adam_epsilon: f64 = 1e-6;

    tacotron_zoneout_rate: f64 = 0.1;
    tacotron_dropout_rate: f64 = 0.5;

    /// Evaluate without teacher forcing.
    natural_eval: bool = false;

    tacotron_teacher_forcing_mode: TeacherForcingMode = TeacherForcingMode::Constant;
    /// Only used in `constant` mode.
    tacotron_teacher_forcing_ratio: f64 = 1.0;
    tacotron_teacher_forcing_init_ratio: f64 = 1.0;
    tacotron_teacher_forcing_final_ratio: f64 = 0.0;
    tacotron_teacher_forcing_start_decay: usize = 10000;
    tacotron_teacher_forcing_decay_steps: usize = 280000;
    tacotron_teacher_forcing_decay_alpha: f64 = 0.0;

    wavenet_random_seed: u64 = 5339;
    wavenet_swap_with_cpu: bool = false;

    wavenet_batch_size: usize = 4;
    wavenet_test_size: Option<f64> = Some(0.0441);
    wavenet_test_batches: Option<usize> = None;
    wavenet_data_random_state: u64 = 1234;

    wavenet_learning_rate: f64 = 1e-4;
    wavenet_adam_beta1: f64 = 0.9;
    wavenet_adam_beta2: f64 = 0.999;
    wavenet_adam_epsilon: f64 = 1e-6;

    /// Decay of the weight exponential moving average.
    wavenet_ema_decay: f64 = 0.9999;
    wavenet_dropout: f64 = 0.05;
    /// Train the vocoder on ground-truth-aligned mels instead of ground truth.
    train_with_gta: bool = false;

    /// Evaluation sentences used when no eval file is given.
    sentences: Vec<String> = default_sentences() => bulk;
}

static SCHEMA_INDEX: Lazy<HashMap<&'static str, &'static FieldSpec>> =
    Lazy::new(|| SCHEMA.iter().map(|spec| (spec.name, spec)).collect());

fn store<T: Field>(slot: &mut T, name: &'static str, value: &Value) -> Result<()> {
    *slot = T::from_value(value).ok_or_else(|| HParamsError::TypeMismatch {
        name,
        expected: T::kind(),
        found: value.describe(),
    })?;
    Ok(())
}

/// Whole samples covering `seconds` at `sample_rate`, truncated.
fn samples_for(seconds: f64, sample_rate: usize) -> usize {
    (seconds * sample_rate as f64).floor().max(0.0) as usize
}

impl HParams {
    /// The compiled-in defaults, derived and validated.
    pub fn new() -> Result<Self> {
        Self::from_overrides(&Overrides::new())
    }

    /// Build a set from compiled-in defaults and `overrides`.
    ///
    /// Overrides are type-checked against the schema, derivation rules run in
    /// order, and then every cross-field relation is checked. All violated
    /// relations are reported together in [`HParamsError::Configuration`].
    pub fn from_overrides(overrides: &Overrides) -> Result<Self> {
        let hparams = Self::resolve(overrides)?;
        let violations = hparams.check_invariants();
        if !violations.is_empty() {
            return Err(HParamsError::Configuration(violations));
        }
        Ok(hparams)
    }

    /// Like [`HParams::from_overrides`], but cross-field violations are logged and
    /// returned next to the set instead of failing construction.
    ///
    /// Schema and type errors still fail.
    pub fn from_overrides_advisory(overrides: &Overrides) -> Result<(Self, Vec<Violation>)> {
        let hparams = Self::resolve(overrides)?;
        let violations = hparams.check_invariants();
        for violation in &violations {
            warn!("Hyperparameter relation violated: {violation}");
        }
        Ok((hparams, violations))
    }

    /// Build a new set with `overrides` layered over the ones this set was built from.
    ///
    /// The whole pipeline runs again, so derived fields follow their inputs and
    /// every relation is re-checked.
    pub fn with_overrides(&self, overrides: &Overrides) -> Result<Self> {
        Self::from_overrides(&self.overrides.merge(overrides))
    }

    fn resolve(overrides: &Overrides) -> Result<Self> {
        let mut hparams = Self::compiled_defaults();
        for (name, value) in overrides.iter() {
            let spec = Self::field(name).ok_or_else(|| HParamsError::Schema {
                name: name.to_string(),
            })?;
            if spec.origin == Origin::Computed {
                return Err(HParamsError::DerivedField { name: spec.name });
            }
            hparams.assign(spec, value)?;
            debug!("Hyperparameter override `{name}` = {value}");
        }
        hparams.overrides = overrides.clone();
        hparams.derive();
        Ok(hparams)
    }

    /// Fill in fields that follow from others. An explicitly overridden
    /// target always wins over its source.
    fn derive(&mut self) {
        if let Some(frame_shift_ms) = self.frame_shift_ms {
            let derived = samples_for(frame_shift_ms / 1000.0, self.sample_rate);
            if self.overrides.get("hop_size").is_none() {
                self.hop_size = derived;
                debug!("`hop_size` = {derived} from `frame_shift_ms` = {frame_shift_ms}");
            } else if derived != self.hop_size {
                warn!(
                    "`frame_shift_ms` = {frame_shift_ms} ({derived} samples) ignored, `hop_size` = {} was set explicitly",
                    self.hop_size
                );
            }
        }
        if self.win_size.is_none() {
            debug!("`win_size` unset, using `n_fft` = {}", self.n_fft);
            self.win_size = Some(self.n_fft);
        }
        if let Some(max_time_sec) = self.max_time_sec {
            let derived = samples_for(max_time_sec, self.sample_rate);
            if self.overrides.get("max_time_steps").is_none() {
                self.max_time_steps = derived;
                debug!("`max_time_steps` = {derived} from `max_time_sec` = {max_time_sec}");
            } else if derived != self.max_time_steps {
                warn!(
                    "`max_time_sec` = {max_time_sec} ({derived} samples) ignored, `max_time_steps` = {} was set explicitly",
                    self.max_time_steps
                );
            }
        }
        self.log_scale_min = LOG_SCALE_MIN_FLOOR.ln();
    }

    /// Window size in samples. Equals `n_fft` unless overridden.
    pub fn win_size(&self) -> usize {
        self.win_size.unwrap_or(self.n_fft)
    }

    /// The explicit overrides this set was built from.
    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// Read a field by name.
    pub fn get(&self, name: &str) -> Result<Value> {
        self.field_value(name).ok_or_else(|| HParamsError::Schema {
            name: name.to_string(),
        })
    }

    /// Fields cannot be written once a set exists; this always fails.
    ///
    /// Returns [`HParamsError::ImmutableField`] for declared fields and
    /// [`HParamsError::Schema`] for unknown names. Use
    /// [`HParams::with_overrides`] to obtain a modified copy.
    pub fn set(&self, name: &str, _value: impl Into<Value>) -> Result<()> {
        match Self::field(name) {
            Some(spec) => Err(HParamsError::ImmutableField { name: spec.name }),
            None => Err(HParamsError::Schema {
                name: name.to_string(),
            }),
        }
    }

    /// Every field, bulk data included, sorted by name.
    pub fn values(&self) -> BTreeMap<&'static str, Value> {
        self.field_values().into_iter().collect()
    }

    /// Sorted `name: value` dump of every non-bulk field.
    ///
    /// The output only depends on the field values, so it is identical across
    /// calls and processes.
    pub fn debug_string(&self) -> String {
        let lines = self
            .values()
            .into_iter()
            .filter(|(name, _)| Self::field(name).is_some_and(|spec| spec.render == Render::Scalar))
            .map(|(name, value)| format!("  {name}: {value}"))
            .collect::<Vec<_>>();
        format!("Hyperparameters:\n{}", lines.join("\n"))
    }

    /// The schema rows in declaration order.
    pub fn schema() -> &'static [FieldSpec] {
        SCHEMA
    }

    /// Look up a schema row by field name.
    pub fn field(name: &str) -> Option<&'static FieldSpec> {
        SCHEMA_INDEX.get(name).copied()
    }

    /// Local conditioning width, `None` when disabled.
    pub fn local_conditioning(&self) -> Option<usize> {
        usize::try_from(self.cin_channels).ok()
    }

    /// Global conditioning width, `None` when disabled.
    pub fn global_conditioning(&self) -> Option<usize> {
        usize::try_from(self.gin_channels).ok()
    }

    /// Logistic mixture components predicted by the vocoder, `None` for `mulaw-quantize`.
    pub fn num_distributions(&self) -> Option<usize> {
        self.input_type
            .is_scalar_input()
            .then_some(self.out_channels / 3)
    }

    /// Product of `upsample_scales`, saturating on overflow.
    pub fn upsample_product(&self) -> usize {
        self.upsample_scales
            .iter()
            .fold(1usize, |acc, s| acc.saturating_mul(*s))
    }
}

impl Default for HParams {
    /// Compiled-in defaults after derivation. They satisfy every relation.
    fn default() -> Self {
        let mut hparams = Self::compiled_defaults();
        hparams.derive();
        hparams
    }
}
