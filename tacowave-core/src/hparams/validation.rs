use super::HParams;
use crate::{InputType, Violation};

impl HParams {
    /// Every cross-field relation that does not hold, in a fixed order.
    pub(crate) fn check_invariants(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        let win_size = self.win_size();

        if self.hop_size == 0 {
            violations.push(Violation::new(&["hop_size"], "hop_size must be positive"));
        }

        if self.upsample_conditional_features && self.upsample_product() != self.hop_size {
            violations.push(Violation::new(
                &["upsample_scales", "hop_size"],
                format!(
                    "product of upsample_scales {:?} ({}) must equal hop_size ({})",
                    self.upsample_scales,
                    self.upsample_product(),
                    self.hop_size
                ),
            ));
        }

        if self.cin_channels != -1 && self.local_conditioning() != Some(self.num_mels) {
            violations.push(Violation::new(
                &["cin_channels", "num_mels"],
                format!(
                    "cin_channels ({}) must be -1 or equal num_mels ({})",
                    self.cin_channels, self.num_mels
                ),
            ));
        }

        if self.gin_channels != -1 && self.gin_channels <= 0 {
            violations.push(Violation::new(
                &["gin_channels"],
                format!(
                    "gin_channels ({}) must be -1 or positive",
                    self.gin_channels
                ),
            ));
        }

        if win_size > self.n_fft {
            violations.push(Violation::new(
                &["win_size", "n_fft"],
                format!(
                    "win_size ({win_size}) must not exceed n_fft ({})",
                    self.n_fft
                ),
            ));
        }

        if self.use_lws && self.n_fft.checked_rem(self.hop_size).is_some_and(|r| r != 0) {
            violations.push(Violation::new(
                &["use_lws", "n_fft", "hop_size"],
                format!(
                    "n_fft ({}) must be a multiple of hop_size ({}) when use_lws is set",
                    self.n_fft, self.hop_size
                ),
            ));
        }

        if self.predict_linear && self.num_freq != self.n_fft / 2 + 1 {
            violations.push(Violation::new(
                &["num_freq", "n_fft"],
                format!(
                    "num_freq ({}) must equal n_fft / 2 + 1 ({}) when predict_linear is set",
                    self.num_freq,
                    self.n_fft / 2 + 1
                ),
            ));
        }

        match self.input_type {
            InputType::MulawQuantize if self.out_channels != self.quantize_channels => {
                violations.push(Violation::new(
                    &["out_channels", "quantize_channels", "input_type"],
                    format!(
                        "out_channels ({}) must equal quantize_channels ({}) for mulaw-quantize input",
                        self.out_channels, self.quantize_channels
                    ),
                ));
            }
            InputType::Raw | InputType::Mulaw if self.out_channels % 3 != 0 => {
                violations.push(Violation::new(
                    &["out_channels", "input_type"],
                    format!(
                        "out_channels ({}) must be a multiple of 3 (probability, mean, log scale) for {} input",
                        self.out_channels, self.input_type
                    ),
                ));
            }
            _ => {}
        }

        if self.fmin >= self.fmax {
            violations.push(Violation::new(
                &["fmin", "fmax"],
                format!("fmin ({}) must be below fmax ({})", self.fmin, self.fmax),
            ));
        }
        if self.fmax.saturating_mul(2) > self.sample_rate {
            violations.push(Violation::new(
                &["fmax", "sample_rate"],
                format!(
                    "fmax ({}) must not exceed the Nyquist frequency ({})",
                    self.fmax,
                    self.sample_rate / 2
                ),
            ));
        }

        if self.tacotron_test_size.is_none() && self.tacotron_test_batches.is_none() {
            violations.push(Violation::new(
                &["tacotron_test_size", "tacotron_test_batches"],
                "one of tacotron_test_size or tacotron_test_batches must be set",
            ));
        }
        if self.wavenet_test_size.is_none() && self.wavenet_test_batches.is_none() {
            violations.push(Violation::new(
                &["wavenet_test_size", "wavenet_test_batches"],
                "one of wavenet_test_size or wavenet_test_batches must be set",
            ));
        }

        for (name, ratio) in [
            (
                "tacotron_teacher_forcing_ratio",
                self.tacotron_teacher_forcing_ratio,
            ),
            (
                "tacotron_teacher_forcing_init_ratio",
                self.tacotron_teacher_forcing_init_ratio,
            ),
            (
                "tacotron_teacher_forcing_final_ratio",
                self.tacotron_teacher_forcing_final_ratio,
            ),
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                violations.push(Violation::new(
                    &[name],
                    format!("{name} ({ratio:?}) must lie in [0, 1]"),
                ));
            }
        }

        if self.tacotron_final_learning_rate > self.tacotron_initial_learning_rate {
            violations.push(Violation::new(
                &[
                    "tacotron_final_learning_rate",
                    "tacotron_initial_learning_rate",
                ],
                format!(
                    "tacotron_final_learning_rate ({:?}) must not exceed tacotron_initial_learning_rate ({:?})",
                    self.tacotron_final_learning_rate, self.tacotron_initial_learning_rate
                ),
            ));
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use crate::{HParams, HParamsError, Overrides};

    fn violations_for(overrides: Overrides) -> Vec<String> {
        match HParams::from_overrides(&overrides) {
            Ok(_) => Vec::new(),
            Err(HParamsError::Configuration(violations)) => {
                violations.iter().map(|v| v.fields.join(",")).collect()
            }
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn upsample_product_must_match_hop_size() {
        assert!(violations_for(Overrides::new().with("upsample_scales", vec![16, 16])).is_empty());
        assert_eq!(
            violations_for(Overrides::new().with("hop_size", 512)),
            vec!["upsample_scales,hop_size"]
        );
    }

    #[test]
    fn upsample_check_skipped_when_features_are_repeated() {
        let overrides = Overrides::new()
            .with("hop_size", 512)
            .with("upsample_conditional_features", false);
        assert!(violations_for(overrides).is_empty());
    }

    #[test]
    fn local_conditioning_must_match_mels() {
        assert_eq!(
            violations_for(Overrides::new().with("cin_channels", 40)),
            vec!["cin_channels,num_mels"]
        );
        assert!(violations_for(Overrides::new().with("cin_channels", -1)).is_empty());
        assert_eq!(
            violations_for(Overrides::new().with("gin_channels", 0)),
            vec!["gin_channels"]
        );
    }

    #[test]
    fn every_violation_is_reported() {
        let overrides = Overrides::new()
            .with("hop_size", 300)
            .with("cin_channels", 64)
            .with("win_size", 2048)
            .with("tacotron_test_batches", None::<i64>);
        assert_eq!(
            violations_for(overrides),
            vec![
                "upsample_scales,hop_size",
                "cin_channels,num_mels",
                "win_size,n_fft",
                "use_lws,n_fft,hop_size",
                "tacotron_test_size,tacotron_test_batches",
            ]
        );
    }

    #[test]
    fn zero_hop_size_does_not_panic() {
        let found = violations_for(Overrides::new().with("hop_size", 0));
        assert!(found.contains(&"hop_size".to_string()));
        assert!(found.contains(&"upsample_scales,hop_size".to_string()));
    }

    #[test]
    fn output_channels_follow_input_type() {
        assert_eq!(
            violations_for(Overrides::new().with("input_type", "mulaw-quantize")),
            vec!["out_channels,quantize_channels,input_type"]
        );
        assert_eq!(
            violations_for(Overrides::new().with("out_channels", 32)),
            vec!["out_channels,input_type"]
        );
    }

    #[test]
    fn linear_bins_checked_only_when_predicted() {
        assert!(violations_for(Overrides::new().with("num_freq", 1025)).is_empty());
        let overrides = Overrides::new()
            .with("num_freq", 1025)
            .with("predict_linear", true);
        assert_eq!(violations_for(overrides), vec!["num_freq,n_fft"]);
    }

    #[test]
    fn frequency_bounds_and_schedules() {
        assert_eq!(
            violations_for(Overrides::new().with("fmax", 9000)),
            vec!["fmax,sample_rate"]
        );
        assert_eq!(
            violations_for(Overrides::new().with("tacotron_teacher_forcing_ratio", 1.5)),
            vec!["tacotron_teacher_forcing_ratio"]
        );
        assert_eq!(
            violations_for(Overrides::new().with("tacotron_final_learning_rate", 1e-2)),
            vec!["tacotron_final_learning_rate,tacotron_initial_learning_rate"]
        );
    }
}
