use std::{sync::Arc, thread};

use serde_json::json;
use tacowave_core::{HParams, HParamsError, Overrides, Value, LOG_SCALE_MIN_FLOOR};

#[test]
fn construction_is_deterministic() {
    let overrides = Overrides::parse("n_fft=2048,tacotron_batch_size=48,input_type=mulaw").unwrap();
    let a = HParams::from_overrides(&overrides).unwrap();
    let b = HParams::from_overrides(&overrides).unwrap();
    assert_eq!(a.values(), b.values());
    assert_eq!(a.win_size(), b.win_size());
    assert_eq!(a.log_scale_min().to_bits(), b.log_scale_min().to_bits());
}

#[test]
fn win_size_follows_n_fft() {
    let hparams = HParams::new().unwrap();
    assert_eq!(hparams.n_fft(), 1024);
    assert_eq!(hparams.win_size(), 1024);
    assert_eq!(hparams.get("win_size").unwrap(), Value::Int(1024));

    let hparams = HParams::from_overrides(&Overrides::new().with("n_fft", 2048)).unwrap();
    assert_eq!(hparams.win_size(), 2048);

    let hparams = HParams::from_overrides(&Overrides::new().with("win_size", 800)).unwrap();
    assert_eq!(hparams.win_size(), 800);
}

#[test]
fn log_scale_min_is_fixed() {
    let expected = LOG_SCALE_MIN_FLOOR.ln();
    assert_eq!(expected, (1e-14f64).ln());
    assert_eq!(HParams::new().unwrap().log_scale_min(), expected);

    let other = HParams::from_overrides(
        &Overrides::new()
            .with("sample_rate", 22050)
            .with("num_mels", 128)
            .with("cin_channels", 128),
    )
    .unwrap();
    assert_eq!(other.log_scale_min(), expected);
    assert!(expected.is_finite());
}

#[test]
fn fields_cannot_be_written() {
    let hparams = HParams::new().unwrap();
    let err = hparams.set("hop_size", 512).unwrap_err();
    assert!(matches!(err, HParamsError::ImmutableField { name: "hop_size" }));
    assert_eq!(hparams.hop_size(), 256);

    let err = hparams.set("hop_sizes", 512).unwrap_err();
    assert!(matches!(err, HParamsError::Schema { .. }));
}

#[test]
fn unknown_fields_are_rejected() {
    let result = HParams::from_overrides(&Overrides::new().with("n_ffft", 2048));
    match result {
        Err(HParamsError::Schema { name }) => assert_eq!(name, "n_ffft"),
        other => panic!("expected a schema error, got {other:?}"),
    }
    assert!(matches!(
        HParams::new().unwrap().get("n_ffft"),
        Err(HParamsError::Schema { .. })
    ));
}

#[test]
fn debug_string_is_sorted_stable_and_skips_bulk_data() {
    let hparams = HParams::new().unwrap();
    let first = hparams.debug_string();
    assert_eq!(first, hparams.debug_string());
    assert_eq!(first, hparams.clone().debug_string());

    let mut lines = first.lines();
    assert_eq!(lines.next(), Some("Hyperparameters:"));
    let names = lines
        .map(|line| {
            line.trim_start()
                .split_once(": ")
                .map(|(name, _)| name.to_string())
                .unwrap()
        })
        .collect::<Vec<_>>();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert!(!names.iter().any(|name| name == "sentences"));
    assert_eq!(names.len(), HParams::schema().len() - 1);

    for sentence in hparams.sentences() {
        assert!(!first.contains(sentence.as_str()));
    }
}

#[test]
fn debug_string_formats_each_type() {
    let text = HParams::new().unwrap().debug_string();
    for expected in [
        "  allow_clipping_in_normalization: true",
        "  attention_kernel: [31]",
        "  cleaners: basic_cleaners",
        "  frame_shift_ms: none",
        "  gin_channels: -1",
        "  input_type: raw",
        "  max_abs_value: 4.0",
        "  tacotron_reg_weight: 1e-6",
        "  upsample_scales: [16, 16]",
        "  win_size: 1024",
        "  log_scale_min: -32.23619130191664",
    ] {
        assert!(text.contains(expected), "missing `{expected}` in\n{text}");
    }
}

#[test]
fn upsample_scales_must_multiply_to_hop_size() {
    let ok = Overrides::new()
        .with("upsample_scales", vec![16, 16])
        .with("hop_size", 256);
    assert!(HParams::from_overrides(&ok).is_ok());

    let bad = Overrides::new()
        .with("upsample_scales", vec![16, 16])
        .with("hop_size", 512);
    let err = HParams::from_overrides(&bad).unwrap_err();
    let violations = err.violations();
    assert_eq!(violations.len(), 1);
    assert!(violations[0].involves("upsample_scales"));
    assert!(violations[0].involves("hop_size"));
    assert!(err.to_string().contains("upsample_scales"));
}

#[test]
fn advisory_construction_returns_violations() {
    let bad = Overrides::new().with("hop_size", 512).with("cin_channels", 40);
    let (hparams, violations) = HParams::from_overrides_advisory(&bad).unwrap();
    assert_eq!(hparams.hop_size(), 512);
    assert_eq!(violations.len(), 2);

    assert!(matches!(
        HParams::from_overrides_advisory(&Overrides::new().with("bogus", 1)),
        Err(HParamsError::Schema { .. })
    ));
}

#[test]
fn with_overrides_rederives_and_keeps_other_fields() {
    let parent = HParams::from_overrides(&Overrides::new().with("tacotron_batch_size", 16)).unwrap();
    let child = parent
        .with_overrides(&Overrides::new().with("n_fft", 2048))
        .unwrap();

    assert_eq!(child.n_fft(), 2048);
    assert_eq!(child.win_size(), 2048);
    assert_eq!(parent.n_fft(), 1024);
    assert_eq!(parent.win_size(), 1024);

    let parent_values = parent.values();
    let child_values = child.values();
    for (name, value) in &parent_values {
        if *name == "n_fft" || *name == "win_size" {
            continue;
        }
        assert_eq!(child_values.get(name), Some(value), "field `{name}` changed");
    }
    assert_eq!(child.tacotron_batch_size(), 16);
    assert_eq!(child.overrides().len(), 2);
}

#[test]
fn with_overrides_keeps_explicit_window() {
    let parent = HParams::from_overrides(&Overrides::new().with("win_size", 800)).unwrap();
    let child = parent
        .with_overrides(&Overrides::new().with("n_fft", 2048))
        .unwrap();
    assert_eq!(child.win_size(), 800);
}

#[test]
fn with_overrides_rechecks_relations() {
    let parent = HParams::new().unwrap();
    let err = parent
        .with_overrides(&Overrides::new().with("hop_size", 512))
        .unwrap_err();
    assert!(matches!(err, HParamsError::Configuration(_)));

    let child = parent
        .with_overrides(
            &Overrides::new()
                .with("hop_size", 512)
                .with("upsample_scales", vec![16, 32]),
        )
        .unwrap();
    assert_eq!(child.upsample_scales(), &[16, 32]);
}

#[test]
fn type_mismatches_are_rejected() {
    for (name, value) in [
        ("enc_conv_kernel_size", Value::Int(5)),
        ("n_fft", Value::Float(1024.5)),
        ("hop_size", Value::Int(-256)),
        ("rescale", Value::Str("yes".to_string())),
        ("upsample_scales", Value::Int(256)),
        ("tacotron_teacher_forcing_mode", Value::Str("cosine".to_string())),
    ] {
        let err = HParams::from_overrides(&Overrides::new().with(name, value)).unwrap_err();
        assert!(
            matches!(err, HParamsError::TypeMismatch { name: field, .. } if field == name),
            "{name}: {err}"
        );
    }
}

#[test]
fn json_overrides_build_a_set() {
    let doc = json!({
        "sample_rate": 22050,
        "hop_size": 275,
        "upsample_scales": [11, 25],
        "use_lws": false,
        "fmax": 7600,
        "rescaling_max": 0.9
    });
    let hparams = HParams::from_overrides(&Overrides::from_json(&doc.to_string()).unwrap()).unwrap();
    assert_eq!(hparams.hop_size(), 275);
    assert_eq!(hparams.upsample_product(), 275);
    assert_eq!(hparams.rescaling_max(), 0.9);
}

#[test]
fn shared_across_threads() {
    let hparams = Arc::new(HParams::new().unwrap());
    let expected = hparams.debug_string();
    let handles = (0..4)
        .map(|_| {
            let hparams = Arc::clone(&hparams);
            thread::spawn(move || hparams.debug_string())
        })
        .collect::<Vec<_>>();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn non_finite_floats_are_rejected() {
    for raw in ["tacotron_reg_weight=nan", "wavenet_dropout=inf"] {
        let overrides = Overrides::parse(raw).unwrap();
        let err = HParams::from_overrides(&overrides).unwrap_err();
        assert!(matches!(err, HParamsError::TypeMismatch { .. }), "{raw}: {err}");
    }
    let err = HParams::from_overrides(&Overrides::new().with("tacotron_reg_weight", f64::NAN))
        .unwrap_err();
    assert!(matches!(
        err,
        HParamsError::TypeMismatch {
            name: "tacotron_reg_weight",
            ..
        }
    ));
}
