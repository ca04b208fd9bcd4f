use super::*;

#[test]
fn defaults_validate() {
    let opts = BinOpts::default();
    opts.validate().unwrap();
    assert_eq!(opts.preferred_depth, DepthPreference::Highest);
    assert_eq!(opts.supported_depths, DepthMask::all());
    assert_eq!(opts.morph_duration(), Duration::from_secs(4));
}

#[test]
fn empty_mask_is_rejected() {
    let opts = BinOpts {
        supported_depths: DepthMask::empty(),
        ..BinOpts::default()
    };
    let err = opts.validate().unwrap_err();
    assert!(err.to_string().starts_with("validation error:"));
}

#[test]
fn blank_morph_name_is_rejected() {
    let opts = BinOpts {
        morph: Some("  ".to_owned()),
        ..BinOpts::default()
    };
    assert!(matches!(opts.validate(), Err(BinError::Validation(_))));
}

#[test]
fn zero_duration_is_allowed() {
    let opts = BinOpts {
        morph_duration_ms: 0,
        ..BinOpts::default()
    };
    opts.validate().unwrap();
    assert!(opts.morph_duration().is_zero());
}

#[test]
fn partial_json_fills_defaults() {
    let opts: BinOpts =
        serde_json::from_str(r#"{ "use_morph": true, "morph": "wipe", "preferred_depth": "lowest" }"#)
            .unwrap();
    assert!(opts.use_morph);
    assert_eq!(opts.morph.as_deref(), Some("wipe"));
    assert_eq!(opts.preferred_depth, DepthPreference::Lowest);
    assert_eq!(opts.morph_duration_ms, 4000);
}

#[test]
fn unknown_fields_are_rejected() {
    let res: Result<BinOpts, _> = serde_json::from_str(r#"{ "use_morf": true }"#);
    assert!(res.is_err());
}
