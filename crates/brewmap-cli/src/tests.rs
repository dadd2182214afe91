use super::*;

fn config() -> AppConfig {
    AppConfig {
        google_maps_api_key: "maps-key".to_owned(),
        anthropic_api_key: None,
        log_level: "info".to_owned(),
        request_timeout_secs: 30,
        user_agent: "brewmap-test".to_owned(),
        pacing_delay_ms: 100,
        max_photos: 10,
        photo_max_width: 800,
        photo_max_height: 600,
        max_concurrent: 1,
        review_model: "claude-test".to_owned(),
        review_max_tokens: 1500,
        places_base_url: None,
        anthropic_base_url: None,
    }
}

#[test]
fn input_file_is_required() {
    assert!(Cli::try_parse_from(["brewmap"]).is_err());
}

#[test]
fn defaults_enable_reviews_html_and_photos() {
    let cli = Cli::try_parse_from(["brewmap", "--input-file", "list.csv"])
        .expect("expected valid cli args");
    assert_eq!(cli.input_file, PathBuf::from("list.csv"));
    assert_eq!(cli.output_path, PathBuf::from("output"));
    assert!(!cli.geojson);
    assert!(!cli.quiet);
    assert!(cli.reviews_enabled());
    assert!(cli.html_enabled());
    assert!(cli.photos_enabled());
}

#[test]
fn negative_flags_disable_features() {
    let cli = Cli::try_parse_from([
        "brewmap",
        "--input-file",
        "list.csv",
        "--no-generate-reviews",
        "--no-generate-html",
        "--no-download-photos",
        "--geojson",
    ])
    .expect("expected valid cli args");
    assert!(!cli.reviews_enabled());
    assert!(!cli.html_enabled());
    assert!(!cli.photos_enabled());
    assert!(cli.geojson);
}

#[test]
fn last_toggle_wins() {
    let cli = Cli::try_parse_from([
        "brewmap",
        "--input-file",
        "list.csv",
        "--no-generate-reviews",
        "--generate-reviews",
    ])
    .expect("expected valid cli args");
    assert!(cli.reviews_enabled());
}

#[test]
fn quiet_conflicts_with_verbose() {
    let result = Cli::try_parse_from([
        "brewmap",
        "--input-file",
        "list.csv",
        "--quiet",
        "--verbose",
    ]);
    assert!(result.is_err());
}

#[test]
fn zero_concurrency_is_rejected() {
    let result = Cli::try_parse_from([
        "brewmap",
        "--input-file",
        "list.csv",
        "--concurrency",
        "0",
    ]);
    assert!(result.is_err());
}

#[test]
fn options_fall_back_to_config() {
    let cli = Cli::try_parse_from(["brewmap", "--input-file", "list.csv"])
        .expect("expected valid cli args");
    let options = cli.enrich_options(&config());
    assert_eq!(options.pacing_delay, Duration::from_millis(100));
    assert_eq!(options.max_photos, 10);
    assert_eq!(options.max_concurrent, 1);
    assert_eq!(
        options.photo_size,
        PhotoSize {
            width: 800,
            height: 600
        }
    );
    assert!(options.download_photos);
    assert!(options.generate_reviews);
}

#[test]
fn flags_override_config() {
    let cli = Cli::try_parse_from([
        "brewmap",
        "--input-file",
        "list.csv",
        "--max-photos",
        "3",
        "--pacing-delay-ms",
        "0",
        "--concurrency",
        "4",
    ])
    .expect("expected valid cli args");
    let options = cli.enrich_options(&config());
    assert_eq!(options.max_photos, 3);
    assert_eq!(options.pacing_delay, Duration::ZERO);
    assert_eq!(options.max_concurrent, 4);
}

#[test]
fn review_client_absent_without_key() {
    let cli = Cli::try_parse_from(["brewmap", "--input-file", "list.csv"])
        .expect("expected valid cli args");
    assert!(build_review_client(&cli, &config()).unwrap().is_none());

    let mut with_key = config();
    with_key.anthropic_api_key = Some("sk-ant-test".to_owned());
    assert!(build_review_client(&cli, &with_key).unwrap().is_some());

    let disabled = Cli::try_parse_from(["brewmap", "--input-file", "list.csv", "--no-generate-reviews"])
        .expect("expected valid cli args");
    assert!(build_review_client(&disabled, &with_key).unwrap().is_none());
}
