use analysis_dashboard::core::{ChartDefinition, SeriesRef, YAxisScalingMode};
use analysis_dashboard::{ChartError, ChartLayout, DashboardConfig};

#[test]
fn parses_chart_definitions_with_original_field_names() {
    let json = r##"{
        "charts": [
            {
                "chartKey": "latency",
                "chartTitle": "Request latency",
                "chartSeries": [
                    {"id": "p50", "name": "median", "color": "#0af", "dashed": true},
                    {"id": "p99", "name": "tail"}
                ],
                "chartAnnotations": [{"x": 1700000000, "text": "release"}],
                "chartYAxis": "log"
            }
        ]
    }"##;

    let config = DashboardConfig::from_json_str(json).expect("parse config");

    let chart = &config.charts[0];
    assert_eq!(chart.key, "latency");
    assert_eq!(chart.y_axis, YAxisScalingMode::Log);
    assert_eq!(chart.series[0].color.as_deref(), Some("#0af"));
    assert_eq!(chart.series[0].extra["dashed"], serde_json::json!(true));
    assert_eq!(config.layout, ChartLayout::default());
    assert_eq!(config.layout.right_column_width, 400);
    assert_eq!(config.layout.vertical_chrome, 160);
    assert_eq!(config.series_cache_dir, "jscache");
}

#[test]
fn config_survives_json_round_trip() {
    let config = DashboardConfig::new(vec![
        ChartDefinition::new(
            "cpu",
            "CPU",
            vec![SeriesRef::new("cpu_user", "user").with_title("User time")],
        )
        .with_y_axis(YAxisScalingMode::IndexedTo100),
    ])
    .with_default_chart("cpu")
    .with_series_cache_dir("cache/series");

    let json = config.to_json_pretty().expect("serialize");
    assert!(json.contains("\"chartKey\": \"cpu\""));
    let restored = DashboardConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);
}

#[test]
fn catalog_rejects_duplicate_keys_and_unknown_default() {
    let duplicate = DashboardConfig::new(vec![
        ChartDefinition::new("cpu", "CPU", Vec::new()),
        ChartDefinition::new("cpu", "CPU again", Vec::new()),
    ]);
    assert!(matches!(duplicate.catalog(), Err(ChartError::InvalidData(_))));

    let unknown_default =
        DashboardConfig::new(vec![ChartDefinition::new("cpu", "CPU", Vec::new())])
            .with_default_chart("disk");
    assert!(matches!(
        unknown_default.catalog(),
        Err(ChartError::UnknownChart { .. })
    ));
}

#[test]
fn catalog_rejects_series_without_id() {
    let config = DashboardConfig::new(vec![ChartDefinition::new(
        "cpu",
        "CPU",
        vec![SeriesRef::new("", "nameless")],
    )]);
    assert!(config.catalog().is_err());
}

#[test]
fn malformed_json_is_a_config_error() {
    let err = DashboardConfig::from_json_str("{\"charts\": 3}").expect_err("bad config");
    assert!(matches!(err, ChartError::InvalidConfig(_)));
}

#[test]
fn scaling_mode_parses_query_spellings() {
    assert_eq!("LOG".parse::<YAxisScalingMode>().ok(), Some(YAxisScalingMode::Log));
    assert_eq!(
        "indexed".parse::<YAxisScalingMode>().ok(),
        Some(YAxisScalingMode::IndexedTo100)
    );
    assert!("cubic".parse::<YAxisScalingMode>().is_err());
    assert_eq!(YAxisScalingMode::Percentage.to_string(), "percentage");
}
