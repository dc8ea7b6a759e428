//! End-to-end resolution flows across sources and variants.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use railyard_engine::types::{
    BoolParameter, BoolParsing, DateParameter, DictParameter, IntParameter, Optional, TaskParameter, TextParameter,
    TimeDeltaParameter,
};
use railyard_engine::{
    CliSession, FrozenValue, MemoryConfig, MemoryTaskRegistry, Parameter, ParameterError, ResolutionContext,
};

#[test]
fn priority_order_drops_source_by_source() -> Result<()> {
    let parameter = Parameter::builder(TextParameter::new())
        .default_value("compiled-in".to_string())
        .legacy_location("legacy_section", "legacy_name")
        .build();

    let mut cli = CliSession::new();
    cli.set("ingest_owner", "cli-value");
    let mut config = MemoryConfig::new();
    config.set("ingest", "owner", "config-value");
    config.set("legacy_section", "legacy_name", "legacy-value");

    // All four present: the CLI wins.
    let full = ResolutionContext::new().with_cli(&cli).with_config(&config);
    assert_eq!(parameter.require(&full, "ingest", "owner")?, "cli-value");

    // No CLI session: the current config location wins.
    let no_cli = ResolutionContext::new().with_config(&config);
    assert_eq!(parameter.require(&no_cli, "ingest", "owner")?, "config-value");

    // Current location gone: the legacy location wins (with a notice).
    let mut legacy_only = MemoryConfig::new();
    legacy_only.set("legacy_section", "legacy_name", "legacy-value");
    let legacy = ResolutionContext::new().with_config(&legacy_only);
    assert_eq!(parameter.require(&legacy, "ingest", "owner")?, "legacy-value");

    // Nothing external: the default wins.
    let empty = ResolutionContext::new();
    assert_eq!(parameter.require(&empty, "ingest", "owner")?, "compiled-in");
    Ok(())
}

#[test]
fn significant_parameter_without_any_source_is_missing() {
    let parameter: Parameter<IntParameter> = Parameter::new(IntParameter::new());
    let context = ResolutionContext::new();

    match parameter.require(&context, "ingest", "batch_size") {
        Err(ParameterError::MissingValue { name }) => assert_eq!(name, "batch_size"),
        other => panic!("expected MissingValue, got {other:?}"),
    }
}

#[test]
fn date_value_from_config_is_clamped_on_require() -> Result<()> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let parameter = Parameter::builder(DateParameter::with_interval(7, start)).build();

    let mut config = MemoryConfig::new();
    config.set("weekly_rollup", "window_start", "2020-01-10");
    let context = ResolutionContext::new().with_config(&config);

    let value = parameter.require(&context, "weekly_rollup", "window_start")?;
    assert_eq!(value, NaiveDate::from_ymd_opt(2020, 1, 8).unwrap());

    // Round trip: serialize then parse reproduces the value.
    assert_eq!(parameter.parse(&parameter.serialize(&value))?, value);
    Ok(())
}

#[test]
fn explicit_bool_accepts_text_and_implicit_default_covers_absence() -> Result<()> {
    let explicit = Parameter::builder(BoolParameter::with_parsing(BoolParsing::Explicit)).build();

    let mut cli = CliSession::new();
    cli.set("cleanup_force", "FALSE");
    let context = ResolutionContext::new().with_cli(&cli);
    assert!(!explicit.require(&context, "cleanup", "force")?);

    // No source anywhere: the implicit false default resolves.
    let empty = ResolutionContext::new();
    assert!(!explicit.require(&empty, "cleanup", "force")?);
    Ok(())
}

#[test]
fn optional_wrapper_distinguishes_empty_config_values() -> Result<()> {
    let parameter = Parameter::builder(Optional::new(TextParameter::new())).build();

    let mut config = MemoryConfig::new();
    config.set("export", "annotation", "");
    let context = ResolutionContext::new().with_config(&config);

    // Present-but-empty parses to an absent inner value, not a miss.
    assert_eq!(parameter.require(&context, "export", "annotation")?, None);

    let mut config = MemoryConfig::new();
    config.set("export", "annotation", "quarterly");
    let context = ResolutionContext::new().with_config(&config);
    assert_eq!(
        parameter.require(&context, "export", "annotation")?,
        Some("quarterly".to_string())
    );
    Ok(())
}

#[test]
fn frozen_composites_support_identity_bookkeeping() -> Result<()> {
    let parameter = Parameter::builder(DictParameter::new()).build();

    let mut config = MemoryConfig::new();
    config.set("deploy", "tags", r#"{"role": "web", "env": "staging"}"#);
    let context = ResolutionContext::new().with_config(&config);

    let tags = parameter.require(&context, "deploy", "tags")?;

    // The value is hashable and keyed by structure, not insertion order…
    let mut seen: HashMap<FrozenValue, &str> = HashMap::new();
    seen.insert(tags.clone(), "deploy#1");
    let reordered = parameter.parse(r#"{"env": "staging", "role": "web"}"#)?;
    assert_eq!(seen.get(&reordered), Some(&"deploy#1"));

    // …while its serialization keeps the original document order.
    assert_eq!(parameter.serialize(&tags), r#"{"role":"web","env":"staging"}"#);
    Ok(())
}

#[test]
fn task_references_resolve_through_the_registry() -> Result<()> {
    let registry = Arc::new(MemoryTaskRegistry::new());
    registry.register("daily_ingest");
    let parameter = Parameter::builder(TaskParameter::new(registry)).build();

    let mut config = MemoryConfig::new();
    config.set("report", "upstream", "daily_ingest");
    let context = ResolutionContext::new().with_config(&config);

    let handle = parameter.require(&context, "report", "upstream")?;
    assert_eq!(handle.family(), "daily_ingest");
    assert_eq!(parameter.serialize(&handle), "daily_ingest");
    Ok(())
}

#[test]
fn duration_round_trips_between_cli_and_canonical_text() -> Result<()> {
    let parameter = Parameter::builder(TimeDeltaParameter::new()).build();

    let mut cli = CliSession::new();
    cli.set("retention_window", "1 week 2 days");
    let context = ResolutionContext::new().with_cli(&cli);

    let value = parameter.require(&context, "retention", "window")?;
    assert_eq!(parameter.serialize(&value), "1 w 2 d 0 h 0 m 0 s");
    assert_eq!(parameter.parse("P1W")?, parameter.parse("7 d")?);
    Ok(())
}

#[test]
fn parse_errors_surface_from_whichever_source_wins() {
    let parameter = Parameter::builder(IntParameter::new()).default_value(3).build();

    let mut config = MemoryConfig::new();
    config.set("ingest", "batch_size", "not-a-number");
    let context = ResolutionContext::new().with_config(&config);

    assert!(matches!(
        parameter.require(&context, "ingest", "batch_size"),
        Err(ParameterError::InvalidValue { .. })
    ));
}
