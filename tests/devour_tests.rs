//! End-to-end tests driving the full configure-then-parse flow.

use devour::{ActionError, Devourer, ExactPath, Mapping, NamespaceContext, PathPattern};
use std::sync::Arc;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Debug, Clone, PartialEq)]
struct Datum {
    id: i64,
    name: String,
    args: Vec<f64>,
}

/// Builds the mapping for the record scenario: one `Datum` per
/// `/data/datum`, capturing the `id` attribute, the `name` text and the
/// list of `arg` texts as floats.
fn record_mapping() -> Result<Mapping, Box<dyn std::error::Error>> {
    let mapping = Mapping::builder()
        .on_start("/data/datum", |stacks, context| {
            let id = context
                .attr("id")
                .ok_or_else(|| ActionError::from("datum without id"))?
                .parse::<i64>()
                .map_err(ActionError::custom)?;
            stacks.push_to("ids", id);
            Ok(())
        })?
        .on_text("/data/datum/name", |stacks, _, text| {
            stacks.push_to("names", text.to_string());
            Ok(())
        })?
        .on_text("/data/datum/arg", |stacks, _, text| {
            let value = text.parse::<f64>().map_err(ActionError::custom)?;
            stacks.push_to("args", value);
            Ok(())
        })?
        .on_end("/data/datum", |stacks, _| {
            let datum = Datum {
                id: stacks.pop_from("ids")?,
                name: stacks.pop_from("names")?,
                args: stacks.pop_list_from("args")?,
            };
            stacks.push(datum);
            Ok(())
        })?
        .build();
    Ok(mapping)
}

#[test]
fn test_record_scenario() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let xml = r#"<data><datum id="34"><name>Name</name><arg>0.3</arg><arg>0.2</arg></datum></data>"#;
    let mut stacks = Devourer::new(record_mapping()?).parse(xml)?;

    let datum = stacks.pop::<Datum>()?;
    assert_eq!(
        datum,
        Datum {
            id: 34,
            name: "Name".to_string(),
            args: vec![0.3, 0.2],
        }
    );
    assert!(stacks.try_pop::<Datum>()?.is_none());
    Ok(())
}

#[test]
fn test_record_scenario_multiple_records() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let xml = r#"
        <data>
            <datum id="1"><name>first</name><arg>1.5</arg></datum>
            <datum id="2"><name>second</name></datum>
        </data>
    "#;
    let mut stacks = Devourer::new(record_mapping()?).parse(xml)?;

    let records = stacks.pop_list::<Datum>()?;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, 1);
    assert_eq!(records[0].args, vec![1.5]);
    assert_eq!(records[1].name, "second");
    assert!(records[1].args.is_empty());
    Ok(())
}

#[test]
fn test_failed_parse_returns_no_stacks() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    // The second datum has no id attribute, so its before-action fails;
    // the call yields an error rather than a half-built result.
    let xml = r#"<data><datum id="1"><name>ok</name></datum><datum/></data>"#;
    let result = Devourer::new(record_mapping()?).parse(xml);
    assert!(result.is_err());
    Ok(())
}

#[test]
fn test_whitespace_only_text_is_skipped() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let xml = "<data>\n   \n<datum/>\n</data>";
    // The skip does not depend on strip_spaces.
    for strip_spaces in [false, true] {
        let mapping = Mapping::builder()
            .on_text("/data", |stacks, _, text| {
                stacks.push_to("texts", text.to_string());
                Ok(())
            })?
            .build();
        let devourer = Devourer::new(mapping).with_strip_spaces(strip_spaces);
        let mut stacks = devourer.parse(xml)?;
        assert!(stacks.pop_list_from::<String>("texts")?.is_empty());
    }
    Ok(())
}

#[test]
fn test_wildcard_registrations_end_to_end() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mapping = Mapping::builder()
        .namespace("urn:ns1", "p")?
        .on_text("/report/**/p:value", |stacks, _, text| {
            stacks.push_to("values", text.to_string());
            Ok(())
        })?
        .build();

    let xml = r#"
        <report xmlns:v="urn:ns1">
            <v:value>top</v:value>
            <section><deep><v:value>nested</v:value></deep></section>
            <section><value>wrong-namespace</value></section>
        </report>
    "#;
    let mut stacks = Devourer::new(mapping).parse(xml)?;
    assert_eq!(
        stacks.pop_list_from::<String>("values")?,
        vec!["top", "nested"]
    );
    Ok(())
}

#[test]
fn test_concurrent_parses_share_one_devourer() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let devourer = Arc::new(Devourer::new(record_mapping()?));
    let xml = r#"<data><datum id="9"><name>shared</name><arg>4.5</arg></datum></data>"#;

    std::thread::scope(|scope| {
        let mut handles = Vec::new();
        for _ in 0..8 {
            let devourer = Arc::clone(&devourer);
            handles.push(scope.spawn(move || {
                let mut stacks = devourer.parse(xml).expect("parse failed");
                stacks.pop::<Datum>().expect("missing datum")
            }));
        }
        for handle in handles {
            let datum = handle.join().expect("worker panicked");
            assert_eq!(datum.id, 9);
            assert_eq!(datum.args, vec![4.5]);
        }
    });
    Ok(())
}

#[test]
fn test_repeated_parses_hit_the_lookup_cache() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    // Same document parsed twice through one devourer: the second run
    // resolves every path through the cache and must produce identical
    // results.
    let devourer = Devourer::new(record_mapping()?);
    let xml = r#"<data><datum id="5"><name>cached</name><arg>0.1</arg></datum></data>"#;

    let first = Devourer::parse(&devourer, xml)?.pop::<Datum>()?;
    let second = Devourer::parse(&devourer, xml)?.pop::<Datum>()?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_pattern_and_path_literals_agree() -> TestResult {
    let pattern = PathPattern::parse("/data/**/p:value")?;
    let context = NamespaceContext::from_pairs([("urn:ns1", "p")])?;
    let path = ExactPath::parse("/data/section/{urn:ns1}value")?;
    assert!(pattern.matches(&path, &context));
    Ok(())
}
