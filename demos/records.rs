//! Maps a small XML document onto typed records with one streaming pass.
//!
//! Run with `cargo run --example records`.

use devour::{ActionError, Devourer, Mapping, MappingError};
use std::env;

#[derive(Debug)]
struct Datum {
    id: i64,
    name: String,
    args: Vec<f64>,
}

fn build_devourer() -> Result<Devourer, MappingError> {
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
    Ok(Devourer::new(mapping))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "devour=debug");
        }
    }
    env_logger::init();

    let xml = r#"
        <data>
            <datum id="34"><name>Name</name><arg>0.3</arg><arg>0.2</arg></datum>
            <datum id="35"><name>Other</name><arg>1.25</arg></datum>
        </data>
    "#;

    let devourer = build_devourer()?;
    let mut stacks = devourer.parse(xml)?;

    for datum in stacks.pop_list::<Datum>()? {
        println!("{:?}", datum);
    }
    Ok(())
}
