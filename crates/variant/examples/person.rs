//! Reads a JSON document into a variant, inspects it and writes it back.
//!
//! The subscriber runs at TRACE so the JSON bridge events are visible:
//!
//! ```text
//! cargo run -p rvariant --example person
//! ```

use rvariant::display::RenderConfig;
use rvariant::prelude::*;
use tracing_subscriber::fmt;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt().with_max_level(tracing::Level::TRACE).init();

    let text = r#"{"name": "Ann", "age": 30, "tags": ["x", "y"], "score": 0.5}"#;
    let person: Variant = text.parse()?;

    println!("display: {person}");
    println!("debug:   {person:?}");

    let fields = FieldsReader::new(&person)?;
    let name: String = fields.field("name")?;
    let age: i32 = fields.field("age")?;
    let nickname = fields.field_or("nickname", String::from("-"))?;
    println!("{name} is {age}, nickname {nickname}");

    match fields.field::<u8>("age") {
        Ok(age) => println!("age as u8: {age}"),
        Err(err) => println!("age as u8 failed [{}]: {err}", err.code()),
    }

    let mut edited = person.clone();
    edited
        .as_mapping_mut()?
        .insert("ratio".into(), Variant::from(f64::NAN));
    println!("limited: {}", edited.render_with(&RenderConfig::compact_limited()));
    println!("{}", edited.to_json_string_pretty());

    Ok(())
}
