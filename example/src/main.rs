// example/src/main.rs
//
// Regenerate src/listing_trans.rs with:
//   glotc gen --input schema/listing.glot --out-dir src

mod listing_trans;

use std::collections::BTreeMap;

use glot::plans_to_json;
use glot_runtime::{ContentKeys, ReuseKeys, TransString, TranslationMap};

// Hand-maintained message structs matching schema/listing.glot. Translated
// fields are `TransString`, message-typed fields are Option/Vec/BTreeMap.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    pub id: String,
    pub title: TransString,
    pub tags: Vec<TransString>,
    pub intro: Option<ListingSection>,
    pub sections: Vec<ListingSection>,
    pub extras: BTreeMap<String, ListingSection>,
}

#[derive(Debug, Clone, Default)]
pub struct ListingSection {
    pub heading: TransString,
}

fn section(heading: &str) -> ListingSection {
    ListingSection {
        heading: TransString::new(heading),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1) Compile the schema and show what glotc plans for each message type.
    let schema = glot::compile_file("listing.glot", include_str!("../schema/listing.glot"))?;
    let plans = glot::analyze(std::slice::from_ref(&schema))?;
    println!("plans:\n{}\n", plans_to_json(&plans));

    // 2) Author the listing in the source language.
    let mut english = Listing {
        id: "listing-42".to_string(),
        title: TransString::new("Seaside cottage"),
        tags: vec![TransString::new("beach"), TransString::new("quiet")],
        intro: Some(section("A cottage by the sea")),
        sections: vec![section("The house"), section("Getting there")],
        extras: BTreeMap::from([("parking".to_string(), section("Parking"))]),
    };

    // 3) Extract its strings, minting content-derived keys.
    let english_map = english.extract_translations(None, &ContentKeys)?;
    println!("extracted {} strings:", english_map.len());
    for (key, text) in &english_map {
        println!("  {} = {:?}", key, text);
    }

    // 4) A translator fills in a second locale under the same keys.
    let japanese_map: TranslationMap = english_map
        .iter()
        .map(|(key, text)| (key.clone(), format!("{}の日本語訳", text)))
        .collect();

    // 5) Render the listing in that locale.
    let mut japanese = english.clone();
    japanese.translate(&|key| japanese_map.get(key).cloned());
    println!("\njapanese title: {:?}", japanese.title.text);
    println!("japanese tags:  {:?}", japanese.tags.iter().map(|t| t.text.as_str()).collect::<Vec<_>>());

    // 6) The translated copy keeps its keys, so a later edit pass can
    //    re-extract it without inventing new ones.
    let reextracted = japanese.extract_translations(Some(&english), &ReuseKeys)?;
    assert_eq!(
        english.get_translation_keys(),
        japanese.get_translation_keys()
    );
    println!("\nre-extracted {} japanese strings under the same keys", reextracted.len());

    Ok(())
}
