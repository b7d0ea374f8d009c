/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::flickr::MediaKind;
use serde::Deserialize;
use std::str::FromStr;

// Text fields arrive either bare or wrapped as {"_content": "..."}
#[derive(Deserialize)]
#[serde(untagged)]
enum TextField {
    Bare(String),
    Wrapped {
        #[serde(rename = "_content")]
        content: String,
    },
}

// Numbers are sometimes sent as strings
#[derive(Deserialize)]
#[serde(untagged)]
enum NumField {
    Num(u64),
    Text(String),
}

// Parses a bare or wrapped text field
pub fn from_content<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let field: Option<TextField> = Deserialize::deserialize(deserializer)?;
    Ok(field.map(|v| match v {
        TextField::Bare(s) => s,
        TextField::Wrapped { content } => content,
    }))
}

// Parses media type
pub fn from_media<'de, D>(deserializer: D) -> Result<MediaKind, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    Ok(MediaKind::from_str(&s).unwrap_or(MediaKind::Unknown))
}

// Parses a number that may be quoted
pub fn from_str_or_num<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Deserialize::deserialize(deserializer)? {
        NumField::Num(n) => Ok(n),
        NumField::Text(s) => s.trim().parse::<u64>().map_err(serde::de::Error::custom),
    }
}

// Parses strings that may be "" and sets to None
pub fn from_empty_str_to_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Deserialize::deserialize(deserializer)?;
    Ok(s.filter(|v| !v.is_empty()))
}
