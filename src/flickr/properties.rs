/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use strum_macros::{EnumString, IntoStaticStr};

/// Kind of asset stored on the service
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Unknown,
    Photo,
    Video,
}

/// Extras requested alongside photo listings
#[derive(Debug, Clone, Copy, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum PhotoExtra {
    Media,
    UrlO,
}

/// Joins extras into the comma separated form the API expects
pub fn extras_param(extras: &[PhotoExtra]) -> String {
    extras
        .iter()
        .map(|v| -> &'static str { v.into() })
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn media_kind_names() {
        assert_eq!(MediaKind::from_str("video").unwrap(), MediaKind::Video);
        assert_eq!(MediaKind::from_str("photo").unwrap(), MediaKind::Photo);
        assert!(MediaKind::from_str("hologram").is_err());
    }

    #[test]
    fn extras_are_joined() {
        assert_eq!(
            extras_param(&[PhotoExtra::Media, PhotoExtra::UrlO]),
            "media,url_o"
        );
    }
}
