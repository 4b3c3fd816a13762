//! Image slot enumeration
//!
//! A submission carries exactly five photographs: three skin views and two
//! hair/scalp views. Slot tokens double as multipart part names and as the
//! `image_type` column value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five fixed photograph positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSlot {
    Skin1,
    Skin2,
    Skin3,
    Hair1,
    Hair2,
}

impl ImageSlot {
    /// All required slots, in upload-form order
    pub const ALL: [ImageSlot; 5] = [
        ImageSlot::Skin1,
        ImageSlot::Skin2,
        ImageSlot::Skin3,
        ImageSlot::Hair1,
        ImageSlot::Hair2,
    ];

    /// Wire token (multipart part name and `image_type` value)
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSlot::Skin1 => "skin1",
            ImageSlot::Skin2 => "skin2",
            ImageSlot::Skin3 => "skin3",
            ImageSlot::Hair1 => "hair1",
            ImageSlot::Hair2 => "hair2",
        }
    }
}

impl fmt::Display for ImageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageSlot {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "skin1" => Ok(ImageSlot::Skin1),
            "skin2" => Ok(ImageSlot::Skin2),
            "skin3" => Ok(ImageSlot::Skin3),
            "hair1" => Ok(ImageSlot::Hair1),
            "hair2" => Ok(ImageSlot::Hair2),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_round_trip() {
        for slot in ImageSlot::ALL {
            assert_eq!(slot.as_str().parse::<ImageSlot>(), Ok(slot));
        }
    }

    #[test]
    fn unknown_tokens_do_not_parse() {
        assert!("skin4".parse::<ImageSlot>().is_err());
        assert!("".parse::<ImageSlot>().is_err());
        assert!("Skin1".parse::<ImageSlot>().is_err());
    }

    #[test]
    fn serde_uses_wire_tokens() {
        let json = serde_json::to_string(&ImageSlot::Hair2).unwrap();
        assert_eq!(json, "\"hair2\"");
        let back: ImageSlot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ImageSlot::Hair2);
    }
}
