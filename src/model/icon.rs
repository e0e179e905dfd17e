use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Serialize, Serializer};
use std::fmt;
use std::io::{self, Read};

/// Image MIME type accepted for avatars and icons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IconType {
    #[default]
    Jpeg,
    Png,
    Webp,
    Gif,
}

impl IconType {
    pub const fn mime(self) -> &'static str {
        match self {
            IconType::Jpeg => "image/jpeg",
            IconType::Png => "image/png",
            IconType::Webp => "image/webp",
            IconType::Gif => "image/gif",
        }
    }

    /// Parse a MIME string; anything unrecognized is treated as JPEG
    pub fn from_mime(mime: &str) -> Self {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => IconType::Png,
            "image/webp" => IconType::Webp,
            "image/gif" => IconType::Gif,
            _ => IconType::Jpeg,
        }
    }

    /// Data URI prefix, e.g. `data:image/png;base64`
    pub fn header(self) -> String {
        format!("data:{};base64", self.mime())
    }
}

/// Image payload sent inline in a JSON body
///
/// Renders as `data:<mime>;base64,<payload>`; an empty payload renders as
/// the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    kind: IconType,
    data: Vec<u8>,
}

impl Icon {
    pub fn new(kind: IconType, data: impl Into<Vec<u8>>) -> Self {
        Self {
            kind,
            data: data.into(),
        }
    }

    /// Read the whole payload from `reader`
    pub fn from_reader(kind: IconType, mut reader: impl Read) -> io::Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(Self::new(kind, data))
    }

    pub fn kind(&self) -> IconType {
        self.kind
    }

    /// Raw (not encoded) bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.data.is_empty() {
            return Ok(());
        }
        write!(f, "{},{}", self.kind.header(), BASE64.encode(&self.data))
    }
}

impl Serialize for Icon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(IconType::Jpeg, b"hi".as_slice(), "data:image/jpeg;base64,aGk=")]
    #[case(IconType::Png, b"\x89PNG".as_slice(), "data:image/png;base64,iVBORw==")]
    #[case(IconType::Gif, b"GIF89a".as_slice(), "data:image/gif;base64,R0lGODlh")]
    fn test_icon_renders_data_uri(
        #[case] kind: IconType,
        #[case] data: &[u8],
        #[case] expected: &str,
    ) {
        let icon = Icon::new(kind, data);
        assert_eq!(icon.to_string(), expected);
    }

    #[rstest]
    #[case(IconType::Jpeg)]
    #[case(IconType::Webp)]
    fn test_empty_icon_renders_empty_string(#[case] kind: IconType) {
        let icon = Icon::new(kind, Vec::new());
        assert!(icon.is_empty());
        assert_eq!(icon.to_string(), "");
    }

    #[test]
    fn test_icon_serializes_as_json_string() {
        let icon = Icon::new(IconType::Png, b"abc".as_slice());
        let json = serde_json::to_value(&icon).unwrap();
        assert_eq!(json, "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_icon_from_reader() {
        let icon = Icon::from_reader(IconType::Webp, io::Cursor::new(b"webp".to_vec())).unwrap();
        assert_eq!(icon.data(), b"webp");
        assert_eq!(icon.kind(), IconType::Webp);
    }

    #[rstest]
    #[case("image/png", IconType::Png)]
    #[case("IMAGE/GIF", IconType::Gif)]
    #[case("image/webp", IconType::Webp)]
    #[case("image/jpeg", IconType::Jpeg)]
    #[case("image/bmp", IconType::Jpeg)]
    #[case("", IconType::Jpeg)]
    fn test_icon_type_from_mime(#[case] mime: &str, #[case] expected: IconType) {
        assert_eq!(IconType::from_mime(mime), expected);
    }
}
