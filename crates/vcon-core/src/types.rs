//! Shared enumerations for vCon records.
//!
//! Closed sets are enums so that an invalid value cannot be constructed;
//! string inputs go through `FromStr` and fail with a [`ValidationError`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// The vCon format version stamped on records created with [`crate::Vcon::new`].
pub const VCON_VERSION: &str = "0.0.1";

/// How a payload body is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Base64,
    Base64Url,
    Json,
    #[default]
    None,
}

impl Encoding {
    /// Encodings an [`crate::Attachment`] may declare.
    pub const ATTACHMENT: [Encoding; 3] = [Encoding::Base64, Encoding::Base64Url, Encoding::None];

    /// Wire name of the encoding.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Base64 => "base64",
            Self::Base64Url => "base64url",
            Self::Json => "json",
            Self::None => "none",
        }
    }

    /// Check if attachments may use this encoding.
    pub fn is_attachment_encoding(self) -> bool {
        Self::ATTACHMENT.contains(&self)
    }
}

impl FromStr for Encoding {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base64" => Ok(Self::Base64),
            "base64url" => Ok(Self::Base64Url),
            "json" => Ok(Self::Json),
            "none" => Ok(Self::None),
            other => Err(ValidationError::InvalidEncoding(other.to_string())),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fixed set of MIME types a dialog payload may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MimeType {
    // Text
    TextPlain,

    // Audio
    AudioXWav,
    AudioWav,
    AudioWave,
    AudioMpeg,
    AudioMp3,
    AudioOgg,
    AudioWebm,
    AudioXM4a,
    AudioAac,

    // Video
    VideoMp4,
    VideoXMp4,
    VideoOgg,

    // Other
    MultipartMixed,
    MessageRfc822,
}

impl MimeType {
    /// Every accepted dialog MIME type, in declaration order.
    pub const ALL: [MimeType; 15] = [
        MimeType::TextPlain,
        MimeType::AudioXWav,
        MimeType::AudioWav,
        MimeType::AudioWave,
        MimeType::AudioMpeg,
        MimeType::AudioMp3,
        MimeType::AudioOgg,
        MimeType::AudioWebm,
        MimeType::AudioXM4a,
        MimeType::AudioAac,
        MimeType::VideoMp4,
        MimeType::VideoXMp4,
        MimeType::VideoOgg,
        MimeType::MultipartMixed,
        MimeType::MessageRfc822,
    ];

    /// Wire name of the MIME type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TextPlain => "text/plain",
            Self::AudioXWav => "audio/x-wav",
            Self::AudioWav => "audio/wav",
            Self::AudioWave => "audio/wave",
            Self::AudioMpeg => "audio/mpeg",
            Self::AudioMp3 => "audio/mp3",
            Self::AudioOgg => "audio/ogg",
            Self::AudioWebm => "audio/webm",
            Self::AudioXM4a => "audio/x-m4a",
            Self::AudioAac => "audio/aac",
            Self::VideoMp4 => "video/mp4",
            Self::VideoXMp4 => "video/x-mp4",
            Self::VideoOgg => "video/ogg",
            Self::MultipartMixed => "multipart/mixed",
            Self::MessageRfc822 => "message/rfc822",
        }
    }

    /// Try to parse from a wire name.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }

    /// Whether this is a text type.
    pub fn is_text(self) -> bool {
        self == Self::TextPlain
    }

    /// Whether this is an audio type.
    pub fn is_audio(self) -> bool {
        matches!(
            self,
            Self::AudioXWav
                | Self::AudioWav
                | Self::AudioWave
                | Self::AudioMpeg
                | Self::AudioMp3
                | Self::AudioOgg
                | Self::AudioWebm
                | Self::AudioXM4a
                | Self::AudioAac
        )
    }

    /// Whether this is a video type.
    pub fn is_video(self) -> bool {
        matches!(self, Self::VideoMp4 | Self::VideoXMp4 | Self::VideoOgg)
    }

    /// Whether this is an email type.
    pub fn is_email(self) -> bool {
        self == Self::MessageRfc822
    }
}

impl FromStr for MimeType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ValidationError::InvalidMimeType(s.to_string()))
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert a serializable entity into its JSON object form.
///
/// Every entity in this crate serializes to an object with string keys, so
/// the conversion cannot fail for them.
pub(crate) fn to_object<T: Serialize>(value: &T) -> Map<String, Value> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
