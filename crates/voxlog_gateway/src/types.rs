use serde::Deserialize;

/// User-facing validation notices.
///
/// Carried across the post→redirect→get hop as a `?flash=<code>` query
/// parameter and rendered as a banner by the index page. Codes are fixed so
/// nothing user-controlled is ever echoed back into the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    /// The upload form arrived without an `audio_data` part.
    NoAudio,
    /// The audio part was present but empty.
    EmptyFile,
    /// The text form was blank after trimming.
    EmptyText,
}

impl Flash {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoAudio => "no-audio",
            Self::EmptyFile => "empty-file",
            Self::EmptyText => "empty-text",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "no-audio" => Some(Self::NoAudio),
            "empty-file" => Some(Self::EmptyFile),
            "empty-text" => Some(Self::EmptyText),
            _ => None,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::NoAudio => "No audio data",
            Self::EmptyFile => "No selected file",
            Self::EmptyText => "Text input is empty",
        }
    }

    /// Redirect target carrying this flash back to the index.
    pub fn redirect_target(&self) -> String {
        format!("/?flash={}", self.code())
    }
}

/// Query parameters accepted by the index page.
#[derive(Debug, Default, Deserialize)]
pub struct IndexParams {
    pub flash: Option<String>,
}

/// Body of the typed-text form.
#[derive(Debug, Deserialize)]
pub struct TextForm {
    #[serde(default)]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_code_roundtrip() {
        for flash in [Flash::NoAudio, Flash::EmptyFile, Flash::EmptyText] {
            assert_eq!(Flash::from_code(flash.code()), Some(flash));
        }
    }

    #[test]
    fn test_unknown_code_is_dropped() {
        assert_eq!(Flash::from_code("<script>"), None);
        assert_eq!(Flash::from_code(""), None);
    }

    #[test]
    fn test_redirect_target() {
        assert_eq!(Flash::EmptyText.redirect_target(), "/?flash=empty-text");
    }
}
