//! Server-rendered index page.
//!
//! One page: an optional flash banner, the two input forms, and the stored
//! recordings newest-first with links to their companion files.

use crate::types::Flash;

/// Render the index page.
///
/// `recordings` and `synthesized` are `.wav` filenames, newest first.
pub fn render_index(recordings: &[String], synthesized: &[String], flash: Option<Flash>) -> String {
    let mut page = String::with_capacity(2048);
    page.push_str(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>voxlog</title>\n</head>\n<body>\n<h1>voxlog</h1>\n",
    );

    if let Some(flash) = flash {
        page.push_str(&format!(
            "<p class=\"flash\">{}</p>\n",
            escape(flash.message())
        ));
    }

    page.push_str(
        "<h2>Upload a recording</h2>\n\
         <form action=\"/upload\" method=\"post\" enctype=\"multipart/form-data\">\n\
         <input type=\"file\" name=\"audio_data\" accept=\".wav,audio/wav\">\n\
         <button type=\"submit\">Transcribe</button>\n</form>\n",
    );
    page.push_str(
        "<h2>Synthesize text</h2>\n\
         <form action=\"/upload_text\" method=\"post\">\n\
         <textarea name=\"text\" rows=\"4\" cols=\"60\"></textarea>\n\
         <button type=\"submit\">Speak</button>\n</form>\n",
    );

    page.push_str("<h2>Recordings</h2>\n<ul>\n");
    for name in recordings {
        let name = escape(name);
        page.push_str(&format!(
            "<li><a href=\"/files/uploads/{name}\">{name}</a> \
             (<a href=\"/files/uploads/{name}.txt\">transcript</a>, \
             <a href=\"/files/uploads/{name}_sentiment.txt\">sentiment</a>)</li>\n"
        ));
    }
    page.push_str("</ul>\n");

    page.push_str("<h2>Synthesized speech</h2>\n<ul>\n");
    for name in synthesized {
        let name = escape(name);
        let stem = name.strip_suffix(".wav").unwrap_or(&name);
        page.push_str(&format!(
            "<li><a href=\"/files/tts/{name}\">{name}</a> \
             (<a href=\"/files/tts/{stem}.txt\">text</a>, \
             <a href=\"/files/tts/{stem}_sentiment.txt\">sentiment</a>)</li>\n"
        ));
    }
    page.push_str("</ul>\n</body>\n</html>\n");
    page
}

/// Minimal HTML escaping for text placed in element bodies or quoted
/// attribute values.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_lists_recordings() {
        let recordings = vec!["20260827-023015PM.wav".to_string()];
        let synthesized = vec!["20260827-010000AM.wav".to_string()];
        let page = render_index(&recordings, &synthesized, None);
        assert!(page.contains("/files/uploads/20260827-023015PM.wav"));
        assert!(page.contains("/files/uploads/20260827-023015PM.wav.txt"));
        assert!(page.contains("/files/uploads/20260827-023015PM.wav_sentiment.txt"));
        assert!(page.contains("/files/tts/20260827-010000AM.wav"));
        assert!(page.contains("/files/tts/20260827-010000AM.txt"));
        assert!(page.contains("/files/tts/20260827-010000AM_sentiment.txt"));
    }

    #[test]
    fn test_index_renders_flash() {
        let page = render_index(&[], &[], Some(Flash::EmptyText));
        assert!(page.contains("Text input is empty"));
    }

    #[test]
    fn test_index_without_flash_has_no_banner() {
        let page = render_index(&[], &[], None);
        assert!(!page.contains("class=\"flash\""));
    }

    #[test]
    fn test_forms_present() {
        let page = render_index(&[], &[], None);
        assert!(page.contains("action=\"/upload\""));
        assert!(page.contains("multipart/form-data"));
        assert!(page.contains("action=\"/upload_text\""));
        assert!(page.contains("name=\"audio_data\""));
        assert!(page.contains("name=\"text\""));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }
}
