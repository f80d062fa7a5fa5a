use crate::services::media_service::thumbnail_path;

/// Turns a stored image reference into something a page can display.
pub trait ImageFormatter {
    /// Display reference of the full-size image, `None` when nothing is stored.
    fn format(&self, image: &str) -> Option<String>;
    /// Display reference of the reduced-size preview.
    fn headshot(&self, image: &str) -> Option<String>;
}

/// Builds public URLs under the configured media prefix.
#[derive(Debug, Clone)]
pub struct MediaImageFormatter {
    media_url: String,
}

impl MediaImageFormatter {
    pub fn new(media_url: &str) -> Self {
        let mut media_url = media_url.trim().to_string();
        if !media_url.ends_with('/') {
            media_url.push('/');
        }
        Self { media_url }
    }

    fn url_for(&self, relative: &str) -> String {
        format!("{}{}", self.media_url, relative.trim_start_matches('/'))
    }
}

impl ImageFormatter for MediaImageFormatter {
    fn format(&self, image: &str) -> Option<String> {
        let image = image.trim();
        if image.is_empty() {
            return None;
        }
        Some(self.url_for(image))
    }

    fn headshot(&self, image: &str) -> Option<String> {
        let image = image.trim();
        if image.is_empty() {
            return None;
        }
        Some(self.url_for(&thumbnail_path(image)))
    }
}
