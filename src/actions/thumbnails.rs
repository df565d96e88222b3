/// Where a thumbnail is shown. Each group names its image elements
/// differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailGroup {
    /// `#dataIcons img`, element id is the bare image id.
    DatasetIcons,
    /// `#spw img`, element id is `image-ID`.
    Spw,
    /// `#viewport-img`, the preview; refreshed on every call.
    Viewport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub group: ThumbnailGroup,
    pub element_id: String,
    pub src: String,
}

impl Thumbnail {
    pub fn new(group: ThumbnailGroup, element_id: &str, src: &str) -> Self {
        Self {
            group,
            element_id: element_id.to_string(),
            src: src.to_string(),
        }
    }

    fn matches(&self, image_id: Option<u64>) -> bool {
        let Some(id) = image_id else {
            return true;
        };
        match self.group {
            ThumbnailGroup::DatasetIcons => self.element_id == id.to_string(),
            ThumbnailGroup::Spw => self.element_id == format!("image-{id}"),
            ThumbnailGroup::Viewport => true,
        }
    }
}

/// Strip any query from `src` and append `?_=token`.
pub fn cache_bust(src: &str, token: &str) -> String {
    let base = src.split('?').next().unwrap_or(src);
    format!("{base}?_={token}")
}

/// Token that changes on every call.
pub fn fresh_token() -> String {
    let now = chrono::Utc::now();
    now.timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros())
        .to_string()
}

/// Thumbnails currently on screen.
#[derive(Debug, Default)]
pub struct ThumbnailRegistry {
    pub thumbnails: Vec<Thumbnail>,
}

impl ThumbnailRegistry {
    pub fn new(thumbnails: Vec<Thumbnail>) -> Self {
        Self { thumbnails }
    }

    /// Force the browser-side cache to reload thumbnails: all of them, or
    /// only those of `image_id` (plus the preview). Returns how many
    /// sources changed.
    pub fn refresh(&mut self, image_id: Option<u64>, token: &str) -> usize {
        let mut refreshed = 0;
        for thumb in self.thumbnails.iter_mut().filter(|t| t.matches(image_id)) {
            thumb.src = cache_bust(&thumb.src, token);
            refreshed += 1;
        }
        log::debug!("thumbnails: refreshed {refreshed} (image filter {image_id:?})");
        refreshed
    }

    pub fn refresh_now(&mut self, image_id: Option<u64>) -> usize {
        self.refresh(image_id, &fresh_token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ThumbnailRegistry {
        ThumbnailRegistry::new(vec![
            Thumbnail::new(ThumbnailGroup::DatasetIcons, "257", "/render_thumbnail/257/"),
            Thumbnail::new(ThumbnailGroup::DatasetIcons, "258", "/render_thumbnail/258/?_=old"),
            Thumbnail::new(ThumbnailGroup::Spw, "image-257", "/render_thumbnail/size/96/257/"),
            Thumbnail::new(ThumbnailGroup::Viewport, "viewport-img", "/render_image/300/"),
        ])
    }

    #[test]
    fn cache_bust_replaces_existing_query() {
        assert_eq!(cache_bust("/thumb/1/", "9"), "/thumb/1/?_=9");
        assert_eq!(cache_bust("/thumb/1/?_=1&x=2", "9"), "/thumb/1/?_=9");
    }

    #[test]
    fn refresh_all() {
        let mut reg = registry();
        assert_eq!(reg.refresh(None, "abc"), 4);
        assert!(reg.thumbnails.iter().all(|t| t.src.ends_with("?_=abc")));
        assert_eq!(reg.thumbnails[1].src, "/render_thumbnail/258/?_=abc");
    }

    #[test]
    fn refresh_single_image_still_touches_viewport() {
        let mut reg = registry();
        assert_eq!(reg.refresh(Some(257), "t"), 3);
        assert_eq!(reg.thumbnails[1].src, "/render_thumbnail/258/?_=old");
        assert_eq!(reg.thumbnails[3].src, "/render_image/300/?_=t");
    }

    #[test]
    fn fresh_tokens_are_numeric() {
        assert!(fresh_token().chars().all(|c| c.is_ascii_digit() || c == '-'));
    }
}
