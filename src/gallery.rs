//! Transient page state: image gallery and detail accordion
//!
//! Both are pure state holders driven by clicks. The gallery cycles through
//! the product images with wrap-around; the accordion keeps at most one
//! detail section open.

/// Image gallery over a fixed list of image URLs
#[derive(Debug, Clone)]
pub struct ImageGallery {
    images: Vec<String>,
    active: usize,
}

impl ImageGallery {
    pub fn new(images: Vec<String>) -> Self {
        ImageGallery { images, active: 0 }
    }

    /// Index of the active image
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// URL of the active image, `None` for an empty gallery
    pub fn active_image(&self) -> Option<&str> {
        self.images.get(self.active).map(String::as_str)
    }

    /// Advance to the next image, wrapping past the end
    pub fn next(&mut self) {
        if !self.images.is_empty() {
            self.active = (self.active + 1) % self.images.len();
        }
    }

    /// Step back to the previous image, wrapping past the start
    pub fn prev(&mut self) {
        if !self.images.is_empty() {
            self.active = (self.active + self.images.len() - 1) % self.images.len();
        }
    }

    /// Jump to a thumbnail; out-of-range indices are ignored
    pub fn select(&mut self, index: usize) {
        if index < self.images.len() {
            self.active = index;
        }
    }
}

/// Accordion with at most one open section
#[derive(Debug, Clone)]
pub struct Accordion {
    open: Option<String>,
}

impl Default for Accordion {
    fn default() -> Self {
        Self::new()
    }
}

impl Accordion {
    /// New accordion with the description section open, matching the page default
    pub fn new() -> Self {
        Accordion {
            open: Some("description".to_string()),
        }
    }

    /// Currently open section, if any
    pub fn open_section(&self) -> Option<&str> {
        self.open.as_deref()
    }

    pub fn is_open(&self, key: &str) -> bool {
        self.open.as_deref() == Some(key)
    }

    /// Toggle a section: opening one closes whatever was open
    pub fn toggle(&mut self, key: &str) {
        if self.is_open(key) {
            self.open = None;
        } else {
            self.open = Some(key.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery() -> ImageGallery {
        ImageGallery::new(vec![
            "a.png".to_string(),
            "b.png".to_string(),
            "c.png".to_string(),
        ])
    }

    #[test]
    fn test_next_wraps_past_end() {
        let mut g = gallery();
        g.next();
        g.next();
        g.next();
        assert_eq!(g.active_index(), 0);
    }

    #[test]
    fn test_prev_wraps_past_start() {
        let mut g = gallery();
        g.prev();
        assert_eq!(g.active_index(), 2);
        assert_eq!(g.active_image(), Some("c.png"));
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let mut g = gallery();
        g.select(1);
        g.select(7);
        assert_eq!(g.active_index(), 1);
    }

    #[test]
    fn test_empty_gallery_never_panics() {
        let mut g = ImageGallery::new(Vec::new());
        g.next();
        g.prev();
        g.select(0);
        assert_eq!(g.active_image(), None);
    }

    #[test]
    fn test_accordion_single_open_section() {
        let mut acc = Accordion::new();
        assert!(acc.is_open("description"));
        acc.toggle("shipping");
        assert!(acc.is_open("shipping"));
        assert!(!acc.is_open("description"));
        acc.toggle("shipping");
        assert_eq!(acc.open_section(), None);
    }
}
