/// Scroll geometry sampled on each scroll event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMetrics {
    pub offset: f64,
    pub document_height: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    pub fn scrollable(&self) -> f64 {
        self.document_height - self.viewport_height
    }

    /// Progress bar width in percent, or `None` when the page cannot scroll.
    pub fn progress_percent(&self) -> Option<f64> {
        let range = self.scrollable();
        if range <= 0.0 || !range.is_finite() || !self.offset.is_finite() {
            return None;
        }
        Some((self.offset / range * 100.0).clamp(0.0, 100.0))
    }
}

pub fn past_threshold(offset: f64, threshold: f64) -> bool {
    offset > threshold
}

/// Index of the last section whose top, less `margin`, is at or above
/// `offset`. Hidden sections are passed as `None` and never qualify.
pub fn active_section(offset: f64, tops: &[Option<f64>], margin: f64) -> Option<usize> {
    tops.iter()
        .enumerate()
        .filter_map(|(i, top)| top.map(|t| (i, t)))
        .filter(|(_, top)| offset >= top - margin)
        .map(|(i, _)| i)
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(offset: f64, doc: f64, view: f64) -> ScrollMetrics {
        ScrollMetrics {
            offset,
            document_height: doc,
            viewport_height: view,
        }
    }

    #[test]
    fn test_progress() {
        assert_eq!(metrics(0.0, 2000.0, 1000.0).progress_percent(), Some(0.0));
        assert_eq!(metrics(500.0, 2000.0, 1000.0).progress_percent(), Some(50.0));
        assert_eq!(metrics(1000.0, 2000.0, 1000.0).progress_percent(), Some(100.0));
    }

    #[test]
    fn test_progress_clamped() {
        // Overscroll bounce on touch devices.
        assert_eq!(metrics(-30.0, 2000.0, 1000.0).progress_percent(), Some(0.0));
        assert_eq!(metrics(1200.0, 2000.0, 1000.0).progress_percent(), Some(100.0));
    }

    #[test]
    fn test_progress_short_page() {
        assert_eq!(metrics(0.0, 800.0, 800.0).progress_percent(), None);
        assert_eq!(metrics(0.0, 500.0, 800.0).progress_percent(), None);
        assert_eq!(metrics(f64::NAN, 2000.0, 800.0).progress_percent(), None);
    }

    #[test]
    fn test_threshold() {
        assert!(!past_threshold(400.0, 400.0));
        assert!(past_threshold(400.5, 400.0));
        assert!(!past_threshold(0.0, 400.0));
    }

    #[test]
    fn test_active_margin_boundary() {
        let tops = [Some(100.0), Some(900.0), Some(1700.0)];
        assert_eq!(active_section(900.0 - 199.0, &tops, 200.0), Some(1));
        assert_eq!(active_section(900.0 - 200.0, &tops, 200.0), Some(1));
        assert_eq!(active_section(900.0 - 201.0, &tops, 200.0), Some(0));
    }

    #[test]
    fn test_active_none_above_first() {
        let tops = [Some(500.0), Some(900.0)];
        assert_eq!(active_section(0.0, &tops, 200.0), None);
        assert_eq!(active_section(300.0, &tops, 200.0), Some(0));
        assert_eq!(active_section(0.0, &[], 200.0), None);
    }

    #[test]
    fn test_active_furthest_down() {
        let tops = [Some(0.0), Some(100.0), Some(200.0)];
        assert_eq!(active_section(5000.0, &tops, 200.0), Some(2));
    }

    #[test]
    fn test_hidden_sections_skipped() {
        let tops = [Some(100.0), None, Some(900.0), None];
        assert_eq!(active_section(800.0, &tops, 200.0), Some(2));
        assert_eq!(active_section(600.0, &tops, 200.0), Some(0));
    }
}
