//! View-box parsing for mounted documents.

/// The four-number rectangle declared by a document's `viewBox` attribute.
///
/// Absent or malformed view boxes parse to all zeros rather than an error;
/// an empty view box disables coordinate scaling and drag clamping.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Parse a `viewBox` attribute value ("minX minY width height").
    /// Numbers may be separated by whitespace and/or commas.
    pub fn parse(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };
        let mut numbers = value
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(str::parse::<f64>);
        let mut next = || numbers.next().and_then(Result::ok);
        match (next(), next(), next(), next()) {
            (Some(min_x), Some(min_y), Some(width), Some(height)) => Self {
                min_x,
                min_y,
                width,
                height,
            },
            _ => Self::default(),
        }
    }

    /// True when the declared area is unusable for scaling.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let vb = ViewBox::parse(Some("0 0 100 50"));
        assert!((vb.min_x - 0.0).abs() < f64::EPSILON);
        assert!((vb.width - 100.0).abs() < f64::EPSILON);
        assert!((vb.height - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_commas_and_negatives() {
        let vb = ViewBox::parse(Some("-10,  -20, 30,40"));
        assert!((vb.min_x + 10.0).abs() < f64::EPSILON);
        assert!((vb.min_y + 20.0).abs() < f64::EPSILON);
        assert!((vb.width - 30.0).abs() < f64::EPSILON);
        assert!((vb.height - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_absent_is_zero() {
        assert_eq!(ViewBox::parse(None), ViewBox::default());
    }

    #[test]
    fn test_parse_malformed_is_zero() {
        assert_eq!(ViewBox::parse(Some("0 0 wide tall")), ViewBox::default());
        assert_eq!(ViewBox::parse(Some("1 2 3")), ViewBox::default());
        assert_eq!(ViewBox::parse(Some("")), ViewBox::default());
    }

    #[test]
    fn test_is_empty() {
        assert!(ViewBox::default().is_empty());
        assert!(!ViewBox::parse(Some("0 0 1 1")).is_empty());
    }
}
