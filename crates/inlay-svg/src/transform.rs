//! Transform-list parsing and serialization.
//!
//! Only the subset the engine needs is interpreted: the draggable contract
//! reads and rewrites the leading translate entry of a `transform`
//! attribute. Everything else passes through untouched.

/// A single entry in a `transform` attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    /// `translate(x [y])`; a missing y defaults to 0.
    Translate(f64, f64),
    /// `scale(x [y])`; a missing y mirrors x.
    Scale(f64, f64),
    /// `rotate(deg)` with a single argument.
    Rotate(f64),
    /// Any function this crate does not interpret, kept verbatim.
    Raw(String, Vec<f64>),
}

/// An ordered list of transform entries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransformList(pub Vec<Transform>);

impl TransformList {
    /// Parse a `transform` attribute value. Unrecognized functions are kept
    /// as raw entries so rewriting the list never drops information.
    pub fn parse(value: &str) -> Self {
        let mut entries = Vec::new();
        for segment in value.split(')') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            let Some((name, args)) = segment.split_once('(') else {
                continue;
            };
            let name = name.trim();
            let args: Vec<f64> = args
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|s| !s.is_empty())
                .filter_map(|s| s.parse().ok())
                .collect();
            let entry = match (name, args.as_slice()) {
                ("translate", [x]) => Transform::Translate(*x, 0.0),
                ("translate", [x, y]) => Transform::Translate(*x, *y),
                ("scale", [x]) => Transform::Scale(*x, *x),
                ("scale", [x, y]) => Transform::Scale(*x, *y),
                ("rotate", [deg]) => Transform::Rotate(*deg),
                _ => Transform::Raw(name.to_string(), args),
            };
            entries.push(entry);
        }
        Self(entries)
    }

    /// Serialize back to attribute syntax.
    pub fn to_attribute(&self) -> String {
        let mut out = String::new();
        for entry in &self.0 {
            if !out.is_empty() {
                out.push(' ');
            }
            match entry {
                Transform::Translate(x, y) => out.push_str(&format!("translate({x} {y})")),
                Transform::Scale(x, y) => out.push_str(&format!("scale({x} {y})")),
                Transform::Rotate(deg) => out.push_str(&format!("rotate({deg})")),
                Transform::Raw(name, args) => {
                    let args = args
                        .iter()
                        .map(f64::to_string)
                        .collect::<Vec<_>>()
                        .join(" ");
                    out.push_str(&format!("{name}({args})"));
                }
            }
        }
        out
    }

    /// The leading translate entry, if the list starts with one.
    pub fn leading_translate(&self) -> Option<(f64, f64)> {
        match self.0.first() {
            Some(Transform::Translate(x, y)) => Some((*x, *y)),
            _ => None,
        }
    }

    /// Rewrite the leading translate entry. Returns false (leaving the list
    /// untouched) when the first entry is not a translate.
    pub fn set_leading_translate(&mut self, x: f64, y: f64) -> bool {
        match self.0.first_mut() {
            Some(Transform::Translate(tx, ty)) => {
                *tx = x;
                *ty = y;
                true
            }
            _ => false,
        }
    }
}
