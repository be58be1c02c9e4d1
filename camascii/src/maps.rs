use std::collections::HashSet;

use crate::error::*;

pub enum CharMap {
    Standard,
    Short,
    Gradient,
    Custom(Vec<char>),
}

impl CharMap {
    pub fn chars(self) -> Vec<char> {
        match self {
            CharMap::Standard => STANDARD.chars().collect(),
            CharMap::Short => SHORT.chars().collect(),
            CharMap::Gradient => GRADIENT.chars().collect(),
            CharMap::Custom(chars) => chars,
        }
    }

    pub fn custom(chars: &str) -> Self {
        Self::Custom(chars.chars().collect())
    }
}

// Ordered from emptiest to densest glyph.
const STANDARD: &str = r##" .'`^",:;Il!i><~+_-?][}{1)(|\/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$"##; // 70 chars
const SHORT: &str = r##" .:-=+*#%@"##; // 10 chars
const GRADIENT: &str = r#" ░▒▓█"#; // 5 chars

/// An immutable ordered sequence of distinct glyphs, index 0 being the emptiest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRamp {
    glyphs: Vec<char>,
}

impl GlyphRamp {
    pub fn new(char_map: CharMap) -> Result<Self, Error> {
        let glyphs = char_map.chars();
        if glyphs.len() < 2 {
            return Err(Error::Config(format!(
                "{ERROR_RAMP_TOO_SHORT}: got {}",
                glyphs.len()
            )));
        }
        let mut seen = HashSet::with_capacity(glyphs.len());
        if let Some(dup) = glyphs.iter().find(|&&c| !seen.insert(c)) {
            return Err(Error::Config(format!("{ERROR_RAMP_DUPLICATE}: {dup:?}")));
        }
        Ok(Self { glyphs })
    }

    /// Number of brightness levels, always at least two.
    pub fn levels(&self) -> usize {
        self.glyphs.len()
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// Quantizes a brightness in `[0, 255]` to a ramp index.
    ///
    /// `floor(value / 255 * (N - 1))`, clamped so that 255 lands on the last
    /// glyph even when the product rounds above `N - 1`. Negative and NaN
    /// inputs land on index 0.
    pub fn map_brightness(&self, value: f64) -> usize {
        let last = self.glyphs.len() - 1;
        let idx = ((value / u8::MAX as f64) * last as f64).floor();
        // float -> usize casts saturate, NaN becomes 0
        (idx as usize).min(last)
    }

    pub fn glyph(&self, value: f64) -> char {
        self.glyphs[self.map_brightness(value)]
    }
}

impl Default for GlyphRamp {
    fn default() -> Self {
        Self {
            glyphs: CharMap::Standard.chars(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(chars: &str) -> GlyphRamp {
        GlyphRamp::new(CharMap::custom(chars)).unwrap()
    }

    #[test]
    fn standard_ramp_has_seventy_glyphs() {
        let ramp = GlyphRamp::default();
        assert_eq!(ramp.levels(), 70);
        assert_eq!(ramp.glyphs()[0], ' ');
        assert_eq!(ramp.glyphs()[69], '$');
    }

    #[test]
    fn rejects_short_ramps() {
        assert!(matches!(
            GlyphRamp::new(CharMap::custom("#")),
            Err(Error::Config(_))
        ));
        assert!(GlyphRamp::new(CharMap::custom("")).is_err());
        assert!(GlyphRamp::new(CharMap::custom(" #")).is_ok());
    }

    #[test]
    fn rejects_repeated_glyphs() {
        for chars in ["##", " .. #", " .# "] {
            assert!(
                matches!(GlyphRamp::new(CharMap::custom(chars)), Err(Error::Config(_))),
                "{chars:?}"
            );
        }
    }

    #[test]
    fn builtin_ramps_are_distinct() {
        for map in [CharMap::Standard, CharMap::Short, CharMap::Gradient] {
            assert!(GlyphRamp::new(map).is_ok());
        }
    }

    #[test]
    fn three_glyph_scenario() {
        let r = ramp(" .#");
        assert_eq!(r.glyph(0.0), ' ');
        assert_eq!(r.map_brightness(128.0), 1);
        assert_eq!(r.glyph(128.0), '.');
        assert_eq!(r.glyph(255.0), '#');
    }

    #[test]
    fn endpoints_hit_first_and_last() {
        for chars in [" #", " .#", SHORT, GRADIENT, STANDARD] {
            let r = ramp(chars);
            assert_eq!(r.map_brightness(0.0), 0);
            assert_eq!(r.map_brightness(255.0), r.levels() - 1);
        }
    }

    #[test]
    fn indices_stay_in_range_and_monotonic() {
        let r = GlyphRamp::default();
        let mut prev = 0;
        for step in 0..=2550 {
            let v = step as f64 / 10.0;
            let idx = r.map_brightness(v);
            assert!(idx < r.levels());
            assert!(idx >= prev, "index dropped at {v}");
            prev = idx;
        }
    }

    #[test]
    fn out_of_domain_input_is_clamped() {
        let r = ramp(SHORT);
        assert_eq!(r.map_brightness(-3.0), 0);
        assert_eq!(r.map_brightness(f64::NAN), 0);
        assert_eq!(r.map_brightness(300.0), r.levels() - 1);
    }
}
