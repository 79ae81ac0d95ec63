//! Report typeface loading and text measurement

use std::path::{Path, PathBuf};

use ttf_parser::Face;

use crate::report::{FontWeight, ReportError, Result};

/// A TrueType font file plus the vertical metrics used for line layout
#[derive(Debug, Clone)]
pub struct FontFace {
    path: PathBuf,
    bytes: Vec<u8>,
    units_per_em: f32,
    ascender: f32,
    descender: f32,
    line_gap: f32,
}

impl FontFace {
    /// Read and validate a font file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let bytes = std::fs::read(&path).map_err(|e| ReportError::Font {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Self::from_bytes(path, bytes)
    }

    pub fn from_bytes(path: PathBuf, bytes: Vec<u8>) -> Result<Self> {
        let face = Face::parse(&bytes, 0).map_err(|e| ReportError::FontParse {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let units_per_em = f32::from(face.units_per_em().max(1));
        let ascender = f32::from(face.ascender());
        let descender = f32::from(face.descender());
        let line_gap = f32::from(face.line_gap());

        Ok(Self {
            path,
            bytes,
            units_per_em,
            ascender,
            descender,
            line_gap,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Distance from the top of a line to its baseline
    pub fn ascent(&self, size: f32) -> f32 {
        self.ascender / self.units_per_em * size
    }

    /// Height of one line of text including the font's line gap
    pub fn line_height(&self, size: f32) -> f32 {
        (self.ascender - self.descender + self.line_gap) / self.units_per_em * size
    }

    /// Advance width of `text` at `size` points
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        self.measure().width(text, size)
    }

    /// Break `text` into lines no wider than `max_width`
    pub fn wrap(&self, text: &str, size: f32, max_width: f32) -> Vec<String> {
        self.measure().wrap(text, size, max_width)
    }

    /// Parse the face once for a batch of width queries
    pub fn measure(&self) -> Measure<'_> {
        let face = Face::parse(&self.bytes, 0).ok();
        let fallback = face
            .as_ref()
            .and_then(|face| face.glyph_hor_advance(ttf_parser::GlyphId(0)))
            .map(f32::from)
            .unwrap_or(self.units_per_em * 0.5);

        Measure {
            face,
            units_per_em: self.units_per_em,
            fallback,
        }
    }
}

/// A parsed face borrowed from a [`FontFace`].
///
/// Characters without a glyph use the `.notdef` advance, or half an em when
/// the font has none.
pub struct Measure<'a> {
    face: Option<Face<'a>>,
    units_per_em: f32,
    fallback: f32,
}

impl Measure<'_> {
    pub fn width(&self, text: &str, size: f32) -> f32 {
        let units: f32 = match &self.face {
            Some(face) => text
                .chars()
                .map(|c| {
                    face.glyph_index(c)
                        .and_then(|id| face.glyph_hor_advance(id))
                        .map(f32::from)
                        .unwrap_or(self.fallback)
                })
                .sum(),
            None => text.chars().count() as f32 * self.fallback,
        };

        units / self.units_per_em * size
    }

    /// Break `text` into lines no wider than `max_width`.
    ///
    /// Breaks at whitespace first; runs without spaces (long codes, Thai
    /// text) are broken between characters. Always returns at least one line.
    pub fn wrap(&self, text: &str, size: f32, max_width: f32) -> Vec<String> {
        let mut lines = Vec::new();

        for paragraph in text.split('\n') {
            let mut line = String::new();
            for word in paragraph.split_whitespace() {
                let candidate = if line.is_empty() {
                    word.to_string()
                } else {
                    format!("{} {}", line, word)
                };

                if self.width(&candidate, size) <= max_width {
                    line = candidate;
                    continue;
                }

                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }

                if self.width(word, size) <= max_width {
                    line = word.to_string();
                } else {
                    let mut pieces = self.break_word(word, size, max_width);
                    line = pieces.pop().unwrap_or_default();
                    lines.extend(pieces);
                }
            }
            lines.push(line);
        }

        if lines.is_empty() {
            lines.push(String::new());
        }
        lines
    }

    fn break_word(&self, word: &str, size: f32, max_width: f32) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut piece = String::new();

        for c in word.chars() {
            piece.push(c);
            if piece.chars().count() > 1 && self.width(&piece, size) > max_width {
                piece.pop();
                pieces.push(std::mem::take(&mut piece));
                piece.push(c);
            }
        }
        pieces.push(piece);
        pieces
    }
}

/// Regular and bold weights of the report typeface
#[derive(Debug, Clone)]
pub struct FontSet {
    pub regular: FontFace,
    pub bold: FontFace,
}

impl FontSet {
    /// Load both weights; a missing file is fatal for generation
    pub fn load(regular: impl AsRef<Path>, bold: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            regular: FontFace::load(regular)?,
            bold: FontFace::load(bold)?,
        })
    }

    pub fn get(&self, weight: FontWeight) -> &FontFace {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_font_is_font_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("AngsanaNew.ttf");

        let err = FontSet::load(&missing, &missing).unwrap_err();
        match err {
            ReportError::Font { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_garbage_font_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a font").unwrap();

        let err = FontFace::load(file.path()).unwrap_err();
        assert!(matches!(err, ReportError::FontParse { .. }));
        assert!(err.to_string().contains("Failed to parse font"));
    }

    fn system_font() -> Option<FontFace> {
        std::env::var("REPORT_TEST_FONT")
            .ok()
            .into_iter()
            .chain(
                [
                    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
                    "/usr/share/fonts/TTF/DejaVuSans.ttf",
                ]
                .map(String::from),
            )
            .find(|path| std::path::Path::new(path).is_file())
            .and_then(|path| FontFace::load(path).ok())
    }

    #[test]
    fn test_wrap_fits_lines_with_one_parse() {
        let Some(font) = system_font() else { return };
        let measure = font.measure();
        let text = "replace the worn bearing SO-000000000000000000000000000001 and realign";

        let lines = measure.wrap(text, 18.0, 120.0);

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.chars().count() == 1 || measure.width(line, 18.0) <= 120.0, "{line}");
        }
        assert_eq!(lines.concat().replace(' ', ""), text.replace(' ', ""));
        assert_eq!(font.wrap(text, 18.0, 120.0), lines);
        assert_eq!(font.text_width("bearing", 18.0), measure.width("bearing", 18.0));
    }

    #[test]
    fn test_wrap_empty_text_is_one_line() {
        let Some(font) = system_font() else { return };
        assert_eq!(font.wrap("", 18.0, 100.0), vec![String::new()]);
    }
}
