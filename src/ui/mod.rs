//! Text rendering for dictionary entries
//!
//! Turns a parsed [`LookupResponse`] into the plain or colorized lines printed
//! to the terminal.

pub mod highlight;
pub mod palette;

pub use highlight::highlight_tokens;
pub use palette::{Palette, Role};

use std::io::{self, Write};

use crate::data::{Language, LookupResponse, Sample};

/// Renders dictionary entries with a fixed set of options
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    palette: Palette,
    long: bool,
    language: Language,
}

impl Renderer {
    /// Create a renderer
    ///
    /// # Arguments
    /// * `palette` - Colors to wrap headers, translations and highlights in
    /// * `long` - Whether to include the samples section
    /// * `language` - Language of the query, deciding which half of a sample is highlighted
    pub fn new(palette: Palette, long: bool, language: Language) -> Self {
        Self {
            palette,
            long,
            language,
        }
    }

    /// Writes the formatted entry for `response` to `out`
    ///
    /// `query` is used as the highlight target when the response carries no word.
    pub fn render<W: Write>(
        &self,
        response: &LookupResponse,
        query: &str,
        out: &mut W,
    ) -> io::Result<()> {
        if !response.pronunciation.is_empty() {
            self.header(out, "Pronunciation")?;
            for (label, transcription) in response.phonetics() {
                writeln!(out, "    {}. [{}]", label, transcription)?;
            }
        }

        if !response.defs.is_empty() {
            self.header(out, "Definition")?;
            for def in response.definitions() {
                writeln!(
                    out,
                    "    {} {}",
                    def.pos,
                    self.palette.paint(Role::Translation, &def.def)
                )?;
            }
        }

        if self.long && !response.sams.is_empty() {
            let word = if response.word.is_empty() {
                query
            } else {
                response.word.as_str()
            };

            self.header(out, "Samples")?;
            for sample in &response.sams {
                let (eng, chn) = self.sample_lines(sample, word);
                writeln!(out, "  - {}", eng)?;
                writeln!(out, "    {}", chn)?;
            }
        }

        Ok(())
    }

    fn header<W: Write>(&self, out: &mut W, title: &str) -> io::Result<()> {
        writeln!(
            out,
            "{}",
            self.palette.paint(Role::Header, &format!("* {}", title))
        )
    }

    /// Highlights the half of the pair written in the query's language
    fn sample_lines(&self, sample: &Sample, word: &str) -> (String, String) {
        match self.language {
            Language::English => (
                highlight_tokens(&sample.eng, word, &self.palette),
                self.palette.paint(Role::Translation, &sample.chn),
            ),
            Language::Target => (
                self.palette.paint(Role::Translation, &sample.eng),
                highlight_tokens(&sample.chn, word, &self.palette),
            ),
        }
    }
}
