//! Reader for the scan table text format.
//!
//! ```text
//! # comment lines start with '#'
//! nelevations 2
//! elevation 0.5
//! nazimuths 360
//! 0.0
//! 1.0
//! ...
//! elevation 1.5
//! nazimuths 360
//! ...
//! ```
//!
//! Values are read as whitespace-separated tokens, so blank lines are
//! ignored. Any deviation from the layout fails the whole load.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use radar_common::{RadarError, RadarResult};
use tracing::{debug, info};

use crate::table::{ScanTable, SweepDef};

/// Parse scan table text into its sweep definitions.
pub fn parse_scan_table(text: &str) -> RadarResult<Vec<SweepDef>> {
    let mut tokens = Tokens::new(text);

    tokens.expect_keyword("nelevations")?;
    let nelevations: usize = tokens.next_value("nelevations")?;
    if nelevations == 0 {
        return Err(RadarError::malformed(tokens.line(), "nelevations must be positive"));
    }

    // counts come from the file; never reserve more than the tokens left
    let mut sweeps = Vec::with_capacity(nelevations.min(tokens.remaining()));
    for elev_num in 0..nelevations {
        tokens.expect_keyword("elevation")?;
        let elevation: f64 = tokens.next_value("elevation angle")?;

        tokens.expect_keyword("nazimuths")?;
        let nazimuths: usize = tokens.next_value("nazimuths")?;
        if nazimuths == 0 {
            return Err(RadarError::malformed(
                tokens.line(),
                format!("nazimuths must be positive for elevation {}", elev_num),
            ));
        }

        let mut azimuths = Vec::with_capacity(nazimuths.min(tokens.remaining()));
        for _ in 0..nazimuths {
            azimuths.push(tokens.next_value("azimuth")?);
        }

        sweeps.push(SweepDef::new(elevation, azimuths));
    }

    if let Some((line, token)) = tokens.next() {
        return Err(RadarError::malformed(
            line,
            format!("unexpected trailing token '{}'", token),
        ));
    }

    Ok(sweeps)
}

impl ScanTable {
    /// Parse a table from text in the scan table format.
    pub fn parse(text: &str, extend_below: bool) -> RadarResult<Self> {
        let sweeps = parse_scan_table(text)?;
        ScanTable::new(sweeps, extend_below)
    }

    /// Load a table file.
    pub fn from_file<P: AsRef<Path>>(path: P, extend_below: bool) -> RadarResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Reading scan table");

        let text = fs::read_to_string(path)?;
        let table = Self::parse(&text, extend_below)?;

        info!(
            path = %path.display(),
            nelevations = table.nelevations(),
            nbeams_vol = table.nbeams_vol(),
            "Loaded scan table"
        );
        Ok(table)
    }
}

/// Whitespace tokens of the non-comment lines, tagged with 1-based line
/// numbers.
struct Tokens<'a> {
    items: Vec<(usize, &'a str)>,
    pos: usize,
    last_line: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        let mut items = Vec::new();
        let mut last_line = 0;
        for (i, line) in text.lines().enumerate() {
            last_line = i + 1;
            if line.trim_start().starts_with('#') {
                continue;
            }
            items.extend(line.split_whitespace().map(|tok| (i + 1, tok)));
        }
        Self {
            items,
            pos: 0,
            last_line,
        }
    }

    /// Line of the most recently consumed token, or of end of input.
    fn line(&self) -> usize {
        match self.pos.checked_sub(1) {
            Some(p) => self.items[p].0,
            None => self.items.first().map(|t| t.0).unwrap_or(self.last_line),
        }
    }

    fn remaining(&self) -> usize {
        self.items.len() - self.pos
    }

    fn next(&mut self) -> Option<(usize, &'a str)> {
        let item = self.items.get(self.pos).copied();
        if item.is_some() {
            self.pos += 1;
        }
        item
    }

    fn next_or_eof(&mut self, what: &str) -> RadarResult<(usize, &'a str)> {
        let eof_line = self.last_line;
        self.next().ok_or_else(|| {
            RadarError::malformed(eof_line, format!("unexpected end of input, expected {}", what))
        })
    }

    fn expect_keyword(&mut self, keyword: &str) -> RadarResult<()> {
        let (line, token) = self.next_or_eof(&format!("'{}'", keyword))?;
        if token != keyword {
            return Err(RadarError::malformed(
                line,
                format!("expected '{}', found '{}'", keyword, token),
            ));
        }
        Ok(())
    }

    fn next_value<T: FromStr>(&mut self, what: &str) -> RadarResult<T> {
        let (line, token) = self.next_or_eof(what)?;
        token.parse().map_err(|_| {
            RadarError::malformed(line, format!("invalid {} value '{}'", what, token))
        })
    }
}
