//! The line-oriented text format blocks are described in.
//!
//! Each line looks like `name,WIDTHxHEIGHT,ratio`. The ratio is either a range
//! like `0.8-1.2`, from which a scale factor is drawn uniformly, or a list of
//! choices like `0.8/1.2`, from which one is picked. Expanding a spec scales
//! the base size by the drawn factor and rounds it to two decimal places.

use std::fmt;

use rand::Rng;
use regex::Regex;
use shelfpack::Block;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Ratio {
    Range(f64, f64),
    Choices(Vec<f64>),
}

impl Ratio {
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Ratio::Range(min, max) if min < max => rng.random_range(*min..=*max),
            Ratio::Range(min, _) => *min,
            Ratio::Choices(choices) => choices[rng.random_range(0..choices.len())],
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Range(min, max) => write!(f, "{}-{}", min, max),
            Ratio::Choices(choices) => {
                let choices: Vec<_> = choices.iter().map(ToString::to_string).collect();
                f.write_str(&choices.join("/"))
            }
        }
    }
}

/// One line of a block list: a named base size and how to scale it.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockSpec {
    pub name: String,
    pub size: (f64, f64),
    pub ratio: Ratio,
}

impl BlockSpec {
    pub fn new<S: Into<String>>(name: S, size: (f64, f64), ratio: Ratio) -> Self {
        Self {
            name: name.into(),
            size,
            ratio,
        }
    }

    /// Draws a scale factor and produces the block to pack.
    pub fn expand<R: Rng + ?Sized>(&self, rng: &mut R) -> Block {
        let rate = self.ratio.draw(rng);
        let scale = |side: f64| (side * rate * 100.0).round() / 100.0;

        Block::new(self.name.clone(), (scale(self.size.0), scale(self.size.1))).with_rate(rate)
    }
}

impl fmt::Display for BlockSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{}x{},{}",
            self.name, self.size.0, self.size.1, self.ratio
        )
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BlockListError {
    #[error("line {line}: expected 3 comma-separated fields, found {count}")]
    FieldCount { line: usize, count: usize },

    #[error("line {line}: block {name:?} has an invalid size {text:?}")]
    InvalidDimension {
        line: usize,
        name: String,
        text: String,
    },

    #[error("line {line}: block {name:?} has an invalid ratio {text:?}")]
    InvalidRatio {
        line: usize,
        name: String,
        text: String,
    },
}

/// A parsed block list. Lines that couldn't be understood are kept in
/// `skipped` so they can be reported without failing the whole list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockList {
    pub specs: Vec<BlockSpec>,
    pub skipped: Vec<BlockListError>,
}

impl BlockList {
    pub fn parse(text: &str) -> Self {
        let mut list = BlockList::default();

        for (index, line) in text.lines().enumerate() {
            let line_number = index + 1;
            let line = line.trim();

            if line.is_empty() {
                continue;
            }

            match parse_line(line_number, line) {
                Ok(spec) => list.specs.push(spec),
                Err(err) => {
                    log::warn!("Skipping block: {}", err);
                    list.skipped.push(err);
                }
            }
        }

        log::debug!(
            "Parsed {} block specs, skipped {} lines",
            list.specs.len(),
            list.skipped.len()
        );

        list
    }

    pub fn expand<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Block> {
        self.specs.iter().map(|spec| spec.expand(rng)).collect()
    }
}

impl fmt::Display for BlockList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for spec in &self.specs {
            writeln!(f, "{}", spec)?;
        }

        Ok(())
    }
}

fn parse_line(line_number: usize, line: &str) -> Result<BlockSpec, BlockListError> {
    lazy_static::lazy_static! {
        static ref SIZE_PATTERN: Regex = Regex::new(r"^\s*([^xX\s]+)\s*[xX]\s*([^xX\s]+)\s*$").unwrap();
    }

    let fields: Vec<_> = line.split(',').collect();
    if fields.len() != 3 {
        return Err(BlockListError::FieldCount {
            line: line_number,
            count: fields.len(),
        });
    }

    let name = fields[0].trim().to_owned();

    let invalid_size = || BlockListError::InvalidDimension {
        line: line_number,
        name: name.clone(),
        text: fields[1].to_owned(),
    };

    let captures = SIZE_PATTERN.captures(fields[1]).ok_or_else(invalid_size)?;
    let side = |index: usize| {
        captures[index]
            .parse::<f64>()
            .ok()
            .filter(|side| side.is_finite() && *side > 0.0)
    };

    let size = match (side(1), side(2)) {
        (Some(width), Some(height)) => (width, height),
        _ => return Err(invalid_size()),
    };

    let ratio = parse_ratio(fields[2].trim()).ok_or_else(|| BlockListError::InvalidRatio {
        line: line_number,
        name: name.clone(),
        text: fields[2].to_owned(),
    })?;

    Ok(BlockSpec { name, size, ratio })
}

fn parse_ratio(text: &str) -> Option<Ratio> {
    let number = |value: &str| {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    };

    let bounds: Vec<_> = text.split('-').collect();
    if bounds.len() == 2 {
        let (min, max) = (number(bounds[0])?, number(bounds[1])?);
        return Some(Ratio::Range(min.min(max), min.max(max)));
    }

    let choices = text
        .split('/')
        .map(number)
        .collect::<Option<Vec<_>>>()?;

    Some(Ratio::Choices(choices))
}
