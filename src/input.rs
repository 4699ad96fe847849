//! Text input for process lists and menu choices.
//!
//! Input is a whitespace-separated token stream: a process count `n`,
//! then `n` pairs of `arrival service`. Line breaks are insignificant
//! except for error positions.

use std::collections::VecDeque;
use std::io::BufRead;

use crate::error::SimulationError;
use crate::models::{Algorithm, ProcessSet};
use crate::validation::{validate_processes, ValidationError, ValidationErrorKind};

/// A selection from the control menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// `0`: print final averages and stop.
    Quit,
    /// `1` or `2`: run an algorithm.
    Run(Algorithm),
}

/// Pulls whitespace-separated tokens from a reader, one line at a time.
pub struct TokenReader<R> {
    reader: R,
    line: usize,
    buffered: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buffered: VecDeque::new(),
        }
    }

    /// Line number of the most recently read line (1-based).
    pub fn line(&self) -> usize {
        self.line
    }

    /// Next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<String>, SimulationError> {
        while self.buffered.is_empty() {
            let mut buf = String::new();
            if self.reader.read_line(&mut buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            self.buffered
                .extend(buf.split_whitespace().map(str::to_string));
        }
        Ok(self.buffered.pop_front())
    }

    fn expect_token(&mut self, what: &str) -> Result<String, SimulationError> {
        self.next_token()?
            .ok_or_else(|| SimulationError::UnexpectedEof(format!("expected {what}")))
    }

    fn parse_next<T: std::str::FromStr>(&mut self, what: &str) -> Result<T, SimulationError> {
        let token = self.expect_token(what)?;
        token.parse().map_err(|_| SimulationError::Parse {
            line: self.line,
            token,
        })
    }

    /// Reads a process count followed by that many `arrival service`
    /// pairs, and validates the result.
    pub fn read_process_list(&mut self) -> Result<ProcessSet, SimulationError> {
        let count: usize = self.parse_next("process count")?;
        let mut pairs = Vec::with_capacity(count);
        for i in 1..=count {
            let arrival: f64 = self.parse_next(&format!("arrival time of process {i}"))?;
            let service: f64 = self.parse_next(&format!("service time of process {i}"))?;
            pairs.push((arrival, service));
        }

        let set = ProcessSet::from_pairs(&pairs);
        validate_processes(&set)?;
        Ok(set)
    }

    /// Reads one menu choice. End of input counts as `Quit`.
    pub fn read_choice(&mut self) -> Result<MenuChoice, SimulationError> {
        match self.next_token()? {
            Some(token) => parse_choice(&token, self.line),
            None => Ok(MenuChoice::Quit),
        }
    }

    /// Reads a Round Robin quantum.
    ///
    /// The token is parsed as a signed integer so that `0` and negative
    /// values surface as `InvalidInput` rather than a parse failure.
    pub fn read_quantum(&mut self) -> Result<u64, SimulationError> {
        let quantum: i64 = self.parse_next("quantum")?;
        if quantum <= 0 {
            return Err(SimulationError::InvalidInput(vec![ValidationError::new(
                ValidationErrorKind::NonPositiveQuantum,
                format!("Quantum must be positive, got {quantum}"),
            )]));
        }
        Ok(quantum as u64)
    }
}

/// Parses a full process list from text.
pub fn parse_process_list(text: &str) -> Result<ProcessSet, SimulationError> {
    TokenReader::new(text.as_bytes()).read_process_list()
}

/// Maps `0`, `1`, `2` to a menu choice.
pub fn parse_choice(token: &str, line: usize) -> Result<MenuChoice, SimulationError> {
    match token {
        "0" => Ok(MenuChoice::Quit),
        "1" => Ok(MenuChoice::Run(Algorithm::Hrrn)),
        "2" => Ok(MenuChoice::Run(Algorithm::Rr)),
        _ => Err(SimulationError::Parse {
            line,
            token: token.to_string(),
        }),
    }
}
