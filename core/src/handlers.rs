#![deny(missing_docs)]

//! # Handler Detection
//!
//! Finds exported route handlers by line prefix. Only declarations that start
//! at column 0 with `export async function <METHOD>(` are recognised; nothing
//! here understands the grammar of the route file.

use crate::error::{AppError, AppResult};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// HTTP methods a route file may export a handler for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
    /// `PATCH`
    Patch,
}

impl HttpMethod {
    /// All recognised methods, in pattern order.
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    /// The exported function name for this method.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| AppError::General(format!("Unknown HTTP method '{}'", s)))
    }
}

/// Where an exported handler declaration begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerMatch {
    /// Zero-based line index of the declaration.
    pub line: usize,
    /// The handler's method.
    pub method: HttpMethod,
}

impl HandlerMatch {
    /// One-based line number, as shown to users.
    pub fn line_number(&self) -> usize {
        self.line + 1
    }
}

/// Line matcher for exported async handler declarations.
#[derive(Debug, Clone)]
pub struct HandlerDetector {
    pattern: Regex,
}

impl HandlerDetector {
    /// Builds a detector for all methods in [`HttpMethod::ALL`].
    pub fn new() -> AppResult<Self> {
        let alternatives = HttpMethod::ALL
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"^export async function ({})\(", alternatives))?;
        Ok(Self { pattern })
    }

    /// Matches a single line, returning the method if it declares a handler.
    pub fn match_line(&self, line: &str) -> Option<HttpMethod> {
        let caps = self.pattern.captures(line)?;
        caps.get(1).and_then(|m| m.as_str().parse().ok())
    }

    /// First handler declaration in `lines`, scanning top to bottom.
    pub fn find_first(&self, lines: &[&str]) -> Option<HandlerMatch> {
        lines.iter().enumerate().find_map(|(line, text)| {
            self.match_line(text)
                .map(|method| HandlerMatch { line, method })
        })
    }

    /// Every handler declaration in `lines`, in file order.
    pub fn find_all(&self, lines: &[&str]) -> Vec<HandlerMatch> {
        lines
            .iter()
            .enumerate()
            .filter_map(|(line, text)| {
                self.match_line(text)
                    .map(|method| HandlerMatch { line, method })
            })
            .collect()
    }
}
