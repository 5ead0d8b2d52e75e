/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Parser for the whitespace-delimited workload format.
//!
//! ```text
//! 3                 ← number of tasks
//! build 5 4 20      ← name priority burst_time deadline
//! test  3 2 30
//! deploy 1 1 40
//! 2                 ← number of dependencies
//! build test        ← from to
//! test deploy
//! ```
//!
//! Tokens may be split across lines arbitrarily; only their order matters.
//! A missing dependency count is read as zero dependencies and anything after
//! the last expected token is ignored.

use std::iter::Peekable;
use std::str::FromStr;

use thiserror::Error;

use super::Workload;
use crate::task::{Dependency, TaskSpec};

/// Upper bound on up-front allocation; counts come from untrusted input.
const PREALLOC_LIMIT: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input ended while `expected` was still to be read.
    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: String },

    /// `token` on `line` could not be parsed as the numeric `field`.
    #[error("line {line}: invalid {field} '{token}'")]
    InvalidNumber {
        field: &'static str,
        token: String,
        line: usize,
    },
}

/// Whitespace tokenizer that remembers the 1-based line of each token.
struct Tokens<'a> {
    inner: Peekable<Box<dyn Iterator<Item = (usize, &'a str)> + 'a>>,
}

impl<'a> Tokens<'a> {
    fn new(content: &'a str) -> Self {
        let inner: Box<dyn Iterator<Item = (usize, &'a str)> + 'a> = Box::new(
            content
                .lines()
                .enumerate()
                .flat_map(|(i, line)| line.split_whitespace().map(move |tok| (i + 1, tok))),
        );
        Self {
            inner: inner.peekable(),
        }
    }

    fn word(&mut self, expected: impl FnOnce() -> String) -> Result<&'a str, ParseError> {
        self.inner
            .next()
            .map(|(_, tok)| tok)
            .ok_or_else(|| ParseError::UnexpectedEof {
                expected: expected(),
            })
    }

    fn number<T: FromStr>(
        &mut self,
        field: &'static str,
        expected: impl FnOnce() -> String,
    ) -> Result<T, ParseError> {
        let (line, tok) = self.inner.next().ok_or_else(|| ParseError::UnexpectedEof {
            expected: expected(),
        })?;
        tok.parse().map_err(|_| ParseError::InvalidNumber {
            field,
            token: tok.to_string(),
            line,
        })
    }

    fn is_exhausted(&mut self) -> bool {
        self.inner.peek().is_none()
    }
}

/// Parse a complete workload document.
pub fn parse(content: &str) -> Result<Workload, ParseError> {
    let mut tokens = Tokens::new(content);

    let task_count: usize = tokens.number("task count", || "task count".into())?;
    let mut tasks = Vec::with_capacity(task_count.min(PREALLOC_LIMIT));

    for i in 1..=task_count {
        let name = tokens.word(|| format!("name of task {i}"))?;
        let priority: i32 = tokens.number("priority", || format!("priority of task '{name}'"))?;
        let burst_time: u64 =
            tokens.number("burst time", || format!("burst time of task '{name}'"))?;
        let deadline: i64 = tokens.number("deadline", || format!("deadline of task '{name}'"))?;
        tasks.push(TaskSpec::new(name, priority, burst_time, deadline));
    }

    let dependency_count: usize = if tokens.is_exhausted() {
        0
    } else {
        tokens.number("dependency count", || "dependency count".into())?
    };
    let mut dependencies = Vec::with_capacity(dependency_count.min(PREALLOC_LIMIT));

    for i in 1..=dependency_count {
        let from = tokens.word(|| format!("source of dependency {i}"))?;
        let to = tokens.word(|| format!("target of dependency {i}"))?;
        dependencies.push(Dependency::new(from, to));
    }

    Ok(Workload {
        tasks,
        dependencies,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
