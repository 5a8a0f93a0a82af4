//! Resumable tokenizer for `name(arg, ...);` command calls

use super::comment::CommentStripper;
use super::vocabulary::{self, Arity, Command};
use crate::error::{IngestError, Result};
use crate::io::line_reader::LineReader;
use std::io::BufRead;

/// Argument of the trigger command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    On,
    Off,
}

/// Parsed arguments of a call
#[derive(Debug, Clone, PartialEq)]
pub enum Arguments {
    Numbers(Vec<f64>),
    Switch(Switch),
}

/// A fully parsed command call
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub command: &'static Command,
    pub arguments: Arguments,
}

impl Call {
    /// The `index`-th numeric argument, 0 when absent
    pub fn number(&self, index: usize) -> f64 {
        match &self.arguments {
            Arguments::Numbers(values) => values.get(index).copied().unwrap_or(0.0),
            Arguments::Switch(_) => 0.0,
        }
    }

    pub fn switch(&self) -> Option<Switch> {
        match self.arguments {
            Arguments::Switch(s) => Some(s),
            Arguments::Numbers(_) => None,
        }
    }
}

/// Tokenizer state between steps
#[derive(Debug, Clone, PartialEq)]
enum TokenState {
    /// Expecting `name(`
    FunctionName,
    /// Reading numeric parameters; `values.len()` have been read so far
    Parameters {
        command: &'static Command,
        expected: usize,
        values: Vec<f64>,
    },
    /// Expecting `on)` or `off)`
    Switch { command: &'static Command },
    /// Skipping to the terminating `;`
    Semicolon(Call),
    /// Call complete, waiting to be handed out
    Ready(Call),
}

impl TokenState {
    fn describe(&self) -> String {
        match self {
            TokenState::FunctionName => "between calls".to_string(),
            TokenState::Parameters {
                command,
                expected,
                values,
            } => format!(
                "reading parameter {} of {} for {}",
                values.len() + 1,
                expected,
                command.name
            ),
            TokenState::Switch { command } => format!("reading on/off for {}", command.name),
            TokenState::Semicolon(call) => format!("looking for ';' after {}", call.command.name),
            TokenState::Ready(call) => format!("{} ready", call.command.name),
        }
    }
}

/// Turns a motion log into a stream of [`Call`]s.
///
/// Lines are comment-stripped as they are fetched. Parsing moves through the
/// current line one syntactic step at a time and fetches the next line when
/// a step needs more text, so calls may span lines and several calls may
/// share one.
pub struct CallTokenizer<R: BufRead> {
    lines: LineReader<R>,
    comments: CommentStripper,
    state: TokenState,
    buffer: String,
    pos: usize,
}

impl<R: BufRead> CallTokenizer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: LineReader::new(reader),
            comments: CommentStripper::new(),
            state: TokenState::FunctionName,
            buffer: String::new(),
            pos: 0,
        }
    }

    pub fn line_number(&self) -> usize {
        self.lines.line_number()
    }

    /// Whether a call has been started but not completed
    pub fn is_mid_call(&self) -> bool {
        self.state != TokenState::FunctionName
    }

    fn remaining(&self) -> &str {
        &self.buffer[self.pos..]
    }

    fn error(&self, message: impl Into<String>) -> IngestError {
        IngestError::parse(self.lines.line_number(), message)
    }

    /// Replace the buffer with the next comment-stripped line
    fn fetch_line(&mut self) -> Result<bool> {
        match self.lines.read_line()? {
            Some(line) => {
                self.buffer = self.comments.strip(&line);
                self.pos = 0;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Next complete call, or `None` at a clean end of stream.
    ///
    /// Ending in the middle of a call is a parse error.
    pub fn next_call(&mut self) -> Result<Option<Call>> {
        loop {
            if let TokenState::Ready(_) = self.state {
                if let TokenState::Ready(call) =
                    std::mem::replace(&mut self.state, TokenState::FunctionName)
                {
                    return Ok(Some(call));
                }
            }

            if self.remaining().trim().is_empty() {
                if self.fetch_line()? {
                    continue;
                }
                return match self.state {
                    TokenState::FunctionName => Ok(None),
                    ref state => Err(self.error(format!(
                        "unexpected end of stream while {}",
                        state.describe()
                    ))),
                };
            }

            let state = std::mem::replace(&mut self.state, TokenState::FunctionName);
            self.state = self.step(state)?;
        }
    }

    /// Advance one syntactic step through the current line
    fn step(&mut self, state: TokenState) -> Result<TokenState> {
        match state {
            TokenState::FunctionName => self.read_function_name(),
            TokenState::Parameters {
                command,
                expected,
                values,
            } => self.read_parameter(command, expected, values),
            TokenState::Switch { command } => self.read_switch(command),
            TokenState::Semicolon(call) => Ok(self.skip_to_semicolon(call)),
            ready @ TokenState::Ready(_) => Ok(ready),
        }
    }

    fn read_function_name(&mut self) -> Result<TokenState> {
        let rest = self.remaining();
        // Empty statement
        if let Some(after) = rest.trim_start().strip_prefix(';') {
            self.pos = self.buffer.len() - after.len();
            return Ok(TokenState::FunctionName);
        }
        let open = rest
            .find('(')
            .ok_or_else(|| self.error(format!("expected '(' after '{}'", rest.trim())))?;
        let name = rest[..open].trim();
        let command = vocabulary::lookup(name)
            .ok_or_else(|| self.error(format!("unknown function '{}'", name)))?;
        self.pos += open + 1;
        tracing::trace!("call {} at line {}", command.name, self.line_number());

        Ok(match command.arity {
            Arity::Switch => TokenState::Switch { command },
            Arity::Numeric(0) => TokenState::Semicolon(Call {
                command,
                arguments: Arguments::Numbers(Vec::new()),
            }),
            Arity::Numeric(expected) => TokenState::Parameters {
                command,
                expected,
                values: Vec::with_capacity(expected),
            },
        })
    }

    fn read_parameter(
        &mut self,
        command: &'static Command,
        expected: usize,
        mut values: Vec<f64>,
    ) -> Result<TokenState> {
        let rest = self.remaining();
        let close = rest.find(')');
        // A closing bracket before the next comma ends the list early;
        // the missing trailing parameters read as 0.
        let (end, last) = match rest.find(',') {
            Some(comma) if values.len() + 1 < expected && close.map_or(true, |c| comma < c) => {
                (comma, false)
            }
            _ => match close {
                Some(close) => (close, true),
                None => {
                    return Err(self.error(format!(
                        "expected ')' after parameter {} of {}",
                        values.len() + 1,
                        command.name
                    )))
                }
            },
        };
        let text = rest[..end].trim();
        let value = text.parse::<f64>().map_err(|_| {
            self.error(format!("invalid number '{}' in {}", text, command.name))
        })?;
        self.pos += end + 1;
        values.push(value);

        Ok(if last {
            TokenState::Semicolon(Call {
                command,
                arguments: Arguments::Numbers(values),
            })
        } else {
            TokenState::Parameters {
                command,
                expected,
                values,
            }
        })
    }

    fn read_switch(&mut self, command: &'static Command) -> Result<TokenState> {
        let rest = self.remaining();
        let end = rest
            .find(')')
            .ok_or_else(|| self.error(format!("expected ')' after {} argument", command.name)))?;

        let words = || {
            rest[..end]
                .split(|c: char| !c.is_ascii_alphabetic())
                .filter(|w| !w.is_empty())
        };
        let on = words().any(|w| w.eq_ignore_ascii_case("on"));
        let off = words().any(|w| w.eq_ignore_ascii_case("off"));

        let switch = match (on, off) {
            (true, false) => Switch::On,
            (false, true) => Switch::Off,
            _ => {
                return Err(self.error(format!(
                    "{} needs exactly one of 'on' or 'off', got '{}'",
                    command.name,
                    rest[..end].trim()
                )))
            }
        };
        self.pos += end + 1;

        Ok(TokenState::Semicolon(Call {
            command,
            arguments: Arguments::Switch(switch),
        }))
    }

    fn skip_to_semicolon(&mut self, call: Call) -> TokenState {
        match self.remaining().find(';') {
            Some(end) => {
                self.pos += end + 1;
                TokenState::Ready(call)
            }
            None => {
                self.pos = self.buffer.len();
                TokenState::Semicolon(call)
            }
        }
    }
}
