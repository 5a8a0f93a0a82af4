//! Motion-log polyline reader

use super::tokenizer::{Call, CallTokenizer, Switch};
use super::vocabulary::Action;
use crate::entities::Polyline;
use crate::error::Result;
use crate::io::PolylineReader;
use crate::notification::{NotificationCollection, NotificationType};
use crate::types::Vertex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reference of a path drawn while the laser was exposing
pub const EXPOSURE_REFERENCE: usize = 0;

/// Reference of a path drawn with the laser off
pub const CONSTRUCTION_REFERENCE: usize = 1;

/// Configuration for the motion-log reader.
#[derive(Debug, Clone, Default)]
pub struct MotionLogConfiguration {
    /// Return paths travelled with the laser off (reference 1) instead of
    /// discarding them.
    ///
    /// Default: `false`.
    pub include_construction_lines: bool,
}

/// Rebuilds drawn paths from a stage motion-command log.
///
/// Two position accumulators are tracked: the coarse stepper stage and the
/// fine piezo stage. Their sum is the tool position. Every move extends the
/// path being built; `SetTrigger` ends it. `SetTrigger(off)` closes an
/// exposed path (reference 0), `SetTrigger(on)` a construction path
/// (reference 1), which is only returned when construction lines are
/// included.
///
/// A path still open when the log ends is discarded with a
/// [`NotificationType::Discarded`] notice. A log that ends inside a call is a
/// parse error.
pub struct MotionLogReader<R: BufRead> {
    tokenizer: Option<CallTokenizer<R>>,
    config: MotionLogConfiguration,
    stepper: Vertex,
    piezo: Vertex,
    current: Polyline,
    notifications: NotificationCollection,
}

impl MotionLogReader<BufReader<File>> {
    /// Open a motion log file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> MotionLogReader<R> {
    /// Create a reader over any buffered source
    pub fn from_reader(reader: R) -> Self {
        Self {
            tokenizer: Some(CallTokenizer::new(reader)),
            config: MotionLogConfiguration::default(),
            stepper: Vertex::ORIGIN,
            piezo: Vertex::ORIGIN,
            current: Polyline::new(),
            notifications: NotificationCollection::new(),
        }
    }

    /// Set the reader configuration.
    pub fn with_configuration(mut self, config: MotionLogConfiguration) -> Self {
        self.config = config;
        self
    }

    pub fn configuration(&self) -> &MotionLogConfiguration {
        &self.config
    }

    /// Coarse stage position
    pub fn stepper_position(&self) -> Vertex {
        self.stepper
    }

    /// Fine stage position
    pub fn piezo_position(&self) -> Vertex {
        self.piezo
    }

    /// Tool position: stepper plus piezo
    pub fn position(&self) -> Vertex {
        self.stepper + self.piezo
    }

    /// Extend the current path by `delta`, seeding it at the tool position
    fn draw(&mut self, delta: Vertex) {
        let start = match self.current.last() {
            Some(last) => last,
            None => {
                let seed = self.position();
                self.current.push(seed);
                seed
            }
        };
        self.current.push(start + delta);
    }

    /// Apply one call; returns a finished path when the call ends one that
    /// should be handed out.
    fn execute(&mut self, call: &Call) -> Option<Polyline> {
        let target = Vertex::new(call.number(0), call.number(1));

        match call.command.action {
            Action::PiezoRelative => {
                self.draw(target);
                self.piezo = self.piezo + target;
            }
            Action::PiezoAbsolute => {
                self.draw(target - self.piezo);
                self.piezo = target;
            }
            Action::StepperRelative => {
                self.draw(target);
                self.stepper = self.stepper + target;
            }
            Action::StepperAbsolute => {
                self.draw(target - self.stepper);
                self.stepper = target;
            }
            Action::ResetPiezo => self.piezo = Vertex::ORIGIN,
            Action::ResetStepper => self.stepper = Vertex::ORIGIN,
            Action::Trigger => return self.trigger(call.switch()?),
            Action::Ignore => {}
        }
        None
    }

    fn trigger(&mut self, switch: Switch) -> Option<Polyline> {
        if self.current.is_empty() {
            return None;
        }

        let mut path = self.current.take();
        match switch {
            // The laser was exposing up to here
            Switch::Off => path.reference = EXPOSURE_REFERENCE,
            Switch::On => {
                path.reference = CONSTRUCTION_REFERENCE;
                if !self.config.include_construction_lines {
                    tracing::trace!("discarding construction path of {} vertices", path.len());
                    self.notifications.notify(
                        NotificationType::Discarded,
                        format!("construction path of {} vertices", path.len()),
                    );
                    return None;
                }
            }
        }

        tracing::debug!(
            "emitting path: {} vertices, reference={}",
            path.len(),
            path.reference
        );
        Some(path)
    }

    /// Execute calls until a path is handed out or the log ends
    fn replay(&mut self) -> Result<Option<Polyline>> {
        loop {
            let call = match self.tokenizer.as_mut() {
                Some(tokenizer) => tokenizer.next_call()?,
                None => None,
            };

            match call {
                Some(call) => {
                    if let Some(path) = self.execute(&call) {
                        return Ok(Some(path));
                    }
                }
                None => {
                    self.finish();
                    return Ok(None);
                }
            }
        }
    }

    /// End of log: drop a path no trigger closed
    fn finish(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let path = self.current.take();
        tracing::warn!(
            "motion log ends with an untriggered path of {} vertices; discarded",
            path.len()
        );
        self.notifications.notify(
            NotificationType::Discarded,
            format!(
                "untriggered path of {} vertices at end of log",
                path.len()
            ),
        );
    }
}

impl<R: BufRead> PolylineReader for MotionLogReader<R> {
    /// A parse error ends the stream: the tokenizer and any open path are
    /// dropped and later calls return `None`.
    fn read_polyline(&mut self) -> Result<Option<Polyline>> {
        let result = self.replay();
        if let Err(err) = &result {
            tracing::warn!("motion log reading aborted: {}", err);
            self.tokenizer = None;
            self.current = Polyline::new();
        }
        result
    }

    fn close(&mut self) -> Result<()> {
        if self.tokenizer.take().is_some() {
            tracing::debug!("motion log reader closed");
        }
        Ok(())
    }

    fn notifications(&self) -> &NotificationCollection {
        &self.notifications
    }
}
