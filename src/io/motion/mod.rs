//! Motion-command log reading
//!
//! A motion log is the text the stage control software records while it
//! writes a structure: calls such as `MoveAbsolute(1, 2, 0);` or
//! `SetTrigger(off);`, with `/* */` comments allowed anywhere. The reader
//! replays the calls and hands back every path drawn between two triggers.

mod comment;
mod reader;
mod tokenizer;
mod vocabulary;

pub use comment::CommentStripper;
pub use reader::{
    MotionLogConfiguration, MotionLogReader, CONSTRUCTION_REFERENCE, EXPOSURE_REFERENCE,
};
pub use tokenizer::{Arguments, Call, CallTokenizer, Switch};
pub use vocabulary::{lookup, Action, Arity, Command, COMMANDS};
