//! Motion-command vocabulary
//!
//! Every primitive the stage control software logs, with its short alias,
//! its parameter shape and what it does to the drawn path.

use ahash::AHashMap;
use once_cell::sync::Lazy;

/// Parameter shape of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// A fixed number of comma-separated numbers
    Numeric(usize),
    /// A single `on` / `off` literal
    Switch,
}

/// Effect of a command on the reader state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Fine-stage move by (dx, dy)
    PiezoRelative,
    /// Fine-stage move to (x, y)
    PiezoAbsolute,
    /// Coarse-stage move by (dx, dy)
    StepperRelative,
    /// Coarse-stage move to (x, y)
    StepperAbsolute,
    /// Zero the fine-stage accumulator
    ResetPiezo,
    /// Zero the coarse-stage accumulator
    ResetStepper,
    /// Laser trigger; ends the current path
    Trigger,
    /// Parsed for its arguments only
    Ignore,
}

/// One vocabulary entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub name: &'static str,
    pub alias: &'static str,
    pub arity: Arity,
    pub action: Action,
}

const fn command(name: &'static str, alias: &'static str, arity: Arity, action: Action) -> Command {
    Command {
        name,
        alias,
        arity,
        action,
    }
}

use Action::*;
use Arity::*;

/// The full vocabulary
pub static COMMANDS: [Command; 22] = [
    command("SetTrigger", "st", Switch, Trigger),
    command("MoveRelative", "mr", Numeric(3), PiezoRelative),
    command("MoveAbsolute", "ma", Numeric(3), PiezoAbsolute),
    command("JumpRelative", "jr", Numeric(3), PiezoRelative),
    command("JumpAbsolute", "ja", Numeric(3), PiezoAbsolute),
    command("SetOrigin", "so", Numeric(3), ResetPiezo),
    command("MoveRelativeSamplePos", "mr_sp", Numeric(2), StepperRelative),
    command("MoveAbsoluteSamplePos", "ma_sp", Numeric(2), StepperAbsolute),
    command("JumpRelativeSamplePos", "jr_sp", Numeric(2), StepperRelative),
    command("JumpAbsoluteSamplePos", "ja_sp", Numeric(2), StepperAbsolute),
    command("SetOriginSamplePos", "so_sp", Numeric(0), ResetStepper),
    command("MoveZMicroscope", "mz", Numeric(1), Ignore),
    command("MovingSpeed", "ms", Numeric(1), Ignore),
    command("Sleep", "sl", Numeric(1), Ignore),
    // Free text up to the semicolon
    command("DisplayMessage", "dm", Numeric(0), Ignore),
    command("SetPoint", "sp", Numeric(3), Ignore),
    command("Snapshot", "ss", Numeric(0), Ignore),
    command("PushTransformation", "push", Numeric(0), Ignore),
    command("PopTransformation", "pop", Numeric(0), Ignore),
    command("Rotate", "rot", Numeric(1), Ignore),
    command("Scale", "sc", Numeric(1), Ignore),
    command("WaitforStablePosition", "wsp", Numeric(0), Ignore),
];

/// Lower-cased canonical names and aliases
static LOOKUP: Lazy<AHashMap<String, &'static Command>> = Lazy::new(|| {
    let mut map = AHashMap::with_capacity(COMMANDS.len() * 2);
    for command in COMMANDS.iter() {
        map.insert(command.name.to_ascii_lowercase(), command);
        map.insert(command.alias.to_ascii_lowercase(), command);
    }
    map
});

/// Find a command by canonical name or alias, ignoring ASCII case
pub fn lookup(name: &str) -> Option<&'static Command> {
    LOOKUP.get(&name.to_ascii_lowercase()).copied()
}
