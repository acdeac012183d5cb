use std::{fs, path::Path};

use crate::{
    error::{ScavengerError, ScavengerResult},
    run::Direction,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Step(Direction),
    Abandon,
}

/// A queue of commands read from a move script: one key per character,
/// blank lines and `#` comments skipped.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    script_commands: Vec<Command>,
    current_command_index: usize,
}

impl ScriptedInput {
    pub fn from_file<P: AsRef<Path>>(path: P) -> ScavengerResult<Self> {
        let raw = fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> ScavengerResult<Self> {
        let mut script_commands = Vec::new();

        for (line_idx, line) in raw.lines().enumerate() {
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() || trimmed_line.starts_with('#') {
                continue;
            }

            for char_code in trimmed_line.chars() {
                match char_to_command(char_code) {
                    Some(Some(command)) => script_commands.push(command),
                    Some(None) => {}
                    None => {
                        return Err(ScavengerError::Script {
                            line: line_idx + 1,
                            command: char_code,
                        });
                    }
                }
            }
        }

        Ok(Self {
            script_commands,
            current_command_index: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.script_commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.script_commands.is_empty()
    }

    pub fn next_command(&mut self) -> Option<Command> {
        let command = self.script_commands.get(self.current_command_index).copied()?;
        self.current_command_index += 1;
        Some(command)
    }
}

/// `None` for unknown keys, `Some(None)` for keys that are accepted but do nothing.
fn char_to_command(c: char) -> Option<Option<Command>> {
    let command = match c {
        'w' | 'W' | 'k' | 'K' => Command::Step(Direction::North),
        'd' | 'D' | 'l' | 'L' => Command::Step(Direction::East),
        's' | 'S' | 'j' | 'J' => Command::Step(Direction::South),
        'a' | 'A' | 'h' | 'H' => Command::Step(Direction::West),
        'q' | 'Q' => Command::Abandon,
        '.' | ' ' | '\t' => return Some(None),
        _ => return None,
    };
    Some(Some(command))
}
