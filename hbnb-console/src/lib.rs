//! Command interpreter for the HBnB object registry.
//!
//! A thin layer over [`FileStorage`]: each command resolves its arguments,
//! makes one engine call and prints the result or one of the fixed
//! `** ... **` messages. Registry logic stays in the engine.

mod parse;

use hbnb_model::{ModelError, RegistryKey};
use hbnb_storage::{FileStorage, StorageError};
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::debug;

/// Prompt shown before each line when reading from a terminal.
pub const PROMPT: &str = "(hbnb) ";

const CLASS_NAME_MISSING: &str = "** class name missing **";
const CLASS_DOESNT_EXIST: &str = "** class doesn't exist **";
const INSTANCE_ID_MISSING: &str = "** instance id missing **";
const NO_INSTANCE_FOUND: &str = "** no instance found **";
const ATTRIBUTE_NAME_MISSING: &str = "** attribute name missing **";
const VALUE_MISSING: &str = "** value missing **";
const INVALID_DICTIONARY: &str = "** invalid dictionary **";
const READ_ONLY_ATTRIBUTE: &str = "** attribute can't be updated **";

/// Commands listed by `help`, with their help text.
const COMMANDS: [(&str, &str); 9] = [
    ("EOF", "EOF command to exit the program"),
    ("all", "Prints all string representation of all instances"),
    ("count", "Counts the number of instances of a class"),
    ("create", "Create a new instance of a class"),
    ("destroy", "Deletes an instance based on ID"),
    ("help", "List available commands with \"help\" or detailed help with \"help cmd\"."),
    ("quit", "Quit command to exit the program"),
    ("show", "Prints the string representation of an instance based on ID"),
    (
        "update",
        "Updates an instance based on ID and attribute name/value or dict",
    ),
];

/// Result type for console operations.
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Failures that end the interpreter loop.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Reading input or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The storage engine failed (e.g. the backing file could not be written).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Line-oriented interpreter writing to `out`.
pub struct Console<W: Write> {
    storage: FileStorage,
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(storage: FileStorage, out: W) -> Self {
        Self { storage, out }
    }

    pub fn storage(&self) -> &FileStorage {
        &self.storage
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Consumes the console, returning the engine and the writer.
    pub fn into_parts(self) -> (FileStorage, W) {
        (self.storage, self.out)
    }

    /// Reads commands until `quit`, `EOF` or end of input.
    pub fn run<R: BufRead>(&mut self, mut input: R, interactive: bool) -> ConsoleResult<()> {
        let mut line = String::new();
        loop {
            if interactive {
                write!(self.out, "{PROMPT}")?;
                self.out.flush()?;
            }
            line.clear();
            if input.read_line(&mut line)? == 0 {
                if interactive {
                    writeln!(self.out)?;
                }
                return Ok(());
            }
            if self.onecmd(&line)? {
                return Ok(());
            }
        }
    }

    /// Runs a single command line. Returns `true` when the loop should stop.
    pub fn onecmd(&mut self, line: &str) -> ConsoleResult<bool> {
        let original = line.trim();
        let rewritten = parse::dot_call(original);
        let line = rewritten.as_deref().unwrap_or(original);
        debug!("Executing {:?}", line);

        let Some((command, args)) = parse::next_token(line) else {
            return Ok(false);
        };
        match command.as_str() {
            "quit" | "EOF" => return Ok(true),
            "help" => self.do_help(args)?,
            "create" => self.do_create(args)?,
            "show" => self.do_show(args)?,
            "destroy" => self.do_destroy(args)?,
            "all" => self.do_all(args)?,
            "count" => self.do_count(args)?,
            "update" => self.do_update(args)?,
            _ => writeln!(self.out, "*** Unknown syntax: {original}")?,
        }
        Ok(false)
    }

    fn do_help(&mut self, args: &str) -> ConsoleResult<()> {
        match parse::next_token(args) {
            Some((topic, _)) => match COMMANDS.iter().find(|(name, _)| *name == topic) {
                Some((_, text)) => writeln!(self.out, "{text}")?,
                None => writeln!(self.out, "*** No help on {topic}")?,
            },
            None => {
                let names: Vec<&str> = COMMANDS.iter().map(|(name, _)| *name).collect();
                writeln!(self.out)?;
                writeln!(self.out, "Documented commands (type help <topic>):")?;
                writeln!(self.out, "========================================")?;
                writeln!(self.out, "{}", names.join("  "))?;
                writeln!(self.out)?;
            }
        }
        Ok(())
    }

    fn do_create(&mut self, args: &str) -> ConsoleResult<()> {
        let Some((class, params)) = self.class_arg(args)? else {
            return Ok(());
        };
        let key = match self.storage.create_with(&class, parse::create_params(params)) {
            Ok(key) => key,
            Err(StorageError::Model(ModelError::ReadOnlyAttribute(_))) => {
                return self.say(READ_ONLY_ATTRIBUTE);
            }
            Err(e) => return Err(e.into()),
        };
        self.storage.save()?;
        writeln!(self.out, "{}", key.id())?;
        Ok(())
    }

    fn do_show(&mut self, args: &str) -> ConsoleResult<()> {
        let Some((key, _)) = self.key_arg(args)? else {
            return Ok(());
        };
        match self.storage.get(&key) {
            Some(entity) => writeln!(self.out, "{entity}")?,
            None => writeln!(self.out, "{NO_INSTANCE_FOUND}")?,
        }
        Ok(())
    }

    fn do_destroy(&mut self, args: &str) -> ConsoleResult<()> {
        let Some((key, _)) = self.key_arg(args)? else {
            return Ok(());
        };
        if self.storage.destroy(&key)?.is_none() {
            self.say(NO_INSTANCE_FOUND)?;
        }
        Ok(())
    }

    fn do_all(&mut self, args: &str) -> ConsoleResult<()> {
        let rendered: Vec<String> = match parse::next_token(args) {
            Some((class, _)) => {
                if !self.storage.registry().contains(&class) {
                    return self.say(CLASS_DOESNT_EXIST);
                }
                let matches = self.storage.filter(class.as_str())?;
                matches.values().map(|e| e.render()).collect()
            }
            None => self.storage.all().values().map(|e| e.render()).collect(),
        };
        writeln!(self.out, "[{}]", rendered.join(", "))?;
        Ok(())
    }

    fn do_count(&mut self, args: &str) -> ConsoleResult<()> {
        let Some((class, _)) = self.class_arg(args)? else {
            return Ok(());
        };
        let count = self.storage.count(class.as_str())?;
        writeln!(self.out, "{count}")?;
        Ok(())
    }

    fn do_update(&mut self, args: &str) -> ConsoleResult<()> {
        let Some((key, rest)) = self.key_arg(args)? else {
            return Ok(());
        };
        if self.storage.get(&key).is_none() {
            return self.say(NO_INSTANCE_FOUND);
        }

        let result = if rest.trim_start().starts_with('{') {
            let Some(attributes) = parse::dict_literal(rest) else {
                return self.say(INVALID_DICTIONARY);
            };
            self.storage.update_many(&key, attributes)
        } else {
            let Some((name, rest)) = parse::next_token(rest) else {
                return self.say(ATTRIBUTE_NAME_MISSING);
            };
            let Some((value, _)) = parse::next_token(rest) else {
                return self.say(VALUE_MISSING);
            };
            self.storage.update_text(&key, &name, &value)
        };

        match result {
            Ok(_) => Ok(()),
            Err(StorageError::Model(ModelError::ReadOnlyAttribute(_))) => {
                self.say(READ_ONLY_ATTRIBUTE)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Resolves a leading class name, printing the matching message when it
    /// is missing or unregistered.
    fn class_arg<'a>(&mut self, args: &'a str) -> ConsoleResult<Option<(String, &'a str)>> {
        let Some((class, rest)) = parse::next_token(args) else {
            self.say(CLASS_NAME_MISSING)?;
            return Ok(None);
        };
        if !self.storage.registry().contains(&class) {
            self.say(CLASS_DOESNT_EXIST)?;
            return Ok(None);
        }
        Ok(Some((class, rest)))
    }

    /// Resolves `<class> <id>` into a registry key.
    fn key_arg<'a>(&mut self, args: &'a str) -> ConsoleResult<Option<(RegistryKey, &'a str)>> {
        let Some((class, rest)) = self.class_arg(args)? else {
            return Ok(None);
        };
        let Some((id, rest)) = parse::next_token(rest) else {
            self.say(INSTANCE_ID_MISSING)?;
            return Ok(None);
        };
        Ok(Some((RegistryKey::new(class, id), rest)))
    }

    fn say(&mut self, message: &str) -> ConsoleResult<()> {
        writeln!(self.out, "{message}")?;
        Ok(())
    }
}
