use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::TerminalError;

use super::validation::validate_command_name;
use super::{CommandCategory, CommandId, CommandInfo};

/// A registered command: dispatch target plus presentation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandSpec {
    pub id: CommandId,
    pub name: String,
    pub aliases: Vec<String>,
    pub description: String,
    pub category: CommandCategory,
    pub hidden: bool,
}

impl From<CommandId> for CommandSpec {
    fn from(id: CommandId) -> Self {
        let CommandInfo {
            name,
            aliases,
            description,
            category,
            hidden,
        } = id.info();
        Self {
            id,
            name: name.to_string(),
            aliases: aliases.iter().map(ToString::to_string).collect(),
            description: description.to_string(),
            category,
            hidden,
        }
    }
}

/// Closed registry of commands, keyed case-insensitively by name and alias.
/// Iteration order is registration order.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    specs: IndexMap<String, CommandSpec>,
    /// Lowercased alias → lowercased command name.
    aliases: HashMap<String, String>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding every built-in command.
    pub fn builtin() -> Result<Self, TerminalError> {
        let mut table = Self::new();
        for id in CommandId::all() {
            table.register(CommandSpec::from(*id))?;
        }
        Ok(table)
    }

    /// Add a command. Rejects the whole spec if its name or any alias is
    /// malformed or already taken (ignoring case); the table is left unchanged.
    pub fn register(&mut self, spec: CommandSpec) -> Result<(), TerminalError> {
        let name_key = spec.name.to_lowercase();
        validate_command_name(&name_key)?;

        let mut claimed: Vec<String> = vec![name_key.clone()];
        for alias in &spec.aliases {
            validate_command_name(alias)?;
            let key = alias.to_lowercase();
            if claimed.contains(&key) {
                return Err(TerminalError::DuplicateCommand { name: alias.clone() });
            }
            claimed.push(key);
        }

        if let Some(taken) = claimed.iter().find(|key| self.is_taken(key)) {
            return Err(TerminalError::DuplicateCommand {
                name: taken.clone(),
            });
        }

        for alias in claimed.iter().skip(1) {
            self.aliases.insert(alias.clone(), name_key.clone());
        }
        tracing::debug!(command = %spec.name, aliases = spec.aliases.len(), "registered command");
        self.specs.insert(name_key, spec);
        Ok(())
    }

    fn is_taken(&self, key: &str) -> bool {
        self.specs.contains_key(key) || self.aliases.contains_key(key)
    }

    /// Resolve a typed token by exact case-insensitive match on name, then alias.
    pub fn find(&self, token: &str) -> Option<&CommandSpec> {
        let key = token.to_lowercase();
        if let Some(spec) = self.specs.get(&key) {
            return Some(spec);
        }
        self.aliases
            .get(&key)
            .and_then(|name| self.specs.get(name))
    }

    /// Every registered command, hidden ones included.
    pub fn all(&self) -> impl Iterator<Item = &CommandSpec> {
        self.specs.values()
    }

    /// Commands shown by `help`. Dispatch never filters on `hidden`.
    pub fn list_visible(&self) -> Vec<&CommandSpec> {
        self.specs.values().filter(|s| !s.hidden).collect()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn spec(id: CommandId, name: &str, aliases: &[&str]) -> CommandSpec {
        CommandSpec {
            id,
            name: name.to_string(),
            aliases: aliases.iter().map(ToString::to_string).collect(),
            description: String::new(),
            category: CommandCategory::General,
            hidden: false,
        }
    }

    #[test]
    fn find_is_case_insensitive() {
        let table = CommandTable::builtin().unwrap();
        let lower = table.find("help").map(|s| s.id);
        assert_eq!(lower, Some(CommandId::Help));
        assert_eq!(table.find("HELP").map(|s| s.id), lower);
        assert_eq!(table.find("HeLp").map(|s| s.id), lower);
    }

    #[test]
    fn find_resolves_aliases() {
        let table = CommandTable::builtin().unwrap();
        assert_eq!(table.find("CLS").map(|s| s.id), Some(CommandId::Clear));
        assert_eq!(table.find("whoami").map(|s| s.id), Some(CommandId::About));
    }

    #[test]
    fn find_unknown_is_none() {
        let table = CommandTable::builtin().unwrap();
        assert!(table.find("nonexistentcmd").is_none());
        assert!(table.find("").is_none());
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut table = CommandTable::builtin().unwrap();
        let before = table.len();
        let err = table.register(spec(CommandId::About, "HELP", &[])).unwrap_err();
        assert!(matches!(err, TerminalError::DuplicateCommand { .. }));
        assert_eq!(table.len(), before);
    }

    #[test]
    fn alias_colliding_with_name_is_rejected() {
        let mut table = CommandTable::builtin().unwrap();
        let err = table
            .register(spec(CommandId::About, "bio", &["Marvel"]))
            .unwrap_err();
        assert!(matches!(err, TerminalError::DuplicateCommand { .. }));
        assert!(table.find("bio").is_none());
    }

    #[test]
    fn name_colliding_with_alias_is_rejected() {
        let mut table = CommandTable::builtin().unwrap();
        let err = table.register(spec(CommandId::Clear, "CV", &[])).unwrap_err();
        assert_eq!(err, TerminalError::DuplicateCommand { name: "cv".into() });
    }

    #[test]
    fn alias_repeating_own_name_is_rejected() {
        let mut table = CommandTable::new();
        assert!(table.register(spec(CommandId::Help, "help", &["Help"])).is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn malformed_name_is_rejected() {
        let mut table = CommandTable::new();
        let err = table.register(spec(CommandId::Help, "he lp", &[])).unwrap_err();
        assert!(matches!(err, TerminalError::InvalidCommandName { .. }));
    }

    #[test]
    fn list_visible_skips_hidden() {
        let table = CommandTable::builtin().unwrap();
        let visible: Vec<&str> = table.list_visible().iter().map(|s| s.name.as_str()).collect();
        assert!(!visible.contains(&"resume"));
        assert!(visible.contains(&"mirror"));
        assert_eq!(table.all().count(), visible.len() + 1);
    }
}
