//! Tab completion for command names and for the flags of `connect` and
//! `mirror`. Reads the command table; never touches session state.

use serde::Serialize;

use crate::content::Content;
use crate::registry::{CommandId, CommandTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "ts-bindings", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts-bindings", ts(export))]
pub enum CompletionContext {
    Command,
    ConnectFlag,
    MirrorFlag,
}

impl CompletionContext {
    fn for_command(id: CommandId) -> Option<Self> {
        match id {
            CommandId::Connect => Some(Self::ConnectFlag),
            CommandId::Mirror => Some(Self::MirrorFlag),
            _ => None,
        }
    }

    pub fn is_flag(self) -> bool {
        !matches!(self, Self::Command)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
#[cfg_attr(feature = "ts-bindings", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts-bindings", ts(export))]
pub enum Suggestion {
    None,
    Complete {
        completion: String,
        context: CompletionContext,
    },
    Multiple {
        suggestions: Vec<String>,
        context: CompletionContext,
    },
}

impl Suggestion {
    fn from_matches(mut matches: Vec<String>, context: CompletionContext) -> Self {
        match matches.len() {
            0 => Suggestion::None,
            1 => Suggestion::Complete {
                completion: matches.swap_remove(0),
                context,
            },
            _ => Suggestion::Multiple {
                suggestions: matches,
                context,
            },
        }
    }
}

/// Compute completions for the raw (untrimmed) input line.
///
/// A lone token without trailing whitespace is a partial command name and is
/// matched against every registered name, hidden ones included. Once the
/// command token is followed by whitespace, `connect` and `mirror` complete
/// their last token against their flag set; other commands complete nothing.
pub fn suggest(table: &CommandTable, content: &Content, raw: &str) -> Suggestion {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    let trailing_space = raw.ends_with(char::is_whitespace);

    let Some((&command, rest)) = tokens.split_first() else {
        return Suggestion::None;
    };

    if rest.is_empty() && !trailing_space {
        let prefix = command.to_lowercase();
        let matches = table
            .all()
            .filter(|spec| spec.name.to_lowercase().starts_with(&prefix))
            .map(|spec| spec.name.clone())
            .collect();
        return Suggestion::from_matches(matches, CompletionContext::Command);
    }

    let Some(spec) = table.find(command) else {
        return Suggestion::None;
    };
    let Some(context) = CompletionContext::for_command(spec.id) else {
        return Suggestion::None;
    };

    let partial = if trailing_space {
        String::new()
    } else {
        rest.last().map(|t| t.to_lowercase()).unwrap_or_default()
    };
    let matches = spec
        .id
        .completion_flags(content)
        .into_iter()
        .filter(|flag| flag.starts_with(&partial))
        .collect();
    Suggestion::from_matches(matches, context)
}

/// Input line after accepting a single completion. Command completions replace
/// the whole line; flag completions replace only the token being typed.
/// Returns None when the suggestion is not a single completion.
pub fn apply(input: &str, suggestion: &Suggestion) -> Option<String> {
    let Suggestion::Complete {
        completion,
        context,
    } = suggestion
    else {
        return None;
    };

    if !context.is_flag() {
        return Some(completion.clone());
    }

    let keep = input
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8());
    let head = input.get(..keep).unwrap_or_default();
    Some(format!("{head}{completion}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn run(raw: &str) -> Suggestion {
        let table = CommandTable::builtin().unwrap();
        suggest(&table, &Content::default(), raw)
    }

    fn complete(completion: &str, context: CompletionContext) -> Suggestion {
        Suggestion::Complete {
            completion: completion.into(),
            context,
        }
    }

    #[test]
    fn single_command_match_completes() {
        assert_eq!(run("he"), complete("help", CompletionContext::Command));
        assert_eq!(run("MIR"), complete("mirror", CompletionContext::Command));
    }

    #[test]
    fn ambiguous_prefix_lists_in_table_order() {
        assert_eq!(
            run("c"),
            Suggestion::Multiple {
                suggestions: vec!["connect".into(), "clear".into()],
                context: CompletionContext::Command,
            }
        );
    }

    #[test]
    fn no_match_is_none() {
        assert_eq!(run("xyz"), Suggestion::None);
        assert_eq!(run(""), Suggestion::None);
        assert_eq!(run("   "), Suggestion::None);
    }

    #[test]
    fn hidden_commands_complete() {
        assert_eq!(run("res"), complete("resume", CompletionContext::Command));
    }

    #[test]
    fn full_command_without_space_is_not_argument_completion() {
        assert_eq!(run("connect"), complete("connect", CompletionContext::Command));
        assert_eq!(run("mirror"), complete("mirror", CompletionContext::Command));
    }

    #[test]
    fn trailing_space_offers_all_flags() {
        assert_eq!(
            run("mirror "),
            Suggestion::Multiple {
                suggestions: vec!["--v1".into(), "--v2".into(), "--v3".into()],
                context: CompletionContext::MirrorFlag,
            }
        );
        assert_eq!(
            run("connect "),
            Suggestion::Multiple {
                suggestions: vec!["--github".into(), "--telegram".into(), "--linkedin".into()],
                context: CompletionContext::ConnectFlag,
            }
        );
    }

    #[test]
    fn partial_flag_completes() {
        assert_eq!(
            run("connect --gi"),
            complete("--github", CompletionContext::ConnectFlag)
        );
        assert_eq!(
            run("CONNECT --TEL"),
            complete("--telegram", CompletionContext::ConnectFlag)
        );
        assert_eq!(run("mirror --v3"), complete("--v3", CompletionContext::MirrorFlag));
        assert_eq!(run("mirror --x"), Suggestion::None);
    }

    #[test]
    fn other_commands_have_no_argument_completion() {
        assert_eq!(run("help "), Suggestion::None);
        assert_eq!(run("about --a"), Suggestion::None);
        assert_eq!(run("nosuch --v"), Suggestion::None);
    }

    #[test]
    fn apply_replaces_whole_line_for_commands() {
        let s = complete("help", CompletionContext::Command);
        assert_eq!(apply("he", &s).as_deref(), Some("help"));
    }

    #[test]
    fn apply_replaces_last_token_for_flags() {
        let s = complete("--github", CompletionContext::ConnectFlag);
        assert_eq!(apply("connect --gi", &s).as_deref(), Some("connect --github"));
        assert_eq!(apply("connect ", &s).as_deref(), Some("connect --github"));
        let m = complete("--v2", CompletionContext::MirrorFlag);
        assert_eq!(apply("mirror --v", &m).as_deref(), Some("mirror --v2"));
    }

    #[test]
    fn apply_ignores_multiple_and_none() {
        assert!(apply("c", &run("c")).is_none());
        assert!(apply("x", &Suggestion::None).is_none());
    }
}
