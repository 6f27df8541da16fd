pub mod catalog;
pub mod handlers;
pub mod params;
pub mod table;
pub mod validation;

use serde::{Deserialize, Serialize};

use crate::content::Content;
use crate::error::TerminalError;
use crate::model::CommandOutput;

pub use table::{CommandSpec, CommandTable};

// ── Handler modules (dispatch targets) ──────────────────────────
use handlers::{connect, info, media, screen};

// ── Command metadata ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-bindings", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts-bindings", ts(export))]
pub enum CommandCategory {
    General,
    Info,
    Social,
    Fun,
}

impl CommandCategory {
    pub fn slug(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Info => "info",
            Self::Social => "social",
            Self::Fun => "fun",
        }
    }

    pub fn all() -> &'static [CommandCategory] {
        &[Self::General, Self::Info, Self::Social, Self::Fun]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub category: CommandCategory,
    /// Left out of `help`; still dispatchable and still completed.
    pub hidden: bool,
}

/// What a handler may read. Handlers never see session state.
pub struct HandlerContext<'a> {
    pub content: &'a Content,
    pub table: &'a CommandTable,
}

pub type HandlerResult = Result<CommandOutput, TerminalError>;

// ── define_commands! macro ──────────────────────────────────────

/// Single source of truth for the built-in commands. Generates:
/// 1. `CommandId` enum (closed set, one variant per command)
/// 2. `CommandId::all()` in declaration order
/// 3. `CommandId::info()`: name, aliases, description, category, hidden
/// 4. `CommandId::dispatch()`: call the handler with parsed arguments
macro_rules! define_commands {
    (
        $(
            [ $cat:expr $(, $flag:ident)* ]
            $variant:ident => $handler:path,
            $name:literal $( | $alias:literal )* : $desc:literal ;
        )*
    ) => {
        // ── 1. CommandId enum ──
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[cfg_attr(feature = "ts-bindings", derive(ts_rs::TS))]
        #[cfg_attr(feature = "ts-bindings", ts(export))]
        #[serde(rename_all = "lowercase")]
        pub enum CommandId {
            $( $variant, )*
        }

        impl CommandId {
            // ── 2. CommandId::all() ──
            pub fn all() -> &'static [CommandId] {
                &[ $( CommandId::$variant, )* ]
            }

            // ── 3. CommandId::info() ──
            pub fn info(self) -> CommandInfo {
                match self {
                    $( CommandId::$variant => CommandInfo {
                        name: $name,
                        aliases: &[ $( $alias ),* ],
                        description: $desc,
                        category: $cat,
                        hidden: define_commands!(@has_flag hidden; $($flag)*),
                    }, )*
                }
            }

            // ── 4. CommandId::dispatch() ──
            pub(crate) fn dispatch(
                self,
                ctx: &HandlerContext<'_>,
                args: &[String],
            ) -> HandlerResult {
                match self {
                    $( CommandId::$variant => $handler(ctx, args), )*
                }
            }
        }
    };

    (@has_flag hidden; hidden $($rest:ident)*) => { true };
    (@has_flag hidden; $_other:ident $($rest:ident)*) => { define_commands!(@has_flag hidden; $($rest)*) };
    (@has_flag hidden;) => { false };
}

// ── Command definitions ─────────────────────────────────────────

define_commands! {
    [CommandCategory::General]
    Help => info::help,
    "help": "Show all the commands";

    [CommandCategory::Info]
    About => info::about,
    "about" | "whoami": "Show information about me";

    [CommandCategory::Social]
    Connect => connect::connect,
    "connect": "Connect with me";

    [CommandCategory::General]
    Clear => screen::clear,
    "clear" | "cls": "Clear the screen";

    [CommandCategory::Fun]
    Marvel => media::marvel,
    "marvel": "Say hello to marvel";

    [CommandCategory::Fun]
    Starwars => media::starwars,
    "starwars": "Say hello to Star Wars";

    [CommandCategory::Fun]
    Mirror => media::mirror,
    "mirror": "ASCII camera mirror with variants (--v1, --v2, --v3)";

    [CommandCategory::Info, hidden]
    Resume => info::resume,
    "resume" | "cv": "Show my resume";
}

impl CommandId {
    /// Flags offered by argument completion, in the order they are shown.
    pub fn completion_flags(self, content: &Content) -> Vec<String> {
        match self {
            CommandId::Connect => content.connect_flags(),
            CommandId::Mirror => crate::model::MirrorVariant::ALL
                .iter()
                .map(|v| v.flag().to_string())
                .collect(),
            _ => Vec::new(),
        }
    }
}
