use crate::error::TerminalError;
use crate::model::MirrorVariant;

// ── Connect params ──────────────────────────────────────────────

/// `connect [--<platform>]`. Only the first argument is consulted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectParams {
    pub platform: Option<String>,
}

impl ConnectParams {
    pub fn parse(args: &[String]) -> Self {
        let platform = args.first().map(|arg| {
            arg.strip_prefix("--")
                .unwrap_or(arg)
                .to_lowercase()
        });
        Self { platform }
    }
}

// ── Mirror params ───────────────────────────────────────────────

/// `mirror [--v1|--v2|--v3]`, defaulting to `v1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MirrorParams {
    pub variant: MirrorVariant,
}

impl MirrorParams {
    /// The first recognised flag wins. Any token that is not a known flag is
    /// rejected, so `mirror --v9` and `mirror big` both fail.
    pub fn parse(args: &[String]) -> Result<Self, TerminalError> {
        let mut variant = None;
        for arg in args {
            match MirrorVariant::from_flag(arg) {
                Some(v) => {
                    variant.get_or_insert(v);
                }
                None => {
                    return Err(TerminalError::InvalidMirrorFlag { flag: arg.clone() });
                }
            }
        }
        Ok(Self {
            variant: variant.unwrap_or_default(),
        })
    }
}
