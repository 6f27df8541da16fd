use crate::content::{MARVEL_ART, STARWARS_ART};
use crate::error::TerminalError;
use crate::model::{Action, CommandOutput, OutputKind};
use crate::registry::params::MirrorParams;
use crate::registry::{HandlerContext, HandlerResult};

pub fn marvel(ctx: &HandlerContext<'_>, _args: &[String]) -> HandlerResult {
    play_track(ctx, "marvel", MARVEL_ART)
}

pub fn starwars(ctx: &HandlerContext<'_>, _args: &[String]) -> HandlerResult {
    play_track(ctx, "starwars", STARWARS_ART)
}

/// Print the banner and declare a long-running audio session for `track`.
fn play_track(ctx: &HandlerContext<'_>, track: &str, art: &str) -> HandlerResult {
    let track = ctx
        .content
        .find_audio_track(track)
        .ok_or_else(|| TerminalError::AudioUnavailable {
            track: track.to_string(),
        })?;
    Ok(CommandOutput::ascii(art)
        .with_action(Action::PlayAudio {
            audio_file: track.name.clone(),
        })
        .long_running())
}

pub fn mirror(_ctx: &HandlerContext<'_>, args: &[String]) -> HandlerResult {
    let MirrorParams { variant } = MirrorParams::parse(args)?;
    Ok(CommandOutput::new("", OutputKind::Mirror)
        .with_action(Action::Mirror { variant })
        .long_running())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::content::Content;
    use crate::model::MirrorVariant;
    use crate::registry::CommandTable;

    fn with_ctx<R>(content: &Content, f: impl FnOnce(&HandlerContext<'_>) -> R) -> R {
        let table = CommandTable::builtin().unwrap();
        f(&HandlerContext {
            content,
            table: &table,
        })
    }

    #[test]
    fn marvel_declares_long_running_audio() {
        let out = with_ctx(&Content::default(), |ctx| marvel(ctx, &[])).unwrap();
        assert_eq!(out.kind, OutputKind::Ascii);
        assert!(out.is_long_running);
        assert_eq!(
            out.action,
            Some(Action::PlayAudio {
                audio_file: "marvel".into()
            })
        );
    }

    #[test]
    fn missing_track_is_audio_unavailable() {
        let mut content = Content::default();
        content.audio_tracks.retain(|t| t.name != "starwars");
        let err = with_ctx(&content, |ctx| starwars(ctx, &[])).unwrap_err();
        assert_eq!(
            err,
            TerminalError::AudioUnavailable {
                track: "starwars".into()
            }
        );
    }

    #[test]
    fn mirror_is_long_running_with_variant() {
        let args = vec!["--v2".to_string()];
        let out = with_ctx(&Content::default(), |ctx| mirror(ctx, &args)).unwrap();
        assert_eq!(out.kind, OutputKind::Mirror);
        assert!(out.is_long_running);
        assert_eq!(
            out.action,
            Some(Action::Mirror {
                variant: MirrorVariant::V2
            })
        );
    }
}
