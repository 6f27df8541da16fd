//! Static text shown by the terminal, plus the link and audio tables the
//! handlers consult. Tables come from [`TerminalSettings`] so they can be
//! overridden without recompiling.

use crate::settings::{AudioTrack, SocialLink, TerminalSettings};

pub const GREETING: &str = "Hi there! I'm Derenik, welcome to my own commandline interface website,\nthese are common commands used in various situations:";

pub const EMPTY_HINT: &str = "Type \"help\" for the list of all commands";

pub const ABOUT: &str = "I'm a Lead Frontend Engineer who sees interfaces as living systems: a bridge between logic and emotion. Over the years, I've led teams and built products that don't just work fast, they feel fast. My craft revolves around creating cohesive, resilient architectures that empower both users and developers.

My focus is on clarity, scalability, and experience. I shape design systems, define frontend workflows, and mentor engineers to think beyond implementation.

I've led multiple teams through transitions from legacy React apps to modern Next.js and TypeScript ecosystems, built shared UI libraries that scale across microfrontends, and introduced structured feature-definition processes that turned chaotic ideas into deliverable reality.

I don't just build apps.
I build systems that outlast trends and teams that outgrow limitations.";

pub const CONTACT_EMAIL: &str = "deren.kha@gmail.com";

pub const MARVEL_ART: &str = r"
 __  __    _    ______     _______ _
|  \/  |  / \  |  _ \ \   / / ____| |
| |\/| | / _ \ | |_) \ \ / /|  _| | |
| |  | |/ ___ \|  _ < \ V / | |___| |___
|_|  |_/_/   \_\_| \_\ \_/  |_____|_____|
";

pub const STARWARS_ART: &str = r"
 ____  _____  _    ____   __        ___    ____  ____
/ ___||_   _|/ \  |  _ \  \ \      / / \  |  _ \/ ___|
\___ \  | | / _ \ | |_) |  \ \ /\ / / _ \ | |_) \___ \
 ___) | | |/ ___ \|  _ <    \ V  V / ___ \|  _ < ___) |
|____/  |_/_/   \_\_| \_\    \_/\_/_/   \_\_| \_\____/
";

/// Everything handlers read. Owned by the interpreter, never mutated after startup.
#[derive(Debug, Clone)]
pub struct Content {
    pub social_links: Vec<SocialLink>,
    pub audio_tracks: Vec<AudioTrack>,
}

impl Content {
    pub fn from_settings(settings: &TerminalSettings) -> Self {
        Self {
            social_links: settings.social_links.clone(),
            audio_tracks: settings.audio_tracks.clone(),
        }
    }

    /// Find a social link whose command contains `platform`, ignoring case.
    pub fn find_social_link(&self, platform: &str) -> Option<&SocialLink> {
        let needle = platform.to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.social_links
            .iter()
            .find(|link| link.command.to_lowercase().contains(&needle))
    }

    pub fn find_audio_track(&self, name: &str) -> Option<&AudioTrack> {
        self.audio_tracks
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// `--platform` flags in table order, used by `connect` completion.
    pub fn connect_flags(&self) -> Vec<String> {
        self.social_links
            .iter()
            .filter_map(SocialLink::flag)
            .map(str::to_lowercase)
            .collect()
    }

    /// Text printed by a bare `connect`.
    pub fn contact_text(&self) -> String {
        let mut lines = vec![
            format!(
                "You may contact with me via my e-mail address {CONTACT_EMAIL}, or using some social networks. Just type \"connect --{{network}}\", for example \"connect --telegram\"."
            ),
            String::new(),
            "This is a list of available communication channels:".to_string(),
            String::new(),
        ];
        for flag in self.connect_flags() {
            lines.push(format!("    {flag}"));
        }
        lines.join("\n")
    }
}

impl Default for Content {
    fn default() -> Self {
        Self::from_settings(&TerminalSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn social_lookup_is_case_insensitive_substring() {
        let content = Content::default();
        assert_eq!(
            content.find_social_link("GitHub").map(|l| l.url.as_str()),
            Some("https://github.com/b4rb13")
        );
        assert_eq!(
            content.find_social_link("tele").map(|l| l.name.as_str()),
            Some("Telegram")
        );
        assert!(content.find_social_link("myspace").is_none());
        assert!(content.find_social_link("").is_none());
    }

    #[test]
    fn connect_flags_follow_table_order() {
        let content = Content::default();
        assert_eq!(
            content.connect_flags(),
            vec!["--github", "--telegram", "--linkedin"]
        );
    }

    #[test]
    fn contact_text_lists_every_flag() {
        let text = Content::default().contact_text();
        assert!(text.contains(CONTACT_EMAIL));
        assert!(text.contains("--linkedin"));
    }

    #[test]
    fn audio_lookup() {
        let content = Content::default();
        assert_eq!(
            content.find_audio_track("MARVEL").map(|t| t.src.as_str()),
            Some("/audio/av.mp3")
        );
        assert!(content.find_audio_track("ghostbusters").is_none());
    }
}
