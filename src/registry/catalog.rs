use std::fmt::Write;

use super::{CommandCategory, CommandTable};

const NAME_COLUMN: usize = 14;

/// Help text: greeting, then one line per visible command in table order.
pub fn help_text(table: &CommandTable) -> String {
    let mut out = String::from(crate::content::GREETING);
    out.push('\n');
    for spec in table.list_visible() {
        let _ = write!(
            out,
            "\n      {:<width$}{}",
            spec.name,
            spec.description,
            width = NAME_COLUMN
        );
    }
    out
}

/// Visible commands grouped by category, for `termfolio-cli commands`.
pub fn commands_by_category(table: &CommandTable, include_hidden: bool) -> String {
    let mut lines = Vec::new();
    for category in CommandCategory::all() {
        let specs: Vec<_> = table
            .all()
            .filter(|s| s.category == *category && (include_hidden || !s.hidden))
            .collect();
        if specs.is_empty() {
            continue;
        }
        lines.push(format!("{}:", category.slug()));
        for spec in specs {
            let aliases = if spec.aliases.is_empty() {
                String::new()
            } else {
                format!(" (aliases: {})", spec.aliases.join(", "))
            };
            lines.push(format!("  {} - {}{aliases}", spec.name, spec.description));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_visible_commands_only() {
        let table = CommandTable::builtin().unwrap();
        let text = help_text(&table);
        assert!(text.starts_with("Hi there!"));
        assert!(text.contains("mirror        ASCII camera mirror"));
        assert!(!text.contains("resume"));
    }

    #[test]
    fn category_listing_can_include_hidden() {
        let table = CommandTable::builtin().unwrap();
        assert!(!commands_by_category(&table, false).contains("resume"));
        let all = commands_by_category(&table, true);
        assert!(all.contains("resume"));
        assert!(all.contains("clear - Clear the screen (aliases: cls)"));
    }
}
