use console::{measure_text_width, style};

pub fn user_label() -> String { style("User>").green().bold().to_string() }
pub fn assistant_label() -> String { style("HubSystem>").cyan().bold().to_string() }

/// Single-line banner boxed to fit its text: bold blue `title`, then `| subtitle`.
pub fn banner(title: &str, subtitle: &str) -> String {
    let plain_width = measure_text_width(title) + measure_text_width(subtitle) + 3;
    let rule = "─".repeat(plain_width + 2);
    format!(
        "╭{rule}╮\n│ {} | {} │\n╰{rule}╯",
        style(title).blue().bold(),
        subtitle,
        rule = rule,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_box_fits_text() {
        console::set_colors_enabled(false);
        let b = banner("HubSystem v2.1", "Research Station Perimeter Alpha");
        let lines: Vec<&str> = b.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "│ HubSystem v2.1 | Research Station Perimeter Alpha │");
        let width = measure_text_width(lines[1]);
        assert!(lines.iter().all(|l| measure_text_width(l) == width));
    }
}
