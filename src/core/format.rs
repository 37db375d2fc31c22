//! Markdown rendering for the finished hunt.

/// Line prefixes that start a new sub-section of a hunt item
const SECTION_MARKERS: [&str; 3] = ["Location:", "Historical Context:", "What to Look For:"];

/// Reflow the describer's raw text so every item and sub-section starts
/// after a blank line.
///
/// Lines are trimmed and empty lines dropped. A line with a digit among its
/// first two characters, or one starting with a section marker, gets a
/// blank line in front of it; everything else is kept as-is.
pub fn reformat_items(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if starts_block(line) {
                format!("\n{}", line)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn starts_block(line: &str) -> bool {
    line.chars().take(2).any(char::is_numeric)
        || SECTION_MARKERS.iter().any(|m| line.starts_with(m))
}

/// Wrap reformatted items in the hunt page template
pub fn render_hunt(museum_name: &str, formatted_items: &str) -> String {
    format!(
        "# Museum Scavenger Hunt: {museum}

## 🏛️ About This Scavenger Hunt
This scavenger hunt features verified artworks from the 🎨 {museum}. Each item includes historical context, a description, and clues to help you find the artwork.

## 🔍 Scavenger Hunt Items
{items}

---
*Generated using Hugging Face models. AI-generated output can be incorrect.*
",
        museum = museum_name,
        items = formatted_items
    )
}
