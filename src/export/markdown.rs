use super::document::{Block, ExportDocument};
use std::fmt::Write as _;

pub fn render_markdown(doc: &ExportDocument) -> String {
    let mut out = String::new();
    let mut previous: Option<&Block> = None;
    for block in &doc.blocks {
        let in_list =
            matches!(block, Block::Bullet(_)) && matches!(previous, Some(Block::Bullet(_)));
        if previous.is_some() && !in_list {
            out.push('\n');
        }
        match block {
            Block::Title(text) => {
                let _ = writeln!(out, "# {text}");
            }
            Block::Heading(text) => {
                let _ = writeln!(out, "## {text}");
            }
            Block::Subheading(text) => {
                let _ = writeln!(out, "### {text}");
            }
            Block::Fields(fields) => {
                let line = fields
                    .iter()
                    .map(|(label, value)| format!("**{label}:** {value}"))
                    .collect::<Vec<_>>()
                    .join(" · ");
                let _ = writeln!(out, "{line}");
            }
            Block::Label(text) => {
                let _ = writeln!(out, "**{text}**");
            }
            Block::Text(text) => {
                let _ = writeln!(out, "{}", text.lines().collect::<Vec<_>>().join("  \n"));
            }
            Block::Bullet(text) => {
                let _ = writeln!(out, "- {text}");
            }
            Block::Table { header, rows } => {
                let _ = writeln!(out, "| {} | {} |", cell(&header[0]), cell(&header[1]));
                out.push_str("| --- | :---: |\n");
                for row in rows {
                    let _ = writeln!(out, "| {} | {} |", cell(&row[0]), cell(&row[1]));
                }
            }
        }
        previous = Some(block);
    }
    out
}

fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}
