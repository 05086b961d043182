//! Markdown to plain text for stream entries

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Strip markdown formatting, keeping text, code and line structure.
pub fn markdown_to_plain_text(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES;

    for event in Parser::new_ext(markdown, options) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            Event::Start(Tag::Item) => out.push_str("- "),
            Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::Item)
            | Event::End(TagEnd::CodeBlock)
            | Event::End(TagEnd::TableRow)
            | Event::End(TagEnd::TableHead) => out.push('\n'),
            Event::End(TagEnd::TableCell) => out.push(' '),
            Event::Rule => out.push('\n'),
            _ => {}
        }
    }

    collapse_blank_lines(out.trim())
}

fn collapse_blank_lines(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut newlines = 0;
    for c in text.chars() {
        if c == '\n' {
            newlines += 1;
            if newlines > 2 {
                continue;
            }
        } else {
            newlines = 0;
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_formatting_removed() {
        assert_eq!(
            markdown_to_plain_text("**Deployed** an _NFT_ at `0xabc`"),
            "Deployed an NFT at 0xabc"
        );
    }

    #[test]
    fn test_links_keep_text() {
        assert_eq!(
            markdown_to_plain_text("See [the explorer](https://example.com)"),
            "See the explorer"
        );
    }

    #[test]
    fn test_headings_and_lists() {
        let md = "# Actions\n\n- deploy_nft\n- deploy_token";
        assert_eq!(markdown_to_plain_text(md), "Actions\n- deploy_nft\n- deploy_token");
    }

    #[test]
    fn test_plain_text_passthrough() {
        assert_eq!(markdown_to_plain_text("just words"), "just words");
        assert_eq!(markdown_to_plain_text(""), "");
    }
}
