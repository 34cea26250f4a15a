use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Build a styled line from text that may carry SGR escapes.
///
/// `base` is the tag style; escape codes layer on top of it and a reset
/// returns to it. Output is cut at `max_width` visible characters. Tabs
/// become single spaces and other control characters are dropped.
pub(super) fn styled_line(text: &str, base: Style, max_width: usize) -> Line<'static> {
    let mut spans = Vec::new();
    let mut current_text = String::new();
    let mut current_style = base;
    let mut chars = text.chars().peekable();
    let mut visible_count = 0;

    while let Some(c) = chars.next() {
        if visible_count >= max_width {
            break;
        }

        if c == '\x1b' {
            if !current_text.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut current_text), current_style));
            }

            if chars.peek() == Some(&'[') {
                chars.next();
                let mut code = String::new();
                let mut final_byte = None;
                while let Some(next) = chars.next() {
                    if next.is_ascii_alphabetic() {
                        final_byte = Some(next);
                        break;
                    }
                    code.push(next);
                }
                if final_byte == Some('m') {
                    current_style = parse_sgr_codes(&code, current_style, base);
                }
            }
        } else if c == '\t' {
            current_text.push(' ');
            visible_count += 1;
        } else if !c.is_control() {
            current_text.push(c);
            visible_count += 1;
        }
    }

    if !current_text.is_empty() {
        spans.push(Span::styled(current_text, current_style));
    }

    if spans.is_empty() {
        Line::from("")
    } else {
        Line::from(spans)
    }
}

/// Parse SGR (Select Graphic Rendition) codes.
fn parse_sgr_codes(code: &str, mut style: Style, base: Style) -> Style {
    for part in code.split(';') {
        match part {
            "0" | "" => style = base,
            "1" => style = style.add_modifier(Modifier::BOLD),
            "2" => style = style.add_modifier(Modifier::DIM),
            "3" => style = style.add_modifier(Modifier::ITALIC),
            "4" => style = style.add_modifier(Modifier::UNDERLINED),
            "22" => style = style.remove_modifier(Modifier::BOLD | Modifier::DIM),
            "30" => style = style.fg(Color::Black),
            "31" => style = style.fg(Color::Red),
            "32" => style = style.fg(Color::Green),
            "33" => style = style.fg(Color::Yellow),
            "34" => style = style.fg(Color::Blue),
            "35" => style = style.fg(Color::Magenta),
            "36" => style = style.fg(Color::Cyan),
            "37" => style = style.fg(Color::White),
            "39" => style = style.fg(base.fg.unwrap_or(Color::Reset)),
            "90" => style = style.fg(Color::DarkGray),
            "91" => style = style.fg(Color::LightRed),
            "92" => style = style.fg(Color::LightGreen),
            "93" => style = style.fg(Color::LightYellow),
            "94" => style = style.fg(Color::LightBlue),
            "95" => style = style.fg(Color::LightMagenta),
            "96" => style = style.fg(Color::LightCyan),
            "97" => style = style.fg(Color::White),
            _ => {}
        }
    }
    style
}
