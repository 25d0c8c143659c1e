//! # Text Normalization
//!
//! Docstring-style cleanup applied to free-text fields such as `description`.

const TAB_SIZE: usize = 8;

/// Cleans up indentation from a block of text.
///
/// - Tabs expand to 8-column stops.
/// - Leading whitespace is removed from the first line.
/// - The common indentation of every following non-blank line is removed.
/// - Leading and trailing empty lines are dropped.
pub fn cleandoc(text: &str) -> String {
    let mut lines: Vec<String> = expand_tabs(text).split('\n').map(str::to_string).collect();

    let margin = lines
        .iter()
        .skip(1)
        .filter_map(|line| {
            let content = line.trim_start().chars().count();
            (content > 0).then(|| line.chars().count() - content)
        })
        .min();

    if let Some(first) = lines.first_mut() {
        *first = first.trim_start().to_string();
    }
    if let Some(margin) = margin {
        for line in lines.iter_mut().skip(1) {
            *line = line.chars().skip(margin).collect();
        }
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    let leading = lines.iter().take_while(|l| l.is_empty()).count();
    lines.drain(..leading);

    lines.join("\n")
}

fn expand_tabs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for ch in text.chars() {
        match ch {
            '\t' => {
                let pad = TAB_SIZE - column % TAB_SIZE;
                out.extend(std::iter::repeat(' ').take(pad));
                column += pad;
            }
            '\n' | '\r' => {
                out.push(ch);
                column = 0;
            }
            _ => {
                out.push(ch);
                column += 1;
            }
        }
    }
    out
}
