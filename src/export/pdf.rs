//! Minimal PDF 1.4 writer: A4 pages, Helvetica, greedy word wrap.
//!
//! Content carrying HTML markup is reduced to its text first, with block
//! elements on their own lines and list items bulleted. Characters outside
//! WinAnsi are printed as `?`.

use std::fmt::Write as _;

use scraper::{ElementRef, Html};

const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;
/// 10 mm
const MARGIN: f32 = 28.35;
const FONT_SIZE: f32 = 12.0;
const LEADING: f32 = 14.0;

/// Helvetica advance widths for 0x20..=0x7E, in 1/1000 em
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "section", "article", "header", "footer", "h1", "h2", "h3", "h4", "h5", "h6",
    "ul", "ol", "li", "table", "tr", "blockquote", "pre",
];
const PARAGRAPH_ELEMENTS: &[&str] = &["p", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "table"];
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "head", "title"];

pub fn render(content: &str) -> Vec<u8> {
    let text = if looks_like_markup(content) {
        html_to_text(content)
    } else {
        content.replace("\r\n", "\n")
    };
    let lines = wrap(&text, PAGE_WIDTH - 2.0 * MARGIN);
    write_document(&paginate(lines))
}

fn looks_like_markup(content: &str) -> bool {
    content.contains('<') && content.contains('>')
}

/// Text content of an HTML fragment, one line per block element
pub(crate) fn html_to_text(content: &str) -> String {
    let fragment = Html::parse_fragment(content);
    let mut out = String::new();
    collect_text(fragment.root_element(), &mut out);

    let mut lines: Vec<String> = Vec::new();
    for raw in out.lines() {
        let line = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        let previous_blank = lines.last().map(|l| l.is_empty()).unwrap_or(true);
        if line.is_empty() && previous_blank {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            if name == "br" {
                out.push('\n');
                continue;
            }
            if SKIPPED_ELEMENTS.contains(&name) {
                continue;
            }

            let block = BLOCK_ELEMENTS.contains(&name);
            if block {
                end_line(out);
            }
            if name == "li" {
                out.push_str("\u{2022} ");
            }
            collect_text(child_element, out);
            if PARAGRAPH_ELEMENTS.contains(&name) {
                end_line(out);
                out.push('\n');
            } else if block {
                end_line(out);
            }
        } else if let Some(text) = child.value().as_text() {
            // Source line breaks inside markup are layout, not content.
            out.extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c }));
        }
    }
}

fn end_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn char_width(c: char) -> f32 {
    let units = match c {
        ' '..='~' => HELVETICA_WIDTHS[c as usize - 0x20],
        '\u{2022}' => 350,
        '\u{2014}' | '\u{2026}' | '\u{2030}' => 1000,
        _ => 556,
    };
    f32::from(units) * FONT_SIZE / 1000.0
}

fn text_width(text: &str) -> f32 {
    text.chars().map(char_width).sum()
}

/// Greedy word wrap; words wider than a line are broken between characters
fn wrap(text: &str, max_width: f32) -> Vec<String> {
    let space = char_width(' ');
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0.0;

        for word in paragraph.split_whitespace() {
            let word_width = text_width(word);

            if word_width > max_width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current_width = 0.0;
                for c in word.chars() {
                    let w = char_width(c);
                    if current_width + w > max_width && !current.is_empty() {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0.0;
                    }
                    current.push(c);
                    current_width += w;
                }
                continue;
            }

            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + space + word_width <= max_width {
                current.push(' ');
                current.push_str(word);
                current_width += space + word_width;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
                current_width = word_width;
            }
        }

        lines.push(current);
    }

    lines
}

fn lines_per_page() -> usize {
    ((PAGE_HEIGHT - 2.0 * MARGIN - FONT_SIZE) / LEADING) as usize + 1
}

/// Always at least one (possibly empty) page
fn paginate(lines: Vec<String>) -> Vec<Vec<String>> {
    let per_page = lines_per_page();
    let mut pages: Vec<Vec<String>> = lines
        .chunks(per_page)
        .map(|chunk| chunk.to_vec())
        .collect();
    if pages.is_empty() {
        pages.push(Vec::new());
    }
    pages
}

fn winansi(c: char) -> u8 {
    match c {
        ' '..='~' | '\u{a0}'..='\u{ff}' => c as u8,
        '\u{20ac}' => 0x80,
        '\u{201a}' => 0x82,
        '\u{201e}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2030}' => 0x89,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{2122}' => 0x99,
        '\t' => b' ',
        _ => b'?',
    }
}

/// PDF literal string with `(`, `)` and `\` escaped
fn literal(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + 2);
    out.push(b'(');
    for c in text.chars() {
        let byte = winansi(c);
        if matches!(byte, b'(' | b')' | b'\\') {
            out.push(b'\\');
        }
        out.push(byte);
    }
    out.push(b')');
    out
}

fn page_stream(lines: &[String]) -> Vec<u8> {
    let top = PAGE_HEIGHT - MARGIN - FONT_SIZE;
    let mut stream = format!(
        "BT\n/F1 {} Tf\n{} TL\n{:.2} {:.2} Td\n",
        FONT_SIZE, LEADING, MARGIN, top
    )
    .into_bytes();
    for line in lines {
        stream.extend(literal(line));
        stream.extend_from_slice(b" Tj T*\n");
    }
    stream.extend_from_slice(b"ET");
    stream
}

fn write_document(pages: &[Vec<String>]) -> Vec<u8> {
    // 1 catalog, 2 page tree, 3 font, then a page and its content stream per page.
    let mut objects: Vec<Vec<u8>> = Vec::new();
    objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());

    let mut kids = String::new();
    for i in 0..pages.len() {
        let _ = write!(kids, "{} 0 R ", 4 + 2 * i);
    }
    objects.push(
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.trim_end(),
            pages.len()
        )
        .into_bytes(),
    );
    objects.push(
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_vec(),
    );

    for (i, lines) in pages.iter().enumerate() {
        let content_id = 5 + 2 * i;
        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                PAGE_WIDTH, PAGE_HEIGHT, content_id
            )
            .into_bytes(),
        );

        let data = page_stream(lines);
        let mut stream = format!("<< /Length {} >>\nstream\n", data.len()).into_bytes();
        stream.extend(data);
        stream.extend_from_slice(b"\nendstream");
        objects.push(stream);
    }

    let mut out: Vec<u8> = b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend(format!("{} 0 obj\n", i + 1).into_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_offset = out.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        let _ = writeln!(xref, "{:010} 00000 n ", offset);
    }
    let _ = write!(
        xref,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    );
    out.extend(xref.into_bytes());
    out
}
