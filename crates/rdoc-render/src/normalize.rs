//! Template tag normalisation for WordprocessingML parts.
//!
//! Word stores text in runs and freely splits a typed `{{ name }}` across
//! several of them. Before a part can be compiled as a tera template the
//! markup inside each tag is dropped, and structural tags (`{%tr`, `{%tc`,
//! `{%p`, `{%r`) replace their enclosing element so loops can repeat table
//! rows and paragraphs.

/// Structural tag prefixes and the element each one replaces.
/// Outer elements come first so a row tag is not consumed as a paragraph tag.
const STRUCTURAL_TAGS: [(&str, &str); 4] = [("tr", "w:tr"), ("tc", "w:tc"), ("p", "w:p"), ("r", "w:r")];

/// Normalise a part's XML into a compilable template.
pub fn normalize_part(xml: &str) -> String {
    let mut out = merge_split_tags(xml);
    for (marker, element) in STRUCTURAL_TAGS {
        out = hoist_structural_tags(&out, marker, element);
    }
    out
}

/// Remove XML markup that Word inserted inside `{{ }}` and `{% %}` tags.
pub fn merge_split_tags(xml: &str) -> String {
    let bytes = xml.as_bytes();
    let mut out = String::with_capacity(xml.len());
    let mut i = 0;

    while i < xml.len() {
        if bytes[i] == b'{' {
            let next = skip_markup(xml, i + 1);
            if let Some(&kind @ (b'{' | b'%')) = bytes.get(next) {
                let closer = if kind == b'{' { b'}' } else { b'%' };
                if let Some((body, end)) = read_tag_body(xml, next + 1, closer) {
                    out.push('{');
                    out.push(kind as char);
                    out.push_str(&clean_tag_body(&body));
                    out.push(closer as char);
                    out.push('}');
                    i = end;
                    continue;
                }
            }
        }

        match xml[i..].chars().next() {
            Some(ch) => {
                out.push(ch);
                i += ch.len_utf8();
            }
            None => break,
        }
    }

    out
}

/// Collect a tag body up to `closer` + `}`, dropping markup on the way.
/// Returns the body and the index just past the closing brace.
fn read_tag_body(xml: &str, start: usize, closer: u8) -> Option<(String, usize)> {
    let bytes = xml.as_bytes();
    let mut body = String::new();
    let mut i = start;

    while i < xml.len() {
        match bytes[i] {
            b'<' => i = skip_markup(xml, i),
            b if b == closer => {
                let after = skip_markup(xml, i + 1);
                if bytes.get(after) == Some(&b'}') {
                    return Some((body, after + 1));
                }
                body.push(closer as char);
                i += 1;
            }
            // A new opening brace pair means this tag was never closed.
            b'{' if matches!(bytes.get(skip_markup(xml, i + 1)), Some(b'{' | b'%')) => return None,
            _ => {
                let ch = xml[i..].chars().next()?;
                body.push(ch);
                i += ch.len_utf8();
            }
        }
    }

    None
}

/// Skip consecutive `<...>` elements starting at `i`.
fn skip_markup(xml: &str, mut i: usize) -> usize {
    let bytes = xml.as_bytes();
    while bytes.get(i) == Some(&b'<') {
        match xml[i..].find('>') {
            Some(offset) => i += offset + 1,
            None => return xml.len(),
        }
    }
    i
}

/// Turn escaped and typographic characters back into template syntax.
fn clean_tag_body(body: &str) -> String {
    body.replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{201C}', '\u{201D}'], "\"")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Replace every element containing `{%<marker> ... %}` with `{% ... %}`.
fn hoist_structural_tags(xml: &str, marker: &str, element: &str) -> String {
    let opener = format!("{{%{} ", marker);
    let closing_element = format!("</{}>", element);
    let mut out = xml.to_string();
    let mut search_from = 0;

    while let Some(offset) = out[search_from..].find(&opener) {
        let tag_start = search_from + offset;
        let body_start = tag_start + opener.len();

        let located = out[body_start..].find("%}").and_then(|body_len| {
            let element_start = find_element_start(&out[..tag_start], element)?;
            let close_offset = out[tag_start..].find(&closing_element)?;
            Some((body_len, element_start, tag_start + close_offset + closing_element.len()))
        });

        let Some((body_len, element_start, element_end)) = located else {
            search_from = body_start;
            continue;
        };

        let replacement = format!("{{% {} %}}", out[body_start..body_start + body_len].trim());
        out.replace_range(element_start..element_end, &replacement);
        search_from = element_start + replacement.len();
    }

    out
}

/// Position of the last `<element>` or `<element ...>` start tag in `haystack`.
fn find_element_start(haystack: &str, element: &str) -> Option<usize> {
    let needle = format!("<{}", element);
    let mut end = haystack.len();

    while let Some(pos) = haystack[..end].rfind(&needle) {
        match haystack.as_bytes().get(pos + needle.len()) {
            Some(b'>') | Some(b' ') => return Some(pos),
            _ => end = pos,
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_tag_split_across_runs() {
        let xml = "<w:r><w:t>{{ gen</w:t></w:r><w:r><w:t>erated_date }}</w:t></w:r>";
        assert_eq!(merge_split_tags(xml), "<w:r><w:t>{{ generated_date }}</w:t></w:r>");
    }

    #[test]
    fn test_merge_split_opening_braces() {
        let xml = "<w:t>{</w:t></w:r><w:r><w:t>{ x }</w:t></w:r><w:r><w:t>}</w:t>";
        assert_eq!(merge_split_tags(xml), "<w:t>{{ x }}</w:t>");
    }

    #[test]
    fn test_merge_restores_quotes() {
        let xml = "<w:t>{% if a == \u{201C}b\u{201D} and c != &quot;d&quot; %}</w:t>";
        assert_eq!(merge_split_tags(xml), "<w:t>{% if a == \"b\" and c != \"d\" %}</w:t>");
    }

    #[test]
    fn test_merge_keeps_plain_text_and_unicode() {
        let xml = "<w:t>Umsatz {single} brace — ünïcode</w:t>";
        assert_eq!(merge_split_tags(xml), xml);
    }

    #[test]
    fn test_unterminated_tag_is_left_alone() {
        let xml = "<w:t>{{ oops</w:t><w:t>{{ name }}</w:t>";
        assert_eq!(merge_split_tags(xml), xml);
    }

    #[test]
    fn test_hoist_table_row() {
        let xml = concat!(
            "<w:tbl><w:tr><w:trPr/><w:tc><w:p><w:r><w:t>{%tr for row in rows %}</w:t></w:r></w:p></w:tc></w:tr>",
            "<w:tr><w:tc><w:p><w:r><w:t>{{ row.metric }}</w:t></w:r></w:p></w:tc></w:tr>",
            "<w:tr w:rsidR=\"00A1\"><w:tc><w:p><w:r><w:t>{%tr endfor %}</w:t></w:r></w:p></w:tc></w:tr></w:tbl>",
        );
        assert_eq!(
            normalize_part(xml),
            "<w:tbl>{% for row in rows %}<w:tr><w:tc><w:p><w:r><w:t>{{ row.metric }}</w:t></w:r></w:p></w:tc></w:tr>{% endfor %}</w:tbl>"
        );
    }

    #[test]
    fn test_hoist_paragraph_skips_ppr() {
        let xml = "<w:p><w:pPr><w:pStyle w:val=\"X\"/></w:pPr><w:r><w:t>{%p if show %}</w:t></w:r></w:p><w:p><w:r><w:t>shown</w:t></w:r></w:p><w:p><w:r><w:t>{%p endif %}</w:t></w:r></w:p>";
        assert_eq!(
            normalize_part(xml),
            "{% if show %}<w:p><w:r><w:t>shown</w:t></w:r></w:p>{% endif %}"
        );
    }

    #[test]
    fn test_hoist_run() {
        let xml = "<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>{%r if bold %}</w:t></w:r><w:r><w:t>x</w:t></w:r><w:r><w:t>{%r endif %}</w:t></w:r></w:p>";
        assert_eq!(
            normalize_part(xml),
            "<w:p>{% if bold %}<w:r><w:t>x</w:t></w:r>{% endif %}</w:p>"
        );
    }

    #[test]
    fn test_split_structural_tag_is_merged_then_hoisted() {
        let xml = "<w:p><w:r><w:t>{%p if </w:t></w:r><w:r><w:t>x %}</w:t></w:r></w:p>";
        assert_eq!(normalize_part(xml), "{% if x %}");
    }

    #[test]
    fn test_find_element_start_ignores_longer_names() {
        let hay = "<w:p><w:pPr></w:pPr><w:r>";
        assert_eq!(find_element_start(hay, "w:p"), Some(0));
        assert_eq!(find_element_start("<w:pPr>", "w:p"), None);
    }
}
