/* src/client/head/rust/src/render.rs */

//! Serialize an in-memory head to HTML and splice it into page templates.

use crate::document::{DocumentHead, HeadDocument, HeadElement};
use crate::escape::{escape_attr, escape_text, script_safe_json};

const VOID_TAGS: &[&str] = &["meta", "link", "base"];

/// Render `<title>` followed by every element, in document order.
pub fn render_head(doc: &HeadDocument) -> String {
  let mut out = String::new();
  if let Some(title) = doc.title() {
    out.push_str("<title>");
    out.push_str(&escape_text(&title));
    out.push_str("</title>");
  }
  for element in doc.elements() {
    render_element(&mut out, element);
  }
  out
}

fn render_element(out: &mut String, element: &HeadElement) {
  let tag = element.tag.to_ascii_lowercase();
  out.push('<');
  out.push_str(&tag);
  for (name, value) in &element.attrs {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attr(value));
    out.push('"');
  }
  out.push('>');
  if VOID_TAGS.contains(&tag.as_str()) {
    return;
  }
  if let Some(text) = &element.text {
    if tag == "script" {
      out.push_str(&script_safe_json(text));
    } else {
      out.push_str(&escape_text(text));
    }
  }
  out.push_str("</");
  out.push_str(&tag);
  out.push('>');
}

/// Inject rendered head markup after `<meta charset="utf-8">` (falling back
/// to right after `<head>`). A template `<title>` is dropped when the
/// injected markup carries its own.
pub fn inject_head(html: &str, head_html: &str) -> String {
  let html = if head_html.contains("<title>") { strip_title(html) } else { html.to_string() };

  let charset = r#"<meta charset="utf-8">"#;
  let insert_at = match html.find(charset) {
    Some(pos) => pos + charset.len(),
    None => match find_open_tag_end(&html, "<head") {
      Some(pos) => pos,
      None => return html,
    },
  };

  let mut result = String::with_capacity(html.len() + head_html.len());
  result.push_str(&html[..insert_at]);
  result.push_str(head_html);
  result.push_str(&html[insert_at..]);
  result
}

/// Set `<html lang="...">`, replacing an existing value.
pub fn inject_html_lang(html: &str, locale: &str) -> String {
  let Some(start) = html.find("<html") else {
    return html.to_string();
  };
  let Some(end) = html[start..].find('>').map(|e| start + e) else {
    return html.to_string();
  };
  let tag = &html[start..end];
  let lang_attr = format!("lang=\"{}\"", escape_attr(locale));

  let new_tag = match tag.find(" lang=") {
    Some(attr_pos) => {
      let value_start = attr_pos + " lang=".len();
      let rest = &tag[value_start..];
      let value_end = match rest.chars().next() {
        Some(quote @ ('"' | '\'')) => {
          rest[1..].find(quote).map_or(tag.len(), |e| value_start + e + 2)
        }
        _ => rest.find(char::is_whitespace).map_or(tag.len(), |e| value_start + e),
      };
      format!("{} {lang_attr}{}", &tag[..attr_pos], &tag[value_end..])
    }
    None => format!("<html {lang_attr}{}", &tag["<html".len()..]),
  };

  let mut result = String::with_capacity(html.len() + lang_attr.len());
  result.push_str(&html[..start]);
  result.push_str(&new_tag);
  result.push_str(&html[end..]);
  result
}

fn find_open_tag_end(html: &str, open: &str) -> Option<usize> {
  let start = html.find(open)?;
  html[start..].find('>').map(|e| start + e + 1)
}

fn strip_title(html: &str) -> String {
  let Some(start) = html.find("<title") else {
    return html.to_string();
  };
  match html[start..].find("</title>") {
    Some(end) => format!("{}{}", &html[..start], &html[start + end + "</title>".len()..]),
    None => html.to_string(),
  }
}
