/* src/client/head/rust/src/escape.rs */

/// Escape text content (`<title>`).
pub fn escape_text(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for ch in text.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      _ => out.push(ch),
    }
  }
  out
}

/// Escape a double-quoted attribute value.
pub fn escape_attr(value: &str) -> String {
  let mut out = String::with_capacity(value.len());
  for ch in value.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(ch),
    }
  }
  out
}

/// Make JSON text safe to embed in a `<script>` element.
///
/// Walks the JSON text tracking whether the current position is inside a
/// JSON string (handling `\"` and `\\` correctly). Inside strings, `<`, `>`
/// and `&` become JSON unicode escapes, so a value containing
/// `</script>` or `<!--` cannot end the element early. U+2028/U+2029 are
/// escaped as well since older JS parsers reject them raw.
pub fn script_safe_json(json: &str) -> String {
  let mut out = String::with_capacity(json.len());
  let mut in_string = false;
  let mut chars = json.chars();

  while let Some(ch) = chars.next() {
    if in_string {
      match ch {
        '\\' => {
          // Escaped character inside string -- push both and skip next
          out.push(ch);
          if let Some(next) = chars.next() {
            out.push(next);
          }
        }
        '"' => {
          in_string = false;
          out.push(ch);
        }
        '<' | '>' | '&' | '\u{2028}' | '\u{2029}' => {
          out.push_str(&format!("\\u{:04x}", ch as u32));
        }
        _ => out.push(ch),
      }
    } else {
      if ch == '"' {
        in_string = true;
      }
      out.push(ch);
    }
  }
  out
}
