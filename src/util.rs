//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Milliseconds as `m:ss`, the way a single quiz's time is shown.
pub fn format_clock(millis: u64) -> String {
  let total_seconds = millis / 1000;
  format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Milliseconds as `Xh Ym`, or `Ym` under an hour. Used for lifetime totals.
pub fn format_total(millis: u64) -> String {
  let total_seconds = millis / 1000;
  let hours = total_seconds / 3600;
  let minutes = (total_seconds % 3600) / 60;
  if hours > 0 {
    format!("{}h {}m", hours, minutes)
  } else {
    format!("{}m", minutes)
  }
}

/// Log-safe truncation for user-supplied text.
pub fn trunc_for_log(s: &str, max_chars: usize) -> String {
  match s.char_indices().nth(max_chars) {
    None => s.to_string(),
    Some((cut, _)) => format!("{}… ({} bytes total)", &s[..cut], s.len()),
  }
}
