//! Integer → Hangul numeral text, for both Korean numbering systems.
//!
//! Example:
//!   123456, Sino   → "십이만삼천사백오십육"
//!   42,     Native → "마흔 둘"
//!
//! Rendering is a pure function. `None` means "not representable in this
//! system" (native above 99, native zero, anything past the Sino tables).

use crate::domain::NumberSystem;

/// Largest value the Sino-Korean tables cover (groups up to 억).
pub const SINO_MAX: u64 = 999_999_999_999;
/// Native Korean numerals stop at 99 in this renderer.
pub const NATIVE_MAX: u64 = 99;
/// Native Korean has no zero form, so the smallest renderable value is 1.
pub const NATIVE_MIN: u64 = 1;

const SINO_ZERO: &str = "영";
const SINO_DIGITS: [&str; 10] = ["", "일", "이", "삼", "사", "오", "육", "칠", "팔", "구"];

// Positional suffixes inside one 4-digit group, highest first.
const GROUP_UNITS: [(u64, &str); 3] = [(1000, "천"), (100, "백"), (10, "십")];
// Group suffixes across 4-digit groups, highest first.
const GROUP_SUFFIXES: [(u64, &str); 2] = [(100_000_000, "억"), (10_000, "만")];

const NATIVE_ONES: [&str; 11] = [
  "", "하나", "둘", "셋", "넷", "다섯", "여섯", "일곱", "여덟", "아홉", "열",
];
const NATIVE_TENS: [&str; 10] = [
  "", "열", "스물", "서른", "마흔", "쉰", "예순", "일흔", "여든", "아흔",
];

/// Render `n` as Hangul text in the given numbering system.
pub fn render(n: u64, system: NumberSystem) -> Option<String> {
  match system {
    NumberSystem::SinoKorean => render_sino(n),
    NumberSystem::NativeKorean => render_native(n),
  }
}

/// Highest value the system can render.
pub fn max_for(system: NumberSystem) -> u64 {
  match system {
    NumberSystem::SinoKorean => SINO_MAX,
    NumberSystem::NativeKorean => NATIVE_MAX,
  }
}

/// Lowest value the system can render.
pub fn min_for(system: NumberSystem) -> u64 {
  match system {
    NumberSystem::SinoKorean => 0,
    NumberSystem::NativeKorean => NATIVE_MIN,
  }
}

fn render_sino(n: u64) -> Option<String> {
  if n > SINO_MAX {
    return None;
  }
  if n == 0 {
    return Some(SINO_ZERO.to_string());
  }

  let mut out = String::new();
  let mut rest = n;
  for (size, suffix) in GROUP_SUFFIXES {
    let group = rest / size;
    rest %= size;
    if group == 0 {
      continue;
    }
    // A lone 1 in front of 만/억 is dropped, like 십/백/천 inside a group.
    if group != 1 {
      push_sino_group(&mut out, group);
    }
    out.push_str(suffix);
  }
  push_sino_group(&mut out, rest);
  Some(out)
}

/// Append one 0..=9999 group. Zero appends nothing.
fn push_sino_group(out: &mut String, group: u64) {
  let mut rest = group;
  for (size, unit) in GROUP_UNITS {
    let digit = rest / size;
    rest %= size;
    if digit == 0 {
      continue;
    }
    if digit != 1 {
      out.push_str(SINO_DIGITS[digit as usize]);
    }
    out.push_str(unit);
  }
  // The ones digit is always spelled out, 1 included.
  out.push_str(SINO_DIGITS[rest as usize]);
}

fn render_native(n: u64) -> Option<String> {
  if !(NATIVE_MIN..=NATIVE_MAX).contains(&n) {
    return None;
  }
  if n <= 10 {
    return Some(NATIVE_ONES[n as usize].to_string());
  }
  let tens = NATIVE_TENS[(n / 10) as usize];
  match n % 10 {
    0 => Some(tens.to_string()),
    ones => Some(format!("{} {}", tens, NATIVE_ONES[ones as usize])),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use NumberSystem::{NativeKorean, SinoKorean};

  fn sino(n: u64) -> String {
    render(n, SinoKorean).expect("sino renders")
  }

  #[test]
  fn sino_small_values() {
    assert_eq!(sino(0), "영");
    assert_eq!(sino(1), "일");
    assert_eq!(sino(9), "구");
    assert_eq!(sino(10), "십");
    assert_eq!(sino(11), "십일");
    assert_eq!(sino(20), "이십");
    assert_eq!(sino(100), "백");
    assert_eq!(sino(101), "백일");
    assert_eq!(sino(110), "백십");
    assert_eq!(sino(1000), "천");
    assert_eq!(sino(2019), "이천십구");
  }

  #[test]
  fn sino_multi_group_suppresses_leading_one() {
    assert_eq!(sino(10_000), "만");
    assert_eq!(sino(10_001), "만일");
    assert_eq!(sino(20_000), "이만");
    assert_eq!(sino(110_000), "십일만");
    assert_eq!(sino(123_456), "십이만삼천사백오십육");
    assert_eq!(sino(1_000_000), "백만");
    assert_eq!(sino(99_999_999), "구천구백구십구만구천구백구십구");
  }

  #[test]
  fn sino_eok_group() {
    assert_eq!(sino(100_000_000), "억");
    assert_eq!(sino(300_000_005), "삼억오");
    assert_eq!(sino(100_010_000), "억만");
    assert!(render(SINO_MAX + 1, SinoKorean).is_none());
  }

  #[test]
  fn sino_is_total_and_deterministic_on_samples() {
    for n in (0..100_000_000u64).step_by(9_973) {
      let a = render(n, SinoKorean);
      let b = render(n, SinoKorean);
      assert!(a.as_deref().is_some_and(|s| !s.is_empty()), "empty render for {n}");
      assert_eq!(a, b);
    }
  }

  #[test]
  fn native_table_values() {
    let expected = ["하나", "둘", "셋", "넷", "다섯", "여섯", "일곱", "여덟", "아홉"];
    for (i, want) in expected.iter().enumerate() {
      assert_eq!(render(i as u64 + 1, NativeKorean).as_deref(), Some(*want));
    }
    assert_eq!(render(10, NativeKorean).as_deref(), Some("열"));
    assert_eq!(render(20, NativeKorean).as_deref(), Some("스물"));
    assert_eq!(render(90, NativeKorean).as_deref(), Some("아흔"));
  }

  #[test]
  fn native_composites_are_space_joined() {
    assert_eq!(render(11, NativeKorean).as_deref(), Some("열 하나"));
    assert_eq!(render(42, NativeKorean).as_deref(), Some("마흔 둘"));
    assert_eq!(render(99, NativeKorean).as_deref(), Some("아흔 아홉"));
    for n in 11..=99u64 {
      if n % 10 == 0 {
        continue;
      }
      let text = render(n, NativeKorean).expect("composite renders");
      assert_eq!(text.matches(' ').count(), 1, "{n} -> {text}");
    }
  }

  #[test]
  fn native_out_of_range_is_none() {
    assert!(render(0, NativeKorean).is_none());
    assert!(render(100, NativeKorean).is_none());
    assert!(render(12_345, NativeKorean).is_none());
  }
}
