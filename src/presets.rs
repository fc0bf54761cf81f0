//! Built-in menus offered to quiz authors when generating numeral questions.

use serde::Serialize;

use crate::domain::{DigitRange, NumberSystem};

/// One entry of the range menu.
#[derive(Clone, Debug, Serialize)]
pub struct RangeOption {
  /// Value sent back in generate requests, e.g. `"1-100"`.
  pub value: String,
  pub label: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct SystemOption {
  pub value: NumberSystem,
  pub label: &'static str,
}

pub const COUNT_OPTIONS: [usize; 4] = [5, 10, 15, 20];

const RANGE_MAXES: [u64; 8] = [
  10, 100, 1_000, 10_000, 100_000, 1_000_000, 10_000_000, 100_000_000,
];

/// `1-10` up to `1-100000000`.
pub fn range_options() -> Vec<RangeOption> {
  RANGE_MAXES
    .iter()
    .map(|&max| {
      let range = DigitRange::new(1, max);
      RangeOption { value: range.to_string(), label: format!("1 – {}", group_thousands(max)) }
    })
    .collect()
}

pub fn system_options() -> Vec<SystemOption> {
  vec![
    SystemOption { value: NumberSystem::SinoKorean, label: "Sino-Korean (일, 이, 삼)" },
    SystemOption { value: NumberSystem::NativeKorean, label: "Native Korean (하나, 둘, 셋) · up to 99" },
  ]
}

fn group_thousands(n: u64) -> String {
  let digits = n.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(ch);
  }
  out
}
