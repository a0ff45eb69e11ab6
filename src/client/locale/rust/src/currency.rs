/* src/client/locale/rust/src/currency.rs */

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::LocaleError;
use crate::locale::Locale;

/// Settlement currencies offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
  Usd,
  Twd,
  Cny,
}

impl Currency {
  pub const ALL: [Currency; 3] = [Currency::Usd, Currency::Twd, Currency::Cny];

  /// ISO 4217 code, also the persisted form.
  pub fn code(self) -> &'static str {
    match self {
      Self::Usd => "USD",
      Self::Twd => "TWD",
      Self::Cny => "CNY",
    }
  }

  pub fn symbol(self) -> &'static str {
    match self {
      Self::Usd => "$",
      Self::Twd => "NT$",
      Self::Cny => "\u{a5}",
    }
  }
}

impl fmt::Display for Currency {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.code())
  }
}

impl FromStr for Currency {
  type Err = LocaleError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Currency::ALL
      .into_iter()
      .find(|c| c.code() == s)
      .ok_or_else(|| LocaleError::InvalidCurrency(s.to_string()))
  }
}

/// The currency that matches a language when the user has not picked one.
pub fn default_currency_for(locale: Locale) -> Currency {
  match locale {
    Locale::En => Currency::Usd,
    Locale::ZhTw => Currency::Twd,
    Locale::ZhCn => Currency::Cny,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_per_locale() {
    assert_eq!(default_currency_for(Locale::En), Currency::Usd);
    assert_eq!(default_currency_for(Locale::ZhTw), Currency::Twd);
    assert_eq!(default_currency_for(Locale::ZhCn), Currency::Cny);
  }

  #[test]
  fn parse_codes() {
    assert_eq!("TWD".parse::<Currency>(), Ok(Currency::Twd));
    assert_eq!("usd".parse::<Currency>(), Err(LocaleError::InvalidCurrency("usd".into())));
    assert!("EUR".parse::<Currency>().is_err());
  }

  #[test]
  fn serde_uses_codes() {
    assert_eq!(serde_json::to_string(&Currency::Cny).unwrap(), r#""CNY""#);
    assert_eq!(serde_json::from_str::<Currency>(r#""TWD""#).unwrap(), Currency::Twd);
  }
}
