//! Which currencies new wallets may be opened in.

use std::collections::HashSet;

use invoicer_shared::{CurrencyCode, InvalidCurrencyCode};

/// Currency admission policy applied at wallet creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CurrencyPolicy {
    /// Every ISO 4217 code is accepted.
    #[default]
    AcceptAll,
    /// Only the listed codes are accepted.
    AllowList(HashSet<CurrencyCode>),
}

impl CurrencyPolicy {
    /// Builds the policy from configuration. `None` accepts every code.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCurrencyCode` if a configured entry is not ISO 4217.
    pub fn from_config(codes: Option<&[String]>) -> Result<Self, InvalidCurrencyCode> {
        let Some(codes) = codes else {
            return Ok(Self::AcceptAll);
        };

        let allowed = codes
            .iter()
            .map(|c| CurrencyCode::parse(c.trim().to_uppercase()))
            .collect::<Result<HashSet<_>, _>>()?;

        Ok(Self::AllowList(allowed))
    }

    /// Returns true if wallets may be opened in `currency`.
    #[must_use]
    pub fn permits(&self, currency: &CurrencyCode) -> bool {
        match self {
            Self::AcceptAll => true,
            Self::AllowList(allowed) => allowed.contains(currency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    #[test]
    fn test_default_accepts_everything() {
        let policy = CurrencyPolicy::default();
        assert!(policy.permits(&code("USD")));
        assert!(policy.permits(&code("XAU")));
        assert_eq!(CurrencyPolicy::from_config(None).unwrap(), policy);
    }

    #[test]
    fn test_allow_list() {
        let configured = vec!["usd".to_string(), " EUR ".to_string()];
        let policy = CurrencyPolicy::from_config(Some(&configured)).unwrap();

        assert!(policy.permits(&code("USD")));
        assert!(policy.permits(&code("EUR")));
        assert!(!policy.permits(&code("RUB")));
    }

    #[test]
    fn test_allow_list_rejects_bad_entry() {
        let configured = vec!["USD".to_string(), "DOLLARS".to_string()];
        let err = CurrencyPolicy::from_config(Some(&configured)).unwrap_err();
        assert_eq!(err, InvalidCurrencyCode("DOLLARS".to_string()));
    }
}
