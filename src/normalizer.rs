/// Cleans raw sheet cells: trims them and drops empty ones. Order is kept.
pub fn normalize_all(raw: Vec<String>) -> Vec<String> {
    raw.into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Provider ticker for a symbol: appends the exchange suffix unless it is already there.
pub fn to_ticker(symbol: &str, suffix: Option<&str>) -> String {
    let symbol = symbol.trim();
    match suffix {
        Some(suffix) if !suffix.is_empty() && !ends_with_ignore_case(symbol, suffix) => {
            format!("{}{}", symbol, suffix)
        }
        _ => symbol.to_string(),
    }
}

fn ends_with_ignore_case(text: &str, suffix: &str) -> bool {
    text.len() >= suffix.len()
        && text.is_char_boundary(text.len() - suffix.len())
        && text[text.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_suffix_once() {
        assert_eq!(to_ticker("TEVA", Some(".TA")), "TEVA.TA");
        assert_eq!(to_ticker("TEVA.TA", Some(".TA")), "TEVA.TA");
        assert_eq!(to_ticker("teva.ta", Some(".TA")), "teva.ta");
        assert_eq!(to_ticker(" LUMI ", Some(".TA")), "LUMI.TA");
    }

    #[test]
    fn no_suffix_configured() {
        assert_eq!(to_ticker("AAPL", None), "AAPL");
        assert_eq!(to_ticker("AAPL", Some("")), "AAPL");
    }

    #[test]
    fn non_ascii_symbol_does_not_panic() {
        assert_eq!(to_ticker("טבע", Some(".TA")), "טבע.TA");
    }

    #[test]
    fn cleans_cells() {
        let raw = vec![" AAA ".to_string(), "".to_string(), "  ".to_string(), "BBB".to_string()];
        assert_eq!(normalize_all(raw), vec!["AAA", "BBB"]);
    }
}
