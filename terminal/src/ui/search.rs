//! Substring search over the static stock table.

use super::stock_data::StockInfo;

/// Maximum number of results shown in the dropdown.
pub const MAX_RESULTS: usize = 8;

/// Case-insensitive substring match against name, symbol and sector.
///
/// A query that is blank after trimming matches nothing. Otherwise the query is
/// matched as typed (lowercased, not trimmed), so `"bank "` only matches fields
/// containing a trailing space.
pub fn search_stocks<'a>(stocks: &'a [StockInfo], query: &str, limit: usize) -> Vec<&'a StockInfo> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    stocks
        .iter()
        .filter(|stock| {
            stock.name.to_lowercase().contains(&needle)
                || stock.symbol.to_lowercase().contains(&needle)
                || stock.sector.to_lowercase().contains(&needle)
        })
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::stock_data::STOCKS;

    #[test]
    fn test_blank_query_is_empty() {
        assert!(search_stocks(STOCKS, "", MAX_RESULTS).is_empty());
        assert!(search_stocks(STOCKS, "   ", MAX_RESULTS).is_empty());
    }

    #[test]
    fn test_matches_symbol_case_insensitively() {
        let results = search_stocks(STOCKS, "tcs", MAX_RESULTS);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].symbol, "TCS");
    }

    #[test]
    fn test_matches_sector() {
        let results = search_stocks(STOCKS, "it", MAX_RESULTS);
        assert!(results.iter().any(|s| s.symbol == "INFY"));
        // "ITC" matches by symbol and name as well
        assert!(results.iter().any(|s| s.symbol == "ITC"));
    }

    #[test]
    fn test_results_are_capped() {
        // Well over eight rows contain an 'a'
        let results = search_stocks(STOCKS, "a", MAX_RESULTS);
        assert_eq!(results.len(), MAX_RESULTS);
        assert_eq!(search_stocks(STOCKS, "a", 3).len(), 3);
    }

    #[test]
    fn test_results_keep_table_order() {
        let results = search_stocks(STOCKS, "bank", MAX_RESULTS);
        let symbols: Vec<_> = results.iter().map(|s| s.symbol).collect();
        assert_eq!(symbols, ["HDFCBANK", "ICICIBANK", "SBIN", "KOTAKBANK", "AXISBANK"]);
    }

    #[test]
    fn test_untrimmed_query_is_matched_as_typed() {
        assert!(search_stocks(STOCKS, " tcs", MAX_RESULTS).is_empty());
        assert!(!search_stocks(STOCKS, "state bank", MAX_RESULTS).is_empty());
    }

    #[test]
    fn test_no_match() {
        assert!(search_stocks(STOCKS, "zzz", MAX_RESULTS).is_empty());
    }
}
