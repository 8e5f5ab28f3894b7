//! Price delta computation and reply rendering.

use crate::market::MarketSnapshot;

/// Custom server emoji for the gold currency line.
pub const EMOJI_GOLD: &str = "<:gold:1340310634113405008>";
/// Custom server emoji for the SB currency line.
pub const EMOJI_SB: &str = "<:sb:1340310656439549972>";

/// Direction of a price movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    /// Classify a percent change that has already been rounded for display,
    /// so a movement that renders as "0.00%" also reads as flat.
    pub fn classify(percent_change: f64) -> Self {
        if percent_change > 0.0 {
            Trend::Up
        } else if percent_change < 0.0 {
            Trend::Down
        } else {
            Trend::Flat
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Trend::Up => "📈",
            Trend::Down => "📉",
            Trend::Flat => "➖",
        }
    }
}

/// Percent change vs. a baseline observation, plus its trend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceDelta {
    pub percent_change: f64,
    pub trend: Trend,
}

impl PriceDelta {
    /// A zero or absent baseline yields a flat 0.00% rather than a division
    /// error.
    pub fn new(current: f64, baseline: Option<f64>) -> Self {
        let percent_change = match baseline {
            Some(base) if base != 0.0 => round2((current - base) / base * 100.0),
            _ => 0.0,
        };

        Self {
            percent_change,
            trend: Trend::classify(percent_change),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Render an integer gold price with grouped thousands.
pub fn format_gold(price: i64) -> String {
    let negative = price < 0;
    let digits = price.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Render the full price reply for one item.
///
/// Four lines: bold item name, gold price with trend and percent, SB price
/// likewise, and the observation date of the latest snapshot.
pub fn render_report(name: &str, latest: &MarketSnapshot, baseline: Option<&MarketSnapshot>) -> String {
    let gold = PriceDelta::new(latest.price as f64, baseline.map(|b| b.price as f64));
    let sb = PriceDelta::new(latest.sb_price, baseline.map(|b| b.sb_price));

    format!(
        "**{name}**\n\
         {EMOJI_GOLD} {gold_price} Gold {gold_glyph}  ({gold_pct:.2}%)\n\
         {EMOJI_SB} {sb_price:.2} SB {sb_glyph}  ({sb_pct:.2}%)\n\
         (as of {date})",
        gold_price = format_gold(latest.price),
        gold_glyph = gold.trend.glyph(),
        gold_pct = gold.percent_change,
        sb_price = latest.sb_price,
        sb_glyph = sb.trend.glyph(),
        sb_pct = sb.percent_change,
        date = latest.date,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn snapshot(price: i64, sb_price: f64) -> MarketSnapshot {
        MarketSnapshot {
            date: NaiveDate::from_ymd_opt(2025, 2, 15).unwrap(),
            price,
            sb_price,
        }
    }

    #[test]
    fn test_equal_prices_are_flat() {
        let delta = PriceDelta::new(1000.0, Some(1000.0));
        assert_eq!(delta.percent_change, 0.0);
        assert_eq!(delta.trend, Trend::Flat);
        assert_eq!(delta.trend.glyph(), "➖");
    }

    #[test]
    fn test_rising_price_trends_up() {
        let delta = PriceDelta::new(1100.0, Some(1000.0));
        assert_eq!(delta.percent_change, 10.0);
        assert_eq!(delta.trend, Trend::Up);
        assert_eq!(delta.trend.glyph(), "📈");
    }

    #[test]
    fn test_falling_price_trends_down() {
        let delta = PriceDelta::new(900.0, Some(1000.0));
        assert_eq!(delta.percent_change, -10.0);
        assert_eq!(delta.trend, Trend::Down);
        assert_eq!(delta.trend.glyph(), "📉");
    }

    #[test]
    fn test_zero_baseline_reports_flat_zero() {
        let delta = PriceDelta::new(1234.0, Some(0.0));
        assert_eq!(delta.percent_change, 0.0);
        assert_eq!(delta.trend, Trend::Flat);
    }

    #[test]
    fn test_missing_baseline_reports_flat_zero() {
        let delta = PriceDelta::new(1234.0, None);
        assert_eq!(delta.percent_change, 0.0);
        assert_eq!(delta.trend, Trend::Flat);
    }

    #[test]
    fn test_change_rounding_to_two_decimals() {
        // 1/3% change rounds for display and classification alike
        let delta = PriceDelta::new(1003.0, Some(900.0));
        assert_eq!(delta.percent_change, 11.44);
    }

    #[test]
    fn test_format_gold_grouping() {
        assert_eq!(format_gold(0), "0");
        assert_eq!(format_gold(123), "123");
        assert_eq!(format_gold(1_000), "1,000");
        assert_eq!(format_gold(1_234_567), "1,234,567");
        assert_eq!(format_gold(987_654_321), "987,654,321");
    }

    #[test]
    fn test_render_report_layout() {
        let latest = snapshot(1330, 1.05);
        let baseline = snapshot(1250, 1.05);

        let report = render_report("SUPER|brie+", &latest, Some(&baseline));
        assert_eq!(
            report,
            "**SUPER|brie+**\n\
             <:gold:1340310634113405008> 1,330 Gold 📈  (6.40%)\n\
             <:sb:1340310656439549972> 1.05 SB ➖  (0.00%)\n\
             (as of 2025-02-15)"
        );
    }

    #[test]
    fn test_render_report_without_baseline() {
        let latest = snapshot(42_500, 31.9);

        let report = render_report("Condensed Creativity", &latest, None);
        assert_eq!(
            report,
            "**Condensed Creativity**\n\
             <:gold:1340310634113405008> 42,500 Gold ➖  (0.00%)\n\
             <:sb:1340310656439549972> 31.90 SB ➖  (0.00%)\n\
             (as of 2025-02-15)"
        );
    }
}
