use common::SignalDecision;

/// Rough price formatting: JPY-quoted pairs use 3 decimals, others 5.
pub fn decimals_for(symbol: &str) -> usize {
    if symbol.to_uppercase().ends_with("JPY") {
        3
    } else {
        5
    }
}

/// Render one decision as a Telegram Markdown alert.
pub fn alert_text(decision: &SignalDecision, interval: &str) -> String {
    let dec = decimals_for(&decision.symbol);

    let mut msg = format!(
        "📈 *{}* signal\n\
         • Direction: *{}*\n\
         • Price: {:.dec$}\n\
         • {}\n\
         • SL: {:.dec$}\n",
        decision.symbol,
        decision.direction,
        decision.entry,
        decision.rationale,
        decision.stop_loss,
    );

    if decision.take_profits.len() == 1 {
        msg.push_str(&format!("• TP: {:.dec$}\n", decision.take_profits[0]));
    } else {
        for (i, tp) in decision.take_profits.iter().enumerate() {
            msg.push_str(&format!("• TP{}: {:.dec$}\n", i + 1, tp));
        }
    }

    msg.push_str(&format!("⏱ Timeframe: {interval}"));
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::Direction;

    fn decision() -> SignalDecision {
        SignalDecision {
            symbol: "EURUSD".to_string(),
            direction: Direction::Buy,
            entry: 1.08321,
            stop_loss: 1.08141,
            take_profits: vec![1.08681],
            evaluated_at: Utc::now(),
            rationale: "EMA(9)=1.083000, EMA(21)=1.081000, RSI(14)=62.0, ATR(14)=0.001200"
                .to_string(),
        }
    }

    #[test]
    fn jpy_pairs_use_three_decimals() {
        assert_eq!(decimals_for("USDJPY"), 3);
        assert_eq!(decimals_for("eurjpy"), 3);
        assert_eq!(decimals_for("EURUSD"), 5);
    }

    #[test]
    fn alert_carries_all_levels() {
        let text = alert_text(&decision(), "15m");
        assert!(text.contains("*EURUSD*"));
        assert!(text.contains("*BUY*"));
        assert!(text.contains("1.08321"));
        assert!(text.contains("SL: 1.08141"));
        assert!(text.contains("TP: 1.08681"));
        assert!(text.contains("Timeframe: 15m"));
    }

    #[test]
    fn staged_targets_are_numbered() {
        let mut d = decision();
        d.take_profits = vec![1.085, 1.087, 1.090];
        let text = alert_text(&d, "1h");
        assert!(text.contains("TP1: 1.08500"));
        assert!(text.contains("TP3: 1.09000"));
    }

    #[test]
    fn jpy_formatting_applies_to_levels() {
        let mut d = decision();
        d.symbol = "USDJPY".to_string();
        d.entry = 147.123_456;
        d.stop_loss = 146.903_456;
        d.take_profits = vec![147.563_456];
        let text = alert_text(&d, "15m");
        assert!(text.contains("Price: 147.123"));
        assert!(text.contains("SL: 146.903"));
    }
}
