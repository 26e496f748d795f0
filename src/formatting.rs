use alloy::primitives::{utils::format_units, U256};
use owo_colors::OwoColorize;

pub fn format_gas(gas: U256) -> String {
    let gas: u64 = gas.try_into().unwrap_or(u64::MAX);
    let text = format!("{gas} gas");
    if gas <= 3_000_000 {
        text.bright_green().to_string()
    } else if gas <= 7_000_000 {
        text.yellow().to_string()
    } else {
        text.bright_purple().to_string()
    }
}

/// Pretty-prints a gas price given in wei.
pub fn format_gas_price(wei: u128) -> String {
    match format_units(U256::from(wei), "gwei") {
        Ok(gwei) => format!(
            "{} gwei",
            gwei.trim_end_matches('0').trim_end_matches('.')
        ),
        Err(_) => format!("{wei} wei"),
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::U256;

    use super::{format_gas, format_gas_price};

    #[test]
    fn formats_gas_price_in_gwei() {
        assert_eq!("10 gwei", format_gas_price(10_000_000_000));
        assert_eq!("1.5 gwei", format_gas_price(1_500_000_000));
    }

    #[test]
    fn formats_gas_with_a_unit() {
        assert!(format_gas(U256::from(21_000)).contains("21000 gas"));
    }
}
