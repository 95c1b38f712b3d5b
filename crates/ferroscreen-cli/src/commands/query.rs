//! Turns command-line text into typed queries.

use ferroscreen_core::presets;
use ferroscreen_core::{
    FieldCatalog, FieldRef, Operand, Operator, Predicate, Preset, Scalar, ScreenerKind,
    ScreenerQuery, SortDirection, Universe,
};

use crate::cli::{PresetName, QueryArgs};
use crate::error::CliError;

pub fn build_query(args: &QueryArgs) -> Result<ScreenerQuery, CliError> {
    let catalog = FieldCatalog::builtin();
    let mut query = ScreenerQuery::new(args.kind);

    if let Some(name) = args.preset {
        let preset = load_preset(name, args)?;
        if preset.kind() != args.kind {
            return Err(CliError::Usage(format!(
                "preset '{}' is for {} screeners, not {}",
                preset.name(),
                preset.kind(),
                args.kind
            )));
        }
        query = query.select(preset.into_fields());
    }

    let fields = args
        .fields
        .iter()
        .map(|spec| parse_field(catalog, spec))
        .collect::<Result<Vec<_>, _>>()?;
    query = query.select(fields);

    for spec in &args.filters {
        query = query.filter(parse_filter(catalog, spec)?);
    }

    let tickers = args
        .tickers
        .iter()
        .map(|ticker| resolve_ticker(args.kind, ticker));
    query = query.universe(
        Universe::new()
            .with_markets(args.markets.iter().cloned())
            .with_exchanges(args.exchanges.iter().cloned())
            .with_symbol_types(args.symbol_types.iter().cloned())
            .with_tickers(tickers),
    );

    if let Some(spec) = &args.sort {
        let (field, direction) = parse_sort(catalog, spec)?;
        query = query.sort_by(field, direction);
    }

    Ok(query.paginate(args.offset, args.limit))
}

fn load_preset(name: PresetName, args: &QueryArgs) -> Result<Preset, CliError> {
    let preset = match name {
        PresetName::CryptoTechnicals => presets::crypto_technicals(args.interval)?,
        PresetName::StockOverview => presets::stock_overview()?,
        PresetName::ForexOverview => presets::forex_overview()?,
    };
    Ok(preset)
}

/// `KEY` or `KEY@interval`; keys are matched case-insensitively.
pub fn parse_field(catalog: &FieldCatalog, spec: &str) -> Result<FieldRef, CliError> {
    let (key, interval) = match spec.trim().split_once('@') {
        Some((key, interval)) => (key, Some(interval)),
        None => (spec.trim(), None),
    };
    let field = catalog.field(&key.trim().to_ascii_uppercase())?;
    match interval {
        Some(code) => Ok(field.with_interval(code)?),
        None => Ok(field),
    }
}

/// `KEY op value`. A value prefixed with `$` names another field; ranges and
/// sets are comma separated.
pub fn parse_filter(catalog: &FieldCatalog, spec: &str) -> Result<Predicate, CliError> {
    let (field_spec, rest) = next_token(spec);
    let (operator_text, value) = next_token(rest);
    if operator_text.is_empty() {
        return Err(CliError::Usage(format!(
            "filter '{spec}' is missing an operator"
        )));
    }

    let field = parse_field(catalog, field_spec)?;
    let operator: Operator = operator_text.parse()?;

    let operand = match operator {
        Operator::Empty | Operator::NotEmpty => Operand::None,
        Operator::Between | Operator::NotBetween => {
            let (low, high) = value.split_once(',').ok_or_else(|| {
                CliError::Usage(format!("filter '{spec}' needs a range written as low,high"))
            })?;
            Operand::Range(Scalar::parse_loose(low), Scalar::parse_loose(high))
        }
        Operator::In | Operator::NotIn => Operand::Set(
            value
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| Scalar::Text(item.to_owned()))
                .collect(),
        ),
        Operator::Match => Operand::Scalar(Scalar::Text(value.to_owned())),
        _ if value.is_empty() => {
            return Err(CliError::Usage(format!("filter '{spec}' is missing a value")));
        }
        _ => match value.strip_prefix('$') {
            Some(other) => Operand::Field(parse_field(catalog, other)?),
            None => Operand::Scalar(Scalar::parse_loose(value)),
        },
    };

    Ok(Predicate::new(field, operator, operand))
}

fn next_token(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(end) => (&text[..end], text[end..].trim()),
        None => (text, ""),
    }
}

/// `KEY[@interval][:asc|desc]`, descending when no direction is given.
pub fn parse_sort(
    catalog: &FieldCatalog,
    spec: &str,
) -> Result<(FieldRef, SortDirection), CliError> {
    let (field_spec, direction) = match spec.rsplit_once(':') {
        Some((field_spec, direction)) => (field_spec, direction.parse()?),
        None => (spec, SortDirection::Desc),
    };
    Ok((parse_field(catalog, field_spec)?, direction))
}

/// Crypto shorthand: `BTC` becomes `BINANCE:BTCUSDT`; `EXCHANGE:PAIR` passes through.
pub fn resolve_ticker(kind: ScreenerKind, ticker: &str) -> String {
    let ticker = ticker.trim().to_ascii_uppercase();
    if ticker.contains(':') || !matches!(kind, ScreenerKind::Crypto | ScreenerKind::Coin) {
        return ticker;
    }
    format!("BINANCE:{ticker}USDT")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferroscreen_core::Interval;

    fn catalog() -> &'static FieldCatalog {
        FieldCatalog::builtin()
    }

    #[test]
    fn field_spec_binds_interval() {
        let field = parse_field(catalog(), "relative_strength_index_14@240").expect("valid spec");
        assert_eq!(field.interval(), Some(Interval::FourHours));
        assert_eq!(field.wire_token(), "RSI|240");
    }

    #[test]
    fn filter_spec_with_symbol_operator() {
        let predicate = parse_filter(catalog(), "PRICE > 50").expect("valid filter");
        assert_eq!(predicate.operator(), Operator::Gt);
        assert_eq!(predicate.operand(), &Operand::Scalar(Scalar::Integer(50)));
    }

    #[test]
    fn filter_spec_with_field_operand() {
        let predicate =
            parse_filter(catalog(), "PRICE crosses_above $EXPONENTIAL_MOVING_AVERAGE_50")
                .expect("valid filter");
        assert_eq!(
            predicate.operand_field().map(FieldRef::key),
            Some("EXPONENTIAL_MOVING_AVERAGE_50")
        );
    }

    #[test]
    fn set_filter_splits_on_commas() {
        let predicate =
            parse_filter(catalog(), "SECTOR in Finance, Energy Minerals").expect("valid filter");
        assert_eq!(
            predicate.operand(),
            &Operand::Set(vec![
                Scalar::Text(String::from("Finance")),
                Scalar::Text(String::from("Energy Minerals")),
            ])
        );
    }

    #[test]
    fn missing_value_is_a_usage_error() {
        let err = parse_filter(catalog(), "PRICE >").expect_err("no value");
        assert!(matches!(err, CliError::Usage(_)));
    }

    #[test]
    fn sort_defaults_to_descending() {
        let (field, direction) = parse_sort(catalog(), "MARKET_CAPITALIZATION").expect("valid");
        assert_eq!(field.key(), "MARKET_CAPITALIZATION");
        assert_eq!(direction, SortDirection::Desc);

        let (_, direction) = parse_sort(catalog(), "PRICE:asc").expect("valid");
        assert_eq!(direction, SortDirection::Asc);
    }

    #[test]
    fn crypto_shorthand_expands_to_binance_pair() {
        assert_eq!(resolve_ticker(ScreenerKind::Crypto, "btc"), "BINANCE:BTCUSDT");
        assert_eq!(resolve_ticker(ScreenerKind::Crypto, "KRAKEN:XBTUSD"), "KRAKEN:XBTUSD");
        assert_eq!(resolve_ticker(ScreenerKind::Stock, "aapl"), "AAPL");
    }
}
