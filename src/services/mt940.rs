use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::domain::models::statement::{Statement, Transaction};

/// Value for the :20: transaction reference line.
const TRANSACTION_REFERENCE: &str = "MT940";
/// The service emits one statement per export, so :28C: is fixed.
const STATEMENT_NUMBER: &str = "1";
/// Narrative subfields (~32/~33) hold at most 35 characters.
const NARRATIVE_CHUNK_LEN: usize = 35;

/// Renders a statement as MT940 text. Lines are joined with `\n`; the
/// trailing `-` terminates the message.
pub fn render(iban: &str, statement: &Statement) -> String {
    let iban = iban.replace(' ', "");
    let symbol = currency_symbol(&statement.currency);

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!(":20:{}", TRANSACTION_REFERENCE));
    lines.push(format!(":25:/{}", iban));
    lines.push(format!(":28C:{}", STATEMENT_NUMBER));
    lines.push(format!(
        ":60F:C{}{}{}",
        statement.opening.date.format("%y%m%d"),
        statement.currency,
        format_amount(statement.opening.amount)
    ));

    for tx in &statement.transactions {
        push_transaction(&mut lines, tx, &symbol);
    }

    lines.push(format!(
        ":62F:C{}{}{}",
        statement.closing.date.format("%y%m%d"),
        statement.currency,
        format_amount(statement.closing.amount)
    ));
    // :64: carries the closing balance dated at the end of the opening month
    lines.push(format!(
        ":64:C{}{}{}",
        last_day_of_month(statement.opening.date).format("%y%m%d"),
        statement.currency,
        format_amount(statement.closing.amount)
    ));
    lines.push("-".to_string());

    lines.join("\n")
}

fn push_transaction(lines: &mut Vec<String>, tx: &Transaction, symbol: &str) {
    let direction = if tx.is_debit() { 'D' } else { 'C' };
    let code = tx.operation.number();

    lines.push(format!(
        ":61:{}{}{}{}N{}NONREF//{}",
        tx.value_date.format("%y%m%d"),
        tx.value_date.format("%m%d"),
        direction,
        format_amount(tx.amount.abs()),
        code,
        tx.id
    ));
    lines.push(format!("{} 0", code));
    lines.push(format!(":86:020~00{}", code));

    if !tx.reference.is_empty() {
        lines.push(format!("~20{}", tx.reference));
    }

    let chunks = split_narrative(&tx.description);
    if let Some(first) = chunks.first() {
        lines.push(format!("~32{}", first));
    }
    if let Some(second) = chunks.get(1) {
        lines.push(format!("~33{}", second));
    }
    if chunks.len() > 2 {
        lines.push(format!("~38{}", chunks[2..].concat()));
    }

    let beneficiary = tx.beneficiary_iban.replace(' ', "");
    if !beneficiary.is_empty() {
        lines.push(format!("~38{}", beneficiary));
    }

    lines.push(format!("~60{}", symbol));
    lines.push(format!("~63{}", symbol));
}

/// Formats an amount with two decimals and a comma separator: `1234,56`.
fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2)).replace('.', ",")
}

fn currency_symbol(currency: &str) -> String {
    if currency == "EUR" {
        "€".to_string()
    } else {
        currency.to_string()
    }
}

/// Splits narrative text into 35-character chunks, with line breaks
/// flattened to spaces first. Chunks count characters, not bytes.
fn split_narrative(text: &str) -> Vec<String> {
    let cleaned = text.replace(['\r', '\n'], " ");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Vec::new();
    }
    cleaned
        .chars()
        .collect::<Vec<_>>()
        .chunks(NARRATIVE_CHUNK_LEN)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let first_of_next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    first_of_next
        .and_then(|d| d.pred_opt())
        .expect("date arithmetic cannot leave the supported range")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::statement::{Balance, OperationCode};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn formats_amounts_with_comma_and_two_decimals() {
        assert_eq!(format_amount(dec("1")), "1,00");
        assert_eq!(format_amount(dec("1234.5")), "1234,50");
        assert_eq!(format_amount(dec("2.344")), "2,34");
    }

    #[test]
    fn splits_narrative_into_35_char_chunks() {
        let text = "a".repeat(40);
        let chunks = split_narrative(&text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 35);
        assert_eq!(chunks[1].chars().count(), 5);
    }

    #[test]
    fn narrative_counts_characters_not_bytes() {
        let text = "ё".repeat(36);
        let chunks = split_narrative(&text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 35);
    }

    #[test]
    fn narrative_flattens_line_breaks() {
        assert_eq!(split_narrative("one\r\ntwo"), vec!["one  two".to_string()]);
        assert!(split_narrative("  \n ").is_empty());
    }

    #[test]
    fn finds_last_day_of_month() {
        assert_eq!(last_day_of_month(date(2024, 2, 10)), date(2024, 2, 29));
        assert_eq!(last_day_of_month(date(2023, 12, 1)), date(2023, 12, 31));
    }

    #[test]
    fn renders_full_statement() {
        let statement = Statement {
            currency: "EUR".to_string(),
            opening: Balance {
                date: date(2024, 3, 1),
                amount: dec("100.00"),
            },
            closing: Balance {
                date: date(2024, 3, 5),
                amount: dec("99.00"),
            },
            transactions: vec![
                Transaction {
                    id: "ef56gh78".to_string(),
                    value_date: date(2024, 3, 1),
                    amount: dec("100.00"),
                    operation: OperationCode::Transfer,
                    reference: "INV-1".to_string(),
                    description: "Salary payment".to_string(),
                    beneficiary_iban: "LT12 3456".to_string(),
                },
                Transaction {
                    id: "ab12cd34".to_string(),
                    value_date: date(2024, 3, 5),
                    amount: dec("-1.00"),
                    operation: OperationCode::Fee,
                    reference: String::new(),
                    description: "Card fee".to_string(),
                    beneficiary_iban: String::new(),
                },
            ],
        };

        let expected = "\
:20:MT940
:25:/LT601010012345678901
:28C:1
:60F:C240301EUR100,00
:61:2403010301C100,00N119NONREF//ef56gh78
119 0
:86:020~00119
~20INV-1
~32Salary payment
~38LT123456
~60€
~63€
:61:2403050305D1,00N49NONREF//ab12cd34
49 0
:86:020~0049
~32Card fee
~60€
~63€
:62F:C240305EUR99,00
:64:C240331EUR99,00
-";

        assert_eq!(render("LT60 1010 0123 4567 8901", &statement), expected);
    }

    #[test]
    fn non_eur_statement_uses_currency_code_as_symbol() {
        let statement = Statement {
            currency: "USD".to_string(),
            opening: Balance {
                date: date(2024, 1, 2),
                amount: dec("0"),
            },
            closing: Balance {
                date: date(2024, 1, 2),
                amount: dec("0"),
            },
            transactions: vec![Transaction {
                id: "x1".to_string(),
                value_date: date(2024, 1, 2),
                amount: dec("5"),
                operation: OperationCode::Transfer,
                reference: String::new(),
                description: String::new(),
                beneficiary_iban: String::new(),
            }],
        };

        let rendered = render("US1", &statement);
        assert!(rendered.contains("~60USD"));
        assert!(rendered.contains("~63USD"));
        assert!(!rendered.contains("~32"));
    }
}
