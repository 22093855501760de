use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    application::{error::ApplicationError, services::StatementConverter},
    domain::models::statement::{Balance, OperationCode, Statement, Transaction},
    services::{error::ConvertError, mt940},
};

/// One row of a Revolut account export. Exports list the most recent
/// transaction first; columns absent from the export deserialize as empty.
#[derive(Debug, Deserialize)]
struct RevolutRow {
    #[serde(rename = "ID", default)]
    id: String,
    #[serde(rename = "Type", default)]
    kind: String,
    #[serde(rename = "Date started (UTC)", default)]
    date_started: String,
    #[serde(rename = "Date completed (UTC)", default)]
    date_completed: String,
    #[serde(rename = "Amount", default)]
    amount: String,
    #[serde(rename = "Orig amount", default)]
    orig_amount: String,
    #[serde(rename = "Payment currency", default)]
    payment_currency: String,
    #[serde(rename = "Balance", default)]
    balance: String,
    #[serde(rename = "Reference", default)]
    reference: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "Beneficiary IBAN", default)]
    beneficiary_iban: String,
}

pub struct RevolutConverter;

impl RevolutConverter {
    pub fn new() -> Self {
        Self
    }

    fn parse(&self, content: &str) -> Result<Statement, ConvertError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());
        let rows = reader
            .deserialize::<RevolutRow>()
            .collect::<Result<Vec<_>, _>>()?;

        if rows.is_empty() {
            return Err(ConvertError::EmptyStatement);
        }

        let newest = &rows[0];
        let earliest = &rows[rows.len() - 1];

        let currency = [&newest.payment_currency, &earliest.payment_currency]
            .into_iter()
            .find(|value| !value.is_empty())
            .map(|value| value.trim().to_uppercase())
            .unwrap_or_else(|| "EUR".to_string());

        let opening = Balance {
            date: parse_date(&earliest.date_completed)?,
            amount: parse_decimal(&earliest.balance),
        };
        let closing = Balance {
            date: parse_date(&newest.date_completed)?,
            amount: parse_decimal(&newest.balance),
        };

        // Exports are newest-first; the statement wants chronological order.
        let mut transactions = Vec::with_capacity(rows.len());
        for row in rows.iter().rev() {
            transactions.push(parse_transaction(row, &earliest.date_completed)?);
        }

        Ok(Statement {
            currency,
            opening,
            closing,
            transactions,
        })
    }
}

impl StatementConverter for RevolutConverter {
    fn convert(&self, content: &str, iban: &str) -> Result<String, ApplicationError> {
        let statement = self.parse(content)?;
        Ok(mt940::render(iban, &statement))
    }
}

fn parse_transaction(row: &RevolutRow, fallback_date: &str) -> Result<Transaction, ConvertError> {
    let date_raw = [&row.date_completed, &row.date_started]
        .into_iter()
        .find(|value| !value.is_empty())
        .map(String::as_str)
        .unwrap_or(fallback_date);

    let amount_raw = if row.amount.is_empty() {
        &row.orig_amount
    } else {
        &row.amount
    };

    let operation = if row.kind.to_uppercase().contains("FEE") {
        OperationCode::Fee
    } else {
        OperationCode::Transfer
    };

    Ok(Transaction {
        id: row.id.replace('-', "").trim().to_string(),
        value_date: parse_date(date_raw)?,
        amount: parse_decimal(amount_raw),
        operation,
        reference: row.reference.trim().to_string(),
        description: row.description.trim().to_string(),
        beneficiary_iban: row.beneficiary_iban.trim().to_string(),
    })
}

fn parse_date(raw: &str) -> Result<NaiveDate, ConvertError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ConvertError::InvalidDate(raw.to_string()))
}

/// Parses a monetary value; empty or unparsable input counts as zero.
/// Revolut exports use either `.` or `,` as the decimal separator.
fn parse_decimal(raw: &str) -> Decimal {
    if raw.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&raw.replace(',', ".")).unwrap_or(Decimal::ZERO)
}
