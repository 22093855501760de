use chrono::NaiveDate;
use rust_decimal::Decimal;

/// SWIFT operation code assigned to a booked entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationCode {
    Transfer,
    Fee,
}

impl OperationCode {
    pub fn number(&self) -> &'static str {
        match self {
            OperationCode::Transfer => "119",
            OperationCode::Fee => "49",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Balance {
    pub date: NaiveDate,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub value_date: NaiveDate,
    /// Signed amount in statement currency; negative means debit.
    pub amount: Decimal,
    pub operation: OperationCode,
    pub reference: String,
    pub description: String,
    pub beneficiary_iban: String,
}

impl Transaction {
    pub fn is_debit(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}

/// One bank-statement period. Transactions are ordered chronologically,
/// earliest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub currency: String,
    pub opening: Balance,
    pub closing: Balance,
    pub transactions: Vec<Transaction>,
}
