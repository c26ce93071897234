//! The fixed 22-field transaction schema of balance statements.

use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::statement::literal::StatementValue;

/// Number of positional values in every statement record.
pub const TRANSACTION_FIELD_COUNT: usize = 22;

/// A column of the balance-statement feed, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionField {
    EntryType,
    TransactionId,
    CreatedAt,
    Amount,
    RunningBalance,
    PaymentOutlet,
    Recipient,
    Currency,
    Fee,
    TransferId,
    OrderId,
    PaymentRequestId,
    InvoiceId,
    ExternalTransactionId,
    PaymentRequestFee,
    Payer,
    Message,
    ExchangeAmount,
    ExchangeCurrency,
    ExchangeRate,
    Status,
    OrderFee,
}

impl TransactionField {
    /// Every field, in wire order.
    pub const ALL: [TransactionField; TRANSACTION_FIELD_COUNT] = [
        TransactionField::EntryType,
        TransactionField::TransactionId,
        TransactionField::CreatedAt,
        TransactionField::Amount,
        TransactionField::RunningBalance,
        TransactionField::PaymentOutlet,
        TransactionField::Recipient,
        TransactionField::Currency,
        TransactionField::Fee,
        TransactionField::TransferId,
        TransactionField::OrderId,
        TransactionField::PaymentRequestId,
        TransactionField::InvoiceId,
        TransactionField::ExternalTransactionId,
        TransactionField::PaymentRequestFee,
        TransactionField::Payer,
        TransactionField::Message,
        TransactionField::ExchangeAmount,
        TransactionField::ExchangeCurrency,
        TransactionField::ExchangeRate,
        TransactionField::Status,
        TransactionField::OrderFee,
    ];

    /// Position of this field in a record.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Snake-case field name.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionField::EntryType => "entry_type",
            TransactionField::TransactionId => "transaction_id",
            TransactionField::CreatedAt => "created_at",
            TransactionField::Amount => "amount",
            TransactionField::RunningBalance => "running_balance",
            TransactionField::PaymentOutlet => "payment_outlet",
            TransactionField::Recipient => "recipient",
            TransactionField::Currency => "currency",
            TransactionField::Fee => "fee",
            TransactionField::TransferId => "transfer_id",
            TransactionField::OrderId => "order_id",
            TransactionField::PaymentRequestId => "payment_request_id",
            TransactionField::InvoiceId => "invoice_id",
            TransactionField::ExternalTransactionId => "external_transaction_id",
            TransactionField::PaymentRequestFee => "payment_request_fee",
            TransactionField::Payer => "payer",
            TransactionField::Message => "message",
            TransactionField::ExchangeAmount => "exchange_amount",
            TransactionField::ExchangeCurrency => "exchange_currency",
            TransactionField::ExchangeRate => "exchange_rate",
            TransactionField::Status => "status",
            TransactionField::OrderFee => "order_fee",
        }
    }
}

impl std::fmt::Display for TransactionField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransactionField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("Unknown transaction field: {s}"))
    }
}

/// One balance-statement entry.
///
/// Always holds exactly [`TRANSACTION_FIELD_COUNT`] values, one per
/// [`TransactionField`]. Serializes as a JSON object keyed by field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    values: [StatementValue; TRANSACTION_FIELD_COUNT],
}

impl TransactionRecord {
    /// Zip positional values onto the schema.
    ///
    /// Hands the values back unchanged if there are not exactly 22 of them.
    pub fn from_values(values: Vec<StatementValue>) -> Result<Self, Vec<StatementValue>> {
        let values = <[StatementValue; TRANSACTION_FIELD_COUNT]>::try_from(values)?;
        Ok(Self { values })
    }

    /// Value of a field.
    pub fn get(&self, field: TransactionField) -> &StatementValue {
        &self.values[field.index()]
    }

    /// Look up a value by field name; `None` for names outside the schema.
    pub fn field(&self, name: &str) -> Option<&StatementValue> {
        name.parse::<TransactionField>().ok().map(|field| self.get(field))
    }

    /// Iterate over `(field, value)` pairs in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (TransactionField, &StatementValue)> {
        TransactionField::ALL.into_iter().zip(self.values.iter())
    }

    /// All 22 values in wire order.
    pub fn values(&self) -> &[StatementValue] {
        &self.values
    }

    fn text(&self, field: TransactionField) -> Option<&str> {
        self.get(field).as_str()
    }

    fn number(&self, field: TransactionField) -> Option<Decimal> {
        self.get(field).as_decimal()
    }

    /// Entry type, e.g. `deposit` or `transfer`.
    pub fn entry_type(&self) -> Option<&str> {
        self.text(TransactionField::EntryType)
    }

    /// Transaction id.
    pub fn transaction_id(&self) -> Option<&str> {
        self.text(TransactionField::TransactionId)
    }

    /// Creation timestamp as sent by the server (not parsed).
    pub fn created_at(&self) -> Option<&str> {
        self.text(TransactionField::CreatedAt)
    }

    /// Currency symbol.
    pub fn currency(&self) -> Option<&str> {
        self.text(TransactionField::Currency)
    }

    /// Order id, when the entry belongs to an order.
    pub fn order_id(&self) -> Option<&str> {
        self.text(TransactionField::OrderId)
    }

    /// Entry status, e.g. `done`.
    pub fn status(&self) -> Option<&str> {
        self.text(TransactionField::Status)
    }

    /// Signed amount of the entry.
    pub fn amount(&self) -> Option<Decimal> {
        self.number(TransactionField::Amount)
    }

    /// Balance after the entry.
    pub fn running_balance(&self) -> Option<Decimal> {
        self.number(TransactionField::RunningBalance)
    }

    /// Fee charged on the entry.
    pub fn fee(&self) -> Option<Decimal> {
        self.number(TransactionField::Fee)
    }
}

impl Serialize for TransactionRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(TRANSACTION_FIELD_COUNT))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.as_str(), value)?;
        }
        map.end()
    }
}
