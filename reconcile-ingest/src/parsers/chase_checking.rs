//! Chase checking statement line formats (text)
//!
//! Expected extracted-text rows:
//!   03/14 Card Purchase 03/13 STARBUCKS STORE #123 $4.75
//!   03/02 Card Purchase With Pin 03/01 Wawa 1234 Tampa FL $32.10
//!   03/05 Deposit 1234567 $1,250.00
//!   123 ^ 03/10 $500.00
//!   03/20 Orig CO Name:Epcor Water USA Orig ID:9876543 CO Entry Descr:Web Pay $45.10
//!
//! Formats are tried in declaration order; the first hit wins.

use anyhow::Result;
use regex::{Captures, Regex};

use reconcile_core::coerce_amount;

use crate::types::{LineFormat, TransactionCandidate};

/// Amount numeral, thousands separators allowed.
const AMOUNT: &str = r"(?P<amount>\d[\d,]*(?:\.\d*)?)";

#[derive(Debug, Clone, Copy)]
enum Row {
    CardPurchase,
    CardPurchaseWithPin,
    Deposit,
    Check,
    ElectronicWithdrawal,
}

/// Compiled statement formats in priority order.
pub struct ChaseCheckingFormats {
    formats: Vec<(Row, Regex)>,
}

impl ChaseCheckingFormats {
    pub fn new() -> Result<Self> {
        let card_purchase = Regex::new(&format!(
            r"(?P<post>\d{{2}}/\d{{2}})\s+Card\s+Purchase\s+(?P<date>\d{{2}}/\d{{2}})\s+(?P<desc>.+?)\s+\$?{AMOUNT}$"
        ))?;
        let card_purchase_pin = Regex::new(&format!(
            r"(?P<post>\d{{2}}/\d{{2}})\s+Card\s+Purchase\s+With\s+Pin\s+(?P<date>\d{{2}}/\d{{2}})\s+(?P<desc>.+?)\s+\$?{AMOUNT}$"
        ))?;
        let deposit_dollar = Regex::new(&format!(
            r"(?P<date>\d{{2}}/\d{{2}})\s+Deposit\s+(?P<reference>\d+)\s+\${AMOUNT}$"
        ))?;
        let deposit_plain = Regex::new(&format!(
            r"(?P<date>\d{{2}}/\d{{2}})\s+Deposit\s+(?P<reference>\d+)\s+{AMOUNT}$"
        ))?;
        let check = Regex::new(&format!(
            r"(?P<number>\d+)\s+\^\s+(?P<date>\d{{2}}/\d{{2}})\s+\${AMOUNT}$"
        ))?;
        let electronic_withdrawal = Regex::new(&format!(
            r"(?P<date>\d{{2}}/\d{{2}})\s+Orig\s+CO\s+Name:(?P<name>.+?)\s+Orig\s+ID:.+?\s+\${AMOUNT}$"
        ))?;

        Ok(Self {
            formats: vec![
                (Row::CardPurchase, card_purchase),
                (Row::CardPurchaseWithPin, card_purchase_pin),
                (Row::Deposit, deposit_dollar),
                (Row::Deposit, deposit_plain),
                (Row::Check, check),
                (Row::ElectronicWithdrawal, electronic_withdrawal),
            ],
        })
    }

    /// Try every statement format in order against an already-trimmed line.
    pub fn parse(&self, line: &str) -> Option<TransactionCandidate> {
        self.formats.iter().find_map(|(row, re)| {
            let caps = re.captures(line)?;
            Some(build_candidate(*row, &caps))
        })
    }
}

fn build_candidate(row: Row, caps: &Captures<'_>) -> TransactionCandidate {
    let amount = coerce_amount(&caps["amount"]);
    let date = caps["date"].to_string();

    match row {
        Row::CardPurchase | Row::CardPurchaseWithPin => TransactionCandidate {
            date,
            amount: -amount,
            description: caps["desc"].trim().to_string(),
            check_number: None,
            format: if matches!(row, Row::CardPurchase) {
                LineFormat::CardPurchase
            } else {
                LineFormat::CardPurchaseWithPin
            },
        },
        Row::Deposit => TransactionCandidate {
            date,
            amount,
            description: format!("Deposit {}", &caps["reference"]),
            check_number: None,
            format: LineFormat::Deposit,
        },
        Row::Check => TransactionCandidate {
            date,
            amount: -amount,
            description: format!("Check #{}", &caps["number"]),
            check_number: Some(caps["number"].to_string()),
            format: LineFormat::Check,
        },
        Row::ElectronicWithdrawal => {
            let name = &caps["name"];
            let name = name.split(" Orig ID").next().unwrap_or(name);
            TransactionCandidate {
                date,
                amount: -amount,
                description: name.trim().to_string(),
                check_number: None,
                format: LineFormat::ElectronicWithdrawal,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formats() -> ChaseCheckingFormats {
        ChaseCheckingFormats::new().unwrap()
    }

    #[test]
    fn test_card_purchase_is_outflow() {
        let c = formats()
            .parse("03/14 Card Purchase 03/13 STARBUCKS STORE #123 $4.75")
            .unwrap();
        assert_eq!(c.format, LineFormat::CardPurchase);
        assert_eq!(c.date, "03/13");
        assert_eq!(c.amount, -4.75);
        assert_eq!(c.description, "STARBUCKS STORE #123");
    }

    #[test]
    fn test_card_purchase_without_dollar_sign() {
        let c = formats()
            .parse("04/02 Card Purchase 04/01 Home Depot 0412 Tampa FL 89.12")
            .unwrap();
        assert_eq!(c.amount, -89.12);
        assert_eq!(c.description, "Home Depot 0412 Tampa FL");
    }

    #[test]
    fn test_card_purchase_with_pin() {
        let c = formats()
            .parse("03/02 Card Purchase With Pin 03/01 Wawa 1234 Tampa FL $32.10")
            .unwrap();
        assert_eq!(c.format, LineFormat::CardPurchaseWithPin);
        assert_eq!(c.date, "03/01");
        assert_eq!(c.amount, -32.10);
        assert_eq!(c.description, "Wawa 1234 Tampa FL");
    }

    #[test]
    fn test_deposit_with_thousands_separator() {
        let c = formats().parse("03/05 Deposit 1234567 $1,250.00").unwrap();
        assert_eq!(c.format, LineFormat::Deposit);
        assert_eq!(c.date, "03/05");
        assert_eq!(c.amount, 1250.0);
        assert_eq!(c.description, "Deposit 1234567");
    }

    #[test]
    fn test_deposit_without_dollar_sign() {
        let c = formats().parse("03/06 Deposit 88 2,000.00").unwrap();
        assert_eq!(c.amount, 2000.0);
        assert_eq!(c.description, "Deposit 88");

        let plain = formats().parse("03/07 Deposit 89 1250.00").unwrap();
        assert_eq!(plain.amount, 1250.0);
    }

    #[test]
    fn test_check_line() {
        let c = formats().parse("123 ^ 03/10 $500.00").unwrap();
        assert_eq!(c.format, LineFormat::Check);
        assert_eq!(c.date, "03/10");
        assert_eq!(c.amount, -500.0);
        assert_eq!(c.description, "Check #123");
        assert_eq!(c.check_number.as_deref(), Some("123"));
    }

    #[test]
    fn test_electronic_withdrawal_strips_originator_id() {
        let c = formats()
            .parse("03/20 Orig CO Name:Epcor Water USA Orig ID:9876543 CO Entry Descr:Web Pay $45.10")
            .unwrap();
        assert_eq!(c.format, LineFormat::ElectronicWithdrawal);
        assert_eq!(c.date, "03/20");
        assert_eq!(c.amount, -45.10);
        assert_eq!(c.description, "Epcor Water USA");
    }

    #[test]
    fn test_unrecognized_line() {
        assert!(formats().parse("Beginning Balance $1,000.00").is_none());
        assert!(formats().parse("03/14 Card Purchase 03/13 NO AMOUNT HERE").is_none());
    }
}
