use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// 거래 모델
#[derive(Serialize, Deserialize, sqlx::FromRow)]
pub struct Transaction {
    pub id: i64,
    pub buyer_id: i64,
    pub seller_id: i64,
    pub item_id: i64,
    pub amount: i64,
    pub payment_method: String,
    pub buyer_phone_number: Option<String>,
    pub seller_phone_number: Option<String>,
    pub transaction_reference: String,
    pub status: String,
    pub pickup_location: Option<String>,
    pub pickup_date: Option<DateTime<Utc>>,
    pub pickup_instructions: Option<String>,
    pub buyer_message: Option<String>,
    pub seller_message: Option<String>,
    pub cancellation_reason: Option<String>,
    pub dispute_description: Option<String>,
    pub is_refunded: bool,
    pub payment_confirmed_at: Option<DateTime<Utc>>,
    pub pickup_completed_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub refunded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// 허용 거래 상태
pub const TRANSACTION_STATUSES: &[&str] = &[
    "PENDING",
    "PAYMENT_SENT",
    "PAYMENT_CONFIRMED",
    "PICKUP_ARRANGED",
    "PICKUP_COMPLETED",
    "COMPLETED",
    "CANCELLED",
    "DISPUTED",
];

// 허용 결제 수단
pub const PAYMENT_METHODS: &[&str] = &[
    "MTN_MOBILE_MONEY",
    "AIRTEL_MONEY",
    "CASH",
    "BANK_TRANSFER",
];

/// 거래 상태 검증
pub fn is_valid_status(status: &str) -> bool {
    TRANSACTION_STATUSES.contains(&status)
}

/// 결제 수단 검증
pub fn is_valid_payment_method(method: &str) -> bool {
    PAYMENT_METHODS.contains(&method)
}

/// 거래 참조 번호 생성 (TXN- + 8자리 대문자 16진수)
pub fn generate_transaction_reference() -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("TXN-{}", uuid[..8].to_uppercase())
}

/// 영수증 텍스트 생성
pub fn format_receipt(
    transaction: &Transaction,
    buyer_username: &str,
    seller_username: &str,
) -> String {
    format!(
        "========================================\n\
         \x20       TRANSACTION RECEIPT\n\
         ========================================\n\
         Reference: {}\n\
         Date: {}\n\
         ----------------------------------------\n\
         Amount: RWF {}\n\
         Status: {}\n\
         Payment Method: {}\n\
         Buyer: {}\n\
         Seller: {}\n\
         ========================================",
        transaction.transaction_reference,
        transaction.created_at.format("%Y-%m-%d %H:%M UTC"),
        transaction.amount,
        transaction.status,
        transaction.payment_method,
        buyer_username,
        seller_username
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_transaction() -> Transaction {
        Transaction {
            id: 1,
            buyer_id: 10,
            seller_id: 20,
            item_id: 30,
            amount: 45000,
            payment_method: "MTN_MOBILE_MONEY".to_string(),
            buyer_phone_number: None,
            seller_phone_number: None,
            transaction_reference: "TXN-0A1B2C3D".to_string(),
            status: "COMPLETED".to_string(),
            pickup_location: None,
            pickup_date: None,
            pickup_instructions: None,
            buyer_message: None,
            seller_message: None,
            cancellation_reason: None,
            dispute_description: None,
            is_refunded: false,
            payment_confirmed_at: None,
            pickup_completed_at: None,
            completed_at: None,
            cancelled_at: None,
            refunded_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_valid_statuses() {
        for status in TRANSACTION_STATUSES {
            assert!(is_valid_status(status));
        }
        assert!(!is_valid_status("SHIPPED"));
        assert!(!is_valid_status("pending"));
    }

    #[test]
    fn test_valid_payment_methods() {
        assert!(is_valid_payment_method("CASH"));
        assert!(is_valid_payment_method("AIRTEL_MONEY"));
        assert!(!is_valid_payment_method("PAYPAL"));
    }

    #[test]
    fn test_reference_format() {
        let reference = generate_transaction_reference();
        assert_eq!(reference.len(), 12);
        assert!(reference.starts_with("TXN-"));
        assert!(reference[4..]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_reference_uniqueness() {
        let first = generate_transaction_reference();
        let second = generate_transaction_reference();
        assert_ne!(first, second);
    }

    #[test]
    fn test_receipt_contents() {
        let transaction = sample_transaction();
        let receipt = format_receipt(&transaction, "alice", "bob");
        assert!(receipt.contains("TRANSACTION RECEIPT"));
        assert!(receipt.contains("Reference: TXN-0A1B2C3D"));
        assert!(receipt.contains("Amount: RWF 45000"));
        assert!(receipt.contains("Status: COMPLETED"));
        assert!(receipt.contains("Payment Method: MTN_MOBILE_MONEY"));
        assert!(receipt.contains("Buyer: alice"));
        assert!(receipt.contains("Seller: bob"));
    }
}
