use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::enums::{AgreementStatus, AgreementType, ShopStatus, TenantStatus};
use super::validation::{
    validate_non_negative, validate_percent, validate_phone, validate_positive,
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateShopRequest {
    #[validate(length(min = 1, max = 20, message = "shop number is required (max 20 characters)"))]
    pub shop_number: String,
    #[serde(default)]
    #[validate(length(max = 50, message = "size must be at most 50 characters"))]
    pub size: String,
    #[validate(custom(function = "validate_positive"))]
    pub monthly_rent: Decimal,
    #[validate(custom(function = "validate_non_negative"))]
    pub deposit: Decimal,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateShopRequest {
    #[validate(length(min = 1, max = 20, message = "shop number must be 1 to 20 characters"))]
    pub shop_number: Option<String>,
    #[validate(length(max = 50))]
    pub size: Option<String>,
    #[validate(custom(function = "validate_positive"))]
    pub monthly_rent: Option<Decimal>,
    #[validate(custom(function = "validate_non_negative"))]
    pub deposit: Option<Decimal>,
    pub status: Option<ShopStatus>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTenantRequest {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub address: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub business_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTenantRequest {
    #[validate(length(min = 1, max = 100, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 200))]
    pub address: Option<String>,
    #[validate(length(max = 100))]
    pub business_type: Option<String>,
    pub status: Option<TenantStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAgreementRequest {
    pub shop_id: Uuid,
    pub tenant_id: Uuid,
    pub agreement_date: NaiveDate,
    #[validate(range(min = 1, max = 600, message = "duration must be between 1 and 600 months"))]
    pub duration_months: i32,
    /// Defaults to the shop's monthly rent.
    #[validate(custom(function = "validate_positive"))]
    pub monthly_rent: Option<Decimal>,
    #[validate(custom(function = "validate_non_negative"))]
    pub security_deposit: Decimal,
    #[validate(custom(function = "validate_non_negative"))]
    pub advance_rent: Decimal,
    pub agreement_type: AgreementType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateAgreementRequest {
    #[validate(range(min = 1, max = 600, message = "duration must be between 1 and 600 months"))]
    pub duration_months: Option<i32>,
    #[validate(custom(function = "validate_positive"))]
    pub monthly_rent: Option<Decimal>,
    pub agreement_type: Option<AgreementType>,
    pub status: Option<AgreementStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateLoanRequest {
    pub agreement_id: Uuid,
    #[validate(custom(function = "validate_positive"))]
    pub principal: Decimal,
    /// Monthly rate, in percent.
    #[validate(custom(function = "validate_percent"))]
    pub interest_rate: Decimal,
    #[validate(range(min = 1, max = 600, message = "duration must be between 1 and 600 months"))]
    pub duration_months: i32,
    pub loan_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PayEmiRequest {
    pub payment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePenaltyRequest {
    pub agreement_id: Uuid,
    pub due_date: NaiveDate,
    /// Defaults to the agreement's monthly rent.
    #[validate(custom(function = "validate_positive"))]
    pub rent_amount: Option<Decimal>,
    #[validate(custom(function = "validate_percent"))]
    pub penalty_rate: Decimal,
    #[validate(length(max = 200))]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SettlePenaltyRequest {
    pub paid_date: Option<NaiveDate>,
}

/// One toggleable amount of a rent collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionPart {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub amount: Decimal,
}

impl CollectionPart {
    pub fn of(amount: Decimal) -> Self {
        Self {
            enabled: true,
            amount,
        }
    }

    /// Enabled with a positive amount.
    pub fn is_due(&self) -> bool {
        self.enabled && self.amount > Decimal::ZERO
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PenaltyCollectionPart {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub amount: Decimal,
    /// Defaults to the oldest pending penalty of the agreement.
    #[serde(default)]
    pub penalty_id: Option<Uuid>,
}

impl PenaltyCollectionPart {
    pub fn is_due(&self) -> bool {
        self.enabled && self.amount > Decimal::ZERO
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RentCollectionRequest {
    pub agreement_id: Uuid,
    pub payment_date: Option<NaiveDate>,
    #[validate(length(max = 30))]
    pub payment_mode: Option<String>,
    #[serde(default)]
    pub rent: CollectionPart,
    #[serde(default)]
    pub emi: CollectionPart,
    #[serde(default)]
    pub penalty: PenaltyCollectionPart,
}

impl RentCollectionRequest {
    pub fn rent_only(agreement_id: Uuid, amount: Decimal) -> Self {
        Self {
            agreement_id,
            payment_date: None,
            payment_mode: None,
            rent: CollectionPart::of(amount),
            emi: CollectionPart::default(),
            penalty: PenaltyCollectionPart::default(),
        }
    }
}
